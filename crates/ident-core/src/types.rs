//! Type tags: the engine's closed vocabulary for the shape of a value

use std::fmt;

use crate::value::Value;

/// Element type annotation of an array-like tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Mixed, empty or single-element sequence
    Any,
    /// Every element classified identically
    Of(Box<TypeTag>),
}

/// A structural category surfaced by the foreign bridge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignTag {
    /// Lower-cased category (e.g. `javaobject`, `javaarray`, `javaclass`)
    pub category: String,
    /// Element annotation, present for array-like categories
    pub element: Option<ElementType>,
}

/// Semantic type of an inspected value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `null`
    Null,
    /// Missing value
    Undefined,
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `function`
    Function,
    /// Plain keyed object
    Object,
    /// `array<T>` / `array<any>`
    Array(ElementType),
    /// Category reported by the foreign bridge
    Foreign(ForeignTag),
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Any => write!(f, "any"),
            ElementType::Of(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Null => write!(f, "null"),
            TypeTag::Undefined => write!(f, "undefined"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::Boolean => write!(f, "boolean"),
            TypeTag::Function => write!(f, "function"),
            TypeTag::Object => write!(f, "object"),
            TypeTag::Array(element) => write!(f, "array<{}>", element),
            TypeTag::Foreign(tag) => {
                write!(f, "{}", tag.category)?;
                if let Some(element) = &tag.element {
                    write!(f, "<{}>", element)?;
                }
                Ok(())
            }
        }
    }
}

impl TypeTag {
    /// Check if this is `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, TypeTag::Null | TypeTag::Undefined)
    }

    /// Check if values of this type have enumerable children
    pub fn is_container(&self) -> bool {
        match self {
            TypeTag::Array(_) | TypeTag::Object => true,
            TypeTag::Foreign(tag) => {
                tag.element.is_some() || tag.category.contains("object")
            }
            _ => false,
        }
    }

    /// Check if this is the bridge's generic object category
    pub fn is_foreign_object(&self) -> bool {
        match self {
            TypeTag::Foreign(tag) => tag.element.is_none() && tag.category.ends_with("object"),
            _ => false,
        }
    }

    /// The tag with any generic annotation removed (`array<string>` -> `array`)
    pub fn base_name(&self) -> String {
        match self {
            TypeTag::Array(_) => "array".to_string(),
            TypeTag::Foreign(tag) => tag.category.clone(),
            other => other.to_string(),
        }
    }
}

/// Classify a value.
///
/// Arrays (native or bridged) get an element annotation only when they
/// hold more than one element and every element classifies identically;
/// a single-element array is always `array<any>`.
pub fn classify(value: &Value) -> TypeTag {
    let mut stack = Vec::new();
    classify_impl(value, &mut stack)
}

fn classify_impl(value: &Value, stack: &mut Vec<usize>) -> TypeTag {
    match value {
        Value::Undefined => TypeTag::Undefined,
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Function(_) => TypeTag::Function,
        Value::Object(_) => TypeTag::Object,
        Value::Array(arr) => {
            let items = arr.borrow().clone();
            TypeTag::Array(element_type(value, &items, stack))
        }
        Value::Foreign(obj) => {
            let category = obj.class_tag.to_lowercase();
            let element = if category.contains("array") {
                let items = obj.members.borrow().values().cloned().collect::<Vec<_>>();
                Some(element_type(value, &items, stack))
            } else {
                None
            };
            TypeTag::Foreign(ForeignTag { category, element })
        }
    }
}

fn element_type(container: &Value, items: &[Value], stack: &mut Vec<usize>) -> ElementType {
    let id = container.identity();
    // A sequence containing itself cannot be homogeneous in any useful sense.
    if id.is_some_and(|id| stack.contains(&id)) {
        return ElementType::Any;
    }
    if let Some(id) = id {
        stack.push(id);
    }

    let mut distinct: Vec<TypeTag> = Vec::new();
    for item in items {
        let tag = classify_impl(item, stack);
        if !distinct.contains(&tag) {
            distinct.push(tag);
        }
    }

    if id.is_some() {
        stack.pop();
    }

    if distinct.len() == 1 && items.len() > 1 {
        ElementType::Of(Box::new(distinct.remove(0)))
    } else {
        ElementType::Any
    }
}
