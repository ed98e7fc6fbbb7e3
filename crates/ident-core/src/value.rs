//! Value model for inspected values
//!
//! A [`Value`] is either a native scalar, a native container, a callable
//! carrying its own textual form, or an object bridged in from the foreign
//! host object system.
//!
//! # Sharing
//!
//! - Scalars are stored inline
//! - Containers, callables and foreign objects are reference-counted, so a
//!   bridge can hand the engine graphs that share (or cycle through) members
//! - Container contents sit behind a `RefCell` for the same reason; the
//!   engine itself only ever borrows immutably

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Insertion-ordered members of an object
pub type Members = IndexMap<String, Value>;

/// Shared handle to a native array
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared handle to a native object
pub type ObjectRef = Rc<RefCell<Members>>;

/// An inspected value.
#[derive(Clone)]
pub enum Value {
    /// Missing value
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Number (always f64, like the host)
    Number(f64),
    /// String
    String(String),
    /// Native array
    Array(ArrayRef),
    /// Native keyed object
    Object(ObjectRef),
    /// Callable
    Function(Rc<Function>),
    /// Object bridged from the foreign host
    Foreign(Rc<ForeignObject>),
}

/// A callable value, known only through its own textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// What the host yields when the callable is coerced to a string
    pub source: String,
}

impl Function {
    /// Create a callable from its textual form
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// An object bridged in from the foreign host.
pub struct ForeignObject {
    /// Structural category reported by the bridge (e.g. `JavaObject`, `JavaArray`)
    pub class_tag: String,
    /// Qualified class identity (e.g. `java.lang.String`), if exposed
    pub class_name: Option<String>,
    /// String form (e.g. `com.acme.dom.ScriptRoot@ba627e1`)
    pub text: String,
    /// Enumerable members
    pub members: RefCell<Members>,
}

impl ForeignObject {
    /// Create a foreign object of the generic `JavaObject` category
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            class_tag: "JavaObject".to_string(),
            class_name: None,
            text: text.into(),
            members: RefCell::new(Members::new()),
        }
    }

    /// Set the structural category reported by the bridge
    pub fn with_tag(mut self, class_tag: impl Into<String>) -> Self {
        self.class_tag = class_tag.into();
        self
    }

    /// Set the qualified class identity
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Add an enumerable member
    pub fn with_member(self, key: impl Into<String>, value: Value) -> Self {
        self.members.borrow_mut().insert(key.into(), value);
        self
    }

    /// Look up a member by key
    pub fn member(&self, key: &str) -> Option<Value> {
        self.members.borrow().get(key).cloned()
    }
}

impl fmt::Debug for ForeignObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Members are left out: bridged graphs are routinely cyclic.
        f.debug_struct("ForeignObject")
            .field("class_tag", &self.class_tag)
            .field("class_name", &self.class_name)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an array value
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Create an object value, keeping the given member order
    pub fn object<K: Into<String>>(members: impl IntoIterator<Item = (K, Value)>) -> Self {
        let members = members
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<Members>();
        Value::Object(Rc::new(RefCell::new(members)))
    }

    /// Create a callable from its textual form
    pub fn function(source: impl Into<String>) -> Self {
        Value::Function(Rc::new(Function::new(source)))
    }

    /// Wrap a foreign object
    pub fn foreign(object: ForeignObject) -> Self {
        Value::Foreign(Rc::new(object))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if this is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the foreign object if this is one
    pub fn as_foreign(&self) -> Option<&ForeignObject> {
        match self {
            Value::Foreign(obj) => Some(obj),
            _ => None,
        }
    }

    /// Get the callable if this is one
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Object identity for reference values.
    ///
    /// Two values share an identity exactly when they are handles to the
    /// same underlying allocation. Scalars have no identity.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(Rc::as_ptr(arr) as *const () as usize),
            Value::Object(obj) => Some(Rc::as_ptr(obj) as *const () as usize),
            Value::Function(func) => Some(Rc::as_ptr(func) as *const () as usize),
            Value::Foreign(obj) => Some(Rc::as_ptr(obj) as *const () as usize),
            _ => None,
        }
    }

    /// Enumerable `(key, value)` pairs.
    ///
    /// Array indices are rendered as decimal text. Scalars and callables
    /// have no members.
    pub fn members(&self) -> Vec<(String, Value)> {
        match self {
            Value::Array(arr) => arr
                .borrow()
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            Value::Object(obj) => obj
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Value::Foreign(obj) => obj
                .members
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The host's string coercion of this value.
    pub fn to_js_string(&self) -> String {
        let mut seen = Vec::new();
        self.js_string_impl(&mut seen)
    }

    fn js_string_impl(&self, seen: &mut Vec<usize>) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::Array(arr) => {
                let id = Rc::as_ptr(arr) as *const () as usize;
                // The host joins a cyclic array's back-reference as empty.
                if seen.contains(&id) {
                    return String::new();
                }
                seen.push(id);
                let parts = arr
                    .borrow()
                    .iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.js_string_impl(seen),
                    })
                    .collect::<Vec<_>>();
                seen.pop();
                parts.join(",")
            }
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(func) => func.source.clone(),
            Value::Foreign(obj) => obj.text.clone(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(arr) => write!(f, "Array(len={})", arr.borrow().len()),
            Value::Object(obj) => write!(f, "Object(len={})", obj.borrow().len()),
            Value::Function(func) => write!(f, "Function({:?})", func.source),
            Value::Foreign(obj) => write!(f, "Foreign({:?})", obj.text),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Render a number the way the host does.
///
/// Shortest round-trip digits; fixed notation while the decimal exponent
/// is in `[-7, 21)`, `d.ddde±N` outside it. Non-finite values use the
/// host's spelling and negative zero prints as `0`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e300`.
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(-point as usize), digits)
    } else {
        let e = point - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    };

    if n < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-7.0), "-7");
        assert_eq!(number_to_string(3.5), "3.5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_number_to_string_exponent_range() {
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(1e-6), "0.000001");
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(123.456), "123.456");
        assert_eq!(number_to_string(1e16), "10000000000000000");
        assert_eq!(number_to_string(1.23e20), "123000000000000000000");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e300), "1.5e+300");
        assert_eq!(number_to_string(-2.5e-8), "-2.5e-8");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_js_string_scalars() {
        assert_eq!(Value::Undefined.to_js_string(), "undefined");
        assert_eq!(Value::Null.to_js_string(), "null");
        assert_eq!(Value::Bool(true).to_js_string(), "true");
        assert_eq!(Value::from("hi").to_js_string(), "hi");
    }

    #[test]
    fn test_js_string_array_joins_with_commas() {
        let arr = Value::array(vec![
            Value::from("foo"),
            Value::Null,
            Value::from(2),
            Value::Undefined,
        ]);
        assert_eq!(arr.to_js_string(), "foo,,2,");
    }

    #[test]
    fn test_js_string_cyclic_array() {
        let arr = Value::array(vec![Value::from(1)]);
        if let Value::Array(inner) = &arr {
            inner.borrow_mut().push(arr.clone());
        }
        assert_eq!(arr.to_js_string(), "1,");
    }

    #[test]
    fn test_js_string_objects() {
        let obj = Value::object(vec![("a", Value::from(1))]);
        assert_eq!(obj.to_js_string(), "[object Object]");

        let foreign = Value::foreign(ForeignObject::new("com.acme.Thing@1f"));
        assert_eq!(foreign.to_js_string(), "com.acme.Thing@1f");

        let func = Value::function("function f() {}");
        assert_eq!(func.to_js_string(), "function f() {}");
    }

    #[test]
    fn test_members_order() {
        let obj = Value::object(vec![("b", Value::Null), ("a", Value::Null)]);
        let keys: Vec<_> = obj.members().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);

        let arr = Value::array(vec![Value::Null, Value::Null]);
        let keys: Vec<_> = arr.members().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);

        assert!(Value::from(1).members().is_empty());
    }

    #[test]
    fn test_identity() {
        let obj = Value::object(Vec::<(String, Value)>::new());
        let alias = obj.clone();
        let other = Value::object(Vec::<(String, Value)>::new());
        assert_eq!(obj.identity(), alias.identity());
        assert_ne!(obj.identity(), other.identity());
        assert_eq!(Value::from(1).identity(), None);
    }

    #[test]
    fn test_foreign_builder() {
        let obj = ForeignObject::new("java.lang.Long@0")
            .with_tag("JavaObject")
            .with_class("java.lang.Long")
            .with_member("longValue", Value::function("function longValue() {}"));
        assert_eq!(obj.class_name.as_deref(), Some("java.lang.Long"));
        assert!(obj.member("longValue").is_some());
        assert!(obj.member("missing").is_none());
    }
}
