//! Display names

use crate::identify::Identifier;
use crate::types::TypeTag;
use crate::value::Value;

/// Prefix a foreign callable's own string form leaks into its name
const FUNCTION_KEYWORD: &str = "function ";

impl Identifier {
    /// Canonical name of a value, given its display string and type tag.
    ///
    /// Strings and numbers are named by their display string, containers by
    /// their bare tag, callables by their declared name and foreign objects
    /// by their cleaned class identity. Anything else has an empty name.
    pub fn resolve_name(&self, value: &Value, display: &str, tag: &TypeTag) -> String {
        match tag {
            TypeTag::Null | TypeTag::Undefined => return tag.to_string(),
            TypeTag::String | TypeTag::Number => return display.to_string(),
            TypeTag::Array(_) | TypeTag::Object => return tag.base_name(),
            _ => {}
        }

        let name = match value {
            Value::Function(func) => self.signature_extractor().function_name(func),
            Value::Foreign(obj) => obj.class_name.clone().unwrap_or_default(),
            _ => String::new(),
        };

        let cleaned = self.cleaner().clean(&name);
        match cleaned.strip_prefix(FUNCTION_KEYWORD) {
            Some(rest) => rest.to_string(),
            None => cleaned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentConfig;
    use crate::types::classify;
    use crate::value::ForeignObject;

    fn name_of(value: &Value) -> String {
        let ident = Identifier::new(&IdentConfig::default());
        let tag = classify(value);
        let display = ident.display_string(value, &tag);
        ident.resolve_name(value, &display, &tag)
    }

    #[test]
    fn test_nullish_named_by_tag() {
        assert_eq!(name_of(&Value::Null), "null");
        assert_eq!(name_of(&Value::Undefined), "undefined");
    }

    #[test]
    fn test_scalars_named_by_display() {
        assert_eq!(name_of(&Value::from("hi")), "hi");
        assert_eq!(name_of(&Value::from(42)), "42");
        assert_eq!(name_of(&Value::from(false)), "");
    }

    #[test]
    fn test_containers_named_by_bare_tag() {
        let arr = Value::array(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(name_of(&arr), "array");
        assert_eq!(name_of(&Value::object(vec![("a", Value::Null)])), "object");
    }

    #[test]
    fn test_functions_named_by_declaration() {
        assert_eq!(name_of(&Value::function("function add(a, b){return a+b;}")), "add");
        assert_eq!(
            name_of(&Value::function("function (a) { return a; }")),
            "<nameless_function>"
        );
    }

    #[test]
    fn test_foreign_named_by_class() {
        let root = Value::foreign(
            ForeignObject::new("com.acme.aa.emse.dom.ScriptRoot@ba627e1")
                .with_class("com.acme.aa.emse.dom.ScriptRoot"),
        );
        assert_eq!(name_of(&root), "ScriptRoot");

        let text = Value::foreign(ForeignObject::new("PRODUCTION").with_class("java.lang.String"));
        assert_eq!(name_of(&text), "JavaString");

        let map = Value::foreign(ForeignObject::new("{}").with_class("java.util.HashMap"));
        assert_eq!(name_of(&map), "JavaHashMap<unknown, unknown>");

        let anonymous = Value::foreign(ForeignObject::new("thing"));
        assert_eq!(name_of(&anonymous), "");
    }
}
