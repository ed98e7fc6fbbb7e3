//! Qualified-name cleanup
//!
//! Turns foreign qualified names and call-site fragments into short display
//! tokens:
//!
//! ```text
//! com.acme.dom.ScriptRoot@ba627e1  ->  ScriptRoot
//! java.lang.String                 ->  JavaString   (string with native mapping)
//! java.util.HashMap                ->  JavaHashMap<unknown, unknown>
//! ```
//!
//! Every step passes unmatched input through unchanged, and cleaning a
//! cleaned token again yields the same token.

use indexmap::IndexMap;

use crate::config::IdentConfig;

/// Placeholder for type arguments that cannot be recovered
pub const UNKNOWN: &str = "unknown";

/// Cleans qualified names according to an [`IdentConfig`]
#[derive(Debug, Clone)]
pub struct NameCleaner {
    package_root: String,
    foreign_prefix: String,
    list_containers: Vec<String>,
    map_containers: Vec<String>,
    type_map: IndexMap<String, String>,
}

impl NameCleaner {
    /// Build a cleaner from the configured tables
    pub fn new(config: &IdentConfig) -> Self {
        Self {
            package_root: format!("{}.", config.package_root),
            foreign_prefix: config.foreign_prefix.clone(),
            list_containers: config.list_containers.clone(),
            map_containers: config.map_containers.clone(),
            type_map: config.type_map.clone(),
        }
    }

    /// Clean a token, keeping foreign type names
    pub fn clean(&self, text: &str) -> String {
        self.clean_impl(text, false)
    }

    /// Clean a token and map foreign type names to native ones
    pub fn clean_native(&self, text: &str) -> String {
        self.clean_impl(text, true)
    }

    fn clean_impl(&self, text: &str, native: bool) -> String {
        let collapsed = self.collapse_package(text);

        let simple = collapsed.rsplit('.').next().unwrap_or_default();
        let simple = simple.split('@').next().unwrap_or_default();

        let mut token = self.annotate_container(simple);
        if native {
            token = self.to_native(&token);
        }
        token
    }

    /// Replace every `<root>.<segment>.` with the foreign prefix.
    fn collapse_package(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find(&self.package_root) {
            let after = &rest[pos + self.package_root.len()..];
            let segment_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if segment_len > 0 && after[segment_len..].starts_with('.') {
                out.push_str(&rest[..pos]);
                out.push_str(&self.foreign_prefix);
                rest = &after[segment_len + 1..];
            } else {
                let skip = pos + self.package_root.len();
                out.push_str(&rest[..skip]);
                rest = &rest[skip..];
            }
        }
        out.push_str(rest);
        out
    }

    fn annotate_container(&self, token: &str) -> String {
        if token.contains('<') {
            return token.to_string();
        }
        if self.list_containers.iter().any(|c| c == token) {
            return format!("{}<{}>", token, UNKNOWN);
        }
        if self.map_containers.iter().any(|c| matches_name(c, token)) {
            return format!("{}<{}, {}>", token, UNKNOWN, UNKNOWN);
        }
        token.to_string()
    }

    fn to_native(&self, token: &str) -> String {
        if let Some(mapped) = self.type_map.get(token) {
            return mapped.clone();
        }
        if let Some(element) = token.strip_suffix("[]") {
            return format!("{}[]", self.to_native(element));
        }
        token.to_string()
    }
}

/// Match a configured name; a trailing `*` matches by prefix
fn matches_name(pattern: &str, token: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => token.starts_with(prefix),
        None => pattern == token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> NameCleaner {
        NameCleaner::new(&IdentConfig::default())
    }

    #[test]
    fn test_strips_package_and_identity() {
        let c = cleaner();
        assert_eq!(c.clean("a.b.C@deadbeef"), "C");
        assert_eq!(c.clean("com.acme.aa.emse.dom.ScriptRoot@ba627e1"), "ScriptRoot");
        assert_eq!(c.clean("org.mozilla.javascript.Context"), "Context");
    }

    #[test]
    fn test_base_library_prefix() {
        let c = cleaner();
        assert_eq!(c.clean("java.lang.String"), "JavaString");
        assert_eq!(c.clean("java.util.Date@12ab"), "JavaDate");
        assert_eq!(c.clean("arg0: JavaString"), "arg0: JavaString");
    }

    #[test]
    fn test_native_mapping() {
        let c = cleaner();
        assert_eq!(c.clean_native("java.lang.String"), "string");
        assert_eq!(c.clean_native("java.lang.Boolean"), "boolean");
        assert_eq!(c.clean_native("java.lang.Integer"), "number");
        assert_eq!(c.clean_native("java.lang.Long"), "number");
        assert_eq!(c.clean_native("java.lang.Double"), "number");
        assert_eq!(c.clean_native("java.lang.Object"), "object");
        assert_eq!(c.clean_native("java.lang.String[]"), "string[]");
        assert_eq!(c.clean_native("com.acme.CapIDModel"), "CapIDModel");
        assert_eq!(c.clean_native("int"), "int");
    }

    #[test]
    fn test_container_annotations() {
        let c = cleaner();
        assert_eq!(c.clean("java.util.List"), "JavaList<unknown>");
        assert_eq!(c.clean("java.util.Collection"), "JavaCollection<unknown>");
        assert_eq!(c.clean("java.util.HashMap"), "JavaHashMap<unknown, unknown>");
        assert_eq!(c.clean("java.util.Hashtable@1"), "JavaHashtable<unknown, unknown>");
        assert_eq!(c.clean("java.util.Map"), "JavaMap<unknown, unknown>");
        assert_eq!(c.clean("java.util.ArrayList"), "JavaArrayList");
    }

    #[test]
    fn test_idempotent() {
        let c = cleaner();
        for raw in [
            "java.lang.String",
            "a.b.C@deadbeef",
            "java.util.HashMap",
            "java.util.List",
            "java.lang.Long[]",
            "plain",
        ] {
            let once = c.clean(raw);
            assert_eq!(c.clean(&once), once, "clean({:?})", raw);
            let once = c.clean_native(raw);
            assert_eq!(c.clean_native(&once), once, "clean_native({:?})", raw);
        }
    }

    #[test]
    fn test_package_root_needs_segment() {
        let c = cleaner();
        assert_eq!(c.clean("java."), "");
        assert_eq!(c.clean("myjava.x"), "x");
        assert_eq!(c.clean("(java.lang.String,int)"), "(JavaString,int)");
    }

    #[test]
    fn test_passthrough() {
        let c = cleaner();
        assert_eq!(c.clean(""), "");
        assert_eq!(c.clean("hello world"), "hello world");
        assert_eq!(c.clean("<nameless_function>"), "<nameless_function>");
    }

    #[test]
    fn test_matches_name() {
        assert!(matches_name("JavaHash*", "JavaHashSet"));
        assert!(matches_name("JavaMap", "JavaMap"));
        assert!(!matches_name("JavaMap", "JavaMapEntry"));
    }
}
