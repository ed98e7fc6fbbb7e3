//! Engine configuration
//!
//! All tables the engine consults (blacklists, container names, the foreign
//! to native type-name map, …) live in [`IdentConfig`]. A config is built
//! once, handed to [`crate::Identifier::new`] and never mutated afterwards.
//!
//! Defaults reproduce the tables of the scripting host the engine was
//! written for. Any field can be overridden from TOML; missing fields keep
//! their defaults:
//!
//! ```toml
//! ignore_keys = ["XAResource", "connection"]
//! max_depth = 2
//!
//! [type_map]
//! JavaString = "string"
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{IdentError, IdentResult};

/// Immutable configuration consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentConfig {
    /// Member keys that are never visited (their access fails in the bridge)
    pub ignore_keys: Vec<String>,

    /// Cleaned string forms that are passed through unexamined
    pub ignore_values: Vec<String>,

    /// Member names common to every foreign base object; callers may hide these
    pub common_members: Vec<String>,

    /// Name given to callables without a name
    pub nameless_function_name: String,

    /// Lower-case root package of the host's base library (`java` in `java.lang.String`)
    pub package_root: String,

    /// Synonym token replacing `<package_root>.<segment>.` (`java.lang.String` -> `JavaString`)
    pub foreign_prefix: String,

    /// Cleaned container names annotated with one `unknown` type argument
    pub list_containers: Vec<String>,

    /// Cleaned keyed-container names annotated with two `unknown` type
    /// arguments; a trailing `*` matches by prefix
    pub map_containers: Vec<String>,

    /// Foreign type name -> native type name
    pub type_map: IndexMap<String, String>,

    /// Host primitive numeric type names rewritten to `number` in signatures
    pub numeric_primitives: Vec<String>,

    /// Return types whose inner result type cannot be recovered from text
    pub wrapper_results: Vec<String>,

    /// Foreign names containing this marker are considered self-describing
    pub self_describing_marker: String,

    /// Keys whose value is replaced with a `<key>` placeholder
    pub redacted_keys: Vec<String>,

    /// How many container levels get children (1 = direct children only)
    pub max_depth: usize,

    /// List only callable members of values whose name marks them foreign
    pub callables_only_for_foreign: bool,
}

impl Default for IdentConfig {
    fn default() -> Self {
        Self {
            ignore_keys: strings(&["XAResource"]),
            ignore_values: strings(&["WrappedConnectionJDK7"]),
            common_members: strings(DEFAULT_COMMON_MEMBERS),
            nameless_function_name: "<nameless_function>".to_string(),
            package_root: "java".to_string(),
            foreign_prefix: "Java".to_string(),
            list_containers: strings(&["JavaArray", "JavaCollection", "JavaList"]),
            map_containers: strings(&["JavaHash*", "JavaMap"]),
            type_map: [
                ("JavaObject", "object"),
                ("JavaString", "string"),
                ("JavaBoolean", "boolean"),
                ("JavaInteger", "number"),
                ("JavaDouble", "number"),
                ("JavaLong", "number"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
            numeric_primitives: strings(&["int", "double", "long"]),
            wrapper_results: strings(&["ScriptResult"]),
            self_describing_marker: "Script".to_string(),
            redacted_keys: strings(&["debugOutput"]),
            max_depth: 1,
            callables_only_for_foreign: true,
        }
    }
}

impl IdentConfig {
    /// Parse a TOML document, filling unspecified fields with defaults
    pub fn from_toml_str(source: &str) -> IdentResult<Self> {
        let config: IdentConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: impl AsRef<Path>) -> IdentResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| IdentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded ident config");
        Ok(config)
    }

    /// Render the config as TOML
    pub fn to_toml_string(&self) -> IdentResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the values the engine compiles into patterns
    pub fn validate(&self) -> IdentResult<()> {
        if self.package_root.is_empty()
            || !self
                .package_root
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(IdentError::InvalidValue {
                field: "package_root",
                reason: format!("expected a package identifier, got {:?}", self.package_root),
            });
        }
        if self.foreign_prefix.is_empty() {
            return Err(IdentError::InvalidValue {
                field: "foreign_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.nameless_function_name.trim().is_empty() {
            return Err(IdentError::InvalidValue {
                field: "nameless_function_name",
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Check if a member key is blacklisted
    pub fn is_ignored_key(&self, key: &str) -> bool {
        self.ignore_keys.iter().any(|k| k == key)
    }

    /// Check if a cleaned string form is blacklisted
    pub fn is_ignored_value(&self, cleaned: &str) -> bool {
        self.ignore_values.iter().any(|v| v == cleaned)
    }

    /// Check if a member key is common to every foreign base object
    pub fn is_common_member(&self, key: &str) -> bool {
        self.common_members.iter().any(|m| m == key)
    }

    /// Check if a member key is redacted
    pub fn is_redacted_key(&self, key: &str) -> bool {
        self.redacted_keys.iter().any(|k| k == key)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const DEFAULT_COMMON_MEMBERS: &[&str] = &[
    // java.lang.Object
    "class",
    "equals",
    "getClass",
    "hashCode",
    "notify",
    "notifyAll",
    "toString",
    "wait",
    // java.lang.String
    "at",
    "chars",
    "codePointBefore",
    "codePointCount",
    "codePoints",
    "compareTo",
    "compareToIgnoreCase",
    "contains",
    "contentEquals",
    "equalsIgnoreCase",
    "getBytes",
    "getChars",
    "intern",
    "isEmpty",
    "offsetByCodePoints",
    "padEnd",
    "padStart",
    "regionMatches",
    "repeat",
    "replaceAll",
    "subSequence",
    "toCharArray",
    "trimEnd",
    "trimStart",
    // script objects
    "initScript",
    // model base objects
    "auditDate",
    "auditID",
    "auditStatus",
    "clone",
    "dispStringValue",
    "dispValue",
    "enableI18N",
    "enbaleI18N",
    "fillI18NStatus",
    "fillLanguageModel",
    "getAuditDate",
    "getAuditID",
    "getAuditStatus",
    "getDispStringValue",
    "getDispValue",
    "getOriginalValue",
    "getProcessCode",
    "getResColumns",
    "getResId",
    "getResLangId",
    "getResObject",
    "getResStringValue",
    "getResValue",
    "hasResource",
    "isEnableI18N",
    "isEnbaleI18N",
    "originalValue",
    "processCode",
    "resColumns",
    "resId",
    "resLangId",
    "resObject",
    "resStringValue",
    "resValue",
    "setAuditDate",
    "setAuditID",
    "setAuditStatus",
    "setDispValue",
    "setOriginalValue",
    "setProcessCode",
    "setResId",
    "setResLangId",
    "setResValue",
];
