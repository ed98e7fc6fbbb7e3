//! Identification records
//!
//! [`Identifier::identify`] classifies, stringifies and names a value and,
//! for containers, builds one [`ChildRecord`] per enumerable member:
//!
//! 1. blacklisted keys are skipped
//! 2. members of values whose name marks them foreign are listed only if
//!    callable (foreign leaf objects are described by their methods)
//! 3. redacted keys get a `<key>` placeholder display
//! 4. each child gets a help line; blank lines and lines describing an
//!    undefined value are dropped, duplicate lines keep the first child
//! 5. children are ordered by key
//!
//! Nested containers are expanded up to `max_depth` levels. A visited set
//! keyed by object identity expands every object at most once, so cyclic
//! graphs terminate.

use rustc_hash::FxHashSet;

use crate::callable::SignatureExtractor;
use crate::config::IdentConfig;
use crate::names::NameCleaner;
use crate::types::{classify, TypeTag};
use crate::value::Value;

/// Help-line fragment produced by undefined members of accessor pairs
const UNDEFINED_LINE: &str = ": unknown;  // undefined";

/// Result of inspecting a value
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationRecord {
    /// Canonical display name
    pub name: String,
    /// Canonical rendering of the value
    pub display: String,
    /// Semantic type
    pub type_tag: TypeTag,
    /// Children, ordered by key; empty unless the value is a container
    pub children: Vec<ChildRecord>,
}

impl IdentificationRecord {
    /// Signature lines of a callable record
    pub fn signature_lines(&self) -> Vec<&str> {
        if self.type_tag == TypeTag::Function && !self.display.is_empty() {
            self.display.lines().collect()
        } else {
            Vec::new()
        }
    }
}

/// One member of an inspected container
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    /// Member name or array index
    pub key: String,
    /// Canonical display name of the member value
    pub name: String,
    /// Canonical rendering of the member value
    pub display: String,
    /// Semantic type of the member value
    pub type_tag: TypeTag,
    /// One formatted line describing the member
    pub help_line: String,
    /// Members of the member value, when expanded (see `max_depth`)
    pub children: Vec<ChildRecord>,
}

/// The introspection engine
#[derive(Debug, Clone)]
pub struct Identifier {
    config: IdentConfig,
    cleaner: NameCleaner,
    signatures: SignatureExtractor,
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new(&IdentConfig::default())
    }
}

impl Identifier {
    /// Create an engine over the given configuration
    pub fn new(config: &IdentConfig) -> Self {
        Self {
            config: config.clone(),
            cleaner: NameCleaner::new(config),
            signatures: SignatureExtractor::new(config),
        }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &IdentConfig {
        &self.config
    }

    /// The qualified-name cleaner
    pub fn cleaner(&self) -> &NameCleaner {
        &self.cleaner
    }

    /// The callable signature extractor
    pub fn signature_extractor(&self) -> &SignatureExtractor {
        &self.signatures
    }

    /// Inspect a value
    pub fn identify(&self, value: &Value) -> IdentificationRecord {
        let type_tag = classify(value);
        let _span = tracing::debug_span!("identify", tag = %type_tag).entered();

        let display = self.display_string(value, &type_tag);
        let name = self.resolve_name(value, &display, &type_tag);
        let mut record = IdentificationRecord {
            name,
            display,
            type_tag,
            children: Vec::new(),
        };

        match value {
            Value::Undefined | Value::Null => {
                record.display.clear();
            }
            _ if record.type_tag.is_container() => {
                if self.config.max_depth > 0 {
                    let mut visited = FxHashSet::default();
                    visited.extend(value.identity());
                    record.children = self.children_of(value, &record.name, 1, &mut visited);
                }
            }
            Value::Function(func) => {
                record.name = self.signatures.function_name(func);
                record.display = self.signatures.signatures(func).join("\n");
            }
            Value::String(_) => {
                record.name = format!("\"{}\"", record.name);
            }
            _ => {}
        }

        record
    }

    fn children_of(
        &self,
        parent: &Value,
        parent_name: &str,
        depth: usize,
        visited: &mut FxHashSet<usize>,
    ) -> Vec<ChildRecord> {
        let callables_only = self.config.callables_only_for_foreign
            && parent_name.starts_with(&self.config.foreign_prefix);

        let mut children: Vec<ChildRecord> = Vec::new();
        let mut seen_lines = FxHashSet::default();

        for (key, child) in parent.members() {
            if self.config.is_ignored_key(&key) {
                tracing::debug!(key = %key, "skipping blacklisted member");
                continue;
            }

            let type_tag = classify(&child);
            if callables_only && type_tag != TypeTag::Function {
                continue;
            }

            let mut display = self.display_string(&child, &type_tag);
            let name = self.resolve_name(&child, &display, &type_tag);
            if self.config.is_redacted_key(&key) {
                display = format!("<{}>", key);
            }

            let help_line = self.help_line(&key, &name, &display, &type_tag);
            if help_line.replacen('.', "", 1).trim().is_empty() || help_line.contains(UNDEFINED_LINE)
            {
                tracing::trace!(key = %key, "dropping member without a description");
                continue;
            }
            if !seen_lines.insert(help_line.clone()) {
                tracing::trace!(key = %key, "dropping duplicate member description");
                continue;
            }

            let mut grandchildren = Vec::new();
            if depth < self.config.max_depth && type_tag.is_container() {
                match child.identity() {
                    Some(id) if !visited.insert(id) => {
                        tracing::debug!(key = %key, "member already expanded, not descending");
                    }
                    _ => {
                        grandchildren = self.children_of(&child, &name, depth + 1, visited);
                    }
                }
            }

            children.push(ChildRecord {
                key,
                name,
                display,
                type_tag,
                help_line,
                children: grandchildren,
            });
        }

        children.sort_by(|a, b| a.key.cmp(&b.key));
        children
    }

    /// Format the help line of one member
    pub fn help_line(&self, key: &str, name: &str, display: &str, tag: &TypeTag) -> String {
        let shown = if *tag == TypeTag::String || self.is_foreign_string(name) {
            format!("\"{}\"", display)
        } else {
            display.to_string()
        };

        if tag.is_foreign_object() {
            let mut line = format!(".{}: {};", key, name);
            if !name.contains(&self.config.self_describing_marker) {
                line.push_str("  // ");
                line.push_str(&shown);
            }
            return line;
        }

        match tag {
            TypeTag::Function if display.starts_with('(') => {
                format!(".{}: {}{}", key, name, display)
            }
            TypeTag::Function => {
                format!(".{}", display.split('\n').collect::<Vec<_>>().join("\n+ ."))
            }
            _ if is_numeric_key(key) => format!("[{}]: {};  // {}", key, tag, shown),
            _ => {
                let tag = if tag.is_nullish() {
                    "unknown".to_string()
                } else {
                    tag.to_string()
                };
                format!(".{}: {};  // {}", key, tag, shown)
            }
        }
    }

    /// Check if a cleaned foreign name maps to the native string type
    fn is_foreign_string(&self, name: &str) -> bool {
        self.config
            .type_map
            .get(name)
            .is_some_and(|native| native == "string")
    }
}

/// Check if a member key reads as a number (array indices and the like)
fn is_numeric_key(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return false;
    }
    if let Some(hex) = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if matches!(key, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }
    key.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && key.parse::<f64>().is_ok()
}
