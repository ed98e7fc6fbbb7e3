//! JSON fixtures
//!
//! A fixture is a JSON document describing the value to inspect. Plain JSON
//! maps onto native values; three single-key directives cover what JSON
//! cannot express:
//!
//! ```json
//! {"$undefined": true}
//! {"$function": "function add(a, b){return a+b;}"}
//! {"$foreign": {"tag": "JavaObject", "class": "java.lang.String",
//!               "text": "PRODUCTION", "members": {}}}
//! ```
//!
//! `tag` defaults to `JavaObject`. `text` defaults to the class name.

use std::path::{Path, PathBuf};

use ident_core::{ForeignObject, Value};
use serde_json::{Map, Value as JsonValue};

const UNDEFINED: &str = "$undefined";
const FUNCTION: &str = "$function";
const FOREIGN: &str = "$foreign";

/// Fixture loading errors
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Fixture file could not be read
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fixture is not valid JSON
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A directive has the wrong shape
    #[error("Malformed `{directive}` at {at}: {reason}")]
    Malformed {
        /// Directive key
        directive: &'static str,
        /// JSON path of the directive
        at: String,
        /// What was wrong
        reason: String,
    },
}

/// Read and decode a fixture file
pub fn load(path: &Path) -> Result<Value, FixtureError> {
    let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse(&text)?;
    tracing::debug!(path = %path.display(), "loaded fixture");
    Ok(value)
}

/// Decode a fixture document
pub fn parse(text: &str) -> Result<Value, FixtureError> {
    let json: JsonValue = serde_json::from_str(text)?;
    from_json(&json, "$")
}

fn from_json(json: &JsonValue, at: &str) -> Result<Value, FixtureError> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                values.push(from_json(item, &format!("{}[{}]", at, i))?);
            }
            Value::array(values)
        }
        JsonValue::Object(map) => match directive(map) {
            Some((UNDEFINED, _)) => Value::Undefined,
            Some((FUNCTION, payload)) => match payload {
                JsonValue::String(source) => Value::function(source.clone()),
                other => return Err(malformed(FUNCTION, at, "expected source text", other)),
            },
            Some((_, payload)) => foreign_from_json(payload, at)?,
            None => Value::object(members_from_json(map, at)?),
        },
    })
}

/// The directive an object spells, if it is a single reserved key
fn directive(map: &Map<String, JsonValue>) -> Option<(&'static str, &JsonValue)> {
    if map.len() != 1 {
        return None;
    }
    let (key, payload) = map.iter().next()?;
    [UNDEFINED, FUNCTION, FOREIGN]
        .into_iter()
        .find(|d| *d == key.as_str())
        .map(|d| (d, payload))
}

fn foreign_from_json(payload: &JsonValue, at: &str) -> Result<Value, FixtureError> {
    let fields = match payload {
        JsonValue::Object(fields) => fields,
        other => return Err(malformed(FOREIGN, at, "expected an object", other)),
    };

    let field = |name: &str| -> Result<Option<String>, FixtureError> {
        match fields.get(name) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(malformed(
                FOREIGN,
                at,
                &format!("`{}` must be a string", name),
                other,
            )),
        }
    };

    let class = field("class")?;
    let text = field("text")?.or_else(|| class.clone()).unwrap_or_default();
    let mut object = ForeignObject::new(text);
    if let Some(tag) = field("tag")? {
        object = object.with_tag(tag);
    }
    if let Some(class) = class {
        object = object.with_class(class);
    }

    match fields.get("members") {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::Object(members)) => {
            for (key, member) in members_from_json(members, &format!("{}.members", at))? {
                object = object.with_member(key, member);
            }
        }
        Some(other) => {
            return Err(malformed(FOREIGN, at, "`members` must be an object", other));
        }
    }

    Ok(Value::foreign(object))
}

fn members_from_json(
    map: &Map<String, JsonValue>,
    at: &str,
) -> Result<Vec<(String, Value)>, FixtureError> {
    map.iter()
        .map(|(key, json)| Ok((key.clone(), from_json(json, &format!("{}.{}", at, key))?)))
        .collect()
}

fn malformed(directive: &'static str, at: &str, reason: &str, found: &JsonValue) -> FixtureError {
    FixtureError::Malformed {
        directive,
        at: at.to_string(),
        reason: format!("{}, found {}", reason, found),
    }
}
