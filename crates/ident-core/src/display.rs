//! Display strings
//!
//! Renders a value and its type tag as the canonical display string:
//!
//! - nullish values and empty string forms are returned as-is
//! - blacklisted string forms are returned raw, before anything else
//!   touches the value
//! - plain objects, and foreign objects flattened to string members, are
//!   serialized as compact JSON with a space after every separating comma
//! - callables render as their newline-joined signatures
//!
//! Everything else is the host's string form. All results go through the
//! qualified-name cleaner.

use std::io;

use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};

use crate::identify::Identifier;
use crate::types::TypeTag;
use crate::value::{number_to_string, Members, Value};

impl Identifier {
    /// Canonical display string of a value
    pub fn display_string(&self, value: &Value, tag: &TypeTag) -> String {
        let raw = value.to_js_string();
        if tag.is_nullish() || raw.is_empty() {
            return raw;
        }

        if self.config().is_ignored_value(&self.cleaner().clean(&raw)) {
            tracing::debug!(value = %raw, "passing blacklisted value through");
            return raw;
        }

        let text = match value {
            Value::Object(_) => stringify(value).unwrap_or(raw),
            Value::Foreign(obj) if tag.is_foreign_object() => {
                let flattened = obj
                    .members
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::String(v.to_js_string())))
                    .collect::<Map<_, _>>();
                to_spaced_json(&JsonValue::Object(flattened)).unwrap_or(raw)
            }
            Value::Function(func) => self.signature_extractor().signatures(func).join("\n"),
            _ => raw,
        };

        self.cleaner().clean(&text)
    }
}

/// Compact JSON of a value, or `None` if it cannot be serialized
pub fn stringify(value: &Value) -> Option<String> {
    let mut stack = Vec::new();
    match to_json(value, &mut stack) {
        Ok(Some(json)) => to_spaced_json(&json),
        Ok(None) => None,
        Err(Cyclic) => {
            tracing::debug!("cyclic object value, falling back to string form");
            None
        }
    }
}

/// Marker for a value that references itself
struct Cyclic;

/// Convert to JSON the way the host serializes.
///
/// `Ok(None)` marks values the host omits from objects (undefined and
/// callables); inside arrays they become `null`.
fn to_json(value: &Value, stack: &mut Vec<usize>) -> Result<Option<JsonValue>, Cyclic> {
    let json = match value {
        Value::Undefined | Value::Function(_) => return Ok(None),
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Foreign(obj) => JsonValue::String(obj.text.clone()),
        Value::Array(arr) => {
            let id = enter(value, stack)?;
            let mut items = Vec::new();
            for item in arr.borrow().iter() {
                items.push(to_json(item, stack)?.unwrap_or(JsonValue::Null));
            }
            leave(id, stack);
            JsonValue::Array(items)
        }
        Value::Object(obj) => {
            let id = enter(value, stack)?;
            let members = obj.borrow();
            let mut map = Map::new();
            for (key, member) in host_key_order(&members) {
                if let Some(json) = to_json(member, stack)? {
                    map.insert(key.clone(), json);
                }
            }
            leave(id, stack);
            JsonValue::Object(map)
        }
    };
    Ok(Some(json))
}

fn enter(value: &Value, stack: &mut Vec<usize>) -> Result<Option<usize>, Cyclic> {
    let id = value.identity();
    if let Some(id) = id {
        if stack.contains(&id) {
            return Err(Cyclic);
        }
        stack.push(id);
    }
    Ok(id)
}

fn leave(id: Option<usize>, stack: &mut Vec<usize>) {
    if id.is_some() {
        stack.pop();
    }
}

/// Non-finite numbers become `null`; finite ones are written by
/// [`SpacedFormatter::write_f64`].
fn number_to_json(n: f64) -> JsonValue {
    Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

/// Members in the host's own-key order: array-index keys ascending, then
/// the rest in insertion order
fn host_key_order(members: &Members) -> Vec<(&String, &Value)> {
    let mut indexed = Vec::new();
    let mut named = Vec::new();
    for (key, member) in members.iter() {
        match array_index(key) {
            Some(index) => indexed.push((index, key, member)),
            None => named.push((key, member)),
        }
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, member)| (key, member))
        .chain(named)
        .collect()
}

/// Canonical array index: decimal digits without leading zeros, below 2^32 - 1
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&index| index != u32::MAX)
}

/// Compact formatting with `", "` between members and elements and host
/// number text
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(number_to_string(value).as_bytes())
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

fn to_spaced_json(json: &JsonValue) -> Option<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    json.serialize(&mut serializer).ok()?;
    String::from_utf8(buf).ok()
}
