//! Callable descriptors recovered from a callable's textual form
//!
//! Two kinds of callables are understood:
//!
//! - **Foreign** callables, bridged from the host, whose string form embeds
//!   a documentation block listing one overload per line:
//!
//!   ```text
//!   function adjustTask() {/*
//!   com.acme.ScriptResult adjustTask(com.acme.CapIDModel,int,java.lang.String)
//!   com.acme.ScriptResult adjustTask(com.acme.CapIDModel,int)
//!   */}
//!   ```
//!
//! - **Native** callables, whose string form is their own source. Only the
//!   header is read; the parameter list is kept verbatim since native
//!   parameters carry no types.
//!
//! Both are [`SignatureSource`] implementations producing [`Overload`]s for
//! a [`CallableDescriptor`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::IdentConfig;
use crate::names::{NameCleaner, UNKNOWN};
use crate::value::Function;

/// `function name(` / `function (` header at the start of a native source
static FUNCTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:async\s+)?function\b\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(").unwrap()
});

/// Opening of the documentation block of a foreign callable
const FOREIGN_BLOCK_START: &str = "() {/*";

/// Closing of the documentation block of a foreign callable
const FOREIGN_BLOCK_END: &str = "*/}";

/// A typed positional parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Positional name (`arg0`, `arg1`, …)
    pub name: String,
    /// Cleaned, native-mapped type name
    pub ty: String,
}

/// Parameters of one overload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamList {
    /// Positional parameters with recovered types
    Typed(Vec<Param>),
    /// Parameter list text as written in native source
    Raw(String),
}

/// One call signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    /// Parameters
    pub params: ParamList,
    /// Return type, if recoverable
    pub return_type: Option<String>,
}

impl Overload {
    /// Render as `name(params): ReturnType;`
    pub fn render(&self, name: &str) -> String {
        let params = match &self.params {
            ParamList::Typed(params) => params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", "),
            ParamList::Raw(raw) => raw.clone(),
        };
        let return_type = self.return_type.as_deref().unwrap_or(UNKNOWN);
        format!("{}({}): {};", name, params, return_type)
    }
}

/// Where a callable comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableOrigin {
    /// Defined in the native runtime
    Native,
    /// Bridged from the foreign host
    Foreign,
}

/// Name and overloads of a callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDescriptor {
    /// Declared name, `None` for nameless callables
    pub name: Option<String>,
    /// Native or foreign
    pub origin: CallableOrigin,
    /// Recovered overloads, in declaration order
    pub overloads: Vec<Overload>,
}

impl CallableDescriptor {
    /// Rendered signature lines, sorted ascending.
    ///
    /// Nameless callables render without a name (`(a, b): unknown;`).
    pub fn signatures(&self) -> Vec<String> {
        let name = self.name.as_deref().unwrap_or_default();
        let mut signatures = self
            .overloads
            .iter()
            .map(|o| o.render(name))
            .collect::<Vec<_>>();
        signatures.sort();
        signatures
    }
}

/// A parser for one textual shape of callables
pub trait SignatureSource {
    /// Check if the textual form has this source's shape
    fn accepts(&self, source: &str) -> bool;

    /// Parse the overloads out of the textual form
    fn overloads(&self, source: &str) -> Vec<Overload>;
}

/// Overloads listed in a foreign callable's documentation block
#[derive(Debug, Clone)]
pub struct ForeignSignatures {
    cleaner: NameCleaner,
    numeric_primitives: Vec<String>,
    wrapper_results: Vec<String>,
}

impl ForeignSignatures {
    /// Create a parser using the configured name tables
    pub fn new(config: &IdentConfig) -> Self {
        Self {
            cleaner: NameCleaner::new(config),
            numeric_primitives: config.numeric_primitives.clone(),
            wrapper_results: config.wrapper_results.clone(),
        }
    }

    fn parse_line(&self, line: &str) -> Option<Overload> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let caller_at = tokens.iter().position(|t| t.contains('('))?;
        if caller_at == 0 {
            return None;
        }
        let raw_return = tokens[caller_at - 1];
        let caller = tokens[caller_at];

        let open = caller.find('(')?;
        let close = caller.rfind(')').filter(|&close| close > open)?;
        let params = caller[open + 1..close]
            .split(',')
            .enumerate()
            .filter(|(_, raw)| !raw.trim().is_empty())
            .map(|(i, raw)| Param {
                name: format!("arg{}", i),
                ty: self.rename_primitives(&self.cleaner.clean_native(raw.trim())),
            })
            .collect();

        let mut return_type = self.cleaner.clean(raw_return);
        if self.wrapper_results.iter().any(|w| *w == return_type) {
            // The wrapped result type is only known at run time.
            return_type = format!("{}<{}>", return_type, UNKNOWN);
        }

        Some(Overload {
            params: ParamList::Typed(params),
            return_type: Some(self.rename_primitives(&return_type)),
        })
    }

    /// Replace whole-word host numeric primitives with `number`
    fn rename_primitives(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();
        for ch in text.chars() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                continue;
            }
            self.flush_word(&mut word, &mut out);
            out.push(ch);
        }
        self.flush_word(&mut word, &mut out);
        out
    }

    fn flush_word(&self, word: &mut String, out: &mut String) {
        if self.numeric_primitives.iter().any(|p| p.as_str() == word.as_str()) {
            out.push_str("number");
        } else {
            out.push_str(word);
        }
        word.clear();
    }
}

impl SignatureSource for ForeignSignatures {
    fn accepts(&self, source: &str) -> bool {
        source.contains(FOREIGN_BLOCK_START) && source.trim_end().ends_with(FOREIGN_BLOCK_END)
    }

    fn overloads(&self, source: &str) -> Vec<Overload> {
        let start = match source.find(FOREIGN_BLOCK_START) {
            Some(pos) => pos + FOREIGN_BLOCK_START.len(),
            None => return Vec::new(),
        };
        let end = match source.rfind(FOREIGN_BLOCK_END) {
            Some(pos) if pos >= start => pos,
            _ => return Vec::new(),
        };

        source[start..end]
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let overload = self.parse_line(line);
                if overload.is_none() {
                    tracing::debug!(line, "skipping malformed foreign overload");
                }
                overload
            })
            .collect()
    }
}

/// The single signature in a native callable's header
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSignatures;

impl SignatureSource for NativeSignatures {
    fn accepts(&self, source: &str) -> bool {
        FUNCTION_HEADER.is_match(source)
    }

    fn overloads(&self, source: &str) -> Vec<Overload> {
        let header = match FUNCTION_HEADER.find(source) {
            Some(m) => m,
            None => return Vec::new(),
        };
        match balanced_params(&source[header.end()..]) {
            Some(raw) => vec![Overload {
                params: ParamList::Raw(raw.to_string()),
                return_type: None,
            }],
            None => {
                tracing::debug!("unbalanced parameter list in native callable");
                Vec::new()
            }
        }
    }
}

/// Text up to the parenthesis closing an already-opened parameter list
fn balanced_params(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Recovers names and signatures of callables
#[derive(Debug, Clone)]
pub struct SignatureExtractor {
    foreign: ForeignSignatures,
    native: NativeSignatures,
    nameless_function_name: String,
}

impl SignatureExtractor {
    /// Create an extractor from the configured tables
    pub fn new(config: &IdentConfig) -> Self {
        Self {
            foreign: ForeignSignatures::new(config),
            native: NativeSignatures,
            nameless_function_name: config.nameless_function_name.clone(),
        }
    }

    /// Declared name from the callable's header, if any
    pub fn declared_name(source: &str) -> Option<String> {
        FUNCTION_HEADER
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Name of a callable, or the configured nameless-function token
    pub fn function_name(&self, func: &Function) -> String {
        Self::declared_name(&func.source).unwrap_or_else(|| self.nameless_function_name.clone())
    }

    /// Parse a callable into a descriptor
    pub fn describe(&self, func: &Function) -> CallableDescriptor {
        let source = func.source.as_str();
        let (origin, overloads) = if self.foreign.accepts(source) {
            (CallableOrigin::Foreign, self.foreign.overloads(source))
        } else {
            (CallableOrigin::Native, self.native.overloads(source))
        };
        CallableDescriptor {
            name: Self::declared_name(source),
            origin,
            overloads,
        }
    }

    /// Sorted signature lines of a callable
    pub fn signatures(&self, func: &Function) -> Vec<String> {
        self.describe(func).signatures()
    }
}
