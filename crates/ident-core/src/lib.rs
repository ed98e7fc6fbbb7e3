//! Ident - value introspection and signature recovery
//!
//! Given any value of a dynamic scripting host, including objects bridged
//! from a foreign runtime, ident produces an [`IdentificationRecord`]: a
//! short canonical name, a display string, a semantic [`TypeTag`] and, for
//! containers, one help line per member. Callable signatures are recovered
//! from the callable's textual form, whether it is native source or a
//! bridged callable's overload listing.
//!
//! ```ignore
//! use ident_core::{Identifier, IdentConfig, Value};
//!
//! let person = Value::object(vec![("first", Value::from("Garin"))]);
//! let record = Identifier::new(&IdentConfig::default()).identify(&person);
//! assert_eq!(record.children[0].help_line, r#".first: string;  // "Garin""#);
//! ```

#![warn(missing_docs)]

pub mod callable;
pub mod config;
mod display;
pub mod error;
pub mod identify;
pub mod names;
mod resolve;
pub mod types;
pub mod value;

pub use callable::{
    CallableDescriptor, CallableOrigin, Overload, Param, ParamList, SignatureExtractor,
    SignatureSource,
};
pub use config::IdentConfig;
pub use display::stringify;
pub use error::{IdentError, IdentResult};
pub use identify::{ChildRecord, IdentificationRecord, Identifier};
pub use names::NameCleaner;
pub use types::{classify, ElementType, ForeignTag, TypeTag};
pub use value::{ForeignObject, Function, Value};

/// Inspect a value with the default configuration
pub fn identify(value: &Value) -> IdentificationRecord {
    Identifier::default().identify(value)
}
