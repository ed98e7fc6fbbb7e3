//! Command-line front end for ident
//!
//! Loads a JSON fixture describing a value, identifies it and prints the
//! help report.

#![warn(missing_docs)]

pub mod commands;
pub mod fixture;
pub mod output;
pub mod report;

pub use fixture::FixtureError;
pub use report::{HelpReport, ReportOptions};
