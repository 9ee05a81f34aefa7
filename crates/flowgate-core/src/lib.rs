//! Flowgate Core - Shared types, identifiers, and value handling
//!
//! This crate provides the protocol data model, chain parameters, the
//! self-describing value tree returned by script execution, and the
//! conversions every other flowgate crate builds on.

pub mod error;
pub mod failure;
pub mod fixed;
pub mod flatten;
pub mod id;
pub mod quote;
pub mod types;

pub use error::CoreError;
pub use failure::{Description, Failure, FailureKind, FieldValue};
pub use fixed::{format_ufix64, parse_ufix64, to_minor_units, FixedPointError};
pub use flatten::{flatten, Flattened};
pub use id::{Address, Identifier};
pub use types::*;
