//! Comment forms - schema-driven structured comments for patient booking
//!
//! Event types in the booking API may declare a comment form at runtime.
//! This crate parses those schemas, derives a typed form model per distinct
//! schema, and casts, validates and serializes patient submissions into the
//! structured comment the booking API expects.

pub mod booking;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod source;

pub use error::SchemaError;
