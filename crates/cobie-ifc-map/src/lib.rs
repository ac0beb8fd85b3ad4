#![deny(unsafe_code)]

//! Property and quantity mapping engine.
//!
//! Given a source attribute value and a target object, the engine
//! resolves where the value belongs in the target schema via a
//! configured name map, converts its unit and numeric representation,
//! and attaches the converted member to a lazily created (or reused)
//! grouping container on the target store.
//!
//! The graph traversal that discovers target objects and feeds values
//! in is a collaborator, not part of this crate.

pub mod config;
pub mod error;
pub mod writer;

pub use config::{PropertyMap, TargetProperty};
pub use error::WriteError;
pub use writer::{DefaultUnits, PropertyWriter, WriteOutcome};
