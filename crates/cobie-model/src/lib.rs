#![deny(unsafe_code)]

pub mod error;
pub mod value;

pub use error::ConversionError;
pub use value::{AttributeValue, ValuePayload};
