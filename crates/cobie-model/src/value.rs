//! Tagged attribute values carried by COBie source rows.
//!
//! Every named value in the exchange file is one of a closed set of
//! payload variants. Decimal and boolean elements can be present in the
//! file without carrying a value, so those variants wrap an `Option`;
//! an absent payload must never be read as its zero default.

use serde::{Deserialize, Serialize};

use crate::ConversionError;

/// The closed set of payload variants a COBie attribute can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValuePayload {
    /// Decimal payload; `None` when the element is present but unset.
    Decimal(Option<f64>),
    /// Free-text payload.
    Text(String),
    /// Integer payload.
    Integer(i64),
    /// Boolean payload; `None` when the element is present but unset.
    Boolean(Option<bool>),
}

impl ValuePayload {
    /// Coerces the payload to a floating-point number.
    ///
    /// Text payloads are parsed; a non-numeric string is a
    /// [`ConversionError`]. Booleans coerce to 1.0/0.0. An unset
    /// decimal or boolean yields the numeric default of 0.0 — callers
    /// that require a guaranteed value must check
    /// [`AttributeValue::is_specified`] first.
    pub fn to_f64(&self) -> Result<f64, ConversionError> {
        match self {
            Self::Decimal(Some(value)) => Ok(*value),
            Self::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| ConversionError::NotNumeric { text: text.clone() })
            }
            Self::Integer(value) => Ok(*value as f64),
            Self::Boolean(Some(value)) => Ok(if *value { 1.0 } else { 0.0 }),
            Self::Decimal(None) | Self::Boolean(None) => Ok(0.0),
        }
    }

    /// Coerces the payload to an integer. Decimals are rounded.
    pub fn to_i64(&self) -> Result<i64, ConversionError> {
        match self {
            Self::Decimal(Some(value)) => Ok(value.round() as i64),
            Self::Text(text) => {
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| ConversionError::NotNumeric { text: text.clone() })
            }
            Self::Integer(value) => Ok(*value),
            Self::Boolean(Some(value)) => Ok(i64::from(*value)),
            Self::Decimal(None) | Self::Boolean(None) => Ok(0),
        }
    }

    /// Coerces the payload to text. Never fails; an unset decimal or
    /// boolean yields the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Decimal(Some(value)) => value.to_string(),
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Boolean(Some(value)) => value.to_string(),
            Self::Decimal(None) | Self::Boolean(None) => String::new(),
        }
    }

    /// Coerces the payload to a boolean. Numbers are true when
    /// non-zero; text must spell `true` or `false`.
    pub fn to_bool(&self) -> Result<bool, ConversionError> {
        match self {
            Self::Decimal(Some(value)) => Ok(*value != 0.0),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ConversionError::NotBoolean { text: text.clone() }),
            },
            Self::Integer(value) => Ok(*value != 0),
            Self::Boolean(Some(value)) => Ok(*value),
            Self::Decimal(None) | Self::Boolean(None) => Ok(false),
        }
    }
}

/// A named source value: one payload plus the unit name the source row
/// declared, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub payload: ValuePayload,
    /// Unit name as written in the source file (e.g. `"m"`, `"sqm"`).
    pub unit_name: Option<String>,
}

impl AttributeValue {
    pub fn new(payload: ValuePayload) -> Self {
        Self {
            payload,
            unit_name: None,
        }
    }

    pub fn with_unit(payload: ValuePayload, unit_name: impl Into<String>) -> Self {
        Self {
            payload,
            unit_name: Some(unit_name.into()),
        }
    }

    pub fn decimal(value: f64) -> Self {
        Self::new(ValuePayload::Decimal(Some(value)))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(ValuePayload::Text(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Self::new(ValuePayload::Integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ValuePayload::Boolean(Some(value)))
    }

    /// False exactly when the active variant is an unset decimal or
    /// boolean. Unspecified values are skipped by consumers, never
    /// materialized as defaults.
    #[must_use]
    pub fn is_specified(&self) -> bool {
        !matches!(
            self.payload,
            ValuePayload::Decimal(None) | ValuePayload::Boolean(None)
        )
    }

    pub fn to_f64(&self) -> Result<f64, ConversionError> {
        self.payload.to_f64()
    }

    pub fn to_i64(&self) -> Result<i64, ConversionError> {
        self.payload.to_i64()
    }

    pub fn to_text(&self) -> String {
        self.payload.to_text()
    }

    pub fn to_bool(&self) -> Result<bool, ConversionError> {
        self.payload.to_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_coerces_to_number() {
        assert_eq!(AttributeValue::decimal(3.5).to_f64(), Ok(3.5));
        assert_eq!(AttributeValue::decimal(3.5).to_i64(), Ok(4));
    }

    #[test]
    fn text_parses_to_number() {
        assert_eq!(AttributeValue::text(" 12.25 ").to_f64(), Ok(12.25));
        assert!(matches!(
            AttributeValue::text("twelve").to_f64(),
            Err(ConversionError::NotNumeric { .. })
        ));
    }

    #[test]
    fn boolean_coerces_to_number() {
        assert_eq!(AttributeValue::boolean(true).to_f64(), Ok(1.0));
        assert_eq!(AttributeValue::boolean(false).to_f64(), Ok(0.0));
    }

    #[test]
    fn unspecified_payloads_yield_defaults() {
        let unset = AttributeValue::new(ValuePayload::Decimal(None));
        assert!(!unset.is_specified());
        assert_eq!(unset.to_f64(), Ok(0.0));
        assert_eq!(unset.to_text(), "");

        let unset = AttributeValue::new(ValuePayload::Boolean(None));
        assert!(!unset.is_specified());
        assert_eq!(unset.to_bool(), Ok(false));
    }

    #[test]
    fn specified_payloads_report_specified() {
        assert!(AttributeValue::decimal(0.0).is_specified());
        assert!(AttributeValue::text("").is_specified());
        assert!(AttributeValue::integer(0).is_specified());
        assert!(AttributeValue::boolean(false).is_specified());
    }

    #[test]
    fn text_coerces_to_bool() {
        assert_eq!(AttributeValue::text("TRUE").to_bool(), Ok(true));
        assert_eq!(AttributeValue::text("false").to_bool(), Ok(false));
        assert!(matches!(
            AttributeValue::text("yes").to_bool(),
            Err(ConversionError::NotBoolean { .. })
        ));
    }

    #[test]
    fn value_roundtrips_through_json() {
        let value = AttributeValue::with_unit(ValuePayload::Decimal(Some(2.0)), "m");
        let json = serde_json::to_string(&value).expect("serialize value");
        let round: AttributeValue = serde_json::from_str(&json).expect("deserialize value");
        assert_eq!(round, value);
    }
}
