//! Unit name resolution.
//!
//! Source values carry free-text unit names. Resolution maps a name to
//! one of the closed unit categories, or leaves the descriptor
//! undefined; it never fails. Whether an undefined unit is acceptable
//! is decided at the point of use, not here.

use serde::{Deserialize, Serialize};

/// Closed set of unit categories.
///
/// `UserDefined` is the catch-all for countable items. `Currency` is a
/// valid resolved unit (building-wide cost defaults) but is not a
/// physical quantity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Area,
    Length,
    Mass,
    Time,
    Volume,
    UserDefined,
    Currency,
}

/// A resolved unit, or undefined when the name was not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    kind: Option<UnitKind>,
}

impl UnitDescriptor {
    pub fn undefined() -> Self {
        Self { kind: None }
    }

    pub fn of(kind: UnitKind) -> Self {
        Self { kind: Some(kind) }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.kind.is_none()
    }

    #[must_use]
    pub fn kind(&self) -> Option<UnitKind> {
        self.kind
    }

    /// Parses a unit name. Unknown names yield an undefined descriptor.
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" | "cm" | "m"
            | "meter" | "meters" | "metre" | "metres" | "km" | "in" | "inch" | "inches" | "ft"
            | "foot" | "feet" | "yd" | "yard" | "yards" => Some(UnitKind::Length),
            "m2" | "sqm" | "square meter" | "square meters" | "square metre"
            | "square metres" | "sf" | "ft2" | "sqft" | "square foot" | "square feet" => {
                Some(UnitKind::Area)
            }
            "m3" | "cum" | "cubic meter" | "cubic meters" | "cubic metre" | "cubic metres"
            | "ft3" | "cf" | "cubic foot" | "cubic feet" | "l" | "litre" | "litres" | "liter"
            | "liters" | "gallon" | "gallons" => Some(UnitKind::Volume),
            "g" | "gram" | "grams" | "kg" | "kilogram" | "kilograms" | "tonne" | "tonnes"
            | "lb" | "lbs" | "pound" | "pounds" => Some(UnitKind::Mass),
            "s" | "sec" | "second" | "seconds" | "min" | "minute" | "minutes" | "h" | "hr"
            | "hour" | "hours" | "day" | "days" | "week" | "weeks" | "month" | "months"
            | "year" | "years" => Some(UnitKind::Time),
            "ea" | "each" | "item" | "items" | "nr" | "count" => Some(UnitKind::UserDefined),
            "usd" | "eur" | "gbp" | "aud" | "cad" | "$" | "\u{20ac}" | "\u{a3}" => {
                Some(UnitKind::Currency)
            }
            _ => None,
        };
        Self { kind }
    }

    /// Resolves a unit for a value: the value's own unit name when it
    /// parses, otherwise the caller's default, otherwise undefined.
    pub fn resolve(name: Option<&str>, default: Option<UnitDescriptor>) -> Self {
        let parsed = name.map(Self::parse).unwrap_or_default();
        if parsed.is_undefined() {
            default.unwrap_or_default()
        } else {
            parsed
        }
    }
}
