//! Grouping containers and their members.
//!
//! A container is either an element-quantity set (members are physical
//! quantities typed by unit category) or a generic property set
//! (members are named values with no unit category). Containers are
//! owned by the store; attachment to objects is recorded separately.

use serde::{Deserialize, Serialize};

/// A measured amount typed by its unit category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QuantityMeasure {
    Area(f64),
    Length(f64),
    Weight(f64),
    Time(f64),
    Volume(f64),
    Count(f64),
}

impl QuantityMeasure {
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Area(v)
            | Self::Length(v)
            | Self::Weight(v)
            | Self::Time(v)
            | Self::Volume(v)
            | Self::Count(v) => *v,
        }
    }
}

/// A named physical quantity inside an element-quantity set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalQuantity {
    pub name: String,
    /// Provenance note, e.g. which source attribute produced this.
    pub description: Option<String>,
    pub measure: QuantityMeasure,
}

/// The value of a generic property member, mirroring the source
/// payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Real(f64),
    Text(String),
    Integer(i64),
    Boolean(bool),
}

/// A named single-value property inside a property set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleValueProperty {
    pub name: String,
    pub value: PropertyValue,
}

/// A grouping container attached to objects via
/// [`crate::RelDefinesByProperties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertySetDef {
    ElementQuantity {
        name: String,
        quantities: Vec<PhysicalQuantity>,
    },
    PropertySet {
        name: String,
        properties: Vec<SingleValueProperty>,
    },
}

impl PropertySetDef {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ElementQuantity { name, .. } | Self::PropertySet { name, .. } => name,
        }
    }

    /// True for element-quantity sets. This checks the container kind,
    /// not the naming convention used to choose a kind at creation.
    #[must_use]
    pub fn is_quantity_set(&self) -> bool {
        matches!(self, Self::ElementQuantity { .. })
    }

    /// Number of members, regardless of kind.
    #[must_use]
    pub fn member_count(&self) -> usize {
        match self {
            Self::ElementQuantity { quantities, .. } => quantities.len(),
            Self::PropertySet { properties, .. } => properties.len(),
        }
    }
}
