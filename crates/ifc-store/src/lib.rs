#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod property;
pub mod store;
pub mod units;

pub use error::StoreError;
pub use ids::{ObjectId, SetId};
pub use property::{
    PhysicalQuantity, PropertySetDef, PropertyValue, QuantityMeasure, SingleValueProperty,
};
pub use store::{IfcObject, IfcStore, RelDefinesByProperties};
pub use units::{UnitDescriptor, UnitKind};
