//! Error types for property and quantity writes.

use thiserror::Error;

use cobie_model::ConversionError;
use ifc_store::{ObjectId, StoreError, UnitKind};

/// Errors from a single property/quantity write.
///
/// Every failure is terminal for the one attachment attempt; the
/// caller decides whether to abort the run or carry on with the next
/// source value. Absent values are never errors — they are skipped.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The source key has no configured target location. Signals a
    /// configuration gap, not bad data.
    #[error("no property mapping configured for '{key}' ({object})")]
    UnmappedProperty { key: String, object: ObjectId },

    /// A quantity destination needs a resolved unit and none was
    /// available from the value or the caller's default.
    #[error(
        "cannot create quantity '{member_name}' in '{set_name}' for '{key}': no resolved unit"
    )]
    InvalidUnit {
        key: String,
        set_name: String,
        member_name: String,
    },

    /// The value could not be coerced to a quantity's numeric payload.
    #[error("failed to convert value for '{key}' to a quantity")]
    ConversionFailed {
        key: String,
        #[source]
        source: ConversionError,
    },

    /// A unit category outside the physical set reached the quantity
    /// selector (currency, for instance).
    #[error("unit category {kind:?} is not supported for quantities")]
    UnsupportedUnitCategory { kind: UnitKind },

    /// A container with the mapped name exists on the object but is
    /// the wrong kind for the destination.
    #[error("container '{set_name}' already exists with a different kind")]
    ContainerKindMismatch { set_name: String },

    /// A handle did not belong to the writer's store.
    #[error(transparent)]
    Store(#[from] StoreError),
}
