//! Error types for store access.

use thiserror::Error;

use crate::{ObjectId, SetId};

/// Errors from dereferencing store handles.
///
/// Ids are only issued by the store itself, so these indicate a handle
/// from a different store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown {0} in this store")]
    UnknownObject(ObjectId),

    #[error("unknown {0} in this store")]
    UnknownSet(SetId),
}
