//! Typed outcomes for cart mutations.
//!
//! Every mutation on the store returns `Result<(), CartError>` so callers
//! and tests can assert on outcomes directly. The `Display` text of each
//! operation variant is the human-readable message handed to the configured
//! [`Notifier`](crate::notify::Notifier); notification is layered on top of
//! the typed result, never a replacement for it.

use thiserror::Error;

use crate::api::ApiError;
use crate::persistence::PersistenceError;

/// The underlying collaborator failure behind an operation error.
#[derive(Debug, Error)]
pub enum Failure {
    /// A remote catalog or stock lookup failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the cart snapshot failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors produced by cart operations.
///
/// All variants are non-fatal: the in-memory cart and the persisted snapshot
/// are left exactly as they were before the failed operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog lookup failed, the product does not exist, or the stock
    /// lookup or persistence write failed while adding.
    #[error("product could not be added")]
    AddFailed(#[source] Failure),

    /// The requested quantity is below 1 or exceeds available stock.
    #[error("requested quantity exceeds stock")]
    OutOfStock {
        /// Quantity the operation tried to set.
        requested: u32,
        /// Stock observed during the operation.
        available: u32,
    },

    /// Persistence write failed while removing.
    #[error("product could not be removed")]
    RemoveFailed(#[source] Failure),

    /// Stock lookup or persistence write failed while changing a quantity.
    #[error("product quantity could not be changed")]
    UpdateFailed(#[source] Failure),

    /// The stored cart snapshot could not be read at construction.
    #[error("stored cart could not be loaded")]
    Load(#[from] PersistenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_errors_display_notifier_messages() {
        let err = CartError::AddFailed(Failure::Api(ApiError::NotFound("product 9".to_string())));
        assert_eq!(err.to_string(), "product could not be added");

        let err = CartError::OutOfStock {
            requested: 3,
            available: 2,
        };
        assert_eq!(err.to_string(), "requested quantity exceeds stock");
    }

    #[test]
    fn test_source_chain_is_preserved() {
        use std::error::Error as _;

        let err = CartError::UpdateFailed(Failure::Api(ApiError::NotFound("stock 1".to_string())));
        let source = err.source().expect("has source");
        assert_eq!(source.to_string(), "Not found: stock 1");
    }
}
