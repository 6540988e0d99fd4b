//! Stock-ledger arithmetic, kept separate from store I/O so the
//! sufficiency rule is testable on its own.

/// Stock transition rejected by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockError {
    /// Requested more units than are on hand
    Insufficient { available: i32, requested: i32 },
}

/// Validate a consumption against current stock and compute the resulting
/// quantity. Consuming exactly the remaining quantity is allowed (result 0).
///
/// `requested` must be positive; zero or negative consumption is a request
/// validation error handled before the ledger is consulted.
pub fn validate_and_compute_decrement(current: i32, requested: i32) -> Result<i32, StockError> {
    if requested > current {
        return Err(StockError::Insufficient {
            available: current,
            requested,
        });
    }
    Ok(current - requested)
}

/// Compute the quantity after returning units to stock. Never fails;
/// there is no upper bound on inventory.
pub fn compute_restock(current: i32, returned: i32) -> i32 {
    current.saturating_add(returned)
}
