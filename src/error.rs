use std::collections::TryReserveError;

/// Errors from creating a table or inserting into it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bucket array or key buffer could not be allocated; the table is
    /// left as it was before the call.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Why a rehash did not happen. The table is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RehashError {
    /// The target resolves to the current bucket count.
    #[error("table already has {size} buckets")]
    Unchanged { size: usize },

    /// The live entries would exceed the load threshold at the target size.
    #[error("{used} entries would overload {size} buckets")]
    Overloaded { used: usize, size: usize },

    /// Shrinking would not produce a smaller bucket array.
    #[error("{candidate} buckets would not shrink a table of {size}")]
    NotShrinking { candidate: usize, size: usize },

    /// The new bucket array could not be allocated.
    #[error(transparent)]
    Alloc(#[from] Error),
}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
