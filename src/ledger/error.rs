use thiserror::Error;

/// Why the validator refused a candidate block. Checks run in this order and
/// short-circuit on the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("previous_hash does not match the chain tip")]
    ContinuityMismatch,
    #[error("proof does not meet the difficulty target")]
    InsufficientDifficulty,
    #[error("proof does not match the block contents")]
    HashMismatch,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A candidate block failed validation; the chain is unchanged.
    #[error("block rejected: {0}")]
    Rejected(RejectReason),

    /// The backing store exists but cannot be read as a chain. Raised at
    /// startup instead of letting a low-level parse failure propagate.
    #[error("corrupt ledger store: {0}")]
    CorruptStore(String),

    #[error("ledger store io: {0}")]
    Io(#[from] std::io::Error),
}
