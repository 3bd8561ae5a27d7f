//! Topology error types.

/// A result type returning topology errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for topology extraction.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The layer has edits that were neither committed nor rejected.
    #[error("cannot extract topology from a layer with uncommitted edits")]
    Uncommitted,
}
