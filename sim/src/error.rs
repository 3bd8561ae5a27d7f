//! Simulation error types.

/// A result type returning simulation errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for simulation.
///
/// Output mismatches are never errors; they only lower the score.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A pin's function could not be started.
    #[error("error starting pin `{pin}`: {source}")]
    Stimulus {
        /// The pin whose function failed.
        pin: arcstr::ArcStr,
        /// The underlying error.
        #[source]
        source: stimulus::Error,
    },
}
