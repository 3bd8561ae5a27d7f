//! Stimulus error types.

use arcstr::ArcStr;

/// A result type returning stimulus errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for stimulus functions and function tables.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// A [`Reference`](crate::ValuesFunction::Reference) names a function
    /// that is not in the table.
    #[error("no function named `{0}`")]
    UnknownReference(ArcStr),
    /// Following references from a function leads back to a function already on the path.
    #[error("reference cycle: {}", display_path(.0))]
    ReferenceCycle(Vec<ArcStr>),
    /// A function with this name already exists in the table.
    #[error("a function named `{0}` already exists")]
    DuplicateName(ArcStr),
}

fn display_path(path: &[ArcStr]) -> String {
    path.iter()
        .map(ArcStr::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
