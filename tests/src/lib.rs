//! End-to-end layout, extraction and simulation tests.

#[cfg(test)]
pub mod layout;
pub mod shared;
#[cfg(test)]
pub mod sim;
#[cfg(test)]
pub mod topology;
