//! Fixed input and output terminals.

use arcstr::ArcStr;
use geometry::prelude::*;
use serde::{Deserialize, Serialize};
use stimulus::ValuesFunction;

/// A named rectangular terminal region.
///
/// Input pins drive their nets with the values of `function`;
/// output pins use `function` as the expected values when scoring.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// The pin name, unique within a layer.
    pub name: ArcStr,
    /// The cells covered by the pin.
    pub region: Region,
    /// The stimulus (inputs) or expectation (outputs) generator.
    pub function: ValuesFunction,
    /// Whether the pin is an output.
    pub is_output: bool,
    /// Whether an output pin participates in scoring.
    pub is_significant: bool,
}

impl Pin {
    /// Creates an input pin driven by `function`.
    pub fn input(name: impl Into<ArcStr>, region: Region, function: ValuesFunction) -> Self {
        Self {
            name: name.into(),
            region,
            function,
            is_output: false,
            is_significant: false,
        }
    }

    /// Creates a significant output pin that is expected to follow `expected`.
    pub fn output(name: impl Into<ArcStr>, region: Region, expected: ValuesFunction) -> Self {
        Self {
            name: name.into(),
            region,
            function: expected,
            is_output: true,
            is_significant: true,
        }
    }

    /// Sets whether the pin participates in scoring.
    pub fn with_significance(mut self, significant: bool) -> Self {
        self.is_significant = significant;
        self
    }

    /// The cell the topology builder seeds this pin's net from.
    #[inline]
    pub fn anchor(&self) -> Pos {
        self.region.from()
    }
}
