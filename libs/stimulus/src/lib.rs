//! Stimulus and expectation generators for layout pins.
//!
//! A [`ValuesFunction`] describes an infinite boolean sequence.
//! Calling [`ValuesFunction::begin`] resolves references through a
//! [`FunctionTable`] and returns a [`Generator`] holding the per-variant
//! state for one simulation run.
#![warn(missing_docs)]

use std::collections::HashSet;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod error;
mod generator;

pub use error::{Error, Result};
pub use generator::Generator;


/// A boolean operator combining the outputs of child functions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AggregateOp {
    /// High when every child is high.
    And,
    /// High when any child is high.
    Or,
    /// High when an odd number of children are high.
    Xor,
}

impl AggregateOp {
    /// Folds child values with this operator.
    ///
    /// An empty [`AggregateOp::And`] is high; empty [`AggregateOp::Or`] and
    /// [`AggregateOp::Xor`] are low.
    pub fn apply(&self, values: impl IntoIterator<Item = bool>) -> bool {
        let mut values = values.into_iter();
        match self {
            Self::And => values.all(|v| v),
            Self::Or => values.any(|v| v),
            Self::Xor => values.fold(false, |acc, v| acc ^ v),
        }
    }
}

/// A run of identical values in a [`ValuesFunction::RepeatingSequence`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Run {
    /// The value emitted for the duration of the run.
    pub value: bool,
    /// The number of ticks in the run.
    pub length: u32,
}

impl Run {
    /// Creates a new [`Run`].
    pub const fn new(value: bool, length: u32) -> Self {
        Self { value, length }
    }
}

/// A description of an infinite boolean sequence.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ValuesFunction {
    /// The same value on every tick.
    Static(bool),
    /// `skip` low ticks, then `on` high ticks followed by `off` low ticks, repeated forever.
    Periodic {
        /// Low ticks before the first period.
        skip: u32,
        /// High ticks per period.
        on: u32,
        /// Low ticks per period.
        off: u32,
    },
    /// Child sequences combined tick by tick.
    Aggregate {
        /// The combining operator.
        op: AggregateOp,
        /// The combined functions.
        children: Vec<ValuesFunction>,
    },
    /// The given runs, repeated forever.
    ///
    /// Zero-length runs are skipped. A sequence whose runs are all empty is always low.
    RepeatingSequence(Vec<Run>),
    /// The function registered in a [`FunctionTable`] under this name.
    Reference(ArcStr),
}

impl Default for ValuesFunction {
    fn default() -> Self {
        Self::Static(false)
    }
}

impl ValuesFunction {
    /// Creates a [`ValuesFunction::Periodic`].
    pub const fn periodic(skip: u32, on: u32, off: u32) -> Self {
        Self::Periodic { skip, on, off }
    }

    /// Creates a [`ValuesFunction::Aggregate`].
    pub fn aggregate(op: AggregateOp, children: impl IntoIterator<Item = ValuesFunction>) -> Self {
        Self::Aggregate {
            op,
            children: children.into_iter().collect(),
        }
    }

    /// Creates a [`ValuesFunction::Reference`].
    pub fn reference(name: impl Into<ArcStr>) -> Self {
        Self::Reference(name.into())
    }

    /// Appends the names this function refers to directly (not through the table) to `out`.
    pub fn references(&self, out: &mut Vec<ArcStr>) {
        match self {
            Self::Reference(name) => out.push(name.clone()),
            Self::Aggregate { children, .. } => {
                for child in children {
                    child.references(out);
                }
            }
            Self::Static(_) | Self::Periodic { .. } | Self::RepeatingSequence(_) => {}
        }
    }

    /// Resolves this function against `table` and returns a fresh generator.
    ///
    /// Every reference gets its own generator state, so two pins referring to
    /// the same named function advance independently.
    pub fn begin(&self, table: &FunctionTable) -> Result<Generator> {
        let mut path = Vec::new();
        Generator::resolve(self, table, &mut path)
    }
}

/// A set of named, shareable [`ValuesFunction`]s.
///
/// The table never holds a reference cycle: [`FunctionTable::insert`]
/// rejects any function that would close one.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FunctionTable {
    functions: IndexMap<ArcStr, ValuesFunction>,
}

impl FunctionTable {
    /// Creates a new, empty table.
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `function` under `name`.
    ///
    /// References to names that are not yet registered are allowed here and
    /// reported by [`FunctionTable::validate`] or [`ValuesFunction::begin`].
    pub fn insert(&mut self, name: impl Into<ArcStr>, function: ValuesFunction) -> Result<()> {
        let name = name.into();
        if self.functions.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.functions.insert(name.clone(), function);
        if let Err(err) = self.check_cycles_from(&name) {
            self.functions.shift_remove(&name);
            tracing::debug!("rejected function `{}`: {}", name, err);
            return Err(err);
        }
        Ok(())
    }

    /// Returns the function registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ValuesFunction> {
        self.functions.get(name)
    }

    /// Iterates over `(name, function)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &ValuesFunction)> {
        self.functions.iter()
    }

    /// The number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Checks that every reference resolves and that no reference cycle exists.
    ///
    /// Tables built through [`FunctionTable::insert`] can only fail the first check;
    /// deserialized tables may fail either.
    pub fn validate(&self) -> Result<()> {
        for (name, function) in self.functions.iter() {
            let mut refs = Vec::new();
            function.references(&mut refs);
            if let Some(missing) = refs.into_iter().find(|r| !self.functions.contains_key(r)) {
                tracing::debug!("function `{}` refers to missing `{}`", name, missing);
                return Err(Error::UnknownReference(missing));
            }
            self.check_cycles_from(name)?;
        }
        Ok(())
    }

    fn check_cycles_from(&self, root: &ArcStr) -> Result<()> {
        let mut path = vec![root.clone()];
        let mut done = HashSet::new();
        self.visit(root, &mut path, &mut done)
    }

    fn visit(
        &self,
        name: &ArcStr,
        path: &mut Vec<ArcStr>,
        done: &mut HashSet<ArcStr>,
    ) -> Result<()> {
        let Some(function) = self.functions.get(name) else {
            return Ok(());
        };
        let mut refs = Vec::new();
        function.references(&mut refs);
        for next in refs {
            if path.contains(&next) {
                path.push(next);
                return Err(Error::ReferenceCycle(path.clone()));
            }
            if done.contains(&next) {
                continue;
            }
            path.push(next.clone());
            self.visit(&next, path, done)?;
            path.pop();
            done.insert(next);
        }
        Ok(())
    }
}
