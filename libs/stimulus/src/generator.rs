//! Per-run generator state.

use std::sync::Arc;

use arcstr::ArcStr;

use crate::{AggregateOp, Error, FunctionTable, Result, Run, ValuesFunction};

/// The running state of a [`ValuesFunction`].
///
/// Created by [`ValuesFunction::begin`]; lives for one simulation run.
#[derive(Debug, Clone)]
pub struct Generator {
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    Static(bool),
    Periodic {
        skip: u32,
        on: u32,
        off: u32,
        tick: u64,
    },
    Aggregate {
        op: AggregateOp,
        children: Vec<Generator>,
    },
    Sequence {
        runs: Arc<[Run]>,
        index: usize,
        elapsed: u32,
    },
}

impl Generator {
    pub(crate) fn resolve(
        function: &ValuesFunction,
        table: &FunctionTable,
        path: &mut Vec<ArcStr>,
    ) -> Result<Self> {
        let state = match function {
            ValuesFunction::Static(value) => State::Static(*value),
            ValuesFunction::Periodic { skip, on, off } => State::Periodic {
                skip: *skip,
                on: *on,
                off: *off,
                tick: 0,
            },
            ValuesFunction::Aggregate { op, children } => State::Aggregate {
                op: *op,
                children: children
                    .iter()
                    .map(|child| Self::resolve(child, table, path))
                    .collect::<Result<_>>()?,
            },
            ValuesFunction::RepeatingSequence(runs) => {
                let runs: Arc<[Run]> = runs.iter().copied().filter(|r| r.length > 0).collect();
                State::Sequence {
                    runs,
                    index: 0,
                    elapsed: 0,
                }
            }
            ValuesFunction::Reference(name) => {
                if path.contains(name) {
                    path.push(name.clone());
                    return Err(Error::ReferenceCycle(path.clone()));
                }
                let target = table
                    .get(name)
                    .ok_or_else(|| Error::UnknownReference(name.clone()))?;
                path.push(name.clone());
                let generator = Self::resolve(target, table, path)?;
                path.pop();
                return Ok(generator);
            }
        };
        Ok(Self { state })
    }

    /// Emits the value for the current tick and advances to the next one.
    pub fn step(&mut self) -> bool {
        match &mut self.state {
            State::Static(value) => *value,
            State::Periodic {
                skip,
                on,
                off,
                tick,
            } => {
                let t = *tick;
                *tick += 1;
                let skip = u64::from(*skip);
                let period = u64::from(*on) + u64::from(*off);
                if t < skip || period == 0 {
                    false
                } else {
                    (t - skip) % period < u64::from(*on)
                }
            }
            State::Aggregate { op, children } => {
                // Every child advances on every tick, so no short-circuiting here.
                let values: Vec<bool> = children.iter_mut().map(Generator::step).collect();
                op.apply(values)
            }
            State::Sequence {
                runs,
                index,
                elapsed,
            } => {
                let Some(run) = runs.get(*index) else {
                    return false;
                };
                let value = run.value;
                *elapsed += 1;
                if *elapsed >= run.length {
                    *elapsed = 0;
                    *index = (*index + 1) % runs.len();
                }
                value
            }
        }
    }
}

impl Iterator for Generator {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }
}
