//! Discrete-time logic simulation of extracted netlists.
//!
//! Every step advances each pin's generator by one tick, drives the nets of
//! high input pins, lets open gates merge their power nets, and compares each
//! output pin with its expected value. Gate openness is computed from the
//! potentials at the end of a step and takes effect on the next step.
#![warn(missing_docs)]

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use stimulus::{FunctionTable, Generator};
use topology::{NetPin, Netlist, SchemeGate};
use tracing::{span, Level};

pub mod error;

pub use error::{Error, Result};


/// Simulation parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// The number of recorded steps.
    pub max_steps: usize,
    /// Steps run before recording starts.
    ///
    /// Settle steps advance the generators and count toward the score,
    /// but do not appear in the recorded traces.
    pub settle_steps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            max_steps: 0,
            settle_steps: 1,
        }
    }
}

impl SimOptions {
    /// Options recording `max_steps` steps after a single settle step.
    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Default::default()
        }
    }
}

/// The recorded values of one pin.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PinTrace {
    /// The pin name.
    pub name: ArcStr,
    /// Whether the pin is an output.
    pub is_output: bool,
    /// Simulated values for outputs; driven values for inputs.
    pub actual: Vec<bool>,
    /// Expected values for outputs; driven values for inputs.
    pub expected: Vec<bool>,
}

impl PinTrace {
    /// Returns `true` if every recorded value matches its expectation.
    pub fn matches(&self) -> bool {
        self.actual == self.expected
    }
}

/// The outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One trace per pin, in netlist order.
    pub pins: Vec<PinTrace>,
    /// The mean fraction of significant outputs matching their expectation
    /// over all steps, in `[0, 1]`.
    pub score: f64,
}

impl SimulationResult {
    /// The trace of the pin named `name`, if any.
    pub fn pin(&self, name: &str) -> Option<&PinTrace> {
        self.pins.iter().find(|pin| pin.name.as_str() == name)
    }
}

/// Simulates `netlist` for `max_steps` recorded steps after one settle step.
///
/// See [`simulate_with`].
pub fn simulate(
    netlist: &Netlist,
    table: &FunctionTable,
    max_steps: usize,
) -> Result<SimulationResult> {
    simulate_with(netlist, table, &SimOptions::new(max_steps))
}

/// Simulates `netlist` with the given options.
///
/// `table` resolves the [`Reference`](stimulus::ValuesFunction::Reference)
/// functions of the pins. Fails only if a pin function cannot be started.
pub fn simulate_with(
    netlist: &Netlist,
    table: &FunctionTable,
    options: &SimOptions,
) -> Result<SimulationResult> {
    let _guard = span!(Level::INFO, "simulating netlist").entered();
    let mut state = State::new(netlist, table)?;

    let total = options.settle_steps + options.max_steps;
    let mut traces: Vec<PinTrace> = netlist
        .pins()
        .map(|pin| PinTrace {
            name: pin.name.clone(),
            is_output: pin.is_output,
            actual: Vec::with_capacity(options.max_steps),
            expected: Vec::with_capacity(options.max_steps),
        })
        .collect();

    let mut sum = 0.0;
    for step in 0..total {
        let outcome = state.step();
        sum += outcome.fraction;
        if step < options.settle_steps {
            continue;
        }
        for (trace, (actual, expected)) in traces.iter_mut().zip(outcome.values) {
            trace.actual.push(actual);
            trace.expected.push(expected);
        }
    }

    let score = if total == 0 { 1.0 } else { sum / total as f64 };
    tracing::debug!("simulated {} steps with score {:.3}", total, score);
    Ok(SimulationResult {
        pins: traces,
        score,
    })
}

struct StepOutcome {
    /// `(actual, expected)` per pin, in netlist order.
    values: Vec<(bool, bool)>,
    fraction: f64,
}

struct State<'a> {
    pins: Vec<&'a NetPin>,
    generators: Vec<Generator>,
    gates: &'a [SchemeGate],
    high: Vec<bool>,
    open: Vec<bool>,
}

impl<'a> State<'a> {
    fn new(netlist: &'a Netlist, table: &FunctionTable) -> Result<Self> {
        let pins: Vec<&NetPin> = netlist.pins().collect();
        let generators = pins
            .iter()
            .map(|pin| {
                pin.function.begin(table).map_err(|source| Error::Stimulus {
                    pin: pin.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            pins,
            generators,
            gates: netlist.gates(),
            high: vec![false; netlist.nodes().len()],
            open: vec![false; netlist.gates().len()],
        })
    }

    fn step(&mut self) -> StepOutcome {
        let ticks: Vec<bool> = self.generators.iter_mut().map(Generator::step).collect();

        self.high.fill(false);
        for (pin, &value) in self.pins.iter().zip(ticks.iter()) {
            if !pin.is_output && value {
                for node in pin.nodes.iter() {
                    self.high[node.index()] = true;
                }
            }
        }

        self.propagate();
        for (open, gate) in self.open.iter_mut().zip(self.gates) {
            *open = conducts(gate, &self.high);
        }

        let mut compared = 0usize;
        let mut matched = 0usize;
        let values = self
            .pins
            .iter()
            .zip(ticks)
            .map(|(pin, tick)| {
                if !pin.is_output {
                    return (tick, tick);
                }
                let actual = pin.nodes.iter().any(|node| self.high[node.index()]);
                if pin.is_significant {
                    compared += 1;
                    if actual == tick {
                        matched += 1;
                    }
                }
                (actual, tick)
            })
            .collect();

        let fraction = if compared == 0 {
            1.0
        } else {
            matched as f64 / compared as f64
        };
        StepOutcome { values, fraction }
    }

    /// Merges the power nets of open gates until nothing changes.
    fn propagate(&mut self) {
        loop {
            let mut changed = false;
            for (gate, &open) in self.gates.iter().zip(self.open.iter()) {
                if !open {
                    continue;
                }
                let [a, b] = gate.power_nodes();
                let merged = self.high[a.index()] || self.high[b.index()];
                if self.high[a.index()] != merged || self.high[b.index()] != merged {
                    self.high[a.index()] = merged;
                    self.high[b.index()] = merged;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }
}

/// Whether `gate` conducts given the current potentials.
///
/// Every position of a chain must be satisfied: an N position needs a high
/// input, a P position needs all of its inputs low.
fn conducts(gate: &SchemeGate, high: &[bool]) -> bool {
    gate.input_groups().iter().all(|group| {
        let any = group.iter().any(|node| high[node.index()]);
        any != gate.is_inversion_gate()
    })
}
