pub mod op;
pub mod program;

use crate::engine::op::Operation;
use crate::engine::program::{Program, ProgramEntry};
use log::{debug, warn};

/// A binary operator waiting for its second operand.
#[derive(Debug, Clone, Copy)]
struct PendingBinaryOperation {
    function: fn(f64, f64) -> f64,
    first_operand: f64,
}

/// The calculator's brain: a running accumulator, at most one deferred binary
/// operator, and a log of every call made since the last clear.
///
/// Chained binary operators fold strictly left to right, so `3 + 4 × 2 =` is `14`.
/// Nothing here is fallible; unknown symbols are logged and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    accumulator: f64,
    pending: Option<PendingBinaryOperation>,
    program: Program,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine by replaying `program` from a blank state.
    pub fn from_program(program: Program) -> Self {
        let mut engine = Self::new();
        engine.set_program(program);
        engine
    }

    pub fn set_operand(&mut self, operand: f64) {
        self.accumulator = operand;
        self.program.push(ProgramEntry::Operand(operand));
    }

    /// Records `symbol` and applies it if it names a known operation.
    pub fn perform_operation(&mut self, symbol: &str) {
        self.program.push(ProgramEntry::Symbol(symbol.to_string()));

        let Some(operation) = op::lookup(symbol) else {
            warn!("Ignoring unrecognized symbol '{}'", symbol);
            return;
        };
        debug!("Applying '{}' to accumulator {}", symbol, self.accumulator);

        match operation {
            Operation::Constant(value) => self.accumulator = value,
            Operation::UnaryOperation(function) => {
                self.accumulator = function(self.accumulator);
            }
            Operation::BinaryOperation(function) => {
                self.execute_pending_binary_operation();
                self.pending = Some(PendingBinaryOperation {
                    function,
                    first_operand: self.accumulator,
                });
            }
            Operation::Equals => self.execute_pending_binary_operation(),
        }
    }

    // With no operand entered since the operator, the accumulator doubles as the
    // second operand: `3 + =` is 6.
    fn execute_pending_binary_operation(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.accumulator = (pending.function)(pending.first_operand, self.accumulator);
        }
    }

    pub fn clear(&mut self) {
        self.accumulator = 0.0;
        self.pending = None;
        self.program.clear();
    }

    /// Snapshot of the calls made since the last clear.
    pub fn program(&self) -> Program {
        self.program.clone()
    }

    /// Clears the engine, then replays every entry through the public entry points.
    pub fn set_program(&mut self, program: Program) {
        self.clear();
        debug!("Replaying program of {} entries", program.len());
        for entry in program {
            match entry {
                ProgramEntry::Operand(operand) => self.set_operand(operand),
                ProgramEntry::Symbol(symbol) => self.perform_operation(&symbol),
            }
        }
    }

    pub fn result(&self) -> f64 {
        self.accumulator
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Symbols understood by `perform_operation`.
    pub fn symbols() -> impl Iterator<Item = &'static str> {
        op::symbols()
    }
}
