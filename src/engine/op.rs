use lazy_static::lazy_static;
use std::collections::HashMap;
use std::f64::consts::{E, PI};

#[derive(Debug, Clone, Copy)]
pub enum Operation {
    // --- Values ---
    Constant(f64),

    // --- Operators ---
    UnaryOperation(fn(f64) -> f64),
    BinaryOperation(fn(f64, f64) -> f64),

    // --- Resolution ---
    Equals,
}

lazy_static! {
    /// Keypad label to operation. Built on first use and never mutated afterwards.
    static ref OPERATIONS: HashMap<&'static str, Operation> = {
        let mut table = HashMap::new();
        table.insert("π", Operation::Constant(PI));
        table.insert("e", Operation::Constant(E));
        table.insert("√", Operation::UnaryOperation(f64::sqrt));
        table.insert("cos", Operation::UnaryOperation(f64::cos));
        table.insert("+", Operation::BinaryOperation(|a, b| a + b));
        table.insert("−", Operation::BinaryOperation(|a, b| a - b));
        table.insert("×", Operation::BinaryOperation(|a, b| a * b));
        table.insert("÷", Operation::BinaryOperation(|a, b| a / b));
        table.insert("=", Operation::Equals);
        table
    };
}

/// Looks up the operation bound to a keypad label.
pub fn lookup(symbol: &str) -> Option<Operation> {
    OPERATIONS.get(symbol).copied()
}

/// All recognized labels, in no particular order.
pub fn symbols() -> impl Iterator<Item = &'static str> {
    OPERATIONS.keys().copied()
}
