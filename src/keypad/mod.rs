//! Button-level front of the calculator.
//!
//! The keypad owns the display text and whether the user is midway through typing a
//! number. Digit presses only touch the display; operator presses push the typed
//! number into the [`Engine`], apply the operator, and write the result back.

use crate::engine::Engine;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KeypadError {
    #[error("Display is empty")]
    EmptyDisplay,
    #[error("Display text '{0}' is not a number")]
    NotANumber(String),
    #[error("Display text '{0}' is too large to represent")]
    OutOfRange(String),
}

lazy_static! {
    static ref NUMBER_REGEX: Regex = Regex::new(r"^-?(\d+\.?\d*|\.\d+)$").unwrap();
}

/// Parses display text into a value, accepting only plain decimal notation.
///
/// `str::parse::<f64>` alone would also take `inf`, `NaN` and exponents, none of
/// which the keypad can produce. Digit strings that overflow `f64` are rejected too.
pub fn parse_display(text: &str) -> Result<f64, KeypadError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(KeypadError::EmptyDisplay);
    }
    if !NUMBER_REGEX.is_match(text) {
        return Err(KeypadError::NotANumber(text.to_string()));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| KeypadError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(KeypadError::OutOfRange(text.to_string()));
    }
    Ok(value)
}

fn is_digit_label(label: &str) -> bool {
    let mut chars = label.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_digit() || c == '.'
    )
}

/// Renders a value the way the display shows it: `7` rather than `7.0`.
pub fn format_display(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone)]
pub struct Keypad {
    engine: Engine,
    display: String,
    typing: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self::with_engine(Engine::new())
    }

    /// Wraps an existing engine, showing its current result.
    pub fn with_engine(engine: Engine) -> Self {
        let display = format_display(engine.result());
        Self {
            engine,
            display,
            typing: false,
        }
    }

    /// Handles a press of `0`-`9` or `.`. Any other label is ignored.
    pub fn touch_digit(&mut self, digit: &str) {
        if !is_digit_label(digit) {
            warn!("Ignoring non-digit key '{}'", digit);
            return;
        }
        if self.typing {
            if digit == "." && self.display.contains('.') {
                debug!("Ignoring second decimal point in '{}'", self.display);
                return;
            }
            let extended = format!("{}{}", self.display, digit);
            if let Err(KeypadError::OutOfRange(_)) = parse_display(&extended) {
                warn!("Ignoring digit '{}': display would overflow", digit);
                return;
            }
            self.display = extended;
        } else if digit == "." {
            self.display = "0.".to_string();
        } else {
            self.display = digit.to_string();
        }
        self.typing = true;
    }

    /// Handles an operator press and returns the value now on the display.
    ///
    /// If the typed text does not parse, nothing reaches the engine.
    pub fn touch_operation(&mut self, symbol: &str) -> Result<f64, KeypadError> {
        if self.typing {
            let operand = match self.display_value() {
                Ok(v) => v,
                Err(e) => {
                    warn!("Rejected display text before '{}': {}", symbol, e);
                    return Err(e);
                }
            };
            self.engine.set_operand(operand);
            self.typing = false;
        }
        self.engine.perform_operation(symbol);
        let result = self.engine.result();
        self.set_display_value(result);
        Ok(result)
    }

    pub fn display_value(&self) -> Result<f64, KeypadError> {
        parse_display(&self.display)
    }

    pub fn set_display_value(&mut self, value: f64) {
        self.display = format_display(value);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
        self.display = "0".to_string();
        self.typing = false;
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Direct engine access, e.g. to restore a saved program. Resets typing.
    pub fn engine_mut(&mut self) -> &mut Engine {
        self.typing = false;
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_number(keypad: &mut Keypad, text: &str) {
        for c in text.chars() {
            keypad.touch_digit(&c.to_string());
        }
    }

    #[test]
    fn test_parse_display_accepts_plain_decimals() {
        assert_eq!(parse_display("42"), Ok(42.0));
        assert_eq!(parse_display("-3.5"), Ok(-3.5));
        assert_eq!(parse_display("0."), Ok(0.0));
        assert_eq!(parse_display(".25"), Ok(0.25));
        assert_eq!(parse_display(" 7 "), Ok(7.0));
    }

    #[test]
    fn test_parse_display_rejects_garbage() {
        assert_eq!(parse_display(""), Err(KeypadError::EmptyDisplay));
        assert_eq!(parse_display("   "), Err(KeypadError::EmptyDisplay));
        for text in ["inf", "NaN", "1e5", "1.2.3", "abc", "-", ".", "+4"] {
            assert_eq!(
                parse_display(text),
                Err(KeypadError::NotANumber(text.to_string())),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(7.0), "7");
        assert_eq!(format_display(-12.0), "-12");
        assert_eq!(format_display(0.5), "0.5");
        assert_eq!(format_display(f64::INFINITY), "inf");
        assert_eq!(format_display(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_display(f64::NAN), "NaN");
    }

    #[test]
    fn test_digits_concatenate_while_typing() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.display(), "0");
        assert!(!keypad.is_typing());

        type_number(&mut keypad, "123");
        assert_eq!(keypad.display(), "123");
        assert!(keypad.is_typing());
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, "1.2.5");
        assert_eq!(keypad.display(), "1.25");
    }

    #[test]
    fn test_leading_decimal_point() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, ".5");
        assert_eq!(keypad.display(), "0.5");
        assert_eq!(keypad.display_value(), Ok(0.5));
    }

    #[test]
    fn test_operation_pushes_typed_operand() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, "3");
        assert_eq!(keypad.touch_operation("+"), Ok(3.0));
        assert!(!keypad.is_typing());

        type_number(&mut keypad, "4");
        assert_eq!(keypad.touch_operation("="), Ok(7.0));
        assert_eq!(keypad.display(), "7");
        assert_eq!(keypad.engine().program().len(), 4);
    }

    #[test]
    fn test_new_digits_replace_result() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, "9");
        keypad.touch_operation("√").unwrap();
        assert_eq!(keypad.display(), "3");

        type_number(&mut keypad, "5");
        assert_eq!(keypad.display(), "5");
    }

    #[test]
    fn test_operator_without_typing_uses_accumulator() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, "3");
        keypad.touch_operation("+").unwrap();
        assert_eq!(keypad.touch_operation("="), Ok(6.0));
        // Only the first operand was typed.
        assert_eq!(keypad.engine().program().len(), 3);
    }

    #[test]
    fn test_constant_press() {
        let mut keypad = Keypad::new();
        let pi = keypad.touch_operation("π").unwrap();
        assert_eq!(pi, std::f64::consts::PI);
        assert_eq!(keypad.display(), format!("{}", std::f64::consts::PI));
    }

    #[test]
    fn test_non_digit_keys_are_ignored() {
        let mut keypad = Keypad::new();
        for label in ["-", "x", "12", "", "+"] {
            keypad.touch_digit(label);
            assert_eq!(keypad.display(), "0");
            assert!(!keypad.is_typing(), "'{}' started typing", label);
        }

        type_number(&mut keypad, "4");
        keypad.touch_digit("x");
        assert_eq!(keypad.display(), "4");
        assert!(keypad.is_typing());
        assert_eq!(keypad.touch_operation("√"), Ok(2.0));
    }

    #[test]
    fn test_overflowing_digits_are_ignored() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, &"9".repeat(400));
        assert!(keypad.display().len() < 400);

        let value = keypad.display_value().unwrap();
        assert!(value.is_finite());
        assert_eq!(keypad.touch_operation("+"), Ok(value));
        assert!(keypad.engine().result().is_finite());
    }

    #[test]
    fn test_parse_display_rejects_overflow() {
        let text = "9".repeat(400);
        assert_eq!(parse_display(&text), Err(KeypadError::OutOfRange(text.clone())));
    }

    #[test]
    fn test_clear_resets_display_and_engine() {
        let mut keypad = Keypad::new();
        type_number(&mut keypad, "8");
        keypad.touch_operation("×").unwrap();
        type_number(&mut keypad, "2");
        keypad.clear();
        assert_eq!(keypad.display(), "0");
        assert!(!keypad.is_typing());
        assert_eq!(keypad.engine().result(), 0.0);
        assert!(keypad.engine().program().is_empty());
    }

    #[test]
    fn test_with_engine_shows_result() {
        let mut engine = Engine::new();
        engine.set_operand(2.5);
        let keypad = Keypad::with_engine(engine);
        assert_eq!(keypad.display(), "2.5");
    }
}
