use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded engine call.
///
/// A whole program reads as a plain JSON array such as `[3.0, "+", 4.0, "="]`.
/// JSON has no infinity or NaN, so non-finite operands are written as
/// `{"operand": "inf"}` (or `"-inf"`, `"NaN"`) instead of a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EntryRepr", try_from = "EntryRepr")]
pub enum ProgramEntry {
    Operand(f64),
    Symbol(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Number(f64),
    Symbol(String),
    NonFinite { operand: String },
}

impl From<ProgramEntry> for EntryRepr {
    fn from(entry: ProgramEntry) -> Self {
        match entry {
            ProgramEntry::Operand(value) if value.is_finite() => EntryRepr::Number(value),
            ProgramEntry::Operand(value) => EntryRepr::NonFinite {
                operand: value.to_string(),
            },
            ProgramEntry::Symbol(symbol) => EntryRepr::Symbol(symbol),
        }
    }
}

impl TryFrom<EntryRepr> for ProgramEntry {
    type Error = String;

    fn try_from(repr: EntryRepr) -> Result<Self, Self::Error> {
        match repr {
            EntryRepr::Number(value) => Ok(ProgramEntry::Operand(value)),
            EntryRepr::Symbol(symbol) => Ok(ProgramEntry::Symbol(symbol)),
            EntryRepr::NonFinite { operand } => match operand.as_str() {
                "inf" => Ok(ProgramEntry::Operand(f64::INFINITY)),
                "-inf" => Ok(ProgramEntry::Operand(f64::NEG_INFINITY)),
                "NaN" => Ok(ProgramEntry::Operand(f64::NAN)),
                other => Err(format!("Invalid non-finite operand '{}'", other)),
            },
        }
    }
}

/// Ordered log of every `set_operand` / `perform_operation` call since the last clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    entries: Vec<ProgramEntry>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: ProgramEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ProgramEntry>> for Program {
    fn from(entries: Vec<ProgramEntry>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Program {
    type Item = ProgramEntry;
    type IntoIter = std::vec::IntoIter<ProgramEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a ProgramEntry;
    type IntoIter = std::slice::Iter<'a, ProgramEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ProgramEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramEntry::Operand(value) => write!(f, "{}", value),
            ProgramEntry::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
