//! Program export for saving a calculation and replaying it later.
//!
//! A snapshot stores the recorded program together with the result it produced, so a
//! restored session can be checked against what the user saw when it was saved.

use crate::engine::Engine;
use crate::engine::program::Program;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SCHEMA_VERSION: &str = "1.0.0";

/// Saved engine session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSnapshot {
    /// Schema version for forward/backward compatibility
    pub schema_version: String,
    /// Unix timestamp when the snapshot was taken
    pub generated_at: u64,
    /// Engine result at capture time. `None` in JSON when the result was not finite.
    pub result: Option<f64>,
    /// Every operand and symbol since the last clear
    pub program: Program,
}

impl ProgramSnapshot {
    pub fn capture(engine: &Engine) -> Self {
        let result = engine.result();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().timestamp() as u64,
            result: result.is_finite().then_some(result),
            program: engine.program(),
        }
    }

    /// Replays the saved program into `engine` and returns the new result.
    pub fn restore(&self, engine: &mut Engine) -> f64 {
        engine.set_program(self.program.clone());
        if !self.matches_result(engine.result()) {
            warn!(
                "Restored result {} differs from saved result {:?}",
                engine.result(),
                self.result
            );
        }
        engine.result()
    }

    /// Replays into a fresh engine and compares against the recorded result.
    ///
    /// Non-finite results are stored as `None`, which matches any non-finite replay.
    pub fn verify_result(&self) -> bool {
        self.matches_result(Engine::from_program(self.program.clone()).result())
    }

    fn matches_result(&self, replayed: f64) -> bool {
        match self.result {
            Some(saved) => saved.to_bits() == replayed.to_bits(),
            None => !replayed.is_finite(),
        }
    }
}

/// Writes a snapshot to a JSON file.
pub fn write_snapshot_to_json(
    snapshot: &ProgramSnapshot,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(output_path, json)?;
    info!(
        "Saved program of {} entries to '{}'",
        snapshot.program.len(),
        output_path.display()
    );
    Ok(())
}

/// Reads a snapshot from a JSON file.
pub fn read_snapshot_from_json(
    input_path: &Path,
) -> Result<ProgramSnapshot, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(input_path)?;
    let snapshot: ProgramSnapshot = serde_json::from_str(&content)?;
    if snapshot.schema_version != SCHEMA_VERSION {
        warn!(
            "Snapshot '{}' has schema version {}, expected {}",
            input_path.display(),
            snapshot.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(snapshot)
}
