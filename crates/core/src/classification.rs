//! Component classification labels.
//!
//! The identify step asks the vision model for a single-word category
//! (`Resistor`, `Capacitor`, `IC`, `Transistor`, `Diode`, `LED`, `PCB`,
//! `Other`), but models decorate their answers with quotes, periods, and
//! whitespace. [`Classification`] stores the cleaned label; downstream
//! routing tolerates anything the model actually said.

use serde::{Deserialize, Serialize};

/// A cleaned component-category label as returned by the identify step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification(String);

impl Classification {
    /// Clean a raw model answer into a stable label.
    ///
    /// Removes every quote and period (not just at the edges -- "I.C."
    /// must clean to "IC") and strips surrounding whitespace. The
    /// remaining casing is preserved; routing lowercases on its own.
    pub fn from_raw(raw: &str) -> Self {
        let cleaned = raw.replace(['\'', '"', '.'], "").trim().to_string();
        Self(cleaned)
    }

    /// The cleaned label text.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Whether the label itself reads as an error report rather than a
    /// category (some models answer "error: no component visible").
    pub fn looks_like_error(&self) -> bool {
        self.0.is_empty() || self.0.to_lowercase().contains("error")
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
