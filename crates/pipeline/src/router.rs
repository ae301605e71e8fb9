//! Classification-to-specialist routing.
//!
//! A fixed, ordered rule table over the cleaned classification label.
//! Rule order is significant: "resistor" and "capacitor" are checked
//! before the IC rule, so a label like "ceramic disc capacitor" routes
//! to the capacitor specialist and never reaches the IC match.

use partlens_core::classification::Classification;
use partlens_core::prompts;
use serde::Serialize;

/// The specialist prompt to dispatch for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialist {
    Resistor,
    Capacitor,
    Ic,
    /// Fallback covering diodes, transistors, LEDs, PCBs, and anything
    /// the identify step could not place.
    Generic,
}

impl Specialist {
    /// The prompt template this specialist sends to the vision model.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Resistor => prompts::RESISTOR,
            Self::Capacitor => prompts::CAPACITOR,
            Self::Ic => prompts::IC,
            Self::Generic => prompts::GENERIC,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Resistor => "resistor",
            Self::Capacitor => "capacitor",
            Self::Ic => "ic",
            Self::Generic => "generic",
        }
    }
}

/// Pick the specialist for a classification. Pure; first match wins.
///
/// The IC rule matches "integrated circuit" as a substring but "ic" only
/// as a whole token, so incidental occurrences of the letter pair inside
/// other words cannot misroute.
pub fn route(classification: &Classification) -> Specialist {
    let label = classification.label().trim().to_lowercase();

    if label.contains("resistor") {
        Specialist::Resistor
    } else if label.contains("capacitor") {
        Specialist::Capacitor
    } else if label.contains("integrated circuit") || has_token(&label, "ic") {
        Specialist::Ic
    } else {
        Specialist::Generic
    }
}

/// Whole-token containment over alphanumeric word boundaries.
fn has_token(label: &str, token: &str) -> bool {
    label
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_label(raw: &str) -> Specialist {
        route(&Classification::from_raw(raw))
    }

    #[test]
    fn resistor_labels_route_to_resistor() {
        assert_eq!(route_label("Resistor"), Specialist::Resistor);
        assert_eq!(route_label("resistor."), Specialist::Resistor);
        assert_eq!(route_label("SMD Resistor"), Specialist::Resistor);
        assert_eq!(route_label("THROUGH-HOLE RESISTOR"), Specialist::Resistor);
    }

    #[test]
    fn capacitor_labels_route_to_capacitor() {
        assert_eq!(route_label("Capacitor"), Specialist::Capacitor);
        assert_eq!(route_label("electrolytic capacitor"), Specialist::Capacitor);
        // Order matters: the "ic" in "ceramic" must not win over the
        // earlier capacitor rule.
        assert_eq!(route_label("ceramic disc capacitor"), Specialist::Capacitor);
    }

    #[test]
    fn ic_labels_route_to_ic() {
        assert_eq!(route_label("IC"), Specialist::Ic);
        assert_eq!(route_label("ic"), Specialist::Ic);
        assert_eq!(route_label("Integrated Circuit"), Specialist::Ic);
        assert_eq!(route_label("8-pin IC"), Specialist::Ic);
        // Dotted abbreviations clean to a bare token before routing.
        assert_eq!(route_label("I.C."), Specialist::Ic);
    }

    #[test]
    fn ic_requires_a_whole_token() {
        // "ceramic" contains the letters "ic" but is not an IC.
        assert_eq!(route_label("ceramic"), Specialist::Generic);
        assert_eq!(route_label("microphone"), Specialist::Generic);
    }

    #[test]
    fn everything_else_routes_to_generic() {
        for label in ["Diode", "Transistor", "LED", "PCB", "Other", "mystery part"] {
            assert_eq!(route_label(label), Specialist::Generic, "label: {label}");
        }
    }

    #[test]
    fn resistor_wins_over_later_rules() {
        // First match wins even when multiple rules would hit.
        assert_eq!(route_label("resistor on a pcb"), Specialist::Resistor);
    }
}
