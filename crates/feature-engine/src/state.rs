//! Cognitive State Labels

use serde::{Deserialize, Serialize};

/// Attentional state a recording was labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveState {
    /// Studying / reading (focused), dataset label `1`
    Study,
    /// Phone scrolling (distracted), dataset label `0`
    Phone,
}

impl CognitiveState {
    /// Both states, study first
    pub const ALL: [CognitiveState; 2] = [CognitiveState::Study, CognitiveState::Phone];

    /// Dataset label value
    pub fn label(&self) -> u8 {
        match self {
            CognitiveState::Study => 1,
            CognitiveState::Phone => 0,
        }
    }

    /// Map a dataset label back to a state
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            1 => Some(CognitiveState::Study),
            0 => Some(CognitiveState::Phone),
            _ => None,
        }
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            CognitiveState::Study => "Study",
            CognitiveState::Phone => "Phone",
        }
    }

    /// Attentional interpretation
    pub fn description(&self) -> &'static str {
        match self {
            CognitiveState::Study => "Focused",
            CognitiveState::Phone => "Distracted",
        }
    }
}

impl std::fmt::Display for CognitiveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for state in CognitiveState::ALL {
            assert_eq!(CognitiveState::from_label(state.label() as i64), Some(state));
        }
        assert_eq!(CognitiveState::from_label(2), None);
        assert_eq!(CognitiveState::from_label(-1), None);
    }
}
