//! Classification of how a navigation was initiated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a transition came about.
///
/// `Push` and `Replace` are only produced by the engine's own operations.
/// Everything else (back/forward buttons, hash edits, `go`) surfaces as `Pop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Push,
    Replace,
    /// Also the action reported for the initial location.
    #[default]
    Pop,
}

impl Action {
    /// Name used in logs and in the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
            Self::Pop => "POP",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_action_is_pop() {
        assert_eq!(Action::default(), Action::Pop);
    }

    #[test]
    fn action_serializes_uppercase() {
        let json = serde_json::to_string(&Action::Replace).unwrap();
        assert_eq!(json, "\"REPLACE\"");

        let action: Action = serde_json::from_str("\"PUSH\"").unwrap();
        assert_eq!(action, Action::Push);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Action::Pop.to_string(), "POP");
        assert_eq!(Action::Push.to_string(), Action::Push.name());
    }
}
