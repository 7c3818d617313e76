//! # Display State
//!
//! Everything the calculator shows, in one struct. No remote handles here;
//! the session owns those.
//!
//! ```text
//! DisplayState
//! ├── display: String                  // value line ("0", "12.5", "-3")
//! ├── expression: String               // history line ("7 +", "7 + 3")
//! ├── current_input: String            // last entered/edited value, for parsing
//! ├── operation: Option<OperationKind> // pending operator
//! └── phase: Phase                     // where we are in the input cycle
//! ```
//!
//! State changes only happen through `update()` / `commit()` in action.rs.

use serde::{Deserialize, Serialize};

use crate::core::operation::OperationKind;

/// Where the user is in the input cycle.
///
/// Replaces the `waiting_for_operand` + `last_action` flag pair: every legal
/// combination of the two maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Fresh session or just cleared.
    #[default]
    Start,
    /// Digits or a decimal point were entered last.
    EnteringNumber,
    /// An operator was pressed; the next digit starts a new number.
    OperatorPending,
    /// Equals was pressed; the next digit starts a new expression.
    JustEvaluated,
}

/// The most recent committed action, as seen by the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAction {
    Number,
    Operator,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub display: String,
    pub expression: String,
    pub current_input: String,
    pub operation: Option<OperationKind>,
    pub phase: Phase,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            display: String::from("0"),
            expression: String::new(),
            current_input: String::new(),
            operation: None,
            phase: Phase::Start,
        }
    }

    /// True right after an operator or equals, before the next digit.
    pub fn waiting_for_operand(&self) -> bool {
        matches!(self.phase, Phase::OperatorPending | Phase::JustEvaluated)
    }

    pub fn last_action(&self) -> Option<LastAction> {
        match self.phase {
            Phase::Start => None,
            Phase::EnteringNumber => Some(LastAction::Number),
            Phase::OperatorPending => Some(LastAction::Operator),
            Phase::JustEvaluated => Some(LastAction::Equals),
        }
    }

    /// Sets both the value line and its parse mirror.
    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.current_input.clone_from(&value);
        self.display = value;
    }

    /// The operator key that should be highlighted, if any.
    pub fn highlighted_operation(&self) -> Option<OperationKind> {
        self.operation
            .filter(|_| self.phase == Phase::OperatorPending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = DisplayState::new();
        assert_eq!(state.display, "0");
        assert!(state.expression.is_empty());
        assert!(state.current_input.is_empty());
        assert_eq!(state.operation, None);
        assert!(!state.waiting_for_operand());
        assert_eq!(state.last_action(), None);
    }

    #[test]
    fn test_phase_derives_flags() {
        let mut state = DisplayState::new();

        state.phase = Phase::EnteringNumber;
        assert!(!state.waiting_for_operand());
        assert_eq!(state.last_action(), Some(LastAction::Number));

        state.phase = Phase::OperatorPending;
        assert!(state.waiting_for_operand());
        assert_eq!(state.last_action(), Some(LastAction::Operator));

        state.phase = Phase::JustEvaluated;
        assert!(state.waiting_for_operand());
        assert_eq!(state.last_action(), Some(LastAction::Equals));
    }

    #[test]
    fn test_highlight_only_while_operator_pending() {
        let mut state = DisplayState::new();
        state.operation = Some(OperationKind::Divide);
        state.phase = Phase::OperatorPending;
        assert_eq!(state.highlighted_operation(), Some(OperationKind::Divide));

        state.phase = Phase::EnteringNumber;
        assert_eq!(state.highlighted_operation(), None);
    }
}
