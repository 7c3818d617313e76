//! # Actions
//!
//! Every keypad press becomes an `Action`.
//! User presses `7`? That's `Action::Digit(Digit::SEVEN)`.
//! User presses `+`? That's `Action::Operator(OperationKind::Add)`.
//!
//! `update()` takes the current state and an action. Local actions (digits,
//! backspace, sign, percent) are applied in place and return `Effect::None`.
//! Actions that need the remote actor leave the state untouched and return
//! `Effect::Remote(plan)`; the session runs the plan and then calls the
//! matching `commit_*` function with the results.
//!
//! ```text
//! State + Action  →  update()  →  Effect::None            (done)
//!                              →  Effect::Remote(plan)    → session awaits calls
//!                                                         → commit_*(state, results)
//! ```
//!
//! No I/O here, so every transition is a plain `assert_eq!` away from a test.

use log::debug;

use crate::core::numeral::{format_number, parse_numeral};
use crate::core::operation::OperationKind;
use crate::core::state::{DisplayState, Phase};

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Digit(Digit),
    Decimal,
    Backspace,
    ToggleSign,
    Percentage,
    Operator(OperationKind),
    Equals,
    Clear,
}

impl Action {
    /// Whether this action talks to the remote actor.
    pub fn is_remote(&self) -> bool {
        matches!(self, Action::Operator(_) | Action::Equals | Action::Clear)
    }
}

/// Remote work an action needs before its result can be committed.
///
/// Calls are issued in the order they are listed: the submission always
/// completes before any application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemotePlan {
    /// Submit `value`; if `chain` is set, apply that previous operation too.
    /// Then `next` becomes the pending operation.
    Operator {
        value: f64,
        chain: Option<OperationKind>,
        next: OperationKind,
    },
    /// Submit `value`, then apply `operation`.
    Equals { value: f64, operation: OperationKind },
    /// Clear the remote accumulator, then reset locally.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    Remote(RemotePlan),
}

pub fn update(state: &mut DisplayState, action: Action) -> Effect {
    match action {
        Action::Digit(digit) => {
            input_digit(state, digit);
            Effect::None
        }
        Action::Decimal => {
            input_decimal(state);
            Effect::None
        }
        Action::Backspace => {
            backspace(state);
            Effect::None
        }
        Action::ToggleSign => {
            toggle_sign(state);
            Effect::None
        }
        Action::Percentage => {
            percentage(state);
            Effect::None
        }
        Action::Operator(op) => plan_operator(state, op),
        Action::Equals => plan_equals(state),
        Action::Clear => Effect::Remote(RemotePlan::Clear),
    }
}

fn input_digit(state: &mut DisplayState, digit: Digit) {
    let d = digit.as_char();
    if state.waiting_for_operand() {
        if state.phase == Phase::JustEvaluated {
            state.expression.clear();
        }
        state.set_value(d.to_string());
    } else if state.display == "0" {
        state.set_value(d.to_string());
    } else {
        let next = format!("{}{d}", state.display);
        state.set_value(next);
    }
    state.phase = Phase::EnteringNumber;
}

fn input_decimal(state: &mut DisplayState) {
    if state.waiting_for_operand() {
        if state.phase == Phase::JustEvaluated {
            state.expression.clear();
        }
        state.set_value("0.");
    } else if !state.display.contains('.') {
        let next = format!("{}.", state.display);
        state.set_value(next);
    }
    state.phase = Phase::EnteringNumber;
}

fn backspace(state: &mut DisplayState) {
    let mut next = state.display.clone();
    if next.chars().count() > 1 {
        next.pop();
        state.set_value(next);
    } else {
        state.set_value("0");
    }
}

fn toggle_sign(state: &mut DisplayState) {
    // Zero is a fixed point; "-0" never shows up.
    if let Ok(value) = parse_numeral(&state.display)
        && value != 0.0
    {
        state.set_value(format_number(-value));
    }
}

fn percentage(state: &mut DisplayState) {
    if let Ok(value) = parse_numeral(&state.display) {
        state.set_value(format_number(value / 100.0));
    }
}

fn plan_operator(state: &DisplayState, next: OperationKind) -> Effect {
    let source = if state.current_input.is_empty() {
        &state.display
    } else {
        &state.current_input
    };
    let value = match parse_numeral(source) {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring operator {next}: {e}");
            return Effect::None;
        }
    };

    // Chaining: a second operator after a fresh operand applies the previous one first.
    let chain = match state.phase {
        Phase::JustEvaluated => None,
        _ if state.waiting_for_operand() => None,
        _ => state.operation,
    };

    Effect::Remote(RemotePlan::Operator { value, chain, next })
}

fn plan_equals(state: &DisplayState) -> Effect {
    let Some(operation) = state.operation else {
        debug!("Ignoring equals: no pending operation");
        return Effect::None;
    };
    if state.current_input.is_empty() {
        debug!("Ignoring equals: no operand entered");
        return Effect::None;
    }
    match parse_numeral(&state.current_input) {
        Ok(value) => Effect::Remote(RemotePlan::Equals { value, operation }),
        Err(e) => {
            debug!("Ignoring equals: {e}");
            Effect::None
        }
    }
}

/// Applies a completed `RemotePlan::Operator`.
///
/// `chained` is the actor's result when the plan applied a previous operation.
pub fn commit_operator(state: &mut DisplayState, next: OperationKind, chained: Option<f64>) {
    let symbol = next.symbol();
    match chained {
        Some(result) => {
            let rendered = format_number(result);
            state.expression = format!("{rendered} {symbol}");
            state.display = rendered;
        }
        None => {
            state.expression = format!("{} {symbol}", state.display);
        }
    }
    state.operation = Some(next);
    state.phase = Phase::OperatorPending;
}

/// Applies a completed `RemotePlan::Equals`.
pub fn commit_equals(state: &mut DisplayState, result: f64) {
    state.expression = format!("{} {}", state.expression, state.display);
    state.set_value(format_number(result));
    state.operation = None;
    state.phase = Phase::JustEvaluated;
}

/// Back to the freshly mounted state.
pub fn reset(state: &mut DisplayState) {
    *state = DisplayState::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(c: char) -> Action {
        Action::Digit(Digit::from_char(c).unwrap())
    }

    fn press_all(state: &mut DisplayState, keys: &str) {
        for c in keys.chars() {
            let action = match c {
                '.' => Action::Decimal,
                '<' => Action::Backspace,
                '~' => Action::ToggleSign,
                '%' => Action::Percentage,
                _ => digit(c),
            };
            assert_eq!(update(state, action), Effect::None);
        }
    }

    #[test]
    fn test_digit_new_rejects_out_of_range() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert!(Digit::from_char('x').is_none());
        assert_eq!(Digit::new(4).unwrap().as_char(), '4');
    }

    #[test]
    fn test_digits_concatenate() {
        let mut state = DisplayState::new();
        press_all(&mut state, "123");
        assert_eq!(state.display, "123");
        assert_eq!(state.current_input, "123");
        assert_eq!(state.phase, Phase::EnteringNumber);
    }

    #[test]
    fn test_leading_zero_suppressed() {
        let mut state = DisplayState::new();
        press_all(&mut state, "007");
        assert_eq!(state.display, "7");
    }

    #[test]
    fn test_second_decimal_is_noop() {
        let mut state = DisplayState::new();
        press_all(&mut state, "1.5.");
        assert_eq!(state.display, "1.5");
        press_all(&mut state, ".");
        assert_eq!(state.display.matches('.').count(), 1);
    }

    #[test]
    fn test_decimal_from_start() {
        let mut state = DisplayState::new();
        press_all(&mut state, ".");
        assert_eq!(state.display, "0.");
        assert_eq!(state.phase, Phase::EnteringNumber);
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let mut state = DisplayState::new();
        press_all(&mut state, "8");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, ".");
        assert_eq!(state.display, "0.");
        assert_eq!(state.current_input, "0.");
        assert_eq!(state.expression, "8 +");
        assert!(!state.waiting_for_operand());
    }

    #[test]
    fn test_decimal_after_equals_starts_fresh() {
        let mut state = DisplayState::new();
        press_all(&mut state, "7");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, "3");
        commit_equals(&mut state, 10.0);
        assert_eq!(state.expression, "7 + 3");

        press_all(&mut state, ".");
        assert_eq!(state.display, "0.");
        assert_eq!(state.current_input, "0.");
        assert_eq!(state.expression, "");
        assert_eq!(state.phase, Phase::EnteringNumber);
    }

    #[test]
    fn test_nan_display_plans_nothing() {
        let mut state = DisplayState::new();
        state.set_value("NaN");
        state.phase = Phase::JustEvaluated;
        let before = state.clone();

        assert_eq!(
            update(&mut state, Action::Operator(OperationKind::Add)),
            Effect::None
        );
        assert_eq!(state, before);

        let mut state = DisplayState::new();
        press_all(&mut state, "4");
        commit_operator(&mut state, OperationKind::Subtract, None);
        state.set_value("NaN");
        state.phase = Phase::EnteringNumber;
        assert_eq!(update(&mut state, Action::Equals), Effect::None);
    }

    #[test]
    fn test_toggle_sign() {
        let mut state = DisplayState::new();
        press_all(&mut state, "5~");
        assert_eq!(state.display, "-5");
        press_all(&mut state, "~");
        assert_eq!(state.display, "5");
    }

    #[test]
    fn test_toggle_sign_zero_is_fixed_point() {
        let mut state = DisplayState::new();
        press_all(&mut state, "~");
        assert_eq!(state.display, "0");
    }

    #[test]
    fn test_percentage() {
        let mut state = DisplayState::new();
        press_all(&mut state, "50%");
        assert_eq!(state.display, "0.5");
        assert_eq!(state.current_input, "0.5");
    }

    #[test]
    fn test_backspace() {
        let mut state = DisplayState::new();
        press_all(&mut state, "9<");
        assert_eq!(state.display, "0");

        let mut state = DisplayState::new();
        press_all(&mut state, "42<");
        assert_eq!(state.display, "4");
        assert_eq!(state.current_input, "4");
    }

    #[test]
    fn test_backspace_leaves_bare_sign_unparseable() {
        let mut state = DisplayState::new();
        press_all(&mut state, "5~<");
        assert_eq!(state.display, "-");
        // Operator on an unparseable value does nothing
        assert_eq!(
            update(&mut state, Action::Operator(OperationKind::Add)),
            Effect::None
        );
        assert_eq!(state.display, "-");
    }

    #[test]
    fn test_operator_plans_submission_without_touching_state() {
        let mut state = DisplayState::new();
        press_all(&mut state, "7");
        let before = state.clone();
        let effect = update(&mut state, Action::Operator(OperationKind::Add));
        assert_eq!(
            effect,
            Effect::Remote(RemotePlan::Operator {
                value: 7.0,
                chain: None,
                next: OperationKind::Add,
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_operator_falls_back_to_display() {
        let mut state = DisplayState::new();
        let effect = update(&mut state, Action::Operator(OperationKind::Multiply));
        assert_eq!(
            effect,
            Effect::Remote(RemotePlan::Operator {
                value: 0.0,
                chain: None,
                next: OperationKind::Multiply,
            })
        );
    }

    #[test]
    fn test_second_operator_after_operand_chains() {
        let mut state = DisplayState::new();
        press_all(&mut state, "5");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, "2");

        let effect = update(&mut state, Action::Operator(OperationKind::Subtract));
        assert_eq!(
            effect,
            Effect::Remote(RemotePlan::Operator {
                value: 2.0,
                chain: Some(OperationKind::Add),
                next: OperationKind::Subtract,
            })
        );

        commit_operator(&mut state, OperationKind::Subtract, Some(7.0));
        assert_eq!(state.display, "7");
        assert_eq!(state.expression, "7 −");
        assert_eq!(state.operation, Some(OperationKind::Subtract));
        assert_eq!(state.phase, Phase::OperatorPending);
    }

    #[test]
    fn test_repeated_operator_does_not_chain() {
        let mut state = DisplayState::new();
        press_all(&mut state, "5");
        commit_operator(&mut state, OperationKind::Add, None);
        let effect = update(&mut state, Action::Operator(OperationKind::Multiply));
        assert!(matches!(
            effect,
            Effect::Remote(RemotePlan::Operator { chain: None, .. })
        ));
    }

    #[test]
    fn test_equals_requires_pending_operation() {
        let mut state = DisplayState::new();
        press_all(&mut state, "3");
        assert_eq!(update(&mut state, Action::Equals), Effect::None);
    }

    #[test]
    fn test_equals_requires_operand() {
        let mut state = DisplayState::new();
        state.operation = Some(OperationKind::Add);
        assert_eq!(update(&mut state, Action::Equals), Effect::None);
    }

    #[test]
    fn test_equals_commit() {
        let mut state = DisplayState::new();
        press_all(&mut state, "7");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, "3");

        let effect = update(&mut state, Action::Equals);
        assert_eq!(
            effect,
            Effect::Remote(RemotePlan::Equals {
                value: 3.0,
                operation: OperationKind::Add,
            })
        );

        commit_equals(&mut state, 10.0);
        assert_eq!(state.display, "10");
        assert_eq!(state.current_input, "10");
        assert_eq!(state.expression, "7 + 3");
        assert_eq!(state.operation, None);
        assert_eq!(state.phase, Phase::JustEvaluated);
        assert!(state.waiting_for_operand());
    }

    #[test]
    fn test_digit_after_equals_clears_expression() {
        let mut state = DisplayState::new();
        press_all(&mut state, "7");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, "3");
        commit_equals(&mut state, 10.0);

        press_all(&mut state, "4");
        assert_eq!(state.display, "4");
        assert!(state.expression.is_empty());
    }

    #[test]
    fn test_operator_after_equals_starts_new_expression() {
        let mut state = DisplayState::new();
        press_all(&mut state, "7");
        commit_operator(&mut state, OperationKind::Add, None);
        press_all(&mut state, "3");
        commit_equals(&mut state, 10.0);

        let effect = update(&mut state, Action::Operator(OperationKind::Divide));
        assert_eq!(
            effect,
            Effect::Remote(RemotePlan::Operator {
                value: 10.0,
                chain: None,
                next: OperationKind::Divide,
            })
        );
        commit_operator(&mut state, OperationKind::Divide, None);
        assert_eq!(state.expression, "10 ÷");
    }

    #[test]
    fn test_clear_plans_remote_and_reset_restores_initial() {
        let mut state = DisplayState::new();
        press_all(&mut state, "12");
        assert_eq!(update(&mut state, Action::Clear), Effect::Remote(RemotePlan::Clear));
        reset(&mut state);
        assert_eq!(state, DisplayState::new());
        reset(&mut state);
        assert_eq!(state, DisplayState::new());
    }

    #[test]
    fn test_is_remote() {
        assert!(Action::Clear.is_remote());
        assert!(Action::Equals.is_remote());
        assert!(Action::Operator(OperationKind::Add).is_remote());
        assert!(!Action::Backspace.is_remote());
        assert!(!digit('1').is_remote());
    }
}
