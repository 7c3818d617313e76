//! # Operations
//!
//! The four binary operations the remote actor understands. Each has a glyph
//! for the expression line and a wire name for the actor contract.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::Multiply,
        OperationKind::Divide,
    ];

    /// Glyph shown on the keypad and in the expression line.
    pub fn symbol(self) -> &'static str {
        match self {
            OperationKind::Add => "+",
            OperationKind::Subtract => "−",
            OperationKind::Multiply => "×",
            OperationKind::Divide => "÷",
        }
    }

    /// Name used on the wire (`calculate("add")`).
    pub fn wire_name(self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Subtract => "subtract",
            OperationKind::Multiply => "multiply",
            OperationKind::Divide => "divide",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
