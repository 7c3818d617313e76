//! Abacus library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod remote;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Where the calculator actor lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process actor, no network
    #[default]
    Local,
    /// HTTP calculator server
    Remote,
}
