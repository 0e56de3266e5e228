use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far a mutating request goes before it is discarded.
///
/// Mirrors kubectl's `--dry-run` flag values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DryRunStrategy {
    /// Persist the change
    #[default]
    None,
    /// Evaluate locally, never sent to the server
    Client,
    /// Sent to the server, which validates and discards it
    Server,
}

impl DryRunStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DryRunStrategy::None => "none",
            DryRunStrategy::Client => "client",
            DryRunStrategy::Server => "server",
        }
    }

    pub fn is_dry_run(&self) -> bool {
        !matches!(self, DryRunStrategy::None)
    }
}

impl fmt::Display for DryRunStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DryRunStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "none" => Ok(DryRunStrategy::None),
            "client" => Ok(DryRunStrategy::Client),
            "server" => Ok(DryRunStrategy::Server),
            other => Err(Error::InvalidRequest(format!(
                "Invalid dry-run value {:?}, must be one of none, client, server",
                other
            ))),
        }
    }
}
