//! Recorded invocations and canned responses

use crate::dry_run::DryRunStrategy;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Create,
    Apply,
    Replace,
    Update,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Apply => "apply",
            Command::Replace => "replace",
            Command::Update => "update",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded call and the flags it was made with.
///
/// Flags an operation does not take stay at their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredCommand {
    pub command: Command,
    pub validate: bool,
    pub server_side_apply: bool,
    pub server_side_apply_manager: String,
    pub force: bool,
    pub dry_run_strategy: DryRunStrategy,
}

impl RegisteredCommand {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            validate: false,
            server_side_apply: false,
            server_side_apply_manager: String::new(),
            force: false,
            dry_run_strategy: DryRunStrategy::None,
        }
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn server_side_apply(mut self, enabled: bool, manager: impl Into<String>) -> Self {
        self.server_side_apply = enabled;
        self.server_side_apply_manager = manager.into();
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn dry_run(mut self, strategy: DryRunStrategy) -> Self {
        self.dry_run_strategy = strategy;
        self
    }
}

/// Canned answer for every operation on a resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub output: String,
    pub err: Option<Error>,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            err: None,
        }
    }

    pub fn err(err: Error) -> Self {
        Self {
            output: String::new(),
            err: Some(err),
        }
    }

    /// Fail with `err` while still handing `output` back.
    ///
    /// The caller receives `Error::WithOutput` carrying both.
    pub fn with_err(mut self, err: Error) -> Self {
        self.err = Some(err);
        self
    }

    /// An error alone comes back unchanged; an error with output comes back
    /// as `Error::WithOutput` so the output is not lost.
    pub(crate) fn to_result(&self) -> crate::Result<String> {
        match &self.err {
            Some(err) if self.output.is_empty() => Err(err.clone()),
            Some(err) => Err(Error::WithOutput {
                output: self.output.clone(),
                source: Box::new(err.clone()),
            }),
            None => Ok(self.output.clone()),
        }
    }
}
