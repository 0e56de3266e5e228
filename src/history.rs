//! Per-resource command history shared between concurrent callers

use crate::command::RegisteredCommand;
use crate::resource_key::ResourceKey;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

type CommandsPerResource = HashMap<ResourceKey, Vec<RegisteredCommand>>;

/// Append-only history of commands, grouped by resource key.
///
/// Writers take the lock exclusively, every reader takes it shared. A
/// key's sequence is never reordered or truncated.
#[derive(Debug, Default)]
pub struct CommandHistory {
    commands: RwLock<CommandsPerResource>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, key: ResourceKey, command: RegisteredCommand) {
        trace!("Recording {} for {}", command.command, key);
        self.write().entry(key).or_default().push(command);
    }

    /// Most recent command for `key`, `None` if nothing was recorded for it.
    pub fn last(&self, key: &ResourceKey) -> Option<RegisteredCommand> {
        self.read().get(key).and_then(|cmds| cmds.last()).cloned()
    }

    /// Read a single field of the most recent command without cloning the rest.
    pub fn last_with<T>(
        &self,
        key: &ResourceKey,
        f: impl FnOnce(&RegisteredCommand) -> T,
    ) -> Option<T> {
        self.read().get(key).and_then(|cmds| cmds.last()).map(f)
    }

    pub fn commands(&self, key: &ResourceKey) -> Vec<RegisteredCommand> {
        self.read().get(key).cloned().unwrap_or_default()
    }

    pub fn len(&self, key: &ResourceKey) -> usize {
        self.read().get(key).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn keys(&self) -> Vec<ResourceKey> {
        let mut keys: Vec<_> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    // Poisoned locks are still read: records survive a panicking test thread.
    fn read(&self) -> RwLockReadGuard<'_, CommandsPerResource> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CommandsPerResource> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }
}
