//! Recording mock of [`ResourceOperations`]

use crate::builder::MockResourceOpsBuilder;
use crate::command::{Command, CommandOutput, RegisteredCommand};
use crate::dry_run::DryRunStrategy;
use crate::history::CommandHistory;
use crate::ops::ResourceOperations;
use crate::resource_key::{object_name, ResourceKey, GVK};
use crate::watch::{self, WatchEventSender, WatchEvents, DEFAULT_EVENT_CAPACITY};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// Replacement for the default get behavior: `(gvk, name, namespace)` to the live object
pub type GetResourceFunc = Arc<dyn Fn(&GVK, &str, &str) -> Result<Value> + Send + Sync>;

/// Records every call it receives and answers from a canned response table.
///
/// Responses are looked up by object name only, so objects of different
/// kinds or namespaces that share a name share a response.
///
/// # Example
///
/// ```rust
/// use kube_mock_ops::{CommandOutput, DryRunStrategy, MockResourceOps, ResourceKey, ResourceOperations};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ops = MockResourceOps::builder()
///     .with_command("foo", CommandOutput::ok("created"))
///     .build()?;
///
/// let obj = json!({
///     "apiVersion": "v1",
///     "kind": "ConfigMap",
///     "metadata": { "name": "foo", "namespace": "default" }
/// });
///
/// let out = ops.create_resource(&obj, DryRunStrategy::None, true).await?;
/// assert_eq!(out, "created");
///
/// let key = ResourceKey::new("", "ConfigMap", "default", "foo");
/// assert_eq!(ops.last_validate(&key), Some(true));
/// # Ok(())
/// # }
/// ```
pub struct MockResourceOps {
    commands: HashMap<String, CommandOutput>,
    history: CommandHistory,
    objects: HashMap<ResourceKey, Value>,
    get_resource_func: Option<GetResourceFunc>,
    events: WatchEventSender,
    watch_events: Mutex<Option<WatchEvents>>,
}

impl MockResourceOps {
    /// Mock with no canned responses: every call succeeds with an empty answer
    pub fn new() -> Self {
        let (events, watch_events) = watch::channel(DEFAULT_EVENT_CAPACITY);
        Self::from_parts(HashMap::new(), HashMap::new(), None, events, watch_events)
    }

    pub fn builder() -> MockResourceOpsBuilder {
        MockResourceOpsBuilder::new()
    }

    pub(crate) fn from_parts(
        commands: HashMap<String, CommandOutput>,
        objects: HashMap<ResourceKey, Value>,
        get_resource_func: Option<GetResourceFunc>,
        events: WatchEventSender,
        watch_events: WatchEvents,
    ) -> Self {
        Self {
            commands,
            history: CommandHistory::new(),
            objects,
            get_resource_func,
            events,
            watch_events: Mutex::new(Some(watch_events)),
        }
    }

    /// Override how `get_resource` resolves live objects
    pub fn with_get_resource_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&GVK, &str, &str) -> Result<Value> + Send + Sync + 'static,
    {
        debug!("Overriding get resource function");
        self.get_resource_func = Some(Arc::new(f));
        self
    }

    /// Canned response configured for `name`
    pub fn command_output(&self, name: &str) -> Option<&CommandOutput> {
        self.commands.get(name)
    }

    /// Sender for feeding events into the simulated watch stream
    pub fn events(&self) -> WatchEventSender {
        self.events.clone()
    }

    /// Take the receiving side of the watch stream; only the first call gets it
    pub fn take_watch_events(&self) -> Option<WatchEvents> {
        self.watch_events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn last_validate(&self, key: &ResourceKey) -> Option<bool> {
        self.history.last_with(key, |cmd| cmd.validate)
    }

    pub fn last_server_side_apply(&self, key: &ResourceKey) -> Option<bool> {
        self.history.last_with(key, |cmd| cmd.server_side_apply)
    }

    pub fn last_server_side_apply_manager(&self, key: &ResourceKey) -> Option<String> {
        self.history.last_with(key, |cmd| cmd.server_side_apply_manager.clone())
    }

    pub fn last_force(&self, key: &ResourceKey) -> Option<bool> {
        self.history.last_with(key, |cmd| cmd.force)
    }

    pub fn last_dry_run_strategy(&self, key: &ResourceKey) -> Option<DryRunStrategy> {
        self.history.last_with(key, |cmd| cmd.dry_run_strategy)
    }

    pub fn last_resource_command(&self, key: &ResourceKey) -> Option<Command> {
        self.history.last_with(key, |cmd| cmd.command)
    }

    pub fn last_command(&self, key: &ResourceKey) -> Option<RegisteredCommand> {
        self.history.last(key)
    }

    /// Every command recorded for `key`, oldest first
    pub fn registered_commands(&self, key: &ResourceKey) -> Vec<RegisteredCommand> {
        self.history.commands(key)
    }

    /// Keys with at least one recorded command, sorted
    pub fn recorded_keys(&self) -> Vec<ResourceKey> {
        self.history.keys()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    fn register_command(&self, obj: &Value, command: RegisteredCommand) {
        self.history.record(ResourceKey::from_object(obj), command);
    }

    fn canned(&self, obj: &Value) -> Option<&CommandOutput> {
        let name = object_name(obj);
        let canned = self.commands.get(name);
        if canned.is_some() {
            debug!("Using canned response for {}", name);
        }
        canned
    }

    fn respond(&self, obj: &Value) -> Result<String> {
        match self.canned(obj) {
            Some(canned) => canned.to_result(),
            None => Ok(String::new()),
        }
    }
}

impl Default for MockResourceOps {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceOperations for MockResourceOps {
    async fn create_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        validate: bool,
    ) -> Result<String> {
        self.register_command(
            obj,
            RegisteredCommand::new(Command::Create)
                .validate(validate)
                .dry_run(dry_run_strategy),
        );
        self.respond(obj)
    }

    async fn apply_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        force: bool,
        validate: bool,
        server_side_apply: bool,
        manager: &str,
        _server_side_diff: bool,
    ) -> Result<String> {
        self.register_command(
            obj,
            RegisteredCommand::new(Command::Apply)
                .validate(validate)
                .server_side_apply(server_side_apply, manager)
                .force(force)
                .dry_run(dry_run_strategy),
        );
        self.respond(obj)
    }

    async fn replace_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        force: bool,
    ) -> Result<String> {
        self.register_command(
            obj,
            RegisteredCommand::new(Command::Replace)
                .force(force)
                .dry_run(dry_run_strategy),
        );
        self.respond(obj)
    }

    async fn update_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
    ) -> Result<Value> {
        self.register_command(
            obj,
            RegisteredCommand::new(Command::Update).dry_run(dry_run_strategy),
        );
        // Update echoes the object back, only a canned error changes the outcome
        match self.canned(obj).and_then(|canned| canned.err.clone()) {
            Some(err) => Err(err),
            None => Ok(obj.clone()),
        }
    }

    async fn get_resource(&self, gvk: &GVK, name: &str, namespace: &str) -> Result<Value> {
        if let Some(f) = &self.get_resource_func {
            trace!("Getting {:?} {}/{} through override", gvk, namespace, name);
            return f(gvk, name, namespace);
        }

        trace!("Getting {:?} {}/{}", gvk, namespace, name);
        let key = ResourceKey::new(&gvk.group, &gvk.kind, namespace, name);
        let mut obj = self
            .objects
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: gvk.kind.clone(),
                name: name.to_string(),
                namespace: namespace.to_string(),
            })?;
        obj["apiVersion"] = Value::String(gvk.api_version());
        Ok(obj)
    }
}
