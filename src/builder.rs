//! Builder for configuring a mock before it is exercised

use crate::command::CommandOutput;
use crate::mock::{GetResourceFunc, MockResourceOps};
use crate::resource_key::{ResourceKey, GVK};
use crate::watch::{self, DEFAULT_EVENT_CAPACITY};
use crate::{Error, Result};
use kube::Resource;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Builder for [`MockResourceOps`]
///
/// The canned response table is fixed once `build` is called, so it never
/// needs locking while the mock is shared between tasks.
///
/// # Example
///
/// ```rust
/// use kube_mock_ops::{CommandOutput, Error, MockResourceOpsBuilder};
///
/// let ops = MockResourceOpsBuilder::new()
///     .with_output("my-app", "deployment.apps/my-app created")
///     .with_error("broken", Error::Conflict("object has been modified".into()))
///     .build()
///     .unwrap();
///
/// assert!(ops.command_output("broken").unwrap().err.is_some());
/// ```
pub struct MockResourceOpsBuilder {
    commands: HashMap<String, CommandOutput>,
    initial_objects: Vec<Value>,
    get_resource_func: Option<GetResourceFunc>,
    fixture_dir: Option<PathBuf>,
    event_capacity: usize,
}

impl MockResourceOpsBuilder {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            initial_objects: Vec::new(),
            get_resource_func: None,
            fixture_dir: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Answer every operation on objects named `name` with `output`
    pub fn with_command(mut self, name: impl Into<String>, output: CommandOutput) -> Self {
        self.commands.insert(name.into(), output);
        self
    }

    pub fn with_commands<N>(
        mut self,
        commands: impl IntoIterator<Item = (N, CommandOutput)>,
    ) -> Self
    where
        N: Into<String>,
    {
        self.commands
            .extend(commands.into_iter().map(|(name, out)| (name.into(), out)));
        self
    }

    pub fn with_output(self, name: impl Into<String>, output: impl Into<String>) -> Self {
        self.with_command(name, CommandOutput::ok(output))
    }

    pub fn with_error(self, name: impl Into<String>, err: Error) -> Self {
        self.with_command(name, CommandOutput::err(err))
    }

    /// Replace the default lookup of seeded objects in `get_resource`
    ///
    /// # Example
    ///
    /// ```rust
    /// use kube_mock_ops::{Error, MockResourceOpsBuilder};
    ///
    /// let ops = MockResourceOpsBuilder::new()
    ///     .with_get_resource_func(|gvk, name, namespace| {
    ///         Err(Error::NotFound {
    ///             kind: gvk.kind.clone(),
    ///             name: name.to_string(),
    ///             namespace: namespace.to_string(),
    ///         })
    ///     })
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn with_get_resource_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&GVK, &str, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.get_resource_func = Some(Arc::new(f));
        self
    }

    /// Seed a live object returned by `get_resource`
    ///
    /// Missing `apiVersion`/`kind` are filled in from the `Resource` impl.
    pub fn with_object<K>(mut self, obj: &K) -> Self
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        if let Ok(mut value) = serde_json::to_value(obj) {
            if let Some(map) = value.as_object_mut() {
                map.entry("apiVersion")
                    .or_insert_with(|| Value::String(K::api_version(&()).into_owned()));
                map.entry("kind")
                    .or_insert_with(|| Value::String(K::kind(&()).into_owned()));
            }
            self.initial_objects.push(value);
        }
        self
    }

    pub fn with_runtime_objects(mut self, objects: Vec<Value>) -> Self {
        self.initial_objects.extend(objects);
        self
    }

    /// Base directory for `load_fixture`
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    /// Seed live objects from a YAML file
    ///
    /// Supports multi-document files separated by `---`. Objects without a
    /// namespace are treated as cluster-scoped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a document does not parse.
    pub fn load_fixture(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let fixture_path = match &self.fixture_dir {
            Some(dir) => dir.join(path),
            None => path.as_ref().to_path_buf(),
        };

        let content = std::fs::read_to_string(&fixture_path).map_err(|e| {
            Error::Internal(format!(
                "Failed to read fixture file {:?}: {}",
                fixture_path, e
            ))
        })?;

        use serde::Deserialize;
        let mut loaded = 0;
        for document in serde_yaml::Deserializer::from_str(&content) {
            let value = Value::deserialize(document).map_err(|e| {
                Error::Internal(format!("Failed to parse YAML in {:?}: {}", fixture_path, e))
            })?;
            // Empty documents (a trailing `---`) come back as null
            if value.is_null() {
                continue;
            }
            self.initial_objects.push(value);
            loaded += 1;
        }

        debug!("Loaded {} objects from {:?}", loaded, fixture_path);
        Ok(self)
    }

    pub fn load_fixtures<P>(mut self, paths: impl IntoIterator<Item = P>) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        for path in paths {
            self = self.load_fixture(path)?;
        }
        Ok(self)
    }

    /// Capacity of the simulated watch channel
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// # Errors
    ///
    /// Returns an error if a seeded object has no kind or name, or the event
    /// capacity is zero.
    pub fn build(self) -> Result<MockResourceOps> {
        if self.event_capacity == 0 {
            return Err(Error::InvalidRequest(
                "Watch event capacity must be greater than zero".to_string(),
            ));
        }

        let mut objects = HashMap::new();
        for obj in self.initial_objects {
            let key = ResourceKey::from_object(&obj);
            if key.kind.is_empty() || key.name.is_empty() {
                return Err(Error::InvalidRequest(format!(
                    "Failed to add initial object {}: kind and metadata.name are required",
                    key
                )));
            }
            objects.insert(key, obj);
        }

        debug!(
            "Built mock with {} canned responses and {} objects",
            self.commands.len(),
            objects.len()
        );

        let (events, watch_events) = watch::channel(self.event_capacity);
        Ok(MockResourceOps::from_parts(
            self.commands,
            objects,
            self.get_resource_func,
            events,
            watch_events,
        ))
    }
}

impl Default for MockResourceOpsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
