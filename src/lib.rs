//! Recording mock of the resource operations used by Kubernetes sync engines.
//!
//! [`MockResourceOps`] stands in for the component that creates, applies,
//! replaces and updates unstructured objects against a cluster. Nothing is
//! sent anywhere: each call is recorded under its [`ResourceKey`] together
//! with the flags it was made with, and answered from a table of canned
//! responses keyed by object name.
//!
//! # Examples
//!
//! ## Asserting on recorded calls
//!
//! ```rust
//! use kube_mock_ops::{Command, DryRunStrategy, MockResourceOps, ResourceKey, ResourceOperations};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ops = MockResourceOps::new();
//! let deployment = json!({
//!     "apiVersion": "apps/v1",
//!     "kind": "Deployment",
//!     "metadata": { "name": "web", "namespace": "default" }
//! });
//!
//! ops.apply_resource(&deployment, DryRunStrategy::Server, false, true, true, "argocd", false)
//!     .await?;
//!
//! let key = ResourceKey::new("apps", "Deployment", "default", "web");
//! assert_eq!(ops.last_resource_command(&key), Some(Command::Apply));
//! assert_eq!(ops.last_server_side_apply_manager(&key).as_deref(), Some("argocd"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Injecting failures
//!
//! ```rust
//! use kube_mock_ops::{DryRunStrategy, Error, MockResourceOps, ResourceOperations};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let ops = MockResourceOps::builder()
//!     .with_error("web", Error::Conflict("the object has been modified".into()))
//!     .build()
//!     .unwrap();
//!
//! let deployment = json!({
//!     "apiVersion": "apps/v1",
//!     "kind": "Deployment",
//!     "metadata": { "name": "web", "namespace": "default" }
//! });
//!
//! let err = ops
//!     .replace_resource(&deployment, DryRunStrategy::None, true)
//!     .await
//!     .unwrap_err();
//! assert!(matches!(err, Error::Conflict(_)));
//! # }
//! ```

mod builder;
mod command;
mod dry_run;
mod error;
mod history;
mod mock;
mod ops;
mod resource_key;
pub mod watch;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod resource_key_test;

pub use builder::MockResourceOpsBuilder;
pub use command::{Command, CommandOutput, RegisteredCommand};
pub use dry_run::DryRunStrategy;
pub use error::{Error, Result};
pub use history::CommandHistory;
pub use kube::api::WatchEvent;
pub use mock::{GetResourceFunc, MockResourceOps};
pub use ops::ResourceOperations;
pub use resource_key::{ResourceKey, GVK};
pub use watch::{WatchEventSender, WatchEvents};
