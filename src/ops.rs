//! The resource operations a sync engine drives

use crate::dry_run::DryRunStrategy;
use crate::resource_key::GVK;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Mutating operations on unstructured objects, plus a version-aware get.
///
/// Create, apply and replace answer with the kubectl-style output text.
#[async_trait]
pub trait ResourceOperations: Send + Sync {
    async fn create_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        validate: bool,
    ) -> Result<String>;

    #[allow(clippy::too_many_arguments)]
    async fn apply_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        force: bool,
        validate: bool,
        server_side_apply: bool,
        manager: &str,
        server_side_diff: bool,
    ) -> Result<String>;

    async fn replace_resource(
        &self,
        obj: &Value,
        dry_run_strategy: DryRunStrategy,
        force: bool,
    ) -> Result<String>;

    async fn update_resource(&self, obj: &Value, dry_run_strategy: DryRunStrategy)
        -> Result<Value>;

    /// Fetch the live object as `gvk`
    async fn get_resource(&self, gvk: &GVK, name: &str, namespace: &str) -> Result<Value>;
}
