//! Driving a small sync loop against the recording mock
//!
//! The `Syncer` below only knows about `ResourceOperations`. In production it
//! would be handed a real implementation; here it gets the mock, and the
//! recorded history is inspected afterwards.

use kube_mock_ops::{
    DryRunStrategy, Error, MockResourceOps, ResourceKey, ResourceOperations, WatchEvent,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct Syncer {
    ops: Arc<dyn ResourceOperations>,
    manager: String,
}

impl Syncer {
    /// Dry-run every manifest on the server, then apply the ones that passed
    async fn sync(&self, manifests: &[Value]) -> Vec<(String, Result<String, Error>)> {
        let mut results = Vec::new();
        for manifest in manifests {
            let name = manifest["metadata"]["name"]
                .as_str()
                .unwrap_or_default()
                .to_string();

            let dry_run = self
                .ops
                .apply_resource(
                    manifest,
                    DryRunStrategy::Server,
                    false,
                    true,
                    true,
                    &self.manager,
                    false,
                )
                .await;
            if let Err(e) = dry_run {
                results.push((name, Err(e)));
                continue;
            }

            let applied = self
                .ops
                .apply_resource(
                    manifest,
                    DryRunStrategy::None,
                    false,
                    true,
                    true,
                    &self.manager,
                    false,
                )
                .await;
            results.push((name, applied));
        }
        results
    }
}

fn deployment(name: &str) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": name, "namespace": "default" },
        "spec": { "replicas": 1 }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ops = Arc::new(
        MockResourceOps::builder()
            .with_output("web", "deployment.apps/web serverside-applied")
            .with_error(
                "broken",
                Error::InvalidRequest("spec.replicas: Invalid value: -1".to_string()),
            )
            .build()?,
    );

    let mut watch = ops.take_watch_events().ok_or("watch stream already taken")?;
    let syncer = Syncer {
        ops: ops.clone(),
        manager: "demo-controller".to_string(),
    };

    let manifests = [deployment("web"), deployment("broken"), deployment("api")];
    for (name, result) in syncer.sync(&manifests).await {
        match result {
            Ok(out) if out.is_empty() => println!("{}: applied", name),
            Ok(out) => println!("{}: {}", name, out),
            Err(e) => println!("{}: failed: {}", name, e),
        }
    }

    for name in ["web", "broken", "api"] {
        let key = ResourceKey::new("apps", "Deployment", "default", name);
        let commands: Vec<_> = ops
            .registered_commands(&key)
            .iter()
            .map(|c| format!("{}(dry-run={})", c.command, c.dry_run_strategy))
            .collect();
        println!("{} -> [{}]", key, commands.join(", "));
    }

    // The watch stream only carries what the test puts on it
    ops.events().modified(deployment("web")).await?;
    if let Some(WatchEvent::Modified(obj)) = watch.recv().await {
        println!("watch: modified {}", obj["metadata"]["name"]);
    }

    Ok(())
}
