#[cfg(test)]
mod tests {
    use crate::builder::*;
    use crate::command::CommandOutput;
    use crate::ops::ResourceOperations;
    use crate::resource_key::GVK;
    use crate::Error;
    use k8s_openapi::api::core::v1::ConfigMap;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_with_commands_populates_table() {
        let ops = MockResourceOpsBuilder::new()
            .with_commands([
                ("web", CommandOutput::ok("deployment.apps/web created")),
                (
                    "api",
                    CommandOutput::err(Error::Internal("exit status 1".to_string())),
                ),
            ])
            .with_output("db", "statefulset.apps/db created")
            .build()
            .unwrap();

        assert_eq!(
            ops.command_output("web").unwrap().output,
            "deployment.apps/web created"
        );
        assert!(ops.command_output("api").unwrap().err.is_some());
        assert!(ops.command_output("db").is_some());
        assert!(ops.command_output("cache").is_none());
    }

    #[test]
    fn test_later_command_replaces_earlier() {
        let ops = MockResourceOpsBuilder::new()
            .with_output("web", "first")
            .with_output("web", "second")
            .build()
            .unwrap();

        assert_eq!(ops.command_output("web").unwrap().output, "second");
    }

    #[test]
    fn test_build_rejects_object_without_key() {
        let result = MockResourceOpsBuilder::new()
            .with_runtime_objects(vec![json!({ "apiVersion": "v1", "kind": "Pod", "metadata": {} })])
            .build();

        if let Err(Error::InvalidRequest(msg)) = result {
            assert!(msg.contains("Failed to add initial object"));
            assert!(msg.contains("metadata.name"));
        } else {
            panic!("expected InvalidRequest");
        }
    }

    #[test]
    fn test_build_rejects_zero_event_capacity() {
        let result = MockResourceOpsBuilder::new().with_event_capacity(0).build();
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_with_typed_object() {
        let mut cm = ConfigMap::default();
        cm.metadata.name = Some("settings".to_string());
        cm.metadata.namespace = Some("default".to_string());
        cm.data = Some(BTreeMap::from([("mode".to_string(), "sync".to_string())]));

        let ops = MockResourceOpsBuilder::new()
            .with_object(&cm)
            .build()
            .unwrap();

        let got = ops
            .get_resource(&GVK::new("", "v1", "ConfigMap"), "settings", "default")
            .await
            .unwrap();
        assert_eq!(got["kind"], "ConfigMap");
        assert_eq!(got["data"]["mode"], "sync");
    }

    #[tokio::test]
    async fn test_load_fixture_single_document() {
        let ops = MockResourceOpsBuilder::new()
            .with_fixture_dir("fixtures")
            .load_fixture("deployment.yaml")
            .unwrap()
            .build()
            .unwrap();

        let got = ops
            .get_resource(&GVK::new("apps", "v1", "Deployment"), "web", "default")
            .await
            .unwrap();
        assert_eq!(got["spec"]["replicas"], 2);
    }

    #[tokio::test]
    async fn test_load_fixture_multi_document() {
        let ops = MockResourceOpsBuilder::new()
            .with_fixture_dir("fixtures")
            .load_fixture("cluster.yaml")
            .unwrap()
            .build()
            .unwrap();

        // Namespace has no namespace of its own
        let ns = ops
            .get_resource(&GVK::new("", "v1", "Namespace"), "team-a", "")
            .await
            .unwrap();
        assert_eq!(ns["metadata"]["name"], "team-a");

        let cm = ops
            .get_resource(&GVK::new("", "v1", "ConfigMap"), "settings", "team-a")
            .await
            .unwrap();
        assert_eq!(cm["data"]["mode"], "sync");
    }

    #[tokio::test]
    async fn test_load_fixtures() {
        let ops = MockResourceOpsBuilder::new()
            .with_fixture_dir("fixtures")
            .load_fixtures(["deployment.yaml", "cluster.yaml"])
            .unwrap()
            .build()
            .unwrap();

        assert!(ops
            .get_resource(&GVK::new("apps", "v1", "Deployment"), "web", "default")
            .await
            .is_ok());
        assert!(ops
            .get_resource(&GVK::new("", "v1", "ConfigMap"), "settings", "team-a")
            .await
            .is_ok());
    }

    #[test]
    fn test_load_fixture_missing_file() {
        let result = MockResourceOpsBuilder::new()
            .with_fixture_dir("fixtures")
            .load_fixture("nonexistent.yaml");

        assert!(matches!(result, Err(Error::Internal(ref msg)) if msg.contains("nonexistent.yaml")));
    }
}
