#[cfg(test)]
mod tests {
    use crate::resource_key::*;
    use crate::Error;
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::Namespace;
    use serde_json::json;

    #[test]
    fn test_key_from_core_object() {
        let obj = json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": { "name": "settings", "namespace": "default" }
        });

        let key = ResourceKey::from_object(&obj);
        assert_eq!(key, ResourceKey::new("", "ConfigMap", "default", "settings"));
    }

    #[test]
    fn test_key_from_grouped_object() {
        let obj = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "prod" }
        });

        let key = ResourceKey::from_object(&obj);
        assert_eq!(key.group, "apps");
        assert_eq!(key.kind, "Deployment");
        assert_eq!(key.namespace, "prod");
        assert_eq!(key.name, "web");
        assert_eq!(key.to_string(), "apps/Deployment/prod/web");
    }

    #[test]
    fn test_cluster_scoped_object_has_empty_namespace() {
        let obj = json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": { "name": "team-a" }
        });

        let key = ResourceKey::from_object(&obj);
        assert_eq!(key.namespace, "");
        assert_eq!(key.to_string(), "/Namespace//team-a");
    }

    #[test]
    fn test_key_ignores_version() {
        let v1 = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "default" }
        });
        let beta = json!({
            "apiVersion": "apps/v1beta1",
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "default" }
        });

        assert_eq!(
            ResourceKey::from_object(&v1),
            ResourceKey::from_object(&beta)
        );
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let no_kind = json!({ "apiVersion": "v1", "metadata": { "name": "x" } });
        assert_eq!(
            ResourceKey::from_object(&no_kind),
            ResourceKey::new("", "", "", "x")
        );

        let no_metadata = json!({ "apiVersion": "apps/v1", "kind": "Deployment" });
        assert_eq!(
            ResourceKey::from_object(&no_metadata),
            ResourceKey::new("apps", "Deployment", "", "")
        );

        assert_eq!(
            ResourceKey::from_object(&json!(null)),
            ResourceKey::new("", "", "", "")
        );
    }

    #[test]
    fn test_only_identity_fields_are_read() {
        let obj = json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {
                "name": "settings",
                "namespace": "default",
                "labels": { "replicas": 3 },
                "annotations": ["not", "a", "map"],
                "resourceVersion": 42
            }
        });

        assert_eq!(
            ResourceKey::from_object(&obj),
            ResourceKey::new("", "ConfigMap", "default", "settings")
        );
    }

    #[test]
    fn test_typed_resource_requires_name() {
        let result = ResourceKey::from_resource(&Deployment::default());
        if let Err(Error::InvalidRequest(msg)) = &result {
            assert!(msg.contains("name is required"));
        } else {
            panic!("expected InvalidRequest, got {:?}", result);
        }
    }

    #[test]
    fn test_key_from_typed_resource() {
        let mut deployment = Deployment::default();
        deployment.metadata.name = Some("web".to_string());
        deployment.metadata.namespace = Some("default".to_string());

        let key = ResourceKey::from_resource(&deployment).unwrap();
        assert_eq!(key, ResourceKey::new("apps", "Deployment", "default", "web"));

        let mut ns = Namespace::default();
        ns.metadata.name = Some("team-a".to_string());
        let key = ResourceKey::from_resource(&ns).unwrap();
        assert_eq!(key, ResourceKey::new("", "Namespace", "", "team-a"));
    }

    #[test]
    fn test_typed_and_unstructured_keys_match() {
        let mut deployment = Deployment::default();
        deployment.metadata.name = Some("web".to_string());
        deployment.metadata.namespace = Some("default".to_string());
        let value = serde_json::to_value(&deployment).unwrap();

        assert_eq!(
            ResourceKey::from_resource(&deployment).unwrap(),
            ResourceKey::from_object(&value)
        );
    }

    #[test]
    fn test_gvk_api_version() {
        let core = GVK::from_api_version("v1", "Pod");
        assert_eq!(core.group, "");
        assert_eq!(core.api_version(), "v1");

        let apps = GVK::from_api_version("apps/v1", "Deployment");
        assert_eq!(apps, GVK::new("apps", "v1", "Deployment"));
        assert_eq!(apps.api_version(), "apps/v1");

        let key = ResourceKey::new("apps", "Deployment", "default", "web");
        assert_eq!(key.gvk("v1"), apps);
    }
}
