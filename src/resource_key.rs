//! Resource identity used to index recorded commands

use crate::{Error, Result};
use kube::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GVK {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GVK {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Split an `apiVersion` string into group and version.
    ///
    /// Core resources (`v1`) have an empty group.
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, kind),
            None => Self::new("", api_version, kind),
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

/// Identity of a single resource instance.
///
/// The version is not part of the key: the same object seen
/// through `apps/v1` and `apps/v1beta1` is the same resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    pub group: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(
        group: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Derive the key of an unstructured object.
    ///
    /// Only `apiVersion`, `kind`, `metadata.namespace` and `metadata.name`
    /// are read; any of them that is missing becomes an empty string.
    /// Cluster-scoped objects therefore get an empty namespace.
    pub fn from_object(object: &Value) -> Self {
        let gvk = extract_gvk(object);
        Self {
            group: gvk.group,
            kind: gvk.kind,
            namespace: metadata_str(object, "namespace").to_string(),
            name: object_name(object).to_string(),
        }
    }

    /// Derive the key of a typed resource without serializing it.
    pub fn from_resource<K>(resource: &K) -> Result<Self>
    where
        K: Resource<DynamicType = ()>,
    {
        let meta = resource.meta();
        let name = meta
            .name
            .clone()
            .ok_or_else(|| Error::InvalidRequest("Object name is required".to_string()))?;

        Ok(Self {
            group: K::group(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            namespace: meta.namespace.clone().unwrap_or_default(),
            name,
        })
    }

    pub fn gvk(&self, version: impl Into<String>) -> GVK {
        GVK::new(self.group.clone(), version, self.kind.clone())
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.group, self.kind, self.namespace, self.name
        )
    }
}

pub fn extract_gvk(value: &Value) -> GVK {
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let kind = value
        .get("kind")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    GVK::from_api_version(api_version, kind)
}

fn metadata_str<'a>(object: &'a Value, field: &str) -> &'a str {
    object
        .get("metadata")
        .and_then(|m| m.get(field))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
}

/// Name used to look up canned responses.
pub(crate) fn object_name(object: &Value) -> &str {
    metadata_str(object, "name")
}
