// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Provisioner`: brings a sprite's backing machine into existence and
//! tears it down again (spec §6, external interfaces).
//!
//! [`KubeProvisioner`] is the shallow reference implementation: a
//! sprite maps to one `Pod` in a dedicated namespace, identified by a
//! `sprite-name` label. It does not manage `Deployment`s, volumes, or
//! resource quotas — those belong to whatever chart deploys the
//! namespace itself; this only starts and stops the one pod per sprite.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::Client;
use oj_core::MachineId;

use crate::error::AdapterError;

/// A minimal single-container pod spec suitable for a sprite worker:
/// one container running `image`, restart policy `Never` since a dead
/// sprite should surface as `Dead` to the watchdog, not silently respawn.
pub fn default_pod_template(image: &str) -> Pod {
    Pod {
        metadata: ObjectMeta::default(),
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "sprite".to_string(),
                image: Some(image.to_string()),
                command: Some(vec!["sleep".to_string(), "infinity".to_string()]),
                ..Default::default()
            }],
            restart_policy: Some("Never".to_string()),
            ..Default::default()
        }),
        status: None,
    }
}

#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(&self, sprite: &str) -> Result<MachineId, AdapterError>;
    async fn deprovision(&self, sprite: &str) -> Result<(), AdapterError>;
    async fn is_alive(&self, machine_id: &MachineId) -> Result<bool, AdapterError>;
}

pub struct KubeProvisioner {
    client: Client,
    namespace: String,
    pod_template: Pod,
}

impl KubeProvisioner {
    pub fn new(client: Client, namespace: impl Into<String>, pod_template: Pod) -> Self {
        Self { client, namespace, pod_template }
    }

    fn pods(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}

#[async_trait]
impl Provisioner for KubeProvisioner {
    async fn provision(&self, sprite: &str) -> Result<MachineId, AdapterError> {
        let mut pod = self.pod_template.clone();
        let meta = pod.metadata.name.get_or_insert_with(String::new);
        *meta = format!("sprite-{sprite}");
        pod.metadata
            .labels
            .get_or_insert_with(Default::default)
            .insert("sprite-name".to_string(), sprite.to_string());

        let created = self
            .pods()
            .create(&PostParams::default(), &pod)
            .await
            .map_err(|e| AdapterError::Provisioning(sprite.to_string(), e.to_string()))?;

        let uid = created
            .metadata
            .uid
            .ok_or_else(|| AdapterError::Provisioning(sprite.to_string(), "pod created without a uid".to_string()))?;
        Ok(MachineId::new(uid))
    }

    async fn deprovision(&self, sprite: &str) -> Result<(), AdapterError> {
        self.pods()
            .delete(&format!("sprite-{sprite}"), &DeleteParams::default())
            .await
            .map_err(|e| AdapterError::Deprovisioning(sprite.to_string(), e.to_string()))?;
        Ok(())
    }

    async fn is_alive(&self, machine_id: &MachineId) -> Result<bool, AdapterError> {
        let list = self
            .pods()
            .list(&ListParams::default())
            .await
            .map_err(|e| AdapterError::Provisioning(machine_id.as_str().to_string(), e.to_string()))?;
        Ok(list.items.iter().any(|p| p.metadata.uid.as_deref() == Some(machine_id.as_str())))
    }
}
