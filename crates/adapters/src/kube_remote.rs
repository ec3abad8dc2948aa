// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`KubeRemoteClient`]: a [`RemoteClient`] backed by `kubectl exec`-style
//! pod exec (spec §6, external interfaces). Sibling to [`crate::KubeProvisioner`]
//! — both address a sprite by the `sprite-<name>` pod it was provisioned
//! under, in the same namespace.
//!
//! There is no native "copy a file into a pod" verb in the Kubernetes API,
//! so [`KubeRemoteClient::upload`] pipes the payload through `exec`'s
//! stdin into a `base64 -d` on the other side, the same trick `kubectl cp`
//! itself uses under the hood.

use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, AttachParams, ListParams};
use kube::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::AdapterError;
use crate::remote::{ExecOutput, RemoteClient};

pub struct KubeRemoteClient {
    client: Client,
    namespace: String,
}

impl KubeRemoteClient {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self { client, namespace: namespace.into() }
    }

    fn pods(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    fn pod_name(sprite: &str) -> String {
        format!("sprite-{sprite}")
    }

    async fn run(&self, sprite: &str, command: Vec<String>, timeout: Duration, stdin: Option<Vec<u8>>) -> Result<ExecOutput, AdapterError> {
        let ap = AttachParams::default().stdout(true).stderr(true).stdin(stdin.is_some());
        let pod = Self::pod_name(sprite);

        let mut attached = tokio::time::timeout(timeout, self.pods().exec(&pod, command, &ap))
            .await
            .map_err(|_| AdapterError::ExecTimeout { sprite: sprite.to_string(), timeout_secs: timeout.as_secs() })?
            .map_err(|e| AdapterError::Exec { sprite: sprite.to_string(), message: e.to_string() })?;

        if let Some(bytes) = stdin {
            if let Some(mut writer) = attached.stdin() {
                writer
                    .write_all(&bytes)
                    .await
                    .map_err(|e| AdapterError::Exec { sprite: sprite.to_string(), message: e.to_string() })?;
            }
        }

        let stdout = attached.stdout();
        let stderr = attached.stderr();
        let stdout_fut = async move {
            let mut buf = String::new();
            if let Some(mut stdout) = stdout {
                stdout.read_to_string(&mut buf).await?;
            }
            Ok::<_, std::io::Error>(buf)
        };
        let stderr_fut = async move {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr {
                stderr.read_to_string(&mut buf).await?;
            }
            Ok::<_, std::io::Error>(buf)
        };
        let (stdout_buf, stderr_buf) = tokio::try_join!(stdout_fut, stderr_fut)
            .map_err(|e| AdapterError::Exec { sprite: sprite.to_string(), message: e.to_string() })?;
        let combined = format!("{stdout_buf}{stderr_buf}");

        let status = match attached.take_status() {
            Some(fut) => fut.await,
            None => None,
        };
        let exit_code = status.and_then(|s| s.status).map(|s| if s == "Success" { 0 } else { 1 });
        let pid = ExecOutput::parse_pid(&combined);
        Ok(ExecOutput { combined_output: combined, exit_code, pid })
    }
}

#[async_trait]
impl RemoteClient for KubeRemoteClient {
    async fn exec(&self, sprite: &str, script: &str, timeout: Duration) -> Result<ExecOutput, AdapterError> {
        self.run(sprite, vec!["sh".to_string(), "-c".to_string(), script.to_string()], timeout, None).await
    }

    async fn exec_with_env(
        &self,
        sprite: &str,
        script: &str,
        env: &[(String, String)],
        timeout: Duration,
    ) -> Result<ExecOutput, AdapterError> {
        let prefix: String = env.iter().map(|(k, v)| format!("export {k}={v}; ", v = shell_quote(v))).collect();
        self.run(sprite, vec!["sh".to_string(), "-c".to_string(), format!("{prefix}{script}")], timeout, None).await
    }

    async fn upload(&self, sprite: &str, remote_path: &str, contents: &[u8]) -> Result<(), AdapterError> {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(contents);
        let script = format!("mkdir -p $(dirname {remote_path}) && base64 -d > {remote_path}");
        self.run(sprite, vec!["sh".to_string(), "-c".to_string(), script], Duration::from_secs(30), Some(encoded.into_bytes()))
            .await
            .map(|_| ())
            .map_err(|e| AdapterError::Upload { sprite: sprite.to_string(), remote_path: remote_path.to_string(), message: e.to_string() })
    }

    async fn list(&self, sprite: &str, remote_dir: &str) -> Result<Vec<String>, AdapterError> {
        let output = self.exec(sprite, &format!("ls -1 {remote_dir} 2>/dev/null"), Duration::from_secs(10)).await?;
        Ok(output.combined_output.lines().map(str::to_string).collect())
    }

    async fn list_fleet(&self) -> Result<Vec<String>, AdapterError> {
        let list = self
            .pods()
            .list(&ListParams::default())
            .await
            .map_err(|e| AdapterError::Exec { sprite: "*".to_string(), message: e.to_string() })?;
        Ok(list
            .items
            .iter()
            .filter_map(|pod| pod.metadata.name.as_deref())
            .filter_map(|name| name.strip_prefix("sprite-"))
            .map(str::to_string)
            .collect())
    }

    async fn probe_connectivity(&self, sprite: &str) -> Result<bool, AdapterError> {
        match self.exec(sprite, "true", Duration::from_secs(5)).await {
            Ok(output) => Ok(output.exit_code == Some(0) || output.exit_code.is_none()),
            Err(AdapterError::ExecTimeout { .. }) => Ok(false),
            Err(e) => Err(AdapterError::Connectivity(sprite.to_string(), e.to_string())),
        }
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_embedded_single_quotes() {
        assert_eq!(shell_quote("a'b"), "'a'\\''b'");
    }

    #[test]
    fn pod_name_is_sprite_prefixed() {
        assert_eq!(KubeRemoteClient::pod_name("sprite-1"), "sprite-sprite-1");
    }
}
