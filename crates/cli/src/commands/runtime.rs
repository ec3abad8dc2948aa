// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring shared by `dispatch` and `watchdog`: the real adapters behind
//! a `kube` context, built from [`super::Context`].

use oj_adapters::{default_pod_template, GithubTicketClient, KubeProvisioner, KubeRemoteClient};

use super::Context;

pub async fn kube_client() -> anyhow::Result<kube::Client> {
    kube::Client::try_default().await.map_err(|e| anyhow::anyhow!("failed to build kube client: {e}"))
}

pub fn provisioner(client: kube::Client, ctx: &Context) -> KubeProvisioner {
    KubeProvisioner::new(client, ctx.namespace.clone(), default_pod_template(&ctx.pod_image))
}

pub fn remote(client: kube::Client, ctx: &Context) -> KubeRemoteClient {
    KubeRemoteClient::new(client, ctx.namespace.clone())
}

pub fn tickets() -> anyhow::Result<GithubTicketClient> {
    let token = std::env::var("GITHUB_TOKEN").ok();
    GithubTicketClient::new(token).map_err(|e| anyhow::anyhow!("failed to build github client: {e}"))
}
