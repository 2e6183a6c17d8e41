//! Endpoint - コントローラが管理する環境（エンドポイント）

use serde::{Deserialize, Serialize};

use super::ids::EndpointId;

/// EndpointKind はコントローラがエンドポイントへ到達する方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Docker,
    Agent,
    Kubernetes,
    EdgeAgentOnDocker,
    EdgeAgentOnKubernetes,
    EdgeAgentOnNomad,
}

impl EndpointKind {
    /// edge agent 系か（エージェント側からポーリングし、ステータスを自分で報告する）
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            EndpointKind::EdgeAgentOnDocker
                | EndpointKind::EdgeAgentOnKubernetes
                | EndpointKind::EdgeAgentOnNomad
        )
    }
}

/// Endpoint は台帳に登録された 1 環境
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: EndpointId,
    pub name: String,
    pub kind: EndpointKind,
    /// edge agent が提示する識別子。エージェントが関連付けを済ませるまでは `None`
    #[serde(default, rename = "edgeID", skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
}

impl Endpoint {
    pub fn edge(id: EndpointId, name: impl Into<String>, edge_id: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: EndpointKind::EdgeAgentOnDocker,
            edge_id: Some(edge_id.into()),
        }
    }

    pub fn is_edge(&self) -> bool {
        self.kind.is_edge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::docker(EndpointKind::Docker, false)]
    #[case::agent(EndpointKind::Agent, false)]
    #[case::kubernetes(EndpointKind::Kubernetes, false)]
    #[case::edge_docker(EndpointKind::EdgeAgentOnDocker, true)]
    #[case::edge_kubernetes(EndpointKind::EdgeAgentOnKubernetes, true)]
    #[case::edge_nomad(EndpointKind::EdgeAgentOnNomad, true)]
    fn edge_kinds(#[case] kind: EndpointKind, #[case] expected: bool) {
        assert_eq!(kind.is_edge(), expected);
    }

    #[test]
    fn edge_constructor_sets_identity() {
        let ep = Endpoint::edge(EndpointId::new(3), "site-a", "edge-key-a");
        assert!(ep.is_edge());
        assert_eq!(ep.edge_id.as_deref(), Some("edge-key-a"));
    }
}
