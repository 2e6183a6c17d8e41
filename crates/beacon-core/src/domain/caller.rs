//! CallerContext - 認証済みリクエストの主体
//!
//! 認証そのもの（トークン検証・ヘッダ解析）は外側のミドルウェアの責務。
//! ここでは「誰として認証されたか」だけを表現する。

/// 対話ユーザーのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Administrator,
    Standard,
}

/// リクエストが認証された主体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerContext {
    /// 資格情報なし
    Anonymous,

    /// 人間のユーザー（UI / API トークン）
    User { user_id: u64, role: UserRole },

    /// 提示した edge id で識別される edge agent
    EdgeAgent { edge_id: String },
}

impl CallerContext {
    pub fn edge_agent(edge_id: impl Into<String>) -> Self {
        CallerContext::EdgeAgent {
            edge_id: edge_id.into(),
        }
    }

    /// ログ用の短いラベル。edge id そのものは含めない
    pub fn label(&self) -> &'static str {
        match self {
            CallerContext::Anonymous => "anonymous",
            CallerContext::User { .. } => "user",
            CallerContext::EdgeAgent { .. } => "edge_agent",
        }
    }
}
