//! EdgeStack - デプロイ単位とエンドポイントごとのステータスマップ

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::RecordError;
use super::ids::{EdgeStackId, EndpointId};
use super::status::StatusRecord;

/// endpoint -> 最新ステータス。順序付きなのでスナップショットの直列化が決定的になる。
pub type StackStatusMap = BTreeMap<EndpointId, StatusRecord>;

/// EdgeStack は 1 つ以上の edge endpoint に配布されるデプロイ単位
///
/// # 設計
/// - `status` は非公開。書き込み経路は `apply_status` だけで、
///   レコード自身の endpoint id をキーにする
/// - `Clone` は深いコピー。スナップショットとして渡したクローンは
///   以後の変更を観測しない
/// - デシリアライズ時に「キー == レコードの endpoint id」を検証する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredEdgeStack")]
pub struct EdgeStack {
    id: EdgeStackId,
    pub name: String,
    pub creation_date: DateTime<Utc>,
    /// スタック定義が変わるたびに所有者が上げる
    pub version: u32,
    #[serde(default)]
    status: StackStatusMap,
}

impl EdgeStack {
    pub fn new(id: EdgeStackId, name: impl Into<String>) -> Self {
        Self::with_creation_date(id, name, Utc::now())
    }

    pub fn with_creation_date(
        id: EdgeStackId,
        name: impl Into<String>,
        creation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            creation_date,
            version: 1,
            status: StackStatusMap::new(),
        }
    }

    pub fn id(&self) -> EdgeStackId {
        self.id
    }

    pub fn status(&self) -> &StackStatusMap {
        &self.status
    }

    pub fn status_of(&self, endpoint_id: EndpointId) -> Option<&StatusRecord> {
        self.status.get(&endpoint_id)
    }

    /// `record.endpoint_id()` のエントリを設定または置換する
    ///
    /// 置き換えたレコードがあれば返す。
    pub fn apply_status(&mut self, record: StatusRecord) -> Option<StatusRecord> {
        self.status.insert(record.endpoint_id(), record)
    }
}

/// 永続化形式そのまま（キー未検証）のスタック
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEdgeStack {
    id: EdgeStackId,
    name: String,
    creation_date: DateTime<Utc>,
    version: u32,
    #[serde(default)]
    status: StackStatusMap,
}

impl TryFrom<StoredEdgeStack> for EdgeStack {
    type Error = RecordError;

    fn try_from(stored: StoredEdgeStack) -> Result<Self, Self::Error> {
        if let Some((key, record)) = stored
            .status
            .iter()
            .find(|(key, record)| **key != record.endpoint_id())
        {
            return Err(RecordError::KeyMismatch {
                key: *key,
                endpoint_id: record.endpoint_id(),
            });
        }
        Ok(Self {
            id: stored.id,
            name: stored.name,
            creation_date: stored.creation_date,
            version: stored.version,
            status: stored.status,
        })
    }
}
