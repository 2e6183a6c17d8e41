//! BeaconConfig - 実行時設定
//!
//! 環境変数から読み、CLI フラグで上書きする。

use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "BEACON_DATA_DIR";
pub const ENV_SYNC_WRITES: &str = "BEACON_SYNC_WRITES";

/// BeaconConfig は永続化先と書き込み方針
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconConfig {
    /// スタックの journal を置くディレクトリ。`None` ならメモリのみ
    pub data_dir: Option<PathBuf>,
    /// 書き込み完了を返す前に毎回 fsync する
    pub sync_writes: bool,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sync_writes: true,
        }
    }
}

impl BeaconConfig {
    /// `BEACON_DATA_DIR` / `BEACON_SYNC_WRITES` から読む（未設定・不正値は既定値）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let sync_writes = match lookup(ENV_SYNC_WRITES) {
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            _ => defaults.sync_writes,
        };
        Self {
            data_dir,
            sync_writes,
        }
    }
}
