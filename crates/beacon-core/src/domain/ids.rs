//! Domain identifiers（型付き ID）
//!
//! Edge 側のエージェントは数値 ID でリソースを参照するため、ID は `u64` を包む。
//! `0` は「未指定」を意味する（JSON で省略されたフィールドはここに落ちる）。
//!
//! ## Phantom Type パターン
//! `Id<T>` で共通実装を持ち、`T` はコンパイル時だけ使うマーカー型。
//! `EndpointId` と `EdgeStackId` は同じ `u64` でも混同できない。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "endpoint-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// Serialize は素の整数になる。JSON の map key としてもそのまま使える
/// （`{"1": {...}}`）。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T: IdMarker> {
    value: u64,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// `0` は未指定扱い
    pub fn is_unset(&self) -> bool {
        self.value == 0
    }
}

impl<T: IdMarker> Default for Id<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Endpoint のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {}

impl IdMarker for Endpoint {
    fn prefix() -> &'static str {
        "endpoint-"
    }
}

/// EdgeStack のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeStack {}

impl IdMarker for EdgeStack {
    fn prefix() -> &'static str {
        "edgestack-"
    }
}

/// edge endpoint（ステータスを報告するリモートエージェント）の ID
pub type EndpointId = Id<Endpoint>;

/// edge stack（デプロイ単位）の ID
pub type EdgeStackId = Id<EdgeStack>;
