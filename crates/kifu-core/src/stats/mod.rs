//! お気に入り・指し手統計・棋譜保存
//!
//! 永続化はこのクレートの外（リポジトリ実装）が担う。ここでは
//!
//! - リポジトリとの境界になるトレイト
//! - 検索キーの正規化（後手の手は 180 度回転して先手の手として扱う）
//! - 統計の集計と並び替え
//! - 終局ノードからの統計レコード・対局レコードの組み立て
//!
//! を提供する。

mod aggregate;
mod favorites;
mod record;

pub use aggregate::{aggregate, statistics_for};
pub use favorites::{apply_favorites, toggle_favorite};
pub use record::{collect_move_statistics, save_game};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GameMetadata, MoveToken};

/// 1局1手分の統計レコード（検索キーは先手視点に正規化済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStatisticsRecord {
    pub sfenx: String,
    #[serde(rename = "move")]
    pub mv: MoveToken,
    pub win: bool,
    pub lose: bool,
    pub timeout: bool,
}

/// 局面ごとに集計した指し手の統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveStatistics {
    #[serde(rename = "move")]
    pub mv: MoveToken,
    /// この手が指された回数
    pub apparent_count: u32,
    /// この手を指した側が勝った回数
    pub win_count: u32,
    /// この局面のレコード全体に対する出現率
    pub apparent_rate: f64,
    /// 勝率
    pub win_rate: f64,
}

/// 保存する対局レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecordEntry {
    pub game_hash: String,
    /// 終局トークンを除いた手数
    pub move_count: usize,
    pub metadata: GameMetadata,
    pub recorded_at: DateTime<Utc>,
}

/// お気に入りの手のリポジトリ
pub trait FavoriteRepository {
    /// 先手視点の局面 `sfenx` でお気に入りに登録された手
    fn fetch_favorites(&self, sfenx: &str) -> anyhow::Result<Vec<MoveToken>>;

    fn insert_favorite(&mut self, sfenx: &str, mv: MoveToken) -> anyhow::Result<()>;

    fn delete_favorite(&mut self, sfenx: &str, mv: MoveToken) -> anyhow::Result<()>;
}

/// 指し手統計のリポジトリ
pub trait StatisticsRepository {
    /// 先手視点の局面 `sfenx` から指された手のレコード
    fn fetch_statistics(&self, sfenx: &str) -> anyhow::Result<Vec<MoveStatisticsRecord>>;
}

/// 終局した対局の保存先
pub trait GameRecordSink {
    fn persist_move_statistics(&mut self, records: &[MoveStatisticsRecord]) -> anyhow::Result<()>;

    fn persist_game_record(&mut self, entry: &GameRecordEntry) -> anyhow::Result<()>;
}
