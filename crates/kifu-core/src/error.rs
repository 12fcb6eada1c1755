//! エラー型
//!
//! - `FormatError`: 入力データ（局面文字列・指し手トークン・設定）の形式不正
//! - `PreconditionError`: 呼び出し側の前提違反（空き升からの移動など）
//! - `KifuError`: 上記と外部リポジトリ由来のエラーをまとめたもの

use crate::types::{PieceKind, Side, Square};

/// 形式エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// 局面文字列（sfenx）が不正
    #[error("invalid position string {input:?}: {reason}")]
    Position { input: String, reason: &'static str },

    /// 指し手トークンが不正
    #[error("invalid move token {0:?}")]
    MoveToken(String),

    /// 持ち駒の枚数が表現可能な範囲を超えている
    #[error("hand count out of range for {kind:?}: {count}")]
    HandCount { kind: PieceKind, count: u8 },

    /// 設定ファイルが不正
    #[error("invalid config: {0}")]
    Config(String),
}

/// 前提条件エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// 移動元の升に駒がない
    #[error("no piece on source square {0}")]
    EmptySource(Square),

    /// 打とうとした駒を持っていない
    #[error("{side:?} has no {kind:?} in hand")]
    NotInHand { side: Side, kind: PieceKind },

    /// 持ち駒の上限を超える
    #[error("{side:?} cannot hold more {kind:?}")]
    HandOverflow { side: Side, kind: PieceKind },

    /// 駒を打つ升が空いていない
    #[error("drop target {0} is occupied")]
    OccupiedTarget(Square),

    /// 存在しないノード
    #[error("unknown node {0}")]
    UnknownNode(usize),

    /// 指し手を持たないノード（ルート）
    #[error("node {0} has no move")]
    NoMove(usize),

    /// 終局していない棋譜は保存できない
    #[error("node {0} does not end the game")]
    NotFinished(usize),
}

/// 棋譜操作全般のエラー
#[derive(thiserror::Error, Debug)]
pub enum KifuError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// 対局ハッシュ用 JSON の生成に失敗
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    /// お気に入り・統計・棋譜保存のリポジトリで発生したエラー
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

/// 棋譜操作の Result
pub type Result<T> = std::result::Result<T, KifuError>;
