//! # kifu-core
//!
//! 将棋の棋譜を扱うコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Side, Square, PieceKind, MoveToken, GameMetadata）
//! - `position`: 局面表現、sfenx 形式の解析・出力、180 度回転、指し手の適用
//! - `movegen`: 駒の利きと移動先・打ち先の計算
//! - `notation`: 日本語の棋譜表記（`☗７六歩` など）
//! - `tree`: 分岐付き棋譜木
//! - `game`: 局面と棋譜木をまとめた対局セッション
//! - `fingerprint`: 対局の重複判定用ハッシュ
//! - `stats`: お気に入り・指し手統計と外部リポジトリとの境界
//! - `config`: 初期局面などの設定
//!
//! 王手・詰みの判定は行わない。

// 基本型
pub mod error;
pub mod types;

// 局面と指し手
pub mod movegen;
pub mod position;

// 表記と棋譜木
pub mod notation;
pub mod tree;

// セッションと外部連携
pub mod config;
pub mod fingerprint;
pub mod game;
pub mod stats;

pub use config::KifuConfig;
pub use error::{FormatError, KifuError, PreconditionError, Result};
pub use game::Kifu;
pub use position::{HIRATE, Piece, Position};
pub use tree::{GameTree, LookupKey, Node, NodeId, ROOT};
pub use types::{GameMetadata, MoveToken, PieceKind, Side, Square, SquareSet, Terminal};
