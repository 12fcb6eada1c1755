//! 移動先生成モジュール
//!
//! - `tables`: 駒種ごとの利きベクトル（先手視点）
//! - `generator`: 盤上の駒の移動先、駒打ちの打てる升、同種の駒の検索

mod generator;
pub mod tables;

pub use tables::{Step, steps};
