//! # kifu-record
//!
//! KIF / CSA 形式の棋譜ファイルの読み書き。
//!
//! 解析結果は [`GameRecord`]（対局情報と指し手トークン列）で、
//! [`GameRecord::to_kifu`] で棋譜木を持つ対局セッションに変換できる。
//!
//! ```
//! use kifu_record::{RecordFormat, parse_record};
//!
//! let text = "先手：A\n後手：B\n手数----指手---------消費時間--\n   1 ７六歩(77)\n   2 投了\n";
//! let record = parse_record(text, RecordFormat::Kif).unwrap();
//! assert_eq!(record.moves.len(), 2);
//! let kifu = record.to_kifu().unwrap();
//! assert!(kifu.is_finished());
//! ```

mod csa;
mod error;
mod kif;

pub use csa::parse_csa;
pub use error::{ParseError, ParseErrorKind};
pub use kif::{MOVE_SECTION, parse_kif, write_kif};

use kifu_core::error::PreconditionError;
use kifu_core::types::{GameMetadata, MoveToken};
use kifu_core::{Kifu, KifuConfig};

/// 解析した棋譜
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    pub metadata: GameMetadata,
    /// 本線の指し手（平手初期局面から、終局トークンを含む）
    pub moves: Vec<MoveToken>,
}

impl GameRecord {
    /// 平手初期局面から指し手を再生した対局セッション
    pub fn to_kifu(&self) -> Result<Kifu, PreconditionError> {
        let mut kifu = Kifu::new();
        kifu.replay(self.moves.iter().copied())?;
        Ok(kifu)
    }

    /// 設定の初期局面から指し手を再生した対局セッション
    pub fn to_kifu_with(&self, config: &KifuConfig) -> kifu_core::Result<Kifu> {
        let mut kifu = Kifu::with_config(config)?;
        kifu.replay(self.moves.iter().copied())?;
        Ok(kifu)
    }

    /// 重複判定用のハッシュ
    ///
    /// 平手初期局面から再生して正規化した指し手で計算するので、同じ対局を
    /// セッションから保存したときのハッシュと一致する。
    pub fn game_hash(&self) -> kifu_core::Result<String> {
        let moves = self.to_kifu()?.moves();
        Ok(kifu_core::fingerprint::game_hash(&moves, &self.metadata)?)
    }
}

/// 棋譜ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Kif,
    Csa,
}

impl RecordFormat {
    /// 拡張子から判定する（大文字小文字は区別しない）
    pub fn from_extension(ext: &str) -> Option<RecordFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "kif" | "kifu" => Some(RecordFormat::Kif),
            "csa" => Some(RecordFormat::Csa),
            _ => None,
        }
    }

    /// 内容から判定する
    pub fn detect(text: &str) -> Option<RecordFormat> {
        if text.contains(MOVE_SECTION) {
            return Some(RecordFormat::Kif);
        }
        let csa = text
            .lines()
            .map(str::trim)
            .any(|line| ["V2", "N+", "PI", "P1"].iter().any(|p| line.starts_with(p)));
        csa.then_some(RecordFormat::Csa)
    }
}

/// 形式を指定して棋譜を解析する
pub fn parse_record(text: &str, format: RecordFormat) -> Result<GameRecord, ParseError> {
    match format {
        RecordFormat::Kif => parse_kif(text),
        RecordFormat::Csa => parse_csa(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(RecordFormat::from_extension("KIF"), Some(RecordFormat::Kif));
        assert_eq!(RecordFormat::from_extension("kifu"), Some(RecordFormat::Kif));
        assert_eq!(RecordFormat::from_extension("csa"), Some(RecordFormat::Csa));
        assert_eq!(RecordFormat::from_extension("ki2"), None);
    }

    #[test]
    fn test_detect() {
        let kif = "手数----指手---------消費時間--\n";
        assert_eq!(RecordFormat::detect(kif), Some(RecordFormat::Kif));
        assert_eq!(RecordFormat::detect("V2.2\n+\n+7776FU\n"), Some(RecordFormat::Csa));
        assert_eq!(RecordFormat::detect("hello"), None);
    }
}
