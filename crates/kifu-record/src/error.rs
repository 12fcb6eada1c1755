//! 棋譜ファイル解析のエラー

/// 解析エラー（最初の不正な行で解析全体を中止する）
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}: {text:?}")]
pub struct ParseError {
    /// 1 始まりの行番号
    pub line: usize,
    /// 問題の行（前後の空白を除いたもの）
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: &str, kind: ParseErrorKind) -> ParseError {
        ParseError { line, text: text.to_string(), kind }
    }
}

/// 解析エラーの種類
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// 指し手として読めない
    #[error("malformed move")]
    MalformedMove,

    /// 「同」の前に指し手がない
    #[error("no previous move for 同")]
    MissingPrevious,

    /// 盤外の升
    #[error("square out of range")]
    InvalidSquare,

    /// 未知の駒表記
    #[error("unknown piece {0:?}")]
    UnknownPiece(String),

    /// 打てない駒（成駒・玉）
    #[error("cannot drop {0:?}")]
    InvalidDrop(String),
}
