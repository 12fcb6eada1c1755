//! KIF 形式
//!
//! ```text
//! 開始日時：2025/06/08 13:46:40
//! 先手：hashiryo1(1598)
//! 後手：hashiryo2(1552)
//! 手数----指手---------消費時間--
//!    1 ２六歩(27)   ( 0:00/00:00:00)
//!    2 同　歩(23)   ( 0:01/00:00:01)
//!    3 ５五角打
//!    4 投了
//! まで3手で先手の勝ち
//! ```
//!
//! 分岐（`変化：` 以降）は読まず本線だけを返す。

use std::sync::LazyLock;

use kifu_core::error::PreconditionError;
use kifu_core::notation::{KANJI_NUM, ZENKAKU_NUM};
use kifu_core::position::Position;
use kifu_core::types::{GameMetadata, MoveToken, PieceKind, Side, Square, Terminal};
use log::{debug, trace, warn};
use regex::Regex;

use crate::GameRecord;
use crate::error::{ParseError, ParseErrorKind};

/// 指し手欄の見出し
pub const MOVE_SECTION: &str = "手数----指手---------";

static TERMINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(投了|中断|持将棋|千日手|切れ負け|反則負け|詰み|時間切れ)")
        .expect("valid terminal pattern")
});

static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(\d+)\s+",
        r"(?:([１２３４５６７８９])([一二三四五六七八九])|同\s*)",
        r"(成銀|成桂|成香|玉|王|飛|龍|竜|角|馬|金|銀|全|桂|圭|香|杏|歩|と)",
        r"(不成|成|打)?",
        r"(?:\(([1-9])([1-9])\))?",
    ))
    .expect("valid move pattern")
});

/// ヘッダ項目
const HEADERS: [&str; 6] = ["開始日時：", "終了日時：", "棋戦：", "手合割：", "先手：", "後手："];

fn header_slot<'a>(metadata: &'a mut GameMetadata, prefix: &str) -> &'a mut Option<String> {
    match prefix {
        "開始日時：" => &mut metadata.start_time,
        "終了日時：" => &mut metadata.end_time,
        "棋戦：" => &mut metadata.event,
        "手合割：" => &mut metadata.handicap,
        "先手：" => &mut metadata.black_player,
        _ => &mut metadata.white_player,
    }
}

fn piece_from_glyph(glyph: &str) -> Option<PieceKind> {
    let kind = match glyph {
        "王" => PieceKind::King,
        "龍" => PieceKind::Dragon,
        "成銀" => PieceKind::ProSilver,
        "成桂" => PieceKind::ProKnight,
        "成香" => PieceKind::ProLance,
        _ => return PieceKind::ALL.into_iter().find(|k| k.glyph() == glyph),
    };
    Some(kind)
}

fn terminal_from_word(word: &str) -> Option<Terminal> {
    match word {
        "詰み" => Some(Terminal::Resign),
        "時間切れ" => Some(Terminal::Timeout),
        _ => Terminal::ALL.into_iter().find(|t| t.display() == word),
    }
}

fn destination(file: &str, rank: &str) -> Result<Square, ParseErrorKind> {
    let col = ZENKAKU_NUM.iter().position(|&z| z == file);
    let row = KANJI_NUM.iter().position(|&k| k == rank);
    match (row, col) {
        (Some(row), Some(col)) => {
            Square::new(row as u8, col as u8).ok_or(ParseErrorKind::InvalidSquare)
        }
        _ => Err(ParseErrorKind::InvalidSquare),
    }
}

/// 1手分の行を読む（`prev_to` は「同」の解決に使い、読んだ手の移動先で更新する）
fn parse_move_line(
    line: &str,
    prev_to: &mut Option<Square>,
) -> Result<MoveToken, ParseErrorKind> {
    if let Some(caps) = TERMINAL_RE.captures(line) {
        let terminal = terminal_from_word(&caps[2]).ok_or(ParseErrorKind::MalformedMove)?;
        return Ok(MoveToken::Terminal(terminal));
    }

    let caps = MOVE_RE.captures(line).ok_or(ParseErrorKind::MalformedMove)?;
    let to = match (caps.get(2), caps.get(3)) {
        (Some(file), Some(rank)) => destination(file.as_str(), rank.as_str())?,
        _ => prev_to.ok_or(ParseErrorKind::MissingPrevious)?,
    };
    let glyph = &caps[4];
    let kind =
        piece_from_glyph(glyph).ok_or_else(|| ParseErrorKind::UnknownPiece(glyph.into()))?;
    let modifier = caps.get(5).map(|m| m.as_str());

    let token = match (caps.get(6), caps.get(7), modifier) {
        (Some(_), Some(_), Some("打")) => return Err(ParseErrorKind::MalformedMove),
        (Some(file), Some(rank), _) => {
            let col = file.as_str().as_bytes()[0] - b'1';
            let row = rank.as_str().as_bytes()[0] - b'1';
            let from = Square::new(row, col).ok_or(ParseErrorKind::InvalidSquare)?;
            MoveToken::Board { from, to, promote: modifier == Some("成") }
        }
        (_, _, Some("打")) => {
            if !kind.is_hand_kind() {
                return Err(ParseErrorKind::InvalidDrop(glyph.into()));
            }
            MoveToken::Drop { kind, to }
        }
        _ => return Err(ParseErrorKind::MalformedMove),
    };
    *prev_to = Some(to);
    Ok(token)
}

/// KIF 形式の文字列を解析する
///
/// 終局の手を読んだ後の指し手行は無視する。`まで…手で…` の行は結果として
/// 記録し、そこで解析を終える。
pub fn parse_kif(text: &str) -> Result<GameRecord, ParseError> {
    debug!("parsing KIF ({} bytes)", text.len());
    let mut record = GameRecord::default();
    let mut in_moves = false;
    let mut finished = false;
    let mut prev_to = None;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }

        if let Some(prefix) = HEADERS.iter().find(|p| line.starts_with(**p)) {
            let value = line[prefix.len()..].to_string();
            debug!("line {number}: {prefix}{value}");
            *header_slot(&mut record.metadata, prefix) = Some(value);
            continue;
        }
        if line.contains(MOVE_SECTION) {
            in_moves = true;
            continue;
        }
        if !in_moves || line.starts_with('*') || line.starts_with('&') {
            continue;
        }
        if line.contains("まで") && line.contains("手で") {
            record.metadata.result = Some(line.to_string());
            break;
        }
        if line.starts_with("変化：") {
            debug!("line {number}: variation, main line ends");
            break;
        }
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            trace!("line {number}: skipped {line:?}");
            continue;
        }
        if finished {
            warn!("line {number}: move after the game ended is ignored");
            continue;
        }

        let token = parse_move_line(line, &mut prev_to)
            .map_err(|kind| ParseError::new(number, line, kind))?;
        trace!("line {number}: {token}");
        finished = token.is_terminal();
        record.moves.push(token);
    }

    debug!("parsed {} moves", record.moves.len());
    Ok(record)
}

/// 柿木形式の駒名
fn kif_label(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::ProLance => "成香",
        PieceKind::ProKnight => "成桂",
        PieceKind::ProSilver => "成銀",
        PieceKind::Dragon => "龍",
        other => other.glyph(),
    }
}

/// 平手初期局面からの棋譜を KIF 形式で書き出す
pub fn write_kif(record: &GameRecord) -> Result<String, PreconditionError> {
    let meta = &record.metadata;
    let handicap = meta.handicap.as_deref().unwrap_or("平手");
    let headers = [
        ("開始日時：", meta.start_time.as_deref()),
        ("終了日時：", meta.end_time.as_deref()),
        ("棋戦：", meta.event.as_deref()),
        ("手合割：", Some(handicap)),
        ("先手：", meta.black_player.as_deref()),
        ("後手：", meta.white_player.as_deref()),
    ];
    let mut lines: Vec<String> = headers
        .into_iter()
        .filter_map(|(prefix, value)| value.map(|v| format!("{prefix}{v}")))
        .collect();
    lines.push(format!("{MOVE_SECTION}消費時間--"));

    let mut pos = Position::hirate();
    let mut side = Side::Sente;
    let mut prev_to = None;
    for (ply, &token) in record.moves.iter().enumerate() {
        let label = match token {
            MoveToken::Board { from, to, promote } => {
                let piece = pos.piece_on(from).ok_or(PreconditionError::EmptySource(from))?;
                let suffix = match (pos.promotion_available(from, to), promote) {
                    (true, true) => "成",
                    (true, false) => "不成",
                    (false, _) => "",
                };
                format!(
                    "{}{}{}({}{})",
                    square_label(to, prev_to),
                    kif_label(piece.kind),
                    suffix,
                    from.file_number(),
                    from.row() + 1
                )
            }
            MoveToken::Drop { kind, to } => {
                format!("{}{}打", square_label(to, prev_to), kif_label(kind))
            }
            MoveToken::Terminal(t) => t.display().to_string(),
        };
        lines.push(format!("{:>4} {}", ply + 1, label));
        pos.apply(token, side)?;
        prev_to = token.destination();
        side = !side;
    }

    if let Some(result) = &meta.result {
        lines.push(result.clone());
    }
    debug!("wrote {} KIF lines", lines.len());
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn square_label(to: Square, prev_to: Option<Square>) -> String {
    if prev_to == Some(to) {
        "同　".to_string()
    } else {
        format!("{}{}", ZENKAKU_NUM[to.col() as usize], KANJI_NUM[to.row() as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(line: &str) -> Result<MoveToken, ParseErrorKind> {
        parse_move_line(line, &mut None)
    }

    fn token(s: &str) -> MoveToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_board_moves() {
        assert_eq!(parse_one("1 ２六歩(27)   ( 0:00/00:00:00)"), Ok(token("2g2f")));
        assert_eq!(parse_one("7 ３三角成(88)"), Ok(token("8h3c+")));
        assert_eq!(parse_one("7 ３三角不成(88)"), Ok(token("8h3c")));
        assert_eq!(parse_one("31 ５二成銀(43)"), Ok(token("4c5b")));
        assert_eq!(parse_one("31 ５二全(43)"), Ok(token("4c5b")));
        assert_eq!(parse_one("40 ５八王(59)"), Ok(token("5i5h")));
    }

    #[test]
    fn test_same_square() {
        let mut prev = Square::parse("3c");
        assert_eq!(parse_move_line("8 同　銀(42)", &mut prev), Ok(token("4b3c")));
        assert_eq!(prev, Square::parse("3c"));
        assert_eq!(parse_move_line("8 同銀(42)", &mut prev), Ok(token("4b3c")));
        assert_eq!(parse_one("8 同　銀(42)"), Err(ParseErrorKind::MissingPrevious));
    }

    #[test]
    fn test_drops() {
        assert_eq!(parse_one("21 ５五角打"), Ok(token("B*5e")));
        assert_eq!(parse_one("21 ５五馬打"), Err(ParseErrorKind::InvalidDrop("馬".into())));
        assert_eq!(parse_one("21 ５五角打(77)"), Err(ParseErrorKind::MalformedMove));
        assert_eq!(parse_one("21 ５五角"), Err(ParseErrorKind::MalformedMove));
    }

    #[test]
    fn test_terminals() {
        let cases = [
            ("10 投了   ( 0:05/00:10:15)", "resign"),
            ("10 詰み", "resign"),
            ("10 中断", "interrupt"),
            ("10 持将棋", "repetition"),
            ("10 千日手", "sennichite"),
            ("10 切れ負け", "timeout"),
            ("10 時間切れ", "timeout"),
            ("10 反則負け", "foul"),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_one(line), Ok(token(expected)), "{line}");
        }
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_one("1 ほげ"), Err(ParseErrorKind::MalformedMove));
        assert_eq!(parse_one("1 ０六歩(27)"), Err(ParseErrorKind::MalformedMove));
    }
}
