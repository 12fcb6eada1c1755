//! CSA 形式
//!
//! ```text
//! V2.2
//! N+hashiryo1
//! N-hashiryo2
//! $START_TIME:2025/06/08 13:46:40
//! P1-KY-KE-GI-KI-OU-KI-GI-KE-KY
//! ...
//! +
//! +7776FU,T3
//! -3334FU
//! %TORYO
//! ```
//!
//! 開始局面（`P` 行）は読まない。指し手は常に平手初期局面からのものとして扱う。

use std::sync::LazyLock;

use kifu_core::types::{MoveToken, PieceKind, Square, Terminal};
use log::{debug, trace, warn};
use regex::Regex;

use crate::GameRecord;
use crate::error::{ParseError, ParseErrorKind};

static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])(\d)(\d)(\d)(\d)([A-Z]{2})$").expect("valid move pattern")
});

fn piece_from_code(code: &str) -> Option<PieceKind> {
    let kind = match code {
        "FU" => PieceKind::Pawn,
        "KY" => PieceKind::Lance,
        "KE" => PieceKind::Knight,
        "GI" => PieceKind::Silver,
        "KI" => PieceKind::Gold,
        "KA" => PieceKind::Bishop,
        "HI" => PieceKind::Rook,
        "OU" => PieceKind::King,
        "TO" => PieceKind::ProPawn,
        "NY" => PieceKind::ProLance,
        "NK" => PieceKind::ProKnight,
        "NG" => PieceKind::ProSilver,
        "UM" => PieceKind::Horse,
        "RY" => PieceKind::Dragon,
        _ => return None,
    };
    Some(kind)
}

/// `%` で始まる特殊手
///
/// 終局トークンにならないもの（`%KACHI` `%HIKIWAKE`）は結果の文言だけを返す。
fn special_move(command: &str) -> Option<(Option<Terminal>, &'static str)> {
    let special = match command {
        "TORYO" => (Some(Terminal::Resign), "投了"),
        "TSUMI" => (Some(Terminal::Resign), "詰み"),
        "CHUDAN" => (Some(Terminal::Interrupt), "中断"),
        "SENNICHITE" => (Some(Terminal::Sennichite), "千日手"),
        "TIME_UP" | "TIMEOUT" => (Some(Terminal::Timeout), "切れ負け"),
        "ILLEGAL_MOVE" => (Some(Terminal::Foul), "反則負け"),
        "JISHOGI" => (Some(Terminal::Repetition), "持将棋"),
        "KACHI" => (None, "勝ち宣言"),
        "HIKIWAKE" => (None, "引き分け"),
        _ => return None,
    };
    Some(special)
}

fn square(file: &str, rank: &str) -> Result<Square, ParseErrorKind> {
    let file: u8 = file.parse().map_err(|_| ParseErrorKind::InvalidSquare)?;
    let rank: u8 = rank.parse().map_err(|_| ParseErrorKind::InvalidSquare)?;
    if !(1..=9).contains(&file) || !(1..=9).contains(&rank) {
        return Err(ParseErrorKind::InvalidSquare);
    }
    Square::new(rank - 1, file - 1).ok_or(ParseErrorKind::InvalidSquare)
}

/// `+7776FU` 形式の1手
///
/// 成駒のコードで動いた手は、移動元の駒が成っていなければ成りとして扱う。
/// 元から成駒だった場合の成りフラグは局面側の正規化で外れる。
fn parse_move(statement: &str) -> Result<MoveToken, ParseErrorKind> {
    let caps = MOVE_RE.captures(statement).ok_or(ParseErrorKind::MalformedMove)?;
    let code = &caps[6];
    let kind = piece_from_code(code).ok_or_else(|| ParseErrorKind::UnknownPiece(code.into()))?;
    let to = square(&caps[4], &caps[5])?;

    if &caps[2] == "0" && &caps[3] == "0" {
        if !kind.is_hand_kind() {
            return Err(ParseErrorKind::InvalidDrop(code.into()));
        }
        return Ok(MoveToken::Drop { kind, to });
    }
    let from = square(&caps[2], &caps[3])?;
    Ok(MoveToken::Board { from, to, promote: kind.is_promoted() })
}

/// CSA 形式の文字列を解析する
///
/// 1行に `,` で区切った複数の文を書ける。`T`（消費時間）などの付帯情報は無視する。
pub fn parse_csa(text: &str) -> Result<GameRecord, ParseError> {
    debug!("parsing CSA ({} bytes)", text.len());
    let mut record = GameRecord::default();
    let mut finished = false;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }

        // 行全体で1項目になるもの
        if let Some(comment) = line.strip_prefix('\'') {
            if record.metadata.event.is_none() && !comment.trim().is_empty() {
                record.metadata.event = Some(comment.trim().to_string());
            }
            continue;
        }
        if let Some(name) = line.strip_prefix("N+") {
            record.metadata.black_player = Some(name.trim().to_string());
            continue;
        }
        if let Some(name) = line.strip_prefix("N-") {
            record.metadata.white_player = Some(name.trim().to_string());
            continue;
        }
        if let Some(info) = line.strip_prefix('$') {
            let slot = match info.split_once(':') {
                Some(("EVENT", v)) => Some((&mut record.metadata.event, v)),
                Some(("START_TIME", v)) => Some((&mut record.metadata.start_time, v)),
                Some(("END_TIME", v)) => Some((&mut record.metadata.end_time, v)),
                _ => None,
            };
            match slot {
                Some((field, value)) => *field = Some(value.to_string()),
                None => trace!("line {number}: skipped {line:?}"),
            }
            continue;
        }

        for statement in line.split(',').map(str::trim) {
            if statement.is_empty()
                || statement == "+"
                || statement == "-"
                || statement.starts_with(['V', 'P', 'T'])
            {
                continue;
            }

            if let Some(command) = statement.strip_prefix('%') {
                let Some((terminal, result)) = special_move(command) else {
                    warn!("line {number}: unknown special move {statement:?}");
                    continue;
                };
                if finished {
                    warn!("line {number}: {statement:?} after the game ended is ignored");
                    continue;
                }
                record.metadata.result = Some(result.to_string());
                if let Some(terminal) = terminal {
                    record.moves.push(MoveToken::Terminal(terminal));
                    finished = true;
                }
                continue;
            }

            if statement.starts_with(['+', '-']) {
                if finished {
                    warn!("line {number}: move after the game ended is ignored");
                    continue;
                }
                let token = parse_move(statement)
                    .map_err(|kind| ParseError::new(number, line, kind))?;
                trace!("line {number}: {token}");
                record.moves.push(token);
                continue;
            }

            trace!("line {number}: skipped {statement:?}");
        }
    }

    debug!("parsed {} moves", record.moves.len());
    Ok(record)
}
