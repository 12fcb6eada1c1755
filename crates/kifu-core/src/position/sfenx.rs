//! sfenx 形式の解析・出力
//!
//! `<盤面> <持ち駒8文字>`
//!
//! - 盤面: 1段目から9段目へ、各段は col 0 から col 8 へ走査する。
//!   空き升の連続は 1〜9 の数字1文字（段をまたがない）、駒は1文字
//!   （大文字 = 先手、小文字 = 後手）。
//! - 持ち駒: 先手4文字 + 後手4文字。各文字は `'a' + 値`。
//!   値は [歩, 香 + 桂*5, 銀 + 金*5, 角 + 飛*5]。

use std::fmt;
use std::str::FromStr;

use super::{Hand, Piece, Position};
use crate::error::FormatError;
use crate::types::{PieceKind, Side, Square};

/// 平手初期局面の sfenx
pub const HIRATE: &str = "lnsgkgsnl1b5r1ppppppppp999PPPPPPPPP1R5B1LNSGKGSNL aaaaaaaa";

/// 持ち駒欄の並び（単独 or 2種を 5 進で詰める）
const HAND_FIELDS: [(PieceKind, Option<PieceKind>); 4] = [
    (PieceKind::Pawn, None),
    (PieceKind::Lance, Some(PieceKind::Knight)),
    (PieceKind::Silver, Some(PieceKind::Gold)),
    (PieceKind::Bishop, Some(PieceKind::Rook)),
];

fn invalid(input: &str, reason: &'static str) -> FormatError {
    FormatError::Position { input: input.to_string(), reason }
}

/// 文字列を盤面部と持ち駒部に分ける
fn split(input: &str) -> Result<(&str, &str), FormatError> {
    let (grid, captures) =
        input.split_once(' ').ok_or_else(|| invalid(input, "missing separator"))?;
    if captures.len() != 8 || !captures.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(invalid(input, "captures must be 8 lowercase letters"));
    }
    if !grid.bytes().all(|b| b.is_ascii_alphabetic() || (b'1'..=b'9').contains(&b)) {
        return Err(invalid(input, "unexpected character in board"));
    }
    Ok((grid, captures))
}

impl Position {
    /// sfenx 文字列から局面を生成
    ///
    /// エンコーダが出力する正規形のみ受け付ける（空き升の連続は段をまたがず、
    /// 同じ段の中で数字が連続しない）。
    pub fn from_sfenx(input: &str) -> Result<Position, FormatError> {
        let (grid, captures) = split(input)?;
        let mut pos = Position::empty();

        let mut index = 0usize;
        let mut prev_digit = false;
        for c in grid.chars() {
            if index >= Square::NUM {
                return Err(invalid(input, "too many cells"));
            }
            let col = index % 9;
            if col == 0 {
                prev_digit = false;
            }
            if let Some(run) = c.to_digit(10) {
                let run = run as usize;
                if prev_digit {
                    return Err(invalid(input, "adjacent empty runs"));
                }
                if col + run > 9 {
                    return Err(invalid(input, "empty run crosses a row"));
                }
                index += run;
                prev_digit = true;
            } else {
                let piece = Piece::from_char(c).ok_or_else(|| invalid(input, "unknown piece"))?;
                pos.board[index] = Some(piece);
                index += 1;
                prev_digit = false;
            }
        }
        if index != Square::NUM {
            return Err(invalid(input, "board must have 81 cells"));
        }

        let bytes = captures.as_bytes();
        pos.hands[Side::Sente.index()] = decode_hand(&bytes[..4])?;
        pos.hands[Side::Gote.index()] = decode_hand(&bytes[4..])?;
        Ok(pos)
    }

    /// sfenx 文字列を出力
    pub fn to_sfenx(&self) -> String {
        let mut out = String::with_capacity(100);
        for row in 0..9 {
            let mut empty = 0u8;
            for col in 0..9 {
                match self.board[row * 9 + col] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
        }
        out.push(' ');
        encode_hand(&self.hands[Side::Sente.index()], &mut out);
        encode_hand(&self.hands[Side::Gote.index()], &mut out);
        out
    }
}

fn encode_hand(hand: &Hand, out: &mut String) {
    for (low, high) in HAND_FIELDS {
        let mut value = hand.count(low);
        if let Some(high) = high {
            value += hand.count(high) * 5;
        }
        out.push((b'a' + value) as char);
    }
}

fn decode_hand(field: &[u8]) -> Result<Hand, FormatError> {
    let mut hand = Hand::EMPTY;
    for (&b, (low, high)) in field.iter().zip(HAND_FIELDS) {
        let value = b - b'a';
        let (low_count, high_count) = match high {
            Some(_) => (value % 5, value / 5),
            None => (value, 0),
        };
        if !hand.set(low, low_count) {
            return Err(FormatError::HandCount { kind: low, count: low_count });
        }
        if let Some(high) = high {
            if !hand.set(high, high_count) {
                return Err(FormatError::HandCount { kind: high, count: high_count });
            }
        }
    }
    Ok(hand)
}

/// sfenx 文字列を 180 度回転し、先後を入れ替える
///
/// 盤面部を逆順にして大文字・小文字を入れ替え、持ち駒の前半と後半を入れ替える。
/// 2回適用すると元に戻る。
pub fn flip_sfenx(input: &str) -> Result<String, FormatError> {
    let (grid, captures) = split(input)?;
    Ok(flip_parts(grid, captures))
}

/// 検証を省いた `flip_sfenx`（`to_sfenx` が出力した文字列に使う）
///
/// 形式が崩れている場合も文字列全体を逆順・大小反転するだけで失敗しない。
pub fn flip_snapshot(sfenx: &str) -> String {
    match sfenx.split_once(' ') {
        Some((grid, captures)) if captures.len() == 8 && captures.is_ascii() => {
            flip_parts(grid, captures)
        }
        _ => flip_grid(sfenx),
    }
}

fn flip_grid(grid: &str) -> String {
    grid.chars()
        .rev()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn flip_parts(grid: &str, captures: &str) -> String {
    let mut out = flip_grid(grid);
    out.push(' ');
    out.push_str(&captures[4..]);
    out.push_str(&captures[..4]);
    out
}

impl FromStr for Position {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_sfenx(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sfenx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hirate_roundtrip() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        assert_eq!(pos, Position::hirate());
        assert_eq!(pos.to_sfenx(), HIRATE);
    }

    #[test]
    fn test_empty_board() {
        let pos = Position::from_sfenx("999999999 aaaaaaaa").unwrap();
        assert_eq!(pos, Position::empty());
        assert_eq!(Position::empty().to_sfenx(), "999999999 aaaaaaaa");
    }

    #[test]
    fn test_full_hand() {
        let pos = Position::from_sfenx("999999999 syymaaaa").unwrap();
        let hand = pos.hand(Side::Sente);
        assert_eq!(hand.count(PieceKind::Pawn), 18);
        assert_eq!(hand.count(PieceKind::Lance), 4);
        assert_eq!(hand.count(PieceKind::Knight), 4);
        assert_eq!(hand.count(PieceKind::Silver), 4);
        assert_eq!(hand.count(PieceKind::Gold), 4);
        assert_eq!(hand.count(PieceKind::Bishop), 2);
        assert_eq!(hand.count(PieceKind::Rook), 2);
        assert!(pos.hand(Side::Gote).is_empty());
        assert_eq!(pos.to_sfenx(), "999999999 syymaaaa");
    }

    #[test]
    fn test_board_full_of_pawns() {
        let sente = "P".repeat(81) + " aaaaaaaa";
        let pos = Position::from_sfenx(&sente).unwrap();
        assert!(pos.pieces().all(|(_, pc)| pc == Piece::new(PieceKind::Pawn, Side::Sente)));
        assert_eq!(pos.to_sfenx(), sente);

        let gote = "p".repeat(81) + " aaaaaaaa";
        let pos = Position::from_sfenx(&gote).unwrap();
        assert!(pos.pieces().all(|(_, pc)| pc.owner == Side::Gote));
    }

    #[test]
    fn test_rejects_malformed() {
        let cases = [
            "",
            "999999999",
            "999999999 aaaaaaa",
            "999999999 aaaaaaaaa",
            "999999999 Aaaaaaaa",
            "99999999 aaaaaaaa",
            "9999999991 aaaaaaaa",
            "0999999999 aaaaaaaa",
            "X99999999 aaaaaaaa",
            "54999999999 aaaaaaaa",
            "1899999999 aaaaaaaa",
            "999999999 zaaaaaaa",
            "999999999 aaaoaaaa",
        ];
        for case in cases {
            assert!(Position::from_sfenx(case).is_err(), "{case:?} should be rejected");
        }
    }

    #[test]
    fn test_flip_hirate() {
        assert_eq!(flip_sfenx(HIRATE).unwrap(), HIRATE);
    }

    #[test]
    fn test_flip_swaps_owner_and_hands() {
        let s = "8k9999999K8 baaaaaab";
        let flipped = flip_sfenx(s).unwrap();
        assert_eq!(flipped, "8k9999999K8 aaabbaaa");
        assert_eq!(flip_sfenx(&flipped).unwrap(), s);
    }

    #[test]
    fn test_flip_snapshot_matches_checked_flip() {
        assert_eq!(flip_snapshot(HIRATE), flip_sfenx(HIRATE).unwrap());
        assert_eq!(flip_snapshot("8k9999999K8 baaaaaab"), "8k9999999K8 aaabbaaa");
    }

    #[test]
    fn test_flip_matches_position_flipped() {
        let s = "lnsgkgsnl1B5r1pp1pppppp2p696P2PPPPPP1PP1R7LNSGKGSNL aaabaaaa";
        let pos = Position::from_sfenx(s).unwrap();
        assert_eq!(pos.flipped().to_sfenx(), flip_sfenx(s).unwrap());
    }
}
