//! 指し手トークン（MoveToken）
//!
//! テキスト表現:
//! - 盤上の移動: `7g7f`、成りは `8h2b+`
//! - 駒打ち: `P*5e`（駒種は大文字の生駒のみ）
//! - 終局: `resign` / `timeout` / `interrupt` / `repetition` / `sennichite` / `foul`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{PieceKind, Square};
use crate::error::FormatError;

/// 終局の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// 投了
    Resign,
    /// 切れ負け
    Timeout,
    /// 中断
    Interrupt,
    /// 持将棋
    Repetition,
    /// 千日手
    Sennichite,
    /// 反則負け
    Foul,
}

impl Terminal {
    pub const ALL: [Terminal; 6] = [
        Terminal::Resign,
        Terminal::Timeout,
        Terminal::Interrupt,
        Terminal::Repetition,
        Terminal::Sennichite,
        Terminal::Foul,
    ];

    /// トークン文字列
    pub const fn as_str(self) -> &'static str {
        match self {
            Terminal::Resign => "resign",
            Terminal::Timeout => "timeout",
            Terminal::Interrupt => "interrupt",
            Terminal::Repetition => "repetition",
            Terminal::Sennichite => "sennichite",
            Terminal::Foul => "foul",
        }
    }

    /// 棋譜表示用の文字列
    pub const fn display(self) -> &'static str {
        match self {
            Terminal::Resign => "投了",
            Terminal::Timeout => "切れ負け",
            Terminal::Interrupt => "中断",
            Terminal::Repetition => "持将棋",
            Terminal::Sennichite => "千日手",
            Terminal::Foul => "反則負け",
        }
    }

    /// この終局を宣言した側が負けになるか
    pub const fn is_loss(self) -> bool {
        matches!(self, Terminal::Resign | Terminal::Timeout | Terminal::Foul)
    }

    fn from_token(s: &str) -> Option<Terminal> {
        Terminal::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveToken {
    /// 盤上の駒の移動
    Board { from: Square, to: Square, promote: bool },
    /// 持ち駒を打つ
    Drop { kind: PieceKind, to: Square },
    /// 終局
    Terminal(Terminal),
}

impl MoveToken {
    /// 移動先（終局なら `None`）
    pub const fn destination(&self) -> Option<Square> {
        match *self {
            MoveToken::Board { to, .. } | MoveToken::Drop { to, .. } => Some(to),
            MoveToken::Terminal(_) => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, MoveToken::Terminal(_))
    }

    /// 盤を180度回転した指し手（終局はそのまま）
    pub const fn flipped(self) -> MoveToken {
        match self {
            MoveToken::Board { from, to, promote } => MoveToken::Board {
                from: from.flipped(),
                to: to.flipped(),
                promote,
            },
            MoveToken::Drop { kind, to } => MoveToken::Drop { kind, to: to.flipped() },
            MoveToken::Terminal(t) => MoveToken::Terminal(t),
        }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Board { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if *promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            MoveToken::Drop { kind, to } => write!(f, "{}*{to}", kind.to_char()),
            MoveToken::Terminal(t) => f.write_str(t.as_str()),
        }
    }
}

impl FromStr for MoveToken {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::MoveToken(s.to_string());

        if let Some(t) = Terminal::from_token(s) {
            return Ok(MoveToken::Terminal(t));
        }

        if let Some((piece, to)) = s.split_once('*') {
            let mut chars = piece.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(invalid());
            };
            if !c.is_ascii_uppercase() {
                return Err(invalid());
            }
            let kind = PieceKind::from_char(c)
                .filter(|k| k.is_hand_kind())
                .ok_or_else(invalid)?;
            let to = Square::parse(to).ok_or_else(invalid)?;
            return Ok(MoveToken::Drop { kind, to });
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(invalid());
        }
        let from = Square::parse(&body[..2]).ok_or_else(invalid)?;
        let to = Square::parse(&body[2..]).ok_or_else(invalid)?;
        Ok(MoveToken::Board { from, to, promote })
    }
}

impl Serialize for MoveToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoveToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> MoveToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_board_move() {
        let m = token("7g7f");
        assert_eq!(
            m,
            MoveToken::Board {
                from: Square::parse("7g").unwrap(),
                to: Square::parse("7f").unwrap(),
                promote: false,
            }
        );
        assert_eq!(m.to_string(), "7g7f");
        assert_eq!(token("8h2b+").to_string(), "8h2b+");
    }

    #[test]
    fn test_parse_drop() {
        let m = token("P*5e");
        assert_eq!(
            m,
            MoveToken::Drop {
                kind: PieceKind::Pawn,
                to: Square::parse("5e").unwrap()
            }
        );
        assert_eq!(m.to_string(), "P*5e");
        assert!("p*5e".parse::<MoveToken>().is_err());
        assert!("K*5e".parse::<MoveToken>().is_err());
        assert!("T*5e".parse::<MoveToken>().is_err());
    }

    #[test]
    fn test_parse_terminal() {
        for t in Terminal::ALL {
            assert_eq!(token(t.as_str()), MoveToken::Terminal(t));
        }
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "7g7", "7g7f++", "0a1a", "7g7j", "resign ", "P*", "*5e", "７g7f"] {
            assert!(s.parse::<MoveToken>().is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn test_flipped() {
        assert_eq!(token("7g7f").flipped().to_string(), "3c3d");
        assert_eq!(token("8h2b+").flipped().to_string(), "2b8h+");
        assert_eq!(token("P*5e").flipped().to_string(), "P*5e");
        assert_eq!(token("G*1a").flipped().to_string(), "G*9i");
        assert_eq!(token("resign").flipped(), token("resign"));
    }

    #[test]
    fn test_serde_as_text() {
        let json = serde_json::to_string(&token("2b3c")).unwrap();
        assert_eq!(json, "\"2b3c\"");
        let back: MoveToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token("2b3c"));
        assert!(serde_json::from_str::<MoveToken>("\"bogus\"").is_err());
    }
}
