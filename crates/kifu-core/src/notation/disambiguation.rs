//! 同種の駒が複数ある場合の相対位置・動作の付記
//!
//! 移動先へ動ける同種・同じ持ち主の駒（候補）を、動かした側から見た
//! 横方向（左・なし・右）と縦方向（上・なし・下）で分類して数える。

use crate::position::{Piece, Position};
use crate::types::{PieceKind, Side, Square};

/// 横方向の区分（移動元から移動先への列の向き）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Horizontal {
    Left = 0,
    None = 1,
    Right = 2,
}

/// 縦方向の区分（移動元から移動先への行の向き）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Vertical {
    Up = 0,
    None = 1,
    Down = 2,
}

impl Vertical {
    /// 動作の付記（上・寄・引）
    const fn suffix(self) -> &'static str {
        match self {
            Vertical::Up => "上",
            Vertical::None => "寄",
            Vertical::Down => "引",
        }
    }
}

/// `from` から `to` への動きを `side` 視点で分類する
pub(crate) fn classify(side: Side, from: Square, to: Square) -> (Horizontal, Vertical) {
    let mut dr = to.row() as i8 - from.row() as i8;
    let mut dc = to.col() as i8 - from.col() as i8;
    if side == Side::Gote {
        dr = -dr;
        dc = -dc;
    }
    let h = match dc {
        d if d < 0 => Horizontal::Left,
        0 => Horizontal::None,
        _ => Horizontal::Right,
    };
    let v = match dr {
        d if d < 0 => Vertical::Up,
        0 => Vertical::None,
        _ => Vertical::Down,
    };
    (h, v)
}

/// 候補の数を [横][縦] で数えた表
#[derive(Debug, Default)]
pub(crate) struct Candidates {
    counts: [[u8; 3]; 3],
}

impl Candidates {
    /// `to` へ動ける `piece` を数える（`exclude` の升は除く）
    pub(crate) fn collect(
        pos: &Position,
        piece: Piece,
        to: Square,
        exclude: Option<Square>,
    ) -> Candidates {
        let mut c = Candidates::default();
        for sq in pos.pieces_reaching(piece, to) {
            if Some(sq) == exclude {
                continue;
            }
            let (h, v) = classify(piece.owner, sq, to);
            c.counts[h as usize][v as usize] += 1;
        }
        c
    }

    pub(crate) fn total(&self) -> u32 {
        self.counts.iter().flatten().map(|&n| n as u32).sum()
    }

    /// 横方向が `h` の候補数
    fn with_horizontal(&self, h: Horizontal) -> u32 {
        self.counts[h as usize].iter().map(|&n| n as u32).sum()
    }

    /// 縦方向が `v` の候補数
    fn with_vertical(&self, v: Vertical) -> u32 {
        self.counts.iter().map(|row| row[v as usize] as u32).sum()
    }

    fn at(&self, h: Horizontal, v: Vertical) -> u8 {
        self.counts[h as usize][v as usize]
    }

    /// 動かした駒の区分 `(h, v)` に対する付記（左・右・直・上・寄・引）
    pub(crate) fn suffix(&self, kind: PieceKind, h: Horizontal, v: Vertical) -> String {
        let same_vertical = self.with_vertical(v);
        let same_horizontal = self.with_horizontal(h);
        let mut out = String::new();
        let mut use_vertical = true;

        if same_vertical > 0 {
            if kind.is_long_range() {
                out.push_str(if self.at(Horizontal::Left, v) > 0 { "右" } else { "左" });
            } else {
                match h {
                    Horizontal::Left => out.push_str("左"),
                    Horizontal::Right => out.push_str("右"),
                    Horizontal::None => {
                        out.push_str("直");
                        use_vertical = false;
                    }
                }
            }
        }

        if (use_vertical && same_horizontal > 0) || (same_vertical == 0 && self.total() > 0) {
            out.push_str(v.suffix());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_classify_sente() {
        assert_eq!(
            classify(Side::Sente, sq(2, 8), sq(1, 7)),
            (Horizontal::Left, Vertical::Up)
        );
        assert_eq!(
            classify(Side::Sente, sq(1, 6), sq(1, 7)),
            (Horizontal::Right, Vertical::None)
        );
    }

    #[test]
    fn test_classify_gote_is_mirrored() {
        assert_eq!(
            classify(Side::Gote, sq(6, 0), sq(7, 1)),
            (Horizontal::Left, Vertical::Up)
        );
        assert_eq!(
            classify(Side::Gote, sq(4, 4), sq(5, 4)),
            (Horizontal::None, Vertical::Up)
        );
    }

    #[test]
    fn test_no_candidates_no_suffix() {
        let c = Candidates::default();
        assert_eq!(c.total(), 0);
        assert_eq!(c.suffix(PieceKind::Gold, Horizontal::None, Vertical::Up), "");
    }
}
