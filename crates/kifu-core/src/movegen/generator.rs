//! 移動先の生成
//!
//! 王手・自殺手の判定は行わない。利きが届き、自駒で塞がれていない升を返す。

use super::tables::steps;
use crate::position::{Piece, Position};
use crate::types::{PieceKind, Side, Square, SquareSet};

/// 行き所のない駒を打てない段数（相手陣の奥から数えて）
const fn dead_rows(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn | PieceKind::Lance => 1,
        PieceKind::Knight => 2,
        _ => 0,
    }
}

impl Position {
    /// 盤上の駒の移動先
    ///
    /// 空き升は含めて進み続け、相手の駒がある升は含めて止まり、
    /// 自分の駒がある升は含めずに止まる。駒がない升なら空集合。
    pub fn destinations(&self, from: Square) -> SquareSet {
        let Some(piece) = self.piece_on(from) else {
            return SquareSet::EMPTY;
        };
        let sign = match piece.owner {
            Side::Sente => 1,
            Side::Gote => -1,
        };

        let mut set = SquareSet::EMPTY;
        for step in steps(piece.kind) {
            let dr = step.dr * sign;
            let mut row = from.row() as i8 + dr;
            let mut col = from.col() as i8 + step.dc;
            while let Some(to) = Square::from_signed(row, col) {
                match self.piece_on(to) {
                    Some(other) if other.owner == piece.owner => break,
                    Some(_) => {
                        set.insert(to);
                        break;
                    }
                    None => set.insert(to),
                }
                if !step.slides {
                    break;
                }
                row += dr;
                col += step.dc;
            }
        }
        set
    }

    /// 駒打ちの打てる升
    ///
    /// 空き升のうち、行き所のない段と二歩になる筋を除いたもの。
    /// 持ち駒にあるかどうかは見ない。
    pub fn drop_destinations(&self, kind: PieceKind, owner: Side) -> SquareSet {
        let mut pawn_cols = [false; 9];
        if kind == PieceKind::Pawn {
            for (sq, pc) in self.pieces() {
                if pc == Piece::new(PieceKind::Pawn, owner) {
                    pawn_cols[sq.col() as usize] = true;
                }
            }
        }

        let dead = dead_rows(kind);
        Square::all()
            .filter(|&sq| self.piece_on(sq).is_none())
            .filter(|&sq| owner.relative_row(sq.row()) >= dead)
            .filter(|&sq| !pawn_cols[sq.col() as usize])
            .collect()
    }

    /// `piece` と同じ駒（駒種・持ち主）のうち、`to` へ動ける駒の升
    pub fn pieces_reaching(&self, piece: Piece, to: Square) -> Vec<Square> {
        self.pieces()
            .filter(|&(sq, pc)| pc == piece && self.destinations(sq).contains(to))
            .map(|(sq, _)| sq)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::HIRATE;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn squares(set: SquareSet) -> Vec<String> {
        let mut v: Vec<String> = set.iter().map(|s| s.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_hirate_pawn_and_knight() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        assert_eq!(squares(pos.destinations(sq("7g"))), vec!["7f"]);
        assert_eq!(squares(pos.destinations(sq("3c"))), vec!["3d"]);
        assert!(pos.destinations(sq("8i")).is_empty());
        assert!(pos.destinations(sq("5e")).is_empty());
    }

    #[test]
    fn test_hirate_rook_and_lance() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        assert_eq!(
            squares(pos.destinations(sq("2h"))),
            vec!["1h", "3h", "4h", "5h", "6h", "7h"]
        );
        assert_eq!(squares(pos.destinations(sq("1i"))), vec!["1h"]);
    }

    #[test]
    fn test_slide_stops_at_capture() {
        let mut pos = Position::empty();
        pos.set_piece(sq("1f"), Some(Piece::new(PieceKind::Rook, Side::Sente)));
        pos.set_piece(sq("5f"), Some(Piece::new(PieceKind::Pawn, Side::Gote)));
        let dests = pos.destinations(sq("1f"));
        assert!(dests.contains(sq("1a")));
        assert!(dests.contains(sq("5f")));
        assert!(!dests.contains(sq("6f")));
        assert_eq!(dests.len(), 5 + 3 + 4);
    }

    #[test]
    fn test_gote_moves_downward() {
        let mut pos = Position::empty();
        pos.set_piece(sq("5e"), Some(Piece::new(PieceKind::Silver, Side::Gote)));
        assert_eq!(
            squares(pos.destinations(sq("5e"))),
            vec!["4d", "4f", "5f", "6d", "6f"]
        );
    }

    #[test]
    fn test_knight_jumps() {
        let mut pos = Position::empty();
        pos.set_piece(sq("5e"), Some(Piece::new(PieceKind::Knight, Side::Sente)));
        pos.set_piece(sq("5d"), Some(Piece::new(PieceKind::Pawn, Side::Gote)));
        assert_eq!(squares(pos.destinations(sq("5e"))), vec!["4c", "6c"]);
    }

    #[test]
    fn test_drop_pawn_nifu_excludes_column() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        assert!(pos.drop_destinations(PieceKind::Pawn, Side::Sente).is_empty());

        let mut pos = Position::empty();
        pos.set_piece(sq("5g"), Some(Piece::new(PieceKind::Pawn, Side::Sente)));
        let dests = pos.drop_destinations(PieceKind::Pawn, Side::Sente);
        assert!((0..9).all(|row| !dests.contains(Square::new(row, 4).unwrap())));
        // 1段目には打てない
        assert!(!dests.contains(sq("1a")));
        assert!(dests.contains(sq("1b")));
        // 成った歩は二歩の対象外
        pos.set_piece(sq("5g"), Some(Piece::new(PieceKind::ProPawn, Side::Sente)));
        let dests = pos.drop_destinations(PieceKind::Pawn, Side::Sente);
        assert!(dests.contains(sq("5e")));
        // 後手は9段目に打てない
        let gote = pos.drop_destinations(PieceKind::Pawn, Side::Gote);
        assert!(gote.contains(sq("5a")));
        assert!(!gote.contains(sq("5i")));
    }

    #[test]
    fn test_drop_dead_rows() {
        let pos = Position::empty();
        let knight = pos.drop_destinations(PieceKind::Knight, Side::Sente);
        assert_eq!(knight.len(), 81 - 18);
        assert!(!knight.contains(sq("3b")));
        let lance = pos.drop_destinations(PieceKind::Lance, Side::Gote);
        assert_eq!(lance.len(), 81 - 9);
        assert!(!lance.contains(sq("3i")));
        assert_eq!(pos.drop_destinations(PieceKind::Gold, Side::Gote).len(), 81);
    }

    #[test]
    fn test_pieces_reaching() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        let gold = Piece::new(PieceKind::Gold, Side::Sente);
        assert_eq!(pos.pieces_reaching(gold, sq("5h")), vec![sq("4i"), sq("6i")]);
    }
}
