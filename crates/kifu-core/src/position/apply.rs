//! 指し手の適用

use super::{Piece, Position};
use crate::error::PreconditionError;
use crate::types::{MoveToken, Side, Square};

impl Position {
    /// 成りを選べる手か
    ///
    /// 移動元か移動先が敵陣三段に入っていて、かつ `from` の駒に成駒がある場合に真。
    pub fn promotion_available(&self, from: Square, to: Square) -> bool {
        match self.piece_on(from) {
            Some(pc) => {
                pc.kind.can_promote()
                    && (pc.owner.in_promotion_zone(from.row())
                        || pc.owner.in_promotion_zone(to.row()))
            }
            None => false,
        }
    }

    /// 成れない駒に付いた成りフラグを外す
    ///
    /// 金・玉・成駒の移動で `promote` が立っていても適用結果は変わらないが、
    /// 同じ手がトークンとして等しくなるように正規化する。
    pub fn normalize(&self, token: MoveToken) -> MoveToken {
        match token {
            MoveToken::Board { from, to, promote: true }
                if !self.piece_on(from).is_some_and(|pc| pc.kind.can_promote()) =>
            {
                MoveToken::Board { from, to, promote: false }
            }
            other => other,
        }
    }

    /// 指し手を適用する
    ///
    /// 合法性は検証しない。盤上の移動では駒の持ち主が取った駒を受け取り、
    /// 駒打ちでは `mover` の持ち駒から1枚減らす。終局トークンは何もしない。
    /// エラー時は局面を変更しない。
    pub fn apply(&mut self, token: MoveToken, mover: Side) -> Result<(), PreconditionError> {
        match token {
            MoveToken::Board { from, to, promote } => {
                let piece = self.piece_on(from).ok_or(PreconditionError::EmptySource(from))?;
                if let Some(captured) = self.piece_on(to) {
                    let kind = captured.kind.unpromote();
                    if !self.hand_mut(piece.owner).add(kind) {
                        return Err(PreconditionError::HandOverflow { side: piece.owner, kind });
                    }
                }
                let kind = match piece.kind.promote() {
                    Some(promoted) if promote => promoted,
                    _ => piece.kind,
                };
                self.set_piece(from, None);
                self.set_piece(to, Some(Piece::new(kind, piece.owner)));
                Ok(())
            }
            MoveToken::Drop { kind, to } => {
                if self.piece_on(to).is_some() {
                    return Err(PreconditionError::OccupiedTarget(to));
                }
                if !self.hand_mut(mover).take(kind) {
                    return Err(PreconditionError::NotInHand { side: mover, kind });
                }
                self.set_piece(to, Some(Piece::new(kind, mover)));
                Ok(())
            }
            MoveToken::Terminal(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::HIRATE;
    use crate::types::PieceKind;

    fn token(s: &str) -> MoveToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_apply_opening() {
        let mut pos = Position::from_sfenx(HIRATE).unwrap();
        pos.apply(token("7g7f"), Side::Sente).unwrap();
        pos.apply(token("3c3d"), Side::Gote).unwrap();
        pos.apply(token("8h2b+"), Side::Sente).unwrap();
        assert_eq!(
            pos.to_sfenx(),
            "lnsgkgsnl1H5r1pp1pppppp2p696P2PPPPPP1PP1R7LNSGKGSNL aaabaaaa"
        );
        assert_eq!(pos.hand(Side::Sente).count(PieceKind::Bishop), 1);
    }

    #[test]
    fn test_capture_of_promoted_piece_reverts() {
        let mut pos = Position::empty();
        let a = Square::parse("5e").unwrap();
        let b = Square::parse("5d").unwrap();
        pos.set_piece(a, Some(Piece::new(PieceKind::Gold, Side::Sente)));
        pos.set_piece(b, Some(Piece::new(PieceKind::Dragon, Side::Gote)));
        pos.apply(token("5e5d"), Side::Sente).unwrap();
        assert_eq!(pos.hand(Side::Sente).count(PieceKind::Rook), 1);
        assert_eq!(pos.piece_on(b), Some(Piece::new(PieceKind::Gold, Side::Sente)));
        assert_eq!(pos.piece_on(a), None);
    }

    #[test]
    fn test_drop_decrements_hand() {
        let mut pos = Position::from_sfenx("999999999 aaacaaaa").unwrap();
        pos.apply(token("B*5e"), Side::Sente).unwrap();
        assert_eq!(pos.hand(Side::Sente).count(PieceKind::Bishop), 1);
        pos.apply(token("B*5d"), Side::Sente).unwrap();
        assert!(pos.hand(Side::Sente).is_empty());
        assert_eq!(pos.to_sfenx(), "9994B44B49999 aaaaaaaa");
    }

    #[test]
    fn test_drop_without_hand_fails() {
        let mut pos = Position::empty();
        let before = pos.clone();
        assert_eq!(
            pos.apply(token("G*5e"), Side::Gote),
            Err(PreconditionError::NotInHand { side: Side::Gote, kind: PieceKind::Gold })
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn test_empty_source_fails() {
        let mut pos = Position::from_sfenx(HIRATE).unwrap();
        assert_eq!(
            pos.apply(token("5e5d"), Side::Sente),
            Err(PreconditionError::EmptySource(Square::parse("5e").unwrap()))
        );
    }

    #[test]
    fn test_promote_flag_ignored_for_gold() {
        let mut pos = Position::empty();
        pos.set_piece(
            Square::parse("5d").unwrap(),
            Some(Piece::new(PieceKind::Gold, Side::Sente)),
        );
        let m = token("5d5c+");
        assert_eq!(pos.normalize(m), token("5d5c"));
        pos.apply(m, Side::Sente).unwrap();
        assert_eq!(
            pos.piece_on(Square::parse("5c").unwrap()),
            Some(Piece::new(PieceKind::Gold, Side::Sente))
        );
    }

    #[test]
    fn test_promotion_available() {
        let pos = Position::from_sfenx(HIRATE).unwrap();
        let sq = |s: &str| Square::parse(s).unwrap();
        assert!(!pos.promotion_available(sq("7g"), sq("7f")));
        assert!(pos.promotion_available(sq("8h"), sq("2b")));
        // 金は成れない
        assert!(!pos.promotion_available(sq("6i"), sq("6a")));
        // 後手は 7〜9 段目
        assert!(pos.promotion_available(sq("2b"), sq("8h")));
        assert!(!pos.promotion_available(sq("5e"), sq("5a")));
    }

    #[test]
    fn test_terminal_is_noop() {
        let mut pos = Position::from_sfenx(HIRATE).unwrap();
        pos.apply(token("resign"), Side::Sente).unwrap();
        assert_eq!(pos.to_sfenx(), HIRATE);
    }
}
