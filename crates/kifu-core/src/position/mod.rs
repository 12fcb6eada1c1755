//! 局面表現モジュール
//!
//! - `Piece`: 盤上の駒（駒種 + 持ち主）
//! - `Hand`: 持ち駒（駒種ごとの枚数）
//! - `Position`: 盤面 81 升 + 先後の持ち駒。手番は持たない（呼び出し側が管理する）
//! - sfenx 形式の解析・出力と 180 度回転（`flip_sfenx`）
//! - 指し手の適用（`Position::apply`）
//!
//! 合法手の判定は行わない。`apply` は呼び出し側が `movegen` で求めた
//! 移動先集合などで事前に検証した手を受け取る前提。

mod apply;
mod hand;
mod sfenx;

pub use hand::Hand;
pub use sfenx::{HIRATE, flip_sfenx, flip_snapshot};

use crate::types::{PieceKind, Side, Square};

/// 盤上の駒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, owner: Side) -> Piece {
        Piece { kind, owner }
    }

    /// sfenx 用の文字（先手は大文字、後手は小文字）
    pub const fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.owner {
            Side::Sente => c,
            Side::Gote => c.to_ascii_lowercase(),
        }
    }

    /// sfenx 用の文字から駒へ
    pub const fn from_char(c: char) -> Option<Piece> {
        let owner = if c.is_ascii_uppercase() { Side::Sente } else { Side::Gote };
        match PieceKind::from_char(c) {
            Some(kind) => Some(Piece { kind, owner }),
            None => None,
        }
    }
}

/// 局面（盤面 + 持ち駒）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],
    hands: [Hand; Side::NUM],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// 駒のない局面
    pub const fn empty() -> Position {
        Position {
            board: [None; Square::NUM],
            hands: [Hand::EMPTY; Side::NUM],
        }
    }

    /// 平手初期局面
    pub fn hirate() -> Position {
        let mut pos = Position::empty();
        let back = [
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::King,
            PieceKind::Gold,
            PieceKind::Silver,
            PieceKind::Knight,
            PieceKind::Lance,
        ];
        for col in 0..9u8 {
            let kind = back[col as usize];
            pos.put(0, col, Piece::new(kind, Side::Gote));
            pos.put(2, col, Piece::new(PieceKind::Pawn, Side::Gote));
            pos.put(6, col, Piece::new(PieceKind::Pawn, Side::Sente));
            pos.put(8, col, Piece::new(kind, Side::Sente));
        }
        pos.put(1, 1, Piece::new(PieceKind::Bishop, Side::Gote));
        pos.put(1, 7, Piece::new(PieceKind::Rook, Side::Gote));
        pos.put(7, 1, Piece::new(PieceKind::Rook, Side::Sente));
        pos.put(7, 7, Piece::new(PieceKind::Bishop, Side::Sente));
        pos
    }

    fn put(&mut self, row: u8, col: u8, piece: Piece) {
        self.board[row as usize * 9 + col as usize] = Some(piece);
    }

    /// 升にある駒
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// 升に駒を置く（`None` で取り除く）
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }

    /// 持ち駒
    #[inline]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side.index()]
    }

    #[inline]
    pub fn hand_mut(&mut self, side: Side) -> &mut Hand {
        &mut self.hands[side.index()]
    }

    /// 駒のある升を列挙
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|pc| (sq, pc)))
    }

    /// 盤を 180 度回転し、先後を入れ替えた局面
    ///
    /// `flip_sfenx(&p.to_sfenx())` と同じ局面になる。
    pub fn flipped(&self) -> Position {
        let mut out = Position::empty();
        for (sq, pc) in self.pieces() {
            out.set_piece(sq.flipped(), Some(Piece::new(pc.kind, !pc.owner)));
        }
        out.hands = [self.hands[1], self.hands[0]];
        out
    }
}
