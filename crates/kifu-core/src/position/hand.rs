//! 持ち駒（Hand）

use crate::types::PieceKind;

/// 持ち駒
///
/// 生駒 7 種の枚数を `PieceKind::index()` 順に保持する。
/// 枚数 0 は「持っていない」と同じ意味で、負の枚数は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand {
    counts: [u8; 7],
}

impl Hand {
    /// 持ち駒なし
    pub const EMPTY: Hand = Hand { counts: [0; 7] };

    /// 駒種ごとの上限枚数（sfenx の持ち駒欄で表現できる枚数）
    pub const fn limit(kind: PieceKind) -> u8 {
        match kind {
            PieceKind::Pawn => 18,
            PieceKind::Lance | PieceKind::Knight | PieceKind::Silver | PieceKind::Gold => 4,
            PieceKind::Bishop | PieceKind::Rook => 2,
            _ => 0,
        }
    }

    /// 枚数（持ち駒になれない駒種は常に 0）
    #[inline]
    pub fn count(&self, kind: PieceKind) -> u8 {
        if kind.is_hand_kind() { self.counts[kind.index()] } else { 0 }
    }

    /// 1枚以上持っているか
    #[inline]
    pub fn has(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    /// 1枚加える。上限を超える場合や持ち駒になれない駒種なら `false`
    pub fn add(&mut self, kind: PieceKind) -> bool {
        if !kind.is_hand_kind() || self.counts[kind.index()] >= Self::limit(kind) {
            return false;
        }
        self.counts[kind.index()] += 1;
        true
    }

    /// 1枚取り出す。持っていなければ `false`
    pub fn take(&mut self, kind: PieceKind) -> bool {
        if !self.has(kind) {
            return false;
        }
        self.counts[kind.index()] -= 1;
        true
    }

    /// 枚数を直接設定する。上限を超える場合は `false`
    pub fn set(&mut self, kind: PieceKind, count: u8) -> bool {
        if !kind.is_hand_kind() || count > Self::limit(kind) {
            return false;
        }
        self.counts[kind.index()] = count;
        true
    }

    /// 1枚以上ある駒種と枚数を列挙
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::HAND_KINDS
            .into_iter()
            .map(|kind| (kind, self.counts[kind.index()]))
            .filter(|&(_, n)| n > 0)
    }
}
