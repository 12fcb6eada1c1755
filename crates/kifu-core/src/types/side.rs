//! 手番（Side）

use serde::{Deserialize, Serialize};

/// 手番（先手/後手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    #[default]
    Sente = 0,
    Gote = 1,
}

impl Side {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 棋譜表示用の手番記号
    #[inline]
    pub const fn mark(self) -> &'static str {
        match self {
            Side::Sente => "☗",
            Side::Gote => "☖",
        }
    }

    /// 相対段（先手から見た row。後手なら上下を反転する）
    ///
    /// 0 が相手陣の最奥（行き所のない段）になる。
    #[inline]
    pub const fn relative_row(self, row: u8) -> u8 {
        match self {
            Side::Sente => row,
            Side::Gote => 8 - row,
        }
    }

    /// 行方向の前進量（先手は上 = -1、後手は下 = +1）
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Sente => -1,
            Side::Gote => 1,
        }
    }

    /// 敵陣三段（成れる段）に入っているか
    #[inline]
    pub const fn in_promotion_zone(self, row: u8) -> bool {
        match self {
            Side::Sente => row <= 2,
            Side::Gote => row >= 6,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}
