//! 升（Square）と升集合（SquareSet）

use std::fmt;

/// 盤上の升
///
/// `row` は先手から見て上から 0..9（'a'〜'i' / 一〜九）、
/// `col` は 0..9 で筋の数字は `col + 1`。
/// 配列インデックスは `row * 9 + col`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// 升の数
    pub const NUM: usize = 81;

    /// (row, col) から生成（盤外なら `None`）
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 9 && col < 9 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// 符号付きの座標から生成（盤外なら `None`）
    #[inline]
    pub const fn from_signed(row: i8, col: i8) -> Option<Square> {
        if row >= 0 && row < 9 && col >= 0 && col < 9 {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// インデックス（0..81）から生成
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM {
            Some(Square { row: (index / 9) as u8, col: (index % 9) as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// 180度回転した升（筋は `10 - 筋`、段は `'i' - 段 + 'a'`）
    #[inline]
    pub const fn flipped(self) -> Square {
        Square { row: 8 - self.row, col: 8 - self.col }
    }

    /// 筋の数字（1〜9）
    #[inline]
    pub const fn file_number(self) -> u8 {
        self.col + 1
    }

    /// 段の文字（'a'〜'i'）
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'a' + self.row) as char
    }

    /// "7g" 形式の文字列を解析
    pub fn parse(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'1');
        let rank = bytes[1].wrapping_sub(b'a');
        Square::new(rank, file)
    }

    /// 全ての升（インデックス順）
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_number(), self.rank_char())
    }
}

/// 81升分のビット集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u128);

impl SquareSet {
    const MASK: u128 = (1u128 << Square::NUM) - 1;

    /// 空集合
    pub const EMPTY: SquareSet = SquareSet(0);

    /// 全81升
    pub const ALL: SquareSet = SquareSet(Self::MASK);

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u128 << sq.index()) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u128 << sq.index());
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// 含まれる升をインデックス順に列挙
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// `SquareSet` のイテレータ（下位ビットから）
pub struct SquareSetIter(u128);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }
}
