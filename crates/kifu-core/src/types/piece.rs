//! 駒種（PieceKind）

/// 駒種（成駒を含む14種）
///
/// 文字表現は sfenx 用の1文字。成駒には専用の文字を割り当てているため、
/// SFEN のような `+` プレフィックスは使わない。
///
/// | 駒 | 成る前 | 成った後 |
/// | -- | ------ | -------- |
/// | 歩 | P      | T (と)   |
/// | 香 | L      | V (杏)   |
/// | 桂 | N      | U (圭)   |
/// | 銀 | S      | M (全)   |
/// | 角 | B      | H (馬)   |
/// | 飛 | R      | D (竜)   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Lance = 1,
    Knight = 2,
    Silver = 3,
    Gold = 4,
    Bishop = 5,
    Rook = 6,
    King = 7,
    ProPawn = 8,
    ProLance = 9,
    ProKnight = 10,
    ProSilver = 11,
    Horse = 12,
    Dragon = 13,
}

impl PieceKind {
    /// 駒種の数
    pub const NUM: usize = 14;

    /// 全ての駒種
    pub const ALL: [PieceKind; 14] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::King,
        PieceKind::ProPawn,
        PieceKind::ProLance,
        PieceKind::ProKnight,
        PieceKind::ProSilver,
        PieceKind::Horse,
        PieceKind::Dragon,
    ];

    /// 持ち駒になり得る駒種（歩・香・桂・銀・金・角・飛）
    pub const HAND_KINDS: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 成った駒種を返す（成れない駒は `None`）
    #[inline]
    pub const fn promote(self) -> Option<PieceKind> {
        match self {
            PieceKind::Pawn => Some(PieceKind::ProPawn),
            PieceKind::Lance => Some(PieceKind::ProLance),
            PieceKind::Knight => Some(PieceKind::ProKnight),
            PieceKind::Silver => Some(PieceKind::ProSilver),
            PieceKind::Bishop => Some(PieceKind::Horse),
            PieceKind::Rook => Some(PieceKind::Dragon),
            _ => None,
        }
    }

    /// 成る前の駒種を返す（金・玉・生駒はそのまま）
    #[inline]
    pub const fn unpromote(self) -> PieceKind {
        match self {
            PieceKind::ProPawn => PieceKind::Pawn,
            PieceKind::ProLance => PieceKind::Lance,
            PieceKind::ProKnight => PieceKind::Knight,
            PieceKind::ProSilver => PieceKind::Silver,
            PieceKind::Horse => PieceKind::Bishop,
            PieceKind::Dragon => PieceKind::Rook,
            other => other,
        }
    }

    /// 成れる駒種か
    #[inline]
    pub const fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// 成駒か
    #[inline]
    pub const fn is_promoted(self) -> bool {
        (self as u8) >= (PieceKind::ProPawn as u8)
    }

    /// 大駒（飛・角・竜・馬）か
    #[inline]
    pub const fn is_long_range(self) -> bool {
        matches!(
            self,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Dragon | PieceKind::Horse
        )
    }

    /// 持ち駒として打てる駒種か
    #[inline]
    pub const fn is_hand_kind(self) -> bool {
        (self as u8) <= (PieceKind::Rook as u8)
    }

    /// sfenx 用の文字（先手 = 大文字）
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
            PieceKind::ProPawn => 'T',
            PieceKind::ProLance => 'V',
            PieceKind::ProKnight => 'U',
            PieceKind::ProSilver => 'M',
            PieceKind::Horse => 'H',
            PieceKind::Dragon => 'D',
        }
    }

    /// sfenx 用の文字から駒種へ（大文字・小文字は区別しない）
    pub const fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            'T' => Some(PieceKind::ProPawn),
            'V' => Some(PieceKind::ProLance),
            'U' => Some(PieceKind::ProKnight),
            'M' => Some(PieceKind::ProSilver),
            'H' => Some(PieceKind::Horse),
            'D' => Some(PieceKind::Dragon),
            _ => None,
        }
    }

    /// 棋譜表示用の1文字表記
    pub const fn glyph(self) -> &'static str {
        match self {
            PieceKind::Pawn => "歩",
            PieceKind::Lance => "香",
            PieceKind::Knight => "桂",
            PieceKind::Silver => "銀",
            PieceKind::Gold => "金",
            PieceKind::Bishop => "角",
            PieceKind::Rook => "飛",
            PieceKind::King => "玉",
            PieceKind::ProPawn => "と",
            PieceKind::ProLance => "杏",
            PieceKind::ProKnight => "圭",
            PieceKind::ProSilver => "全",
            PieceKind::Horse => "馬",
            PieceKind::Dragon => "竜",
        }
    }
}
