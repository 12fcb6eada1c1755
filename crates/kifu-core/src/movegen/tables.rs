//! 駒の利きベクトル表
//!
//! 先手から見た `(行の差分, 列の差分, 走り駒か)`。行は上方向が負。
//! 後手は行の差分の符号を反転して使う（列はそのまま）。

use crate::types::PieceKind;

/// 利きベクトル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub dr: i8,
    pub dc: i8,
    pub slides: bool,
}

const fn step(dr: i8, dc: i8) -> Step {
    Step { dr, dc, slides: false }
}

const fn slide(dr: i8, dc: i8) -> Step {
    Step { dr, dc, slides: true }
}

const PAWN: &[Step] = &[step(-1, 0)];
const LANCE: &[Step] = &[slide(-1, 0)];
const KNIGHT: &[Step] = &[step(-2, -1), step(-2, 1)];
const SILVER: &[Step] = &[step(-1, -1), step(-1, 0), step(-1, 1), step(1, -1), step(1, 1)];
const GOLD: &[Step] = &[
    step(-1, -1),
    step(-1, 0),
    step(-1, 1),
    step(0, -1),
    step(0, 1),
    step(1, 0),
];
const KING: &[Step] = &[
    step(-1, -1),
    step(-1, 0),
    step(-1, 1),
    step(0, -1),
    step(0, 1),
    step(1, -1),
    step(1, 0),
    step(1, 1),
];
const BISHOP: &[Step] = &[slide(-1, -1), slide(-1, 1), slide(1, -1), slide(1, 1)];
const ROOK: &[Step] = &[slide(-1, 0), slide(0, -1), slide(0, 1), slide(1, 0)];
const HORSE: &[Step] = &[
    slide(-1, -1),
    slide(-1, 1),
    slide(1, -1),
    slide(1, 1),
    step(-1, 0),
    step(0, -1),
    step(0, 1),
    step(1, 0),
];
const DRAGON: &[Step] = &[
    slide(-1, 0),
    slide(0, -1),
    slide(0, 1),
    slide(1, 0),
    step(-1, -1),
    step(-1, 1),
    step(1, -1),
    step(1, 1),
];

/// 駒種の利きベクトル（先手視点）
pub const fn steps(kind: PieceKind) -> &'static [Step] {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Lance => LANCE,
        PieceKind::Knight => KNIGHT,
        PieceKind::Silver => SILVER,
        PieceKind::Gold
        | PieceKind::ProPawn
        | PieceKind::ProLance
        | PieceKind::ProKnight
        | PieceKind::ProSilver => GOLD,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::King => KING,
        PieceKind::Horse => HORSE,
        PieceKind::Dragon => DRAGON,
    }
}
