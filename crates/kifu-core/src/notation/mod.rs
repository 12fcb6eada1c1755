//! 棋譜表記（日本語）
//!
//! `☗７六歩` `☖同　銀` `☗８二金上` `☗５五角打` のような表示用文字列を生成する。
//! 表示は必ず指す前の局面から作る。

mod disambiguation;

use disambiguation::{Candidates, classify};

use crate::error::PreconditionError;
use crate::position::{Piece, Position};
use crate::types::{MoveToken, PieceKind, Side, Square};

/// 段の漢数字
pub const KANJI_NUM: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 筋の全角数字
pub const ZENKAKU_NUM: [&str; 9] = ["１", "２", "３", "４", "５", "６", "７", "８", "９"];

/// 直前の手と同じ升に動いた場合の表記
pub const SAME_SQUARE: &str = "同　";

/// 初期局面（ルートノード）の表示
pub const ROOT_DISPLAY: &str = "初期局面";

fn push_square(out: &mut String, to: Square) {
    out.push_str(ZENKAKU_NUM[to.col() as usize]);
    out.push_str(KANJI_NUM[to.row() as usize]);
}

/// 盤上の駒の移動を表記する（成・不成は付けない）
pub fn display_board_move(
    pos: &Position,
    from: Square,
    to: Square,
    last_to: Option<Square>,
) -> Result<String, PreconditionError> {
    let piece = pos.piece_on(from).ok_or(PreconditionError::EmptySource(from))?;
    let (h, v) = classify(piece.owner, from, to);
    let candidates = Candidates::collect(pos, piece, to, Some(from));

    let mut out = String::from(piece.owner.mark());
    if last_to == Some(to) {
        out.push_str(SAME_SQUARE);
    } else {
        push_square(&mut out, to);
    }
    out.push_str(piece.kind.glyph());
    out.push_str(&candidates.suffix(piece.kind, h, v));
    Ok(out)
}

/// 駒打ちを表記する
///
/// 盤上に同じ升へ動ける同種の駒があれば「打」を付ける。
pub fn display_drop(pos: &Position, kind: PieceKind, owner: Side, to: Square) -> String {
    let mut out = String::from(owner.mark());
    push_square(&mut out, to);
    out.push_str(kind.glyph());
    if Candidates::collect(pos, Piece::new(kind, owner), to, None).total() > 0 {
        out.push_str("打");
    }
    out
}

/// 指し手トークンを表記する
///
/// 成れる手には「成」または「不成」を付ける。終局トークンは「投了」などの固定文字列。
pub fn render_move(
    pos: &Position,
    token: MoveToken,
    mover: Side,
    last_to: Option<Square>,
) -> Result<String, PreconditionError> {
    match token {
        MoveToken::Board { from, to, promote } => {
            let mut out = display_board_move(pos, from, to, last_to)?;
            if pos.promotion_available(from, to) {
                out.push_str(if promote { "成" } else { "不成" });
            }
            Ok(out)
        }
        MoveToken::Drop { kind, to } => Ok(display_drop(pos, kind, mover, to)),
        MoveToken::Terminal(t) => Ok(t.display().to_string()),
    }
}
