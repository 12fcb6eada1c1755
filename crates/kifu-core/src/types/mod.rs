//! 基本型（手番・升・駒種・指し手トークン・棋譜メタデータ）

mod metadata;
mod move_token;
mod piece;
mod side;
mod square;

pub use metadata::GameMetadata;
pub use move_token::{MoveToken, Terminal};
pub use piece::PieceKind;
pub use side::Side;
pub use square::{Square, SquareSet};
