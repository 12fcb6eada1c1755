//! 対局セッション（Kifu）
//!
//! 現在の局面・手番・直前の移動先と棋譜木をまとめて持つ。
//! 指し手は必ず `play` を通して局面と棋譜木の両方に反映する。

use log::debug;

use crate::config::KifuConfig;
use crate::error::{FormatError, KifuError, PreconditionError};
use crate::notation::{ROOT_DISPLAY, render_move};
use crate::position::Position;
use crate::tree::{GameTree, NodeId};
use crate::types::{MoveToken, PieceKind, Side, Square, SquareSet};

/// 対局セッション
#[derive(Debug, Clone)]
pub struct Kifu {
    position: Position,
    side_to_move: Side,
    last_to: Option<Square>,
    tree: GameTree,
}

impl Default for Kifu {
    fn default() -> Self {
        Kifu::new()
    }
}

impl Kifu {
    /// 平手初期局面から始める
    pub fn new() -> Kifu {
        Kifu::from_position(Position::hirate(), Side::Sente)
    }

    /// 任意の局面から始める
    pub fn from_position(position: Position, side_to_move: Side) -> Kifu {
        let tree = GameTree::new(ROOT_DISPLAY, position.to_sfenx(), side_to_move);
        Kifu { position, side_to_move, last_to: None, tree }
    }

    /// 設定の初期局面・手番から始める
    pub fn with_config(config: &KifuConfig) -> Result<Kifu, FormatError> {
        Ok(Kifu::from_position(config.initial()?, config.first_to_move))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 直前の手の移動先（「同」の判定に使う）
    pub fn last_to(&self) -> Option<Square> {
        self.last_to
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut GameTree {
        &mut self.tree
    }

    /// 現在のノード
    pub fn current(&self) -> NodeId {
        self.tree.current()
    }

    /// 現在のノードが終局か
    pub fn is_finished(&self) -> bool {
        self.tree.node(self.current()).is_some_and(|n| n.is_terminal())
    }

    /// 手番側の駒が `from` から動ける升
    ///
    /// `from` に手番側の駒がなければ空集合。
    pub fn destinations(&self, from: Square) -> SquareSet {
        match self.position.piece_on(from) {
            Some(pc) if pc.owner == self.side_to_move => self.position.destinations(from),
            _ => SquareSet::EMPTY,
        }
    }

    /// 手番側が `kind` を打てる升（持っていなければ空集合）
    pub fn drop_destinations(&self, kind: PieceKind) -> SquareSet {
        if self.position.hand(self.side_to_move).has(kind) {
            self.position.drop_destinations(kind, self.side_to_move)
        } else {
            SquareSet::EMPTY
        }
    }

    /// 現在のノードから1手進める
    ///
    /// 表記は指す前の局面から作る。同じ手がすでに子にあればそのノードへ移る。
    pub fn play(&mut self, token: MoveToken) -> Result<NodeId, PreconditionError> {
        let token = self.position.normalize(token);
        let mover = self.side_to_move;
        let display = render_move(&self.position, token, mover, self.last_to)?;

        let mut next = self.position.clone();
        next.apply(token, mover)?;
        let id = self.tree.append_or_reuse(
            self.tree.current(),
            token,
            display,
            next.to_sfenx(),
            !mover,
        )?;

        self.position = next;
        self.side_to_move = !mover;
        self.last_to = token.destination();
        self.tree.set_current(id)?;
        Ok(id)
    }

    /// 指し手列を順に指す
    ///
    /// 最後に到達したノードを返す。途中で失敗した場合はそこまでの手が残る。
    pub fn replay<I>(&mut self, tokens: I) -> Result<NodeId, PreconditionError>
    where
        I: IntoIterator<Item = MoveToken>,
    {
        let mut id = self.current();
        for token in tokens {
            id = self.play(token)?;
        }
        debug!("replayed up to node {id}");
        Ok(id)
    }

    /// 任意のノードへ移動し、そのノードの局面を復元する
    pub fn jump(&mut self, id: NodeId) -> Result<(), KifuError> {
        let node = self.tree.get(id)?;
        let position = Position::from_sfenx(&node.sfenx)?;
        let side_to_move = node.side_to_move;
        let last_to = node.token.and_then(|t| t.destination());

        self.tree.set_current(id)?;
        self.position = position;
        self.side_to_move = side_to_move;
        self.last_to = last_to;
        Ok(())
    }

    /// 変化 `id` を本線にしてそのノードへ移動する
    pub fn switch_variation(&mut self, id: NodeId) -> Result<(), KifuError> {
        self.tree.select_variation(id)?;
        self.jump(id)
    }

    /// ルートから現在のノードまでの指し手
    pub fn moves(&self) -> Vec<MoveToken> {
        self.tree.tokens_to(self.current())
    }
}
