//! 分岐付き棋譜木（GameTree）
//!
//! ノードは `Vec` に追加するだけで削除しない。親子・兄弟はインデックスで結ぶ。
//!
//! - `parent`: 親ノード（ルートは `None`）
//! - `primary_child`: 現在選ばれている子（本線）
//! - `next_sibling`: 同じ親を持つ兄弟を循環リストで結ぶ（一人っ子なら自分自身）
//!
//! 変化の切り替えは親の `primary_child` を付け替えるだけで行う。

use log::debug;

use crate::error::PreconditionError;
use crate::position::flip_snapshot;
use crate::types::{MoveToken, Side};

/// ノードのインデックス
pub type NodeId = usize;

/// ルートノードのインデックス
pub const ROOT: NodeId = 0;

/// 棋譜木のノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// 表示用の棋譜（"☗７六歩" など）
    pub display: String,
    /// 指し手（ルートは `None`）
    pub token: Option<MoveToken>,
    /// 指した後の局面（sfenx）
    pub sfenx: String,
    /// 指した後の手番
    pub side_to_move: Side,
    pub parent: Option<NodeId>,
    pub primary_child: Option<NodeId>,
    pub next_sibling: NodeId,
    pub is_favorite: bool,
    pub is_saved: bool,
}

impl Node {
    /// このノードの手を指した側（ルートは `None`）
    pub fn mover(&self) -> Option<Side> {
        self.token.map(|_| !self.side_to_move)
    }

    /// 終局ノードか
    pub fn is_terminal(&self) -> bool {
        self.token.is_some_and(|t| t.is_terminal())
    }
}

/// お気に入り・統計の検索キー
///
/// 指した側が先手になるように、後手の手は局面・指し手とも 180 度回転している。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub sfenx: String,
    pub token: MoveToken,
}

impl LookupKey {
    /// 指す前の局面 `sfenx` と指し手から、`mover` 視点の検索キーを作る
    pub fn new(sfenx: &str, token: MoveToken, mover: Side) -> LookupKey {
        match mover {
            Side::Sente => LookupKey { sfenx: sfenx.to_string(), token },
            Side::Gote => LookupKey {
                sfenx: flip_snapshot(sfenx),
                token: token.flipped(),
            },
        }
    }
}

/// 分岐付き棋譜木
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
    current: NodeId,
}

impl GameTree {
    /// ルートだけの木を作る
    pub fn new(
        display: impl Into<String>,
        sfenx: impl Into<String>,
        side_to_move: Side,
    ) -> GameTree {
        let root = Node {
            display: display.into(),
            token: None,
            sfenx: sfenx.into(),
            side_to_move,
            parent: None,
            primary_child: None,
            next_sibling: ROOT,
            is_favorite: false,
            is_saved: false,
        };
        GameTree { nodes: vec![root], current: ROOT }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// ルートは常にあるので空にはならない
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// 存在しないノードなら `PreconditionError::UnknownNode`
    pub fn get(&self, id: NodeId) -> Result<&Node, PreconditionError> {
        self.nodes.get(id).ok_or(PreconditionError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, PreconditionError> {
        self.nodes.get_mut(id).ok_or(PreconditionError::UnknownNode(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// カーソル位置
    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn set_current(&mut self, id: NodeId) -> Result<(), PreconditionError> {
        self.get(id)?;
        self.current = id;
        Ok(())
    }

    /// `parent` の子として手を追加する。同じ手の子があればそれを本線にして返す。
    ///
    /// 新しいノードは兄弟の循環リストで現在の本線の直後に入り、本線になる。
    pub fn append_or_reuse(
        &mut self,
        parent: NodeId,
        token: MoveToken,
        display: impl Into<String>,
        sfenx: impl Into<String>,
        side_to_move: Side,
    ) -> Result<NodeId, PreconditionError> {
        let primary = self.get(parent)?.primary_child;
        let new_id = self.nodes.len();

        let next_sibling = match primary {
            None => new_id,
            Some(first) => {
                let existing = self
                    .siblings_of(first)
                    .into_iter()
                    .find(|&id| self.nodes[id].token == Some(token));
                if let Some(found) = existing {
                    debug!("reuse node {found} for {token} under {parent}");
                    self.nodes[parent].primary_child = Some(found);
                    return Ok(found);
                }
                let after = self.nodes[first].next_sibling;
                self.nodes[first].next_sibling = new_id;
                after
            }
        };

        debug!("new node {new_id} for {token} under {parent}");
        self.nodes.push(Node {
            display: display.into(),
            token: Some(token),
            sfenx: sfenx.into(),
            side_to_move,
            parent: Some(parent),
            primary_child: None,
            next_sibling,
            is_favorite: false,
            is_saved: false,
        });
        self.nodes[parent].primary_child = Some(new_id);
        Ok(new_id)
    }

    /// 同じ手数の変化（自分を先頭に兄弟を循環順に並べたもの）
    pub fn siblings_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if id >= self.nodes.len() {
            return out;
        }
        let mut cur = id;
        loop {
            out.push(cur);
            cur = self.nodes[cur].next_sibling;
            if cur == id {
                break;
            }
        }
        out
    }

    /// ルートから `id` までのノード列
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = self.node(id).map(|_| id);
        while let Some(n) = cur {
            path.push(n);
            cur = self.nodes[n].parent;
        }
        path.reverse();
        path
    }

    /// ルートから `id` までの指し手（ルート自身は含まない）
    pub fn tokens_to(&self, id: NodeId) -> Vec<MoveToken> {
        self.path_from_root(id).into_iter().filter_map(|n| self.nodes[n].token).collect()
    }

    /// `from` から本線（`primary_child`）をたどった末端までのノード列
    pub fn line_from(&self, from: NodeId) -> Vec<NodeId> {
        let mut line = Vec::new();
        let mut cur = self.node(from).map(|_| from);
        while let Some(n) = cur {
            line.push(n);
            cur = self.nodes[n].primary_child;
        }
        line
    }

    /// ルートからの本線
    pub fn main_line(&self) -> Vec<NodeId> {
        self.line_from(ROOT)
    }

    /// 変化 `id` を本線にしてカーソルを移す
    pub fn select_variation(&mut self, id: NodeId) -> Result<(), PreconditionError> {
        if let Some(parent) = self.get(id)?.parent {
            self.nodes[parent].primary_child = Some(id);
        }
        self.current = id;
        Ok(())
    }

    /// ノードの検索キー（ルートは `None`）
    pub fn lookup_key(&self, id: NodeId) -> Option<LookupKey> {
        let node = self.node(id)?;
        let token = node.token?;
        let parent = &self.nodes[node.parent?];
        Some(LookupKey::new(&parent.sfenx, token, !node.side_to_move))
    }

    /// 検索キーが `key` に一致する全ノードのお気に入りフラグを設定する
    ///
    /// 一致したノード数を返す。
    pub fn set_favorite_matching(&mut self, key: &LookupKey, flag: bool) -> usize {
        let matched: Vec<NodeId> = (1..self.nodes.len())
            .filter(|&id| self.lookup_key(id).as_ref() == Some(key))
            .collect();
        for &id in &matched {
            self.nodes[id].is_favorite = flag;
        }
        matched.len()
    }

    /// 保存済みにする
    pub fn mark_saved(&mut self, id: NodeId) -> Result<(), PreconditionError> {
        self.get_mut(id)?.is_saved = true;
        Ok(())
    }
}
