//! お気に入りの手

use std::collections::BTreeSet;

use super::FavoriteRepository;
use crate::error::{PreconditionError, Result};
use crate::tree::{GameTree, LookupKey, NodeId};

/// 棋譜木に現れる局面のお気に入りを取得し、該当ノードに印を付ける
///
/// 印を付けたノード数を返す。
pub fn apply_favorites<R>(tree: &mut GameTree, repo: &R) -> Result<usize>
where
    R: FavoriteRepository + ?Sized,
{
    let positions: BTreeSet<String> =
        (1..tree.len()).filter_map(|id| tree.lookup_key(id)).map(|k| k.sfenx).collect();

    let mut marked = 0;
    for sfenx in positions {
        for token in repo.fetch_favorites(&sfenx)? {
            let key = LookupKey { sfenx: sfenx.clone(), token };
            marked += tree.set_favorite_matching(&key, true);
        }
    }
    log::debug!("marked {marked} favorite nodes");
    Ok(marked)
}

/// ノードのお気に入りを切り替える
///
/// リポジトリに登録・削除したうえで、同じ検索キーを持つ全ノードの印を揃える。
/// 切り替え後の状態を返す。
pub fn toggle_favorite<R>(tree: &mut GameTree, id: NodeId, repo: &mut R) -> Result<bool>
where
    R: FavoriteRepository + ?Sized,
{
    let flag = !tree.get(id)?.is_favorite;
    let key = tree.lookup_key(id).ok_or(PreconditionError::NoMove(id))?;
    if flag {
        repo.insert_favorite(&key.sfenx, key.token)?;
    } else {
        repo.delete_favorite(&key.sfenx, key.token)?;
    }
    tree.set_favorite_matching(&key, flag);
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::game::Kifu;
    use crate::position::Position;
    use crate::tree::ROOT;
    use crate::types::{MoveToken, Side};

    #[derive(Default)]
    struct Memory(HashSet<(String, MoveToken)>);

    impl FavoriteRepository for Memory {
        fn fetch_favorites(&self, sfenx: &str) -> anyhow::Result<Vec<MoveToken>> {
            Ok(self.0.iter().filter(|(s, _)| s == sfenx).map(|(_, m)| *m).collect())
        }

        fn insert_favorite(&mut self, sfenx: &str, mv: MoveToken) -> anyhow::Result<()> {
            self.0.insert((sfenx.to_string(), mv));
            Ok(())
        }

        fn delete_favorite(&mut self, sfenx: &str, mv: MoveToken) -> anyhow::Result<()> {
            self.0.remove(&(sfenx.to_string(), mv));
            Ok(())
        }
    }

    struct Broken;

    impl FavoriteRepository for Broken {
        fn fetch_favorites(&self, _: &str) -> anyhow::Result<Vec<MoveToken>> {
            anyhow::bail!("connection refused")
        }

        fn insert_favorite(&mut self, _: &str, _: MoveToken) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        fn delete_favorite(&mut self, _: &str, _: MoveToken) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    fn token(s: &str) -> MoveToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_favorite_shared_between_sides() {
        let mut sente = Kifu::new();
        let a = sente.play(token("7g7f")).unwrap();
        let b = sente.play(token("3c3d")).unwrap();

        let mut repo = Memory::default();
        assert!(toggle_favorite(sente.tree_mut(), a, &mut repo).unwrap());
        assert!(sente.tree().node(a).unwrap().is_favorite);
        assert!(!sente.tree().node(b).unwrap().is_favorite);
        assert_eq!(repo.0.len(), 1);

        // 後手番の平手から 3c3d は、回転すると先手の 7g7f と同じ検索キー
        let mut gote = Kifu::from_position(Position::hirate(), Side::Gote);
        let c = gote.play(token("3c3d")).unwrap();
        let d = gote.play(token("2g2f")).unwrap();
        assert_eq!(apply_favorites(gote.tree_mut(), &repo).unwrap(), 1);
        assert!(gote.tree().node(c).unwrap().is_favorite);
        assert!(!gote.tree().node(d).unwrap().is_favorite);

        assert!(!toggle_favorite(sente.tree_mut(), a, &mut repo).unwrap());
        assert!(repo.0.is_empty());
        assert!(!sente.tree().node(a).unwrap().is_favorite);
    }

    #[test]
    fn test_root_cannot_be_favorite() {
        let mut kifu = Kifu::new();
        let mut repo = Memory::default();
        assert!(toggle_favorite(kifu.tree_mut(), ROOT, &mut repo).is_err());
        assert!(toggle_favorite(kifu.tree_mut(), 9, &mut repo).is_err());
    }

    #[test]
    fn test_repository_error_is_propagated() {
        let mut kifu = Kifu::new();
        kifu.play(token("7g7f")).unwrap();
        let err = apply_favorites(kifu.tree_mut(), &Broken).unwrap_err();
        assert!(matches!(err, crate::error::KifuError::Collaborator(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
