//! 終局した対局の統計レコード・対局レコード

use chrono::{DateTime, Utc};

use super::{GameRecordEntry, GameRecordSink, MoveStatisticsRecord};
use crate::error::{PreconditionError, Result};
use crate::fingerprint::game_hash;
use crate::tree::{GameTree, NodeId};
use crate::types::{GameMetadata, MoveToken, Side, Terminal};

/// ルートから `id` までの各手の統計レコード
///
/// 最後の手が投了・切れ負け・反則負けなら、それを指した側の負け、相手の勝ち。
/// それ以外（中断・千日手・持将棋や終局前）は勝ち負けとも付けない。
/// 切れ負けで終わった対局は全レコードの `timeout` が立つ。終局トークン自体の
/// レコードは作らない。
pub fn collect_move_statistics(
    tree: &GameTree,
    id: NodeId,
) -> std::result::Result<Vec<MoveStatisticsRecord>, PreconditionError> {
    let last = tree.get(id)?;
    let ending = match last.token {
        Some(MoveToken::Terminal(t)) => Some(t),
        _ => None,
    };
    let loser: Option<Side> = match ending {
        Some(t) if t.is_loss() => last.mover(),
        _ => None,
    };
    let timeout = ending == Some(Terminal::Timeout);

    let records = tree
        .path_from_root(id)
        .into_iter()
        .filter(|&n| tree.node(n).is_some_and(|node| !node.is_terminal()))
        .filter_map(|n| {
            let mover = tree.node(n)?.mover()?;
            let key = tree.lookup_key(n)?;
            Some(MoveStatisticsRecord {
                sfenx: key.sfenx,
                mv: key.token,
                win: loser.is_some_and(|l| l != mover),
                lose: loser == Some(mover),
                timeout,
            })
        })
        .collect();
    Ok(records)
}

/// 終局ノード `id` までの対局を保存する
///
/// 統計レコード、対局レコードの順に書き込み、ノードを保存済みにする。
/// 保存済みなら何もせず `false` を返す。
pub fn save_game<S>(
    tree: &mut GameTree,
    id: NodeId,
    metadata: &GameMetadata,
    sink: &mut S,
    recorded_at: DateTime<Utc>,
) -> Result<bool>
where
    S: GameRecordSink + ?Sized,
{
    let node = tree.get(id)?;
    if node.is_saved {
        log::debug!("node {id} is already saved");
        return Ok(false);
    }
    if !node.is_terminal() {
        return Err(PreconditionError::NotFinished(id).into());
    }

    let moves = tree.tokens_to(id);
    let records = collect_move_statistics(tree, id)?;
    let entry = GameRecordEntry {
        game_hash: game_hash(&moves, metadata)?,
        move_count: moves.iter().filter(|m| !m.is_terminal()).count(),
        metadata: metadata.clone(),
        recorded_at,
    };

    if !records.is_empty() {
        sink.persist_move_statistics(&records)?;
        sink.persist_game_record(&entry)?;
    }
    tree.mark_saved(id)?;
    log::info!(
        "saved game {} ({} moves, {} statistics records)",
        entry.game_hash,
        entry.move_count,
        records.len()
    );
    Ok(true)
}
