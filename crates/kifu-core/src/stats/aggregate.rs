//! 統計レコードの集計

use std::collections::HashMap;

use super::{MoveStatistics, MoveStatisticsRecord, StatisticsRepository};
use crate::error::Result;
use crate::position::flip_sfenx;
use crate::types::{MoveToken, Side};

/// レコードを指し手ごとに集計する
///
/// 並びは各手が最初に現れた順。
pub fn aggregate(records: &[MoveStatisticsRecord]) -> Vec<MoveStatistics> {
    let total = records.len() as f64;
    let mut index: HashMap<MoveToken, usize> = HashMap::new();
    let mut counts: Vec<(MoveToken, u32, u32)> = Vec::new();

    for record in records {
        let i = *index.entry(record.mv).or_insert_with(|| {
            counts.push((record.mv, 0, 0));
            counts.len() - 1
        });
        counts[i].1 += 1;
        if record.win {
            counts[i].2 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(mv, apparents, wins)| MoveStatistics {
            mv,
            apparent_count: apparents,
            win_count: wins,
            apparent_rate: apparents as f64 / total,
            win_rate: wins as f64 / apparents as f64,
        })
        .collect()
}

/// 局面 `sfenx`（手番 `side`）の指し手統計
///
/// 後手番なら回転した局面で問い合わせ、結果の手を元の向きに戻す。
/// 出現回数の多い順、同数なら勝率の高い順に並べる。
pub fn statistics_for<R>(repo: &R, sfenx: &str, side: Side) -> Result<Vec<MoveStatistics>>
where
    R: StatisticsRepository + ?Sized,
{
    let key = match side {
        Side::Sente => sfenx.to_string(),
        Side::Gote => flip_sfenx(sfenx)?,
    };
    let records = repo.fetch_statistics(&key)?;
    log::debug!("{} statistics records for {key}", records.len());

    let mut stats = aggregate(&records);
    if side == Side::Gote {
        for s in &mut stats {
            s.mv = s.mv.flipped();
        }
    }
    stats.sort_by(|a, b| {
        b.apparent_count
            .cmp(&a.apparent_count)
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
    });
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::HIRATE;

    struct Fixed(Vec<MoveStatisticsRecord>);

    impl StatisticsRepository for Fixed {
        fn fetch_statistics(&self, sfenx: &str) -> anyhow::Result<Vec<MoveStatisticsRecord>> {
            Ok(self.0.iter().filter(|r| r.sfenx == sfenx).cloned().collect())
        }
    }

    fn record(sfenx: &str, mv: &str, win: bool) -> MoveStatisticsRecord {
        MoveStatisticsRecord {
            sfenx: sfenx.to_string(),
            mv: mv.parse().unwrap(),
            win,
            lose: !win,
            timeout: false,
        }
    }

    #[test]
    fn test_aggregate() {
        let records = vec![
            record(HIRATE, "7g7f", true),
            record(HIRATE, "2g2f", false),
            record(HIRATE, "7g7f", false),
            record(HIRATE, "7g7f", true),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].mv, "7g7f".parse::<MoveToken>().unwrap());
        assert_eq!(stats[0].apparent_count, 3);
        assert_eq!(stats[0].win_count, 2);
        assert_eq!(stats[0].apparent_rate, 0.75);
        assert!((stats[0].win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats[1].win_rate, 0.0);
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_sorted_by_count_then_win_rate() {
        let repo = Fixed(vec![
            record(HIRATE, "2g2f", false),
            record(HIRATE, "7g7f", false),
            record(HIRATE, "5g5f", true),
            record(HIRATE, "7g7f", true),
        ]);
        let stats = statistics_for(&repo, HIRATE, Side::Sente).unwrap();
        let moves: Vec<String> = stats.iter().map(|s| s.mv.to_string()).collect();
        assert_eq!(moves, ["7g7f", "5g5f", "2g2f"]);
    }

    #[test]
    fn test_gote_query_is_flipped() {
        let after = "lnsgkgsnl1b5r1ppppppppp996P2PPPPPP1PP1R5B1LNSGKGSNL aaaaaaaa";
        let key = flip_sfenx(after).unwrap();
        // 先手視点で保存された 7g7f は後手の 3c3d
        let repo = Fixed(vec![record(&key, "7g7f", true)]);
        let stats = statistics_for(&repo, after, Side::Gote).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].mv, "3c3d".parse::<MoveToken>().unwrap());
        assert_eq!(stats[0].win_rate, 1.0);
    }

    #[test]
    fn test_malformed_position() {
        let repo = Fixed(Vec::new());
        assert!(statistics_for(&repo, "bogus", Side::Gote).is_err());
    }
}
