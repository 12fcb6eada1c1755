use serde::{Deserialize, Serialize};

/// 対局情報（棋譜ヘッダ）
///
/// 棋譜ファイルに記載がなければ `None`。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    /// 開始日時（棋譜の表記のまま）
    pub start_time: Option<String>,
    /// 終了日時
    pub end_time: Option<String>,
    /// 棋戦
    pub event: Option<String>,
    /// 手合割
    pub handicap: Option<String>,
    /// 先手
    pub black_player: Option<String>,
    /// 後手
    pub white_player: Option<String>,
    /// 結果（"まで9手で先手の勝ち" など）
    pub result: Option<String>,
}
