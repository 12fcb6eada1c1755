//! 対局の重複判定用ハッシュ
//!
//! 指し手列と対局情報からキーを辞書順に並べた JSON を作り、その SHA-256 を
//! 16 進文字列にする。JSON は `", "` と `": "` で区切り、非 ASCII 文字は
//! エスケープしない。別の実装で作ったハッシュとバイト単位で一致させる必要がある。

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use sha2::{Digest, Sha256};

use crate::types::{GameMetadata, MoveToken};

/// キーの辞書順に並べたハッシュ対象
#[derive(Serialize)]
struct Signature<'a> {
    #[serde(rename = "endTime")]
    end_time: Option<&'a str>,
    moves: Vec<String>,
    players: [&'a str; 2],
    result: Option<&'a str>,
    #[serde(rename = "startTime")]
    start_time: Option<&'a str>,
}

impl<'a> Signature<'a> {
    fn new(moves: &[MoveToken], metadata: &'a GameMetadata) -> Signature<'a> {
        let mut players = [
            metadata.black_player.as_deref().unwrap_or(""),
            metadata.white_player.as_deref().unwrap_or(""),
        ];
        players.sort_unstable();
        Signature {
            end_time: metadata.end_time.as_deref(),
            moves: moves.iter().map(ToString::to_string).collect(),
            players,
            result: metadata.result.as_deref(),
            start_time: metadata.start_time.as_deref(),
        }
    }
}

/// 区切りの後ろに空白を1つ入れる JSON フォーマッタ
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// ハッシュ対象の JSON 文字列
///
/// `moves` はルートの次の手から終局トークンまでを含む。
pub fn canonical_json(
    moves: &[MoveToken],
    metadata: &GameMetadata,
) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    Signature::new(moves, metadata).serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 対局のハッシュ（SHA-256 の 16 進表記、64 文字）
pub fn game_hash(moves: &[MoveToken], metadata: &GameMetadata) -> serde_json::Result<String> {
    let json = canonical_json(moves, metadata)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
