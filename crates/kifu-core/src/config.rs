//! 対局セッションの設定
//!
//! ```toml
//! initial_position = "lnsgkgsnl1b5r1ppppppppp999PPPPPPPPP1R5B1LNSGKGSNL aaaaaaaa"
//! first_to_move = "sente"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::position::{HIRATE, Position};
use crate::types::Side;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KifuConfig {
    /// 初期局面（sfenx）
    #[serde(default = "hirate")]
    pub initial_position: String,
    /// 初期局面の手番
    #[serde(default)]
    pub first_to_move: Side,
}

fn hirate() -> String {
    HIRATE.to_string()
}

impl Default for KifuConfig {
    fn default() -> Self {
        Self {
            initial_position: hirate(),
            first_to_move: Side::Sente,
        }
    }
}

impl KifuConfig {
    /// TOML 文字列から読み込む
    pub fn from_toml_str(text: &str) -> Result<KifuConfig, FormatError> {
        let config: KifuConfig =
            toml::from_str(text).map_err(|e| FormatError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// TOML ファイルから読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<KifuConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// 初期局面を解析する
    pub fn initial(&self) -> Result<Position, FormatError> {
        Position::from_sfenx(&self.initial_position)
    }

    fn validate(&self) -> Result<(), FormatError> {
        self.initial().map(|_| ())
    }
}
