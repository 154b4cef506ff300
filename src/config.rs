use crate::error::{RedeemError, Result};
use redeem_code_common::command::DEFAULT_VALID_TIME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 清单ファイルサイズの既定上限（5 MiB）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 全服用命令の有効時間の既定値
    pub default_valid_time: String,
    /// 読み込む清单ファイルの上限サイズ（bytes）
    pub max_file_size: u64,
    /// 清单を読み直したとき、同じIDの選択を引き継ぐ
    pub restore_selection: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_valid_time: DEFAULT_VALID_TIME.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            restore_selection: false,
        }
    }
}

impl Config {
    /// `~/.config/redeem-code/config.json` を読む（なければ既定値）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定パスから読む。ファイルがなければ既定値、壊れていればエラー
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "設定を保存");
        Ok(())
    }

    /// 設定ディレクトリ `~/.config/redeem-code`
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RedeemError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("redeem-code"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 前回セッションの保存先
    pub fn session_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
