//! 前回セッションの保存・復元
//!
//! 清单の元テキストとフォーム入力値をJSONに保存する。
//! 選択済み物品は `restore_selection` が有効なときだけ保存する。
//! 読み込みは失敗しても空のスナップショットで続行する。

use crate::error::Result;
use redeem_code_common::{CommandForm, SelectedItem};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// セッションファイルの構造
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 清单ファイルの元テキスト
    #[serde(default)]
    pub catalog_text: String,
    /// 清单ファイル名（表示用）
    #[serde(default)]
    pub catalog_name: String,
    /// フォーム入力値
    #[serde(flatten)]
    pub form: CommandForm,
    /// 選択済み物品（復元が有効なときのみ）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_items: Vec<SelectedItem>,
    /// 保存日時（RFC 3339）
    #[serde(default)]
    pub saved_at: String,
}

impl SessionSnapshot {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(catalog_text: String, catalog_name: String, form: CommandForm) -> Self {
        Self {
            catalog_text,
            catalog_name,
            form,
            ..Self::default()
        }
    }

    /// セッションファイルを読み込み
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "セッションファイルを開けません");
                return Self::default();
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, SessionSnapshot>(reader) {
            Ok(snapshot) => {
                if snapshot.version != Self::CURRENT_VERSION {
                    tracing::warn!(version = snapshot.version, "セッションのバージョン不一致、破棄します");
                    return Self::default();
                }
                snapshot
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "セッションファイルが壊れています");
                Self::default()
            }
        }
    }

    /// セッションファイルを保存（保存日時を更新）
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.saved_at = chrono::Utc::now().to_rfc3339();

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// セッションファイルを削除
    ///
    /// 削除した場合は `true`、もともと無ければ `false`
    pub fn clear(path: &Path) -> Result<bool> {
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 清单テキストが保存されていない
    pub fn is_empty(&self) -> bool {
        self.catalog_text.trim().is_empty()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            catalog_text: String::new(),
            catalog_name: String::new(),
            form: CommandForm::default(),
            selected_items: Vec::new(),
            saved_at: String::new(),
        }
    }
}
