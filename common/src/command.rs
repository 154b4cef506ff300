//! 兑换码命令の生成
//!
//! 出力形式:
//! - 個人用: `/新建兑换码 {密钥ID} {玩家ID} {物品...}`
//! - 全服用: `/新建全服兑换码 {密钥ID} {有效时间} {物品...}`
//!
//! 必須項目が欠けている場合は命令の代わりにプレースホルダー文字列を返す。
//! 確認順: 物品 → 密钥ID → モード別の項目

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PER_PLAYER_VERB: &str = "/新建兑换码";
pub const SERVER_WIDE_VERB: &str = "/新建全服兑换码";

/// 有効時間の既定値
pub const DEFAULT_VALID_TIME: &str = "60";

/// 命令の種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandMode {
    /// 個人用（玩家IDが必要）
    #[default]
    #[serde(rename = "single")]
    PerPlayer,
    /// 全服用（有効時間が必要）
    #[serde(rename = "all")]
    ServerWide,
}

impl CommandMode {
    pub fn toggled(self) -> Self {
        match self {
            CommandMode::PerPlayer => CommandMode::ServerWide,
            CommandMode::ServerWide => CommandMode::PerPlayer,
        }
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandMode::PerPlayer => write!(f, "个人"),
            CommandMode::ServerWide => write!(f, "全服"),
        }
    }
}

impl std::str::FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "player" | "per-player" => Ok(CommandMode::PerPlayer),
            "all" | "server" | "server-wide" => Ok(CommandMode::ServerWide),
            _ => Err(format!("Unknown mode: {}. Use single or all", s)),
        }
    }
}

/// 命令生成フォームの入力値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandForm {
    #[serde(rename = "cmdType")]
    pub mode: CommandMode,
    pub secret_id: String,
    pub player_id: String,
    pub valid_time: String,
}

impl Default for CommandForm {
    fn default() -> Self {
        Self {
            mode: CommandMode::PerPlayer,
            secret_id: String::new(),
            player_id: String::new(),
            valid_time: DEFAULT_VALID_TIME.to_string(),
        }
    }
}

/// 欠けている必須項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Selection,
    SecretId,
    PlayerId,
    ValidTime,
}

impl MissingField {
    /// 命令欄に表示するプレースホルダー
    pub fn placeholder(&self) -> &'static str {
        match self {
            MissingField::Selection => "请先选择物品",
            MissingField::SecretId => "请输入密钥ID",
            MissingField::PlayerId => "请输入玩家ID",
            MissingField::ValidTime => "请输入有效时间",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// 命令生成の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Command(String),
    Missing(MissingField),
}

impl Rendered {
    /// 生成できた命令（プレースホルダーの場合は `None`）
    pub fn command(&self) -> Option<&str> {
        match self {
            Rendered::Command(command) => Some(command.as_str()),
            Rendered::Missing(_) => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Rendered::Command(_))
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Command(command) => f.write_str(command),
            Rendered::Missing(field) => f.write_str(field.placeholder()),
        }
    }
}

/// 物品リスト部分とフォームから命令を組み立てる
///
/// `items_text` が空なら物品未選択として扱う。
pub fn render_command(items_text: &str, form: &CommandForm) -> Rendered {
    if items_text.is_empty() {
        return Rendered::Missing(MissingField::Selection);
    }

    let secret_id = form.secret_id.trim();
    if secret_id.is_empty() {
        return Rendered::Missing(MissingField::SecretId);
    }

    let (verb, target, missing) = match form.mode {
        CommandMode::PerPlayer => (PER_PLAYER_VERB, form.player_id.trim(), MissingField::PlayerId),
        CommandMode::ServerWide => (SERVER_WIDE_VERB, form.valid_time.trim(), MissingField::ValidTime),
    };
    if target.is_empty() {
        return Rendered::Missing(missing);
    }

    Rendered::Command(format!("{} {} {} {}", verb, secret_id, target, items_text))
}
