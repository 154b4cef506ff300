use redeem_code_common::MissingField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedeemError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error(".txtファイルを選択してください: {0}")]
    WrongExtension(String),

    #[error("ファイルが空です: {0}")]
    EmptyFile(String),

    #[error("ファイルが大きすぎます: {path} ({size} bytes, 上限 {limit} bytes)")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("ファイル読み込み失敗（UTF-8ではありません）: {0}")]
    Decode(String),

    #[error("物品が1件も見つかりません: {0}")]
    EmptyCatalog(String),

    #[error("物品指定が不正: {0}（例: 101x5）")]
    InvalidItemSpec(String),

    #[error("命令を生成できません: {0}")]
    MissingField(MissingField),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] redeem_code_common::Error),
}

impl From<dialoguer::Error> for RedeemError {
    fn from(err: dialoguer::Error) -> Self {
        RedeemError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RedeemError>;
