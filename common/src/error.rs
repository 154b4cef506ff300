//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid quantity: {0:?} (must be a positive integer)")]
    InvalidQuantity(String),

    #[error("Unknown item id: {0}")]
    UnknownItem(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
