//! 清单ファイルの読み込み
//!
//! 解析の前にファイル単位で弾く:
//! - 拡張子が `.txt` でない
//! - 空ファイル
//! - 上限サイズ超過
//! - UTF-8 として読めない

use crate::error::{RedeemError, Result};
use std::path::{Path, PathBuf};

const CATALOG_EXTENSION: &str = "txt";

/// 読み込んだ清单ファイル
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub path: PathBuf,
    pub file_name: String,
    pub text: String,
}

/// 拡張子が `.txt` か（大文字小文字は区別しない）
pub fn is_catalog_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(CATALOG_EXTENSION))
        .unwrap_or(false)
}

/// 清单ファイルを読み込む
pub fn read_catalog_file(path: &Path, max_size: u64) -> Result<CatalogFile> {
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(RedeemError::FileNotFound(display));
    }

    if !is_catalog_extension(path) {
        return Err(RedeemError::WrongExtension(display));
    }

    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(RedeemError::EmptyFile(display));
    }
    if size > max_size {
        return Err(RedeemError::FileTooLarge { path: display, size, limit: max_size });
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| RedeemError::Decode(display))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), size, "清单ファイルを読み込み");

    Ok(CatalogFile {
        path: path.to_path_buf(),
        file_name,
        text,
    })
}
