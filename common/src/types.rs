//! 物品の型定義
//!
//! CLIと対話UIで共有される型:
//! - Item: 清单ファイルから解析した1行分の物品
//! - SelectedItem: ユーザーが数量付きで選択した物品
//! - ParseStats: 解析時の診断カウンタ

use serde::{Deserialize, Serialize};

/// 清单の物品
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// 物品ID（数字のみ、元の表記を保持）
    pub id: String,

    /// 表示名（マークアップ・末尾の句読点を除去済み）
    pub name: String,

    /// 元の行（trim済み、変更しない）
    #[serde(default)]
    pub full_name: String,

    /// 元ファイルの行番号（1始まり）
    #[serde(default)]
    pub line_number: usize,
}

impl Item {
    /// IDの数値（並べ替え用）
    ///
    /// 解析済みの物品では常に変換に成功する。手で組み立てた値は0扱い。
    pub fn numeric_id(&self) -> u64 {
        self.id.parse().unwrap_or(0)
    }

    /// 一覧表示用のラベル
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }
}

/// 選択済みの物品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub id: String,
    pub name: String,
    /// 数量（1以上）
    pub quantity: u32,
}

impl SelectedItem {
    /// 命令内の表記 `{id}x{quantity}`
    pub fn token(&self) -> String {
        format!("{}x{}", self.id, self.quantity)
    }
}

/// 清单解析の診断情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// 入力の総行数
    pub total_lines: usize,
    /// 空行
    pub blank_lines: usize,
    /// 採用した物品数
    pub recognized: usize,
    /// ID重複で捨てた行
    pub duplicates: usize,
    /// 先頭に数字がない行
    pub rejected_no_id: usize,
    /// 名前が空になった行
    pub rejected_empty_name: usize,
    /// IDが数値として扱えない行（桁あふれ）
    pub rejected_bad_number: usize,
}

impl ParseStats {
    /// 不採用行の合計（重複は含まない）
    pub fn rejected(&self) -> usize {
        self.rejected_no_id + self.rejected_empty_name + self.rejected_bad_number
    }
}
