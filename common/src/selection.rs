//! 選択済み物品の管理
//!
//! 並び順は最初に選択した順（ID順ではない）。表示順と命令内の順序はこれに従う。

use crate::command::{render_command, CommandForm, Rendered};
use crate::error::{Error, Result};
use crate::types::{Item, SelectedItem};

/// 選択済み物品のリスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectedItem>,
}

/// 入力文字列を数量に変換する
///
/// 前後の空白は無視する。数字以外・0・負数はエラー。
pub fn parse_quantity(text: &str) -> Result<u32> {
    match text.trim().parse::<u32>() {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(Error::InvalidQuantity(text.to_string())),
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択済みの一覧から復元する（重複IDと数量0は捨てる）
    pub fn from_entries(entries: impl IntoIterator<Item = SelectedItem>) -> Self {
        let mut selection = Self::new();
        for entry in entries {
            if entry.quantity == 0 || selection.contains(&entry.id) {
                continue;
            }
            selection.entries.push(entry);
        }
        selection
    }

    /// 物品を選択する
    ///
    /// 既に選択済みなら数量だけ更新（位置は変えない）、なければ末尾に追加。
    /// 追加した場合は `true` を返す。
    pub fn select(&mut self, item: &Item, quantity: u32) -> Result<bool> {
        if quantity == 0 {
            return Err(Error::InvalidQuantity(quantity.to_string()));
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == item.id) {
            existing.quantity = quantity;
            return Ok(false);
        }

        self.entries.push(SelectedItem {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity,
        });
        Ok(true)
    }

    /// 指定位置の物品を外す
    ///
    /// 範囲外の位置は何もしない（古い表示の位置が来ても安全）。
    pub fn remove(&mut self, index: usize) -> Option<SelectedItem> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 新しい清单に存在するIDだけ残す
    pub fn retain_in(&mut self, mut exists: impl FnMut(&str) -> bool) {
        self.entries.retain(|e| exists(&e.id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.quantity)
    }

    pub fn entries(&self) -> &[SelectedItem] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedItem> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 命令の物品部分 `101x1 102x5`
    pub fn items_text(&self) -> String {
        self.entries
            .iter()
            .map(SelectedItem::token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 命令を生成する
    pub fn render(&self, form: &CommandForm) -> Rendered {
        render_command(&self.items_text(), form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandMode, MissingField};

    fn item(id: &str, name: &str) -> Item {
        Item { id: id.into(), name: name.into(), ..Default::default() }
    }

    // =============================================
    // parse_quantity
    // =============================================

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_quantity_rejects_invalid() {
        for text in ["0", "-1", "abc", "", "1.5", "99999999999"] {
            let result = parse_quantity(text);
            assert!(
                matches!(result, Err(Error::InvalidQuantity(_))),
                "受理されてしまった: {:?}",
                text
            );
        }
    }

    // =============================================
    // select / remove / clear
    // =============================================

    #[test]
    fn test_select_upsert() {
        let mut selection = Selection::new();
        let wood = item("5", "木材");
        assert!(selection.select(&wood, 3).unwrap());
        assert!(!selection.select(&wood, 7).unwrap());

        assert_eq!(selection.len(), 1);
        assert_eq!(
            selection.entries()[0],
            SelectedItem { id: "5".into(), name: "木材".into(), quantity: 7 }
        );
    }

    #[test]
    fn test_select_keeps_first_selection_order() {
        let mut selection = Selection::new();
        selection.select(&item("9", "九"), 1).unwrap();
        selection.select(&item("2", "二"), 1).unwrap();
        selection.select(&item("9", "九"), 4).unwrap();
        assert_eq!(selection.items_text(), "9x4 2x1");
    }

    #[test]
    fn test_select_zero_rejected_without_change() {
        let mut selection = Selection::new();
        selection.select(&item("1", "一"), 2).unwrap();
        let before = selection.clone();

        assert!(selection.select(&item("1", "一"), 0).is_err());
        assert!(selection.select(&item("3", "三"), 0).is_err());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_remove_in_range() {
        let mut selection = Selection::new();
        selection.select(&item("1", "一"), 1).unwrap();
        selection.select(&item("2", "二"), 1).unwrap();

        let removed = selection.remove(0).unwrap();
        assert_eq!(removed.id, "1");
        assert_eq!(selection.items_text(), "2x1");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut selection = Selection::new();
        selection.select(&item("1", "一"), 1).unwrap();
        let before = selection.clone();

        assert!(selection.remove(selection.len()).is_none());
        assert!(selection.remove(usize::MAX).is_none());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.select(&item("1", "一"), 1).unwrap();
        selection.clear();
        assert!(selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain_in() {
        let mut selection = Selection::new();
        selection.select(&item("1", "一"), 1).unwrap();
        selection.select(&item("2", "二"), 2).unwrap();
        selection.retain_in(|id| id == "2");
        assert_eq!(selection.items_text(), "2x2");
    }

    #[test]
    fn test_from_entries_drops_invalid() {
        let selection = Selection::from_entries(vec![
            SelectedItem { id: "1".into(), name: "一".into(), quantity: 2 },
            SelectedItem { id: "1".into(), name: "一".into(), quantity: 9 },
            SelectedItem { id: "2".into(), name: "二".into(), quantity: 0 },
        ]);
        assert_eq!(selection.items_text(), "1x2");
        assert_eq!(selection.quantity_of("1"), Some(2));
        assert!(!selection.contains("2"));
    }

    // =============================================
    // render
    // =============================================

    #[test]
    fn test_render_empty_selection() {
        let form = CommandForm { secret_id: "ABC".into(), player_id: "P1".into(), ..Default::default() };
        assert_eq!(Selection::new().render(&form), Rendered::Missing(MissingField::Selection));
    }

    #[test]
    fn test_render_scenario_per_player() {
        let mut selection = Selection::new();
        selection.select(&item("5", "木材"), 3).unwrap();
        let form = CommandForm {
            mode: CommandMode::PerPlayer,
            secret_id: "ABC".into(),
            player_id: "P1".into(),
            ..Default::default()
        };
        assert_eq!(selection.render(&form).to_string(), "/新建兑换码 ABC P1 5x3");
    }

    #[test]
    fn test_render_server_wide_missing_valid_time() {
        let mut selection = Selection::new();
        selection.select(&item("5", "木材"), 3).unwrap();
        let form = CommandForm {
            mode: CommandMode::ServerWide,
            secret_id: "ABC".into(),
            valid_time: String::new(),
            ..Default::default()
        };
        assert_eq!(selection.render(&form), Rendered::Missing(MissingField::ValidTime));
    }
}
