//! 清单・選択・フォームをまとめて持つ状態
//!
//! 画面側は状態を持たず、選択済みかどうかなどは毎回ここから導出する。

use crate::error::{RedeemError, Result};
use crate::loader::CatalogFile;
use crate::session::SessionSnapshot;
use redeem_code_common::{
    parse_catalog, parse_quantity, Catalog, CommandForm, Error, Item, ParseStats, Rendered,
    SelectedItem, Selection,
};

#[derive(Debug, Clone, Default)]
pub struct Workbench {
    catalog: Catalog,
    raw_text: String,
    source_name: String,
    selection: Selection,
    /// フォーム入力値
    pub form: CommandForm,
    /// 清单の読み直しで選択を引き継ぐか
    restore_selection: bool,
}

impl Workbench {
    pub fn new(restore_selection: bool) -> Self {
        Self {
            restore_selection,
            ..Self::default()
        }
    }

    /// 保存済みセッションから復元する
    ///
    /// 選択の復元が有効なら、新しい清单に存在するIDだけ戻す。
    pub fn from_snapshot(snapshot: SessionSnapshot, restore_selection: bool) -> Self {
        let mut workbench = Self::new(restore_selection);
        workbench.form = snapshot.form;
        workbench.load_text(snapshot.catalog_text, snapshot.catalog_name);

        if restore_selection {
            let catalog = &workbench.catalog;
            let restored = snapshot
                .selected_items
                .into_iter()
                .filter(|entry| catalog.find(&entry.id).is_some());
            workbench.selection = Selection::from_entries(restored);
        }

        workbench
    }

    /// 清单テキストを読み込み、清单を丸ごと置き換える
    ///
    /// 選択はクリアする（復元が有効なら新しい清单にあるIDだけ残す）。
    pub fn load_text(&mut self, raw_text: String, source_name: impl Into<String>) -> ParseStats {
        self.catalog = parse_catalog(&raw_text);
        self.raw_text = raw_text;
        self.source_name = source_name.into();

        if self.restore_selection {
            let catalog = &self.catalog;
            self.selection.retain_in(|id| catalog.find(id).is_some());
        } else {
            self.selection.clear();
        }

        tracing::info!(
            source = %self.source_name,
            items = self.catalog.len(),
            kept_selection = self.selection.len(),
            "清单を読み込みました"
        );

        self.catalog.stats().clone()
    }

    pub fn load_file(&mut self, file: CatalogFile) -> ParseStats {
        self.load_text(file.text, file.file_name)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// 清单のIDで物品を選択する
    pub fn select(&mut self, id: &str, quantity: u32) -> Result<bool> {
        let item = self
            .catalog
            .find(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))?;
        Ok(self.selection.select(item, quantity)?)
    }

    /// 入力文字列の数量で選択する
    pub fn select_with_text(&mut self, id: &str, quantity_text: &str) -> Result<bool> {
        let quantity = parse_quantity(quantity_text)?;
        self.select(id, quantity)
    }

    pub fn remove(&mut self, index: usize) -> Option<SelectedItem> {
        self.selection.remove(index)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// 清单の物品と選択済みフラグの組
    pub fn entries(&self) -> impl Iterator<Item = (&Item, bool)> + '_ {
        self.catalog
            .iter()
            .map(move |item| (item, self.selection.contains(&item.id)))
    }

    pub fn render(&self) -> Rendered {
        self.selection.render(&self.form)
    }

    /// 命令文字列。必須項目が欠けていれば `MissingField` エラー
    pub fn command(&self) -> Result<String> {
        match self.render() {
            Rendered::Command(command) => Ok(command),
            Rendered::Missing(field) => Err(RedeemError::MissingField(field)),
        }
    }

    /// 保存用のスナップショット
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot::new(
            self.raw_text.clone(),
            self.source_name.clone(),
            self.form.clone(),
        );
        if self.restore_selection {
            snapshot.selected_items = self.selection.entries().to_vec();
        }
        snapshot
    }
}
