//! 対話式の物品選択
//!
//! メニューから操作を選び、状態を変えるたびに命令のプレビューを出し直す。
//! 状態を変える操作のあとはセッションを保存する（失敗しても続行）。

use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::workbench::Workbench;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use redeem_code_common::{parse_quantity, CommandMode};
use std::path::{Path, PathBuf};

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SelectItem,
    RemoveItem,
    ClearAll,
    SetSecretId,
    SetPlayerId,
    SetValidTime,
    ToggleMode,
    ShowCommand,
    WriteCommand,
    LoadFile,
    Quit,
}

const MENU: &[(MenuAction, &str)] = &[
    (MenuAction::SelectItem, "物品を選択"),
    (MenuAction::RemoveItem, "選択を外す"),
    (MenuAction::ClearAll, "選択をすべてクリア"),
    (MenuAction::SetSecretId, "密钥IDを入力"),
    (MenuAction::SetPlayerId, "玩家IDを入力"),
    (MenuAction::SetValidTime, "有効時間を入力"),
    (MenuAction::ToggleMode, "個人/全服を切り替え"),
    (MenuAction::ShowCommand, "命令を表示"),
    (MenuAction::WriteCommand, "命令をファイルに保存"),
    (MenuAction::LoadFile, "別の清单を読み込む"),
    (MenuAction::Quit, "保存して終了"),
];

/// モードに関係ない入力欄はメニューに出さない
fn visible_actions(mode: CommandMode) -> Vec<(MenuAction, &'static str)> {
    MENU.iter()
        .copied()
        .filter(|(action, _)| match (action, mode) {
            (MenuAction::SetPlayerId, CommandMode::ServerWide) => false,
            (MenuAction::SetValidTime, CommandMode::PerPlayer) => false,
            _ => true,
        })
        .collect()
}

/// 一覧の表示ラベル（選択済みは印と数量付き）
pub fn item_labels(workbench: &Workbench) -> Vec<String> {
    workbench
        .entries()
        .map(|(item, selected)| {
            if selected {
                let quantity = workbench.selection().quantity_of(&item.id).unwrap_or(0);
                format!("✔ {} × {}", item.label(), quantity)
            } else {
                format!("  {}", item.label())
            }
        })
        .collect()
}

/// 対話セッションを実行する
pub fn run_picker(workbench: &mut Workbench, config: &Config, session_path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        print_status(workbench);

        let actions = visible_actions(workbench.form.mode);
        let labels: Vec<&str> = actions.iter().map(|(_, label)| *label).collect();
        let chosen = Select::with_theme(&theme)
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()?;

        let changed = match actions[chosen].0 {
            MenuAction::SelectItem => select_item(workbench, &theme)?,
            MenuAction::RemoveItem => remove_item(workbench, &theme)?,
            MenuAction::ClearAll => clear_all(workbench, &theme)?,
            MenuAction::SetSecretId => {
                workbench.form.secret_id = prompt_field(&theme, "密钥ID", &workbench.form.secret_id)?;
                true
            }
            MenuAction::SetPlayerId => {
                workbench.form.player_id = prompt_field(&theme, "玩家ID", &workbench.form.player_id)?;
                true
            }
            MenuAction::SetValidTime => {
                workbench.form.valid_time = prompt_field(&theme, "有効時間", &workbench.form.valid_time)?;
                true
            }
            MenuAction::ToggleMode => {
                workbench.form.mode = workbench.form.mode.toggled();
                println!("  → {}モード\n", workbench.form.mode);
                true
            }
            MenuAction::ShowCommand => {
                println!("\n{}\n", workbench.render());
                false
            }
            MenuAction::WriteCommand => {
                write_command(workbench, &theme)?;
                false
            }
            MenuAction::LoadFile => load_file(workbench, config, &theme)?,
            MenuAction::Quit => {
                persist(workbench, session_path);
                println!("保存して終了します...");
                break;
            }
        };

        if changed {
            persist(workbench, session_path);
        }
    }

    Ok(())
}

fn print_status(workbench: &Workbench) {
    println!("---");
    if workbench.has_catalog() {
        println!("清单: {} ({}個の物品)", workbench.source_name(), workbench.catalog().len());
    } else {
        println!("清单: 未読み込み");
    }

    let selection = workbench.selection();
    if selection.is_empty() {
        println!("選択: なし");
    } else {
        let tags: Vec<String> = selection
            .iter()
            .map(|e| format!("{} × {}", e.name, e.quantity))
            .collect();
        println!("選択: {}", tags.join(", "));
    }
    println!("命令: {}", workbench.render());
    println!("---");
}

fn select_item(workbench: &mut Workbench, theme: &ColorfulTheme) -> Result<bool> {
    if !workbench.has_catalog() {
        println!("⚠ 清单に物品がありません\n");
        return Ok(false);
    }

    let labels = item_labels(workbench);
    let Some(index) = FuzzySelect::with_theme(theme)
        .with_prompt("物品（入力で絞り込み、Escで戻る）")
        .items(&labels)
        .default(0)
        .interact_opt()?
    else {
        return Ok(false);
    };

    let item = workbench.catalog().items()[index].clone();
    let current = workbench
        .selection()
        .quantity_of(&item.id)
        .unwrap_or(1)
        .to_string();

    let text: String = Input::with_theme(theme)
        .with_prompt(format!("{} の数量", item.label()))
        .with_initial_text(current)
        .interact_text()?;

    match parse_quantity(&text) {
        Ok(quantity) => {
            let added = workbench.select(&item.id, quantity)?;
            let verb = if added { "追加" } else { "更新" };
            println!("  → {} × {} を{}\n", item.name, quantity, verb);
            Ok(true)
        }
        Err(_) => {
            println!("⚠ 有効な数量を入力してください\n");
            Ok(false)
        }
    }
}

fn remove_item(workbench: &mut Workbench, theme: &ColorfulTheme) -> Result<bool> {
    if workbench.selection().is_empty() {
        println!("⚠ 選択済みの物品がありません\n");
        return Ok(false);
    }

    let labels: Vec<String> = workbench
        .selection()
        .iter()
        .map(|e| format!("{} (ID: {}) × {}", e.name, e.id, e.quantity))
        .collect();
    let Some(index) = Select::with_theme(theme)
        .with_prompt("外す物品（Escで戻る）")
        .items(&labels)
        .interact_opt()?
    else {
        return Ok(false);
    };

    match workbench.remove(index) {
        Some(removed) => {
            println!("  → {} を外しました\n", removed.name);
            Ok(true)
        }
        None => Ok(false),
    }
}

fn clear_all(workbench: &mut Workbench, theme: &ColorfulTheme) -> Result<bool> {
    if workbench.selection().is_empty() {
        return Ok(false);
    }

    let confirmed = Confirm::with_theme(theme)
        .with_prompt("選択をすべてクリアしますか？")
        .default(false)
        .interact()?;
    if confirmed {
        workbench.clear_selection();
        println!("  → すべてクリアしました\n");
    }
    Ok(confirmed)
}

fn prompt_field(theme: &ColorfulTheme, label: &str, current: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn write_command(workbench: &Workbench, theme: &ColorfulTheme) -> Result<()> {
    let rendered = workbench.render();
    let Some(command) = rendered.command() else {
        println!("⚠ 保存できる命令がありません: {}\n", rendered);
        return Ok(());
    };

    let path: String = Input::with_theme(theme)
        .with_prompt("保存先")
        .default("command.txt".to_string())
        .interact_text()?;

    match std::fs::write(&path, command) {
        Ok(()) => println!("✔ 命令を保存: {}\n", path),
        Err(e) => println!("⚠ 保存に失敗しました: {}\n", e),
    }
    Ok(())
}

fn load_file(workbench: &mut Workbench, config: &Config, theme: &ColorfulTheme) -> Result<bool> {
    let path: String = Input::with_theme(theme)
        .with_prompt("清单ファイル（.txt）")
        .interact_text()?;

    let file = match loader::read_catalog_file(&PathBuf::from(path.trim()), config.max_file_size) {
        Ok(file) => file,
        Err(e) => {
            println!("⚠ {}\n", e);
            return Ok(false);
        }
    };

    let stats = workbench.load_file(file);
    if stats.recognized == 0 {
        println!("⚠ 物品が見つかりませんでした\n");
    } else {
        println!("✔ {}個の物品を解析\n", stats.recognized);
    }
    Ok(true)
}

/// セッションを保存（失敗はログのみ）
fn persist(workbench: &Workbench, session_path: &Path) {
    let mut snapshot = workbench.snapshot();
    if let Err(e) = snapshot.save(session_path) {
        tracing::warn!(path = %session_path.display(), error = %e, "セッション保存に失敗");
    }
}
