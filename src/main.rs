use clap::Parser;
use redeem_code_common::{parse_catalog, CommandForm, CommandMode};
use redeem_code_rust::{cli, config, error, loader, picker, session, workbench};
use cli::{Cli, Commands};
use config::Config;
use error::{RedeemError, Result};
use session::SessionSnapshot;
use tracing_subscriber::EnvFilter;
use workbench::Workbench;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    let session_path = match cli.session {
        Some(path) => path,
        None => Config::session_path()?,
    };

    match cli.command {
        Commands::Parse { file, json, show_rejected } => {
            let loaded = loader::read_catalog_file(&file, config.max_file_size)?;
            let catalog = parse_catalog(&loaded.text);

            if json {
                println!("{}", serde_json::to_string_pretty(catalog.items())?);
                return Ok(());
            }

            println!("📄 {}\n", loaded.file_name);
            for item in catalog.iter() {
                println!("  {:>8}  {}", item.id, item.name);
            }

            if catalog.is_empty() {
                println!("⚠ 物品が見つかりませんでした");
            } else {
                println!("\n✔ {}個の物品を解析", catalog.len());
            }

            if show_rejected {
                let stats = catalog.stats();
                println!("  総行数: {}", stats.total_lines);
                println!("  空行: {}", stats.blank_lines);
                println!("  重複ID: {}", stats.duplicates);
                println!("  IDなし: {}", stats.rejected_no_id);
                println!("  名前なし: {}", stats.rejected_empty_name);
                println!("  ID桁あふれ: {}", stats.rejected_bad_number);
            }
        }

        Commands::Generate { file, secret_id, player_id, all, valid_time, items, output } => {
            let loaded = loader::read_catalog_file(&file, config.max_file_size)?;
            let source = loaded.path.display().to_string();

            let mut workbench = Workbench::new(false);
            workbench.load_file(loaded);
            if !workbench.has_catalog() {
                return Err(RedeemError::EmptyCatalog(source));
            }

            for spec in &items {
                workbench.select(&spec.id, spec.quantity)?;
            }

            workbench.form = CommandForm {
                mode: if all { CommandMode::ServerWide } else { CommandMode::PerPlayer },
                secret_id,
                player_id,
                valid_time: valid_time.unwrap_or_else(|| config.default_valid_time.clone()),
            };

            let command = workbench.command()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &command)?;
                    println!("✔ 命令を保存: {}", path.display());
                }
                None => println!("{}", command),
            }
        }

        Commands::Pick { file } => {
            println!("🎁 redeem-code - 物品選択\n");

            let snapshot = SessionSnapshot::load(&session_path);
            let fresh = snapshot.saved_at.is_empty();
            let mut workbench = Workbench::from_snapshot(snapshot, config.restore_selection);
            if fresh {
                workbench.form.valid_time = config.default_valid_time.clone();
            } else if workbench.has_catalog() {
                println!("✔ 前回の清单を復元: {} ({}個)", workbench.source_name(), workbench.catalog().len());
            }

            if let Some(path) = file {
                match loader::read_catalog_file(&path, config.max_file_size) {
                    Ok(loaded) => {
                        let stats = workbench.load_file(loaded);
                        println!("✔ {}個の物品を解析\n", stats.recognized);
                    }
                    Err(e) => println!("⚠ {}\n", e),
                }
            }

            if !workbench.has_catalog() {
                println!("清单が読み込まれていません。メニューから読み込んでください\n");
            }

            picker::run_picker(&mut workbench, &config, &session_path)?;
        }

        Commands::Session { show, clear } => {
            if show || !clear {
                if session_path.exists() {
                    let snapshot = SessionSnapshot::load(&session_path);
                    let items = parse_catalog(&snapshot.catalog_text).len();
                    println!("セッション:");
                    println!("  パス: {}", session_path.display());
                    println!("  清单: {} ({}個)", snapshot.catalog_name, items);
                    println!("  モード: {}", snapshot.form.mode);
                    println!("  密钥ID: {}", snapshot.form.secret_id);
                    println!("  玩家ID: {}", snapshot.form.player_id);
                    println!("  有効時間: {}", snapshot.form.valid_time);
                    println!("  選択: {}件", snapshot.selected_items.len());
                    println!("  保存日時: {}", snapshot.saved_at);
                } else {
                    println!("セッションファイルが存在しません: {}", session_path.display());
                }
            }

            if clear {
                match SessionSnapshot::clear(&session_path) {
                    Ok(true) => println!("✔ セッションを削除しました: {}", session_path.display()),
                    Ok(false) => println!("セッションファイルが存在しません"),
                    Err(e) => println!("セッション削除エラー: {}", e),
                }
            }
        }

        Commands::Config { show, valid_time, restore_selection, max_file_size } => {
            let mut config = config;
            let mut changed = false;

            if let Some(time) = valid_time {
                config.default_valid_time = time;
                changed = true;
            }
            if let Some(restore) = restore_selection {
                config.restore_selection = restore;
                changed = true;
            }
            if let Some(size) = max_file_size {
                config.max_file_size = size;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  有効時間の既定値: {}", config.default_valid_time);
                println!("  上限サイズ: {} bytes", config.max_file_size);
                println!("  選択の引き継ぎ: {}", if config.restore_selection { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
