use crate::item_spec::ItemSpec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redeem-code")]
#[command(about = "物品清单から兑换码命令を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// セッションファイル（省略時: ~/.config/redeem-code/session.json）
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 清单ファイルを解析して物品一覧を表示
    Parse {
        /// 清单ファイル（.txt）
        #[arg(required = true)]
        file: PathBuf,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 不採用行の内訳も表示
        #[arg(long)]
        show_rejected: bool,
    },

    /// 物品を指定して命令を生成（非対話）
    Generate {
        /// 清单ファイル（.txt）
        #[arg(required = true)]
        file: PathBuf,

        /// 密钥ID
        #[arg(short, long, default_value = "")]
        secret_id: String,

        /// 玩家ID（個人用）
        #[arg(short, long, default_value = "")]
        player_id: String,

        /// 全服用の命令を生成
        #[arg(short, long)]
        all: bool,

        /// 有効時間（全服用、省略時は設定値）
        #[arg(short = 't', long)]
        valid_time: Option<String>,

        /// 物品指定（例: 101x5）。複数指定可、指定順に並ぶ
        #[arg(short, long = "item")]
        items: Vec<ItemSpec>,

        /// 命令の出力先ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話的に物品を選んで命令を生成
    Pick {
        /// 清单ファイル（省略時は前回の清单）
        file: Option<PathBuf>,
    },

    /// 前回セッションを表示/削除
    Session {
        /// セッション内容を表示
        #[arg(long)]
        show: bool,

        /// セッションを削除
        #[arg(long)]
        clear: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 有効時間の既定値を設定
        #[arg(long)]
        valid_time: Option<String>,

        /// 清单の読み直しで選択を引き継ぐか
        #[arg(long)]
        restore_selection: Option<bool>,

        /// 清单ファイルの上限サイズ（bytes）
        #[arg(long)]
        max_file_size: Option<u64>,
    },
}
