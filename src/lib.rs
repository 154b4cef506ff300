//! 物品清单の読み込みと兑换码命令生成（端末フロントエンド）

pub mod cli;
pub mod config;
pub mod error;
pub mod item_spec;
pub mod loader;
pub mod picker;
pub mod session;
pub mod workbench;
