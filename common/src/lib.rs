//! Redeem Code Common Library
//!
//! 物品清单の解析と兑换码命令の生成。CLI・対話UIで共有される。

pub mod types;
pub mod error;
pub mod parser;
pub mod selection;
pub mod command;

pub use types::{Item, ParseStats, SelectedItem};
pub use error::{Error, Result};
pub use parser::{clean_name, parse, parse_catalog, Catalog};
pub use selection::{parse_quantity, Selection};
pub use command::{render_command, CommandForm, CommandMode, MissingField, Rendered};
