//! コマンドラインの物品指定（`--item 101x5`）
//!
//! 受け付ける表記: `101`, `101x5`, `101X5`, `101*5`, `101×5`, `101=5`, `101:5`
//! 数量省略時は1。

use crate::error::{RedeemError, Result};
use lazy_static::lazy_static;
use redeem_code_common::parse_quantity;
use regex::Regex;

lazy_static! {
    static ref ITEM_SPEC_RE: Regex =
        Regex::new(r"^([0-9]+)\s*(?:[xX*×=:：]\s*(\S+))?$").unwrap();
}

/// 物品指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: String,
    pub quantity: u32,
}

impl std::str::FromStr for ItemSpec {
    type Err = RedeemError;

    fn from_str(s: &str) -> Result<Self> {
        parse_item_spec(s)
    }
}

pub fn parse_item_spec(text: &str) -> Result<ItemSpec> {
    let caps = ITEM_SPEC_RE
        .captures(text.trim())
        .ok_or_else(|| RedeemError::InvalidItemSpec(text.to_string()))?;

    let quantity = match caps.get(2) {
        Some(m) => parse_quantity(m.as_str())?,
        None => 1,
    };

    Ok(ItemSpec {
        id: caps[1].to_string(),
        quantity,
    })
}
