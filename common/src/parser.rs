//! 物品清单パーサー
//!
//! 手作業で編集されたテキスト清单（区切り文字の揺れ、色指定マークアップ、
//! 全角記号、重複行など）から、重複なし・ID数値順の物品一覧を作る。
//!
//! 1行ごとの抽出優先順位:
//! 1. `数字 + 空白(全角含む) + 名前`
//! 2. `数字 + 記号の並び(空でも可) + 名前`
//!
//! どちらにも当てはまらない行は黙って捨てる（コメント行などを想定）。

use crate::types::{Item, ParseStats};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// 数字 + 空白 + 名前
    static ref PRIMARY_RE: Regex = Regex::new(r"^([0-9]+)[\s\x{3000}]+(.+)$").unwrap();
    /// 数字 + 文字でも数字でもない記号の並び + 名前
    static ref FALLBACK_RE: Regex = Regex::new(r"^([0-9]+)[^\p{L}\p{N}]*(.*)$").unwrap();
    /// 色・書式指定のマークアップ（例: `#R`, `#c32CD99`）
    static ref MARKUP_RE: Regex = Regex::new(r"#[A-Za-z0-9]+").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"[\s\x{3000}]+").unwrap();
}

/// 名前末尾から1文字だけ取り除く句読点
const TRAILING_PUNCT: &[char] = &[';', '；', '，', ',', '、', '。', '.', '：', ':'];

/// 解析済みの清单
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    stats: ParseStats,
}

impl Catalog {
    /// ID数値順の物品一覧
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 解析時の診断情報
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// IDで物品を検索
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

/// 1行の処理結果
enum LineOutcome {
    Blank,
    NoId,
    BadNumber,
    EmptyName,
    Parsed(Item),
}

/// 清单テキストを物品一覧に変換する
///
/// 入力が何であってもエラーにはならない。結果が空のこともある。
///
/// # Examples
/// ```
/// use redeem_code_common::parse;
///
/// let items = parse("101  红宝石#R\n102、蓝宝石\n101 重复");
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].name, "红宝石");
/// assert_eq!(items[1].name, "蓝宝石");
/// ```
pub fn parse(raw: &str) -> Vec<Item> {
    parse_catalog(raw).into_items()
}

/// 清单テキストを診断情報付きで解析する
///
/// - 先頭のBOMは除去、改行コードは `\n` に統一
/// - 同じIDは最初の行を採用、以降は捨てる
/// - IDの数値で昇順（同値は出現順）
pub fn parse_catalog(raw: &str) -> Catalog {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut stats = ParseStats::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for (index, line) in normalized.split('\n').enumerate() {
        stats.total_lines += 1;
        let line_number = index + 1;

        match parse_line(line, line_number) {
            LineOutcome::Blank => stats.blank_lines += 1,
            LineOutcome::NoId => {
                stats.rejected_no_id += 1;
                tracing::debug!(line = line_number, "先頭にIDがない行をスキップ");
            }
            LineOutcome::BadNumber => {
                stats.rejected_bad_number += 1;
                tracing::debug!(line = line_number, "IDが数値として扱えない行をスキップ");
            }
            LineOutcome::EmptyName => {
                stats.rejected_empty_name += 1;
                tracing::debug!(line = line_number, "名前が空の行をスキップ");
            }
            LineOutcome::Parsed(item) => {
                if seen.insert(item.id.clone()) {
                    items.push(item);
                } else {
                    stats.duplicates += 1;
                    tracing::debug!(line = line_number, id = %item.id, "重複IDの行をスキップ");
                }
            }
        }
    }

    // 安定ソートなので "7" と "007" のような同値は出現順のまま
    items.sort_by_key(Item::numeric_id);
    stats.recognized = items.len();

    tracing::debug!(
        recognized = stats.recognized,
        duplicates = stats.duplicates,
        rejected = stats.rejected(),
        "清单の解析完了"
    );

    Catalog { items, stats }
}

fn parse_line(line: &str, line_number: usize) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }

    let Some((id, candidate)) = split_id_and_name(trimmed) else {
        return LineOutcome::NoId;
    };

    if id.parse::<u64>().is_err() {
        return LineOutcome::BadNumber;
    }

    let name = clean_name(candidate);
    if name.is_empty() {
        return LineOutcome::EmptyName;
    }

    LineOutcome::Parsed(Item {
        id: id.to_string(),
        name,
        full_name: trimmed.to_string(),
        line_number,
    })
}

/// 行頭のIDと名前候補に分割する
fn split_id_and_name(line: &str) -> Option<(&str, &str)> {
    let caps = PRIMARY_RE
        .captures(line)
        .or_else(|| FALLBACK_RE.captures(line))?;

    let id = caps.get(1)?.as_str();
    let name = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((id, name))
}

/// 名前候補を整形する
///
/// 1. `#` + 英数字のマークアップを全て除去
/// 2. 連続する空白（全角含む）を半角スペース1つに
/// 3. 前後の空白を除去
/// 4. 末尾の句読点を1文字だけ除去
pub fn clean_name(candidate: &str) -> String {
    let without_markup = MARKUP_RE.replace_all(candidate, "");
    let collapsed = WHITESPACE_RE.replace_all(&without_markup, " ");
    let mut name = collapsed.trim().to_string();

    if name.ends_with(TRAILING_PUNCT) {
        name.pop();
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    // =============================================
    // 行の抽出
    // =============================================

    #[test]
    fn test_primary_pattern_ascii_space() {
        let items = parse("101 红宝石");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "101");
        assert_eq!(items[0].name, "红宝石");
        assert_eq!(items[0].full_name, "101 红宝石");
        assert_eq!(items[0].line_number, 1);
    }

    #[test]
    fn test_primary_pattern_fullwidth_space_and_tab() {
        let items = parse("7\u{3000}金币\n8\t银币");
        assert_eq!(ids(&items), vec!["7", "8"]);
        assert_eq!(items[0].name, "金币");
        assert_eq!(items[1].name, "银币");
    }

    #[test]
    fn test_fallback_pattern_punctuation() {
        let items = parse("1:铁剑\n2-木盾\n3：钢盔\n4、皮甲\n5——布鞋");
        assert_eq!(ids(&items), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(items[0].name, "铁剑");
        assert_eq!(items[1].name, "木盾");
        assert_eq!(items[2].name, "钢盔");
        assert_eq!(items[3].name, "皮甲");
        assert_eq!(items[4].name, "布鞋");
    }

    #[test]
    fn test_fallback_pattern_no_separator() {
        let items = parse("42Potion");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "42");
        assert_eq!(items[0].name, "Potion");
    }

    #[test]
    fn test_id_takes_whole_digit_run() {
        // 数字だけの行は名前がないので不採用（IDを分割しない）
        let catalog = parse_catalog("12345");
        assert!(catalog.is_empty());
        assert_eq!(catalog.stats().rejected_empty_name, 1);
    }

    #[test]
    fn test_line_without_id_is_skipped() {
        let catalog = parse_catalog("# 装备列表\n物品 名称\n10 长弓");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stats().rejected_no_id, 2);
    }

    #[test]
    fn test_leading_and_trailing_whitespace_trimmed() {
        let items = parse("   \u{3000}15 火把  \u{3000}");
        assert_eq!(items[0].full_name, "15 火把");
        assert_eq!(items[0].name, "火把");
    }

    // =============================================
    // 名前の整形
    // =============================================

    #[test]
    fn test_markup_stripped() {
        assert_eq!(clean_name("#RED龙鳞#c32CD99甲"), "龙鳞甲");
        assert!(!clean_name("史诗#Y 宝箱 #W").contains('#'));
    }

    #[test]
    fn test_hash_right_after_id_is_separator() {
        // `#` も区切り記号として読み飛ばすので、続く英字は名前に残る
        let items = parse("6#G绿宝石\n7#R");
        let pairs: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i.id.as_str(), i.name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("6", "G绿宝石"), ("7", "R")]);
        assert_eq!(items[1].full_name, "7#R");
    }

    #[test]
    fn test_markup_after_separator_still_stripped() {
        let items = parse("8 #R红宝石\n9：绿宝石#c32CD99");
        assert_eq!(items[0].name, "红宝石");
        assert_eq!(items[1].name, "绿宝石");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean_name("大  号\u{3000}\u{3000}药水"), "大 号 药水");
    }

    #[test]
    fn test_single_trailing_punct_removed() {
        assert_eq!(clean_name("药水;"), "药水");
        assert_eq!(clean_name("药水；"), "药水");
        assert_eq!(clean_name("药水。"), "药水");
        assert_eq!(clean_name("药水，"), "药水");
        // 1文字だけ
        assert_eq!(clean_name("药水.."), "药水.");
        assert_eq!(clean_name("药水:;"), "药水:");
    }

    #[test]
    fn test_trailing_punct_after_markup() {
        assert_eq!(clean_name("魔法书#B。"), "魔法书");
        // trimは句読点除去の前なので、句読点の前の空白は残る
        assert_eq!(clean_name("魔法书 。"), "魔法书 ");
    }

    #[test]
    fn test_name_only_punct_rejected() {
        let catalog = parse_catalog("9 ,");
        assert!(catalog.is_empty());
        assert_eq!(catalog.stats().rejected_empty_name, 1);
    }

    // =============================================
    // 重複除去と並び順
    // =============================================

    #[test]
    fn test_scenario_duplicate_dropped() {
        let items = parse("101  红宝石#R\n102、蓝宝石\n101 重复");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "101");
        assert_eq!(items[0].name, "红宝石");
        assert_eq!(items[1].id, "102");
        assert_eq!(items[1].name, "蓝宝石");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = parse_catalog("3 旧名\n3 新名\n3 又一个");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].name, "旧名");
        assert_eq!(catalog.items()[0].line_number, 1);
        assert_eq!(catalog.stats().duplicates, 2);
    }

    #[test]
    fn test_numeric_ordering() {
        let items = parse("10 十\n9 九\n100 百\n1 一");
        assert_eq!(ids(&items), vec!["1", "9", "10", "100"]);
    }

    #[test]
    fn test_equal_numeric_values_keep_file_order() {
        let items = parse("007 特工\n5 五\n7 七");
        assert_eq!(ids(&items), vec!["5", "007", "7"]);
    }

    #[test]
    fn test_overflowing_id_rejected() {
        let catalog = parse_catalog("99999999999999999999999 巨大\n1 小");
        assert_eq!(ids(catalog.items()), vec!["1"]);
        assert_eq!(catalog.stats().rejected_bad_number, 1);
    }

    // =============================================
    // 入力全体
    // =============================================

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \r\n\u{3000}\n").is_empty());
    }

    #[test]
    fn test_leading_bom_removed() {
        let catalog = parse_catalog("\u{feff}101 红宝石\n102 蓝宝石\n");
        assert_eq!(ids(catalog.items()), vec!["101", "102"]);
        assert_eq!(catalog.items()[0].full_name, "101 红宝石");
        assert_eq!(catalog.items()[0].line_number, 1);
        assert_eq!(catalog.stats().rejected_no_id, 0);
    }

    #[test]
    fn test_line_endings_normalized() {
        let catalog = parse_catalog("1 甲\r\n2 乙\r3 丙\n4 丁");
        assert_eq!(ids(catalog.items()), vec!["1", "2", "3", "4"]);
        assert_eq!(catalog.items()[2].line_number, 3);
        assert!(catalog.items().iter().all(|i| !i.name.contains('\r')));
    }

    #[test]
    fn test_stats_counts() {
        let catalog = parse_catalog("1 甲\n\n注释\n1 甲二\n2 ;\n3 丙");
        let stats = catalog.stats();
        assert_eq!(stats.total_lines, 6);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.rejected_no_id, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.rejected_empty_name, 1);
        assert_eq!(stats.recognized, 2);
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let raw = "20 乙\n3 甲#R,\n20 重复\n垃圾行\n100：丙。";
        assert_eq!(parse(raw), parse(raw));
    }

    #[test]
    fn test_catalog_find() {
        let catalog = parse_catalog("5 木材\n6 石料");
        assert_eq!(catalog.find("6").map(|i| i.name.as_str()), Some("石料"));
        assert!(catalog.find("7").is_none());
    }
}
