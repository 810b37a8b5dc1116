use regex::Regex;
use std::sync::LazyLock;

/// 无法识别年度时的占位值
pub const UNKNOWN_YEAR: &str = "unknown";

static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("年度正则无效"));

/// 从文件名中提取年度
///
/// 返回第一个连续四位数字；找不到时返回 `"unknown"`
pub fn extract_year(filename: &str) -> String {
    YEAR_TOKEN
        .find(filename)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}
