//! 文本规范化
//!
//! 把原始题目文本整理成按行排列的规范形式，供分段器使用

use regex::Regex;
use std::sync::LazyLock;

/// 选项标记：行首为 1-4 的数字并跟随空白
pub(crate) static CHOICE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-4]\s+").expect("选项标记正则无效"));

/// 规范化题目文本
///
/// - 连续换行折叠为单个换行（`\r\n` 与 `\r` 视为换行）
/// - 每行去除首尾空白，并删除空行
/// - 以选项标记开头的行之前插入一个空行（第一行除外）
///
/// # 参数
/// - `text`: 原始题目文本
///
/// # 返回
/// 返回规范化后的文本
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut result: Vec<&str> = Vec::new();
    for line in unified.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        if CHOICE_LINE.is_match(line) && !result.is_empty() {
            result.push("");
        }
        result.push(line);
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_blank_lines_and_trim() {
        let text = "  【問 1】 本文\n\n\n   続き  \n";
        assert_eq!(normalize(text), "【問 1】 本文\n続き");
    }

    #[test]
    fn test_separator_before_choice_lines() {
        let text = "【問 2】 本文\n1 選択肢A\n2 選択肢B";
        assert_eq!(normalize(text), "【問 2】 本文\n\n1 選択肢A\n\n2 選択肢B");
    }

    #[test]
    fn test_first_line_choice_has_no_separator() {
        assert_eq!(normalize("1 A\n2 B"), "1 A\n\n2 B");
    }

    #[test]
    fn test_digit_without_space_is_not_a_choice() {
        // 「10年」のような行は選択肢ではない
        assert_eq!(normalize("本文\n10年以内\n5 x"), "本文\n10年以内\n5 x");
    }

    #[test]
    fn test_carriage_returns() {
        assert_eq!(normalize("本文\r\n\r\n1 A\r2 B"), "本文\n\n1 A\n\n2 B");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n \n"), "");
    }
}
