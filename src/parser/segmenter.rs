//! 题目分段器
//!
//! 把规范化后的文本拆分成标题、正文和四个选项。
//!
//! 分为两个互相独立的纯函数：
//! - `extract_choices`：严格的逐行扫描
//! - `extract_choices_fallback`：宽松的整段扫描，仅在严格扫描不足四个选项时由组装器调用
//!
//! 标题和正文由 `extract_title_and_body` 单独提取，与选项提取互不依赖。

use super::sanitizer::sanitize_choice;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// 选项编号 → 选项文本，按编号有序
pub type Choices = BTreeMap<u8, String>;

/// 一道题应有的选项数量
pub const CHOICE_COUNT: usize = 4;

/// 标题标记，如「【問 5】」
static TITLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【問\s*([0-9]+)】").expect("标题正则无效"));

/// 正文结束位置：换行后紧跟空行或选项标记
static BODY_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:\n|[1-4]\s)").expect("正文结束正则无效"));

/// 严格扫描的选项起始行
static CHOICE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-4])\s+(.+)$").expect("选项正则无效"));

/// 宽松扫描的选项标记，可出现在文本开头或任意换行之后
static FALLBACK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\n)\s*([1-4])\s+").expect("备用选项正则无效"));

/// 标题与正文
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBody {
    /// 形如「【問 N】」，找不到标记时为空
    pub title: String,
    /// 标记之后到第一个空行或选项之前的文本，找不到标记时为空
    pub body: String,
}

/// 提取标题与正文
///
/// 取第一个「【問 N】」标记；正文从标记后开始，到换行后出现空行、
/// 选项标记或文本结束为止，并去除首尾空白。
pub fn extract_title_and_body(normalized: &str) -> TitleBody {
    let Some(caps) = TITLE_MARKER.captures(normalized) else {
        return TitleBody::default();
    };
    let Some(marker) = caps.get(0) else {
        return TitleBody::default();
    };

    let rest = &normalized[marker.end()..];
    let body_end = BODY_END.find(rest).map_or(rest.len(), |m| m.start());

    TitleBody {
        title: format!("【問 {}】", &caps[1]),
        body: rest[..body_end].trim().to_string(),
    }
}

/// 逐行扫描状态
enum ScanState {
    /// 尚未遇到选项
    Idle,
    /// 正在累积第 `number` 个选项
    InChoice { number: u8, text: String },
}

impl ScanState {
    /// 把当前累积的选项写入结果，并回到 `Idle`
    fn flush_into(self, choices: &mut Choices) {
        if let ScanState::InChoice { number, text } = self {
            if !text.is_empty() {
                // 编号重复时后出现的覆盖先出现的
                choices.insert(number, sanitize_choice(&text));
            }
        }
    }
}

/// 判断一行是否为选项起始行，返回编号和剩余文本
fn split_choice_line(line: &str) -> Option<(u8, &str)> {
    let caps = CHOICE_START.captures(line)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str();
    Some((number, text))
}

/// 严格提取选项
///
/// 以「1-4 的数字 + 空白」开头的行开启一个新选项；选项开启期间的其他
/// 非空行作为续行，以单个空格拼接。
pub fn extract_choices(normalized: &str) -> Choices {
    let mut choices = Choices::new();
    let mut state = ScanState::Idle;

    for line in normalized.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((number, text)) = split_choice_line(line) {
            std::mem::replace(&mut state, ScanState::Idle).flush_into(&mut choices);
            state = ScanState::InChoice {
                number,
                text: text.to_string(),
            };
        } else if let ScanState::InChoice { text, .. } = &mut state {
            text.push(' ');
            text.push_str(line);
        }
    }
    state.flush_into(&mut choices);

    choices
}

/// 宽松扫描中找到的选项标记
struct FallbackMarker {
    /// 标记起始位置（开头或换行符）
    start: usize,
    number: u8,
    /// 选项内容起始位置
    content_start: usize,
}

/// 从 `from` 开始查找下一个有效的选项标记
///
/// 数字之后的空白不能跨过空行，否则该数字只是孤立的一行（如页码）
fn next_fallback_marker(text: &str, from: usize) -> Option<FallbackMarker> {
    let mut pos = from;
    while let Some(caps) = FALLBACK_MARKER.captures_at(text, pos) {
        let (whole, digit) = (caps.get(0)?, caps.get(1)?);
        let crosses_blank_line = text[digit.end()..whole.end()].matches('\n').count() >= 2;
        if !crosses_blank_line {
            if let Ok(number) = digit.as_str().parse() {
                return Some(FallbackMarker {
                    start: whole.start(),
                    number,
                    content_start: whole.end(),
                });
            }
        }
        pos = digit.end();
    }
    None
}

/// 宽松提取选项
///
/// 在整段文本中查找选项标记，取到下一个标记、空行或文本结尾为止的内容，
/// 折叠空白后按编号保存。结果整体替换严格提取的结果。
pub fn extract_choices_fallback(normalized: &str) -> Choices {
    let mut choices = Choices::new();
    let mut pos = 0;

    while let Some(marker) = next_fallback_marker(normalized, pos) {
        // 内容至少一个字符
        let Some(first) = normalized[marker.content_start..].chars().next() else {
            break;
        };
        let search_from = marker.content_start + first.len_utf8();

        let blank_line = normalized[search_from..]
            .find("\n\n")
            .map(|i| search_from + i);
        let next_marker = next_fallback_marker(normalized, search_from).map(|m| m.start);
        let content_end = [blank_line, next_marker]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(normalized.len());

        choices.insert(
            marker.number,
            sanitize_choice(&normalized[marker.content_start..content_end]),
        );
        pos = content_end;
    }

    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalizer::normalize;

    fn choices_of(pairs: &[(u8, &str)]) -> Choices {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_title_and_body() {
        let text = normalize("【問 5】 Some body text\n1 choice A\n2 choice B");
        let tb = extract_title_and_body(&text);
        assert_eq!(tb.title, "【問 5】");
        assert_eq!(tb.body, "Some body text");
    }

    #[test]
    fn test_title_without_space_is_rebuilt() {
        let tb = extract_title_and_body("【問12】 本文");
        assert_eq!(tb.title, "【問 12】");
        assert_eq!(tb.body, "本文");
    }

    #[test]
    fn test_multiline_body_stops_at_choice() {
        let text = normalize("【問 1】 一行目\n二行目\n1 A\n2 B");
        let tb = extract_title_and_body(&text);
        assert_eq!(tb.body, "一行目\n二行目");
    }

    #[test]
    fn test_title_marker_followed_directly_by_choice() {
        let text = normalize("【問 3】\n1 A\n2 B");
        let tb = extract_title_and_body(&text);
        assert_eq!(tb.title, "【問 3】");
        assert_eq!(tb.body, "");
    }

    #[test]
    fn test_missing_title_marker() {
        let tb = extract_title_and_body("問題文\n\n1 A");
        assert_eq!(tb, TitleBody::default());
    }

    #[test]
    fn test_extract_four_choices() {
        let text = normalize("【問 5】 本文\n1 choice A\n2 choice B\n3 choice C\n4 choice D");
        assert_eq!(
            extract_choices(&text),
            choices_of(&[(1, "choice A"), (2, "choice B"), (3, "choice C"), (4, "choice D")])
        );
    }

    #[test]
    fn test_continuation_lines_are_joined() {
        let text = normalize("本文\n1 甲は\n乙に対して\n2 B\n3 C\n4 D\u{3000}\u{3000}終わり");
        let choices = extract_choices(&text);
        assert_eq!(choices[&1], "甲は 乙に対して");
        assert_eq!(choices[&4], "D 終わり");
    }

    #[test]
    fn test_lines_before_first_choice_are_ignored() {
        let choices = extract_choices("前置き\n続き\n\n2 B");
        assert_eq!(choices, choices_of(&[(2, "B")]));
    }

    #[test]
    fn test_duplicate_number_last_wins() {
        let text = normalize("1 first\n2 B\n1 second");
        let choices = extract_choices(&text);
        assert_eq!(choices[&1], "second");
        assert_eq!(choices.len(), 2);
    }

    #[test]
    fn test_fallback_matches_primary_on_clean_input() {
        let text = normalize("【問 1】 本文\n1 A\n2 B\n3 C\n4 D");
        assert_eq!(extract_choices_fallback(&text), extract_choices(&text));
    }

    #[test]
    fn test_fallback_picks_up_marker_on_its_own_line() {
        // 「3」の後に改行があるため厳格な走査では拾えない
        let text = normalize("本文\n1 A\n2 B\n3\nC の内容\n4 D");
        let primary = extract_choices(&text);
        assert_eq!(primary.len(), 3);

        let fallback = extract_choices_fallback(&text);
        assert_eq!(
            fallback,
            choices_of(&[(1, "A"), (2, "B"), (3, "C の内容"), (4, "D")])
        );
    }

    #[test]
    fn test_fallback_never_returns_fewer_than_primary() {
        let samples = [
            "本文\n1 A\n2 B",
            "1 A",
            "【問 9】 本文\n3 C\n続き\n4 D",
            "本文のみ",
            "1 A\n1 B\n2 C",
            "2 B\n\n後書き\n3\nC",
        ];
        for s in samples {
            let text = normalize(s);
            let primary = extract_choices(&text);
            let fallback = extract_choices_fallback(&text);
            assert!(
                fallback.len() >= primary.len(),
                "input: {:?}, primary: {:?}, fallback: {:?}",
                s,
                primary,
                fallback
            );
        }
    }

    #[test]
    fn test_fallback_bare_digit_before_blank_line_is_not_a_marker() {
        // 孤立した「3」は次の選項「4 D」を奪わない
        let text = normalize("1 A\n3 C\n3\n4 D");
        let expected = choices_of(&[(1, "A"), (3, "C 3"), (4, "D")]);
        assert_eq!(extract_choices(&text), expected);
        assert_eq!(extract_choices_fallback(&text), expected);
    }

    #[test]
    fn test_fallback_keeps_every_primary_number_over_line_combinations() {
        const LINES: [&str; 9] = ["本文", "続き", "1", "3", "4", "1 A", "2 B", "3 C", "4 D"];

        for len in 1..=4u32 {
            for code in 0..LINES.len().pow(len) {
                let mut rest = code;
                let lines: Vec<&str> = (0..len)
                    .map(|_| {
                        let line = LINES[rest % LINES.len()];
                        rest /= LINES.len();
                        line
                    })
                    .collect();

                let text = normalize(&lines.join("\n"));
                let primary = extract_choices(&text);
                let fallback = extract_choices_fallback(&text);
                assert!(
                    primary.keys().all(|k| fallback.contains_key(k)),
                    "lines: {:?}, primary: {:?}, fallback: {:?}",
                    lines,
                    primary,
                    fallback
                );
            }
        }
    }

    #[test]
    fn test_fallback_empty_input() {
        assert!(extract_choices_fallback("").is_empty());
        assert!(extract_choices_fallback("1 ").is_empty());
    }
}
