//! 题目组装器
//!
//! 把规范化、分段、年度提取的结果组合成 `ParsedQuestion`

use super::normalizer::normalize;
use super::segmenter::{
    extract_choices, extract_choices_fallback, extract_title_and_body, CHOICE_COUNT,
};
use super::year::{extract_year, UNKNOWN_YEAR};
use crate::error::ParseError;
use crate::models::question::{ParsedQuestion, RawQuestionRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("整数正则无效"));

/// 把文本转换为整数
///
/// 忽略前导空白，读取可选符号和开头的数字；没有数字时为 0，溢出时取边界值
pub fn coerce_int(text: &str) -> i64 {
    let Some(digits) = LEADING_INT.captures(text).and_then(|c| c.get(1)) else {
        return 0;
    };
    let digits = digits.as_str();
    digits.parse().unwrap_or_else(|_| {
        if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// 解析一条原始题目记录
///
/// 解析质量下降时不报错；只有 `question_text` 缺失时返回错误
pub fn parse_question(record: &RawQuestionRecord) -> Result<ParsedQuestion, ParseError> {
    let question_text = record
        .question_text
        .as_deref()
        .ok_or(ParseError::MissingField {
            record_id: record.id,
            field: "question_text",
        })?;

    let raw_text = normalize(question_text);
    let title_body = extract_title_and_body(&raw_text);
    if title_body.title.is_empty() {
        debug!("题目 {} 未找到标题标记", record.id);
    }

    let mut choices = extract_choices(&raw_text);
    if choices.len() < CHOICE_COUNT {
        debug!("题目 {} 选项不足4个: {} 个，改用宽松提取", record.id, choices.len());
        choices = extract_choices_fallback(&raw_text);
        if choices.len() < CHOICE_COUNT {
            debug!("题目 {} 宽松提取后仍只有 {} 个选项", record.id, choices.len());
        }
    }

    let year = extract_year(&record.filename);
    if year == UNKNOWN_YEAR {
        debug!("题目 {} 的文件名中没有年度: {}", record.id, record.filename);
    }

    Ok(ParsedQuestion {
        id: record.id,
        filename: record.filename.clone(),
        year,
        question_number: record.question_number.clone(),
        title: title_body.title,
        body: title_body.body,
        choices,
        correct_answer: record.answer_text.as_deref().map_or(0, coerce_int),
        raw_text,
    })
}
