use crate::parser::segmenter::{Choices, CHOICE_COUNT};
use serde::{Deserialize, Serialize};

/// 原始题目记录
///
/// 由外部存储提供，本 crate 只读取
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuestionRecord {
    pub id: i64,
    #[serde(default)]
    pub filename: String,
    #[serde(default, deserialize_with = "deserialize_string_or_int")]
    pub question_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string_or_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer_text: Option<String>,
}

/// 解析后的题目
///
/// 每次请求时重新计算，不做持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuestion {
    pub id: i64,
    pub filename: String,
    /// 四位年度，或 `"unknown"`
    pub year: String,
    pub question_number: String,
    pub title: String,
    pub body: String,
    pub choices: Choices,
    /// 由 `answer_text` 转换而来，不校验范围
    pub correct_answer: i64,
    /// 分段器看到的规范化文本
    pub raw_text: String,
}

impl ParsedQuestion {
    /// 四个选项是否齐全
    pub fn is_complete(&self) -> bool {
        self.missing_choices().is_empty()
    }

    /// 缺失的选项编号（升序）
    pub fn missing_choices(&self) -> Vec<u8> {
        (1..=CHOICE_COUNT as u8)
            .filter(|n| !self.choices.contains_key(n))
            .collect()
    }

    /// 获取选项文本，缺失时返回占位文本
    ///
    /// 返回值未做任何转义
    pub fn choice_text_or_placeholder(&self, number: u8) -> String {
        self.choices
            .get(&number)
            .cloned()
            .unwrap_or_else(|| format!("選択肢{}が見つかりません", number))
    }

    /// 判断用户作答是否正确
    ///
    /// 作答按与 `answer_text` 相同的规则转换为整数后比较
    pub fn check_answer(&self, user_answer: &str) -> bool {
        crate::parser::assembler::coerce_int(user_answer) == self.correct_answer
    }
}

/// 一个 TOML 文件中的一组题目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub questions: Vec<RawQuestionRecord>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionSet {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 用于日志显示的名称
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .map(|p| {
                std::path::Path::new(p)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string()
            })
            .unwrap_or_else(|| "<memory>".to_string())
    }
}

/// 字符串或整数都转换为字符串
struct StringOrIntVisitor;

impl<'de> serde::de::Visitor<'de> for StringOrIntVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string or integer")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }
}

fn deserialize_string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(StringOrIntVisitor)
}

fn deserialize_optional_string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(StringOrIntVisitor).map(Some)
}
