use crate::error::{AppError, ConfigError};
use std::str::FromStr;
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 存放题目 TOML 文件的目录
    pub question_folder: String,
    /// 解析结果输出的 JSON 文件
    pub output_json_file: String,
    /// 运行日志文件
    pub output_log_file: String,
    /// 同时处理的题目集数量
    pub max_concurrent_files: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            question_folder: "questions_toml".to_string(),
            output_json_file: "parsed_questions.json".to_string(),
            output_log_file: "output.txt".to_string(),
            max_concurrent_files: 8,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            question_folder: std::env::var("QUESTION_FOLDER").unwrap_or(default.question_folder),
            output_json_file: std::env::var("OUTPUT_JSON_FILE").unwrap_or(default.output_json_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            max_concurrent_files: parse_env("MAX_CONCURRENT_FILES", default.max_concurrent_files)
                .max(1),
            verbose_logging: parse_env("VERBOSE_LOGGING", default.verbose_logging),
        }
    }
}

/// 读取并解析环境变量，未设置或无法解析时使用默认值
fn parse_env<T: FromStr>(var_name: &str, default: T) -> T {
    let Ok(value) = std::env::var(var_name) else {
        return default;
    };
    if let Ok(parsed) = value.trim().parse() {
        return parsed;
    }

    let err = AppError::from(ConfigError::InvalidValue {
        var_name: var_name.to_string(),
        value,
    });
    warn!("{}，使用默认值", err);
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_on_invalid_value() {
        std::env::set_var("EXAM_PARSER_TEST_BAD_NUMBER", "many");
        assert_eq!(parse_env("EXAM_PARSER_TEST_BAD_NUMBER", 8usize), 8);

        std::env::set_var("EXAM_PARSER_TEST_GOOD_NUMBER", " 3 ");
        assert_eq!(parse_env("EXAM_PARSER_TEST_GOOD_NUMBER", 8usize), 3);

        assert!(!parse_env("EXAM_PARSER_TEST_UNSET_FLAG", false));
    }
}
