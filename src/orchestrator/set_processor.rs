//! 单个题目集处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责解析一个 TOML 文件中的所有题目记录。
//!
//! ## 核心功能
//!
//! 1. **遍历题目**：逐条调用 `parser::parse_question`
//! 2. **质量统计**：区分选项齐全、选项不足、解析失败
//! 3. **统计输出**：记录每个题目集的统计信息

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ParsedQuestion, QuestionSet};
use crate::parser;
use crate::utils::logging::truncate_text;
use std::fmt;
use tracing::{debug, info, warn};

/// 题目处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuestionStats {
    /// 四个选项齐全
    pub complete: usize,
    /// 选项不足四个
    pub partial: usize,
    /// 缺少必需字段
    pub failed: usize,
}

impl QuestionStats {
    pub fn total(&self) -> usize {
        self.complete + self.partial + self.failed
    }

    pub fn merge(&mut self, other: &QuestionStats) {
        self.complete += other.complete;
        self.partial += other.partial;
        self.failed += other.failed;
    }
}

impl fmt::Display for QuestionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "完整 {}, 选项不足 {}, 失败 {}",
            self.complete, self.partial, self.failed
        )
    }
}

/// 单个题目集的处理结果
#[derive(Debug, Default)]
pub struct SetResult {
    pub parsed: Vec<ParsedQuestion>,
    pub stats: QuestionStats,
}

/// 处理单个题目集
///
/// # 参数
/// - `set`: 题目集
/// - `set_index`: 题目集索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回解析成功的题目和统计信息
pub fn process_question_set(set: &QuestionSet, set_index: usize, config: &Config) -> SetResult {
    log_set_start(set_index, &set.display_name(), set.questions.len());

    let mut result = SetResult::default();

    for (index, record) in set.questions.iter().enumerate() {
        let question_index = index + 1;

        match parser::parse_question(record) {
            Ok(parsed) => {
                if parsed.is_complete() {
                    result.stats.complete += 1;
                } else {
                    warn!(
                        "[题目集 {}] 题目 {} (id={}) 缺少选项: {:?}",
                        set_index,
                        question_index,
                        parsed.id,
                        parsed.missing_choices()
                    );
                    result.stats.partial += 1;
                }

                if config.verbose_logging {
                    log_parsed(set_index, question_index, &parsed);
                }
                result.parsed.push(parsed);
            }
            Err(e) => {
                let err = AppError::from(e);
                warn!("[题目集 {}] 题目 {} {}", set_index, question_index, err);
                result.stats.failed += 1;
            }
        }
    }

    log_set_complete(set_index, &result.stats);

    result
}

// ========== 日志辅助函数 ==========

fn log_set_start(set_index: usize, name: &str, question_count: usize) {
    info!("[题目集 {}] 开始处理", set_index);
    info!("[题目集 {}] 名称: {}", set_index, name);
    info!("[题目集 {}] 题目总数: {}", set_index, question_count);
}

fn log_parsed(set_index: usize, question_index: usize, parsed: &ParsedQuestion) {
    debug!(
        "[题目集 {}] 题目 {}: {} {} | 年度: {} | 正解: {}",
        set_index,
        question_index,
        parsed.title,
        truncate_text(&parsed.body, 40),
        parsed.year,
        parsed.correct_answer
    );
    for (number, text) in &parsed.choices {
        debug!("[题目集 {}]   {}. {}", set_index, number, truncate_text(text, 40));
    }
}

fn log_set_complete(set_index: usize, stats: &QuestionStats) {
    info!(
        "[题目集 {}] 题目统计: {}, 总计 {}",
        set_index,
        stats,
        stats.total()
    );
    info!("[题目集 {}] ✅ 题目集处理完成", set_index);
}
