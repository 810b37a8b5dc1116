//! # Exam Question Parser
//!
//! 把资格考试题库中的原始题目记录解析为结构化题目：标题、正文、四个选项和正确答案
//!
//! ## 架构设计
//!
//! ### ① 解析层（Parser）
//! - `parser/` - 纯函数，不做 I/O
//! - `normalizer` - 整理换行和空白
//! - `segmenter` - 拆分标题、正文、选项（严格提取 + 宽松提取）
//! - `sanitizer` - 清理单个选项文本
//! - `year` - 从文件名提取年度
//! - `assembler` - 组合为 `ParsedQuestion`
//!
//! ### ② 数据层（Models）
//! - `models/` - 输入记录、解析结果、TOML 加载
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量题目集处理器，管理并发和输出
//! - `orchestrator/set_processor` - 单个题目集处理器，遍历题目记录
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ParseError};
pub use models::{ParsedQuestion, QuestionSet, RawQuestionRecord};
pub use orchestrator::{App, RunSummary};
pub use parser::parse_question;
