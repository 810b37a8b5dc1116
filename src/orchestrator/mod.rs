//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量题目集处理器
//! - 批量加载题目集（Vec<QuestionSet>）
//! - 控制并发数量（Semaphore）
//! - 输出 JSON 结果和全局统计信息
//!
//! ### `set_processor` - 单个题目集处理器
//! - 遍历单个题目集的所有记录
//! - 调用解析层并统计解析质量
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<QuestionSet>)
//!     ↓
//! set_processor (处理 Vec<RawQuestionRecord>)
//!     ↓
//! parser (处理单条记录，纯函数)
//! ```

pub mod batch_processor;
pub mod set_processor;

pub use batch_processor::{App, RunSummary};
pub use set_processor::{process_question_set, QuestionStats, SetResult};
