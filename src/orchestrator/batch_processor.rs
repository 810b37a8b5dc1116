//! 批量题目集处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量题目集的解析和结果输出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写入日志文件头、输出启动信息
//! 2. **批量加载**：扫描并加载所有题目集（`Vec<QuestionSet>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将题目集分批次处理，每批完成后再开始下一批
//! 5. **结果输出**：按加载顺序把解析结果写成 JSON
//! 6. **全局统计**：汇总所有题目集的处理结果，并按年度计数

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ParsedQuestion, QuestionSet};
use crate::orchestrator::set_processor::{self, QuestionStats};
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_sets_loaded, log_startup,
    print_final_stats,
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 单个批次的处理结果
#[derive(Debug, Default)]
struct BatchResult {
    /// 处理完成的题目集数量
    succeeded: usize,
    /// 本批题目级别统计
    stats: QuestionStats,
}

/// 应用主结构
pub struct App {
    config: Config,
}

/// 一次运行的汇总结果
#[derive(Debug, Default)]
pub struct RunSummary {
    /// 题目级别统计
    pub stats: QuestionStats,
    /// 处理完成的题目集数量
    pub sets_succeeded: usize,
    /// 任务异常的题目集数量
    pub sets_failed: usize,
    /// 年度 → 解析成功的题目数
    pub by_year: BTreeMap<String, usize>,
    /// 解析成功的题目（按加载顺序）
    pub parsed: Vec<ParsedQuestion>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config.question_folder, config.max_concurrent_files);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        let all_sets = self.load_sets().await?;

        if all_sets.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(RunSummary::default());
        }

        log_sets_loaded(all_sets.len(), self.config.max_concurrent_files);

        let summary = self.process_all_sets(all_sets).await?;

        self.write_output(&summary.parsed).await?;

        print_final_stats(
            summary.stats.complete,
            summary.stats.partial,
            summary.stats.failed,
            &self.config.output_json_file,
        );
        for (year, count) in &summary.by_year {
            info!("📅 {}: {} 题", year, count);
        }

        Ok(summary)
    }

    /// 加载题目集
    async fn load_sets(&self) -> Result<Vec<QuestionSet>> {
        info!("\n📁 正在扫描待处理的题目集...");
        crate::models::load_all_toml_files(&self.config.question_folder).await
    }

    /// 处理所有题目集
    async fn process_all_sets(&self, all_sets: Vec<QuestionSet>) -> Result<RunSummary> {
        let batch_size = self.config.max_concurrent_files.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_sets = all_sets.len();
        let total_batches = total_sets.div_ceil(batch_size);
        let mut summary = RunSummary::default();

        for (batch_index, batch_sets) in all_sets.chunks(batch_size).enumerate() {
            let batch_start = batch_index * batch_size;
            let batch_num = batch_index + 1;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_sets.len(),
                total_sets,
            );

            let batch = self
                .process_batch(batch_sets, batch_start, semaphore.clone(), &mut summary)
                .await?;

            log_batch_complete(batch_num, batch.succeeded, batch_sets.len(), &batch.stats);
        }

        Ok(summary)
    }

    /// 处理单个批次，结果同时累加到 `summary`
    async fn process_batch(
        &self,
        batch_sets: &[QuestionSet],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
        summary: &mut RunSummary,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, set) in batch_sets.iter().enumerate() {
            let set_index = batch_start + idx + 1;
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .context("无法获取并发许可")?;

            let set = set.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                set_processor::process_question_set(&set, set_index, &config)
            });
            batch_handles.push((set_index, handle));
        }

        let mut batch = BatchResult::default();
        for (set_index, handle) in batch_handles {
            match handle.await {
                Ok(result) => {
                    batch.stats.merge(&result.stats);
                    summary.stats.merge(&result.stats);
                    for parsed in &result.parsed {
                        *summary.by_year.entry(parsed.year.clone()).or_insert(0) += 1;
                    }
                    summary.parsed.extend(result.parsed);
                    summary.sets_succeeded += 1;
                    batch.succeeded += 1;
                }
                Err(e) => {
                    error!("[题目集 {}] 任务执行失败: {}", set_index, e);
                    summary.sets_failed += 1;
                }
            }
        }

        Ok(batch)
    }

    /// 把解析结果写成 JSON
    async fn write_output(&self, parsed: &[ParsedQuestion]) -> Result<()> {
        let path = &self.config.output_json_file;
        let json = serde_json::to_string_pretty(parsed).map_err(AppError::from)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| AppError::file_write_failed(path, e))?;
        info!("✓ 已写入 {} 道题目", parsed.len());
        Ok(())
    }
}
