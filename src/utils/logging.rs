//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use crate::orchestrator::QuestionStats;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目解析日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `folder`: 题目目录
/// - `max_concurrent`: 最大并发数
pub fn log_startup(folder: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目解析模式");
    info!("📁 题目目录: {}", folder);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录题目集加载信息
pub fn log_sets_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的题目集", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始题目集编号
/// - `end`: 结束题目集编号
/// - `total`: 题目集总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批题目集: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `sets_succeeded`: 本批处理完成的题目集数量
/// - `sets_total`: 本批题目集数量
/// - `stats`: 本批题目统计
pub fn log_batch_complete(
    batch_num: usize,
    sets_succeeded: usize,
    sets_total: usize,
    stats: &QuestionStats,
) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 题目集 {}/{} | {}",
        batch_num, sets_succeeded, sets_total, stats
    );
    if stats.partial + stats.failed > 0 {
        info!(
            "⚠️ 本批有 {} 道题需要人工检查",
            stats.partial + stats.failed
        );
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `complete`: 选项齐全的题目数
/// - `partial`: 选项不足的题目数
/// - `failed`: 解析失败的题目数
/// - `output_path`: 输出文件路径
pub fn print_final_stats(complete: usize, partial: usize, failed: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完整: {}/{}", complete, complete + partial + failed);
    info!("⚠️ 选项不足: {}", partial);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n解析结果已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
