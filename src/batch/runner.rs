//! # 批量执行器
//!
//! 并行计算每个结构的回转半径。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果按输入顺序返回
//! - 进度条显示
//! - 成功 / 失败统计
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs`, `commands/rg.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SizerError};
use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 批量处理结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
}

impl BatchSummary {
    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示按 CPU 核数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表，返回与输入一一对应的结果
    pub fn run<T, R, F>(
        &self,
        items: &[T],
        message: &str,
        processor: F,
    ) -> Result<(Vec<Result<R>>, BatchSummary)>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, message);

        let success_count = AtomicUsize::new(0);
        let failed_count = AtomicUsize::new(0);

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SizerError::Other(format!("failed to start worker pool: {}", e)))?;

        // par_iter + collect 保持输入顺序，每个任务写入自己的位置
        let results: Vec<Result<R>> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    if result.is_ok() {
                        success_count.fetch_add(1, Ordering::Relaxed);
                    } else {
                        failed_count.fetch_add(1, Ordering::Relaxed);
                    }
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let summary = BatchSummary {
            success: success_count.into_inner(),
            failed: failed_count.into_inner(),
        };

        Ok((results, summary))
    }
}
