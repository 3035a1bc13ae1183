//! 分发指标收集模块
//!
//! 注册、解析、调用三类事件的 `metrics` 计数器，以及内存中的统计聚合器。

use std::collections::BTreeMap;

use contracts::{HandlerStatus, ResolutionKind};
use metrics::{counter, histogram};

/// 记录一次注册
///
/// `outcome` 取值：installed / replaced / unchanged / structural / rejected
pub fn record_registration(outcome: &'static str) {
    counter!("path_dispatch_registrations_total", "outcome" => outcome).increment(1);
}

/// 记录一次解析
///
/// 每次查询调用一次。`matched_depth` 为匹配上的查询段数。
///
/// # Example
///
/// ```ignore
/// let resolution = tree.resolve_match(path);
/// record_resolution(resolution.kind, resolution.matched);
/// ```
pub fn record_resolution(kind: ResolutionKind, matched_depth: usize) {
    counter!("path_dispatch_resolutions_total", "kind" => kind.as_str()).increment(1);
    histogram!("path_dispatch_matched_depth").record(matched_depth as f64);
}

/// 记录一次处理器调用
pub fn record_invocation(handler: &str, status: HandlerStatus) {
    let result = if status == 0 { "ok" } else { "failure" };
    counter!(
        "path_dispatch_invocations_total",
        "handler" => handler.to_string(),
        "result" => result
    )
    .increment(1);
}

/// 分发统计聚合器
///
/// 在内存中聚合解析结果，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct DispatchStatsAggregator {
    /// 查询总数
    pub total_queries: u64,

    /// 精确命中数
    pub exact_hits: u64,

    /// 祖先回退命中数
    pub ancestor_hits: u64,

    /// 未命中数
    pub misses: u64,

    /// 匹配深度统计
    pub depth_stats: RunningStats,

    /// 各处理器命中次数
    pub handler_hits: BTreeMap<String, u64>,
}

impl DispatchStatsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, kind: ResolutionKind, handler: Option<&str>, matched_depth: usize) {
        self.total_queries += 1;

        match kind {
            ResolutionKind::Exact => self.exact_hits += 1,
            ResolutionKind::Ancestor => self.ancestor_hits += 1,
            ResolutionKind::Miss => self.misses += 1,
        }

        if let Some(name) = handler {
            *self.handler_hits.entry(name.to_string()).or_insert(0) += 1;
        }

        self.depth_stats.push(matched_depth as f64);
    }

    /// 生成摘要报告
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            total_queries: self.total_queries,
            exact_hits: self.exact_hits,
            ancestor_hits: self.ancestor_hits,
            misses: self.misses,
            miss_rate: if self.total_queries > 0 {
                self.misses as f64 / self.total_queries as f64 * 100.0
            } else {
                0.0
            },
            matched_depth: StatsSummary::from(&self.depth_stats),
            handler_hits: self.handler_hits.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    pub total_queries: u64,
    pub exact_hits: u64,
    pub ancestor_hits: u64,
    pub misses: u64,
    pub miss_rate: f64,
    pub matched_depth: StatsSummary,
    pub handler_hits: BTreeMap<String, u64>,
}

impl std::fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Total queries: {}", self.total_queries)?;
        writeln!(f, "Exact hits: {}", self.exact_hits)?;
        writeln!(f, "Ancestor fallbacks: {}", self.ancestor_hits)?;
        writeln!(f, "Misses: {} ({:.2}%)", self.misses, self.miss_rate)?;
        writeln!(f, "Matched depth: {}", self.matched_depth)?;

        if !self.handler_hits.is_empty() {
            writeln!(f, "Handler hits:")?;
            for (handler, count) in &self.handler_hits {
                writeln!(f, "  {}: {}", handler, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.0}, max={:.0}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
