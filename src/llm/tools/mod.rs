//! 统计工具集 - 暴露给角色的可调用能力
//!
//! 工具在运行开始时绑定到本次运行的数据集与会话状态；注册表描述
//! 固定的工具清单，角色通过枚举的工具种类声明自身能力集。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::memory::ConversationState;
use crate::types::Dataset;

pub mod outliers;
pub mod process_metrics;
pub mod quality_stats;
pub mod visualization;

pub use outliers::AgentToolOutliers;
pub use process_metrics::AgentToolProcessMetrics;
pub use quality_stats::AgentToolQualityStats;
pub use visualization::AgentToolVisualization;

/// 工具种类，角色能力集的枚举单元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    QualityAnalysis,
    ProcessMetrics,
    Visualization,
    OutlierDetection,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::QualityAnalysis => "quality_data_analysis",
            ToolKind::ProcessMetrics => "process_data_analysis",
            ToolKind::Visualization => "data_visualization",
            ToolKind::OutlierDetection => "outlier_detection",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::QualityAnalysis => {
                "Analyzes quality data to identify trends, issues, and improvement opportunities."
            }
            ToolKind::ProcessMetrics => {
                "Analyzes process data to optimize production efficiency and identify bottlenecks."
            }
            ToolKind::Visualization => "Creates a correlation heatmap of the data for better insights.",
            ToolKind::OutlierDetection => "Identifies outliers in the dataset.",
        }
    }
}

/// 工具描述符：名称 + 描述 + 种类
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
}

/// 固定的工具注册表。构造后不可变，名称查找为O(1)
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// 标准工具清单
    pub fn standard() -> Self {
        Self::from_kinds(&[
            ToolKind::QualityAnalysis,
            ToolKind::ProcessMetrics,
            ToolKind::Visualization,
            ToolKind::OutlierDetection,
        ])
    }

    pub(crate) fn from_kinds(kinds: &[ToolKind]) -> Self {
        let mut descriptors = Vec::with_capacity(kinds.len());
        let mut index = HashMap::with_capacity(kinds.len());

        for kind in kinds {
            let descriptor = ToolDescriptor {
                name: kind.name(),
                description: kind.description(),
                kind: *kind,
            };
            // 工具名称不允许重复
            assert!(
                index.insert(descriptor.name, descriptors.len()).is_none(),
                "duplicate tool name: {}",
                descriptor.name
            );
            descriptors.push(descriptor);
        }

        Self { descriptors, index }
    }

    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|idx| &self.descriptors[*idx])
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    /// 按声明顺序返回某个能力集对应的工具描述符
    pub fn list_for(&self, kinds: &[ToolKind]) -> Vec<&ToolDescriptor> {
        kinds
            .iter()
            .filter_map(|kind| self.descriptor(kind.name()))
            .collect()
    }
}

/// 绑定到本次运行数据集的工具实例集合
#[derive(Clone)]
pub struct ToolBindings {
    pub quality_stats: AgentToolQualityStats,
    pub process_metrics: AgentToolProcessMetrics,
    pub visualization: AgentToolVisualization,
    pub outliers: AgentToolOutliers,
}

impl ToolBindings {
    pub fn new(
        quality_data: Arc<Dataset>,
        process_data: Arc<Dataset>,
        state: Arc<RwLock<ConversationState>>,
    ) -> Self {
        Self {
            quality_stats: AgentToolQualityStats::new(quality_data.clone()),
            process_metrics: AgentToolProcessMetrics::new(process_data.clone()),
            visualization: AgentToolVisualization::new(quality_data.clone(), process_data.clone(), state),
            outliers: AgentToolOutliers::new(quality_data, process_data),
        }
    }
}

/// 工具运行时错误（锁中毒等基础设施错误，统计失败在工具内部降级为标注文本）
#[derive(Debug)]
pub struct ToolRuntimeError(pub String);

impl std::fmt::Display for ToolRuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tool runtime error: {}", self.0)
    }
}

impl std::error::Error for ToolRuntimeError {}

/// 数据集选择参数的解析，未知名称由调用方降级为标注文本
pub(crate) fn select_dataset<'a>(
    selector: Option<&str>,
    quality: &'a Arc<Dataset>,
    process: &'a Arc<Dataset>,
) -> Result<&'a Arc<Dataset>, String> {
    match selector.unwrap_or("quality") {
        "quality" => Ok(quality),
        "process" => Ok(process),
        other => Err(format!(
            "unknown dataset '{}', expected 'quality' or 'process'",
            other
        )),
    }
}

// Include tests
#[cfg(test)]
mod tests;
