//! 工艺数据分析工具

use std::sync::Arc;

use rig::tool::Tool;
use serde::{Deserialize, Serialize};

use super::{ToolKind, ToolRuntimeError};
use crate::stats;
use crate::types::Dataset;

/// 工艺效率与瓶颈分析工具
#[derive(Debug, Clone)]
pub struct AgentToolProcessMetrics {
    dataset: Arc<Dataset>,
}

/// 无参数
#[derive(Debug, Deserialize)]
pub struct ProcessMetricsArgs {}

/// 分析结果
#[derive(Debug, Serialize)]
pub struct ProcessMetricsResult {
    pub summary: String,
}

impl AgentToolProcessMetrics {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

impl Tool for AgentToolProcessMetrics {
    const NAME: &'static str = "process_data_analysis";

    type Error = ToolRuntimeError;
    type Args = ProcessMetricsArgs;
    type Output = ProcessMetricsResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: ToolKind::ProcessMetrics.description().to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...{}", Self::NAME);

        let summary = match stats::summarize_process(&self.dataset) {
            Ok(text) => text,
            Err(e) => format!("Process Data Analysis (incomplete): {}", e),
        };

        Ok(ProcessMetricsResult { summary })
    }
}
