//! 离群值检测工具

use std::sync::Arc;

use rig::tool::Tool;
use serde::{Deserialize, Serialize};

use super::{ToolKind, ToolRuntimeError, select_dataset};
use crate::stats;
use crate::types::Dataset;

/// 1.5×IQR离群值检测工具，可作用于质量或工艺数据集
#[derive(Debug, Clone)]
pub struct AgentToolOutliers {
    quality: Arc<Dataset>,
    process: Arc<Dataset>,
}

/// 离群值检测参数
#[derive(Debug, Deserialize)]
pub struct OutlierArgs {
    /// "quality" 或 "process"，默认 "quality"
    pub dataset: Option<String>,
}

/// 检测结果
#[derive(Debug, Serialize)]
pub struct OutlierResult {
    pub summary: String,
}

impl AgentToolOutliers {
    pub fn new(quality: Arc<Dataset>, process: Arc<Dataset>) -> Self {
        Self { quality, process }
    }
}

impl Tool for AgentToolOutliers {
    const NAME: &'static str = "outlier_detection";

    type Error = ToolRuntimeError;
    type Args = OutlierArgs;
    type Output = OutlierResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: ToolKind::OutlierDetection.description().to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "dataset": {
                        "type": "string",
                        "enum": ["quality", "process"],
                        "description": "Which dataset to inspect (default: quality)."
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...{}@{:?}", Self::NAME, args);

        let dataset = match select_dataset(args.dataset.as_deref(), &self.quality, &self.process) {
            Ok(dataset) => dataset,
            Err(message) => {
                return Ok(OutlierResult {
                    summary: format!("Outlier Detection (skipped): {}", message),
                });
            }
        };

        let summary = match stats::detect_outliers(dataset) {
            Ok(table) => format!(
                "Outliers detected in '{}' data (1.5×IQR rule):\n{}",
                dataset.name(),
                table
            ),
            Err(e) => format!("Outlier Detection (incomplete): {}", e),
        };

        Ok(OutlierResult { summary })
    }
}
