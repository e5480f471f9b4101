//! 数据可视化工具

use std::sync::Arc;

use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{ToolKind, ToolRuntimeError, select_dataset};
use crate::memory::ConversationState;
use crate::stats;
use crate::stats::heatmap::render_heatmap;
use crate::types::Dataset;

/// 相关性热力图工具。渲染的PNG存入会话状态产物区，由输出层落盘
#[derive(Clone)]
pub struct AgentToolVisualization {
    quality: Arc<Dataset>,
    process: Arc<Dataset>,
    state: Arc<RwLock<ConversationState>>,
}

/// 可视化参数
#[derive(Debug, Deserialize)]
pub struct VisualizationArgs {
    /// "quality" 或 "process"，默认 "quality"
    pub dataset: Option<String>,
}

/// 可视化结果
#[derive(Debug, Serialize)]
pub struct VisualizationResult {
    pub summary: String,
}

impl AgentToolVisualization {
    pub fn new(
        quality: Arc<Dataset>,
        process: Arc<Dataset>,
        state: Arc<RwLock<ConversationState>>,
    ) -> Self {
        Self {
            quality,
            process,
            state,
        }
    }
}

impl Tool for AgentToolVisualization {
    const NAME: &'static str = "data_visualization";

    type Error = ToolRuntimeError;
    type Args = VisualizationArgs;
    type Output = VisualizationResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: ToolKind::Visualization.description().to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "dataset": {
                        "type": "string",
                        "enum": ["quality", "process"],
                        "description": "Which dataset to visualize (default: quality)."
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
                return Ok(VisualizationResult {
                    summary: format!("Data Visualization (skipped): {}", message),
                });
            }
        };

        let matrix = match stats::correlation_matrix(dataset) {
            Ok(matrix) => matrix,
            Err(e) => {
                return Ok(VisualizationResult {
                    summary: format!("Data Visualization (incomplete): {}", e),
                });
            }
        };

        let png = render_heatmap(&matrix)
            .map_err(|e| ToolRuntimeError(format!("heatmap rendering failed: {}", e)))?;

        let artifact_name = format!("{}_correlation_heatmap.png", dataset.name());
        self.state
            .write()
            .await
            .store_artifact(&artifact_name, png);

        Ok(VisualizationResult {
            summary: format!(
                "Correlation heatmap for '{}' data created successfully and stored as '{}'. (Image data not shown in text output)",
                dataset.name(),
                artifact_name
            ),
        })
    }
}
