//! 管线错误分类

use thiserror::Error;

/// 分析管线的错误类型
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 配置错误（缺少API密钥等），在任何阶段执行前被拦截
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 输入错误（缺失文件、空数据集、模板占位符缺失）
    #[error("input error: {0}")]
    Input(String),

    /// 统计工具执行错误
    #[error("tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    /// 编排错误，携带失败阶段的名称，后续阶段不再执行
    #[error("stage '{stage}' failed: {source}")]
    Orchestration {
        stage: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// 失败阶段的名称（仅编排错误有）
    pub fn failed_stage(&self) -> Option<&str> {
        match self {
            PipelineError::Orchestration { stage, .. } => Some(stage.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
