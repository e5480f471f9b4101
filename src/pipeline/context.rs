use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    llm::{
        client::LLMClient,
        tools::{ToolBindings, ToolRegistry},
    },
    memory::{ConversationState, StageRecord},
    types::Dataset,
};

/// 管线上下文：单次运行的LLM客户端、配置、数据集与会话状态
#[derive(Clone)]
pub struct PipelineContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
    /// 质量数据集
    pub quality_data: Arc<Dataset>,
    /// 工艺数据集
    pub process_data: Arc<Dataset>,
    /// 会话状态（阶段记录与产物）
    pub state: Arc<RwLock<ConversationState>>,
    /// 固定的工具注册表
    pub tool_registry: Arc<ToolRegistry>,
}

impl PipelineContext {
    /// 创建新的管线上下文
    pub fn new(config: Config, quality_data: Dataset, process_data: Dataset) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let state = Arc::new(RwLock::new(ConversationState::new()));
        let tool_registry = Arc::new(ToolRegistry::standard());

        Ok(Self {
            llm_client,
            config,
            quality_data: Arc::new(quality_data),
            process_data: Arc::new(process_data),
            state,
            tool_registry,
        })
    }

    /// 绑定到本次运行数据集的工具实例集合
    pub fn tool_bindings(&self) -> ToolBindings {
        ToolBindings::new(
            self.quality_data.clone(),
            self.process_data.clone(),
            self.state.clone(),
        )
    }

    /// 追加阶段记录
    pub async fn append_stage_record(&self, record: StageRecord) {
        self.state.write().await.append(record);
    }

    /// 已有阶段产出的参考材料段落
    pub async fn render_prior_findings(&self) -> Option<String> {
        self.state.read().await.render_prior_findings()
    }

    /// 产物快照，供输出层落盘
    pub async fn artifacts_snapshot(&self) -> Vec<(String, Vec<u8>)> {
        self.state
            .read()
            .await
            .artifacts()
            .map(|(name, bytes)| (name.clone(), bytes.clone()))
            .collect()
    }
}
