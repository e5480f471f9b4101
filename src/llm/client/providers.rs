//! LLM Provider接入层 - 统一封装各provider的客户端与Agent构建

use anyhow::Result;
use rig::{
    agent::{Agent, AgentBuilder, AgentBuilderSimple},
    client::CompletionClient,
    completion::{CompletionModel, Prompt, PromptError},
};

use crate::{
    config::{LLMConfig, LLMProvider},
    llm::tools::{ToolBindings, ToolKind},
};

/// 支持的provider客户端
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 按配置选择provider并构建客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let client = match config.provider {
            LLMProvider::OpenAI => Self::OpenAI(
                rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::DeepSeek => Self::DeepSeek(
                rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::OpenRouter => Self::OpenRouter(
                rig::providers::openrouter::Client::builder(&config.api_key).build(),
            ),
            LLMProvider::Anthropic => Self::Anthropic(
                rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?,
            ),
            LLMProvider::Ollama => Self::Ollama(rig::providers::ollama::Client::builder().build()),
        };
        Ok(client)
    }

    /// 创建纯推理Agent（无工具）
    pub fn create_agent(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
    ) -> ProviderAgent {
        self.create_agent_inner(model, system_prompt, config, None)
    }

    /// 创建带工具的Agent。工具集合由角色声明的能力集决定
    pub fn create_agent_with_tools(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
        bindings: &ToolBindings,
        kinds: &[ToolKind],
    ) -> ProviderAgent {
        self.create_agent_inner(model, system_prompt, config, Some((bindings, kinds)))
    }

    fn create_agent_inner(
        &self,
        model: &str,
        system_prompt: &str,
        config: &LLMConfig,
        tools: Option<(&ToolBindings, &[ToolKind])>,
    ) -> ProviderAgent {
        match self {
            ProviderClient::OpenAI(client) => {
                let builder = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature);
                ProviderAgent::OpenAI(finish_builder(builder, tools))
            }
            ProviderClient::DeepSeek(client) => {
                let builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature);
                ProviderAgent::DeepSeek(finish_builder(builder, tools))
            }
            ProviderClient::OpenRouter(client) => {
                let builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .temperature(config.temperature);
                ProviderAgent::OpenRouter(finish_builder(builder, tools))
            }
            ProviderClient::Anthropic(client) => {
                let builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature);
                ProviderAgent::Anthropic(finish_builder(builder, tools))
            }
            ProviderClient::Ollama(client) => {
                let builder = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature);
                ProviderAgent::Ollama(finish_builder(builder, tools))
            }
        }
    }
}

/// 按能力集向Agent构建器挂载工具实例
fn finish_builder<M: CompletionModel>(
    builder: AgentBuilder<M>,
    tools: Option<(&ToolBindings, &[ToolKind])>,
) -> Agent<M> {
    // `AgentBuilder::tool` returns a distinct `AgentBuilderSimple` type-state, and
    // `AgentBuilderSimple::tool` returns itself. The first tool converts the builder;
    // the rest accumulate on the `AgentBuilderSimple`.
    let Some((bindings, kinds)) = tools.filter(|(_, kinds)| !kinds.is_empty()) else {
        return builder.build();
    };

    let mut simple: AgentBuilderSimple<M> = match &kinds[0] {
        ToolKind::QualityAnalysis => builder.tool(bindings.quality_stats.clone()),
        ToolKind::ProcessMetrics => builder.tool(bindings.process_metrics.clone()),
        ToolKind::Visualization => builder.tool(bindings.visualization.clone()),
        ToolKind::OutlierDetection => builder.tool(bindings.outliers.clone()),
    };
    for kind in &kinds[1..] {
        simple = match kind {
            ToolKind::QualityAnalysis => simple.tool(bindings.quality_stats.clone()),
            ToolKind::ProcessMetrics => simple.tool(bindings.process_metrics.clone()),
            ToolKind::Visualization => simple.tool(bindings.visualization.clone()),
            ToolKind::OutlierDetection => simple.tool(bindings.outliers.clone()),
        };
    }
    simple.build()
}

/// 各provider的Agent实例
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 单轮prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }

    /// 多轮工具对话，迭代上限由调用方给定
    pub async fn multi_turn(
        &self,
        prompt: &str,
        max_iterations: usize,
    ) -> Result<String, PromptError> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::OpenRouter(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Anthropic(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
        }
    }
}
