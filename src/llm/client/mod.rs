//! LLM客户端 - 管线各阶段与模型服务之间的统一入口

use anyhow::Result;
use std::future::Future;

use crate::config::Config;
use crate::llm::tools::{ToolBindings, ToolKind};

mod providers;
mod react;

pub use react::{ReActConfig, ReActResponse};

use providers::ProviderClient;

/// 模型档位：常规分析阶段使用高能效模型，最终报告阶段使用高质量模型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Efficient,
    Powerful,
}

/// LLM客户端。持有provider客户端与配置，按模型档位派发调用
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 检查模型服务连通性，管线启动前执行
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .prompt(
                ModelTier::Efficient,
                "System: You are a helpful assistant.",
                "Hello",
            )
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Efficient => &self.config.llm.model_efficient,
            ModelTier::Powerful => &self.config.llm.model_powerful,
        }
    }

    /// 模型调用的重试机制：每次尝试受超时约束，失败后按固定间隔退避。
    /// 管线层不做阶段级重试，重试只发生在单次模型调用内
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_attempts = self.config.llm.retry_attempts.max(1);
        let delay = std::time::Duration::from_millis(self.config.llm.retry_delay_ms);
        let timeout = std::time::Duration::from_secs(self.config.llm.timeout_seconds);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match tokio::time::timeout(timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!(
                    "model call timed out after {}s",
                    timeout.as_secs()
                )),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts => {
                    eprintln!(
                        "❌ 模型调用失败 (第 {}/{} 次尝试)，{}ms后重试: {}",
                        attempt,
                        max_attempts,
                        delay.as_millis(),
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// 单轮对话（不挂载工具）
    pub async fn prompt(
        &self,
        tier: ModelTier,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let agent =
            self.client
                .create_agent(self.model_for(tier), system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }

    /// 工具驱动的多轮对话方法。工具由角色的能力集决定，
    /// 模型自行选择是否调用，未知工具名由Agent工具集拒绝
    pub async fn prompt_with_tools(
        &self,
        tier: ModelTier,
        system_prompt: &str,
        user_prompt: &str,
        bindings: &ToolBindings,
        kinds: &[ToolKind],
    ) -> Result<ReActResponse> {
        let react_config = ReActConfig {
            max_iterations: self.config.llm.max_iterations,
            verbose: self.config.verbose,
            ..ReActConfig::default()
        };

        let agent = self.client.create_agent_with_tools(
            self.model_for(tier),
            system_prompt,
            &self.config.llm,
            bindings,
            kinds,
        );

        self.retry_with_backoff(|| async {
            react::execute(&agent, user_prompt, &react_config).await
        })
        .await
    }
}
