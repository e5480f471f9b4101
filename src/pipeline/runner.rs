//! 管线运行器 - 严格顺序执行阶段并产出汇总与最终报告

use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::error::PipelineError;
use crate::memory::{ConversationState, StageRecord};

use super::context::PipelineContext;
use super::stage::Stage;

/// 阶段执行器。生产实现驱动角色对应的LLM Agent，
/// 测试使用脚本化实现替代远程调用
#[async_trait]
pub trait StageExecutor: Send + Sync {
    /// 执行单个阶段，返回该阶段的文本产出
    async fn execute(
        &self,
        stage: &Stage,
        prior_findings: Option<&str>,
        context: &PipelineContext,
    ) -> Result<String>;
}

/// 基于LLM的阶段执行器
pub struct LlmStageExecutor;

#[async_trait]
impl StageExecutor for LlmStageExecutor {
    async fn execute(
        &self,
        stage: &Stage,
        prior_findings: Option<&str>,
        context: &PipelineContext,
    ) -> Result<String> {
        let mut system_prompt = format!(
            "{}\n\n{}",
            stage.persona.system_prompt(),
            context.config.target_language.prompt_instruction()
        );

        let use_tools = stage.persona.has_tools() && !context.config.llm.disable_preset_tools;
        if use_tools {
            // 能力集来自注册表，未声明的工具对该角色不可见
            let offered = context.tool_registry.list_for(&stage.persona.tools);
            system_prompt.push_str("\n\nYou have access to the following analysis tools:\n");
            for descriptor in offered {
                system_prompt.push_str(&format!(
                    "- {}: {}\n",
                    descriptor.name, descriptor.description
                ));
            }
        }

        let mut user_prompt = stage.instruction.clone();
        if let Some(prior) = prior_findings {
            user_prompt.push_str("\n\n");
            user_prompt.push_str(prior);
        }
        if !stage.expected_output.is_empty() {
            user_prompt.push_str("\n\n## Expected output\n");
            user_prompt.push_str(&stage.expected_output);
        }

        // 工具调用由模型在多轮对话中自行选择
        if use_tools {
            let bindings = context.tool_bindings();
            let response = context
                .llm_client
                .prompt_with_tools(
                    stage.model_tier,
                    &system_prompt,
                    &user_prompt,
                    &bindings,
                    &stage.persona.tools,
                )
                .await?;
            if response.stopped_by_max_depth {
                println!(
                    "   ⚠️ 阶段 {} 在迭代上限({})处被截断，已完成 {} 次工具调用",
                    stage.name,
                    response.iterations_used,
                    response.tool_calls_history.len()
                );
            }
            Ok(response.content)
        } else {
            context
                .llm_client
                .prompt(stage.model_tier, &system_prompt, &user_prompt)
                .await
        }
    }
}

/// 管线运行结果：运行器自身的汇总信息与最后阶段产出的完整报告
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: String,
    pub report: String,
}

/// 管线运行器。阶段严格按声明顺序执行，任一阶段失败即中止，
/// 不产出部分报告，也不做阶段级重试
pub struct PipelineRunner<E = LlmStageExecutor> {
    executor: E,
}

impl PipelineRunner<LlmStageExecutor> {
    pub fn new() -> Self {
        Self {
            executor: LlmStageExecutor,
        }
    }
}

impl Default for PipelineRunner<LlmStageExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: StageExecutor> PipelineRunner<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// 顺序执行全部阶段
    pub async fn run(
        &self,
        context: &PipelineContext,
        stages: &[Stage],
    ) -> Result<PipelineOutcome, PipelineError> {
        if stages.is_empty() {
            return Err(PipelineError::Input("pipeline has no stages".to_string()));
        }

        println!("🚀 开始执行分析管线，共 {} 个阶段...", stages.len());
        let run_started = Instant::now();

        for (idx, stage) in stages.iter().enumerate() {
            println!(
                "🤖 [{}/{}] 执行阶段 {} ({})...",
                idx + 1,
                stages.len(),
                stage.name,
                stage.persona.role
            );

            // 前序阶段产出以文本形式传递，不做结构化回传
            let prior_findings = context.render_prior_findings().await;
            let stage_started = Instant::now();

            let output = self
                .executor
                .execute(stage, prior_findings.as_deref(), context)
                .await
                .map_err(|source| PipelineError::Orchestration {
                    stage: stage.name.clone(),
                    source,
                })?;

            let duration = stage_started.elapsed();
            context
                .append_stage_record(StageRecord {
                    stage: stage.name.clone(),
                    persona_role: stage.persona.role.clone(),
                    output,
                    completed_at: Utc::now(),
                    duration_ms: duration.as_millis() as u64,
                })
                .await;

            println!("✓ 阶段 {} 完成 ({:.2}s)", stage.name, duration.as_secs_f64());
        }

        let state = context.state.read().await;
        let report = state.last_output().unwrap_or_default().to_string();
        let summary = Self::build_summary(&state, run_started.elapsed().as_secs_f64());

        Ok(PipelineOutcome { summary, report })
    }

    /// 运行器自身的汇总信息
    fn build_summary(state: &ConversationState, total_seconds: f64) -> String {
        let mut summary = format!(
            "Analysis pipeline completed: {} stages in {:.2}s\n",
            state.transcript().len(),
            total_seconds
        );
        for record in state.transcript() {
            summary.push_str(&format!(
                "- {} ({}): {} chars, {:.2}s\n",
                record.stage,
                record.persona_role,
                record.output.chars().count(),
                record.duration_ms as f64 / 1000.0
            ));
        }
        summary
    }
}
