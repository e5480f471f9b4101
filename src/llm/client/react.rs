//! 工具驱动阶段的ReAct多轮对话执行
//!
//! 模型在多轮对话中自行选择统计工具。达到迭代上限时从对话历史中
//! 打捞已有结论作为部分结果，而不是丢弃整个阶段。

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};

use super::providers::ProviderAgent;

/// ReAct执行配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大迭代轮数
    pub max_iterations: usize,
    /// 达到最大迭代轮数时返回部分结果而非报错
    pub return_partial_on_max_depth: bool,
    /// 是否输出详细日志
    pub verbose: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            return_partial_on_max_depth: true,
            verbose: false,
        }
    }
}

/// ReAct执行响应
#[derive(Debug, Clone)]
pub struct ReActResponse {
    /// 最终内容
    pub content: String,
    /// 实际使用的迭代轮数上限
    pub iterations_used: usize,
    /// 是否因达到最大迭代轮数而被中断
    pub stopped_by_max_depth: bool,
    /// 工具调用记录
    pub tool_calls_history: Vec<String>,
}

/// 驱动一个阶段的ReAct循环
pub async fn execute(
    agent: &ProviderAgent,
    user_prompt: &str,
    config: &ReActConfig,
) -> Result<ReActResponse> {
    if config.verbose {
        println!("   ♻️ 工具对话模式，迭代上限: {}", config.max_iterations);
    }

    match agent.multi_turn(user_prompt, config.max_iterations).await {
        Ok(content) => Ok(ReActResponse {
            content,
            iterations_used: config.max_iterations,
            stopped_by_max_depth: false,
            tool_calls_history: Vec::new(),
        }),
        Err(PromptError::MaxDepthError {
            max_depth,
            chat_history,
            ..
        }) => {
            if config.verbose {
                println!("   ⚠️ 工具对话达到迭代上限 ({})", max_depth);
            }
            if !config.return_partial_on_max_depth {
                anyhow::bail!("stage did not converge within {} tool iterations", max_depth);
            }

            let salvage = salvage_history(&chat_history);
            let partial = salvage.last_text.unwrap_or_else(|| {
                "The analysis was interrupted before a conclusion was reached.".to_string()
            });

            Ok(ReActResponse {
                content: format!(
                    "{}\n\n[Note: analysis interrupted after reaching the tool iteration limit ({})]",
                    partial, max_depth
                ),
                iterations_used: max_depth,
                stopped_by_max_depth: true,
                tool_calls_history: salvage.tool_calls,
            })
        }
        Err(e) => Err(anyhow::anyhow!("stage agent execution failed: {}", e)),
    }
}

/// 从中断的对话历史里打捞出的内容
struct Salvage {
    last_text: Option<String>,
    tool_calls: Vec<String>,
}

/// 单次遍历：记录最后一条非空助手文本与全部工具调用
fn salvage_history(history: &[Message]) -> Salvage {
    let mut salvage = Salvage {
        last_text: None,
        tool_calls: Vec::new(),
    };

    for message in history {
        let Message::Assistant { content, .. } = message else {
            continue;
        };
        for part in content.iter() {
            match part {
                AssistantContent::Text(text) if !text.text.trim().is_empty() => {
                    salvage.last_text = Some(text.text.clone());
                }
                AssistantContent::ToolCall(call) => {
                    salvage.tool_calls.push(format!(
                        "{}({})",
                        call.function.name, call.function.arguments
                    ));
                }
                _ => {}
            }
        }
    }

    salvage
}
