//! 管线阶段 - 指令模板与角色的绑定
//!
//! 阶段顺序在管线定义时固定，属于设计不变量：后续阶段的指令文本
//! 假定特定的前序阶段已经执行。

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PipelineError, Result};
use crate::llm::client::ModelTier;

use super::persona::Persona;

/// 阶段声明：指令模板、期望产出提示与模型档位
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub name: &'static str,
    pub instruction_template: &'static str,
    pub expected_output: &'static str,
    pub model_tier: ModelTier,
}

/// 已解析的管线阶段
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: String,
    /// 已完成占位符替换的指令文本
    pub instruction: String,
    pub persona: Arc<Persona>,
    pub expected_output: String,
    pub model_tier: ModelTier,
}

/// 构建阶段：解析指令模板中的占位符。
/// 模板引用的占位符在替换表中缺失时构建失败，任何阶段都不会执行
pub fn build_stage(
    spec: &StageSpec,
    persona: Arc<Persona>,
    substitutions: &HashMap<&str, String>,
) -> Result<Stage> {
    let instruction = resolve_template(spec.instruction_template, substitutions)?;

    Ok(Stage {
        name: spec.name.to_string(),
        instruction,
        persona,
        expected_output: spec.expected_output.to_string(),
        model_tier: spec.model_tier,
    })
}

/// 解析 `{placeholder}` 占位符。占位符名称仅允许字母数字与下划线，
/// 其余花括号内容按字面保留。相同输入下解析结果恒定
pub fn resolve_template(
    template: &str,
    substitutions: &HashMap<&str, String>,
) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end)
                if end > 0
                    && after[..end]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let name = &after[..end];
                match substitutions.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(PipelineError::Input(format!(
                            "template placeholder '{{{}}}' has no substitution",
                            name
                        )));
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

// Include tests
#[cfg(test)]
mod tests;
