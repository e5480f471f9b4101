//! 运行级会话状态 - 单次分析运行内的阶段记录与产物存储
//!
//! 单写者（管线执行线程）追加，渲染层读取；运行结束后整体丢弃。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 单个阶段的执行记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    /// 阶段名称
    pub stage: String,
    /// 执行该阶段的角色
    pub persona_role: String,
    /// 阶段产出（文本）
    pub output: String,
    /// 完成时间
    pub completed_at: DateTime<Utc>,
    /// 执行耗时（毫秒）
    pub duration_ms: u64,
}

/// 会话状态：有序的阶段记录与二进制产物（热力图等）
#[derive(Debug, Default)]
pub struct ConversationState {
    transcript: Vec<StageRecord>,
    artifacts: HashMap<String, Vec<u8>>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个阶段记录
    pub fn append(&mut self, record: StageRecord) {
        self.transcript.push(record);
    }

    /// 有序的阶段记录
    pub fn transcript(&self) -> &[StageRecord] {
        &self.transcript
    }

    /// 最后一个阶段的产出
    pub fn last_output(&self) -> Option<&str> {
        self.transcript.last().map(|r| r.output.as_str())
    }

    /// 将已有阶段产出渲染为后续阶段的参考材料段落
    pub fn render_prior_findings(&self) -> Option<String> {
        if self.transcript.is_empty() {
            return None;
        }

        let mut content = String::from("## Findings from earlier analysis stages\n");
        for record in &self.transcript {
            content.push_str(&format!(
                "\n### {} ({})\n{}\n",
                record.stage, record.persona_role, record.output
            ));
        }
        Some(content)
    }

    /// 存储二进制产物，同名覆盖
    pub fn store_artifact(&mut self, name: &str, bytes: Vec<u8>) {
        self.artifacts.insert(name.to_string(), bytes);
    }

    pub fn artifact(&self, name: &str) -> Option<&[u8]> {
        self.artifacts.get(name).map(|b| b.as_slice())
    }

    pub fn artifacts(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.artifacts.iter()
    }
}

// Include tests
#[cfg(test)]
mod tests;
