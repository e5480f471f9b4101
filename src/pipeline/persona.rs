//! 角色定义 - 管线阶段绑定的推理专长

use crate::error::{PipelineError, Result};
use crate::llm::tools::ToolKind;

/// 角色：职责、目标、背景与声明的工具能力集。构造后不可变
#[derive(Debug, Clone)]
pub struct Persona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// 能力集。角色自身不调用工具，工具由模型在阶段执行中按需选择
    pub tools: Vec<ToolKind>,
}

impl Persona {
    pub fn new(role: &str, goal: &str, backstory: &str, tools: Vec<ToolKind>) -> Result<Self> {
        if role.trim().is_empty() {
            return Err(PipelineError::Input("persona role is empty".to_string()));
        }
        if goal.trim().is_empty() {
            return Err(PipelineError::Input(format!(
                "persona '{}' has an empty goal",
                role
            )));
        }

        Ok(Self {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
            tools,
        })
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// 角色的系统提示词
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}.\n\n{backstory}\n\nYour personal goal is: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal
        )
    }
}

/// 质量分析师
pub fn quality_analyst() -> Result<Persona> {
    Persona::new(
        "Quality Analyst",
        "Analyze quality data to identify trends, issues, and improvement opportunities",
        "You are an experienced quality analyst with expertise in statistical process control and quality management systems.",
        vec![
            ToolKind::QualityAnalysis,
            ToolKind::Visualization,
            ToolKind::OutlierDetection,
        ],
    )
}

/// 工艺分析师
pub fn process_analyst() -> Result<Persona> {
    Persona::new(
        "Process Analyst",
        "Analyze process data to optimize production efficiency and identify bottlenecks",
        "You have extensive experience in process engineering and lean manufacturing principles.",
        vec![ToolKind::ProcessMetrics, ToolKind::Visualization],
    )
}

/// 数据科学家
pub fn data_scientist() -> Result<Persona> {
    Persona::new(
        "Data Scientist",
        "Perform advanced analytics on combined quality and process data",
        "You're an expert in machine learning and statistical analysis with a focus on manufacturing applications.",
        vec![
            ToolKind::QualityAnalysis,
            ToolKind::ProcessMetrics,
            ToolKind::Visualization,
            ToolKind::OutlierDetection,
        ],
    )
}

/// 报告撰写人，无工具
pub fn report_writer() -> Result<Persona> {
    Persona::new(
        "Report Writer",
        "Compile all findings and recommendations into a comprehensive, actionable report",
        "You're a skilled technical writer with experience in creating clear, concise reports for manufacturing environments.",
        vec![],
    )
}

// Include tests
#[cfg(test)]
mod tests;
