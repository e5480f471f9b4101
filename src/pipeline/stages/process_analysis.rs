use crate::llm::client::ModelTier;
use crate::pipeline::stage::StageSpec;

/// 工艺数据分析阶段
pub fn spec() -> StageSpec {
    StageSpec {
        name: "process_analysis",
        instruction_template: "Analyze the process data focusing on {analysis_focus}. \
Use the process_data_analysis tool and the other available tools to support your analysis. \
Identify efficiency metrics, bottlenecks, and areas for improvement.\n\n\
## Process Data Preview\n{process_data_preview}",
        expected_output: "A structured summary of efficiency metrics, bottleneck candidates, and improvement areas.",
        model_tier: ModelTier::Efficient,
    }
}
