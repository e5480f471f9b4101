use crate::llm::client::ModelTier;
use crate::pipeline::stage::StageSpec;

/// 质量数据分析阶段
pub fn spec() -> StageSpec {
    StageSpec {
        name: "quality_analysis",
        instruction_template: "Analyze the quality data focusing on {analysis_focus}. \
Use the quality_data_analysis tool and the other available tools to support your analysis. \
Identify key quality metrics, trends, and potential issues.\n\n\
## Quality Data Preview\n{quality_data_preview}",
        expected_output: "A structured summary of key quality metrics, observed trends, and potential quality issues.",
        model_tier: ModelTier::Efficient,
    }
}
