use crate::llm::client::ModelTier;
use crate::pipeline::stage::StageSpec;

/// 质量×工艺联合分析阶段
pub fn spec() -> StageSpec {
    StageSpec {
        name: "combined_analysis",
        instruction_template: "Perform advanced analytics on both quality and process data. \
Use all available tools to support your analysis. \
Identify correlations between process parameters and quality outcomes related to {analysis_focus}. \
Use insights from the previous analyses.\n\n\
## Quality Data Preview\n{quality_data_preview}\n\n\
## Process Data Preview\n{process_data_preview}",
        expected_output: "Cross-dataset insights linking process parameters to quality outcomes, with supporting statistics.",
        model_tier: ModelTier::Efficient,
    }
}
