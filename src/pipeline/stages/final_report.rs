use crate::llm::client::ModelTier;
use crate::pipeline::stage::StageSpec;

/// 最终报告编写阶段。该阶段的产出即整个管线的完整报告
pub fn spec() -> StageSpec {
    StageSpec {
        name: "final_report",
        instruction_template: "Compile a comprehensive report on the analysis of {analysis_focus}. \
Include key findings from the quality and process analyses, advanced insights, \
recommendations for improvement, and suggested next steps. \
Format the entire report in Markdown with clear section headings.",
        expected_output: "A complete, well-structured Markdown report ready to be delivered to manufacturing stakeholders.",
        model_tier: ModelTier::Powerful,
    }
}
