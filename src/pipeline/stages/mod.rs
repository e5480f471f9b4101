//! 标准四阶段分析管线的声明
//!
//! 阶段顺序为设计不变量：质量分析 → 工艺分析 → 联合分析 → 最终报告。
//! 后续阶段的指令文本假定前序阶段的发现已经存在。

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

use super::context::PipelineContext;
use super::persona;
use super::stage::{Stage, build_stage};

pub mod combined_analysis;
pub mod final_report;
pub mod process_analysis;
pub mod quality_analysis;

/// 构建标准管线的全部阶段。占位符替换在此一次性完成
pub fn build_pipeline(context: &PipelineContext) -> Result<Vec<Stage>> {
    let substitutions = standard_substitutions(context);

    let quality_analyst = Arc::new(persona::quality_analyst()?);
    let process_analyst = Arc::new(persona::process_analyst()?);
    let data_scientist = Arc::new(persona::data_scientist()?);
    let report_writer = Arc::new(persona::report_writer()?);

    Ok(vec![
        build_stage(&quality_analysis::spec(), quality_analyst, &substitutions)?,
        build_stage(&process_analysis::spec(), process_analyst, &substitutions)?,
        build_stage(&combined_analysis::spec(), data_scientist, &substitutions)?,
        build_stage(&final_report::spec(), report_writer, &substitutions)?,
    ])
}

/// 标准替换表：分析关注点与两个数据集的命名预览段落。
/// 指令按名称引用数据预览，不内联完整序列化数据
pub fn standard_substitutions(context: &PipelineContext) -> HashMap<&'static str, String> {
    let preview_rows = context.config.preview_rows;
    HashMap::from([
        ("analysis_focus", context.config.analysis_focus.clone()),
        (
            "quality_data_preview",
            context.quality_data.preview_markdown(preview_rows),
        ),
        (
            "process_data_preview",
            context.process_data.preview_markdown(preview_rows),
        ),
    ])
}
