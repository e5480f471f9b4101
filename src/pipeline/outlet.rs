//! 报告输出层 - 将最终报告与产物写入输出目录

use anyhow::Result;
use std::fs;

use super::context::PipelineContext;
use super::runner::PipelineOutcome;

/// 固定的报告文件名
pub const REPORT_FILENAME: &str = "quality_process_analysis_report.md";

/// 保存报告与产物
pub async fn save(context: &PipelineContext, outcome: &PipelineOutcome) -> Result<()> {
    let outlet = DiskOutlet;
    outlet.save(context, outcome).await
}

pub trait Outlet {
    async fn save(&self, context: &PipelineContext, outcome: &PipelineOutcome) -> Result<()>;
}

pub struct DiskOutlet;

impl Outlet for DiskOutlet {
    async fn save(&self, context: &PipelineContext, outcome: &PipelineOutcome) -> Result<()> {
        println!("\n🖊️ 报告存储中...");
        let output_dir = &context.config.output_path;
        fs::create_dir_all(output_dir)?;

        let report_path = output_dir.join(REPORT_FILENAME);
        fs::write(&report_path, &outcome.report)?;
        println!("💾 已保存报告: {}", report_path.display());

        // 工具生成的产物（相关性热力图等）写在报告旁边
        for (name, bytes) in context.artifacts_snapshot().await {
            let artifact_path = output_dir.join(&name);
            fs::write(&artifact_path, bytes)?;
            println!("💾 已保存产物: {}", artifact_path.display());
        }

        println!("💾 输出目录: {}", output_dir.display());
        Ok(())
    }
}
