//! 分析报告管线
//!
//! 固定的四阶段顺序管线：每个阶段将一条指令绑定到一个角色，
//! 角色通过能力集使用统计工具，最后一个阶段的产出即完整报告。

use anyhow::Result;

use crate::config::Config;
use crate::error::PipelineError;
use crate::types::Dataset;

pub mod context;
pub mod outlet;
pub mod persona;
pub mod runner;
pub mod stage;
pub mod stages;

use context::PipelineContext;
use runner::PipelineRunner;

/// 启动分析报告生成工作流
pub async fn launch(config: &Config) -> Result<()> {
    // 凭证与输入的前置校验，任何阶段执行前完成
    config.validate()?;

    println!("📊 正在加载数据集...");
    let quality_data = Dataset::from_csv_path("quality", &config.quality_data_path)?;
    let process_data = Dataset::from_csv_path("process", &config.process_data_path)?;

    for dataset in [&quality_data, &process_data] {
        if dataset.is_empty() {
            return Err(PipelineError::Input(format!(
                "{} dataset has no rows",
                dataset.name()
            ))
            .into());
        }
        println!(
            "   📄 {} 数据集: {} 行 × {} 列（{} 个数值列）",
            dataset.name(),
            dataset.row_count(),
            dataset.column_count(),
            dataset.numeric_columns().len()
        );
    }

    let context = PipelineContext::new(config.clone(), quality_data, process_data)?;

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    println!("📝 报告语言: {}", config.target_language.display_name());

    let stages = stages::build_pipeline(&context)?;
    let runner = PipelineRunner::new();
    let outcome = runner.run(&context, &stages).await?;

    outlet::save(&context, &outcome).await?;

    println!("\n📋 运行摘要:\n{}", outcome.summary);
    Ok(())
}
