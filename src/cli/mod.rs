use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;

/// Prodsight-RS - 由Rust与AI驱动的质量/工艺数据分析报告引擎
#[derive(Parser, Debug)]
#[command(name = "Gauge (prodsight-rs)")]
#[command(
    about = "AI-based analysis report engine for manufacturing quality and process data. It ingests quality/process CSV datasets, runs a fixed multi-persona analysis pipeline with statistical tools, and generates a professional Markdown report."
)]
#[command(version)]
pub struct Args {
    /// 质量数据CSV路径
    #[arg(short, long)]
    pub quality_data: PathBuf,

    /// 工艺数据CSV路径
    #[arg(short, long)]
    pub process_data: PathBuf,

    /// 分析关注点（自然语言描述）
    #[arg(short, long)]
    pub focus: String,

    /// 输出路径
    #[arg(short, long, default_value = "./prodsight.report")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型，优先用于常规分析阶段
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于最终报告编写阶段
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 工具驱动阶段的最大迭代轮数
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 报告目标语言 (en, zh, ja, de, fr)
    #[arg(long)]
    pub target_language: Option<String>,

    /// 数据预览行数
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// 禁用统计工具，所有阶段改为纯推理
    #[arg(long, default_value = "false", action = clap::ArgAction::SetTrue)]
    pub disable_preset_tools: bool,
}

impl Args {
    /// 将CLI参数合并为配置：配置文件先加载，CLI参数随后覆盖
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(path) => Config::from_file(path)
                .with_context(|| format!("cannot read config file {:?}", path))?,
            None => {
                // 未指定时尝试工作目录下的默认配置文件
                let default_path = Path::new("prodsight.toml");
                if default_path.exists() {
                    Config::from_file(default_path)
                        .context("cannot read default config file prodsight.toml")?
                } else {
                    Config::default()
                }
            }
        };

        // 数据与输出路径始终来自CLI
        config.quality_data_path = self.quality_data;
        config.process_data_path = self.process_data;
        config.analysis_focus = self.focus;
        config.output_path = self.output_path;

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        } else if config.llm.model_powerful.is_empty() {
            config.llm.model_powerful = config.llm.model_efficient.to_string();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.llm.max_iterations = max_iterations;
        }
        config.llm.disable_preset_tools = self.disable_preset_tools;

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    target_language_str
                );
            }
        }

        if let Some(preview_rows) = self.preview_rows {
            config.preview_rows = preview_rows;
        }

        config.verbose = self.verbose;

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
