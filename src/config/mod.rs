use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::i18n::TargetLanguage;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 质量数据CSV路径
    pub quality_data_path: PathBuf,

    /// 工艺数据CSV路径
    pub process_data_path: PathBuf,

    /// 用户指定的分析关注点
    pub analysis_focus: String,

    /// 输出路径
    pub output_path: PathBuf,

    /// 报告目标语言
    pub target_language: TargetLanguage,

    /// 数据预览行数，用于阶段指令中的数据预览段落
    pub preview_rows: usize,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于常规分析阶段
    pub model_efficient: String,

    /// 高质量模型，优先用于最终报告编写阶段
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    /// 工具驱动阶段的最大迭代轮数
    pub max_iterations: usize,

    /// 禁用统计工具，所有阶段改为纯推理
    pub disable_preset_tools: bool,
}

impl Config {
    /// 从TOML文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        toml::from_str(&content).context("failed to parse config file")
    }

    /// 校验配置，任何阶段执行前的前置检查
    pub fn validate(&self) -> std::result::Result<(), PipelineError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(PipelineError::Configuration(format!(
                "LLM API key not found. Set it via PRODSIGHT_LLM_API_KEY or --llm-api-key (provider: {})",
                self.llm.provider
            )));
        }
        if self.analysis_focus.trim().is_empty() {
            return Err(PipelineError::Input(
                "analysis focus is empty. Specify what aspect of quality or process to analyze"
                    .to_string(),
            ));
        }
        if self.quality_data_path.as_os_str().is_empty() {
            return Err(PipelineError::Input(
                "quality data CSV path is missing".to_string(),
            ));
        }
        if self.process_data_path.as_os_str().is_empty() {
            return Err(PipelineError::Input(
                "process data CSV path is missing".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality_data_path: PathBuf::new(),
            process_data_path: PathBuf::new(),
            analysis_focus: String::new(),
            output_path: PathBuf::from("./prodsight.report"),
            target_language: TargetLanguage::default(),
            preview_rows: 20,
            llm: LLMConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("PRODSIGHT_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model_efficient: String::from("gpt-4o-mini"),
            model_powerful: String::from("gpt-4o"),
            max_tokens: 8192,
            temperature: 0.2,
            retry_attempts: 3,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
            max_iterations: 8,
            disable_preset_tools: false,
        }
    }
}
