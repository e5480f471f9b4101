//! 报告语言支持

use serde::{Deserialize, Serialize};

/// 报告目标语言
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "英文" => Ok(TargetLanguage::English),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" | "日文" => Ok(TargetLanguage::Japanese),
            "de" | "german" | "deutsch" | "德文" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(TargetLanguage::French),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 语言的自述名称，用于控制台输出
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
        }
    }

    /// 附加到阶段系统提示词末尾的语言指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => {
                "Please write your analysis in English, ensuring accurate, professional, and easy-to-understand language."
            }
            TargetLanguage::Chinese => "请使用中文编写分析内容，确保语言表达准确、专业、易于理解。",
            TargetLanguage::Japanese => {
                "日本語で分析内容を作成してください。正確で専門的で理解しやすい言語表現を心がけてください。"
            }
            TargetLanguage::German => {
                "Bitte verfassen Sie die Analyse auf Deutsch und stellen Sie sicher, dass die Sprache präzise, professionell und leicht verständlich ist."
            }
            TargetLanguage::French => {
                "Veuillez rédiger l'analyse en français, en vous assurant que le langage soit précis, professionnel et facile à comprendre."
            }
        }
    }
}
