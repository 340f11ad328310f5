use serde::{Deserialize, Serialize};

/// 报告目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum ReportLanguage {
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

impl std::fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportLanguage::English => write!(f, "en"),
            ReportLanguage::Chinese => write!(f, "zh"),
            ReportLanguage::Japanese => write!(f, "ja"),
            ReportLanguage::German => write!(f, "de"),
            ReportLanguage::French => write!(f, "fr"),
        }
    }
}

impl std::str::FromStr for ReportLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "英文" => Ok(ReportLanguage::English),
            "zh" | "chinese" | "中文" => Ok(ReportLanguage::Chinese),
            "ja" | "japanese" | "日本語" | "日文" => Ok(ReportLanguage::Japanese),
            "de" | "german" | "deutsch" | "德文" => Ok(ReportLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(ReportLanguage::French),
            _ => Err(format!("Unknown report language: {}", s)),
        }
    }
}

impl ReportLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportLanguage::English => "English",
            ReportLanguage::Chinese => "中文",
            ReportLanguage::Japanese => "日本語",
            ReportLanguage::German => "Deutsch",
            ReportLanguage::French => "Français",
        }
    }

    /// 获取语言的提示词指令，附加在每个角色的系统提示词之后
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            ReportLanguage::English => {
                "Please write the report and all responses in English, ensuring accurate, professional, and easy-to-understand language."
            }
            ReportLanguage::Chinese => "请使用中文撰写报告与回复，确保语言表达准确、专业、易于理解。",
            ReportLanguage::Japanese => {
                "レポートと回答は日本語で作成してください。正確で専門的で理解しやすい表現を心がけてください。"
            }
            ReportLanguage::German => {
                "Bitte verfassen Sie den Bericht und alle Antworten auf Deutsch, präzise, professionell und leicht verständlich."
            }
            ReportLanguage::French => {
                "Veuillez rédiger le rapport et toutes les réponses en français, de manière précise, professionnelle et facile à comprendre."
            }
        }
    }
}
