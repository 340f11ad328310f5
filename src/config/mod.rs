use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::i18n::ReportLanguage;
use crate::types::request::Depth;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
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
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 内部工作目录路径 (.scout)
    pub data_path: PathBuf,

    /// 报告目标语言
    pub report_language: ReportLanguage,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 搜索工具配置
    pub search: SearchConfig,

    /// 语音配置
    pub voice: VoiceConfig,

    /// 研究管线配置
    pub research: ResearchConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 模型名称
    pub model: String,

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
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,
}

/// 搜索工具配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Serper API KEY
    pub api_key: String,

    /// Serper搜索接口地址
    pub endpoint: String,

    /// 单次研究最多引用的信息源数量
    pub max_sources: usize,

    /// 网页抓取正文截断长度
    pub scrape_char_limit: usize,
}

/// 语音配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VoiceConfig {
    /// 是否朗读助手回复
    pub enabled: bool,

    /// 是否用麦克风代替文本输入
    pub capture_input: bool,

    /// ElevenLabs API KEY，缺省时语音合成不可用
    pub elevenlabs_api_key: String,

    /// ElevenLabs音色ID（默认预置音色Daniel）
    pub voice_id: String,

    /// ElevenLabs合成模型
    pub tts_model: String,

    /// Whisper转写模型
    pub stt_model: String,

    /// 单句录音上限（秒）
    pub record_seconds: u64,
}

/// 研究管线配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResearchConfig {
    /// 会话中未指定时的默认深度
    pub default_depth: Depth,

    /// 默认地域范围
    pub default_location: String,

    /// 默认时间范围
    pub default_timeframe: String,

    /// 核验完成后是否暂停等待人工确认
    pub confirm_verification: bool,

    /// 是否在研究前执行参数细化
    pub refine_parameters: bool,

    /// 跳过缓存探测强制重新研究（结果仍会写入缓存）
    pub force_refresh: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 校验必需的API KEY，返回缺失项
    pub fn validate_keys(&self) -> Vec<&'static str> {
        let mut missing_keys = Vec::new();

        if self.llm.api_key.is_empty() && self.llm.provider != LLMProvider::Ollama {
            missing_keys.push("OPENAI_API_KEY");
        }
        if self.search.api_key.is_empty() {
            missing_keys.push("SERPER_API_KEY");
        }
        if self.voice.enabled && self.voice.elevenlabs_api_key.is_empty() {
            missing_keys.push("ELEVENLABS_API_KEY");
        }

        missing_keys
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./.scout"),
            report_language: ReportLanguage::default(),
            llm: LLMConfig::default(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
            voice: VoiceConfig::default(),
            research: ResearchConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| String::from("gpt-4o")),
            max_tokens: 16384,
            temperature: 0.7,
            retry_attempts: 3,
            retry_delay_ms: 3000,
            timeout_seconds: 300,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".scout/cache"),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("SERPER_API_KEY").unwrap_or_default(),
            endpoint: String::from("https://google.serper.dev/search"),
            max_sources: 10,
            scrape_char_limit: 8000,
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capture_input: false,
            elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
            voice_id: String::from("onwK4e9ZLuTAKqWW03F9"),
            tts_model: String::from("eleven_monolingual_v1"),
            stt_model: String::from("whisper-1"),
            record_seconds: 15,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            default_depth: Depth::Standard,
            default_location: String::from("global"),
            default_timeframe: String::from("2 years"),
            confirm_verification: false,
            refine_parameters: true,
            force_refresh: false,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
