use crate::config::{Config, LLMProvider};
use crate::i18n::ReportLanguage;
use crate::types::request::{Depth, EntityType, ResearchRequest};
use clap::Parser;
use std::path::PathBuf;

/// Scout - 由Rust与AI驱动的会话式市场研究助手
#[derive(Parser, Debug, Clone)]
#[command(name = "Scout (scout-rs)")]
#[command(
    about = "Conversational AI market research assistant. It delegates research to a fixed sequence of agent roles, caches finished reports on disk, and renders results in a terminal chat loop with optional voice input/output."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 一次性研究主题，指定后跳过交互会话直接出报告
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 研究深度 (basic, standard, detailed)
    #[arg(short, long)]
    pub depth: Option<String>,

    /// 地域范围 (如 global, Europe, China)
    #[arg(long)]
    pub location: Option<String>,

    /// 时间范围 (如 "2 years")
    #[arg(long)]
    pub timeframe: Option<String>,

    /// 研究对象类型 (company, keyword)
    #[arg(long)]
    pub entity_type: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内部数据目录路径
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// 报告目标语言 (en, zh, ja, de, fr)
    #[arg(long)]
    pub report_language: Option<String>,

    /// LLM Provider (openai, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 模型名称
    #[arg(short, long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Serper搜索API KEY
    #[arg(long)]
    pub serper_api_key: Option<String>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 跳过缓存探测强制重新研究（结果仍写入缓存）
    #[arg(long)]
    pub force_refresh: bool,

    /// 核验完成后暂停等待人工确认
    #[arg(long)]
    pub confirm_verification: bool,

    /// 朗读助手回复
    #[arg(long)]
    pub voice: bool,

    /// 用麦克风代替文本输入
    #[arg(long)]
    pub voice_input: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("scout.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        if let Some(data_path) = self.data_path {
            config.cache.cache_dir = data_path.join("cache");
            config.data_path = data_path;
        }

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
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(serper_api_key) = self.serper_api_key {
            config.search.api_key = serper_api_key;
        }

        // 报告语言配置
        if let Some(report_language_str) = self.report_language {
            if let Ok(report_language) = report_language_str.parse::<ReportLanguage>() {
                config.report_language = report_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的报告语言: {}，使用默认语言 (English)",
                    report_language_str
                );
            }
        }

        // 研究默认参数
        if let Some(depth_str) = self.depth {
            if let Ok(depth) = depth_str.parse::<Depth>() {
                config.research.default_depth = depth;
            } else {
                eprintln!("⚠️ 警告: 未知的研究深度: {}，使用默认深度", depth_str);
            }
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }
        config.research.force_refresh = self.force_refresh;
        config.research.confirm_verification =
            config.research.confirm_verification || self.confirm_verification;

        // 语音配置
        if self.voice {
            config.voice.enabled = true;
        }
        if self.voice_input {
            config.voice.capture_input = true;
        }

        config.verbose = self.verbose;

        config
    }

    /// 从一次性模式参数构造研究请求
    pub fn oneshot_request(&self, config: &Config) -> Option<ResearchRequest> {
        let topic = self.topic.as_ref()?;

        let depth = self
            .depth
            .as_deref()
            .and_then(|value| value.parse::<Depth>().ok())
            .unwrap_or(config.research.default_depth);

        let entity_type = self
            .entity_type
            .as_deref()
            .and_then(|value| value.parse::<EntityType>().ok())
            .unwrap_or_default();

        Some(ResearchRequest {
            topic: topic.clone(),
            depth,
            location: self.location.clone(),
            timeframe: self.timeframe.clone(),
            entity_type,
        })
    }
}

// Include tests
#[cfg(test)]
mod tests;
