#[cfg(test)]
mod tests {
    use crate::config::{CacheConfig, Config, LLMProvider, ResearchConfig, SearchConfig};
    use crate::i18n::ReportLanguage;
    use crate::types::request::Depth;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.data_path, PathBuf::from("./.scout"));
        assert_eq!(config.report_language, ReportLanguage::English);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_llm_config_default() {
        let config = Config::default();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        // api_key may be empty if env var is not set
        assert!(!config.llm.api_base_url.is_empty());
        assert!(!config.llm.model.is_empty());
        assert_eq!(config.llm.max_tokens, 16384);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.llm.retry_delay_ms, 3000);
        assert_eq!(config.llm.timeout_seconds, 300);
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();

        assert!(config.enabled);
        assert_eq!(config.cache_dir, PathBuf::from(".scout/cache"));
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();

        assert_eq!(config.endpoint, "https://google.serper.dev/search");
        assert_eq!(config.max_sources, 10);
        assert_eq!(config.scrape_char_limit, 8000);
    }

    #[test]
    fn test_research_config_default() {
        let config = ResearchConfig::default();

        assert_eq!(config.default_depth, Depth::Standard);
        assert_eq!(config.default_location, "global");
        assert_eq!(config.default_timeframe, "2 years");
        assert!(!config.confirm_verification);
        assert!(config.refine_parameters);
        assert!(!config.force_refresh);
    }

    #[test]
    fn test_voice_config_default_disabled() {
        let config = Config::default();

        assert!(!config.voice.enabled);
        assert!(!config.voice.capture_input);
        assert_eq!(config.voice.tts_model, "eleven_monolingual_v1");
        assert_eq!(config.voice.stt_model, "whisper-1");
        assert_eq!(config.voice.record_seconds, 15);
    }

    #[test]
    fn test_validate_keys_reports_missing_serper() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        config.search.api_key = String::new();
        config.voice.enabled = false;

        let missing = config.validate_keys();
        assert!(missing.contains(&"SERPER_API_KEY"));
        assert!(!missing.contains(&"ELEVENLABS_API_KEY"));
    }

    #[test]
    fn test_validate_keys_voice_requires_elevenlabs() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        config.search.api_key = "serper-test".to_string();
        config.voice.enabled = true;
        config.voice.elevenlabs_api_key = String::new();

        let missing = config.validate_keys();
        assert_eq!(missing, vec!["ELEVENLABS_API_KEY"]);
    }

    #[test]
    fn test_validate_keys_ollama_needs_no_llm_key() {
        let mut config = Config::default();
        config.llm.provider = LLMProvider::Ollama;
        config.llm.api_key = String::new();
        config.search.api_key = "serper-test".to_string();

        let missing = config.validate_keys();
        assert!(!missing.contains(&"OPENAI_API_KEY"));
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scout.toml");

        let config_content = r#"data_path = "/tmp/scout-data"
report_language = "zh"
verbose = true

[llm]
provider = "anthropic"
api_key = "sk-file"
api_base_url = "https://api.anthropic.com"
model = "claude-sonnet-4-20250514"
max_tokens = 8192
temperature = 0.2
retry_attempts = 2
retry_delay_ms = 1000
timeout_seconds = 120

[cache]
enabled = false
cache_dir = "/tmp/scout-cache"

[search]
api_key = "serper-file"
endpoint = "https://google.serper.dev/search"
max_sources = 5
scrape_char_limit = 4000

[voice]
enabled = false
capture_input = false
elevenlabs_api_key = ""
voice_id = "onwK4e9ZLuTAKqWW03F9"
tts_model = "eleven_monolingual_v1"
stt_model = "whisper-1"
record_seconds = 10

[research]
default_depth = "detailed"
default_location = "Europe"
default_timeframe = "5 years"
confirm_verification = true
refine_parameters = false
force_refresh = false
"#;

        std::fs::write(&config_path, config_content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.data_path, PathBuf::from("/tmp/scout-data"));
        assert_eq!(config.report_language, ReportLanguage::Chinese);
        assert!(config.verbose);
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "sk-file");
        assert!(!config.cache.enabled);
        assert_eq!(config.search.max_sources, 5);
        assert_eq!(config.research.default_depth, Depth::Detailed);
        assert_eq!(config.research.default_location, "Europe");
        assert!(config.research.confirm_verification);
        assert!(!config.research.refine_parameters);
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/scout.toml"));
        assert!(result.is_err());
    }
}
