#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::{Config, LLMProvider};
    use crate::i18n::ReportLanguage;
    use crate::types::request::{Depth, EntityType};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["scout-rs"]).unwrap();

        assert!(args.topic.is_none());
        assert!(args.depth.is_none());
        assert!(args.config.is_none());
        assert!(!args.no_cache);
        assert!(!args.force_refresh);
        assert!(!args.confirm_verification);
        assert!(!args.voice);
        assert!(!args.voice_input);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_short_options() {
        let args = Args::try_parse_from([
            "scout-rs",
            "-t",
            "electric vehicles",
            "-d",
            "detailed",
            "-m",
            "gpt-4o-mini",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.topic, Some("electric vehicles".to_string()));
        assert_eq!(args.depth, Some("detailed".to_string()));
        assert_eq!(args.model, Some("gpt-4o-mini".to_string()));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_long_options() {
        let args = Args::try_parse_from([
            "scout-rs",
            "--topic",
            "fintech",
            "--location",
            "Europe",
            "--timeframe",
            "5 years",
            "--entity-type",
            "company",
            "--no-cache",
            "--force-refresh",
            "--voice",
            "--voice-input",
        ])
        .unwrap();

        assert_eq!(args.topic, Some("fintech".to_string()));
        assert_eq!(args.location, Some("Europe".to_string()));
        assert_eq!(args.timeframe, Some("5 years".to_string()));
        assert_eq!(args.entity_type, Some("company".to_string()));
        assert!(args.no_cache);
        assert!(args.force_refresh);
        assert!(args.voice);
        assert!(args.voice_input);
    }

    #[test]
    fn test_into_config_overrides_llm_settings() {
        let args = Args::try_parse_from([
            "scout-rs",
            "--llm-provider",
            "anthropic",
            "--llm-api-key",
            "sk-cli",
            "--llm-api-base-url",
            "https://example.test/v1",
            "--model",
            "claude-sonnet-4-20250514",
            "--max-tokens",
            "4096",
            "--temperature",
            "0.3",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "sk-cli");
        assert_eq!(config.llm.api_base_url, "https://example.test/v1");
        assert_eq!(config.llm.model, "claude-sonnet-4-20250514");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.temperature, 0.3);
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let args = Args::try_parse_from(["scout-rs", "--llm-provider", "nonsense"]).unwrap();
        let config = args.into_config();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_into_config_cache_and_research_flags() {
        let args = Args::try_parse_from([
            "scout-rs",
            "--no-cache",
            "--force-refresh",
            "--confirm-verification",
            "--depth",
            "basic",
        ])
        .unwrap();

        let config = args.into_config();

        assert!(!config.cache.enabled);
        assert!(config.research.force_refresh);
        assert!(config.research.confirm_verification);
        assert_eq!(config.research.default_depth, Depth::Basic);
    }

    #[test]
    fn test_into_config_data_path_moves_cache_dir() {
        let args =
            Args::try_parse_from(["scout-rs", "--data-path", "/tmp/scout-test"]).unwrap();
        let config = args.into_config();

        assert_eq!(config.data_path, PathBuf::from("/tmp/scout-test"));
        assert_eq!(config.cache.cache_dir, PathBuf::from("/tmp/scout-test/cache"));
    }

    #[test]
    fn test_into_config_report_language() {
        let args = Args::try_parse_from(["scout-rs", "--report-language", "zh"]).unwrap();
        let config = args.into_config();

        assert_eq!(config.report_language, ReportLanguage::Chinese);
    }

    #[test]
    fn test_into_config_voice_flags() {
        let args = Args::try_parse_from(["scout-rs", "--voice", "--voice-input"]).unwrap();
        let config = args.into_config();

        assert!(config.voice.enabled);
        assert!(config.voice.capture_input);
    }

    #[test]
    fn test_oneshot_request_built_from_args() {
        let args = Args::try_parse_from([
            "scout-rs",
            "--topic",
            "plant based meat",
            "--depth",
            "detailed",
            "--location",
            "Europe",
            "--entity-type",
            "keyword",
        ])
        .unwrap();

        let config = Args::try_parse_from(["scout-rs"]).unwrap().into_config();
        let request = args.oneshot_request(&config).unwrap();

        assert_eq!(request.topic, "plant based meat");
        assert_eq!(request.depth, Depth::Detailed);
        assert_eq!(request.location.as_deref(), Some("Europe"));
        assert_eq!(request.entity_type, EntityType::Keyword);
    }

    #[test]
    fn test_oneshot_request_absent_without_topic() {
        let args = Args::try_parse_from(["scout-rs"]).unwrap();
        let config = Config::default();

        assert!(args.oneshot_request(&config).is_none());
    }
}
