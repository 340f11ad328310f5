#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use crate::assistant::context::AssistantContext;
    use crate::assistant::workflow::render_report;
    use crate::config::Config;
    use crate::types::report::ResearchReport;
    use crate::types::request::{Depth, ResearchRequest};

    fn create_test_context() -> (AssistantContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_path = temp_dir.path().to_path_buf();
        config.cache.cache_dir = temp_dir.path().join("cache");

        let context = AssistantContext::new(config).unwrap();
        (context, temp_dir)
    }

    #[test]
    fn test_assistant_context_creation() {
        let (context, temp_dir) = create_test_context();

        assert_eq!(context.config.data_path, temp_dir.path());
        assert_eq!(context.config.cache.cache_dir, temp_dir.path().join("cache"));
    }

    #[tokio::test]
    async fn test_context_memory_roundtrip() {
        let (context, _temp_dir) = create_test_context();

        context
            .store_to_memory("session", "greeted", true)
            .await
            .unwrap();

        assert!(context.has_memory_data("session", "greeted").await);
        let value: Option<bool> = context.get_from_memory("session", "greeted").await;
        assert_eq!(value, Some(true));

        context.clear_memory_scope("session").await;
        assert!(!context.has_memory_data("session", "greeted").await);
    }

    #[test]
    fn test_render_report_contains_sections_and_bullets() {
        let request = ResearchRequest::new("electric vehicles").with_depth(Depth::Standard);
        let markdown_text = "## Executive Summary\n\n- EV sales keep growing\n\n## Outlook\n\n- strong demand expected\n";
        let report = ResearchReport {
            research_id: "abcd1234".to_string(),
            sections: ResearchReport::sections_from_markdown(markdown_text),
            raw_findings: String::new(),
            analysis: String::new(),
            verified: String::new(),
            final_markdown: markdown_text.to_string(),
            generated_at: Utc::now(),
            source_request: request,
            model: "gpt-4o".to_string(),
            elapsed_seconds: 12.3,
        };

        let rendered = render_report(&report);

        assert!(rendered.contains("electric vehicles"));
        assert!(rendered.contains("## executive summary"));
        assert!(rendered.contains("• EV sales keep growing"));
        assert!(rendered.contains("## outlook"));
        assert!(rendered.contains("gpt-4o"));
    }
}
