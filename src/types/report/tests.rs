#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::types::report::{ReportSection, ResearchReport};
    use crate::types::request::ResearchRequest;

    fn sample_report(markdown_text: &str) -> ResearchReport {
        ResearchReport {
            research_id: "test0001".to_string(),
            sections: ResearchReport::sections_from_markdown(markdown_text),
            raw_findings: String::new(),
            analysis: String::new(),
            verified: String::new(),
            final_markdown: markdown_text.to_string(),
            generated_at: Utc::now(),
            source_request: ResearchRequest::new("electric vehicles"),
            model: "gpt-4o".to_string(),
            elapsed_seconds: 1.0,
        }
    }

    #[test]
    fn test_sections_from_markdown_basic() {
        let markdown_text = r#"# EV Market Report

## Executive Summary

- Sales grew 30% year over year
- China remains the largest market

## Market Trends

Battery prices continue to fall.

- Solid state batteries expected by 2027
"#;

        let sections = ResearchReport::sections_from_markdown(markdown_text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "executive summary");
        assert_eq!(sections[0].bullets.len(), 2);
        assert_eq!(sections[0].bullets[0], "Sales grew 30% year over year");

        assert_eq!(sections[1].title, "market trends");
        assert!(sections[1]
            .bullets
            .contains(&"Battery prices continue to fall.".to_string()));
    }

    #[test]
    fn test_sections_title_skipped() {
        let markdown_text = "# Title Only\n\n## Findings\n\n- one finding\n";
        let sections = ResearchReport::sections_from_markdown(markdown_text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "findings");
    }

    #[test]
    fn test_sections_subsection_becomes_bold_bullet() {
        let markdown_text = "## Competitors\n\n### Tesla\n\n- market leader\n";
        let sections = ResearchReport::sections_from_markdown(markdown_text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].bullets[0], "**Tesla**");
        assert_eq!(sections[0].bullets[1], "market leader");
    }

    #[test]
    fn test_sections_content_before_first_heading() {
        let markdown_text = "Intro paragraph before any heading.\n\n## Details\n\n- detail\n";
        let sections = ResearchReport::sections_from_markdown(markdown_text);

        assert_eq!(sections[0].title, "overview");
        assert_eq!(
            sections[0].bullets[0],
            "Intro paragraph before any heading."
        );
    }

    #[test]
    fn test_sections_from_plain_text() {
        let sections = ResearchReport::sections_from_markdown("just one line of text");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "overview");
    }

    #[test]
    fn test_sections_from_empty_input() {
        assert!(ResearchReport::sections_from_markdown("").is_empty());
    }

    #[test]
    fn test_summary_text_limits_sections() {
        let report = sample_report(
            "## One\n\n- a\n\n## Two\n\n- b\n\n## Three\n\n- c\n",
        );
        let summary = report.summary_text(2);

        assert!(summary.contains("electric vehicles"));
        assert!(summary.contains("one:"));
        assert!(summary.contains("two:"));
        assert!(!summary.contains("three:"));
    }

    #[test]
    fn test_report_serialization_roundtrip() {
        let report = sample_report("## Findings\n\n- finding\n");
        let serialized = serde_json::to_string(&report).unwrap();
        let restored: ResearchReport = serde_json::from_str(&serialized).unwrap();

        assert_eq!(restored, report);
        assert_eq!(
            restored.sections,
            vec![ReportSection {
                title: "findings".to_string(),
                bullets: vec!["finding".to_string()],
            }]
        );
    }
}
