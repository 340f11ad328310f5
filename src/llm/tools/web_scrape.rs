//! 网页抓取工具 - 拉取页面并提取可读正文

use anyhow::Result;
use rig::tool::Tool;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

/// 网页抓取工具
#[derive(Clone)]
pub struct AgentToolWebScrape {
    config: SearchConfig,
    http: reqwest::Client,
}

/// 抓取参数
#[derive(Debug, Deserialize)]
pub struct WebScrapeArgs {
    pub url: String,
}

/// 抓取结果
#[derive(Debug, Serialize)]
pub struct WebScrapeResult {
    pub url: String,
    pub content: String,
    pub truncated: bool,
}

/// 抓取工具错误
#[derive(Debug)]
pub struct WebScrapeToolError(String);

impl std::fmt::Display for WebScrapeToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "web scrape tool error: {}", self.0)
    }
}

impl std::error::Error for WebScrapeToolError {}

impl AgentToolWebScrape {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn scrape(&self, args: &WebScrapeArgs) -> Result<WebScrapeResult> {
        let body = self
            .http
            .get(&args.url)
            .header("User-Agent", "scout-rs research agent")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let mut content = extract_readable_text(&body);

        // 截断过长正文，避免token超限
        let limit = self.config.scrape_char_limit;
        let truncated = content.chars().count() > limit;
        if truncated {
            content = content.chars().take(limit).collect::<String>() + "...[内容过长已截断]";
        }

        Ok(WebScrapeResult {
            url: args.url.clone(),
            content,
            truncated,
        })
    }
}

/// 从HTML中提取可读正文，剔除脚本与样式
fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    // 优先取正文容器，退化为整个body
    let selector = Selector::parse("article, main, body").expect("static selector");

    let root_text: Vec<String> = match document.select(&selector).next() {
        Some(element) => element
            .text()
            .map(|fragment| fragment.trim().to_string())
            .filter(|fragment| !fragment.is_empty())
            .collect(),
        None => document
            .root_element()
            .text()
            .map(|fragment| fragment.trim().to_string())
            .filter(|fragment| !fragment.is_empty())
            .collect(),
    };

    root_text.join("\n")
}

impl Tool for AgentToolWebScrape {
    const NAME: &'static str = "web_scrape";

    type Error = WebScrapeToolError;
    type Args = WebScrapeArgs;
    type Output = WebScrapeResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "抓取指定URL的网页并返回提取后的可读正文，用于对搜索结果做深入阅读。"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "要抓取的网页地址"
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_scrape@{}", args.url);

        self.scrape(&args)
            .await
            .map_err(|e| WebScrapeToolError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::extract_readable_text;

    #[test]
    fn test_extract_readable_text_strips_markup() {
        let html = r#"<html><head><style>.x{color:red}</style></head>
<body><article><h1>Title</h1><p>First paragraph.</p><p>Second.</p></article></body></html>"#;

        let text = extract_readable_text(html);

        assert!(text.contains("Title"));
        assert!(text.contains("First paragraph."));
        assert!(!text.contains("color:red"));
    }

    #[test]
    fn test_extract_readable_text_plain_body() {
        let html = "<html><body><p>only body</p></body></html>";
        assert!(extract_readable_text(html).contains("only body"));
    }
}
