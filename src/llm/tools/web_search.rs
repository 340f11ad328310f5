//! 网络搜索工具 - 基于Serper搜索API

use anyhow::Result;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

/// 网络搜索工具
#[derive(Clone)]
pub struct AgentToolWebSearch {
    config: SearchConfig,
    http: reqwest::Client,
}

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct WebSearchArgs {
    pub query: String,
    /// 期望返回的结果条数，缺省时使用配置的信息源预算
    pub num_results: Option<usize>,
}

/// 单条搜索结果
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// 搜索结果
#[derive(Debug, Serialize)]
pub struct WebSearchResult {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// 搜索工具错误
#[derive(Debug)]
pub struct WebSearchToolError(String);

impl std::fmt::Display for WebSearchToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "web search tool error: {}", self.0)
    }
}

impl std::error::Error for WebSearchToolError {}

/// Serper响应中的organic结果片段
#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl AgentToolWebSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn search(&self, args: &WebSearchArgs) -> Result<WebSearchResult> {
        if self.config.api_key.is_empty() {
            anyhow::bail!("SERPER_API_KEY 未配置，无法执行网络搜索");
        }

        let num = args
            .num_results
            .unwrap_or(self.config.max_sources)
            .min(self.config.max_sources);

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-KEY", &self.config.api_key)
            .json(&serde_json::json!({
                "q": args.query,
                "num": num,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<SerperResponse>()
            .await?;

        let hits = response
            .organic
            .into_iter()
            .take(num)
            .map(|item| SearchHit {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect();

        Ok(WebSearchResult {
            query: args.query.clone(),
            hits,
        })
    }
}

impl Tool for AgentToolWebSearch {
    const NAME: &'static str = "web_search";

    type Error = WebSearchToolError;
    type Args = WebSearchArgs;
    type Output = WebSearchResult;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "在互联网上搜索给定查询，返回标题、链接与摘要。用于收集市场、行业、公司的公开信息。".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "搜索查询语句"
                    },
                    "num_results": {
                        "type": "integer",
                        "description": "期望返回的结果条数（受配置上限约束）"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...web_search@{}", args.query);

        self.search(&args)
            .await
            .map_err(|e| WebSearchToolError(e.to_string()))
    }
}
