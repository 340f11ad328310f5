//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::Config;
use crate::llm::tools::{AgentToolWebScrape, AgentToolWebSearch};

mod providers;

use providers::ProviderClient;

/// LLM客户端
///
/// 所有角色共用一个客户端，持有provider连接与两个网络调研工具。
/// 重试策略在这一层统一收口，管线自身不再额外重试。
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
    web_search: AgentToolWebSearch,
    web_scrape: AgentToolWebScrape,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        let web_search = AgentToolWebSearch::new(config.search.clone());
        let web_scrape = AgentToolWebScrape::new(config.search.clone());

        Ok(Self {
            client,
            web_search,
            web_scrape,
            config,
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .prompt("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts;
        let retry_delay_ms = llm_config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 结构化数据提取方法
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let llm_config = &self.config.llm;
        let extractor =
            self.client
                .create_extractor::<T>(&llm_config.model, system_prompt, llm_config);

        self.retry_with_backoff(|| async { extractor.extract(user_prompt).await })
            .await
    }

    /// 单轮对话方法（不使用工具）
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent =
            self.client
                .create_agent(&self.config.llm.model, system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }

    /// 带网络调研工具的多轮对话方法
    ///
    /// 供需要搜索与抓取的角色（调研员、核验员）使用，工具调用循环由
    /// 委托框架自身驱动。
    pub async fn prompt_with_tools(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_turns: usize,
    ) -> Result<String> {
        let agent = self.client.create_agent_with_tools(
            &self.config.llm.model,
            system_prompt,
            &self.config.llm,
            &self.web_search,
            &self.web_scrape,
        );

        self.retry_with_backoff(|| async {
            agent
                .multi_turn(user_prompt, max_turns)
                .await
                .map_err(|e| anyhow::anyhow!(e))
        })
        .await
    }

    /// 当前使用的模型名称
    pub fn model_name(&self) -> &str {
        &self.config.llm.model
    }
}
