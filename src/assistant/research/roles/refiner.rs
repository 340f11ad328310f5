use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assistant::context::AssistantContext;
use crate::types::request::ResearchRequest;

/// 细化后的研究参数
///
/// 在正式调研开始前由对话角色对原始请求做一次增强，产出更精确的
/// 查询与检索策略，作为调研员的输入材料。
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RefinedParameters {
    /// 更精确的查询表述
    pub refined_query: String,
    /// 需要重点调研的方面
    pub aspects: Vec<String>,
    /// 建议使用的搜索关键词
    pub keywords: Vec<String>,
    /// 建议优先采用的信息源类型
    pub sources: Vec<String>,
    /// 检索策略简述
    pub search_strategy: String,
}

impl RefinedParameters {
    /// 渲染为调研员可读的材料文本
    pub fn as_material(&self) -> String {
        format!(
            "### 细化后的研究参数\n精确查询: {}\n重点方面: {}\n搜索关键词: {}\n优先信息源: {}\n检索策略: {}\n",
            self.refined_query,
            self.aspects.join("; "),
            self.keywords.join(", "),
            self.sources.join(", "),
            self.search_strategy
        )
    }
}

/// 参数细化器
///
/// 与其它角色不同，它的产出是结构化数据而非文本，因此直接走
/// extractor而不经过RoleAgent。
#[derive(Default)]
pub struct ParameterRefiner;

impl ParameterRefiner {
    pub async fn refine(
        &self,
        context: &AssistantContext,
        request: &ResearchRequest,
    ) -> Result<RefinedParameters> {
        let system_prompt = r#"你是一名对话管理专员，擅长理解用户需求并从中提炼研究参数。

你的任务是增强给定的研究请求：
1. 更精确地识别主题或公司
2. 确定应重点调研的具体方面
3. 识别相关的行业、竞争对手或关联领域
4. 建议有价值的信息源类型
5. 给出带具体关键词的检索策略

以结构化JSON格式返回增强后的参数。"#;

        let user_prompt = format!("请增强以下研究请求的参数：\n\n{}", request.describe());

        context.llm_client.extract(system_prompt, &user_prompt).await
    }
}
