use anyhow::Result;
use async_trait::async_trait;

use crate::assistant::context::AssistantContext;
use crate::types::request::ResearchRequest;

/// 角色的LLM调用方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCallMode {
    /// 单轮推理，返回文本
    Prompt,
    /// 带网络调研工具的多轮推理
    PromptWithTools,
}

/// 角色Prompt模板
#[derive(Debug, Clone)]
pub struct RolePrompt {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
    /// LLM调用方式
    pub call_mode: RoleCallMode,
}

/// 委托角色trait - 每个研究阶段对应一个角色
///
/// 角色只声明自己的提示词模板与调用方式，执行逻辑完全标准化：
/// 拼装请求描述与上游材料，附加目标语言指令后交给LLM客户端。
#[async_trait]
pub trait RoleAgent: Send + Sync {
    /// 角色标识
    fn role_name(&self) -> &'static str;

    /// 角色的Prompt模板，可按请求参数定制
    fn prompt(&self, request: &ResearchRequest) -> RolePrompt;

    /// 工具调用循环的最大轮数
    fn max_tool_turns(&self) -> usize {
        8
    }

    /// 默认实现的execute方法 - 完全标准化
    async fn execute(
        &self,
        context: &AssistantContext,
        request: &ResearchRequest,
        material: &str,
    ) -> Result<String> {
        let template = self.prompt(request);

        // 根据配置的目标语言添加语言指令
        let language_instruction = context.config.report_language.prompt_instruction();
        let system_prompt = format!("{}\n\n{}", template.system_prompt, language_instruction);

        let mut user_prompt = String::new();
        user_prompt.push_str(&template.opening_instruction);
        user_prompt.push_str("\n\n## 研究请求\n");
        user_prompt.push_str(&request.describe());
        user_prompt.push_str("\n\n");

        if !material.is_empty() {
            user_prompt.push_str("## 参考材料\n");
            user_prompt.push_str(material);
            user_prompt.push_str("\n\n");
        }

        user_prompt.push_str(&template.closing_instruction);

        let result = match template.call_mode {
            RoleCallMode::Prompt => {
                context
                    .llm_client
                    .prompt(&system_prompt, &user_prompt)
                    .await?
            }
            RoleCallMode::PromptWithTools => {
                context
                    .llm_client
                    .prompt_with_tools(&system_prompt, &user_prompt, self.max_tool_turns())
                    .await?
            }
        };

        println!("✅ Role-Agent [{}]执行完成", self.role_name());
        Ok(result)
    }
}
