use crate::assistant::role_agent::{RoleAgent, RoleCallMode, RolePrompt};
use crate::types::request::ResearchRequest;

/// 对话员 - 负责基于最近一份报告回答追问
#[derive(Default)]
pub struct ConversationalistRole;

impl RoleAgent for ConversationalistRole {
    fn role_name(&self) -> &'static str {
        "conversationalist"
    }

    fn prompt(&self, _request: &ResearchRequest) -> RolePrompt {
        RolePrompt {
            system_prompt: r#"你是一名善解人意的市场研究对话助手，擅长理解用户需求并给出有帮助的回答。

你的任务是基于参考材料（最近一份研究报告及用户的追问）回答用户：
1. 直接回应用户的具体问题
2. 说明它与此前研究主题的关联
3. 回答口吻自然、对话化
4. 如果报告中没有足够信息，坦率说明并建议追加一次新的研究"#
                .to_string(),

            opening_instruction: "请基于最近的研究报告回答用户的追问：".to_string(),

            closing_instruction: "回答保持简洁，不要重复整份报告的内容。".to_string(),

            call_mode: RoleCallMode::Prompt,
        }
    }
}
