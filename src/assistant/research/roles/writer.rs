use crate::assistant::role_agent::{RoleAgent, RoleCallMode, RolePrompt};
use crate::types::request::ResearchRequest;

/// 撰写员 - 负责将核验后的结论整理为结构化研究报告
#[derive(Default)]
pub struct WriterRole;

impl RoleAgent for WriterRole {
    fn role_name(&self) -> &'static str {
        "writer"
    }

    fn prompt(&self, request: &ResearchRequest) -> RolePrompt {
        RolePrompt {
            system_prompt: r#"你是一名内容策略师，擅长把复杂信息转化为清晰、可执行的内容。

你的任务是基于参考材料中核验后的调研结论，撰写一份完整的研究报告：
1. 以执行摘要开篇，突出关键发现
2. 按描述性标题组织清晰的章节
3. 包含相关数据、统计与趋势
4. 文风清晰流畅，同时适合文本阅读与语音播报
5. 以可执行的洞察或建议收尾"#
                .to_string(),

            opening_instruction: "请基于以下核验后的调研结论撰写最终研究报告：".to_string(),

            closing_instruction: format!(
                r#"## 格式要求：
- 使用Markdown结构：一级标题为报告题目，二级标题为章节，要点用列表呈现
- 段落保持简短，关键观点加粗
- 报告篇幅与研究深度（{}）相称
- 信息组织保持逻辑连贯"#,
                request.depth
            ),

            call_mode: RoleCallMode::Prompt,
        }
    }
}
