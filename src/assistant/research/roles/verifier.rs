use crate::assistant::role_agent::{RoleAgent, RoleCallMode, RolePrompt};
use crate::types::request::ResearchRequest;

/// 核验员 - 负责核实调研与分析结论的准确性和完整性
#[derive(Default)]
pub struct VerifierRole;

impl RoleAgent for VerifierRole {
    fn role_name(&self) -> &'static str {
        "verifier"
    }

    fn max_tool_turns(&self) -> usize {
        10
    }

    fn prompt(&self, _request: &ResearchRequest) -> RolePrompt {
        RolePrompt {
            system_prompt: r#"你是一名事实核查专员，确保信息准确、均衡且来源可靠。

你的任务是核验参考材料中的调研发现与分析结论：
1. 检查要求的调研维度是否全部覆盖
2. 对关键事实尽可能用多个来源交叉验证（可使用web_search与web_scrape工具）
3. 指出可能过时或不正确的信息
4. 识别信息源或分析中的潜在偏见
5. 针对重要缺口补充检索"#
                .to_string(),

            opening_instruction: "请核验以下调研发现与分析结论：".to_string(),

            closing_instruction: r#"## 核验要求：
- 发现矛盾或缺失时，执行补充检索予以纠正或补全
- 输出核验后的结论清单，逐条标注核验状态（已证实/存疑/已修正）"#
                .to_string(),

            call_mode: RoleCallMode::PromptWithTools,
        }
    }
}
