use crate::assistant::role_agent::{RoleAgent, RoleCallMode, RolePrompt};
use crate::types::request::{EntityType, ResearchRequest};

/// 分析师 - 负责从原始调研发现中提炼趋势、模式与洞察
#[derive(Default)]
pub struct AnalystRole;

impl RoleAgent for AnalystRole {
    fn role_name(&self) -> &'static str {
        "analyst"
    }

    fn prompt(&self, request: &ResearchRequest) -> RolePrompt {
        let focus = match request.entity_type {
            EntityType::Company => {
                r#"- 商业模式与收入来源
- 竞争优势与差异化要素
- 市场定位与战略
- 财务健康状况与经营表现
- 增长路径与面临的挑战"#
            }
            EntityType::Keyword => {
                r#"- 现状与重大进展
- 关键影响者与意见领袖
- 区域差异与模式
- 历史脉络与演进
- 未来走向与潜在颠覆因素"#
            }
        };

        RolePrompt {
            system_prompt: r#"你是一名数据分析专家，擅长在复杂信息中发现模式与有意义的关联。

你的任务是分析参考材料中的原始调研发现：
1. 识别关键趋势、模式与洞察
2. 评估不同信息源的可信度与一致性
3. 指出信息中的矛盾或缺口
4. 建立调研发现不同方面之间的关联
5. 将信息组织为清晰的逻辑类别"#
                .to_string(),

            opening_instruction: "请对以下原始调研发现进行结构化分析：".to_string(),

            closing_instruction: format!(
                r#"## 分析重点：
{}

输出结构化的分析结论，按类别组织，标注依据来源。"#,
                focus
            ),

            call_mode: RoleCallMode::Prompt,
        }
    }
}
