use crate::assistant::role_agent::{RoleAgent, RoleCallMode, RolePrompt};
use crate::types::request::{EntityType, ResearchRequest};

/// 调研员 - 负责通过搜索与抓取工具收集原始调研发现
#[derive(Default)]
pub struct ResearcherRole;

impl RoleAgent for ResearcherRole {
    fn role_name(&self) -> &'static str {
        "researcher"
    }

    fn max_tool_turns(&self) -> usize {
        12
    }

    fn prompt(&self, request: &ResearchRequest) -> RolePrompt {
        // 公司与通用主题关注的调研维度不同
        let aspects = match request.entity_type {
            EntityType::Company => {
                r#"1. 公司背景、发展历程与主要产品/服务
2. 市场地位、竞争对手与市场份额
3. 财务表现与融资历史
4. SWOT分析（优势、劣势、机会、威胁）
5. 近期新闻、动态与战略举措
6. 未来展望与增长潜力"#
            }
            EntityType::Keyword => {
                r#"1. 主题背景与关键概念
2. 当前趋势与最新进展
3. 该领域的关键参与者与组织
4. 市场规模与增长预测
5. 挑战与机会
6. 未来预测与新兴趋势"#
            }
        };

        RolePrompt {
            system_prompt: r#"你是一名严谨的市场调研专员，擅长评估信息源可信度并从多个可靠来源挖掘深入信息。

你的任务是使用web_search与web_scrape工具，对给定的调研对象进行全面的原始信息收集：
先搜索获取信息源，再抓取关键网页做深入阅读，每条发现都要注明来源链接。"#
                .to_string(),

            opening_instruction: "请对以下调研对象进行全面的原始信息收集：".to_string(),

            closing_instruction: format!(
                r#"## 调研要求：
{}

- 至多引用 {} 个信息源，使用多个来源确保覆盖全面
- 每条发现注明来源
- 输出原始调研发现清单，不做归纳分析"#,
                aspects,
                request.depth.source_budget()
            ),

            call_mode: RoleCallMode::PromptWithTools,
        }
    }
}
