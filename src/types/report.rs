use chrono::{DateTime, Utc};
use markdown::mdast::Node;
use serde::{Deserialize, Serialize};

use crate::types::request::ResearchRequest;

/// 报告章节，标题加有序要点列表
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub bullets: Vec<String>,
}

/// 研究报告，管线成功完成后创建一次，之后不可变
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResearchReport {
    /// 本次研究的短标识
    pub research_id: String,

    /// 结构化章节，从最终撰写稿中提取
    pub sections: Vec<ReportSection>,

    /// 原始调研发现
    pub raw_findings: String,

    /// 分析结论
    pub analysis: String,

    /// 核验结论
    pub verified: String,

    /// 最终撰写稿（Markdown）
    pub final_markdown: String,

    /// 生成时间
    pub generated_at: DateTime<Utc>,

    /// 产生本报告的请求
    pub source_request: ResearchRequest,

    /// 使用的模型
    pub model: String,

    /// 管线耗时（秒）
    pub elapsed_seconds: f64,
}

impl ResearchReport {
    /// 从最终撰写稿的Markdown中提取结构化章节
    ///
    /// 一级标题视为报告题目跳过，二级标题开启新章节，三级标题作为
    /// 加粗要点并入当前章节，列表项与段落逐条成为要点。首个标题之前
    /// 的内容归入"overview"章节。解析失败时整篇按行降级为单章节。
    pub fn sections_from_markdown(markdown_text: &str) -> Vec<ReportSection> {
        let Ok(root) = markdown::to_mdast(markdown_text, &markdown::ParseOptions::default()) else {
            return fallback_sections(markdown_text);
        };
        let Some(children) = root.children() else {
            return fallback_sections(markdown_text);
        };

        let mut sections: Vec<ReportSection> = Vec::new();
        let mut current = ReportSection {
            title: "overview".to_string(),
            bullets: Vec::new(),
        };

        for node in children {
            match node {
                Node::Heading(heading) if heading.depth == 1 => {
                    // 跳过报告题目
                }
                Node::Heading(heading) if heading.depth == 2 => {
                    if !current.bullets.is_empty() {
                        sections.push(current);
                    }
                    current = ReportSection {
                        title: inline_text(node).to_lowercase(),
                        bullets: Vec::new(),
                    };
                }
                Node::Heading(_) => {
                    // 三级及更深的标题并入当前章节
                    current.bullets.push(format!("**{}**", inline_text(node)));
                }
                Node::List(list) => {
                    for item in &list.children {
                        let text = inline_text(item);
                        if !text.is_empty() {
                            current.bullets.push(text);
                        }
                    }
                }
                _ => {
                    let text = inline_text(node);
                    if !text.is_empty() {
                        current.bullets.push(text);
                    }
                }
            }
        }

        if !current.bullets.is_empty() {
            sections.push(current);
        }
        sections
    }

    /// 面向语音播报与会话展示的摘要文本
    pub fn summary_text(&self, max_sections: usize) -> String {
        let mut lines = vec![format!("Research summary for {}.", self.source_request.topic)];
        for section in self.sections.iter().take(max_sections) {
            lines.push(format!("{}:", section.title));
            for bullet in section.bullets.iter().take(3) {
                lines.push(bullet.clone());
            }
        }
        lines.join("\n")
    }
}

/// 收集节点内的纯文本（含行内代码），用于标题与要点提取
fn inline_text(node: &Node) -> String {
    let mut collected = String::new();
    collect_text(node, &mut collected);
    collected.trim().to_string()
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    collect_text(child, out);
                    if matches!(child, Node::Paragraph(_)) {
                        out.push(' ');
                    }
                }
            }
        }
    }
}

fn fallback_sections(markdown_text: &str) -> Vec<ReportSection> {
    let bullets: Vec<String> = markdown_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if bullets.is_empty() {
        return Vec::new();
    }
    vec![ReportSection {
        title: "overview".to_string(),
        bullets,
    }]
}

// Include tests
#[cfg(test)]
mod tests;
