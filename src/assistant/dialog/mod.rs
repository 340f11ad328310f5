use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::assistant::context::AssistantContext;
use crate::config::ResearchConfig;
use crate::types::conversation::ConversationTurn;
use crate::types::report::ResearchReport;
use crate::types::request::{Depth, EntityType, ResearchRequest};

/// 系统指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Reset,
    Help,
    Quit,
}

/// 反馈倾向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Accept,
    Reject,
}

/// 用户意图
///
/// 规则按固定顺序匹配，先命中者胜。除"最近一份报告"外对话管理不
/// 保存其它状态机。
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Command(SystemCommand),
    Greeting,
    NewResearch(ResearchRequest),
    FollowUp { question: String, topic: String },
    Feedback(FeedbackKind),
    SmallTalk,
    Unknown,
}

/// 会话上下文
///
/// 会话期内只追加的轮次序列，外加用于解析追问指代的最近主题与
/// 最近报告。
#[derive(Debug, Default)]
pub struct DialogContext {
    pub session_id: String,
    pub turns: Vec<ConversationTurn>,
    pub current_topic: Option<String>,
    pub last_report: Option<ResearchReport>,
}

impl DialogContext {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    pub fn add_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::user(text));
    }

    pub fn add_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::assistant(text));
    }

    pub fn add_assistant_with_report(&mut self, text: impl Into<String>, report: ResearchReport) {
        self.current_topic = Some(report.source_request.topic.clone());
        self.last_report = Some(report.clone());
        self.turns
            .push(ConversationTurn::assistant_with_report(text, report));
    }

    /// 重置会话但保留会话ID
    pub fn reset(&mut self) {
        let session_id = std::mem::take(&mut self.session_id);
        *self = Self {
            session_id,
            ..Default::default()
        };
    }

    /// 最近n轮的格式化历史，供LLM分类兜底使用
    pub fn formatted_history(&self, n: usize) -> String {
        self.turns
            .iter()
            .rev()
            .take(n)
            .rev()
            .map(|turn| {
                let prefix = match turn.role {
                    crate::types::conversation::Role::User => "User",
                    crate::types::conversation::Role::Assistant => "Assistant",
                };
                format!("{}: {}", prefix, turn.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 研究请求类关键词，命中即判定为新研究意图
const RESEARCH_KEYWORDS: &[&str] = &[
    "research",
    "find out about",
    "look up",
    "search for",
    "investigate",
    "analyze",
    "study",
    "tell me about",
    "what is",
    "who is",
    "report on",
    "market for",
];

/// 追问类关键词，仅在存在当前主题时生效
const FOLLOWUP_KEYWORDS: &[&str] = &[
    "more about",
    "tell me more",
    "expand on",
    "elaborate",
    "details",
    "additional info",
    "what about",
    "how about",
    "why",
    "how",
    "when",
];

const POSITIVE_FEEDBACK: &[&str] = &["good job", "well done", "thanks", "thank you", "helpful"];
const NEGATIVE_FEEDBACK: &[&str] = &["not helpful", "useless", "wrong", "incorrect"];

static RE_TIMEFRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:past|last|over the past)\s+(\d+\s+(?:years?|months?))").expect("static regex")
});

static RE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bin\s+(Europe|Asia|Africa|China|Japan|India|the US|the UK|North America|South America|Latin America|Australia)\b")
        .expect("static regex")
});

/// LLM分类兜底的提取结果
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IntentExtraction {
    /// 意图类别: research_request / followup_question / user_feedback / small_talk / unknown
    pub intent_type: String,
    /// 研究主题（research_request时）
    pub topic: Option<String>,
    /// 追问内容（followup_question时）
    pub question: Option<String>,
    /// 分类置信度 0.0-1.0
    pub confidence: f64,
}

/// 对话管理器 - 规则优先的意图识别与参数提取
pub struct DialogManager {
    research_defaults: ResearchConfig,
}

impl DialogManager {
    pub fn new(research_defaults: ResearchConfig) -> Self {
        Self { research_defaults }
    }

    /// 基于关键词规则分类意图，规则按声明顺序逐条尝试
    pub fn classify(&self, utterance: &str, context: &DialogContext) -> Intent {
        let message = utterance.trim();
        let lowered = message.to_lowercase();

        if message.is_empty() {
            return Intent::Unknown;
        }

        // 1. 系统指令
        if ["quit", "exit", "bye", "goodbye"].contains(&lowered.as_str()) {
            return Intent::Command(SystemCommand::Quit);
        }
        if ["reset", "start over", "clear", "new conversation"]
            .iter()
            .any(|kw| lowered == *kw)
        {
            return Intent::Command(SystemCommand::Reset);
        }
        if lowered == "help"
            || lowered.contains("how does this work")
            || lowered.contains("what can you do")
        {
            return Intent::Command(SystemCommand::Help);
        }

        // 2. 问候：短句且包含问候词
        if lowered.split_whitespace().count() <= 3
            && ["hi", "hello", "hey", "greetings", "howdy"]
                .iter()
                .any(|kw| lowered.split_whitespace().any(|word| word == *kw))
        {
            return Intent::Greeting;
        }

        // 3. 新研究请求
        if let Some(keyword) = RESEARCH_KEYWORDS.iter().find(|kw| lowered.contains(*kw)) {
            return Intent::NewResearch(self.extract_request(message, &lowered, keyword));
        }

        // 4. 追问：需要已有当前主题
        if let Some(topic) = &context.current_topic {
            let matches_followup = FOLLOWUP_KEYWORDS
                .iter()
                .any(|kw| lowered.contains(*kw))
                || lowered.ends_with('?');
            if matches_followup {
                return Intent::FollowUp {
                    question: message.to_string(),
                    topic: topic.clone(),
                };
            }
        }

        // 5. 反馈
        if NEGATIVE_FEEDBACK.iter().any(|kw| lowered.contains(*kw)) {
            return Intent::Feedback(FeedbackKind::Reject);
        }
        if POSITIVE_FEEDBACK.iter().any(|kw| lowered.contains(*kw)) {
            return Intent::Feedback(FeedbackKind::Accept);
        }

        // 6. 短句视为闲聊
        if lowered.split_whitespace().count() <= 5 {
            return Intent::SmallTalk;
        }

        // 7. 有当前主题时，长句兜底视为追问
        if let Some(topic) = &context.current_topic {
            return Intent::FollowUp {
                question: message.to_string(),
                topic: topic.clone(),
            };
        }

        Intent::Unknown
    }

    /// 分类并在规则无法判定时用LLM兜底
    ///
    /// 兜底提取失败只降级为 `Unknown`，从不向调用方返回错误。
    pub async fn classify_or_fallback(
        &self,
        assistant: &AssistantContext,
        utterance: &str,
        context: &DialogContext,
    ) -> Intent {
        let intent = self.classify(utterance, context);
        if intent != Intent::Unknown {
            return intent;
        }

        match self.classify_with_llm(assistant, utterance, context).await {
            Some(resolved) => resolved,
            None => Intent::Unknown,
        }
    }

    /// LLM意图分类兜底
    async fn classify_with_llm(
        &self,
        assistant: &AssistantContext,
        utterance: &str,
        context: &DialogContext,
    ) -> Option<Intent> {
        let system_prompt = r#"你是一名对话管理专员，负责识别用户消息的意图。

把意图归入以下类别之一：
- research_request: 请求对某个主题或公司做研究
- followup_question: 针对当前主题的追问
- user_feedback: 对助手回答的反馈
- small_talk: 不需要具体信息的寒暄
- unknown: 无法判定

research_request需提取主题，followup_question需提取具体问题。"#;

        let user_prompt = format!(
            "用户消息: \"{}\"\n\n最近对话历史:\n{}\n\n当前主题: {}",
            utterance,
            context.formatted_history(3),
            context.current_topic.as_deref().unwrap_or("None")
        );

        let extraction: IntentExtraction = match assistant
            .llm_client
            .extract(system_prompt, &user_prompt)
            .await
        {
            Ok(extraction) => extraction,
            Err(e) => {
                eprintln!("   ⚠️ LLM意图分类失败，按未知意图处理: {}", e);
                return None;
            }
        };

        match extraction.intent_type.as_str() {
            "research_request" => {
                let topic = extraction.topic.unwrap_or_else(|| utterance.to_string());
                Some(Intent::NewResearch(self.request_with_defaults(topic)))
            }
            "followup_question" => context.current_topic.as_ref().map(|topic| Intent::FollowUp {
                question: extraction
                    .question
                    .unwrap_or_else(|| utterance.to_string()),
                topic: topic.clone(),
            }),
            "user_feedback" => Some(Intent::Feedback(FeedbackKind::Accept)),
            "small_talk" => Some(Intent::SmallTalk),
            _ => None,
        }
    }

    /// 从命中研究关键词的消息中提取请求参数
    fn extract_request(&self, message: &str, lowered: &str, keyword: &str) -> ResearchRequest {
        // 深度：措辞里的强弱信号覆盖默认档位
        let depth = if ["in depth", "detailed", "deep dive", "comprehensive", "thorough"]
            .iter()
            .any(|kw| lowered.contains(kw))
        {
            Depth::Detailed
        } else if ["briefly", "quick", "short overview", "at a glance"]
            .iter()
            .any(|kw| lowered.contains(kw))
        {
            Depth::Basic
        } else {
            self.research_defaults.default_depth
        };

        let timeframe = RE_TIMEFRAME
            .captures(lowered)
            .map(|captures| captures[1].to_string());

        let location = RE_LOCATION
            .captures(message)
            .map(|captures| captures[1].to_string());

        let entity_type = if ["company", "inc.", "corp", "startup"]
            .iter()
            .any(|kw| lowered.contains(kw))
        {
            EntityType::Company
        } else {
            EntityType::Keyword
        };

        ResearchRequest {
            topic: strip_keyword(message, keyword),
            depth,
            location,
            timeframe,
            entity_type,
        }
    }

    fn request_with_defaults(&self, topic: String) -> ResearchRequest {
        ResearchRequest {
            topic,
            depth: self.research_defaults.default_depth,
            location: None,
            timeframe: None,
            entity_type: EntityType::Keyword,
        }
    }
}

/// 去掉命中的研究关键词与引导性填充词，剩余部分作为主题
fn strip_keyword(message: &str, keyword: &str) -> String {
    let lowered = message.to_lowercase();
    let mut topic = match lowered.find(keyword) {
        // 小写化可能改变字节偏移（非ASCII），越界时放弃裁剪
        Some(start) => match (
            message.get(..start),
            message.get(start + keyword.len()..),
        ) {
            (Some(before), Some(after)) => format!("{} {}", before.trim(), after.trim()),
            _ => message.to_string(),
        },
        None => message.to_string(),
    };

    topic = topic.trim().trim_end_matches(['?', '.', '!']).to_string();

    for filler in ["on ", "about ", "into ", "the "] {
        if topic.to_lowercase().starts_with(filler) {
            topic = topic[filler.len()..].to_string();
        }
    }

    topic.trim().to_string()
}
