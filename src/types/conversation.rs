use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::report::ResearchReport;

/// 会话角色
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// 会话轮次。会话期内只追加，不修改
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub attached_report: Option<ResearchReport>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            attached_report: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            attached_report: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant_with_report(text: impl Into<String>, report: ResearchReport) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            attached_report: Some(report),
            timestamp: Utc::now(),
        }
    }
}
