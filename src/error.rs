//! 助手统一错误类型

/// 研究助手的错误分类
///
/// 所有交互级错误最终归入这三类，任何一类都不会导致进程退出，
/// 每次会话交互独立失败。
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// 请求参数无效（如空的研究主题），提示用户修正后重试
    #[error("请求参数无效: {0}")]
    Validation(String),

    /// 委托的外部服务调用失败（网络、限流、鉴权等）
    #[error("外部服务调用失败 [{stage}]: {message}")]
    ExternalService { stage: String, message: String },

    /// 缓存存储读写失败，调用方按缓存未命中降级处理
    #[error("缓存存储错误: {0}")]
    CacheIo(String),
}

impl ResearchError {
    /// 构造外部服务错误
    pub fn external(stage: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ResearchError::ExternalService {
            stage: stage.into(),
            message: err.to_string(),
        }
    }

    /// 构造缓存错误
    pub fn cache(err: impl std::fmt::Display) -> Self {
        ResearchError::CacheIo(err.to_string())
    }
}
