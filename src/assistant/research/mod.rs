// 委托式研究管线
// 固定顺序的四个委托角色，对应一次完整的市场研究：
// researcher 原始信息收集（带搜索与抓取工具） = 请求 + 细化参数
// analyst    趋势与洞察提炼 = researcher产物
// verifier   事实核验（带搜索工具，可选人工确认） = researcher + analyst产物
// writer     结构化报告撰写 = verifier产物

use crate::assistant::context::AssistantContext;
use crate::error::ResearchError;
use crate::types::report::ResearchReport;
use crate::types::request::ResearchRequest;

pub mod memory;
pub mod pipeline;
pub mod roles;

pub use pipeline::{ConfirmGate, ResearchPipeline, ResearchStage, StageExecutor};

/// 执行一次研究请求（默认管线，无人工确认关卡）
pub async fn execute(
    context: &AssistantContext,
    request: &ResearchRequest,
) -> Result<ResearchReport, ResearchError> {
    ResearchPipeline::new().run(context, request).await
}

// Include tests
#[cfg(test)]
mod tests;
