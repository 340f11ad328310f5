use async_trait::async_trait;
use chrono::Utc;
use std::time::Instant;

use crate::assistant::context::AssistantContext;
use crate::assistant::research::memory::{StageArtifacts, StageKeys};
use crate::assistant::research::roles::{
    AnalystRole, ParameterRefiner, ResearcherRole, VerifierRole, WriterRole,
};
use crate::assistant::role_agent::RoleAgent;
use crate::error::ResearchError;
use crate::types::report::ResearchReport;
use crate::types::request::ResearchRequest;

/// 研究阶段，固定顺序执行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResearchStage {
    /// 参数细化（可选，失败不致命）
    Refine,
    /// 原始信息收集
    Research,
    /// 分析提炼
    Analyze,
    /// 事实核验
    Verify,
    /// 报告撰写
    Write,
}

impl ResearchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchStage::Refine => "refine",
            ResearchStage::Research => "research",
            ResearchStage::Analyze => "analyze",
            ResearchStage::Verify => "verify",
            ResearchStage::Write => "write",
        }
    }
}

impl std::fmt::Display for ResearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 阶段执行器trait
///
/// 管线通过它调用委托的外部角色。真实实现把阶段映射到LLM角色；
/// 测试里用脚本化实现统计与模拟外部调用。
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn run_stage(
        &self,
        context: &AssistantContext,
        stage: ResearchStage,
        request: &ResearchRequest,
        material: &str,
    ) -> Result<String, ResearchError>;
}

/// 默认阶段执行器 - 把阶段映射到LLM角色
#[derive(Default)]
pub struct RoleStageExecutor;

#[async_trait]
impl StageExecutor for RoleStageExecutor {
    async fn run_stage(
        &self,
        context: &AssistantContext,
        stage: ResearchStage,
        request: &ResearchRequest,
        material: &str,
    ) -> Result<String, ResearchError> {
        let result = match stage {
            ResearchStage::Refine => ParameterRefiner
                .refine(context, request)
                .await
                .map(|refined| refined.as_material()),
            ResearchStage::Research => ResearcherRole.execute(context, request, material).await,
            ResearchStage::Analyze => AnalystRole.execute(context, request, material).await,
            ResearchStage::Verify => VerifierRole.execute(context, request, material).await,
            ResearchStage::Write => WriterRole.execute(context, request, material).await,
        };

        result.map_err(|e| ResearchError::external(stage.as_str(), e))
    }
}

/// 人工确认关卡
///
/// 核验阶段完成后可暂停等待确认，拒绝则本次研究中止且不写缓存。
pub trait ConfirmGate: Send + Sync {
    fn confirm(&self, verified_summary: &str) -> bool;
}

/// 研究管线
///
/// 固定顺序编排四个委托角色（调研 → 分析 → 核验 → 撰写），对缓存
/// 读穿透、写穿透。任一阶段失败即向上传播，不缓存部分结果。
pub struct ResearchPipeline {
    executor: Box<dyn StageExecutor>,
    confirm_gate: Option<Box<dyn ConfirmGate>>,
}

impl Default for ResearchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchPipeline {
    pub fn new() -> Self {
        Self {
            executor: Box::new(RoleStageExecutor),
            confirm_gate: None,
        }
    }

    /// 以指定执行器构造管线（测试用）
    pub fn with_executor(executor: Box<dyn StageExecutor>) -> Self {
        Self {
            executor,
            confirm_gate: None,
        }
    }

    pub fn with_confirm_gate(mut self, gate: Box<dyn ConfirmGate>) -> Self {
        self.confirm_gate = Some(gate);
        self
    }

    /// 执行研究请求
    ///
    /// 空主题在任何外部调用之前即以 `Validation` 失败；命中缓存时
    /// 立即返回，不触发任何委托调用。
    pub async fn run(
        &self,
        context: &AssistantContext,
        request: &ResearchRequest,
    ) -> Result<ResearchReport, ResearchError> {
        request.validate()?;

        // 缓存探测。存储错误按未命中降级，管线照常执行
        if !context.config.research.force_refresh {
            let probe = {
                let cache = context.cache_manager.read().await;
                cache.get(&request.topic, request.depth).await
            };
            match probe {
                Ok(Some(report)) => return Ok(report),
                Ok(None) => {}
                Err(e) => {
                    eprintln!("   ⚠️ 缓存读取失败，按未命中处理: {}", e);
                }
            }
        }

        println!("🚀 开始执行研究流程: {}", request.topic.trim());
        let started = Instant::now();

        // 参数细化是增强步骤，失败只降级不中断
        let refined_material = if context.config.research.refine_parameters {
            println!("🤖 执行 refine 阶段...");
            match self
                .executor
                .run_stage(context, ResearchStage::Refine, request, "")
                .await
            {
                Ok(refined) => {
                    context
                        .store_stage(StageKeys::REFINED, &refined)
                        .await
                        .ok();
                    refined
                }
                Err(e) => {
                    eprintln!("   ⚠️ 参数细化失败，使用原始请求继续: {}", e);
                    String::new()
                }
            }
        } else {
            String::new()
        };

        let raw_findings = self
            .execute_stage(context, ResearchStage::Research, request, &refined_material)
            .await?;
        context
            .store_stage(StageKeys::RAW, &raw_findings)
            .await
            .ok();

        let analysis = self
            .execute_stage(context, ResearchStage::Analyze, request, &raw_findings)
            .await?;
        context
            .store_stage(StageKeys::ANALYSIS, &analysis)
            .await
            .ok();

        let verify_material = format!(
            "### 原始调研发现\n{}\n\n### 分析结论\n{}",
            raw_findings, analysis
        );
        let verified = self
            .execute_stage(context, ResearchStage::Verify, request, &verify_material)
            .await?;
        context
            .store_stage(StageKeys::VERIFIED, &verified)
            .await
            .ok();

        // 可选的人工确认关卡
        if let Some(gate) = &self.confirm_gate
            && !gate.confirm(&verified)
        {
            return Err(ResearchError::Validation(
                "research cancelled at the verification checkpoint".to_string(),
            ));
        }

        let final_markdown = self
            .execute_stage(context, ResearchStage::Write, request, &verified)
            .await?;
        context
            .store_stage(StageKeys::FINAL, &final_markdown)
            .await
            .ok();

        let report = ResearchReport {
            research_id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
            sections: ResearchReport::sections_from_markdown(&final_markdown),
            raw_findings,
            analysis,
            verified,
            final_markdown,
            generated_at: Utc::now(),
            source_request: request.clone(),
            model: context.llm_client.model_name().to_string(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
        };

        // 写缓存失败只记录，不影响本次结果返回
        {
            let cache = context.cache_manager.read().await;
            if let Err(e) = cache.put(&report).await {
                eprintln!("   ⚠️ 缓存写入失败: {}", e);
            }
        }

        println!(
            "✓ 研究流程执行完毕，耗时 {:.2} 秒",
            report.elapsed_seconds
        );
        Ok(report)
    }

    /// 执行单个必需阶段
    async fn execute_stage(
        &self,
        context: &AssistantContext,
        stage: ResearchStage,
        request: &ResearchRequest,
        material: &str,
    ) -> Result<String, ResearchError> {
        println!("🤖 执行 {} 阶段...", stage);
        let result = self
            .executor
            .run_stage(context, stage, request, material)
            .await?;
        println!("✓ {} 阶段完成", stage);
        Ok(result)
    }
}
