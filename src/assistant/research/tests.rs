#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::assistant::context::AssistantContext;
    use crate::assistant::research::pipeline::{
        ConfirmGate, ResearchPipeline, ResearchStage, StageExecutor,
    };
    use crate::config::Config;
    use crate::error::ResearchError;
    use crate::types::request::{Depth, ResearchRequest};

    /// 脚本化阶段执行器，统计外部调用次数并可注入指定阶段失败
    struct ScriptedExecutor {
        calls: Arc<AtomicUsize>,
        fail_at: Option<ResearchStage>,
    }

    impl ScriptedExecutor {
        fn new(calls: Arc<AtomicUsize>) -> Self {
            Self {
                calls,
                fail_at: None,
            }
        }

        fn failing_at(calls: Arc<AtomicUsize>, stage: ResearchStage) -> Self {
            Self {
                calls,
                fail_at: Some(stage),
            }
        }
    }

    #[async_trait]
    impl StageExecutor for ScriptedExecutor {
        async fn run_stage(
            &self,
            _context: &AssistantContext,
            stage: ResearchStage,
            request: &ResearchRequest,
            _material: &str,
        ) -> Result<String, ResearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_at == Some(stage) {
                return Err(ResearchError::external(stage.as_str(), "scripted failure"));
            }

            Ok(match stage {
                ResearchStage::Refine => format!("refined parameters for {}", request.topic),
                ResearchStage::Research => "raw findings".to_string(),
                ResearchStage::Analyze => "analysis".to_string(),
                ResearchStage::Verify => "verified claims".to_string(),
                ResearchStage::Write => {
                    "# Report\n\n## Findings\n\n- a verified finding\n".to_string()
                }
            })
        }
    }

    struct RejectingGate;

    impl ConfirmGate for RejectingGate {
        fn confirm(&self, _verified_summary: &str) -> bool {
            false
        }
    }

    fn test_context(temp_dir: &TempDir) -> AssistantContext {
        let mut config = Config::default();
        config.data_path = temp_dir.path().to_path_buf();
        config.cache.cache_dir = temp_dir.path().join("cache");
        // 测试用脚本化执行器，细化阶段也计入调用数
        config.research.refine_parameters = true;

        AssistantContext::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_cold_cache_runs_all_stages_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));
        let request = ResearchRequest::new("electric vehicles").with_depth(Depth::Standard);

        let report = pipeline.run(&context, &request).await.unwrap();

        // refine + research + analyze + verify + write
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(report.source_request, request);
        assert_eq!(report.raw_findings, "raw findings");
        assert!(!report.sections.is_empty());

        // 第二次相同请求完全由缓存提供，不再有外部调用
        let second = pipeline.run(&context, &request).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(second, report);
    }

    #[tokio::test]
    async fn test_normalized_topic_hits_same_cache_entry() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));

        pipeline
            .run(&context, &ResearchRequest::new("Fintech"))
            .await
            .unwrap();
        let after_first = calls.load(Ordering::SeqCst);

        pipeline
            .run(&context, &ResearchRequest::new("  fintech "))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), after_first);
    }

    #[tokio::test]
    async fn test_different_depth_reruns_pipeline() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));

        pipeline
            .run(&context, &ResearchRequest::new("fintech").with_depth(Depth::Basic))
            .await
            .unwrap();
        let after_first = calls.load(Ordering::SeqCst);

        pipeline
            .run(
                &context,
                &ResearchRequest::new("fintech").with_depth(Depth::Detailed),
            )
            .await
            .unwrap();

        assert!(calls.load(Ordering::SeqCst) > after_first);
    }

    #[tokio::test]
    async fn test_empty_topic_fails_before_any_external_call() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));

        let result = pipeline.run(&context, &ResearchRequest::new("   ")).await;

        assert!(matches!(result, Err(ResearchError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stage_failure_propagates_and_nothing_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = ScriptedExecutor::failing_at(calls.clone(), ResearchStage::Verify);
        let pipeline = ResearchPipeline::with_executor(Box::new(failing));
        let request = ResearchRequest::new("cloud storage");

        let result = pipeline.run(&context, &request).await;
        assert!(matches!(
            result,
            Err(ResearchError::ExternalService { .. })
        ));

        // 失败后不落缓存：后续相同请求重新走完整管线
        let calls_after_failure = calls.load(Ordering::SeqCst);
        let retry_pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));
        retry_pipeline.run(&context, &request).await.unwrap();

        assert!(calls.load(Ordering::SeqCst) > calls_after_failure);
    }

    #[tokio::test]
    async fn test_refine_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = ScriptedExecutor::failing_at(calls.clone(), ResearchStage::Refine);
        let pipeline = ResearchPipeline::with_executor(Box::new(failing));

        let report = pipeline
            .run(&context, &ResearchRequest::new("plant based meat"))
            .await
            .unwrap();

        assert_eq!(report.raw_findings, "raw findings");
    }

    #[tokio::test]
    async fn test_confirm_gate_rejection_aborts_without_caching() {
        let temp_dir = TempDir::new().unwrap();
        let context = test_context(&temp_dir);
        let calls = Arc::new(AtomicUsize::new(0));

        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())))
                .with_confirm_gate(Box::new(RejectingGate));
        let request = ResearchRequest::new("quantum computing");

        let result = pipeline.run(&context, &request).await;
        assert!(result.is_err());

        // 中止后没有缓存条目，重新请求会再次执行管线
        let calls_after_abort = calls.load(Ordering::SeqCst);
        let retry_pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));
        retry_pipeline.run(&context, &request).await.unwrap();

        assert!(calls.load(Ordering::SeqCst) > calls_after_abort);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache_probe() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_path = temp_dir.path().to_path_buf();
        config.cache.cache_dir = temp_dir.path().join("cache");
        config.research.force_refresh = true;
        let context = AssistantContext::new(config).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline =
            ResearchPipeline::with_executor(Box::new(ScriptedExecutor::new(calls.clone())));
        let request = ResearchRequest::new("fintech");

        pipeline.run(&context, &request).await.unwrap();
        let after_first = calls.load(Ordering::SeqCst);

        pipeline.run(&context, &request).await.unwrap();
        assert!(calls.load(Ordering::SeqCst) > after_first);
    }
}
