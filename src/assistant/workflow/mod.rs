use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::assistant::context::AssistantContext;
use crate::assistant::dialog::{
    DialogContext, DialogManager, FeedbackKind, Intent, SystemCommand,
};
use crate::assistant::research::memory::MemoryScope;
use crate::assistant::research::pipeline::{ConfirmGate, ResearchPipeline};
use crate::assistant::research::roles::ConversationalistRole;
use crate::assistant::role_agent::RoleAgent;
use crate::config::Config;
use crate::error::ResearchError;
use crate::types::report::ResearchReport;
use crate::types::request::ResearchRequest;
use crate::voice::VoiceProcessor;

/// 控制台人工确认关卡，核验完成后阻塞等待y/n输入
struct ConsoleConfirmGate;

impl ConfirmGate for ConsoleConfirmGate {
    fn confirm(&self, verified_summary: &str) -> bool {
        println!("\n📋 核验结论预览:\n{}\n", preview(verified_summary, 600));
        print!("是否继续生成最终报告? [y/N] ");
        use std::io::Write;
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// 启动交互式会话工作流
pub async fn launch(config: &Config) -> Result<()> {
    let context = AssistantContext::new(config.clone())?;
    warn_missing_keys(config);

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    let dialog_manager = DialogManager::new(config.research.clone());
    let mut dialog_context = DialogContext::new();
    let voice = VoiceProcessor::new(config);

    let pipeline = build_pipeline(config);

    let greeting = "Hello! I'm Scout, your market research assistant. I can help with in-depth research on companies, markets, industries, and trends. What would you like to research today?";
    println!("\n{}", greeting);
    dialog_context.add_assistant(greeting);
    speak(&voice, config, greeting).await;

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        let utterance = match read_utterance(&voice, config, &mut lines).await? {
            Some(utterance) => utterance,
            None => break,
        };
        if utterance.trim().is_empty() {
            continue;
        }

        dialog_context.add_user(&utterance);

        let intent = dialog_manager
            .classify_or_fallback(&context, &utterance, &dialog_context)
            .await;

        match intent {
            Intent::Command(SystemCommand::Quit) => {
                let farewell = "Goodbye! Feel free to come back whenever you need more research.";
                respond(&mut dialog_context, &voice, config, farewell).await;
                break;
            }
            Intent::Command(SystemCommand::Reset) => {
                dialog_context.reset();
                context.clear_memory_scope(MemoryScope::RESEARCH).await;
                respond(
                    &mut dialog_context,
                    &voice,
                    config,
                    "I've reset our conversation. How can I help you today?",
                )
                .await;
            }
            Intent::Command(SystemCommand::Help) => {
                respond(&mut dialog_context, &voice, config, HELP_MESSAGE).await;
            }
            Intent::Greeting => {
                let reply = if dialog_context.turns.len() <= 2 {
                    greeting
                } else {
                    "Hello again! How can I help with your market research today?"
                };
                respond(&mut dialog_context, &voice, config, reply).await;
            }
            Intent::NewResearch(request) => {
                handle_research(
                    &context,
                    &pipeline,
                    &mut dialog_context,
                    &voice,
                    config,
                    request,
                )
                .await;
            }
            Intent::FollowUp { question, topic } => {
                handle_followup(
                    &context,
                    &mut dialog_context,
                    &voice,
                    config,
                    &question,
                    &topic,
                )
                .await;
            }
            Intent::Feedback(FeedbackKind::Accept) => {
                respond(
                    &mut dialog_context,
                    &voice,
                    config,
                    "Thank you for the positive feedback! Is there anything else you'd like to know?",
                )
                .await;
            }
            Intent::Feedback(FeedbackKind::Reject) => {
                respond(
                    &mut dialog_context,
                    &voice,
                    config,
                    "I appreciate your feedback. What specific information would be more helpful for you?",
                )
                .await;
            }
            Intent::SmallTalk => {
                respond(
                    &mut dialog_context,
                    &voice,
                    config,
                    "I'm here to help with market research. Would you like me to research a specific topic or company for you?",
                )
                .await;
            }
            Intent::Unknown => {
                let reply = match &dialog_context.current_topic {
                    Some(topic) => format!(
                        "I see we were discussing {}. Would you like me to research a specific aspect of it, or explore something else?",
                        topic
                    ),
                    None => "I'm not quite sure what you're asking. I can research companies, industries, or trends - could you tell me more about what you'd like to know?".to_string(),
                };
                respond(&mut dialog_context, &voice, config, &reply).await;
            }
        }
    }

    print_session_stats(&context).await;
    Ok(())
}

/// 一次性研究模式：执行单个请求并打印报告
pub async fn run_once(config: &Config, request: ResearchRequest) -> Result<()> {
    let context = AssistantContext::new(config.clone())?;
    warn_missing_keys(config);

    context.llm_client.check_connection().await?;

    let pipeline = build_pipeline(config);
    match pipeline.run(&context, &request).await {
        Ok(report) => {
            println!("\n{}", render_report(&report));
            print_session_stats(&context).await;
            Ok(())
        }
        Err(e) => {
            print_session_stats(&context).await;
            Err(e.into())
        }
    }
}

/// 处理新研究请求
async fn handle_research(
    context: &AssistantContext,
    pipeline: &ResearchPipeline,
    dialog_context: &mut DialogContext,
    voice: &VoiceProcessor,
    config: &Config,
    request: ResearchRequest,
) {
    let acknowledgement = format!(
        "On it - researching \"{}\" at {} depth. This may take a little while.",
        request.topic.trim(),
        request.depth
    );
    respond(dialog_context, voice, config, &acknowledgement).await;

    match pipeline.run(context, &request).await {
        Ok(report) => {
            let rendered = render_report(&report);
            println!("\n{}", rendered);
            dialog_context.add_assistant_with_report(rendered, report.clone());
            speak(voice, config, &report.summary_text(2)).await;
        }
        Err(ResearchError::Validation(message)) => {
            let reply = format!(
                "I couldn't start that research: {}. Could you rephrase your request?",
                message
            );
            respond(dialog_context, voice, config, &reply).await;
        }
        Err(e) => {
            let reply = format!(
                "I ran into a problem while researching: {}. Please try again in a moment.",
                e
            );
            respond(dialog_context, voice, config, &reply).await;
        }
    }
}

/// 处理针对最近报告的追问
async fn handle_followup(
    context: &AssistantContext,
    dialog_context: &mut DialogContext,
    voice: &VoiceProcessor,
    config: &Config,
    question: &str,
    topic: &str,
) {
    let Some(report) = &dialog_context.last_report else {
        respond(
            dialog_context,
            voice,
            config,
            "I don't have a report to refer back to yet - ask me to research a topic first.",
        )
        .await;
        return;
    };

    let material = format!(
        "### 最近的研究报告（主题: {}）\n{}\n\n### 用户追问\n{}",
        topic, report.final_markdown, question
    );

    let request = report.source_request.clone();
    match ConversationalistRole
        .execute(context, &request, &material)
        .await
    {
        Ok(answer) => {
            respond(dialog_context, voice, config, &answer).await;
        }
        Err(e) => {
            eprintln!("   ❌ 追问回答生成失败: {}", e);
            respond(
                dialog_context,
                voice,
                config,
                "That's a good follow-up question, but I couldn't reach the research service just now. Please try again.",
            )
            .await;
        }
    }
}

/// 渲染报告为终端输出
pub fn render_report(report: &ResearchReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "📊 Research report: {} (depth: {}, model: {})\n",
        report.source_request.topic.trim(),
        report.source_request.depth,
        report.model
    ));

    for section in &report.sections {
        out.push_str(&format!("\n## {}\n", section.title));
        for bullet in &section.bullets {
            out.push_str(&format!("  • {}\n", bullet));
        }
    }

    out.push_str(&format!(
        "\n(generated at {}, {:.1}s)\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.elapsed_seconds
    ));
    out
}

fn build_pipeline(config: &Config) -> ResearchPipeline {
    if config.research.confirm_verification {
        ResearchPipeline::new().with_confirm_gate(Box::new(ConsoleConfirmGate))
    } else {
        ResearchPipeline::new()
    }
}

/// 读取下一条用户输入：语音采集模式优先，失败降级为文本
async fn read_utterance(
    voice: &VoiceProcessor,
    config: &Config,
    lines: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
) -> Result<Option<String>> {
    if config.voice.capture_input {
        match voice.listen().await {
            Ok(Some(transcribed)) => {
                println!("You (voice)> {}", transcribed);
                return Ok(Some(transcribed));
            }
            Ok(None) => {
                println!("   ⌛ 未检测到语音，回退为文本输入");
            }
            Err(e) => {
                eprintln!("   ❌ 语音输入失败，回退为文本输入: {}", e);
            }
        }
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"You> ").await?;
    stdout.flush().await?;

    Ok(lines.next_line().await?)
}

/// 输出助手回复并按配置朗读
async fn respond(
    dialog_context: &mut DialogContext,
    voice: &VoiceProcessor,
    config: &Config,
    text: &str,
) {
    println!("\nScout> {}\n", text);
    dialog_context.add_assistant(text);
    speak(voice, config, text).await;
}

async fn speak(voice: &VoiceProcessor, config: &Config, text: &str) {
    if !config.voice.enabled {
        return;
    }
    if let Err(e) = voice.speak(text).await {
        eprintln!("   ❌ 语音播报失败: {}", e);
    }
}

async fn print_session_stats(context: &AssistantContext) {
    let cache = context.cache_manager.read().await;
    println!("   📈 {}", cache.stats_snapshot().summary_line());
}

fn warn_missing_keys(config: &Config) {
    let missing = config.validate_keys();
    if !missing.is_empty() {
        eprintln!("⚠️ 缺少API KEY: {}，部分功能可能不可用", missing.join(", "));
    }
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let truncated: String = text.chars().take(limit).collect();
    format!("{}...", truncated)
}

const HELP_MESSAGE: &str = r#"I'm Scout, an AI market research assistant. Here's what I can do:

- Research topics: ask me to research any market, industry, technology, or company
- Answer follow-ups: ask clarifying questions about any research I provide
- Voice interaction: enable voice mode to hear my responses

To get started, try something like:
- "Research the electric vehicle market in Europe"
- "Tell me about emerging fintech trends"
- "What's the market size for plant-based meat alternatives?"

You can reset our conversation anytime by saying "reset", or leave with "quit"."#;

// Include tests
#[cfg(test)]
mod tests;
