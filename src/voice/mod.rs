//! 语音适配器 - 封装第三方语音API的可选输入输出层
//!
//! 转写走OpenAI Whisper接口，合成走ElevenLabs接口。录音与播放
//! 委托给系统命令并阻塞到结束，与整体的同步交互模型一致。

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::error::ResearchError;

const TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
const ELEVENLABS_ENDPOINT: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// 单段合成文本的长度上限，超出按句子切分
const TTS_CHUNK_LIMIT: usize = 500;

/// 语音处理器
pub struct VoiceProcessor {
    config: crate::config::VoiceConfig,
    /// Whisper转写复用LLM的API KEY
    openai_api_key: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl VoiceProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.voice.clone(),
            openai_api_key: config.llm.api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// 录音并转写一句话
    ///
    /// 静默超时返回 `Ok(None)`，录音设备或转写服务失败返回错误，
    /// 调用方降级为文本输入。
    pub async fn listen(&self) -> Result<Option<String>, ResearchError> {
        let audio_path = temp_audio_path("wav");

        let recorded = self.record(&audio_path)?;
        if !recorded {
            return Ok(None);
        }

        let transcribed = self.transcribe(&audio_path).await;
        let _ = std::fs::remove_file(&audio_path);

        let text = transcribed?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    /// 转写音频文件为文本
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, ResearchError> {
        if self.openai_api_key.is_empty() {
            return Err(ResearchError::external(
                "voice",
                "OPENAI_API_KEY 未配置，无法执行语音转写",
            ));
        }

        let audio_bytes = std::fs::read(audio_path)
            .map_err(|e| ResearchError::external("voice", format!("读取录音文件失败: {}", e)))?;

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "speech.wav".to_string());

        let form = reqwest::multipart::Form::new()
            .text("model", self.config.stt_model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio_bytes).file_name(file_name),
            );

        let response = self
            .http
            .post(TRANSCRIPTION_ENDPOINT)
            .bearer_auth(&self.openai_api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ResearchError::external("voice", e))?
            .error_for_status()
            .map_err(|e| ResearchError::external("voice", e))?
            .json::<TranscriptionResponse>()
            .await
            .map_err(|e| ResearchError::external("voice", e))?;

        println!("   🎤 转写完成: {}", response.text);
        Ok(response.text)
    }

    /// 合成文本为音频（mp3字节）
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ResearchError> {
        if self.config.elevenlabs_api_key.is_empty() {
            return Err(ResearchError::external(
                "voice",
                "ELEVENLABS_API_KEY 未配置，无法执行语音合成",
            ));
        }

        let url = format!("{}/{}", ELEVENLABS_ENDPOINT, self.config.voice_id);
        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.config.elevenlabs_api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.config.tts_model,
            }))
            .send()
            .await
            .map_err(|e| ResearchError::external("voice", e))?
            .error_for_status()
            .map_err(|e| ResearchError::external("voice", e))?;

        let audio = response
            .bytes()
            .await
            .map_err(|e| ResearchError::external("voice", e))?;
        Ok(audio.to_vec())
    }

    /// 合成并朗读文本，长文本按句子分段逐段播放
    pub async fn speak(&self, text: &str) -> Result<(), ResearchError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        for chunk in chunk_text(text, TTS_CHUNK_LIMIT) {
            let audio = self.synthesize(&chunk).await?;

            let audio_path = temp_audio_path("mp3");
            std::fs::write(&audio_path, &audio)
                .map_err(|e| ResearchError::external("voice", format!("写入音频文件失败: {}", e)))?;

            let played = self.play(&audio_path);
            let _ = std::fs::remove_file(&audio_path);
            played?;
        }
        Ok(())
    }

    /// 用系统录音命令录制一段音频，阻塞到录满或出错
    fn record(&self, audio_path: &Path) -> Result<bool, ResearchError> {
        let seconds = self.config.record_seconds.to_string();
        println!("   🎙️ 正在录音（最长 {} 秒）...", seconds);

        // 按平台常见录音工具逐个尝试
        let attempts: Vec<(&str, Vec<String>)> = vec![
            (
                "arecord",
                vec![
                    "-f".into(),
                    "cd".into(),
                    "-d".into(),
                    seconds.clone(),
                    audio_path.display().to_string(),
                ],
            ),
            (
                "rec",
                vec![
                    audio_path.display().to_string(),
                    "trim".into(),
                    "0".into(),
                    seconds.clone(),
                ],
            ),
            (
                "ffmpeg",
                vec![
                    "-y".into(),
                    "-f".into(),
                    "avfoundation".into(),
                    "-i".into(),
                    ":0".into(),
                    "-t".into(),
                    seconds.clone(),
                    audio_path.display().to_string(),
                ],
            ),
        ];

        for (program, args) in attempts {
            match Command::new(program).args(&args).status() {
                Ok(status) if status.success() && audio_path.exists() => return Ok(true),
                Ok(_) => continue,
                // 命令不存在时尝试下一个
                Err(_) => continue,
            }
        }

        Err(ResearchError::external(
            "voice",
            "未找到可用的录音命令（arecord/rec/ffmpeg）",
        ))
    }

    /// 用平台播放器播放音频文件，阻塞到播放结束
    fn play(&self, audio_path: &Path) -> Result<(), ResearchError> {
        let path = audio_path.display().to_string();

        let status = if cfg!(target_os = "macos") {
            Command::new("afplay").arg(&path).status()
        } else if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", "start", "/WAIT", &path]).status()
        } else {
            Command::new("mpg123").arg("-q").arg(&path).status()
        };

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ResearchError::external(
                "voice",
                format!("音频播放命令退出异常: {}", status),
            )),
            Err(e) => Err(ResearchError::external(
                "voice",
                format!("音频播放命令不可用: {}", e),
            )),
        }
    }
}

fn temp_audio_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scout_{}.{}", uuid::Uuid::new_v4(), extension))
}

/// 按句子边界把长文本切成不超过limit的片段
///
/// 单个超长句子会整句成段，交由下游自行截断。
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if !current.is_empty() && current.chars().count() + sentence.chars().count() > limit {
            chunks.push(current.trim().to_string());
            current = String::new();
        }
        current.push_str(&sentence);
        current.push(' ');
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }
    chunks
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::{chunk_text, split_sentences};

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("A short sentence.", 500);
        assert_eq!(chunks, vec!["A short sentence.".to_string()]);
    }

    #[test]
    fn test_long_text_splits_on_sentences() {
        let text = "First sentence is here. Second sentence follows! Third one asks? Fourth ends.";
        let chunks = chunk_text(text, 30);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            // 每个片段都以完整句子结尾
            assert!(chunk.ends_with(['.', '!', '?']));
        }
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let long_sentence = "word ".repeat(50) + ".";
        let chunks = chunk_text(&long_sentence, 30);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_split_sentences_handles_trailing_text() {
        let sentences = split_sentences("Done. And unfinished tail");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].trim(), "And unfinished tail");
    }
}
