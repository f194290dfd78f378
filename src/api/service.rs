//! 提取服务边界：start / poll / fetch_artifact / reset
//!
//! start 立即返回，管道在单个工作线程里顺序执行；
//! 调用方通过 poll 轮询共享的日志与状态快照。

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::core::error::ExtractError;
use crate::core::ocr::TesseractRecognizer;
use crate::core::pipeline::{ExtractionConfig, ExtractionPipeline, RunContext, RunSnapshot};
use crate::core::text::DocumentWriter;
use crate::core::video::{FfmpegFrameReader, VideoDownloader};

static DEFAULT_SERVICE: Lazy<ExtractionService> =
    Lazy::new(|| ExtractionService::new(ExtractionConfig::default()));

/// 进程级默认服务实例
pub fn default_service() -> &'static ExtractionService {
    &DEFAULT_SERVICE
}

pub struct ExtractionService {
    config: ExtractionConfig,
    context: Arc<Mutex<RunContext>>,
}

impl ExtractionService {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            context: Arc::new(Mutex::new(RunContext::new())),
        }
    }

    /// 空闲或终态时开启一轮运行并立即返回 true；
    /// 已有运行在途时返回 false 且不触碰现有日志与状态。
    pub fn start(&self, source_locator: &str) -> bool {
        {
            let mut ctx = self.context.lock().unwrap();
            if !ctx.try_begin_run() {
                return false;
            }
            ctx.log("⚡ Process started...");
        }

        let context = Arc::clone(&self.context);
        let config = self.config.clone();
        let url = source_locator.to_string();

        thread::spawn(move || {
            let outcome = run_pipeline(&url, &config, &context);
            let mut ctx = context.lock().unwrap();
            match outcome {
                Ok(artifact) => {
                    ctx.log("📂 File ready for download.");
                    ctx.complete_success(artifact);
                }
                Err(e) => {
                    ctx.complete_error(format!("❌ Error ({}): {}", e.kind(), e));
                }
            }
        });

        true
    }

    /// 当前运行状态的非破坏性一致快照
    pub fn poll(&self) -> RunSnapshot {
        self.context.lock().unwrap().snapshot()
    }

    /// JSON 形式的快照，便于嵌入方直接作为响应体
    pub fn poll_json(&self) -> String {
        serde_json::to_string(&self.poll()).unwrap_or_else(|_| "{}".to_string())
    }

    /// 最近一次成功运行的产物内容；文件已不存在时返回 None
    pub fn fetch_artifact(&self) -> Option<Vec<u8>> {
        let path = self.context.lock().unwrap().artifact().map(PathBuf::from)?;
        fs::read(path).ok()
    }

    pub fn artifact_path(&self) -> Option<PathBuf> {
        self.context.lock().unwrap().artifact().map(PathBuf::from)
    }

    /// 清回空闲态并删除产物文件；运行在途时拒绝
    pub fn reset(&self) -> bool {
        let mut ctx = self.context.lock().unwrap();
        if ctx.state().is_running() {
            return false;
        }
        if let Some(path) = ctx.take_artifact() {
            let _ = fs::remove_file(path);
        }
        ctx.reset();
        true
    }
}

/// 一轮完整运行：下载 → 帧循环 → 组装文档
/// 任一失败在组装之前中止，不产出部分文档
fn run_pipeline(
    url: &str,
    config: &ExtractionConfig,
    context: &Arc<Mutex<RunContext>>,
) -> Result<PathBuf, ExtractError> {
    let run_id = Uuid::new_v4().simple().to_string();
    let video_path = config.output_dir.join(format!("video_{}.mp4", run_id));

    let downloader = VideoDownloader::new();
    if let Err(e) = downloader.download(url, &video_path) {
        // 下载中途失败会留下残缺文件，立即清掉
        let _ = fs::remove_file(&video_path);
        return Err(ExtractError::Download(e));
    }
    context.lock().unwrap().log("⬇️ Video downloaded.");

    let result = extract_to_document(&video_path, &run_id, config, context);

    if !config.keep_video {
        let _ = fs::remove_file(&video_path);
    }

    result
}

fn extract_to_document(
    video_path: &std::path::Path,
    run_id: &str,
    config: &ExtractionConfig,
    context: &Arc<Mutex<RunContext>>,
) -> Result<PathBuf, ExtractError> {
    let mut reader = FfmpegFrameReader::open(video_path).map_err(ExtractError::Decode)?;
    let recognizer = TesseractRecognizer::with_languages(config.languages.clone());

    let mut pipeline = ExtractionPipeline::new(config.change_threshold);
    let blocks = pipeline
        .run(&mut reader, &recognizer, |frame_number| {
            context.lock().unwrap().log(format!(
                "📸 Screen changed → extracted text at frame {}",
                frame_number
            ));
        })?
        .to_vec();
    context.lock().unwrap().log("📝 Text extraction complete.");

    let artifact_path = config.output_dir.join(format!("text_{}.txt", run_id));
    DocumentWriter::new().write(&blocks, &artifact_path)?;
    context.lock().unwrap().log("✅ Document saved.");

    Ok(artifact_path)
}
