//! tesseract 命令行引擎

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::core::error::OcrError;
use crate::core::video::frame::Frame;

use super::TextRecognizer;

/// 默认识别语言（tesseract 语言码，多语言并行）
pub const DEFAULT_LANGUAGES: &[&str] = &["tam", "eng", "hin"];

pub struct TesseractRecognizer {
    command: PathBuf,
    languages: Vec<String>,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self::with_languages(DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect())
    }

    /// 可执行文件路径可用 TESSERACT_CMD 环境变量覆盖
    pub fn with_languages(languages: Vec<String>) -> Self {
        let command = std::env::var_os("TESSERACT_CMD")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tesseract"));
        Self { command, languages }
    }

    fn lang_arg(&self) -> String {
        self.languages.join("+")
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, frame: &Frame) -> Result<String, OcrError> {
        let img = frame
            .to_rgb_image()
            .ok_or_else(|| OcrError::Encode("frame buffer does not match dimensions".to_string()))?;

        // 帧落盘为 PNG，tesseract 把结果写到 <base>.txt
        let tmpdir = tempfile::TempDir::with_prefix("vidtext-ocr")?;
        let input_path = tmpdir.path().join("frame.png");
        let output_base = tmpdir.path().join("out");

        img.save(&input_path)
            .map_err(|e| OcrError::Encode(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(self.lang_arg())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OcrError::EngineNotFound,
                _ => OcrError::Io(e),
            })?;

        if !output.status.success() {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .chars()
                .take(500)
                .collect();
            return Err(OcrError::Engine(stderr));
        }

        let text = fs::read_to_string(output_base.with_extension("txt"))?;
        Ok(text)
    }
}
