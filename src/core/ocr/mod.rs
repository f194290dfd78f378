//! 文字识别（外部 OCR 引擎协作者）

pub mod tesseract;

pub use tesseract::{TesseractRecognizer, DEFAULT_LANGUAGES};

use crate::core::error::OcrError;
use crate::core::video::frame::Frame;

/// OCR 契约：输入彩色帧，输出原始识别文本（可多行、可为空）
/// 识别失败直接上抛，不做逐帧重试
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, frame: &Frame) -> Result<String, OcrError>;
}

/// 测试用识别器：按帧号返回脚本化文本
pub struct MockRecognizer {
    pattern: Box<dyn Fn(u64) -> String + Send + Sync>,
}

impl MockRecognizer {
    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(u64) -> String + Send + Sync + 'static,
    {
        Self {
            pattern: Box::new(pattern),
        }
    }

    pub fn fixed(text: &str) -> Self {
        let text = text.to_string();
        Self::with_pattern(move |_| text.clone())
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, frame: &Frame) -> Result<String, OcrError> {
        Ok((self.pattern)(frame.frame_number))
    }
}
