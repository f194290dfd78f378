use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("invalid video source: {0}")]
    InvalidSource(String),
    #[error("download failed: {0}")]
    Download(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ffprobe failed: {0}")]
    Probe(String),
    #[error("frame decode failed: {0}")]
    Decode(String),
    #[error("ffmpeg not found on PATH")]
    FfmpegNotFound,
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame encode failed: {0}")]
    Encode(String),
    #[error("recognition engine failed: {0}")]
    Engine(String),
    #[error("tesseract not found on PATH")]
    EngineNotFound,
}

/// 管道级错误分类：下载 / 解码 / 识别 / 存储
/// 任一步骤失败都会中止整个运行，不做重试
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("download: {0}")]
    Download(#[source] VideoError),
    #[error("decode: {0}")]
    Decode(#[source] VideoError),
    #[error("recognition: {0}")]
    Recognition(#[from] OcrError),
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl ExtractError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Download(_) => "download",
            ExtractError::Decode(_) => "decode",
            ExtractError::Recognition(_) => "recognition",
            ExtractError::Storage(_) => "storage",
        }
    }
}
