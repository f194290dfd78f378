pub mod diff_filter;
pub mod download;
pub mod frame;
pub mod reader;

pub use diff_filter::FrameDiffFilter;
pub use download::VideoDownloader;
pub use frame::Frame;
pub use reader::{FfmpegFrameReader, FrameSource, MemoryFrameSource};
