//! 提取管道：帧源 → 变化检测 → OCR → 去重累积
//!
//! 帧处理严格顺序执行：变化检测依赖紧邻的上一帧，无法并行。

use std::path::PathBuf;

use crate::core::error::ExtractError;
use crate::core::ocr::{TextRecognizer, DEFAULT_LANGUAGES};
use crate::core::text::TextAccumulator;
use crate::core::video::diff_filter::{FrameDiffFilter, DEFAULT_CHANGE_THRESHOLD};
use crate::core::video::reader::FrameSource;

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// 变化检测阈值（非零差异像素数 > threshold × 1000 判定为变化）
    pub change_threshold: u32,
    /// OCR 识别语言（tesseract 语言码）
    pub languages: Vec<String>,
    /// 产物输出目录
    pub output_dir: PathBuf,
    /// 运行结束后是否保留下载的视频文件
    pub keep_video: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            change_threshold: DEFAULT_CHANGE_THRESHOLD,
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("."),
            keep_video: false,
        }
    }
}

pub struct ExtractionPipeline {
    diff_filter: FrameDiffFilter,
    accumulator: TextAccumulator,
}

impl ExtractionPipeline {
    pub fn new(change_threshold: u32) -> Self {
        Self {
            diff_filter: FrameDiffFilter::with_threshold(change_threshold),
            accumulator: TextAccumulator::new(),
        }
    }

    /// 顺序遍历帧；只对判定为"变化"的帧调用识别器。
    /// 每接受一个新文本块回调一次 on_extract（参数为帧号）。
    /// 任一步骤失败都会中止整个运行。
    pub fn run<F>(
        &mut self,
        source: &mut dyn FrameSource,
        recognizer: &dyn TextRecognizer,
        mut on_extract: F,
    ) -> Result<&[String], ExtractError>
    where
        F: FnMut(u64),
    {
        self.diff_filter.reset();
        self.accumulator.clear();

        while let Some(frame) = source.next_frame().map_err(ExtractError::Decode)? {
            if !self.diff_filter.should_process(&frame) {
                continue;
            }

            let text = recognizer.recognize(&frame)?;
            if self.accumulator.accept(&text) {
                on_extract(frame.frame_number);
            }
        }

        Ok(self.accumulator.blocks())
    }

    pub fn blocks(&self) -> &[String] {
        self.accumulator.blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{OcrError, VideoError};
    use crate::core::ocr::MockRecognizer;
    use crate::core::video::frame::Frame;
    use crate::core::video::reader::MemoryFrameSource;

    fn uniform_frame(fill: u8, frame_number: u64) -> Frame {
        // 250x250 = 62500 像素，足够跨过默认阈值的 30000 上限
        Frame::new(250, 250, vec![fill; 250 * 250 * 3], frame_number * 33, frame_number)
    }

    /// 前 n 个像素为白、其余为黑的帧
    fn frame_with_white_pixels(n: usize, frame_number: u64) -> Frame {
        let mut data = vec![0u8; 250 * 250 * 3];
        for px in data.chunks_exact_mut(3).take(n) {
            px.fill(255);
        }
        Frame::new(250, 250, data, frame_number * 33, frame_number)
    }

    #[test]
    fn test_three_frame_scenario() {
        // frame0→frame1 差 50000 像素（阈值 30 → 上限 30000），frame1→frame2 差 0
        let frames = vec![
            uniform_frame(0, 0),
            frame_with_white_pixels(50_000, 1),
            frame_with_white_pixels(50_000, 2),
        ];
        let mut source = MemoryFrameSource::new(frames);
        let recognizer = MockRecognizer::fixed("HELLO");

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let mut extracted_at = Vec::new();
        let blocks = pipeline
            .run(&mut source, &recognizer, |n| extracted_at.push(n))
            .unwrap();

        assert_eq!(blocks, ["HELLO"]);
        assert_eq!(extracted_at, [1]);
    }

    #[test]
    fn test_identical_text_across_changed_frames_kept_once() {
        // 两次场景变化，OCR 都返回同样的文本 → 只保留一条
        let frames = vec![
            uniform_frame(0, 0),
            uniform_frame(255, 1),
            uniform_frame(0, 2),
        ];
        let mut source = MemoryFrameSource::new(frames);
        let recognizer = MockRecognizer::fixed("SAME");

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let blocks = pipeline.run(&mut source, &recognizer, |_| {}).unwrap();

        assert_eq!(blocks, ["SAME"]);
    }

    #[test]
    fn test_changing_text_accumulated_in_order() {
        let frames = vec![
            uniform_frame(0, 0),
            uniform_frame(80, 1),
            uniform_frame(160, 2),
            uniform_frame(240, 3),
        ];
        let mut source = MemoryFrameSource::new(frames);
        let recognizer = MockRecognizer::with_pattern(|n| format!("slide {}", n));

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let blocks = pipeline.run(&mut source, &recognizer, |_| {}).unwrap();

        assert_eq!(blocks, ["slide 1", "slide 2", "slide 3"]);
    }

    #[test]
    fn test_empty_recognition_not_accumulated() {
        let frames = vec![uniform_frame(0, 0), uniform_frame(255, 1)];
        let mut source = MemoryFrameSource::new(frames);
        let recognizer = MockRecognizer::fixed("   \n  ");

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let blocks = pipeline.run(&mut source, &recognizer, |_| {}).unwrap();

        assert!(blocks.is_empty());
    }

    #[test]
    fn test_static_video_skips_recognition_entirely() {
        struct PanickingRecognizer;
        impl crate::core::ocr::TextRecognizer for PanickingRecognizer {
            fn recognize(&self, _: &Frame) -> Result<String, OcrError> {
                panic!("recognizer must not run on unchanged frames");
            }
        }

        let frames = (0..5u64).map(|n| uniform_frame(0, n)).collect();
        let mut source = MemoryFrameSource::new(frames);

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let blocks = pipeline.run(&mut source, &PanickingRecognizer, |_| {}).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_recognizer_failure_aborts_run() {
        struct FailingRecognizer;
        impl crate::core::ocr::TextRecognizer for FailingRecognizer {
            fn recognize(&self, _: &Frame) -> Result<String, OcrError> {
                Err(OcrError::Engine("engine crashed".to_string()))
            }
        }

        let frames = vec![uniform_frame(0, 0), uniform_frame(255, 1)];
        let mut source = MemoryFrameSource::new(frames);

        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let err = pipeline
            .run(&mut source, &FailingRecognizer, |_| {})
            .unwrap_err();
        assert_eq!(err.kind(), "recognition");
    }

    #[test]
    fn test_source_failure_maps_to_decode() {
        struct BrokenSource;
        impl FrameSource for BrokenSource {
            fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
                Err(VideoError::Decode("corrupt stream".to_string()))
            }
        }

        let recognizer = MockRecognizer::fixed("unused");
        let mut pipeline = ExtractionPipeline::new(DEFAULT_CHANGE_THRESHOLD);
        let err = pipeline
            .run(&mut BrokenSource, &recognizer, |_| {})
            .unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
