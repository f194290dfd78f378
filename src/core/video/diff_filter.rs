use super::frame::Frame;

/// 变化判定的固定缩放系数：阈值 × 1000 = 非零差异像素数上限
pub const CHANGE_SCALE: u64 = 1000;

pub const DEFAULT_CHANGE_THRESHOLD: u32 = 30;

/// 帧间变化检测：灰度逐像素差异计数，与上一帧比较（滑动窗口大小 1）
pub struct FrameDiffFilter {
    threshold: u32,
    prev_gray: Option<Vec<u8>>,
}

impl FrameDiffFilter {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_CHANGE_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold,
            prev_gray: None,
        }
    }

    /// 首帧只建立基准，永不判定为变化。
    /// 无论判定结果如何，当前灰度帧都成为下一次比较的基准。
    pub fn should_process(&mut self, frame: &Frame) -> bool {
        let gray = frame.to_gray();

        let changed = match &self.prev_gray {
            Some(prev) if prev.len() == gray.len() => {
                let diff_count = prev
                    .iter()
                    .zip(gray.iter())
                    .filter(|(a, b)| a != b)
                    .count() as u64;
                diff_count > self.threshold as u64 * CHANGE_SCALE
            }
            // 分辨率变化视同场景变化
            Some(_) => true,
            None => false,
        };

        self.prev_gray = Some(gray);
        changed
    }

    pub fn reset(&mut self) {
        self.prev_gray = None;
    }
}

impl Default for FrameDiffFilter {
    fn default() -> Self {
        Self::new()
    }
}
