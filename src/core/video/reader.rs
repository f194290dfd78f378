//! 帧源：按序产出解码后的视频帧
//!
//! 真实实现通过 ffmpeg 子进程读取 rgb24 裸流，
//! 解码细节完全交给外部协作者。

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::core::error::VideoError;

use super::frame::Frame;

pub trait FrameSource {
    /// 产出下一帧；视频耗尽时返回 Ok(None)
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError>;
}

/// 基于 ffmpeg 管道的帧读取器
pub struct FfmpegFrameReader {
    width: u32,
    height: u32,
    fps: f64,
    child: Child,
    stdout: std::process::ChildStdout,
    frames_read: u64,
    finished: bool,
}

impl FfmpegFrameReader {
    pub fn open(path: &Path) -> Result<Self, VideoError> {
        let (width, height, fps) = probe_video(path)?;

        let mut child = Command::new("ffmpeg")
            .arg("-i")
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-v", "error", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => VideoError::FfmpegNotFound,
                _ => VideoError::Io(e),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VideoError::Decode("ffmpeg stdout not captured".to_string()))?;

        Ok(Self {
            width,
            height,
            fps,
            child,
            stdout,
            frames_read: 0,
            finished: false,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for FfmpegFrameReader {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        if self.finished {
            return Ok(None);
        }

        let frame_len = self.width as usize * self.height as usize * 3;
        let mut buf = vec![0u8; frame_len];

        let mut filled = 0;
        while filled < frame_len {
            match self.stdout.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.finished = true;
                    let _ = self.child.wait();
                    if filled == 0 {
                        return Ok(None);
                    }
                    return Err(VideoError::Decode(format!(
                        "truncated frame: {} of {} bytes",
                        filled, frame_len
                    )));
                }
                Ok(n) => filled += n,
                Err(e) => {
                    self.finished = true;
                    return Err(VideoError::Io(e));
                }
            }
        }

        let timestamp_ms = if self.fps > 0.0 {
            (self.frames_read as f64 * 1000.0 / self.fps) as u64
        } else {
            0
        };
        let frame = Frame::new(self.width, self.height, buf, timestamp_ms, self.frames_read);
        self.frames_read += 1;

        Ok(Some(frame))
    }
}

// 避免僵尸进程：读取器提前丢弃时回收 ffmpeg 子进程
impl Drop for FfmpegFrameReader {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// ffprobe 获取视频流的分辨率与帧率
fn probe_video(path: &Path) -> Result<(u32, u32, f64), VideoError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,avg_frame_rate",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VideoError::FfmpegNotFound,
            _ => VideoError::Io(e),
        })?;

    if !output.status.success() {
        let stderr: String = String::from_utf8_lossy(&output.stderr)
            .chars()
            .take(500)
            .collect();
        return Err(VideoError::Probe(stderr));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let line = text.trim();
    let mut fields = line.split(',');

    let width = fields
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| VideoError::Probe(format!("no video stream in ffprobe output: {}", line)))?;
    let height = fields
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| VideoError::Probe(format!("missing height in ffprobe output: {}", line)))?;
    let fps = fields.next().map(parse_frame_rate).unwrap_or(0.0);

    Ok((width, height, fps))
}

/// 解析 "30000/1001" 或 "25" 形式的帧率
fn parse_frame_rate(s: &str) -> f64 {
    match s.trim().split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().unwrap_or(0.0);
            let den: f64 = den.parse().unwrap_or(0.0);
            if den == 0.0 {
                0.0
            } else {
                num / den
            }
        }
        None => s.trim().parse().unwrap_or(0.0),
    }
}

/// 测试与嵌入方直接喂帧用的内存帧源
pub struct MemoryFrameSource {
    frames: VecDeque<Frame>,
}

impl MemoryFrameSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        Ok(self.frames.pop_front())
    }
}
