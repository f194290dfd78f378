use std::path::{Path, PathBuf};

use serde::Serialize;

/// 运行状态机：idle → running → {completed-success, completed-error}
/// 两个终态都允许开启新一轮运行并重新初始化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    CompletedSuccess,
    CompletedError,
}

impl RunState {
    pub fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn is_completed(self) -> bool {
        matches!(self, RunState::CompletedSuccess | RunState::CompletedError)
    }
}

/// 单次运行的共享上下文：日志、状态、产物引用
///
/// 只允许编排器在状态机转换中修改；
/// 外部读者通过 snapshot() 观察，永远不会看到修改到一半的视图。
#[derive(Debug)]
pub struct RunContext {
    state: RunState,
    log_lines: Vec<String>,
    artifact: Option<PathBuf>,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            log_lines: Vec::new(),
            artifact: None,
        }
    }

    /// idle/终态 → running，并清空上一轮运行的日志与产物引用。
    /// 已在运行中时返回 false 且不触碰任何现有状态。
    pub fn try_begin_run(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state = RunState::Running;
        self.log_lines.clear();
        self.artifact = None;
        true
    }

    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.log_lines.push(line);
    }

    pub fn complete_success(&mut self, artifact: PathBuf) {
        self.artifact = Some(artifact);
        self.state = RunState::CompletedSuccess;
    }

    /// 错误信息进入可观察日志，产物引用保持为空
    pub fn complete_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.log_lines.push(message);
        self.state = RunState::CompletedError;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    pub fn take_artifact(&mut self) -> Option<PathBuf> {
        self.artifact.take()
    }

    /// 一次调用内的一致性快照
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            log_lines: self.log_lines.clone(),
            running: self.state.is_running(),
            completed: self.state.is_completed(),
        }
    }

    /// 清回空闲态；调用方保证当前没有活动运行
    pub fn reset(&mut self) {
        self.state = RunState::Idle;
        self.log_lines.clear();
        self.artifact = None;
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// poll 返回的不可变快照
#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    pub log_lines: Vec<String>,
    pub running: bool,
    pub completed: bool,
}
