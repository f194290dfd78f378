pub mod api;
pub mod core;

pub use crate::api::service::{default_service, ExtractionService};
pub use crate::core::pipeline::{ExtractionConfig, RunSnapshot, RunState};

/// 初始化日志门面的全局级别。
/// 嵌入方可自行安装 log 后端（env_logger 等）；这里不绑定具体实现。
pub fn init_logging() {
    log::set_max_level(log::LevelFilter::Info);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_logging_sets_level() {
        super::init_logging();
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }
}
