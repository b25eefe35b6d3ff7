//! 日志基础设施

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// `RUST_LOG` 优先，否则使用配置中的级别
    ///
    /// 已经安装过全局 subscriber 时保留原有的，只记录一条 debug 日志。
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init();

        if let Err(err) = installed {
            debug!("Keeping existing tracing subscriber: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        Logger::init("info");
        Logger::init("debug");
        tracing::info!("logger initialised twice");
    }
}
