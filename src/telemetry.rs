//! 日誌初始化

use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日誌，級別由 `RUST_LOG` 控制（預設 info）
///
/// 可重複呼叫，之後的呼叫不做任何事。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice_is_noop() {
        super::init();
        super::init();
        tracing::info!("telemetry initialized");
    }
}
