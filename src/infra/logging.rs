use tracing_subscriber::EnvFilter;

/// Инициализация логов для бинарей: уровень из `RUST_LOG`, по умолчанию `info`.
/// Повторный вызов ничего не ломает.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
