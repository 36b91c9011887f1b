use std::sync::Once;

static LOG_INIT: Once = Once::new();

/// Routes `tracing` output through the test harness, so it only shows up for failing tests.
pub fn init() {
	LOG_INIT.call_once(|| {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")))
			.with_test_writer()
			.init();
	});
}
