use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Console filter used when `RUST_LOG` is unset.
const DEFAULT_CONSOLE_FILTER: &str = "info,llm_request=info,hyper=warn,reqwest=warn";

pub fn configure_logging() {
    // Console output goes to stderr so a digest printed to stdout stays valid JSON
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // File log configuration
    let file_appender = rolling::daily("logs", "newsdesk.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new("llm_request=debug,fact_check=debug,bills=debug,info"));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
