use std::sync::Once;

use time::format_description::well_known::Iso8601;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{format::Pretty, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};
use tracing_web::{performance_layer, MakeWebConsoleWriter};

/// Sends tracing events to the worker's console and the performance timeline
pub fn configure_worker_tracing(max_level: LevelFilter) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false) // Only partially supported across browsers
        .with_timer(UtcTime::new(Iso8601::DEFAULT))
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(max_level);
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    // A worker can be started more than once in the same global scope, keep
    // whichever subscriber got there first
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .try_init();
}

/// Configures tracing inside a Once block so every worker entry point can call it
pub fn configure_worker_tracing_once() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| configure_worker_tracing(LevelFilter::DEBUG));
}
