#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Logging setup for the deepedit test suites.
//!
//! Call [`setup`] at the top of a test. Log output is filtered by the
//! `DEEPEDIT_LOG` environment variable (a `tracing_subscriber` targets
//! directive such as `deepedit=debug`) and defaults to everything at `TRACE`.

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DEEPEDIT_LOG";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    color_backtrace::BacktracePrinter::new()
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| match &frame.name {
                Some(name) => {
                    !(name.starts_with("test::")
                        || name.starts_with("std::panicking::")
                        || name.starts_with("core::panicking::")
                        || name.starts_with("core::ops::function::FnOnce::call_once"))
                }
                None => true,
            })
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::Auto,
        )));

    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Install the global subscriber and panic printer, once per process.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}
