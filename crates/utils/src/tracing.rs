// Copyright 2025 Irreducible Inc.

use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Installs a global `tracing` subscriber that prints to stderr.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Span close events are printed with
/// their busy time, so `RUST_LOG=debug` shows how long circuit building and witness validation
/// take. Calling this more than once is harmless.
pub fn init_tracing() {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_span_events(FmtSpan::CLOSE),
		)
		.try_init();
}
