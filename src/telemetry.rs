//! Telemetry helpers for applications embedding `chartview`.
//!
//! Tracing setup stays explicit and opt-in: hosts either call one of the
//! initializers below or wire their own `tracing` subscriber and filters.
//! The library itself only emits events; it never installs a subscriber on
//! its own.

/// Initializes a default `tracing` subscriber when the `telemetry` feature
/// is enabled, honoring `RUST_LOG` and falling back to `info`.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or
/// if a global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Like [`init_default_tracing`], but with an explicit fallback filter
/// directive (e.g. `"chartview=debug"`) used when `RUST_LOG` is unset.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
