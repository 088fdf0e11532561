//! Prometheus metrics for command dispatch.
//!
//! - `harmony_dispatch_total{outcome}` - Inbound events by pipeline outcome
//! - `harmony_command_total{command}` - Handler invocations by command
//! - `harmony_command_duration_seconds{command}` - Handler latency histogram
//! - `harmony_conversion_mismatch_total{command}` - Candidates skipped on mismatch
//! - `harmony_event_lag_seconds` - Delay between message creation and dispatch
//!
//! Recording before [`init`] is a no-op, so the router works without metrics.

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Inbound events by outcome label.
pub static DISPATCH_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Handler invocations by command name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Handler latency by command name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Candidates abandoned on a recoverable conversion failure.
pub static CONVERSION_MISMATCHES: OnceLock<IntCounterVec> = OnceLock::new();

/// Seconds between message timestamp and dispatch start.
pub static EVENT_LAG: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers anything.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(DISPATCH_COUNTER, IntCounterVec::new(Opts::new("harmony_dispatch_total", "Inbound message events by dispatch outcome"), &["outcome"]));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("harmony_command_total", "Command handler invocations"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("harmony_command_duration_seconds", "Command handler latency")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["command"]));
    register!(CONVERSION_MISMATCHES, IntCounterVec::new(Opts::new("harmony_conversion_mismatch_total", "Candidates skipped after a recoverable conversion failure"), &["command"]));
    register!(EVENT_LAG, Histogram::with_opts(
        HistogramOpts::new("harmony_event_lag_seconds", "Delay between message creation and dispatch")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for dispatch metric updates
// ============================================================================

/// Record the outcome of one inbound event.
#[inline]
pub fn record_dispatch(outcome: &str) {
    if let Some(c) = DISPATCH_COUNTER.get() {
        c.with_label_values(&[outcome]).inc();
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a candidate skipped on a recoverable conversion failure.
#[inline]
pub fn record_mismatch(command: &str) {
    if let Some(c) = CONVERSION_MISMATCHES.get() {
        c.with_label_values(&[command]).inc();
    }
}

/// Record how old a message was when dispatch started.
#[inline]
pub fn record_event_lag(lag_secs: f64) {
    if let Some(h) = EVENT_LAG.get() {
        h.observe(lag_secs.max(0.0));
    }
}
