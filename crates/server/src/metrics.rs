//! Prometheus metrics for server activity.
//!
//! Counters track connections, logins by outcome and command usage by
//! keyword. Besides the scrape-ready registry, [`activity_summary`]
//! renders the same numbers as a human-readable block that gets logged
//! periodically and once at shutdown.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use prometheus::{core::Collector, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Connections accepted since startup.
pub static CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "recomtree_connections_total",
        "Total client connections since startup",
    )
    .unwrap()
});

/// Connections currently open.
pub static ACTIVE_CONNECTIONS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "recomtree_active_connections",
        "Number of currently open client connections",
    )
    .unwrap()
});

/// Commands executed by keyword.
pub static COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("recomtree_commands_total", "Commands executed by keyword"),
        &["command"],
    )
    .unwrap()
});

/// Login attempts by outcome (`admin`, `user`, `failed`).
pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("recomtree_logins_total", "Login attempts by outcome"),
        &["outcome"],
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(CONNECTIONS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(ACTIVE_CONNECTIONS.clone()))
        .unwrap();
    registry.register(Box::new(COMMANDS_TOTAL.clone())).unwrap();
    registry.register(Box::new(LOGINS_TOTAL.clone())).unwrap();
}

/// Render the activity counters as a log-friendly text block.
pub fn activity_summary(started_at: DateTime<Utc>) -> String {
    let uptime = Utc::now() - started_at;
    let hours = uptime.num_hours();
    let minutes = uptime.num_minutes() % 60;
    let seconds = uptime.num_seconds() % 60;

    // Command usage by keyword, plus the overall total.
    let mut command_counts: Vec<(String, u64)> = Vec::new();
    let mut total_commands: u64 = 0;
    for family in COMMANDS_TOTAL.collect() {
        for metric in family.get_metric() {
            let keyword = metric
                .get_label()
                .first()
                .map(|l| l.get_value().to_string())
                .unwrap_or_default();
            let count = metric.get_counter().get_value() as u64;
            total_commands += count;
            command_counts.push((keyword, count));
        }
    }
    command_counts.sort();

    let mut out = String::new();
    out.push_str("\n========== SERVER ACTIVITY METRICS ==========\n");
    out.push_str(&format!("Server uptime: {hours}h {minutes}m {seconds}s\n"));
    out.push_str(&format!(
        "Total connections: {}\n",
        CONNECTIONS_TOTAL.get()
    ));
    out.push_str(&format!(
        "Current active connections: {}\n",
        ACTIVE_CONNECTIONS.get()
    ));
    out.push_str(&format!("Total commands executed: {total_commands}\n"));
    out.push_str("\nLogin statistics:\n");
    out.push_str(&format!(
        "  - Admin logins: {}\n",
        LOGINS_TOTAL.with_label_values(&["admin"]).get()
    ));
    out.push_str(&format!(
        "  - User logins: {}\n",
        LOGINS_TOTAL.with_label_values(&["user"]).get()
    ));
    out.push_str(&format!(
        "  - Failed logins: {}\n",
        LOGINS_TOTAL.with_label_values(&["failed"]).get()
    ));
    if !command_counts.is_empty() {
        out.push_str("\nCommand usage:\n");
        for (keyword, count) in &command_counts {
            out.push_str(&format!("  - {keyword}: {count} times\n"));
        }
    }
    out.push_str("=============================================\n");
    out
}
