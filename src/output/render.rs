// src/output/render.rs
use crate::health::{HealthReport, HealthStatus, BANNER_RULE};
use tracing::{info, warn};

fn icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Up => "✅",
        HealthStatus::Down => "❌",
    }
}

/// Writes the human-readable summary to the log and reports whether
/// every endpoint was healthy.
pub fn render(report: &HealthReport) -> bool {
    let total = report.endpoints().len();

    info!("--- Health Check Results ---");
    for endpoint in report.endpoints() {
        info!("{} {}", icon(endpoint.status), endpoint.url);
        info!(
            "   Status: {} | HTTP: {}",
            endpoint.status, endpoint.http_status
        );
        info!("   Message: {}", endpoint.message);
    }

    info!("--- Summary ---");
    info!("Overall Status: {}", report.overall_status());
    info!("Healthy Endpoints: {}/{}", report.healthy_count(), total);
    info!("Unhealthy Endpoints: {}/{}", report.unhealthy_count(), total);

    if !report.is_healthy() {
        let failing: Vec<&str> = report.failing().map(|e| e.url.as_str()).collect();
        warn!("Failing endpoints: {}", failing.join(", "));
    }
    info!("{}", BANNER_RULE);

    report.is_healthy()
}
