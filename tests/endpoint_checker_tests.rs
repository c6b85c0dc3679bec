// tests/endpoint_checker_tests.rs
mod common;

use app_health_monitor::config::{parse_endpoints, EndpointSpec};
use app_health_monitor::error::FetchError;
use app_health_monitor::health::{HealthReport, HealthStatus};
use app_health_monitor::output::{render, ReportStore};
use common::{checker, FixedFetcher};
use proptest::prelude::*;

#[tokio::test]
async fn test_mismatched_expected_status_marks_report_down() {
    let endpoints =
        parse_endpoints(r#"[{"url":"http://a"},{"url":"http://b","expected_status":201}]"#)
            .unwrap();
    let checker = checker(
        FixedFetcher::default()
            .reply("http://a", Ok(200))
            .reply("http://b", Ok(200)),
    );

    let report = checker.check_all(&endpoints).await;

    assert_eq!(report.healthy_count(), 1);
    assert_eq!(report.unhealthy_count(), 1);
    assert_eq!(report.overall_status(), HealthStatus::Down);
    assert_eq!(report.endpoints()[1].message, "Unexpected status code: 200");
    assert!(!render(&report));
}

#[tokio::test]
async fn test_unreachable_endpoints_are_retried_then_reported() {
    let endpoints = vec![EndpointSpec::new("http://gone", 200)];
    let checker = checker(FixedFetcher::default().reply("http://gone", Err(FetchError::Timeout)));

    let report = checker.check_all(&endpoints).await;

    assert_eq!(report.endpoints()[0].http_status, 0);
    assert_eq!(report.endpoints()[0].message, "Connection timeout");
    assert_eq!(checker.retry().sleeper().count(), 2);
}

#[tokio::test]
async fn test_report_round_trips_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::in_directory(dir.path());
    let checker = checker(FixedFetcher::default().reply("http://a", Ok(200)));

    let report = checker
        .check_all(&[EndpointSpec::new("http://a", 200)])
        .await;
    store.save(&report).unwrap();

    let saved: HealthReport =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(saved, report);
}

fn endpoint_strategy() -> impl Strategy<Value = (Option<String>, bool)> {
    (prop::option::weighted(0.8, "[a-z]{1,6}"), any::<bool>())
}

proptest! {
    #[test]
    fn counts_and_status_stay_consistent(specs in prop::collection::vec(endpoint_strategy(), 0..12)) {
        let mut fetcher = FixedFetcher::default();
        let mut endpoints = Vec::new();
        for (i, (host, healthy)) in specs.iter().enumerate() {
            let url = host.as_ref().map(|h| format!("http://{h}-{i}"));
            if let Some(url) = &url {
                fetcher = fetcher.reply(url, Ok(if *healthy { 200 } else { 500 }));
            }
            endpoints.push(EndpointSpec { url, expected_status: 200 });
        }

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let report = runtime.block_on(checker(fetcher).check_all(&endpoints));

        let checked: Vec<String> = endpoints.iter().filter_map(|e| e.url.clone()).collect();
        let reported: Vec<String> = report.endpoints().iter().map(|e| e.url.clone()).collect();
        prop_assert_eq!(reported, checked);
        prop_assert_eq!(
            report.healthy_count() + report.unhealthy_count(),
            report.endpoints().len()
        );
        prop_assert_eq!(
            report.overall_status() == HealthStatus::Down,
            report.unhealthy_count() > 0
        );
    }
}
