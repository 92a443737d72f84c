//! Performance benchmarks for the projection engine.
//!
//! This benchmark suite tracks:
//! - A full 60-month projection for each shipped scenario
//! - Roll-up of the monthly series at every granularity
//! - A POST /project round trip through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use aba_proforma::api::{AppState, create_router};
use aba_proforma::calculation::{aggregate, project, run_scenario};
use aba_proforma::config::ConfigLoader;
use aba_proforma::models::Granularity;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const SCENARIOS: [&str; 2] = ["baseline", "two_division"];

fn load(scenario: &str) -> ConfigLoader {
    ConfigLoader::load(format!("./config/{}", scenario)).expect("Failed to load config")
}

/// Benchmark: 60-month projection per scenario.
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for scenario in SCENARIOS {
        let config = load(scenario);
        let run = run_scenario(config.roadmap(), config.assumptions());
        let hires = run.hires;

        group.bench_with_input(BenchmarkId::new("project", scenario), &hires, |b, hires| {
            b.iter(|| black_box(project(hires, config.assumptions())))
        });
    }

    group.finish();
}

/// Benchmark: aggregation of a projected series.
fn bench_aggregation(c: &mut Criterion) {
    let config = load("two_division");
    let months = run_scenario(config.roadmap(), config.assumptions()).months;

    let mut group = c.benchmark_group("aggregation");
    for granularity in [Granularity::Monthly, Granularity::Quarterly, Granularity::Yearly] {
        group.bench_with_input(
            BenchmarkId::new("aggregate", format!("{:?}", granularity)),
            &granularity,
            |b, granularity| b.iter(|| black_box(aggregate(&months, *granularity))),
        );
    }
    group.finish();
}

/// Benchmark: POST /project through the router.
fn bench_project_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load("two_division")));
    let body = serde_json::json!({"granularity": "quarterly"}).to_string();

    c.bench_function("project_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/project")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_projection,
    bench_aggregation,
    bench_project_endpoint,
);
criterion_main!(benches);
