//! Performance benchmarks for the salary engine.
//!
//! Covers the pure breakdown path, the audited path, and the full HTTP
//! round trip for single requests and batches.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::{calculate_breakdown, compute_breakdown};
use salary_engine::config::DeductionConfig;
use salary_engine::models::{SalaryInput, StudentLoanPlan, TaxRegion};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn sample_input(gross: i64) -> SalaryInput {
    SalaryInput::new(Decimal::from(gross))
        .with_pension_percent(Decimal::from(5))
        .with_region(TaxRegion::Alternate)
        .with_student_loan_plan(StudentLoanPlan::PlanB)
}

/// Benchmark: breakdown without audit trace, across the band structure.
fn bench_compute_breakdown(c: &mut Criterion) {
    let config = DeductionConfig::builtin();
    let mut group = c.benchmark_group("compute_breakdown");

    for gross in [20_000i64, 50_270, 110_000, 250_000] {
        let input = sample_input(gross);
        group.bench_with_input(BenchmarkId::from_parameter(gross), &input, |b, input| {
            b.iter(|| compute_breakdown(black_box(input), config))
        });
    }

    group.finish();
}

/// Benchmark: breakdown with audit trace and metadata.
fn bench_calculate_breakdown(c: &mut Criterion) {
    let config = DeductionConfig::builtin();
    let input = sample_input(64_000);

    c.bench_function("calculate_breakdown", |b| {
        b.iter(|| calculate_breakdown(black_box(&input), config))
    });
}

fn breakdown_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/breakdown")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: single HTTP breakdown request.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::builtin());
    let body = serde_json::json!({
        "grossYearly": 64000,
        "pensionPercent": 5,
        "region": "alternate",
        "studentLoanPlan": "planB"
    })
    .to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(breakdown_request(body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 1000 HTTP requests with varied salaries.
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::builtin();

    let requests: Vec<String> = (0..1000)
        .map(|i| {
            serde_json::json!({
                "grossYearly": 15_000 + i * 150,
                "region": if i % 2 == 0 { "standard" } else { "alternate" },
                "studentLoanPlan": if i % 3 == 0 { "planA" } else { "none" }
            })
            .to_string()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let response = create_router(state.clone())
                    .oneshot(breakdown_request(body.clone()))
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_breakdown,
    bench_calculate_breakdown,
    bench_single_request,
    bench_batch_1000,
);
criterion_main!(benches);
