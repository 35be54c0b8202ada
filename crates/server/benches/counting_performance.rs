use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nexios_starter::api::health::{CountingResult, HealthCheckRequest, HealthResponse};
use nexios_starter::counting::CountingRange;

// CI-friendly benchmark configuration
fn is_ci_mode() -> bool {
    std::env::var("CI").is_ok() || std::env::var("QUICK_BENCH").is_ok()
}

fn benchmark_counting_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting_range");
    for len in [10i64, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let range = CountingRange::new(1, len, 1);
            b.iter(|| black_box(range).iter().collect::<Vec<_>>());
        });
    }
    group.finish();
}

fn benchmark_response_serialization(c: &mut Criterion) {
    c.bench_function("detailed_response_to_json", |b| {
        let check = HealthCheckRequest {
            include_details: Some(true),
            end_number: Some(100),
            ..HealthCheckRequest::default()
        }
        .resolve();
        let numbers: Vec<i64> = check.range.iter().collect();
        let response = HealthResponse::ok(check.service_name.clone()).with_details(
            check.check_type.clone(),
            CountingResult::new(check.range, numbers),
        );
        b.iter(|| serde_json::to_vec(black_box(&response)).unwrap());
    });
}

fn configure_criterion() -> Criterion {
    if is_ci_mode() {
        Criterion::default()
            .sample_size(10)
            .measurement_time(std::time::Duration::from_secs(1))
            .warm_up_time(std::time::Duration::from_millis(100))
    } else {
        Criterion::default()
    }
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = benchmark_counting_range, benchmark_response_serialization
}
criterion_main!(benches);
