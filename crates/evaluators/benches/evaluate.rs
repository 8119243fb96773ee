use biometrics::{
    BiometricBatch, BloodPressureSample, HeartRateSample, HrvSample, SleepSample, Spo2Sample,
};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evaluators::HealthMonitor;

fn week_batch() -> BiometricBatch {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let days = 0..7i64;

    BiometricBatch {
        heart_rate: days
            .clone()
            .map(|d| HeartRateSample::new(start + Duration::days(d), 70.0 + d as f64, Some(82.0)))
            .collect(),
        hrv: days
            .clone()
            .map(|d| HrvSample::new(start + Duration::days(d), Some(50.0 - 3.0 * d as f64), Some(30.0)))
            .collect(),
        sleep: days
            .clone()
            .map(|d| {
                SleepSample::new(start + Duration::days(d), 5.5)
                    .with_stages(Some(1.0), Some(0.8))
                    .with_awakenings(12)
            })
            .collect(),
        spo2: (0..480)
            .map(|m| Spo2Sample::new(start + Duration::minutes(m), 88.0 + (m % 10) as f64))
            .collect(),
        blood_pressure: days
            .map(|d| BloodPressureSample::new(start + Duration::days(d), 142.0, 88.0))
            .collect(),
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let batch = week_batch();
    c.bench_function("evaluate_week_batch", |b| {
        b.iter(|| HealthMonitor::evaluate(black_box(&batch)))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
