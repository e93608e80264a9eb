//! Latency benchmarks for the prediction path
//!
//! Measures normalizer overhead on top of both artifact kinds:
//! - naive Bayes with calibrated scores
//! - linear margin model with fallback confidence
//!
//! Run with: cargo bench -p spamguard-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spamguard_classifiers::{ModelArtifact, PredictionNormalizer, PredictorHandle};

const NAIVE_BAYES: &str = r#"{
  "kind": "naive_bayes",
  "classes": ["ham", "spam"],
  "class_log_prior": [-0.2, -1.7],
  "feature_log_prob": {
    "free": [-7.0, -3.0], "win": [-7.5, -3.2], "prize": [-8.0, -3.5],
    "meeting": [-4.0, -8.0], "tomorrow": [-4.2, -7.9], "report": [-4.5, -8.5]
  }
}"#;

const LINEAR: &str = r#"{
  "kind": "linear",
  "classes": [0, 1],
  "intercept": -0.8,
  "weights": {"free": 1.9, "win": 1.7, "prize": 1.4, "meeting": -1.2, "report": -1.0}
}"#;

fn normalizer(artifact: &str) -> PredictionNormalizer {
    let artifact: ModelArtifact = serde_json::from_str(artifact).expect("valid artifact");
    let predictor = artifact.into_predictor().expect("artifact compiles");
    PredictionNormalizer::new(PredictorHandle::ready(predictor))
}

fn test_cases() -> Vec<(&'static str, String)> {
    vec![
        ("short_ham", "See you at the meeting tomorrow".to_string()),
        ("short_spam", "WIN a FREE prize now!!!".to_string()),
        (
            "medium_mixed",
            "Please review the quarterly report before the meeting. ".repeat(10),
        ),
        ("max_length", "free prize ".repeat(900)),
    ]
}

fn benchmark_naive_bayes(c: &mut Criterion) {
    let normalizer = normalizer(NAIVE_BAYES);

    let mut group = c.benchmark_group("NaiveBayes_Calibrated");
    group.sample_size(100);

    for (name, text) in test_cases() {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| normalizer.classify(black_box(text)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_linear_margin(c: &mut Criterion) {
    let normalizer = normalizer(LINEAR);

    let mut group = c.benchmark_group("Linear_Fallback");
    group.sample_size(100);

    for (name, text) in test_cases() {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| normalizer.classify(black_box(text)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_naive_bayes, benchmark_linear_margin);
criterion_main!(benches);
