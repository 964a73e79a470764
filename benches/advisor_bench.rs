//! Benchmarks for the network-free resolution paths

use agri_advisor::heuristic::HeuristicScorer;
use agri_advisor::knowledge::KnowledgeStore;
use agri_advisor::parser::{parse_json_object, parse_prediction, parse_sections};
use agri_advisor::ConditionSet;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SECTIONS: &str = "CROP: Quinoa
**SOIL_REQUIREMENTS:**
- Nitrogen (N): 60-90 kg/ha
- Phosphorus (P): 30-40 kg/ha
- pH Level: 6.0-8.5
CLIMATE_REQUIREMENTS:
- Temperature: 15-25°C
- Rainfall: 300-500 mm
GROWING_TIPS:
- Sow in rows 40 cm apart
- Keep weeds down for the first month
HARVEST_INFO:
- Growing Duration: 90-120 days";

/// Benchmark heuristic scoring per season
fn bench_scoring(c: &mut Criterion) {
    let scorer = HeuristicScorer::new();
    let mut group = c.benchmark_group("heuristic_score");

    for season in ["monsoon", "winter", "summer", "spring"] {
        let conditions = ConditionSet::new(6.5, 27.0, 1100.0)
            .unwrap()
            .with_soil("clay")
            .with_season(season);
        group.bench_function(season, |b| b.iter(|| black_box(scorer.score(&conditions))));
    }

    group.finish();
}

/// Benchmark knowledge lookups, hit and miss
fn bench_lookup(c: &mut Criterion) {
    let store = KnowledgeStore::builtin();
    c.bench_function("knowledge_hit", |b| {
        b.iter(|| black_box(store.lookup(black_box("  Sugarcane "))))
    });
    c.bench_function("knowledge_miss", |b| {
        b.iter(|| black_box(store.lookup(black_box("dragonfruit"))))
    });
}

/// Benchmark the three output parsers
fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(SECTIONS.len() as u64));

    group.bench_function("sections", |b| b.iter(|| black_box(parse_sections(SECTIONS))));

    let prediction = "CROP: Maize\nREASON: Warm, moist and fertile.\nYIELD: High\nTIPS:\n- Sow early\n- Split nitrogen";
    group.bench_function("prediction", |b| {
        b.iter(|| black_box(parse_prediction(prediction)))
    });

    let json = r#"Here you go: {"crop": "rice", "confidence": "High", "guide": {"title": "Rice"}} Thanks"#;
    group.bench_function("embedded_json", |b| {
        b.iter(|| black_box(parse_json_object(json)))
    });

    group.finish();
}

criterion_group!(benches, bench_scoring, bench_lookup, bench_parsers);
criterion_main!(benches);
