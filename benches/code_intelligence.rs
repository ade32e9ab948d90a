//! Benchmarks for per-keystroke highlighting and completion
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rhai::{Dynamic, Map};
use rhai_console::completion::Suggestor;
use rhai_console::config::ScriptLimits;
use rhai_console::highlight::{ColorMap, Highlighter};
use rhai_console::{ConsoleEnvironment, RhaiConsole};

const SNIPPET: &str = "let player = #{ name: \"ada\", stats: #{ hp: 10 } };\n\
                       if player.stats.hp > 5 { print(`ok ${player.name}`); } // check\n";

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");
    let colors = ColorMap::default();
    let highlighter = Highlighter::new(&colors);

    for lines in [1, 10, 100].iter() {
        let code = SNIPPET.repeat(*lines);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("markup", lines), &code, |b, code| {
            b.iter(|| black_box(highlighter.highlight(code)));
        });
    }

    // Unterminated string: the tail is emitted raw
    let broken = format!("{}print(\"never closed", SNIPPET.repeat(10));
    group.bench_function("lexical_failure", |b| {
        b.iter(|| black_box(highlighter.highlight(&broken)));
    });

    group.finish();
}

fn wide_namespace(size: usize) -> Map {
    let mut members = Map::new();
    for i in 0..size {
        members.insert(format!("member_{}", i).into(), Dynamic::from(i as i64));
    }
    let mut root = Map::new();
    root.insert("scene".into(), Dynamic::from_map(members));
    root
}

fn bench_suggestions(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggestions");

    for size in [10, 100, 1000].iter() {
        let root = wide_namespace(*size);
        let suggestor = Suggestor::new(&root);
        group.bench_with_input(BenchmarkId::new("map_members", size), size, |b, _| {
            b.iter(|| black_box(suggestor.get_suggestions("scene.member_1", 14)));
        });
    }

    let (mut console, _rx) = RhaiConsole::new(&ScriptLimits::default());
    for i in 0..50 {
        let _ = console.execute(&format!("let var_{} = #{{ value: {} }};", i, i));
    }
    let suggestor = Suggestor::new(&console);
    group.bench_function("live_console", |b| {
        b.iter(|| black_box(suggestor.closest_suggestion("var_4", 5)));
    });

    group.finish();
}

criterion_group!(benches, bench_highlight, bench_suggestions);
criterion_main!(benches);
