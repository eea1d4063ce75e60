//! Benchmarks for review rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use halfnote::markup::FormattedText;
use halfnote::ui::ansi::render_ansi;
use halfnote::ui::markup_lines;
use ratatui::style::Style;

fn bench_markup_lines(c: &mut Criterion) {
    let doc = FormattedText::parse(include_str!("../tests/fixtures/review.txt"));
    c.bench_function("markup_lines", |b| {
        b.iter(|| markup_lines(black_box(&doc), Style::default()))
    });
}

fn bench_render_ansi(c: &mut Criterion) {
    let doc = FormattedText::parse(include_str!("../tests/fixtures/review.txt"));
    c.bench_function("render_ansi", |b| b.iter(|| render_ansi(black_box(&doc))));
}

criterion_group!(benches, bench_markup_lines, bench_render_ansi);
criterion_main!(benches);
