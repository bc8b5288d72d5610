//! Screen benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use termbuffer::core::ScreenBuffer;
use termbuffer::Terminal;

fn bench_screen_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    let text = "Hello, World! ".repeat(100);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("write_text", |b| {
        b.iter(|| {
            let mut buffer = ScreenBuffer::new(80, 24);
            buffer.write(black_box(&text));
            black_box(buffer)
        })
    });

    group.finish();
}

fn bench_screen_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Fill the screen and keep scrolling into the scrollback
    let text: String = (0..100)
        .map(|i| format!("Line {}: Some text content here\n", i))
        .collect();

    group.bench_function("scroll", |b| {
        b.iter(|| {
            let mut buffer = ScreenBuffer::new(80, 24);
            buffer.write(&text);
            black_box(buffer)
        })
    });

    group.finish();
}

fn bench_terminal_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Typical colored shell output
    let mixed = "Line 1: \x1b[32mOK\x1b[0m\r\nLine 2: \x1b[31mERROR\x1b[0m\r\n".repeat(500);
    group.throughput(Throughput::Bytes(mixed.len() as u64));

    group.bench_function("mixed_content", |b| {
        b.iter(|| {
            let mut term = Terminal::new(80, 24);
            term.feed(black_box(mixed.as_bytes()));
            black_box(term)
        })
    });

    group.finish();
}

fn bench_screen_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    group.bench_function("resize", |b| {
        b.iter(|| {
            let mut buffer = ScreenBuffer::new(80, 24);
            buffer.write(&"Hello, World!\n".repeat(20));
            buffer.resize(120, 40);
            buffer.resize(80, 24);
            buffer.resize(132, 50);
            black_box(buffer)
        })
    });

    group.finish();
}

fn bench_screen_full_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    // Simulate a full screen redraw (like an editor opening)
    let mut input = String::new();
    for row in 1..=24 {
        input.push_str(&format!("\x1b[{};1H", row));
        input.push_str(&"X".repeat(80));
    }
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("full_redraw", |b| {
        b.iter(|| {
            let mut term = Terminal::new(80, 24);
            term.process(black_box(&input));
            black_box(term)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_screen_write,
    bench_screen_scroll,
    bench_terminal_mixed,
    bench_screen_resize,
    bench_screen_full_redraw
);

criterion_main!(benches);
