use criterion::{Criterion, criterion_group, criterion_main};
use loghandle::{Capture, Console, Dispatcher, Level, Logs};
use std::hint::black_box;
use std::io;

/// Cost of calls that the level gate rejects: nothing may be formatted.
fn bench_disabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("disabled");
    let logs = Logs::new(Dispatcher::builder().level(Level::Warn).build());
    let log = logs.named("bench::gate");

    group.bench_function("print", |b| {
        b.iter(|| {
            log.debug().print(black_box("never rendered"));
        });
    });
    group.bench_function("format", |b| {
        b.iter(|| {
            log.debug()
                .format(format_args!("{} of {}", black_box(3), black_box(7)));
        });
    });
    group.bench_function("print_with", |b| {
        b.iter(|| {
            log.trace()
                .print_with(|| format!("{:?}", black_box([0u8; 64])));
        });
    });

    group.finish();
}

fn bench_channel_overrides(c: &mut Criterion) {
    let mut builder = Dispatcher::builder().level(Level::Warn);
    for i in 0..32 {
        builder = builder.channel_level(format!("svc::module{i}"), Level::Debug);
    }
    let logs = Logs::new(builder.build());
    let log = logs.named("svc::module31::inner");

    c.bench_function("enabled with 32 channel overrides", |b| {
        b.iter(|| black_box(log.is_enabled(Level::Trace)));
    });
}

fn bench_enabled_capture(c: &mut Criterion) {
    let capture = Capture::new(Level::Info);
    let (console, _) = Console::capture();
    let logs = Logs::new(capture.clone()).with_console(console);
    let log = logs.named("bench::capture").with_prefix("[p] ");

    c.bench_function("enabled print with prefix", |b| {
        b.iter(|| {
            log.info().print(black_box("stored"));
            capture.clear();
        });
    });
}

fn bench_console(c: &mut Criterion) {
    let logs = Logs::new(Dispatcher::builder().level(Level::Error).build())
        .with_console(Console::new(io::sink(), io::sink(), true));
    let log = logs.named("bench::console");

    c.bench_function("cwarn to sink", |b| {
        b.iter(|| {
            log.cwarn().print(black_box("careful <bold>now</bold>"));
        });
    });
}

criterion_group!(
    benches,
    bench_disabled,
    bench_channel_overrides,
    bench_enabled_capture,
    bench_console,
);
criterion_main!(benches);
