//! Named handles: level gating, lazy messages, prefixes and construction.

use loghandle::{Capture, CapturedRecord, Console, Level, Log, Logs};
use std::cell::Cell;

fn logs_at(level: Level) -> (Logs, Capture) {
    let capture = Capture::new(level);
    let (console, _) = Console::capture();
    (Logs::new(capture.clone()).with_console(console), capture)
}

fn sample(logs: &Logs) -> Log {
    logs.named("app::sample")
}

#[test]
fn print_forwards_to_the_matching_level() {
    let (logs, capture) = logs_at(Level::Trace);
    let log = sample(&logs);

    log.trace().print("t");
    log.debug().print("d");
    log.info().print("i");
    log.warn().print("w");
    log.error().print("e");

    let levels: Vec<Level> = capture.records().iter().map(|r| r.level).collect();
    assert_eq!(levels, Level::all().to_vec());
    assert!(capture.records().iter().all(|r| r.channel == "app::sample"));
}

#[test]
fn disabled_levels_emit_nothing() {
    let (logs, capture) = logs_at(Level::Warn);
    let log = sample(&logs);

    log.debug().print("hidden");
    log.info().print("hidden");
    log.warn().print("shown");

    assert_eq!(capture.messages(), vec!["shown"]);
    assert!(!log.info().is_enabled());
    assert!(log.error().is_enabled());
}

#[test]
fn lazy_suppliers_are_not_called_when_disabled() {
    let (logs, capture) = logs_at(Level::Info);
    let log = sample(&logs);
    let calls = Cell::new(0);

    log.debug().print_with(|| {
        calls.set(calls.get() + 1);
        "expensive".to_string()
    });
    let err = std::io::Error::other("x");
    log.trace().throwable_with(&err, || {
        calls.set(calls.get() + 1);
        "expensive".to_string()
    });
    log.info().print_with(|| {
        calls.set(calls.get() + 1);
        "cheap enough".to_string()
    });

    assert_eq!(calls.get(), 1);
    assert_eq!(capture.messages(), vec!["cheap enough"]);
}

#[test]
fn print_all_emits_each_message() {
    let (logs, capture) = logs_at(Level::Info);
    let log = sample(&logs);

    log.info().print_all(["one", "two", "three"]);
    log.debug().print_all(vec!["never".to_string()]);

    assert_eq!(capture.messages(), vec!["one", "two", "three"]);
}

#[test]
fn format_substitutes_arguments() {
    let (logs, capture) = logs_at(Level::Info);
    sample(&logs)
        .info()
        .format(format_args!("{} of {} done", 3, 7));
    assert!(capture.contains(Level::Info, "3 of 7 done"));
}

#[test]
fn prefixes_compose_outermost_first() {
    let (logs, capture) = logs_at(Level::Info);
    let log = sample(&logs).with_prefix("A:").with_prefix("B:");

    log.info().print("m");

    assert_eq!(capture.messages(), vec!["B:A:m"]);
    assert_eq!(log.name(), "app::sample");
}

#[test]
fn prefix_does_not_change_the_original_handle() {
    let (logs, capture) = logs_at(Level::Info);
    let log = sample(&logs);
    let _prefixed = log.with_prefix("P:");

    log.info().print("m");

    assert_eq!(capture.messages(), vec!["m"]);
}

#[test]
fn gate_is_queried_on_every_call() {
    let (logs, capture) = logs_at(Level::Info);
    let log = sample(&logs);

    log.debug().print("a");
    capture.set_level(Level::Trace);
    log.debug().print("b");

    assert_eq!(capture.messages(), vec!["b"]);
    assert!(capture.gate_checks() >= 2);
}

#[test]
fn channel_levels_are_per_handle() {
    let (logs, capture) = logs_at(Level::Warn);
    capture.set_channel_level("chatty", Level::Trace);

    logs.named("chatty").debug().print("yes");
    logs.named("quiet").debug().print("no");

    assert_eq!(
        capture.records(),
        vec![CapturedRecord {
            channel: "chatty".to_string(),
            level: Level::Debug,
            message: "yes".to_string(),
            error: None,
        }]
    );
}

#[test]
fn throwable_uses_type_name_by_default() {
    let (logs, capture) = logs_at(Level::Info);
    let err = std::io::Error::other("disk full");

    sample(&logs).error().throwable(&err);

    let record = &capture.records()[0];
    assert_eq!(record.message, "std::io::error::Error: disk full");
    assert_eq!(record.error, Some(vec!["disk full".to_string()]));
}

#[test]
fn throwable_fmt_uses_the_given_message() {
    let (logs, capture) = logs_at(Level::Info);
    let err = std::io::Error::other("refused");

    sample(&logs)
        .with_prefix("[net] ")
        .warn()
        .throwable_fmt(&err, format_args!("connect to {} failed", "db:5432"));

    assert!(capture.contains(Level::Warn, "[net] connect to db:5432 failed"));
}

#[test]
fn for_type_and_macro_names() {
    struct Engine;
    let (logs, _) = logs_at(Level::Info);

    assert!(logs.for_type::<Engine>().name().ends_with("Engine"));
    assert_eq!(loghandle::me!(logs).name(), "handle");
}
