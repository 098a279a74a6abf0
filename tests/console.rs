//! Console channels: always printed, mirrored to the facade only when enabled.

use loghandle::{Capture, Console, ConsoleCapture, Level, Logs, Stream};

fn setup(level: Level) -> (Logs, Capture, ConsoleCapture) {
    let capture = Capture::new(level);
    let (console, out) = Console::capture();
    (Logs::new(capture.clone()).with_console(console), capture, out)
}

#[test]
fn cout_goes_to_stdout_and_mirrors_info() {
    let (logs, capture, out) = setup(Level::Info);

    logs.named("c").cout().print("hello");

    assert_eq!(out.stdout_lines(), vec!["hello"]);
    assert!(out.stderr().is_empty());
    assert!(capture.contains(Level::Info, "hello"));
}

#[test]
fn cwarn_and_cerr_go_to_stderr() {
    let (logs, capture, out) = setup(Level::Trace);
    let log = logs.named("c");

    log.cwarn().print("careful");
    log.cerr().print("broken");

    assert_eq!(out.stderr_lines(), vec!["careful", "broken"]);
    assert!(out.stdout().is_empty());
    assert!(capture.contains(Level::Warn, "careful"));
    assert!(capture.contains(Level::Error, "broken"));
}

#[test]
fn console_prints_even_when_mirror_is_disabled() {
    let (logs, capture, out) = setup(Level::Error);
    let log = logs.named("c");

    assert!(log.cout().is_enabled());
    log.cout().print("still visible");
    log.cwarn().print("also visible");

    assert_eq!(out.stdout_lines(), vec!["still visible"]);
    assert_eq!(out.stderr_lines(), vec!["also visible"]);
    assert!(capture.records().is_empty());
}

#[test]
fn mirrored_record_is_plain_text() {
    let (logs, capture, out) = setup(Level::Info);

    logs.named("c").cout().print("build <green>passed</green> in <bold>3s</bold>");

    assert_eq!(out.stdout_lines(), vec!["build passed in 3s"]);
    assert_eq!(capture.messages(), vec!["build passed in 3s"]);
}

#[test]
fn colored_console_applies_channel_style() {
    let capture = Capture::default();
    let (console, out) = Console::capture();
    let logs = Logs::new(capture.clone()).with_console(console.colors(true));

    logs.named("c").cerr().print("fail");
    logs.named("c").cout().print("ok");

    assert_eq!(out.stderr(), "\x1b[1m\x1b[38;2;255;60;60mfail\x1b[0m\n");
    assert_eq!(out.stdout(), "ok\n");
    assert_eq!(capture.messages(), vec!["fail", "ok"]);
}

#[test]
fn markup_overrides_channel_style() {
    let capture = Capture::default();
    let (console, out) = Console::capture();
    let console = console.colors(true);
    let expected = console.render(
        Stream::Stderr,
        loghandle::ConsoleStyle::plain(),
        "<red>x</red>",
    );
    let logs = Logs::new(capture).with_console(console);

    logs.named("c").cwarn().print("<red>x</red>");

    assert_eq!(out.stderr(), format!("{expected}\n"));
    assert!(!expected.contains("\x1b[1m"));
}

#[test]
fn handle_prefix_applies_to_mirror_only() {
    let (logs, capture, out) = setup(Level::Info);
    let log = logs.named("c").with_prefix("[job] ");

    log.cout().print("done");
    log.cerr().print("<bold>failed</bold>");

    assert_eq!(out.stdout_lines(), vec!["done"]);
    assert_eq!(out.stderr_lines(), vec!["failed"]);
    assert_eq!(capture.messages(), vec!["[job] done", "[job] failed"]);
}

#[test]
fn console_throwable_mirrors_then_emits_with_error() {
    let (logs, capture, out) = setup(Level::Info);
    let err = std::io::Error::other("gone");

    logs.named("c")
        .with_prefix("[job] ")
        .cerr()
        .throwable_fmt(&err, format_args!("lost <bold>it</bold>"));

    assert_eq!(out.stderr_lines(), vec!["lost it"]);
    let records = capture.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.level == Level::Error));
    assert!(records.iter().all(|r| r.message == "[job] lost it"));
    assert_eq!(records[0].error, None);
    assert_eq!(records[1].error, Some(vec!["gone".to_string()]));
}

#[test]
fn console_throwable_with_disabled_mirror_only_prints() {
    let (logs, capture, out) = setup(Level::Error);

    logs.named("c")
        .cwarn()
        .throwable(&std::io::Error::other("slow disk"));

    assert_eq!(out.stderr_lines(), vec!["std::io::error::Error: slow disk"]);
    assert!(capture.records().is_empty());
}

#[test]
fn console_format_always_evaluates() {
    let (logs, capture, out) = setup(Level::Error);

    logs.named("c").cout().format(format_args!("{}+{}", 1, 2));

    assert_eq!(out.stdout_lines(), vec!["1+2"]);
    assert!(capture.records().is_empty());
}
