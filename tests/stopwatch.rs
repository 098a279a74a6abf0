//! Stopwatches measured against real time.

use loghandle::{Capture, Console, Level, Logs};
use std::thread::sleep;
use std::time::Duration;

fn setup() -> (Logs, Capture) {
    let capture = Capture::default();
    let (console, _) = Console::capture();
    (Logs::new(capture.clone()).with_console(console), capture)
}

#[test]
fn reports_start_and_finish_on_drop() {
    let (logs, capture) = setup();
    let log = logs.named("jobs");

    {
        let sw = log.info().stopwatch("rebuild");
        sw.log().debug().print("working");
    }

    let messages = capture.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "rebuild: started");
    assert_eq!(messages[1], "rebuild: working");
    assert!(messages[2].starts_with("rebuild finished in "));
    assert!(messages[2].ends_with(" ms"));
    assert_eq!(capture.records()[2].level, Level::Info);
}

#[test]
fn default_name_is_stopwatch() {
    let (logs, capture) = setup();
    let sw = logs.named("jobs").debug().stopwatch(None);
    assert_eq!(sw.name(), "Stopwatch");
    drop(sw);

    assert_eq!(capture.messages()[0], "Stopwatch: started");
    assert_eq!(capture.records()[0].level, Level::Debug);
}

#[test]
fn slow_scope_escalates_to_error_only() {
    let (logs, capture) = setup();
    let sw = logs
        .named("jobs")
        .info()
        .stopwatch("slow")
        .warn_over(Duration::from_millis(1))
        .error_over(Duration::from_millis(5));
    sleep(Duration::from_millis(20));
    let elapsed = sw.finish();

    assert!(elapsed >= Duration::from_millis(20));
    assert_eq!(capture.count(Level::Error), 1);
    assert_eq!(capture.count(Level::Warn), 0);
    let error = capture
        .records()
        .into_iter()
        .find(|r| r.level == Level::Error)
        .unwrap();
    assert!(error.message.starts_with("slow: error threshold was 5 ms, elapsed time was "));
}

#[test]
fn medium_scope_escalates_to_warning() {
    let (logs, capture) = setup();
    let sw = logs
        .named("jobs")
        .info()
        .stopwatch("medium")
        .warn_over(Duration::from_millis(5))
        .error_over(Duration::from_secs(60));
    sleep(Duration::from_millis(20));
    drop(sw);

    assert_eq!(capture.count(Level::Warn), 1);
    assert_eq!(capture.count(Level::Error), 0);
}

#[test]
fn fast_scope_does_not_escalate() {
    let (logs, capture) = setup();
    let sw = logs
        .named("jobs")
        .info()
        .stopwatch("fast")
        .warn_over(Duration::from_secs(60))
        .error_over(Duration::from_secs(120));
    drop(sw);

    assert_eq!(capture.count(Level::Warn), 0);
    assert_eq!(capture.count(Level::Error), 0);
    assert_eq!(capture.count(Level::Info), 2);
}

#[test]
fn console_stopwatch_prints_start_and_finish() {
    let capture = Capture::new(Level::Error);
    let (console, out) = Console::capture();
    let logs = Logs::new(capture.clone()).with_console(console);

    drop(logs.named("jobs").cout().stopwatch("cli"));

    let lines = out.stdout_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "cli: started");
    assert!(lines[1].starts_with("cli finished in "));
    assert!(capture.records().is_empty());
}

#[test]
fn disabled_report_level_still_escalates() {
    let capture = Capture::new(Level::Warn);
    let (console, _) = Console::capture();
    let logs = Logs::new(capture.clone()).with_console(console);

    let sw = logs
        .named("jobs")
        .debug()
        .stopwatch("quiet")
        .warn_over(Duration::ZERO);
    drop(sw);

    let messages = capture.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("quiet: warning threshold was 0 ms"));
}
