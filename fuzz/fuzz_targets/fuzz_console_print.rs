#![no_main]
use libfuzzer_sys::fuzz_target;
use loghandle::{Capture, Console, Logs};

fuzz_target!(|data: &str| {
    let capture = Capture::default();
    let (console, out) = Console::capture();
    let logs = Logs::new(capture.clone()).with_console(console);
    let log = logs.named("fuzz").with_prefix(data);

    log.cwarn().print(data);
    log.cout().print(data);

    // Console lines are written even when the text holds newlines or markup
    assert!(!out.stdout().is_empty());
    assert!(!out.stderr().is_empty());
    assert!(capture.records().len() <= 2);
});
