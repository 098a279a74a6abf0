#![no_main]
use libfuzzer_sys::fuzz_target;
use loghandle::fmt::Color;

fuzz_target!(|data: &str| {
    if let Some(color) = Color::from_hex(data) {
        let _ = color.fg_ansi();
    }
});
