#![no_main]
use libfuzzer_sys::fuzz_target;
use loghandle::fmt::{Color, style};

fuzz_target!(|data: &str| {
    // Unclosed and unknown tags degrade to text
    let segments = style::parse(data);
    let _ = style::render_plain(&segments);
    let _ = style::render(&segments, &Color::default_palette());
    let _ = style::plain_text(data);
});
