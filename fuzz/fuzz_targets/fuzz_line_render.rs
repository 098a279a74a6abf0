#![no_main]
use libfuzzer_sys::fuzz_target;
use loghandle::fmt::{FormatTemplate, FormatValues, Placeholder, plain_text};
use loghandle::{Console, ConsoleStyle, Stream};

// First line is the template, the rest is the message substituted everywhere.
fuzz_target!(|data: &str| {
    let (template, message) = data.split_once('\n').unwrap_or((data, ""));
    let template = FormatTemplate::parse(template);

    let values = Placeholder::ALL
        .into_iter()
        .fold(FormatValues::new(), |values, ph| values.set(ph, message));
    let line = template.render(&values);
    let _ = plain_text(&line);

    let console = Console::new(std::io::sink(), std::io::sink(), true);
    let _ = console.render(Stream::Stderr, ConsoleStyle::plain(), message);
    console.write_line(Stream::Stdout, ConsoleStyle::plain(), &line);
});
