#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let (sources, rest) = loghandle::config::extract_sources(data);
    assert!(rest.len() <= data.len() + 1);
    drop(sources);
});
