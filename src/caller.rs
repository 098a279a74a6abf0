//! Runtime caller resolution: which module (or type) is N frames above the call.
//!
//! Resolution reads symbol names from a captured [`Backtrace`], so it needs symbols
//! in the binary. Stripped builds get [`Error::CallerUnresolved`] and callers are
//! expected to fall back to something static such as `module_path!()`.

use crate::Error;
use std::backtrace::Backtrace;

const ANCHOR: &str = "caller::stack_ancestor";

/// Path of the function `generations_back` frames above the caller of this function.
///
/// `0` names the function that calls `stack_ancestor`, `1` that function's caller,
/// and so on. Free functions resolve to their module path, methods to their type.
///
/// # Errors
/// [`Error::InvalidOffset`] for a negative offset, before any stack capture.
/// [`Error::CallerUnresolved`] when the stack has no readable frame at that depth.
#[inline(never)]
pub fn stack_ancestor(generations_back: i32) -> Result<String, Error> {
    let depth =
        usize::try_from(generations_back).map_err(|_| Error::InvalidOffset(generations_back))?;

    let trace = Backtrace::force_capture().to_string();
    let symbols = frame_symbols(&trace);
    let anchor = symbols
        .iter()
        .position(|s| strip_hash(s).ends_with(ANCHOR))
        .ok_or(Error::CallerUnresolved(generations_back))?;

    symbols
        .get(anchor + 1 + depth)
        .and_then(|symbol| owner_path(symbol))
        .ok_or(Error::CallerUnresolved(generations_back))
}

/// Symbol names from a rendered backtrace, innermost first. Inlined functions
/// count as frames of their own.
fn frame_symbols(trace: &str) -> Vec<&str> {
    trace
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("at "))
        .map(|line| match line.split_once(": ") {
            Some((index, symbol)) if index.chars().all(|c| c.is_ascii_digit()) => symbol,
            _ => line,
        })
        .collect()
}

/// Drops a legacy-mangling hash suffix (`::h0123456789abcdef`).
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

/// `app::net::connect` -> `app::net`, `<app::Conn as Drop>::drop` -> `app::Conn`,
/// `app::Conn::open::{{closure}}` -> `app::Conn`.
fn owner_path(symbol: &str) -> Option<String> {
    let symbol = strip_hash(symbol.trim());

    if let Some(inner) = symbol.strip_prefix('<') {
        let close = matching_close(inner)?;
        let qualified = &inner[..close];
        let ty = qualified.split(" as ").next().unwrap_or(qualified);
        let path = join_segments(&strip_generics(ty), false);
        return (!path.is_empty()).then_some(path);
    }

    let path = join_segments(&strip_generics(symbol), true);
    (!path.is_empty()).then_some(path)
}

/// Index of the `>` closing an already-opened `<`.
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn strip_generics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Rejoins `::` segments, skipping closure markers and empty leftovers, optionally
/// dropping the trailing function name.
fn join_segments(path: &str, drop_fn: bool) -> String {
    let mut segments: Vec<&str> = path
        .split("::")
        .map(str::trim)
        .filter(|seg| !seg.is_empty() && !seg.starts_with('{'))
        .collect();
    if drop_fn {
        segments.pop();
    }
    segments.join("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_offset_is_rejected() {
        assert!(matches!(stack_ancestor(-1), Err(Error::InvalidOffset(-1))));
    }

    #[test]
    fn free_functions_resolve_to_their_module() {
        assert_eq!(owner_path("app::net::connect").as_deref(), Some("app::net"));
        assert_eq!(
            owner_path("app::net::connect::h0123456789abcdef").as_deref(),
            Some("app::net")
        );
    }

    #[test]
    fn trait_impls_resolve_to_the_type() {
        assert_eq!(
            owner_path("<app::Conn as core::ops::drop::Drop>::drop").as_deref(),
            Some("app::Conn")
        );
        assert_eq!(owner_path("<app::Conn>::open").as_deref(), Some("app::Conn"));
        assert_eq!(
            owner_path("<app::Wrap<u8> as core::fmt::Debug>::fmt::{{closure}}").as_deref(),
            Some("app::Wrap")
        );
    }

    #[test]
    fn closures_and_generics_are_skipped() {
        assert_eq!(
            owner_path("app::Conn::open::{{closure}}").as_deref(),
            Some("app::Conn")
        );
        assert_eq!(owner_path("app::run::<i32>").as_deref(), Some("app"));
        assert_eq!(owner_path("main"), None);
    }

    #[test]
    fn frame_symbols_reads_numbered_and_inlined_lines() {
        let trace = "   0: std::backtrace::Backtrace::create\n             at /rustc/x/backtrace.rs:331:13\n   1: loghandle::caller::stack_ancestor\n      app::inlined_helper\n             at src/app.rs:3:5\n   2: app::main\n";
        assert_eq!(
            frame_symbols(trace),
            vec![
                "std::backtrace::Backtrace::create",
                "loghandle::caller::stack_ancestor",
                "app::inlined_helper",
                "app::main",
            ]
        );
    }

    #[test]
    fn resolves_this_module_when_symbols_are_available() {
        // Stripped test binaries cannot resolve anything; only check a successful answer.
        if let Ok(path) = stack_ancestor(0) {
            assert!(path.contains("caller"), "unexpected caller path {path}");
        }
    }
}
