//! Lexical path normalization.
//!
//! Requested paths arrive in whatever convention the calling tool used:
//! forward or backward slashes, redundant separators, `.` and `..`
//! segments. Rule matching happens on a single canonical form so that
//! `.\Context\notes.md` and `./Context/notes.md` hit the same rules.
//! Normalization never consults the file system; symlinks and the
//! current directory are invisible here.

/// Convert backslashes to forward slashes, leaving everything else alone.
///
/// Rule entries are written in either separator convention (the built-in
/// blocked list contains `C:\Windows\System32`); prefix comparison happens
/// on the slashed form of both sides.
pub fn normalize_separators(s: &str) -> String {
    s.replace('\\', "/")
}

/// Reduce a requested path to its canonical slashed form.
///
/// * backslashes become forward slashes
/// * runs of separators collapse to one
/// * `.` segments are dropped
/// * `..` consumes the preceding segment where one exists; at the root of
///   an absolute path it is dropped, and leading `..` segments of a
///   relative path are kept
/// * an explicit leading `./` on a relative path is kept, so rule entries
///   written with a `./` prefix stay matchable
/// * trailing separators are stripped (the bare root stays `/`)
/// * the empty string becomes `.`
pub fn normalize_path(raw: &str) -> String {
    let slashed = normalize_separators(raw);

    let absolute = slashed.starts_with('/');
    let explicit_relative = !absolute && (slashed == "." || slashed.starts_with("./"));

    let mut segments: Vec<&str> = Vec::new();
    for segment in slashed.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&prev) if prev != ".." => {
                    segments.pop();
                }
                // Nothing left to pop: `..` at an absolute root vanishes,
                // a relative path keeps it.
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else if explicit_relative && segments[0] != ".." {
        format!("./{joined}")
    } else {
        joined
    }
}
