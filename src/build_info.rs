//! Compile-time build information shown by `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `warpath 0.1.0 (3f2a9c1 2026-10-19)`.
/// Debug builds carry a `[debug]` suffix.
pub fn version_line() -> String {
    let mut line = format!(
        "warpath {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    );
    if BUILD_PROFILE == "debug" {
        line.push_str(" [debug]");
    }
    line
}
