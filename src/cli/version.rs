//! Version output

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multi-line version banner. Commit, build time and toolchain are injected at
/// build time through `GONZO_GIT_COMMIT`, `GONZO_BUILD_TIME` and
/// `GONZO_RUSTC_VERSION`.
pub fn version_info() -> String {
    format!(
        "Gonzo - Log Analysis TUI\n  Version:    {}\n  Commit:     {}\n  Built:      {}\n  Rust:       {}\n",
        VERSION,
        option_env!("GONZO_GIT_COMMIT").unwrap_or("unknown"),
        option_env!("GONZO_BUILD_TIME").unwrap_or("unknown"),
        option_env!("GONZO_RUSTC_VERSION").unwrap_or("unknown"),
    )
}
