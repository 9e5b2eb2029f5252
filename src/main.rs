//! gonzo: real-time log analysis terminal UI
//!
//! The binary resolves the runtime configuration and hands it to the
//! application.

use anyhow::Result;

fn main() -> Result<()> {
    gonzo::cli::run()
}
