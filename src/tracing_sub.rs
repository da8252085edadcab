//! Tracing initialization. The UI owns the alternate screen, so logs only
//! make sense when routed to a file; without `--log-file` nothing is
//! installed and all spans are no-ops.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt;

pub fn init(log_file: Option<&Path>, level: Level) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    // try_init so tests and embedders that already installed a subscriber
    // are left alone
    let _ = fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
