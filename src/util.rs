use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Install the stderr fmt subscriber once. `RUST_LOG` wins over the `debug` flag.
pub fn init_tracing_once(debug: bool) {
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| if debug { "debug" } else { "info" }.to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(debug)
            .try_init();
    });
}

// Windows: sharing/lock violations and AV interference on freshly created files.
const TRANSIENT_OS_ERRORS: [i32; 6] = [5, 21, 32, 33, 225, 1006];

fn is_transient(e: &io::Error) -> bool {
    cfg!(windows) && e.raw_os_error().is_some_and(|code| TRANSIENT_OS_ERRORS.contains(&code))
}

/// Create a file that must not exist yet, retrying transient errors with linear backoff.
/// `AlreadyExists` is returned immediately.
pub fn create_new_with_backoff(path: &Path, tries: usize, delay_ms: u64) -> io::Result<File> {
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Err(e) if is_transient(&e) && attempt < tries as u64 => {
                tracing::debug!(path = %path.display(), attempt, error = %e, "Retrying file creation");
                std::thread::sleep(Duration::from_millis(delay_ms.saturating_mul(attempt)));
            }
            result => return result,
        }
    }
}
