//! Stop signal and bounded cleanup
//!
//! SIGINT/SIGTERM land in [`SHUTDOWN`], which the render task selects on
//! between ticks. A second signal while cleanup is running exits at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use statline_core::traits::DisplayError;
use thiserror::Error;

/// Raised once when the process is asked to stop
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

static REQUESTED: AtomicBool = AtomicBool::new(false);

/// Shutdown errors
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("display cleanup did not finish within {0:?}")]
    Timeout(Duration),

    #[error("display cleanup failed: {0}")]
    Display(#[from] DisplayError),

    #[error("display cleanup thread panicked")]
    Panicked,

    #[error("failed to start cleanup thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Install the SIGINT/SIGTERM handler
pub fn install_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if REQUESTED.swap(true, Ordering::SeqCst) {
            // Second signal - force exit
            std::process::exit(130);
        }
        SHUTDOWN.signal(());
    })
}

/// Run `cleanup` on a helper thread and wait at most `grace` for it
///
/// On timeout the thread is left behind; the caller is about to exit.
pub fn run_with_grace<F>(grace: Duration, cleanup: F) -> Result<(), ShutdownError>
where
    F: FnOnce() -> Result<(), DisplayError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("statline-cleanup".into())
        .spawn(move || {
            let _ = tx.send(cleanup());
        })
        .map_err(ShutdownError::Spawn)?;

    match rx.recv_timeout(grace) {
        Ok(result) => result.map_err(ShutdownError::from),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(ShutdownError::Timeout(grace)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(ShutdownError::Panicked),
    }
}
