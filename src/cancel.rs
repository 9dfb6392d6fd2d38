//! Cooperative cancellation for long-running walks.
//!
//! [`CancellationToken`] is a shared single-assignment flag: once cancelled
//! it stays cancelled. [`StopListener`] watches a line-oriented input for a
//! stop command and trips the token when it sees one.
//!
//! The listener runs on two threads. A forwarder performs the blocking reads
//! and hands each line over a channel. The listener thread waits on that
//! channel and on a shutdown channel at once, so it can always be stopped
//! and joined even while the forwarder is stuck in a read. The forwarder is
//! detached; it exits on the next line or at end of input.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, unbounded, Sender};

use crate::error::Result;

/// Default command that stops a walk.
pub const DEFAULT_STOP_COMMAND: &str = "stop";

// ---------------------------------------------------------------------------
// CancellationToken
// ---------------------------------------------------------------------------

/// Cheap, cloneable, single-assignment cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns `true` only for the call that actually
    /// flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.flag.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Whether `line` is the stop `command` (trimmed, case-insensitive).
pub fn is_stop_command(line: &str, command: &str) -> bool {
    line.trim().eq_ignore_ascii_case(command.trim())
}

// ---------------------------------------------------------------------------
// StopListener
// ---------------------------------------------------------------------------

/// Background watcher that cancels a token when the stop command arrives.
///
/// Call [`StopListener::shutdown`] once the walk is over; dropping the
/// listener does the same.
///
/// Shutdown does not stop the reader thread. It stays blocked in its read
/// until one more line (or end of input) arrives and then discards that
/// line. A later listener spawned on the same input therefore never sees
/// the first line typed after the previous shutdown; give each walk a
/// fresh input or expect the user to repeat the stop command.
#[derive(Debug)]
pub struct StopListener {
    done: Option<Sender<()>>,
    handle: Option<JoinHandle<bool>>,
}

impl StopListener {
    /// Start watching `input` for `command`.
    ///
    /// Unrelated lines are ignored. End of input (or a read error) ends the
    /// listener without cancelling anything.
    pub fn spawn<R>(input: R, command: impl Into<String>, token: CancellationToken) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let command = command.into();
        let (line_tx, line_rx) = unbounded::<String>();
        let (done_tx, done_rx) = bounded::<()>(1);

        thread::Builder::new()
            .name("stop-input".into())
            .spawn(move || {
                for line in input.lines() {
                    let Ok(line) = line else { break };
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
            })?;

        let handle = thread::Builder::new()
            .name("stop-listener".into())
            .spawn(move || loop {
                select! {
                    recv(line_rx) -> msg => match msg {
                        Ok(line) if is_stop_command(&line, &command) => {
                            if token.cancel() {
                                tracing::info!("stop requested");
                            }
                            return true;
                        }
                        Ok(line) => tracing::trace!(%line, "ignoring input"),
                        Err(_) => {
                            tracing::debug!("stop input closed");
                            return false;
                        }
                    },
                    recv(done_rx) -> _ => return false,
                }
            })?;

        Ok(Self {
            done: Some(done_tx),
            handle: Some(handle),
        })
    }

    /// True once the listener thread has exited on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop listening and join the listener thread. Returns whether the stop
    /// command was received.
    pub fn shutdown(mut self) -> bool {
        self.stop()
    }

    fn stop(&mut self) -> bool {
        if let Some(done) = self.done.take() {
            // Full or disconnected both mean the listener is already leaving.
            let _ = done.try_send(());
        }
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or(false),
            None => false,
        }
    }
}

impl Drop for StopListener {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
