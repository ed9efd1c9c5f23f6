//! Stdin reader feeding direction changes into the frame loop.
//!
//! Lines are read on a dedicated OS thread with blocking I/O, so a pending
//! read never holds up runtime shutdown. Each line becomes one
//! [`Direction`]; the thread exits at end of input or once the frame loop
//! drops its receiver.

use std::io::BufRead;

use forage_core::input::direction_for_key;
use forage_types::Direction;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Capacity of the direction channel between stdin and the frame loop.
pub const INPUT_BUFFER: usize = 16;

/// Start forwarding lines from `reader` to `tx` on a background thread.
pub fn spawn_line_reader<B>(reader: B, tx: mpsc::Sender<Direction>) -> std::thread::JoinHandle<()>
where
    B: BufRead + Send + 'static,
{
    std::thread::spawn(move || forward_lines(reader, &tx))
}

fn forward_lines<B: BufRead>(reader: B, tx: &mpsc::Sender<Direction>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin read failed, input closed");
                return;
            }
        };
        let direction = direction_for_key(&line);
        debug!(key = line.trim(), dx = direction.dx(), dy = direction.dy(), "input");
        if tx.blocking_send(direction).is_err() {
            return;
        }
    }
    debug!("end of input");
}
