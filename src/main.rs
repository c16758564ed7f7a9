//! Headless Combo Blocks driver (default binary).
//!
//! Reads one JSON command per stdin line and answers with one JSON response
//! per stdout line. See [`combo_blocks::driver`] for the message shapes.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use combo_blocks::driver::{handle_line, EventLog};
use combo_blocks::engine::Session;

fn main() -> Result<()> {
    let mut session = Session::from_env()?;
    let mut log = EventLog::from_env();

    eprintln!(
        "[Driver] ready: daily={} score={} moves={} game_over={}",
        session.state().is_daily,
        session.state().score,
        session.state().moves,
        session.state().game_over
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(&mut session, line);
        log.record(line, &response);

        buf.clear();
        serde_json::to_writer(&mut buf, &response)?;
        buf.push(b'\n');
        out.write_all(&buf)?;
        out.flush()?;
    }

    Ok(())
}
