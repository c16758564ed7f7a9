//! Driver module - line-delimited JSON over stdin/stdout
//!
//! One request per line, one response per line:
//!
//! ```text
//! {"cmd":"place","piece":"i1","row":0,"col":0,"time":1000}
//! {"cmd":"restart","daily":true}
//! {"cmd":"leaderboard"}
//! {"cmd":"share"}
//! {"cmd":"state"}
//! ```
//!
//! Responses carry a `type` of `state`, `error`, `leaderboard` or `share`.
//! A line that does not parse yields an `error` with code `bad_request`.

use std::fs::{File, OpenOptions};
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::seed::now_ms;
use crate::core::GameState;
use crate::engine::{PlaceError, Session};
use crate::store::KvStore;
use crate::types::{GameEvent, LeaderboardEntry};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    Place {
        piece: String,
        row: i32,
        col: i32,
        /// Epoch milliseconds; the wall clock when omitted.
        #[serde(default)]
        time: Option<u64>,
    },
    Restart {
        #[serde(default)]
        daily: bool,
    },
    Leaderboard,
    Share,
    State,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    State {
        state: GameState,
        events: Vec<GameEvent>,
    },
    Error {
        code: String,
        message: String,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Share {
        token: String,
        url: String,
    },
}

impl Response {
    fn state(state: &GameState, events: Vec<GameEvent>) -> Self {
        Response::State {
            state: state.clone(),
            events,
        }
    }

    fn error(code: &str, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<PlaceError> for Response {
    fn from(err: PlaceError) -> Self {
        Response::error(err.code(), err.message())
    }
}

pub fn handle_request<S: KvStore>(session: &mut Session<S>, request: Request) -> Response {
    match request {
        Request::Place {
            piece,
            row,
            col,
            time,
        } => match session.place(&piece, row, col, time) {
            Ok(outcome) => Response::state(&outcome.state, outcome.events),
            Err(err) => err.into(),
        },
        Request::Restart { daily } => Response::state(session.restart(daily), Vec::new()),
        Request::Leaderboard => Response::Leaderboard {
            entries: session.leaderboard(),
        },
        Request::Share => Response::Share {
            token: session.share_token(),
            url: session.share_url(),
        },
        Request::State => Response::state(session.state(), Vec::new()),
    }
}

/// Parse and handle one input line
pub fn handle_line<S: KvStore>(session: &mut Session<S>, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(session, request),
        Err(e) => Response::error("bad_request", e.to_string()),
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    request: &'a str,
    response: &'a Response,
}

/// Append-only JSON-lines log of processed commands
///
/// The first failed write disables the log for the rest of the run.
pub struct EventLog {
    file: Option<File>,
    buf: Vec<u8>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self {
            file: None,
            buf: Vec::new(),
        }
    }

    pub fn open(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                file: Some(file),
                buf: Vec::with_capacity(4096),
            },
            Err(e) => {
                eprintln!("[Driver] event log disabled, cannot open {}: {}", path, e);
                Self::disabled()
            }
        }
    }

    /// Open `COMBO_BLOCKS_LOG_PATH` if set
    pub fn from_env() -> Self {
        let path = std::env::var("COMBO_BLOCKS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        match path {
            Some(path) => Self::open(&path),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn record(&mut self, request: &str, response: &Response) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let record = LogRecord {
            ts: now_ms(),
            request,
            response,
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if file.write_all(&self.buf).is_err() {
            self.file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeedSource;
    use crate::engine::SessionConfig;
    use crate::store::MemoryStore;

    fn session() -> Session<MemoryStore> {
        Session::with_seeds(
            MemoryStore::new(),
            SessionConfig::default(),
            SeedSource::Fixed("driver-tests".to_string()),
        )
    }

    fn to_value(response: &Response) -> serde_json::Value {
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_parse_place_request() {
        let req: Request =
            serde_json::from_str(r#"{"cmd":"place","piece":"i1","row":2,"col":3}"#).unwrap();
        assert_eq!(
            req,
            Request::Place {
                piece: "i1".to_string(),
                row: 2,
                col: 3,
                time: None,
            }
        );
    }

    #[test]
    fn test_bad_request() {
        let mut s = session();
        let v = to_value(&handle_line(&mut s, "{\"cmd\":\"fly\"}"));
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "bad_request");

        let v = to_value(&handle_line(&mut s, "not json"));
        assert_eq!(v["code"], "bad_request");
    }

    #[test]
    fn test_place_then_state() {
        let mut s = session();
        let id = s.state().tray[0].id.clone();
        let line = format!(r#"{{"cmd":"place","piece":"{}","row":0,"col":0,"time":5}}"#, id);

        let v = to_value(&handle_line(&mut s, &line));
        assert_eq!(v["type"], "state");
        assert_eq!(v["state"]["moves"], 1);
        assert_eq!(v["state"]["startTime"], 5);
        assert!(v["events"].is_array());

        let v = to_value(&handle_line(&mut s, r#"{"cmd":"state"}"#));
        assert_eq!(v["state"]["moves"], 1);
    }

    #[test]
    fn test_place_error_codes() {
        let mut s = session();
        let v = to_value(&handle_line(
            &mut s,
            r#"{"cmd":"place","piece":"nope","row":0,"col":0}"#,
        ));
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "unknown_piece");
    }

    #[test]
    fn test_place_at_i32_bounds_is_invalid() {
        let mut s = session();
        let before = s.state().clone();

        for piece in &before.tray {
            for (row, col) in [(i32::MAX, 0), (i32::MIN, i32::MAX)] {
                let line = format!(
                    r#"{{"cmd":"place","piece":"{}","row":{},"col":{},"time":1}}"#,
                    piece.id, row, col
                );
                let v = to_value(&handle_line(&mut s, &line));
                assert_eq!(v["code"], "invalid_place");
            }
        }
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_restart_leaderboard_share() {
        let mut s = session();

        let v = to_value(&handle_line(&mut s, r#"{"cmd":"restart","daily":true}"#));
        assert_eq!(v["state"]["isDaily"], true);

        let v = to_value(&handle_line(&mut s, r#"{"cmd":"leaderboard"}"#));
        assert_eq!(v["type"], "leaderboard");
        assert_eq!(v["entries"].as_array().map(|a| a.len()), Some(0));

        let v = to_value(&handle_line(&mut s, r#"{"cmd":"share"}"#));
        assert_eq!(v["type"], "share");
        let token = v["token"].as_str().unwrap();
        assert!(v["url"].as_str().unwrap().ends_with(token));
    }

    #[test]
    fn test_event_log_writes_lines() {
        let dir = std::env::temp_dir().join(format!("combo-blocks-log-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("events.jsonl");
        let _ = std::fs::remove_file(&path);

        let mut log = EventLog::open(path.to_str().unwrap());
        assert!(log.is_enabled());

        let mut s = session();
        let response = handle_line(&mut s, r#"{"cmd":"state"}"#);
        log.record(r#"{"cmd":"state"}"#, &response);
        log.record("bad", &Response::error("bad_request", "x"));
        drop(log);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["response"]["type"], "state");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let mut log = EventLog::disabled();
        assert!(!log.is_enabled());
        log.record("x", &Response::error("bad_request", "x"));
    }
}
