//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use codeserver::http::exchange::{BodyLength, Exchange};
use codeserver::http::status::StatusCode;

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records every event into a buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer)
}

/// An exchange whose body sink is already closed by the peer.
#[derive(Default)]
pub struct BrokenExchange {
    pub headers_sent: bool,
}

impl Exchange for BrokenExchange {
    fn raw_query(&self) -> Option<&str> {
        None
    }

    fn set_header(&mut self, _name: &str, _value: &str) {}

    fn send_headers(&mut self, _status: StatusCode, _length: BodyLength) -> io::Result<()> {
        self.headers_sent = true;
        Ok(())
    }

    fn body(&mut self) -> io::Result<&mut dyn Write> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer hung up"))
    }
}
