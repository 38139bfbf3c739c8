//! The per-request transport seam seen by responses.
//!
//! A response gets one [`Exchange`] per request: it reads the raw query,
//! sets headers, commits the status and body framing once, then writes the
//! body. [`BufferedExchange`] is the in-memory implementation the
//! connection uses; the captured result is framed onto the socket by
//! [`crate::http::writer::ResponseWriter`].

use std::io::{self, Write};

use crate::http::status::StatusCode;

/// How the body length is announced to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLength {
    /// Exact byte count, sent as `Content-Length`.
    Known(u64),
    /// Unknown up front; the body is streamed with chunked framing.
    Streamed,
}

/// Transport access for a single HTTP exchange.
pub trait Exchange {
    /// The raw, still percent-encoded query string of the request.
    fn raw_query(&self) -> Option<&str>;

    /// Sets a response header, replacing any earlier value of the same name.
    fn set_header(&mut self, name: &str, value: &str);

    /// Commits the status line and body framing. May be called only once.
    fn send_headers(&mut self, status: StatusCode, length: BodyLength) -> io::Result<()>;

    /// The body sink. Only available after [`Exchange::send_headers`].
    fn body(&mut self) -> io::Result<&mut dyn Write>;
}

/// A response as captured by [`BufferedExchange`], ready to be framed.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub length: BodyLength,
    pub body: Vec<u8>,
}

impl CapturedResponse {
    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An [`Exchange`] that records everything a response does in memory.
#[derive(Debug, Default)]
pub struct BufferedExchange {
    raw_query: Option<String>,
    headers: Vec<(String, String)>,
    committed: Option<(StatusCode, BodyLength)>,
    body: Vec<u8>,
}

impl BufferedExchange {
    pub fn new(raw_query: Option<String>) -> Self {
        Self {
            raw_query,
            ..Self::default()
        }
    }

    /// Convenience for a request whose query string is `query`.
    pub fn with_query(query: &str) -> Self {
        Self::new(Some(query.to_string()))
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.committed.map(|(status, _)| status)
    }

    pub fn length(&self) -> Option<BodyLength> {
        self.committed.map(|(_, length)| length)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consumes the exchange. Fails if the response never committed its headers.
    pub fn finish(self) -> io::Result<CapturedResponse> {
        let (status, length) = self.committed.ok_or_else(|| {
            io::Error::other("response finished without sending headers")
        })?;

        Ok(CapturedResponse {
            status,
            headers: self.headers,
            length,
            body: self.body,
        })
    }
}

impl Exchange for BufferedExchange {
    fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    fn set_header(&mut self, name: &str, value: &str) {
        if self.committed.is_some() {
            tracing::warn!(header = name, "header set after headers were sent; ignored");
            return;
        }

        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn send_headers(&mut self, status: StatusCode, length: BodyLength) -> io::Result<()> {
        if self.committed.is_some() {
            return Err(io::Error::other("headers already sent"));
        }
        self.committed = Some((status, length));
        Ok(())
    }

    fn body(&mut self) -> io::Result<&mut dyn Write> {
        if self.committed.is_none() {
            return Err(io::Error::other("body written before headers were sent"));
        }
        Ok(&mut self.body)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
