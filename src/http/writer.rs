use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::exchange::{BodyLength, CapturedResponse};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Largest chunk emitted for streamed bodies.
pub const CHUNK_SIZE: usize = 8192;

fn serialize_response(resp: &CapturedResponse, keep_alive: bool) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(resp.body.len() + 256);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        // Framing headers are derived from the declared body length.
        if k.eq_ignore_ascii_case("Content-Length")
            || k.eq_ignore_ascii_case("Transfer-Encoding")
            || k.eq_ignore_ascii_case("Connection")
        {
            continue;
        }
        push_header(&mut buf, k, v);
    }

    match resp.length {
        BodyLength::Known(n) => {
            if n != resp.body.len() as u64 {
                anyhow::bail!(
                    "declared Content-Length {} but body has {} bytes",
                    n,
                    resp.body.len()
                );
            }
            push_header(&mut buf, "Content-Length", &n.to_string());
        }
        BodyLength::Streamed => push_header(&mut buf, "Transfer-Encoding", "chunked"),
    }

    if !keep_alive {
        push_header(&mut buf, "Connection", "close");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    match resp.length {
        BodyLength::Known(_) => buf.extend_from_slice(&resp.body),
        BodyLength::Streamed => {
            for chunk in resp.body.chunks(CHUNK_SIZE) {
                buf.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
                buf.extend_from_slice(chunk);
                buf.extend_from_slice(b"\r\n");
            }
            buf.extend_from_slice(b"0\r\n\r\n");
        }
    }

    Ok(buf)
}

fn push_header(buf: &mut Vec<u8>, key: &str, value: &str) {
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Writes a captured response to the client with HTTP/1.1 framing.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &CapturedResponse, keep_alive: bool) -> anyhow::Result<Self> {
        Ok(Self {
            buffer: serialize_response(response, keep_alive)?,
            written: 0,
        })
    }

    /// The serialized bytes, status line through final chunk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
