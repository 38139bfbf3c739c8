use std::sync::Arc;

use anyhow::Context;
use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpStream;

use crate::http::exchange::{BufferedExchange, CapturedResponse};
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::status::StatusCode;
use crate::http::writer::ResponseWriter;
use crate::response::{ErrorPage, Response, SendError};
use crate::server::handler::Handler;

const READ_BUFFER_SIZE: usize = 4096;

pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: Arc<dyn Handler>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<dyn Handler>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            state: ConnectionState::Reading,
            handler,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => ConnectionState::Processing(req),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let captured = self.respond(&req).await?;

                    tracing::debug!(
                        method = ?req.method,
                        path = %req.path,
                        status = captured.status.as_u16(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&captured, keep_alive)?;
                    ConnectionState::Writing(writer, keep_alive)
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        ConnectionState::Reading // go back for next request
                    } else {
                        ConnectionState::Closed
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }
        }
    }

    /// Runs the handler and its response on the blocking pool and captures
    /// what was sent. A response that fails is replaced by a 500 error page.
    async fn respond(&self, req: &Request) -> anyhow::Result<CapturedResponse> {
        let handler = Arc::clone(&self.handler);
        let request = req.clone();
        let outcome = send_blocking(move || handler.handle(&request), req.query.clone()).await?;

        match outcome {
            Ok(captured) => Ok(captured),
            Err(e) => {
                tracing::error!(path = %req.path, error = %e, "Response failed");
                let page = ErrorPage::with_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("error while sending {}: {}", req.path, e),
                );
                let fallback = move || -> Box<dyn Response> { Box::new(page) };
                Ok(send_blocking(fallback, req.query.clone()).await??)
            }
        }
    }
}

/// Builds a response with `make` and sends it into a fresh exchange, both on
/// the blocking pool. Construction may stat files and sending does
/// synchronous file I/O.
async fn send_blocking<F>(
    make: F,
    raw_query: Option<String>,
) -> anyhow::Result<Result<CapturedResponse, SendError>>
where
    F: FnOnce() -> Box<dyn Response> + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<CapturedResponse, SendError> {
        let mut response = make();
        let mut exchange = BufferedExchange::new(raw_query);
        response.send(&mut exchange)?;
        Ok(exchange.finish()?)
    })
    .await
    .context("response task failed")
}
