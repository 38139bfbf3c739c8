use std::io::{self, Read};

use crate::http::exchange::{BodyLength, Exchange};
use crate::http::status::StatusCode;
use crate::response::{Response, SendError};

/// Sends whatever remains in `input`, then closes it.
///
/// The reader can only be consumed once, so a second `send` fails with
/// [`SendError::AlreadySent`]. A response that is never sent keeps `input`
/// open until the response itself is dropped.
pub fn binary_stream_response(
    mime_type: &str,
    input: impl Read + Send + 'static,
) -> Box<dyn Response> {
    Box::new(BinaryStreamResponse {
        mime_type: mime_type.to_string(),
        input: Some(Box::new(input)),
        sent: false,
    })
}

struct BinaryStreamResponse {
    mime_type: String,
    input: Option<Box<dyn Read + Send>>,
    sent: bool,
}

impl Response for BinaryStreamResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        if self.sent {
            return Err(SendError::AlreadySent);
        }
        self.sent = true;

        // Dropped at the end of this call whether or not the copy succeeds.
        let mut input = self.input.take().ok_or(SendError::AlreadySent)?;

        exchange.set_header("Content-Type", &self.mime_type);
        exchange.send_headers(StatusCode::OK, BodyLength::Streamed)?;
        io::copy(&mut input, exchange.body()?)?;
        Ok(())
    }
}
