use std::io::Write;

use serde_json::Value;
use tracing::error;

use crate::http::exchange::{BodyLength, Exchange};
use crate::http::status::StatusCode;
use crate::response::callback::{callback_parameter, is_safe_callback};
use crate::response::{Response, SendError};

/// Sends `data` as JSON, or as JSONP when the request carries `_callback`.
///
/// A callback that is not a plain dotted identifier is never called: the
/// body becomes an alert statement followed by the bare JSON.
pub fn json_response(data: Value) -> Box<dyn Response> {
    Box::new(JsonResponse { data })
}

struct JsonResponse {
    data: Value,
}

impl Response for JsonResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        exchange.set_header("Cache-control", "no-cache");
        let callback = callback_parameter(exchange.raw_query());
        let content_type = match callback {
            None => "application/json",
            Some(_) => "application/javascript",
        };
        exchange.set_header("Content-Type", content_type);
        exchange.send_headers(StatusCode::OK, BodyLength::Streamed)?;

        let out = exchange.body()?;
        match callback {
            // AJAX
            None => write_json(out, &self.data)?,
            Some(cb) if is_safe_callback(&cb) => {
                write!(out, "/* API response */ {cb}(")?;
                write_json(out, &self.data)?;
                out.write_all(b");\n")?;
            }
            Some(cb) => {
                error!("invalid callback: {}", cb);
                out.write_all(b"alert('invalid callback parameter');\n")?;
                write_json(out, &self.data)?;
            }
        }
        Ok(())
    }
}

fn write_json(out: &mut dyn Write, data: &Value) -> std::io::Result<()> {
    serde_json::to_writer(out, data).map_err(std::io::Error::from)
}
