use std::time::Instant;

use tracing::info;

use crate::http::exchange::Exchange;
use crate::response::{Response, SendError};

/// Wraps `inner` and logs `"<message> in <n> ms"` after it sends successfully.
///
/// Failures pass through untouched and are not timed.
pub fn timed_response(inner: Box<dyn Response>, message: impl Into<String>) -> Box<dyn Response> {
    Box::new(TimedResponse {
        inner,
        message: message.into(),
    })
}

struct TimedResponse {
    inner: Box<dyn Response>,
    message: String,
}

impl Response for TimedResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        let start = Instant::now();
        self.inner.send(exchange)?;
        info!("{} in {} ms", self.message, start.elapsed().as_millis());
        Ok(())
    }
}
