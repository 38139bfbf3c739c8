//! Responses the code server sends.
//!
//! Every response shape implements one contract, [`Response`]: given the
//! exchange for a request, produce exactly one complete HTTP response.
//! Constructors hand back `Box<dyn Response>`, so dispatchers never depend
//! on which variant they hold. Constructors that need a file or bundled
//! resource check for it up front and return an [`ErrorPage`] when it is
//! missing.
//!
//! ```ignore
//! let response = timed_response(json_response(state), "Sent status");
//! response.send(&mut exchange)?;
//! ```

pub mod callback;
pub mod file;
pub mod html;
pub mod json;
pub mod pages;
pub mod script;
pub mod stream;
pub mod timed;

use std::io;

use thiserror::Error;

use crate::http::exchange::Exchange;

pub use file::{file_response, text_template_response};
pub use json::json_response;
pub use pages::{html_page, ErrorPage, SERVER_NAME};
pub use script::{javascript_response, javascript_with_data_response};
pub use stream::binary_stream_response;
pub use timed::timed_response;

/// Why a send did not complete.
#[derive(Debug, Error)]
pub enum SendError {
    /// The transport failed while headers or body were being written.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// A single-use response was sent a second time. This is a caller bug.
    #[error("response was already sent")]
    AlreadySent,
}

/// Produces one complete HTTP response for one request.
///
/// On `Ok` the implementation has set `Content-Type`, committed a status
/// and body framing, and written the whole body.
pub trait Response: Send {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError>;
}
