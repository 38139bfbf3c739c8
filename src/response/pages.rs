//! Responses that send HTML documents.

use serde_json::Value;
use tracing::info;

use crate::http::exchange::{BodyLength, Exchange};
use crate::http::status::StatusCode;
use crate::resources::{Resource, Resources};
use crate::response::html::HtmlWriter;
use crate::response::{Response, SendError};

/// Shown in the title of every error page.
pub const SERVER_NAME: &str = "Code Server";

/// Sends a bundled HTML resource with `window.<variable_name>` set to
/// `data` in a script block ahead of it.
///
/// Falls back to a 404 [`ErrorPage`] when the resource does not resolve.
pub fn html_page(
    variable_name: &str,
    data: Value,
    resource_name: &str,
    resources: &dyn Resources,
) -> Box<dyn Response> {
    match resources.resolve(resource_name) {
        Some(resource) => Box::new(HtmlPage {
            variable_name: variable_name.to_string(),
            data,
            resource,
        }),
        None => Box::new(ErrorPage::new(format!("resource not found: {resource_name}"))),
    }
}

pub struct HtmlPage {
    variable_name: String,
    data: Value,
    resource: Resource,
}

impl Response for HtmlPage {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        exchange.set_header("Content-Type", "text/html");
        exchange.send_headers(StatusCode::OK, BodyLength::Streamed)?;

        let out = exchange.body()?;
        out.write_all(b"<!DOCTYPE html>\n<script>\n")?;
        write!(out, "window.{} = ", self.variable_name)?;
        serde_json::to_writer(&mut *out, &self.data).map_err(std::io::Error::from)?;
        out.write_all(b";\n</script>\n")?;

        self.resource.copy_to(out)?;
        Ok(())
    }
}

/// A minimal HTML page explaining why something could not be served.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    status: StatusCode,
    message: String,
}

impl ErrorPage {
    /// A 404 page carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, message)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn write_page(&self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        exchange.set_header("Content-Type", "text/html");
        exchange.send_headers(self.status, BodyLength::Streamed)?;

        let mut out = HtmlWriter::new(exchange.body()?);
        out.start_tag("html")?.nl()?;

        out.start_tag("head")?.nl()?;
        out.start_tag("title")?
            .text(&format!("Unavailable ({SERVER_NAME})"))?
            .end_tag("title")?
            .nl()?;
        out.end_tag("head")?.nl()?;

        out.start_tag("body")?.nl()?;
        out.start_tag("p")?.text(&self.message)?.end_tag("p")?;
        out.end_tag("body")?.nl()?;

        out.end_tag("html")?.nl()?;
        out.flush()?;
        Ok(())
    }
}

impl Response for ErrorPage {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        let result = self.write_page(exchange);
        info!("Sent error page: {}", self.message);
        result
    }
}
