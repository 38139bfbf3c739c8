//! Dispatch from a request to the response that answers it.

use std::sync::Arc;

use serde_json::json;

use crate::http::mime;
use crate::http::request::{Method, Request};
use crate::http::status::StatusCode;
use crate::resources::{ResourceDir, Resources};
use crate::response::{
    ErrorPage, Response, file_response, html_page, javascript_with_data_response, json_response,
    timed_response,
};

/// Picks one response per request. Called once per request.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &Request) -> Box<dyn Response>;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Box<dyn Response> + Send + Sync + 'static,
{
    fn handle(&self, request: &Request) -> Box<dyn Response> {
        self(request)
    }
}

/// Global variable the bundled pages read server info from.
pub const INFO_VARIABLE: &str = "__codeserver";

/// The binary's default dispatcher.
///
/// `/` serves `index.html` with server info embedded, `/status` serves the
/// same info as JSON (or JSONP), `/info.js` serves `info.js` with the info
/// prepended, and anything else is looked up as a file under the
/// resource directory.
pub struct DevHandler {
    resources: Arc<dyn Resources>,
    files: ResourceDir,
}

impl DevHandler {
    pub fn new(resources: Arc<dyn Resources>, files: ResourceDir) -> Self {
        Self { resources, files }
    }

    fn info(&self) -> serde_json::Value {
        json!({
            "server": crate::response::SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "resourceRoot": self.files.root().display().to_string(),
        })
    }
}

impl Handler for DevHandler {
    fn handle(&self, request: &Request) -> Box<dyn Response> {
        if request.method != Method::GET {
            return Box::new(ErrorPage::with_status(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("method not allowed: {:?}", request.method),
            ));
        }

        let response = match request.path.as_str() {
            "/" => html_page(INFO_VARIABLE, self.info(), "index.html", self.resources.as_ref()),
            "/status" => json_response(self.info()),
            "/info.js" => javascript_with_data_response(
                INFO_VARIABLE,
                self.info(),
                "info.js",
                self.resources.as_ref(),
            ),
            path => match self.files.path_for(path) {
                Some(file) => file_response(mime::content_type(&file), file),
                None => Box::new(ErrorPage::with_status(
                    StatusCode::FORBIDDEN,
                    format!("path outside resource root: {path}"),
                )),
            },
        };

        timed_response(response, format!("Sent {}", request.path))
    }
}
