use serde_json::Value;

use crate::http::exchange::{BodyLength, Exchange};
use crate::http::status::StatusCode;
use crate::resources::{Resource, Resources};
use crate::response::{ErrorPage, Response, SendError};

/// Sends a complete script held in memory.
pub fn javascript_response(script: impl Into<String>) -> Box<dyn Response> {
    Box::new(ScriptResponse {
        script: script.into(),
    })
}

/// Sends a bundled script with `window.<variable_name> = <data>;` prepended.
///
/// Returns a 404 [`ErrorPage`] if the resource does not resolve.
pub fn javascript_with_data_response(
    variable_name: &str,
    data: Value,
    resource_name: &str,
    resources: &dyn Resources,
) -> Box<dyn Response> {
    match resources.resolve(resource_name) {
        Some(resource) => Box::new(ScriptWithDataResponse {
            variable_name: variable_name.to_string(),
            data,
            resource,
        }),
        None => Box::new(ErrorPage::new(format!("resource not found: {resource_name}"))),
    }
}

struct ScriptResponse {
    script: String,
}

impl Response for ScriptResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        let bytes = self.script.as_bytes();
        exchange.set_header("Content-Type", "application/javascript");
        exchange.send_headers(StatusCode::OK, BodyLength::Known(bytes.len() as u64))?;
        exchange.body()?.write_all(bytes)?;
        Ok(())
    }
}

struct ScriptWithDataResponse {
    variable_name: String,
    data: Value,
    resource: Resource,
}

impl Response for ScriptWithDataResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        exchange.set_header("Content-Type", "application/javascript");
        exchange.send_headers(StatusCode::OK, BodyLength::Streamed)?;

        let out = exchange.body()?;
        write!(out, "window.{} = ", self.variable_name)?;
        serde_json::to_writer(&mut *out, &self.data).map_err(std::io::Error::from)?;
        out.write_all(b";\n")?;

        self.resource.copy_to(out)?;
        Ok(())
    }
}
