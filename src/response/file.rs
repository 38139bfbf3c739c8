use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::http::exchange::{BodyLength, Exchange};
use crate::http::status::StatusCode;
use crate::response::{ErrorPage, Response, SendError};

/// Sends a file verbatim with a known `Content-Length`.
///
/// Returns a 404 [`ErrorPage`] if `path` is not a regular file.
pub fn file_response(mime_type: &str, path: impl AsRef<Path>) -> Box<dyn Response> {
    let path = path.as_ref();
    if !path.is_file() {
        return Box::new(ErrorPage::new(format!("file not found: {}", path.display())));
    }

    Box::new(FileResponse {
        mime_type: mime_type.to_string(),
        path: path.to_path_buf(),
    })
}

/// Sends a text file, replacing every occurrence of `needle` on each line
/// with `replacement`. Lines may end in `\n`, `\r\n` or a lone `\r`, and
/// are re-terminated with `\n`. Bytes that are not valid UTF-8 are sent as
/// U+FFFD.
///
/// Returns a 404 [`ErrorPage`] if `path` is not a regular file.
pub fn text_template_response(
    mime_type: &str,
    path: impl AsRef<Path>,
    needle: &str,
    replacement: &str,
) -> Box<dyn Response> {
    let path = path.as_ref();
    if !path.is_file() {
        return Box::new(ErrorPage::new(format!("file not found: {}", path.display())));
    }

    Box::new(TextTemplateResponse {
        mime_type: mime_type.to_string(),
        path: path.to_path_buf(),
        needle: needle.to_string(),
        replacement: replacement.to_string(),
    })
}

struct FileResponse {
    mime_type: String,
    path: PathBuf,
}

impl Response for FileResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();

        exchange.set_header("Content-Type", &self.mime_type);
        exchange.send_headers(StatusCode::OK, BodyLength::Known(len))?;

        let copied = io::copy(&mut file, exchange.body()?)?;
        if copied != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} changed while sending", self.path.display()),
            )
            .into());
        }
        Ok(())
    }
}

struct TextTemplateResponse {
    mime_type: String,
    path: PathBuf,
    needle: String,
    replacement: String,
}

impl Response for TextTemplateResponse {
    fn send(&mut self, exchange: &mut dyn Exchange) -> Result<(), SendError> {
        let mut reader = BufReader::new(File::open(&self.path)?);

        exchange.set_header("Content-Type", &self.mime_type);
        exchange.send_headers(StatusCode::OK, BodyLength::Streamed)?;

        let out = exchange.body()?;
        let mut line = Vec::new();
        while read_line(&mut reader, &mut line)? {
            let text = String::from_utf8_lossy(&line);
            writeln!(out, "{}", text.replace(&self.needle, &self.replacement))?;
        }
        Ok(())
    }
}

/// Reads one line into `line` without its terminator. Returns `false` once
/// the input is exhausted.
fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(!line.is_empty());
        }

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let carriage_return = available[i] == b'\r';
                line.extend_from_slice(&available[..i]);
                reader.consume(i + 1);
                if carriage_return && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(true);
            }
            None => {
                let n = available.len();
                line.extend_from_slice(available);
                reader.consume(n);
            }
        }
    }
}
