mod common;

use codeserver::http::exchange::{BodyLength, BufferedExchange};
use codeserver::http::status::StatusCode;
use codeserver::resources::{EmbeddedResources, ResourceDir};
use codeserver::response::html::{escape, HtmlWriter};
use codeserver::response::{html_page, ErrorPage, Response, SendError};
use serde_json::json;

use common::{capture_logs, BrokenExchange};

#[test]
fn test_error_page_layout() {
    let mut exchange = BufferedExchange::default();
    ErrorPage::new("module not compiled yet").send(&mut exchange).unwrap();

    assert_eq!(exchange.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(exchange.header("Content-Type"), Some("text/html"));
    assert_eq!(exchange.length(), Some(BodyLength::Streamed));
    assert_eq!(
        exchange.body_text(),
        "<html>\n\
         <head>\n\
         <title>Unavailable (Code Server)</title>\n\
         </head>\n\
         <body>\n\
         <p>module not compiled yet</p></body>\n\
         </html>\n"
    );
}

#[test]
fn test_error_page_escapes_message() {
    let mut exchange = BufferedExchange::default();
    ErrorPage::new("<script>alert('x') & more</script>")
        .send(&mut exchange)
        .unwrap();

    let body = exchange.body_text();
    assert!(body.contains("&lt;script&gt;alert(&#39;x&#39;) &amp; more&lt;/script&gt;"));
    assert!(!body.contains("<script>"));
}

#[test]
fn test_error_page_explicit_status() {
    let mut exchange = BufferedExchange::default();
    ErrorPage::with_status(StatusCode::SERVICE_UNAVAILABLE, "compiler busy")
        .send(&mut exchange)
        .unwrap();

    assert_eq!(exchange.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert!(exchange.body_text().contains("<p>compiler busy</p>"));
}

#[test]
fn test_error_page_logs_message() {
    let (_, logs) = capture_logs(|| {
        ErrorPage::new("no such module: hello")
            .send(&mut BufferedExchange::default())
            .unwrap();
    });

    let lines = logs.lines_containing("Sent error page: no such module: hello");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("INFO"));
}

#[test]
fn test_error_page_logs_even_when_write_fails() {
    let (result, logs) = capture_logs(|| {
        ErrorPage::new("gone").send(&mut BrokenExchange::default())
    });

    assert!(matches!(result, Err(SendError::Io(_))));
    assert_eq!(logs.lines_containing("Sent error page: gone").len(), 1);
}

#[test]
fn test_html_page_embeds_data_before_resource() {
    let resources = EmbeddedResources::new().with("shell.html", b"<body>hello</body>\n");
    let mut exchange = BufferedExchange::default();
    html_page("__config", json!({"modules": ["hello"]}), "shell.html", &resources)
        .send(&mut exchange)
        .unwrap();

    assert_eq!(exchange.status(), Some(StatusCode::OK));
    assert_eq!(exchange.header("Content-Type"), Some("text/html"));
    assert_eq!(exchange.length(), Some(BodyLength::Streamed));
    assert_eq!(
        exchange.body_text(),
        "<!DOCTYPE html>\n<script>\nwindow.__config = {\"modules\":[\"hello\"]};\n</script>\n<body>hello</body>\n"
    );
}

#[test]
fn test_html_page_reads_resource_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("frontpage.html"), "<p>front</p>").unwrap();
    let resources = ResourceDir::new(dir.path());

    let mut exchange = BufferedExchange::default();
    html_page("x", json!(0), "frontpage.html", &resources)
        .send(&mut exchange)
        .unwrap();

    assert!(exchange.body_text().ends_with("window.x = 0;\n</script>\n<p>front</p>"));
}

#[test]
fn test_html_page_missing_resource_is_404() {
    let resources = EmbeddedResources::new();
    let mut exchange = BufferedExchange::default();
    html_page("x", json!({}), "missing.html", &resources)
        .send(&mut exchange)
        .unwrap();

    assert_eq!(exchange.status(), Some(StatusCode::NOT_FOUND));
    assert!(exchange.body_text().contains("resource not found: missing.html"));
}

#[test]
fn test_html_writer_does_not_escape_tags() {
    let mut out = HtmlWriter::new(Vec::new());
    out.start_tag("div")
        .and_then(|w| w.text("1 > 0"))
        .and_then(|w| w.end_tag("div"))
        .unwrap();

    assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "<div>1 &gt; 0</div>");
}

#[test]
fn test_escape_leaves_plain_text_alone() {
    assert_eq!(escape("plain text 123"), "plain text 123");
    assert_eq!(escape("<>&"), "&lt;&gt;&amp;");
}
