//! HTTP/1.1 transport.
//!
//! - **`connection`**: per-socket request/response state machine
//! - **`parser`**: parses incoming requests from byte buffers
//! - **`request`**: request representation and builder
//! - **`exchange`**: the transport seam responses write through
//! - **`writer`**: frames a captured response onto the socket
//! - **`status`**: status codes and reason phrases
//! - **`mime`**: MIME type detection from file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Handler picks a Response, send() fills an Exchange
//!        └──────┬───────────┘
//!               │ Response captured
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Frame and send to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod exchange;
pub mod mime;
pub mod parser;
pub mod request;
pub mod status;
pub mod writer;
