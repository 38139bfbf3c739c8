//! codeserver - response layer of a development code server
//!
//! Streams compiled scripts, serves JSON/JSONP state for polling clients,
//! static HTML shells with embedded bootstrap data, and error pages.

pub mod config;
pub mod http;
pub mod resources;
pub mod response;
pub mod server;
