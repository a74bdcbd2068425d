//! Client Module
//!
//! HTTP session and response handling.

pub mod http;

pub use http::HttpClient;
