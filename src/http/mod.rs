//! HTTP client module for API testing
//!
//! Provides HTTP client functionality for exercising the API under test.

mod client;

pub use client::{HttpClient, HttpError, HttpResponse};
