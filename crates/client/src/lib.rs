//! Loan advisor backend client
//!
//! The backend may be mounted at the root, under a configured prefix or
//! behind an `/api` proxy segment. Every call resolves a list of
//! endpoint variants and walks them until one answers.

pub mod http;
pub mod paths;

pub use http::LoanApiClient;
pub use paths::EndpointResolver;
