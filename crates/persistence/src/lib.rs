//! Local persistence for the loan chat client
//!
//! The only durable value is the customer identifier, kept in a small
//! file so the backend recognizes the same customer across runs.

pub mod customer;
pub mod error;

pub use customer::CustomerIdStore;
pub use error::PersistenceError;
