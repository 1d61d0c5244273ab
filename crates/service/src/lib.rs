//! Service layer: one function per endpoint, each issuing a single statement.
//! - Handlers in `server` stay free of SeaORM query building.
//! - Errors are reported as [`errors::ServiceError`] and mapped to HTTP there.

pub mod errors;
pub mod counter_service;
pub mod album_service;
#[cfg(test)]
pub mod test_support;
