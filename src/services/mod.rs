//! Resource service modules
//!
//! Each service binds logical operations to `(verb, path, payload, result)`
//! over a shared [`RequestClient`](crate::api::RequestClient). Services never
//! retry, cache, validate, or catch: every error from the client reaches the
//! caller unchanged.

pub mod dataset;
pub mod user;

pub use dataset::DatasetService;
pub use user::UserService;
