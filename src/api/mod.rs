//! Backend API plumbing
//!
//! - [`envelope`]: the response envelope and pagination contract
//! - [`transport`]: the [`Transport`](transport::Transport) seam plus HTTP
//!   and fake implementations
//! - [`client`]: [`RequestClient`], the one place envelopes are unwrapped

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::RequestClient;
pub use envelope::{
    ApiResponse, CodeClass, DatasetFilters, PageParams, PaginatedResponse, DEFAULT_PAGE_SIZE,
};
