pub mod client;
pub mod error;
pub mod normalize;
mod provider;
mod retry;
pub mod types;

pub use client::SerpApiClient;
pub use error::SerpApiError;
pub use types::SerpApiResponse;
