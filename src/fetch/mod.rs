mod client;
mod fetch_error;

pub use client::ListingClient;
pub use fetch_error::FetchError;
