pub mod client;
pub mod source;
pub mod types;

pub use client::GitHubClient;
pub use source::EventSource;
