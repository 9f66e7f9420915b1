mod client;

pub use client::{KeyApi, KeyApiClient};
