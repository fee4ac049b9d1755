//! # Gemini Integration Module
//!
//! The concrete [`SetFetcher`](crate::retrieval::SetFetcher) used by the CLI. It
//! asks the Gemini `generateContent` endpoint for the full inventory of a set,
//! with web-search grounding enabled and a structured JSON response schema.
//!
//! ```text
//! retrieval::search
//!          ↓
//! GeminiClient (prompt, schema, retries)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Gemini API
//! ```
//!
//! The response text is parsed into a [`RawSetData`](crate::types::RawSetData);
//! the grounding chunks of the first candidate become the set's external URLs.
//! An empty response text counts as a missing payload.
//!
//! ## Rate Limiting
//!
//! - 429 responses honour `Retry-After` up to 120 seconds, 5 seconds without it
//! - 502 responses are retried after 10 seconds
//! - at most [`client::MAX_ATTEMPTS`] requests are made per fetch

pub mod client;
pub mod schema;

pub use client::GeminiClient;
