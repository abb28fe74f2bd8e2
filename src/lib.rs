//! # wikiq
//!
//! A CLI that turns free-form requests into Wikipedia queries and prints
//! article summaries.
//!
//! ## Pipeline
//!
//! - **Query rewriting**: a local FLAN-T5 model (candle) rewrites the request
//!   into a concise search query
//! - **Search & disambiguation**: the MediaWiki search API lists matching
//!   titles; the user picks one when several match
//! - **Fetch with fallback**: exact fetch, then one disambiguation fallback or
//!   one fuzzy retry, each with a typed outcome
//! - **Summary**: the article intro is truncated to a sentence count and
//!   rendered with a bold title

pub mod config;
pub mod model;
pub mod query;
pub mod summary;
pub mod ui;
pub mod wiki;

pub use config::Config;
pub use wiki::{Article, WikiClient};
