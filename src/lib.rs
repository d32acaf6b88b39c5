//! # patent-forge
//!
//! A REST service for patent search with personal watchlists and
//! "investment theses". Search is delegated to an external provider; every
//! result is scored against the user's starred thesis so the client can rank
//! and filter by alignment.
//!
//! ## Request flow
//!
//! ```text
//!   GET /api/patents/search?query=..
//!                 │
//!                 ▼
//!       ┌───────────────────┐
//!       │  PatentProvider   │  SerpAPI (or sample data)
//!       │  candidate pool   │
//!       └─────────┬─────────┘
//!                 │
//!                 ▼
//!       ┌───────────────────┐      ┌──────────────────┐
//!       │ attach_alignment  │◀─────│ starred thesis   │
//!       │ abstract vs thesis│      │ (Store)          │
//!       └─────────┬─────────┘      └──────────────────┘
//!                 │
//!                 ▼
//!       ┌───────────────────┐
//!       │ threshold + sort  │
//!       │ local pagination  │
//!       └───────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, data dir and provider
//! - [`models`] - Shared data types: saved items, theses, search records, request/response types
//! - [`search::tokenizer`] - Text normalization and stop-word filtering
//! - [`search::alignment`] - The thesis alignment score
//! - [`search::ranking`] - Attaching scores, threshold/sort, pagination
//! - [`provider`] - External patent search behind the `PatentProvider` trait
//! - [`store`] - JSON-file persistence for users, watchlists and theses
//! - [`api`] - Axum HTTP handlers and the email-header extractor
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod models;
pub mod provider;
pub mod search;
pub mod state;
pub mod store;
