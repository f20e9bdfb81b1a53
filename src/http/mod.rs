//! HTTP server module for the ITC backend.
//!
//! This module provides an axum-based HTTP server that exposes the query
//! surface. It reuses the service layer, the cache, and the typed
//! inputs/outputs from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Input coercion and validation                          │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Orchestration, solver, extraction                      │
//! └───────────────────┬──────────────────────────────────────┘
//! │                   │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Cache + Legacy Bridge (cache/, legacy/)                  │
//! │  - Content-addressed results                              │
//! │  - Single-flight calculator calls                         │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod error;

pub mod handlers;

pub mod router;

pub mod state;

pub use router::create_router;

pub use state::AppState;
