//! # ITC Rust Backend
//!
//! Request-processing engine for an Instrument Time Calculator (ITC) used in
//! astronomical observation planning. Clients describe a target (source
//! profile, spectral energy distribution, brightness, radial velocity), an
//! observing configuration (instrument mode, grating, filter, focal-plane
//! unit, central wavelength), site conditions, and a desired outcome. The
//! server computes exposure-time plans or spectrum-like graphs by delegating
//! the heavy numeric work to a legacy calculator, then caches and returns
//! structured results.
//!
//! ## Features
//!
//! - **Legacy Bridge**: canonical text documents in, structured payloads or
//!   single-line error strings out; the numeric kernel runs out of process
//! - **Calculator Scheduler**: single-flight discipline around every bridge
//!   call so the non-reentrant kernel never runs concurrently with itself
//! - **Result Cache**: content-addressed binary cache with bulk invalidation
//!   when the upstream data version changes
//! - **Exposure-Time Solver**: bounded fixed-point iteration that converges
//!   an exposure plan onto a requested signal-to-noise
//! - **HTTP API**: axum endpoints mirroring the query surface
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: shared quantity newtypes and re-exported result types
//! - [`models`]: immutable request/result domain model
//! - [`legacy`]: canonical document encoder, calculator bridge, scheduler
//! - [`cache`]: byte store abstraction, key derivation, binary codec,
//!   version gating
//! - [`services`]: graph extraction, exposure-time solving, orchestration
//! - [`routes`]: typed inputs/outputs for the query surface
//! - [`http`]: axum-based HTTP server and request handlers

pub mod api;

pub mod cache;
pub mod config;
pub mod legacy;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
