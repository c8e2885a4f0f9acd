//! # Service Snapshots
//!
//! A deterministic denormalization engine for service-directory data. It
//! reads a normalized relational snapshot of organizations, services,
//! addresses, schedules, taxonomy categories, and eligibility tags, and
//! emits flat, search-ready rows — one per (service, resolved address)
//! pair — each carrying a single assembled prose block used as input to an
//! external embedding model.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────────────┐   ┌───────────┐
//! │   SQLite   │──▶│ SourceView (point-in-time)    │──▶│  SQLite   │
//! │  (source)  │   │  eligibility / taxonomy /     │   │ snapshots │
//! └────────────┘   │  fallback / schedule /        │   └─────┬─────┘
//!                  │  aggregate / prose / emit     │         │
//!                  └──────────────────────────────┘          ▼
//!                                                    external embedder
//! ```
//!
//! The middle stage is a pure function: immutable lookup tables plus an
//! immutable view in, ordered snapshot rows out. Re-running with unchanged
//! source data reproduces byte-identical rows (row UUIDs aside), which is
//! what makes the replace-all write strategy safe.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Source entities and the snapshot row |
//! | [`eligibility`] | Tag canonicalization and dimension bucketing |
//! | [`taxonomy`] | Category namespace scoping and parent resolution |
//! | [`fallback`] | Service-over-resource address/schedule selection |
//! | [`schedule`] | HHMM time-code encoding and hours text |
//! | [`aggregate`] | Per-service category/eligibility arrays |
//! | [`prose`] | Deterministic embedding-text assembly |
//! | [`emit`] | The full denormalization pass |
//! | [`view`] | Point-in-time source read |
//! | [`store`] | Replace-all snapshot write |
//! | [`migrate`] | Schema creation |

pub mod aggregate;
pub mod config;
pub mod db;
pub mod eligibility;
pub mod emit;
pub mod export;
pub mod fallback;
pub mod materialize;
pub mod migrate;
pub mod models;
pub mod prose;
pub mod schedule;
pub mod seed;
pub mod stats;
pub mod store;
pub mod taxonomy;
pub mod view;
