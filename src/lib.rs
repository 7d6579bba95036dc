//! # blogcast
//!
//! `blogcast` is a small blog backend built with Rust. Authors and articles
//! are served over a plain HTTP CRUD surface, and every author has a
//! real-time WebSocket feed that pushes a snapshot of an article the moment
//! it reaches its terminal `FINISHED` status.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `registry`: the connection registry, notifier and event dispatch queue; the
//!   real-time core of the system.
//! - `client`: represents one connected WebSocket subscriber.
//! - `store`: the sled-backed persistence layer for authors and articles, including
//!   the write path that detects the finished transition.
//! - `http`: the axum CRUD surface.
//! - `transport`: the WebSocket server where feed connections live.
//! - `config`: handles loading and managing server configuration.
//! - `utils`: shared utilities, such as logging setup.

pub mod client;
pub mod config;
pub mod http;
pub mod registry;
pub mod store;
pub mod transport;
pub mod utils;
