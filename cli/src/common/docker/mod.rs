//! # dtool Docker Adapter
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Everything that talks to the Docker daemon lives here, behind the
//! `RuntimeClient` value. The rest of the crate only sees `ContainerRecord`s
//! and `DtoolError`s, never `bollard` models.
//!
//! ## Architecture
//!
//! - **`connect`**: `RuntimeClient` construction and the daemon health check.
//! - **`record`**: the `ContainerRecord` value type and its conversions from `bollard` models.
//! - **`state`**: read-only queries (`list_containers`, `get_container`).
//! - **`interaction`**: interactive shell hand-off and exec output streaming.
//!

/// `RuntimeClient` and the daemon ping.
pub mod connect;
/// Exec streaming and the interactive shell hand-off.
pub mod interaction;
/// Container record types populated at the adapter boundary.
pub mod record;
/// Container listing and inspection.
pub mod state;

pub use connect::RuntimeClient;
pub use interaction::ExecChunk;
pub use record::{ContainerRecord, ContainerStatus, ImageInfo, PortSpec};
