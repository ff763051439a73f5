//! # dtool Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`:
//!
//! - **`docker`**: the `RuntimeClient` adapter over `bollard` and the `ContainerRecord` model.
//! - **`filter`**: exact / regex filtering of container listings.
//! - **`ui`**: the container table and diagnostic panels.
//!
//! ```rust
//! use crate::common::{docker::RuntimeClient, filter, ui::table};
//!
//! # async fn run_example(client: &RuntimeClient, spec: &filter::FilterSpec) -> crate::core::error::Result<()> {
//! let records = client.list_containers(spec.include_stopped).await?;
//! let records = filter::filter_containers(records, spec)?;
//! print!("{}", table::render(&records));
//! # Ok(())
//! # }
//! ```
//!

/// Docker daemon adapter (`bollard`).
pub mod docker;
/// Container filtering by name or ID.
pub mod filter;
/// Terminal presentation (tables, panels).
pub mod ui;
