//! # dtool Terminal UI (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! Terminal presentation helpers:
//!
//! - **`table`**: the `dtool ps` container table (`render` → `RenderedTable`).
//! - **`panel`**: bordered diagnostic panels, e.g. the daemon-unavailable notice.
//!
//! Both build plain values first and colour them only in their `Display` impls,
//! so tests can assert on content with colouring switched off.

/// Bordered diagnostic panels.
pub mod panel;
/// Container table rendering.
pub mod table;
