//! # dtool Container Table
//!
//! File: cli/src/common/ui/table.rs
//!
//! ## Overview
//!
//! Turns `ContainerRecord`s into the table printed by `dtool ps`.
//! Rendering happens in two steps so the rules can be tested without a
//! terminal:
//!
//! 1. `render` derives one `RenderRow` per record (image label, flattened
//!    ports, status style).
//! 2. `RenderedTable`'s `Display` impl lays the rows out and colours them.
//!
//! ## Rules
//!
//! - Columns, in order: `ID`, `NAME`, `IMAGE`, `STATUS`, `PORTS`.
//! - Image: first tag, else the first 12 characters of the image ID.
//! - Ports: `hostPort:spec` per binding, bare `spec` when unpublished,
//!   joined with `", "`; empty when there are none.
//! - Status: `running` is green, everything else is red.
//! - An empty listing prints a single notice instead of a table.
//!
use crate::common::docker::{ContainerRecord, ContainerStatus, ImageInfo, PortSpec};
use colored::{ColoredString, Colorize};
use std::fmt;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Docker Containers";
const HEADERS: [&str; 5] = ["ID", "NAME", "IMAGE", "STATUS", "PORTS"];
const COLUMN_GAP: &str = "  ";

/// Binary status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Success,
    Attention,
}

/// One display row, derived from a `ContainerRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub short_id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub ports: String,
    pub status_style: StatusStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedTable {
    /// Nothing to show; displays the "no containers" notice.
    Empty,
    Rows(Vec<RenderRow>),
}

pub fn status_style(status: &ContainerStatus) -> StatusStyle {
    if status.is_running() {
        StatusStyle::Success
    } else {
        StatusStyle::Attention
    }
}

pub fn image_label(image: &ImageInfo) -> String {
    match image.tags.first() {
        Some(tag) => tag.clone(),
        None => image.short_id(),
    }
}

pub fn format_ports(ports: &[PortSpec]) -> String {
    let mut entries = Vec::new();
    for port in ports {
        if port.bindings.is_empty() {
            entries.push(port.spec.clone());
        } else {
            entries.extend(
                port.bindings
                    .iter()
                    .map(|b| format!("{}:{}", b.host_port, port.spec)),
            );
        }
    }
    entries.join(", ")
}

impl From<&ContainerRecord> for RenderRow {
    fn from(record: &ContainerRecord) -> Self {
        Self {
            short_id: record.short_id.clone(),
            name: record.name.clone(),
            image: image_label(&record.image),
            status: record.status.to_string(),
            ports: format_ports(&record.ports),
            status_style: status_style(&record.status),
        }
    }
}

/// Builds the table for `containers`, keeping their order.
pub fn render(containers: &[ContainerRecord]) -> RenderedTable {
    if containers.is_empty() {
        return RenderedTable::Empty;
    }
    RenderedTable::Rows(containers.iter().map(RenderRow::from).collect())
}

/// Left-aligns `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

impl RenderRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.short_id.as_str(),
            self.name.as_str(),
            self.image.as_str(),
            self.status.as_str(),
            self.ports.as_str(),
        ]
    }
}

fn style_cell(column: usize, text: String, row: &RenderRow) -> ColoredString {
    match column {
        0 => text.cyan(),
        1 => text.green(),
        2 => text.blue(),
        3 => match row.status_style {
            StatusStyle::Success => text.green(),
            StatusStyle::Attention => text.red(),
        },
        _ => text.dimmed(),
    }
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            RenderedTable::Empty => {
                return writeln!(f, "{}", "No containers found.".yellow().bold());
            }
            RenderedTable::Rows(rows) => rows,
        };

        // Width is measured before colouring so escape codes never count.
        let mut widths = HEADERS.map(|h| h.width());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.width());
            }
        }
        let last = HEADERS.len() - 1;

        writeln!(f, "{}", TITLE.bold())?;
        let header: Vec<String> = HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let text = if i == last { h.to_string() } else { pad(h, widths[i]) };
                text.magenta().bold().to_string()
            })
            .collect();
        writeln!(f, "{}", header.join(COLUMN_GAP))?;

        for row in rows {
            let line: Vec<String> = row
                .cells()
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let text = if i == last {
                        cell.to_string()
                    } else {
                        pad(cell, widths[i])
                    };
                    style_cell(i, text, row).to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(COLUMN_GAP).trim_end())?;
        }
        Ok(())
    }
}
