//! Box-drawing diagnostic table
//!
//! The layout is a stable text contract: a leading empty line, double-line
//! borders, centered headers and left-justified cells.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::validation::PathSegment;

/// Rendered in place of a table when there is nothing to show
pub const NO_ADDITIONAL_INFO: &str = "No additional info available.";

/// Column headers, in order
pub const HEADINGS: [&str; 3] = ["schema path", "instance path", "message"];

/// Root marker for instance paths
pub const INSTANCE_ROOT: &str = "$";

/// Root marker for schema paths
pub const SCHEMA_ROOT: &str = "schema";

/// Render a path as `prefix['key'][0]`, or just `prefix` when empty
pub fn format_path(path: &[PathSegment], prefix: &str) -> String {
    if path.is_empty() {
        return prefix.to_string();
    }

    let segments: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("{}[{}]", prefix, segments.join("]["))
}

/// Center `text` in `width` columns, putting the odd space where Python does
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn ljust(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn border(widths: &[usize], left: &str, joint: &str, right: &str) -> String {
    let fills: Vec<String> = widths.iter().map(|w| "═".repeat(*w)).collect();
    format!("{}{}{}", left, fills.join(joint), right)
}

/// Render rows under [`HEADINGS`]; no rows renders [`NO_ADDITIONAL_INFO`]
pub fn format_table(rows: &[[String; 3]]) -> String {
    if rows.is_empty() {
        return NO_ADDITIONAL_INFO.to_string();
    }

    let widths: Vec<usize> = HEADINGS
        .iter()
        .enumerate()
        .map(|(column, heading)| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(heading.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![String::new()];
    lines.push(border(&widths, "╔═", "═╤═", "═╗"));

    let headers: Vec<String> = HEADINGS
        .iter()
        .zip(&widths)
        .map(|(heading, width)| center(heading, *width))
        .collect();
    lines.push(format!("║ {} ║", headers.join(" │ ")));
    lines.push(border(&widths, "╠═", "═╪═", "═╣"));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| ljust(cell, *width))
            .collect();
        lines.push(format!("║ {} ║", cells.join(" │ ")));
    }

    lines.push(border(&widths, "╚═", "═╧═", "═╝"));
    lines.join("\n")
}
