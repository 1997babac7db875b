//! Plain-text rendering of a dashboard frame.
//!
//! Layout and colours are presentation only; the content comes straight from the view
//! nodes. Status cells are coloured by the css class the server picked for them.
use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::view::{Frame, StatusRow};

const HEADERS: [&str; 4] = ["#", "Exchange", "Status", "Opens in"];

/// Terminal styling for a server-supplied css class.
fn style_status(text: &str, css_class: &str) -> ColoredString {
    match css_class {
        "status-live" => text.green().bold(),
        "status-closed" => text.red(),
        "status-weekend" => text.yellow(),
        _ => text.normal(),
    }
}

fn column_widths(rows: &[StatusRow]) -> [usize; 4] {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        widths[0] = widths[0].max(row.index.to_string().len());
        widths[1] = widths[1].max(row.name.chars().count());
        widths[2] = widths[2].max(row.status.chars().count());
        widths[3] = widths[3].max(row.time_to_open.chars().count());
    }
    widths
}

/// Render `frame` as lines of text, with ANSI colours when `color` is set.
pub fn render_frame(frame: &Frame, color: bool) -> String {
    let mut out = String::new();

    if let Some(clock) = &frame.clock {
        let _ = writeln!(out, "{}", clock);
        out.push('\n');
    }

    let w = column_widths(&frame.rows);
    let header = format!(
        "{:>w0$}  {:<w1$}  {:<w2$}  {}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        w0 = w[0],
        w1 = w[1],
        w2 = w[2]
    );
    if color {
        let _ = writeln!(out, "{}", header.bold());
    } else {
        let _ = writeln!(out, "{}", header);
    }
    for row in &frame.rows {
        let status = format!("{:<w2$}", row.status, w2 = w[2]);
        let status = if color {
            style_status(&status, &row.css_class).to_string()
        } else {
            status
        };
        let _ = writeln!(
            out,
            "{:>w0$}  {:<w1$}  {}  {}",
            row.index,
            row.name,
            status,
            row.time_to_open,
            w0 = w[0],
            w1 = w[1]
        );
    }

    out.push('\n');
    let _ = writeln!(out, "Symbol: {}", frame.input);
    if frame.suggestions.visible {
        for (i, symbol) in frame.suggestions.entries.iter().enumerate() {
            let _ = writeln!(out, "  {}) {}", i + 1, symbol);
        }
    }

    if let Some(Some(report)) = &frame.price {
        out.push('\n');
        if color {
            let _ = writeln!(out, "{}", report.title.bold());
        } else {
            let _ = writeln!(out, "{}", report.title);
        }
        let _ = writeln!(out, "  {}", report.ask);
        let _ = writeln!(out, "  {}", report.bid);
    }

    out
}
