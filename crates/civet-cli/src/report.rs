//! Run summary printed after resolution

use std::fmt::Write;

use civet_core::{Config, QueryOrigin, RunSummary, keys};

use crate::style::{Style, bold_underline, cyan, green, paint, yellow};

/// Text describing a resolved run.
pub fn render(config: &Config, summary: &RunSummary) -> String {
    let mut out = String::new();
    let text = |key: &str| config.get_text(key).unwrap_or_default();

    let _ = writeln!(out, "{}", bold_underline("civet run"));
    let _ = writeln!(out, "{} {}", green("Output dir:"), text(keys::OUTDIR));
    let _ = writeln!(out, "{} {}", green("Found cog data:"), text(keys::DATADIR));
    let _ = writeln!(
        out,
        "{} {}",
        green("Input file:"),
        summary.origin.path().display()
    );

    if let QueryOrigin::Metadata(query) = &summary.origin {
        let _ = writeln!(
            out,
            "{} {} sequences matched the metadata filters",
            green("Query:"),
            query.ids.len()
        );
        match query.preview() {
            Some(ids) => {
                let _ = writeln!(out, "{}", paint(&ids.join(", "), Style::new().dim()));
            }
            None => {
                let _ = writeln!(out, "{}", yellow("Too many to list here."));
            }
        }
    }

    let _ = writeln!(out, "Found {} queries", summary.query_ids.len());
    if !summary.qc_failures.is_empty() {
        let _ = writeln!(
            out,
            "{} {} query sequences failed QC",
            yellow("Warning:"),
            summary.qc_failures.len()
        );
        for failure in &summary.qc_failures {
            let _ = writeln!(out, "{}", cyan(&format!("    - {}\t{}", failure.name, failure.reason)));
        }
    }
    let _ = writeln!(out, "{} {}", cyan("Colouring by:"), text(keys::TREE_FIELDS));
    let _ = writeln!(out, "{} {}", cyan("Labelling by:"), text(keys::LABEL_FIELDS));
    let _ = writeln!(
        out,
        "{} {}",
        cyan("Summarise collapsed nodes by:"),
        text(keys::NODE_SUMMARY)
    );
    let _ = writeln!(out, "{} {}", cyan("Summary field:"), text(keys::SUMMARY_FIELD));
    let _ = writeln!(
        out,
        "{} up {}, down {}",
        cyan("Extraction radius:"),
        text(keys::UP_DISTANCE),
        text(keys::DOWN_DISTANCE)
    );
    out
}
