//! Human-readable summary renderer for change reports.

use crate::diff::model::{ChangeReport, ChangeScope};

/// Render a human-readable Markdown/text summary of a [`ChangeReport`].
///
/// The summary is intended for revision-approval displays and the
/// change log; it is informational only and does not affect the
/// structured report.
pub fn render_human_summary(report: &ChangeReport) -> String {
    let mut out = String::new();

    out.push_str("## Calculation Change Report\n\n");

    let scope_label = match report.scope {
        ChangeScope::None => "None",
        ChangeScope::Minor => "Minor",
        ChangeScope::Major => "Major",
    };
    out.push_str(&format!("**Scope**: {scope_label}  \n"));
    out.push_str(&format!(
        "**Affects price**: {}  \n**Affects scope of work**: {}\n\n",
        yes_no(report.affects_price),
        yes_no(report.affects_scope)
    ));

    if report.details.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str("### Changes\n\n");
    for detail in &report.details {
        out.push_str(&format!("- {}\n", detail));
    }

    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
