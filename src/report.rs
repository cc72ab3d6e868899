//! Plain-text rendering of estimates for the CLI.

use crate::estimate::{EstimateView, GroupView};
use crate::models::{Feature, ProjectSummary};

/// Format hours without a trailing `.0` for whole numbers.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        format!("{:.2}", hours)
    }
}

/// Render an estimate as a tree of groups and features.
///
/// Empty groups are skipped. Example output:
/// ```text
/// Storefront (Retail)
/// ├── Basic Setup: 20h
/// │   └── [S x1] Code Setup / Repository: 20h
/// └── Features: 60h
///     └── [M x1] Checkout / Cart: 60h
/// Total effort: 80 hours
/// ```
pub fn render_estimate(view: &EstimateView) -> String {
    let mut output = String::new();

    output.push_str(&view.metadata.name);
    if !view.metadata.industry.is_empty() {
        output.push_str(&format!(" ({})", view.metadata.industry));
    }
    output.push('\n');

    let groups: Vec<&GroupView> = view
        .groups()
        .into_iter()
        .filter(|g| !g.features.is_empty())
        .collect();

    for (i, group) in groups.iter().enumerate() {
        let is_last = i == groups.len() - 1;
        render_group(&mut output, group, is_last);
    }

    output.push_str(&format!(
        "Total effort: {} hours\n",
        format_hours(view.total_effort_hours)
    ));
    output
}

fn render_group(output: &mut String, group: &GroupView, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push_str(&format!("{}: {}h\n", group.title, format_hours(group.hours)));

    let prefix = if is_last { "    " } else { "│   " };
    for (i, feature) in group.features.iter().enumerate() {
        let child_is_last = i == group.features.len() - 1;
        let branch = if child_is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push_str(&feature_line(feature));
        output.push('\n');
    }
}

fn feature_line(feature: &Feature) -> String {
    format!(
        "[{} x{}] {} / {}: {}h",
        feature.size,
        feature.quantity_multiplier,
        feature.module,
        feature.name,
        format_hours(feature.hours)
    )
}

/// Render project summaries as one line each.
pub fn render_summaries(projects: &[ProjectSummary]) -> String {
    if projects.is_empty() {
        return "No projects yet.\n".to_string();
    }

    projects
        .iter()
        .map(|p| {
            format!(
                "{}  {}  {} features  {} hours\n",
                p.id,
                p.name,
                p.feature_count,
                format_hours(p.total_effort_hours)
            )
        })
        .collect()
}
