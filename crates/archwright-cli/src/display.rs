//! Terminal rendering of view models.

use std::fmt::Write;

use archwright_core::{Analysis, PricingReport};
use archwright_report::{CostPanel, ViewModel};

/// Multi-section plain-text rendering of an analysis.
pub fn view(view: &ViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary\n  {}\n", view.summary);

    out.push_str("Architecture\n");
    let width = view.components.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in &view.components {
        let _ = writeln!(out, "  {:<width$}  {}", row.label, row.value);
    }

    match &view.cost {
        CostPanel::Estimate {
            monthly_range,
            breakdown,
        } => {
            let _ = writeln!(out, "\nCost estimate\n  {monthly_range}");
            for item in breakdown {
                let _ = writeln!(out, "  - {item}");
            }
        }
        CostPanel::Live { rows, note } => {
            out.push_str("\nReal-time pricing\n");
            for row in rows {
                let _ = writeln!(out, "  {}\n    {}", row.service, row.detail);
            }
            let _ = writeln!(out, "  {note}");
        }
    }

    out.push_str("\nDeployment steps\n");
    for (i, step) in view.deployment_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", i + 1);
    }

    out.push_str("\nConsiderations\n");
    for item in &view.considerations {
        let _ = writeln!(out, "  - {item}");
    }

    if let Some(diagram) = &view.diagram {
        let _ = writeln!(out, "\nDiagram (Mermaid)\n{diagram}");
    }
    if let Some(code) = &view.infrastructure_code {
        let _ = writeln!(out, "\nTerraform\n{code}");
    }
    out
}

/// One row per service.
pub fn pricing_table(report: &PricingReport) -> String {
    let width = report.keys().map(String::len).max().unwrap_or(0);
    report
        .iter()
        .map(|(service, record)| format!("{service:<width$}  {}\n", record.describe()))
        .collect()
}

/// `[0] Blog (2025-01-02 10:00) - 3 services`
pub fn saved_line(index: usize, analysis: &Analysis) -> String {
    let mut extras = Vec::new();
    if analysis.diagram.is_some() {
        extras.push("diagram");
    }
    if analysis.infrastructure_code.is_some() {
        extras.push("terraform");
    }
    let extras = if extras.is_empty() {
        String::new()
    } else {
        format!(", {}", extras.join(", "))
    };

    format!(
        "[{index}] {} ({}) - {} services{extras}",
        analysis.name,
        analysis.created_at.format("%Y-%m-%d %H:%M"),
        analysis.architecture.core_services().len(),
    )
}
