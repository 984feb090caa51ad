//! Export document composition.
//!
//! Sections always appear in the same order; sections without content
//! (no diagram, no infrastructure code) are left out rather than emptied.

use crate::view::{CostPanel, ViewModel};

pub const TITLE: &str = "Azure Architecture Recommendation";
pub const SUMMARY_HEADING: &str = "Executive Summary";
pub const DIAGRAM_HEADING: &str = "Architecture Diagram";
pub const COMPONENTS_HEADING: &str = "Architecture Components";
pub const LIVE_PRICING_HEADING: &str = "Real-Time Azure Pricing";
pub const ESTIMATE_HEADING: &str = "Cost Estimate";
pub const DEPLOYMENT_HEADING: &str = "Deployment Checklist";
pub const CONSIDERATIONS_HEADING: &str = "Key Considerations";
pub const CODE_HEADING: &str = "Terraform Infrastructure Code";

/// Code lines longer than this are wrapped.
pub const CODE_WRAP_COLUMNS: usize = 90;
/// Lines per page of the code listing.
pub const CODE_PAGE_LINES: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(String),
    Diagram(String),
    /// Label / value rows.
    Fields(Vec<(&'static str, String)>),
    /// Service / price description rows.
    Prices(Vec<(String, String)>),
    Estimate {
        monthly_range: String,
        breakdown: Vec<String>,
    },
    Numbered(Vec<String>),
    Bullets(Vec<String>),
    /// Code listing split into pages of wrapped lines.
    Code { pages: Vec<Vec<String>> },
}

impl ExportDocument {
    pub fn headings(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.heading).collect()
    }
}

/// Lay out `view` as an export document.
pub fn compose_export(view: &ViewModel) -> ExportDocument {
    let mut sections = vec![Section {
        heading: SUMMARY_HEADING,
        body: SectionBody::Text(view.summary.clone()),
    }];

    if let Some(diagram) = &view.diagram {
        sections.push(Section {
            heading: DIAGRAM_HEADING,
            body: SectionBody::Diagram(diagram.clone()),
        });
    }

    sections.push(Section {
        heading: COMPONENTS_HEADING,
        body: SectionBody::Fields(
            view.components
                .iter()
                .map(|row| (row.label, row.value.clone()))
                .collect(),
        ),
    });

    sections.push(match &view.cost {
        CostPanel::Live { rows, .. } => Section {
            heading: LIVE_PRICING_HEADING,
            body: SectionBody::Prices(
                rows.iter()
                    .map(|row| (row.service.clone(), row.detail.clone()))
                    .collect(),
            ),
        },
        CostPanel::Estimate {
            monthly_range,
            breakdown,
        } => Section {
            heading: ESTIMATE_HEADING,
            body: SectionBody::Estimate {
                monthly_range: monthly_range.clone(),
                breakdown: breakdown.clone(),
            },
        },
    });

    sections.push(Section {
        heading: DEPLOYMENT_HEADING,
        body: SectionBody::Numbered(view.deployment_steps.clone()),
    });
    sections.push(Section {
        heading: CONSIDERATIONS_HEADING,
        body: SectionBody::Bullets(view.considerations.clone()),
    });

    if let Some(code) = &view.infrastructure_code {
        sections.push(Section {
            heading: CODE_HEADING,
            body: SectionBody::Code {
                pages: paginate_code(code, CODE_WRAP_COLUMNS, CODE_PAGE_LINES),
            },
        });
    }

    ExportDocument {
        title: TITLE,
        sections,
    }
}

/// Split `code` into pages of at most `page_lines` lines, wrapping lines
/// longer than `width` characters. Wrapped pieces concatenate back to the
/// original line.
pub fn paginate_code(code: &str, width: usize, page_lines: usize) -> Vec<Vec<String>> {
    let width = width.max(1);
    let lines: Vec<String> = code.lines().flat_map(|line| wrap_line(line, width)).collect();
    lines
        .chunks(page_lines.max(1))
        .map(<[String]>::to_vec)
        .collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= width {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    while chars.len() - start > width {
        let window = &chars[start..start + width];
        // Break after the last inner whitespace, else hard-split.
        let cut = window
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&i| i > 0)
            .map_or(width, |i| i + 1);
        pieces.push(chars[start..start + cut].iter().collect());
        start += cut;
    }
    pieces.push(chars[start..].iter().collect());
    pieces
}
