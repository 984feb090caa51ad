//! Presentation view model.

use archwright_core::{Architecture, PricingReport};
use archwright_session::SessionSnapshot;
use serde::Serialize;

/// Shown under live prices.
pub const PRICING_NOTE: &str =
    "Prices shown are base rates. Actual costs depend on usage, region, and configuration.";

/// Everything a UI needs to show one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub summary: String,
    pub components: Vec<ComponentRow>,
    pub cost: CostPanel,
    pub deployment_steps: Vec<String>,
    pub considerations: Vec<String>,
    pub diagram: Option<String>,
    pub infrastructure_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRow {
    pub label: &'static str,
    pub value: String,
}

/// Live prices when they have been fetched, otherwise the model's estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostPanel {
    Estimate {
        monthly_range: String,
        breakdown: Vec<String>,
    },
    Live {
        rows: Vec<PriceRow>,
        note: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub service: String,
    /// `$<price> per <unit> | <sku> | <region>`
    pub detail: String,
    /// True when no real price was available.
    pub sentinel: bool,
}

/// Build the view model for a snapshot.
pub fn render_view(snapshot: &SessionSnapshot) -> ViewModel {
    let arch = &snapshot.architecture;
    ViewModel {
        summary: arch.summary.clone(),
        components: component_rows(arch),
        cost: cost_panel(arch, snapshot.pricing.as_ref()),
        deployment_steps: arch.deployment_steps.clone(),
        considerations: arch.considerations.clone(),
        diagram: snapshot.diagram.clone(),
        infrastructure_code: snapshot.infrastructure_code.clone(),
    }
}

fn component_rows(arch: &Architecture) -> Vec<ComponentRow> {
    let c = &arch.components;
    vec![
        ComponentRow {
            label: "Core Services",
            value: c.core_services.join(", "),
        },
        ComponentRow {
            label: "Compute",
            value: c.compute.clone(),
        },
        ComponentRow {
            label: "Storage",
            value: c.storage.clone(),
        },
        ComponentRow {
            label: "Networking",
            value: c.networking.clone(),
        },
        ComponentRow {
            label: "Security",
            value: c.security.clone(),
        },
    ]
}

fn cost_panel(arch: &Architecture, pricing: Option<&PricingReport>) -> CostPanel {
    match pricing {
        Some(report) => CostPanel::Live {
            rows: report
                .iter()
                .map(|(service, record)| PriceRow {
                    service: service.clone(),
                    detail: record.describe(),
                    sentinel: record.is_sentinel(),
                })
                .collect(),
            note: PRICING_NOTE,
        },
        None => CostPanel::Estimate {
            monthly_range: arch.cost_estimate.monthly_range.clone(),
            breakdown: arch.cost_estimate.breakdown.clone(),
        },
    }
}
