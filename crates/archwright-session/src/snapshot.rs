//! The "current analysis" tuple.

use archwright_core::{Analysis, Architecture, PricingReport};
use chrono::{DateTime, Utc};

/// Requirements, the architecture derived from them, and whichever
/// artifacts have been generated so far.
///
/// Snapshots are values: attaching an artifact yields a new snapshot that
/// the caller swaps into [`SessionState`](crate::SessionState).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub requirements: String,
    pub architecture: Architecture,
    pub diagram: Option<String>,
    pub infrastructure_code: Option<String>,
    /// Fetched prices. Never persisted with a saved analysis.
    pub pricing: Option<PricingReport>,
}

impl SessionSnapshot {
    /// A fresh snapshot with no artifacts.
    pub fn new(requirements: impl Into<String>, architecture: Architecture) -> Self {
        Self {
            requirements: requirements.into(),
            architecture,
            diagram: None,
            infrastructure_code: None,
            pricing: None,
        }
    }

    pub fn with_diagram(mut self, diagram: impl Into<String>) -> Self {
        self.diagram = Some(diagram.into());
        self
    }

    pub fn with_infrastructure_code(mut self, code: impl Into<String>) -> Self {
        self.infrastructure_code = Some(code.into());
        self
    }

    pub fn with_pricing(mut self, pricing: PricingReport) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Rebuild a snapshot from a saved analysis. Artifacts the analysis
    /// does not carry are absent.
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            requirements: analysis.requirements.clone(),
            architecture: analysis.architecture.clone(),
            diagram: analysis.diagram.clone(),
            infrastructure_code: analysis.infrastructure_code.clone(),
            pricing: None,
        }
    }

    /// Freeze this snapshot into a named analysis.
    pub fn to_analysis(&self, name: impl Into<String>, created_at: DateTime<Utc>) -> Analysis {
        Analysis {
            name: name.into(),
            created_at,
            requirements: self.requirements.clone(),
            architecture: self.architecture.clone(),
            infrastructure_code: self.infrastructure_code.clone(),
            diagram: self.diagram.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use archwright_core::{Components, CostEstimate, PriceRecord};

    pub(crate) fn architecture(summary: &str) -> Architecture {
        Architecture {
            summary: summary.to_string(),
            components: Components {
                core_services: vec!["Azure Functions".to_string(), "Azure Storage".to_string()],
                compute: "Consumption plan functions".to_string(),
                storage: "Standard LRS blob storage".to_string(),
                networking: "Public endpoints behind Front Door".to_string(),
                security: "Managed identity and RBAC".to_string(),
            },
            cost_estimate: CostEstimate {
                monthly_range: "$5 - $15 USD".to_string(),
                breakdown: vec!["Functions: $2".to_string(), "Storage: $3".to_string()],
            },
            deployment_steps: vec!["Create storage account".to_string(), "Deploy functions".to_string()],
            considerations: vec!["Cold starts on the consumption plan".to_string()],
        }
    }

    pub(crate) fn snapshot(summary: &str) -> SessionSnapshot {
        SessionSnapshot::new(format!("requirements for {summary}"), architecture(summary))
    }

    #[test]
    fn round_trips_through_analysis_without_pricing() {
        let mut pricing = PricingReport::new();
        pricing.insert("Azure Functions".to_string(), PriceRecord::no_match());
        let snap = snapshot("thumbnailer")
            .with_diagram("graph TB\n    A --> B")
            .with_pricing(pricing);

        let analysis = snap.to_analysis("thumbs", Utc::now());
        assert_eq!(analysis.diagram.as_deref(), Some("graph TB\n    A --> B"));
        assert!(analysis.infrastructure_code.is_none());

        let restored = SessionSnapshot::from_analysis(&analysis);
        assert_eq!(restored.architecture, snap.architecture);
        assert_eq!(restored.diagram, snap.diagram);
        assert!(restored.pricing.is_none());
    }
}
