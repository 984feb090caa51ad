//! Saved analysis snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::architecture::Architecture;

/// A named, immutable snapshot of one recommendation and its artifacts.
///
/// Saved analyses are addressed by their position in the saved list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// User-chosen name (uniqueness not enforced).
    pub name: String,

    /// When the snapshot was saved.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,

    pub requirements: String,

    pub architecture: Architecture,

    /// Infrastructure code, if it had been generated.
    #[serde(default, rename = "terraform", skip_serializing_if = "Option::is_none")]
    pub infrastructure_code: Option<String>,

    /// Diagram source, if it had been generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl Analysis {
    /// Default name offered when the user gives none.
    pub fn default_name(now: DateTime<Utc>) -> String {
        format!("Analysis {}", now.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::tests::sample;

    #[test]
    fn reads_record_without_id_or_artifacts() {
        let json = serde_json::json!({
            "name": "blog",
            "date": "2024-05-01T10:00:00.000Z",
            "requirements": "simple blog, low traffic",
            "architecture": sample(),
        });

        let analysis: Analysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.name, "blog");
        assert!(analysis.diagram.is_none());
        assert!(analysis.infrastructure_code.is_none());
        assert_eq!(analysis.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn infrastructure_code_persists_as_terraform() {
        let analysis = Analysis {
            name: "blog".to_string(),
            created_at: Utc::now(),
            requirements: "simple blog".to_string(),
            architecture: sample(),
            infrastructure_code: Some("provider \"azurerm\" {}".to_string()),
            diagram: None,
        };

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["terraform"], "provider \"azurerm\" {}");
        assert!(value.get("diagram").is_none());
        assert!(value["date"].is_string());
    }

    #[test]
    fn stored_record_reads_back_identically() {
        let json = serde_json::json!({
            "name": "blog",
            "date": "2024-05-01T10:00:00.000Z",
            "requirements": "simple blog, low traffic",
            "architecture": sample(),
            "diagram": "graph TB",
        });

        let first: Analysis = serde_json::from_value(json.clone()).unwrap();
        let second: Analysis = serde_json::from_value(json).unwrap();
        assert_eq!(first, second);

        let written = serde_json::to_value(&first).unwrap();
        assert!(written.get("id").is_none());
        assert_eq!(serde_json::from_value::<Analysis>(written).unwrap(), first);
    }

    #[test]
    fn default_name_uses_date() {
        let now = DateTime::parse_from_rfc3339("2025-03-09T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Analysis::default_name(now), "Analysis 2025-03-09");
    }
}
