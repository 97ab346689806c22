use serde::{Deserialize, Serialize};

use crate::Accession;

/// A target hit from the catalog search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub target_chembl_id: String,
    #[serde(default)]
    pub pref_name: Option<String>,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: Option<f64>,
    #[serde(default)]
    pub target_components: Vec<TargetComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetComponent {
    #[serde(default)]
    pub accession: Option<String>,
    #[serde(default)]
    pub component_description: Option<String>,
    #[serde(default)]
    pub component_type: Option<String>,
}

impl TargetRecord {
    /// Whether this record names the accession directly: by ChEMBL id, by a
    /// component accession, or by preferred name (ASCII case-insensitive).
    pub fn matches_exactly(&self, accession: &Accession) -> bool {
        let wanted = accession.as_str();
        if self.target_chembl_id.eq_ignore_ascii_case(wanted) {
            return true;
        }
        if self
            .target_components
            .iter()
            .filter_map(|c| c.accession.as_deref())
            .any(|a| a.eq_ignore_ascii_case(wanted))
        {
            return true;
        }
        self.pref_name
            .as_deref()
            .map(|name| name.eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }

    pub fn display_name(&self) -> &str {
        self.pref_name.as_deref().unwrap_or(&self.target_chembl_id)
    }
}

/// How a search result list is narrowed to one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Take the first hit unconditionally.
    #[default]
    First,
    /// Take the first hit that matches the accession exactly.
    Exact,
}

impl ResolutionPolicy {
    pub fn select<'a>(
        &self,
        accession: &Accession,
        candidates: &'a [TargetRecord],
    ) -> Option<&'a TargetRecord> {
        match self {
            ResolutionPolicy::First => candidates.first(),
            ResolutionPolicy::Exact => candidates.iter().find(|t| t.matches_exactly(accession)),
        }
    }
}

// The search endpoint reports relevance as a float, older payloads as a string.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}
