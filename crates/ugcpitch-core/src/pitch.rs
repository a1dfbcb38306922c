//! Values that flow through one pitch run.
//!
//! Every value here is built once and never mutated. Research values accept
//! whatever shape the generation service returns as long as it is an object
//! with the expected keys; missing keys become empty text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::CoreError;

/// Number of characters of raw model output copied into a fallback profile.
pub const FALLBACK_EXCERPT_CHARS: usize = 200;

/// Creator identity that signs the pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    pub portfolio_url: String,
    pub social_handle: String,
}

/// User input for one pitch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchRequest {
    brand_input: String,
    personal_story: Option<String>,
    pitch_focus: Option<String>,
    creator: Creator,
}

impl PitchRequest {
    /// Builds a request from form input.
    ///
    /// Empty or whitespace-only story and focus values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingBrand`] if `brand_input` is blank.
    pub fn new(
        brand_input: &str,
        personal_story: Option<&str>,
        pitch_focus: Option<&str>,
        creator: Creator,
    ) -> Result<Self, CoreError> {
        let brand_input = brand_input.trim();
        if brand_input.is_empty() {
            return Err(CoreError::MissingBrand);
        }

        Ok(Self {
            brand_input: brand_input.to_string(),
            personal_story: non_blank(personal_story),
            pitch_focus: non_blank(pitch_focus),
            creator,
        })
    }

    #[must_use]
    pub fn brand_input(&self) -> &str {
        &self.brand_input
    }

    #[must_use]
    pub fn personal_story(&self) -> Option<&str> {
        self.personal_story.as_deref()
    }

    #[must_use]
    pub fn pitch_focus(&self) -> Option<&str> {
        self.pitch_focus.as_deref()
    }

    #[must_use]
    pub fn creator(&self) -> &Creator {
        &self.creator
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Accepts any JSON value for a text field: strings pass through, `null`
/// becomes empty, and anything else is kept as its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Brand research produced by the first stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub products: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand_style: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content_strategy: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub opportunities: String,
}

impl BrandProfile {
    /// Reads a profile out of an extracted JSON value.
    ///
    /// Returns `None` unless the value is an object.
    #[must_use]
    pub fn from_extracted(value: serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Synthesizes a profile when the research reply held no usable JSON.
    ///
    /// The free-text fields carry the first [`FALLBACK_EXCERPT_CHARS`]
    /// characters of the raw reply so the later stages still see something
    /// the model wrote.
    #[must_use]
    pub fn fallback(brand_input: &str, raw: &str) -> Self {
        let excerpt: String = raw.chars().take(FALLBACK_EXCERPT_CHARS).collect();
        Self {
            brand_name: brand_input.to_string(),
            industry: "Brand".to_string(),
            products: excerpt.clone(),
            brand_style: excerpt.clone(),
            target_audience: "General consumers".to_string(),
            content_strategy: excerpt,
            opportunities: "UGC content opportunities".to_string(),
        }
    }
}

/// One competitor found by the second stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub strengths: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content_approach: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub advantages: String,
}

/// Ordered competitor list. Serializes as `{"competitors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSet {
    pub competitors: Vec<CompetitorRecord>,
}

impl CompetitorSet {
    /// Reads a competitor set out of an extracted JSON value.
    ///
    /// The value must be an object whose `competitors` key is an array of
    /// objects; an empty array is a valid, empty set.
    #[must_use]
    pub fn from_extracted(value: serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Single generic competitor used when the reply held no usable list.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            competitors: vec![CompetitorRecord {
                name: "Industry competitor".to_string(),
                strengths: "Active social presence".to_string(),
                content_approach: "Regular UGC content".to_string(),
                advantages: "Established content library".to_string(),
            }],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.competitors.iter().map(|c| c.name.as_str())
    }
}

/// Final output of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchResult {
    pub run_id: Uuid,
    /// Model output, verbatim.
    pub pitch: String,
    pub brand: BrandProfile,
    pub competitors: CompetitorSet,
    pub generated_at: DateTime<Utc>,
}

impl PitchResult {
    #[must_use]
    pub fn new(
        run_id: Uuid,
        pitch: String,
        brand: BrandProfile,
        competitors: CompetitorSet,
    ) -> Self {
        Self {
            run_id,
            pitch,
            brand,
            competitors,
            generated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn research_summary(&self) -> ResearchSummary {
        ResearchSummary {
            brand_name: self.brand.brand_name.clone(),
            industry: self.brand.industry.clone(),
            competitor_names: self.competitors.names().map(ToOwned::to_owned).collect(),
        }
    }
}

/// Short view of the research behind a pitch, for display next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchSummary {
    pub brand_name: String,
    pub industry: String,
    pub competitor_names: Vec<String>,
}

#[cfg(test)]
#[path = "pitch_test.rs"]
mod tests;
