//! Parse LLM narration of a chart into a structured reading
//!
//! The deterministic engine computes the chart; the LLM only narrates it.
//! The model is instructed to answer with a fenced ```json block, and a
//! response without a well-formed fence is a hard failure for that call —
//! never retried here, never silently defaulted.

use crate::chart::Chart;
use crate::core::error::{BaziError, Result};
use crate::llm::client::LlmClient;
use serde::{Deserialize, Serialize};

/// Relative strength of an element or god in the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Average,
    Strong,
}

/// Score and strength for one of the five elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementScore {
    pub score: i32,
    pub strength: Strength,
}

/// Per-element scores across the whole chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementBalance {
    pub wood: ElementScore,
    pub fire: ElementScore,
    pub earth: ElementScore,
    pub metal: ElementScore,
    pub water: ElementScore,
}

/// The chart's governing pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub analysis: String,
    pub influence: String,
}

/// Life-area influence of one Ten God
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodInfluence {
    pub personality: String,
    pub career: String,
    pub wealth: String,
    pub marriage: String,
    pub family: String,
}

/// Narrated assessment of one Ten God present in the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodReading {
    pub name: String,
    pub element: String,
    pub strength: Strength,
    pub location: String,
    pub analysis: String,
    pub influence: GodInfluence,
}

/// A relationship hidden between branches (combinations, clashes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenRelationship {
    #[serde(rename = "type")]
    pub kind: String,
    pub branches: Vec<String>,
    pub analysis: String,
}

/// Personality sketch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Health outlook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub risks: Vec<String>,
}

/// Full structured reading of a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReading {
    pub five_elements: ElementBalance,
    pub pattern: Pattern,
    pub ten_gods: Vec<GodReading>,
    pub hidden_relationships: Vec<HiddenRelationship>,
    pub favorable_elements: Vec<String>,
    pub unfavorable_elements: Vec<String>,
    pub personality: Personality,
    pub health: Health,
}

/// Ask the LLM to narrate a chart and parse the structured result
///
/// # Arguments
/// * `client` - The LLM client to use
/// * `chart` - The fully computed chart to narrate
pub async fn analyze_chart(client: &LlmClient, chart: &Chart) -> Result<ChartReading> {
    let user_prompt = serde_json::to_string(chart)?;
    let response = client.complete(READING_SYSTEM_PROMPT, &user_prompt).await?;
    let json_str = extract_fenced_json(&response)?;

    serde_json::from_str(json_str).map_err(|e| {
        BaziError::LlmError(format!(
            "Failed to parse reading: {} - Response: {}",
            e, response
        ))
    })
}

/// Extract the contents of a fenced ```json block from an LLM response
///
/// The fence is mandatory: surrounding prose is expected, but a response
/// without an opening ```json marker or its closing ``` is rejected.
pub fn extract_fenced_json(response: &str) -> Result<&str> {
    let start = response
        .find("```json")
        .map(|i| i + "```json".len())
        .ok_or_else(|| BaziError::LlmError("No fenced json block in response".into()))?;
    let end = response[start..]
        .find("```")
        .map(|i| start + i)
        .ok_or_else(|| BaziError::LlmError("Unterminated json fence in response".into()))?;
    Ok(response[start..end].trim())
}

/// System prompt for chart narration
const READING_SYSTEM_PROMPT: &str = r#"You are a Four Pillars (BaZi) analyst.
You receive a fully computed chart as JSON: four pillars with stems, branches,
hidden-stem gods, five elements and life stages, plus the decade luck cycle
and the current year fate. Do NOT recompute any of it; interpret it.

Respond with a single fenced json block and nothing else of significance
outside it:

```json
{
  "fiveElements": {
    "wood": {"score": 0-100, "strength": "weak|average|strong"},
    "fire": {"score": 0-100, "strength": "weak|average|strong"},
    "earth": {"score": 0-100, "strength": "weak|average|strong"},
    "metal": {"score": 0-100, "strength": "weak|average|strong"},
    "water": {"score": 0-100, "strength": "weak|average|strong"}
  },
  "pattern": {"name": "...", "analysis": "...", "influence": "..."},
  "tenGods": [
    {
      "name": "...", "element": "...", "strength": "weak|average|strong",
      "location": "which pillar", "analysis": "...",
      "influence": {"personality": "...", "career": "...", "wealth": "...",
                    "marriage": "...", "family": "..."}
    }
  ],
  "hiddenRelationships": [
    {"type": "combination|clash|punishment", "branches": ["...", "..."], "analysis": "..."}
  ],
  "favorableElements": ["..."],
  "unfavorableElements": ["..."],
  "personality": {"traits": ["..."], "strengths": ["..."], "weaknesses": ["..."]},
  "health": {"risks": ["..."]}
}
```
"#;
