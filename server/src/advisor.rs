//! Safety advice for a single route.
//!
//! With an API key the advice comes from the language service; without one a
//! fixed three-tier rule on the score is used. The rule ignores feature tags.

use crate::config::{Credential, GeminiSettings};
use crate::gemini::{GeminiClient, GeminiError};
use shared::{AnalysisRequest, AnalysisResponse, SafetyScore, SafetyTier};

/// Returned in place of advice when the language service fails
pub const UNAVAILABLE_ANALYSIS: &str = "Could not analyze safety at this time.";

/// Prefix marking rule-based advice
pub const SIMULATION_PREFIX: &str = "Gemini API key missing. Simulation: ";

pub const SAFE_ADVICE: &str =
    "This route is well-lit and populated. It is the recommended choice for safety.";
pub const CAUTION_ADVICE: &str =
    "Caution: This route has poor lighting and isolation. Avoid if traveling alone at night.";
pub const MODERATE_ADVICE: &str =
    "Moderate risk. Stay alert and keep to main paths where possible.";

/// Outcome of one analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Advice {
    /// Text from the language service, verbatim
    Generated(String),
    /// Rule-based text used when no key is configured
    Simulated(String),
    /// The language service failed; carries the reason
    Unavailable { error: String },
}

impl From<Advice> for AnalysisResponse {
    fn from(advice: Advice) -> Self {
        match advice {
            Advice::Generated(text) | Advice::Simulated(text) => AnalysisResponse::ok(text),
            Advice::Unavailable { error } => AnalysisResponse::failed(error, UNAVAILABLE_ANALYSIS),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Advisor {
    Configured(GeminiClient),
    Unconfigured,
}

impl Advisor {
    pub fn new(credential: &Credential, settings: &GeminiSettings) -> Result<Self, GeminiError> {
        match credential {
            Credential::Configured { api_key } => {
                Ok(Advisor::Configured(GeminiClient::new(api_key, settings)?))
            }
            Credential::Unconfigured => Ok(Advisor::Unconfigured),
        }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Advice {
        match self {
            Advisor::Unconfigured => Advice::Simulated(fallback_advice(request.safety_score)),
            Advisor::Configured(client) => {
                let prompt = build_prompt(request.safety_score, &request.features);
                match client.generate(&prompt).await {
                    Ok(text) => Advice::Generated(text),
                    Err(e) => {
                        tracing::warn!(
                            route_id = request.route_id.as_deref().unwrap_or("-"),
                            "Safety analysis failed: {}",
                            e
                        );
                        Advice::Unavailable {
                            error: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

/// Prompt sent to the language service
pub fn build_prompt(score: SafetyScore, features: &[String]) -> String {
    format!(
        "Act as a safety expert for a pedestrian navigation app.\n\
         Analyze the following route attributes:\n\
         - Safety Score: {}/100\n\
         - Environmental Features: {}\n\
         \n\
         Provide a concise (2-3 sentences) safety advice warning or recommendation \
         for a user walking this route alone at night.",
        score,
        features.join(", ")
    )
}

/// Rule-based advice; depends on the score only
pub fn fallback_advice(score: SafetyScore) -> String {
    let advice = match score.tier() {
        SafetyTier::Safe => SAFE_ADVICE,
        SafetyTier::Caution => CAUTION_ADVICE,
        SafetyTier::Moderate => MODERATE_ADVICE,
    };
    format!("{}{}", SIMULATION_PREFIX, advice)
}
