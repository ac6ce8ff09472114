use crate::{Route, SafetyScore};
use serde::{Deserialize, Serialize};

/// Server -> Client: candidate routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

/// Client -> Server: ask for safety advice about one route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Route being analysed; informational only
    #[serde(default)]
    pub route_id: Option<String>,

    /// Environmental feature tags of the route
    #[serde(default)]
    pub features: Vec<String>,

    pub safety_score: SafetyScore,
}

/// Server -> Client: safety advice.
///
/// `error` is only present when the language service failed, in which case
/// `analysis` carries a generic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisRequest {
    pub fn new(safety_score: SafetyScore, features: Vec<String>) -> Self {
        Self {
            route_id: None,
            features,
            safety_score,
        }
    }
}

impl AnalysisResponse {
    pub fn ok(analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_request_defaults() {
        let req: AnalysisRequest = serde_json::from_value(json!({"safety_score": 90})).unwrap();
        assert!(req.route_id.is_none());
        assert!(req.features.is_empty());
        assert_eq!(req.safety_score.value(), 90);
    }

    #[test]
    fn test_analysis_request_accepts_float_score() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"safety_score": 90.0, "features": ["well-lit"]}))
                .unwrap();
        assert_eq!(req.safety_score.value(), 90);
    }

    #[test]
    fn test_analysis_request_requires_score() {
        let result: Result<AnalysisRequest, _> =
            serde_json::from_value(json!({"features": ["well-lit"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_analysis_request_rejects_out_of_range_score() {
        let result: Result<AnalysisRequest, _> =
            serde_json::from_value(json!({"safety_score": 120}));
        assert!(result.is_err());
    }

    #[test]
    fn test_analysis_response_omits_missing_error() {
        let ok = serde_json::to_value(AnalysisResponse::ok("fine")).unwrap();
        assert_eq!(ok, json!({"analysis": "fine"}));

        let failed = serde_json::to_value(AnalysisResponse::failed("boom", "sorry")).unwrap();
        assert_eq!(failed, json!({"analysis": "sorry", "error": "boom"}));
    }
}
