use serde::{Deserialize, Serialize};
use std::fmt;

/// 查詢使用的後端端點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LookupEndpoint {
    /// `GET /admin/pincodes/search?term=<pincode>`
    #[default]
    Search,
    /// `GET /pincodes/lookup?pincode=<pincode>`
    Exact,
}

impl LookupEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            LookupEndpoint::Search => "admin/pincodes/search",
            LookupEndpoint::Exact => "pincodes/lookup",
        }
    }

    pub fn query_key(&self) -> &'static str {
        match self {
            LookupEndpoint::Search => "term",
            LookupEndpoint::Exact => "pincode",
        }
    }
}

/// 多個查詢同時進行時，晚到的舊回應如何處理
///
/// `ApplyAll` keeps the page's historical behaviour: every completed response
/// is applied, so the last response to *complete* wins even if it answers an
/// older keystroke. `LatestOnly` tags each lookup with a generation number
/// and drops any response that does not belong to the most recently issued
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    #[default]
    ApplyAll,
    LatestOnly,
}

/// 表單欄位 ID
pub mod field {
    pub const PINCODE: &str = "pincode";
    pub const STATE: &str = "state";
    pub const CITY: &str = "city";
    pub const SOCIETY: &str = "society";
}

/// 目錄服務回傳的一筆地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookupResult {
    pub state: String,
    pub city: String,
    pub society: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

impl AddressLookupResult {
    pub fn new(
        state: impl Into<String>,
        city: impl Into<String>,
        society: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            society: society.into(),
            id: None,
            pincode: None,
        }
    }

    /// 要寫入表單的三個欄位，順序固定
    pub fn form_values(&self) -> [(&'static str, &str); 3] {
        [
            (field::STATE, self.state.as_str()),
            (field::CITY, self.city.as_str()),
            (field::SOCIETY, self.society.as_str()),
        ]
    }
}

/// `GET /admin/pincodes/search` 的回應
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<AddressLookupResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /pincodes/lookup` 的回應
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactLookupResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<AddressLookupResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ExactLookupResponse> for SearchResponse {
    fn from(response: ExactLookupResponse) -> Self {
        Self {
            success: response.success,
            results: response.result.into_iter().collect(),
            message: response.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    Unsuccessful { message: Option<String> },
    EmptyResults,
    Transport(String),
    Status(u16),
    Decode(String),
    Form(String),
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOpReason::Unsuccessful { message: Some(message) } => {
                write!(f, "directory reported failure: {}", message)
            }
            NoOpReason::Unsuccessful { message: None } => write!(f, "directory reported failure"),
            NoOpReason::EmptyResults => write!(f, "no matching pincodes"),
            NoOpReason::Transport(e) => write!(f, "network failure: {}", e),
            NoOpReason::Status(code) => write!(f, "HTTP status {}", code),
            NoOpReason::Decode(e) => write!(f, "malformed response: {}", e),
            NoOpReason::Form(e) => write!(f, "could not update form: {}", e),
        }
    }
}

/// 處理一次輸入事件的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutofillOutcome {
    Applied(AddressLookupResult),
    Discarded(AddressLookupResult),
    NoOp(NoOpReason),
}

impl AutofillOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AutofillOutcome::Applied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_response_without_results_parses() {
        let body = r#"{"success": false, "message": "No matching pincodes found"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert!(response.results.is_empty());
        assert_eq!(response.message.as_deref(), Some("No matching pincodes found"));
    }

    #[test]
    fn test_backend_result_with_extra_fields() {
        let body = r#"{"success": true, "results": [
            {"id": 7, "pincode": "560001", "state": "Karnataka", "city": "Bengaluru", "society": "MG Road"}
        ]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let first = &response.results[0];
        assert_eq!(first.id, Some(7));
        assert_eq!(
            first.form_values(),
            [("state", "Karnataka"), ("city", "Bengaluru"), ("society", "MG Road")]
        );
    }

    #[test]
    fn test_exact_response_converts_to_search_shape() {
        let body = r#"{"success": true, "result": {"pincode": "110001", "state": "Delhi", "city": "New Delhi", "society": "Connaught Place"}}"#;
        let exact: ExactLookupResponse = serde_json::from_str(body).unwrap();
        let search: SearchResponse = exact.into();
        assert!(search.success);
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].city, "New Delhi");
    }
}
