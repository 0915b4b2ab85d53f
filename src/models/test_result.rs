//! Test result models for API smoke testing
//!
//! Defines the six checks and the uniform result shape they return.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The six checks run against an API deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    Status,
    #[serde(rename = "upload")]
    UploadImage,
    GenerateImages,
    GenerateVideo,
    Authentication,
    RateLimiting,
}

impl TestCase {
    /// Key used in the results report
    pub fn key(&self) -> &'static str {
        match self {
            TestCase::Status => "status",
            TestCase::UploadImage => "upload",
            TestCase::GenerateImages => "generate_images",
            TestCase::GenerateVideo => "generate_video",
            TestCase::Authentication => "authentication",
            TestCase::RateLimiting => "rate_limiting",
        }
    }

    /// Display name for the summary table
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::Status => "Status",
            TestCase::UploadImage => "Upload",
            TestCase::GenerateImages => "Generate Images",
            TestCase::GenerateVideo => "Generate Video",
            TestCase::Authentication => "Authentication",
            TestCase::RateLimiting => "Rate Limiting",
        }
    }

    /// Endpoint the check exercises
    pub fn endpoint(&self) -> &'static str {
        match self {
            TestCase::Status | TestCase::RateLimiting => "GET /status",
            TestCase::UploadImage | TestCase::Authentication => "POST /upload-image",
            TestCase::GenerateImages => "POST /generate-images",
            TestCase::GenerateVideo => "POST /generate-video",
        }
    }

    /// All checks in execution order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::Status,
            TestCase::UploadImage,
            TestCase::GenerateImages,
            TestCase::GenerateVideo,
            TestCase::Authentication,
            TestCase::RateLimiting,
        ]
    }

    /// Parse from report key
    pub fn from_key(s: &str) -> Option<TestCase> {
        TestCase::all()
            .into_iter()
            .find(|case| case.key() == s.trim().to_lowercase())
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a single check
///
/// `success` is always present. The remaining fields are populated
/// depending on which branch the check took and are left out of the
/// serialized form when empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Seconds until the response headers arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limited: Option<u32>,
}

impl TestResult {
    /// Successful call to an endpoint expected to answer 2xx
    pub fn passed(status_code: u16, data: Value, response_time: f64) -> Self {
        Self {
            success: true,
            status_code: Some(status_code),
            data: Some(data),
            response_time: Some(response_time),
            ..Default::default()
        }
    }

    /// Failure caused by a transport, status or decoding error
    pub fn errored(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    /// Verdict on an observed status code with an explanatory message
    pub fn verdict(success: bool, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success,
            status_code: Some(status_code),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Rate limit measurement; never a failure
    pub fn rate_measurement(total_requests: u32, successful: u32, rate_limited: u32) -> Self {
        Self {
            success: true,
            total_requests: Some(total_requests),
            successful: Some(successful),
            rate_limited: Some(rate_limited),
            ..Default::default()
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.success {
            "✅"
        } else {
            "❌"
        }
    }

    pub fn verdict_label(&self) -> &'static str {
        if self.success {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.verdict_label())?;
        if let Some(code) = self.status_code {
            write!(f, " [{code}]")?;
        }
        if let Some(secs) = self.response_time {
            write!(f, " ({secs:.2}s)")?;
        }
        if let Some(msg) = self.error.as_ref().or(self.message.as_ref()) {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_keys() {
        let keys: Vec<_> = TestCase::all().iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "status",
                "upload",
                "generate_images",
                "generate_video",
                "authentication",
                "rate_limiting"
            ]
        );
    }

    #[test]
    fn test_case_from_key() {
        assert_eq!(TestCase::from_key("upload"), Some(TestCase::UploadImage));
        assert_eq!(TestCase::from_key(" Rate_Limiting "), Some(TestCase::RateLimiting));
        assert_eq!(TestCase::from_key("upload_image"), None);
    }

    #[test]
    fn test_case_serde_uses_report_key() {
        let value = serde_json::to_value(TestCase::UploadImage).unwrap();
        assert_eq!(value, json!("upload"));
        let value = serde_json::to_value(TestCase::GenerateVideo).unwrap();
        assert_eq!(value, json!("generate_video"));
    }

    #[test]
    fn test_passed_result_shape() {
        let result = TestResult::passed(200, json!({"status": "ok"}), 0.25);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "status_code": 200,
                "data": {"status": "ok"},
                "response_time": 0.25
            })
        );
    }

    #[test]
    fn test_errored_result_shape() {
        let result = TestResult::errored("Connection refused to http://localhost:1/status");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["success"], json!(false));
        assert!(value.get("status_code").is_none());
        assert!(value["error"].as_str().unwrap().contains("Connection refused"));
    }

    #[test]
    fn test_rate_measurement_is_success() {
        let result = TestResult::rate_measurement(10, 7, 3);
        assert!(result.success);
        assert_eq!(result.total_requests, Some(10));
        assert_eq!(result.to_string(), "✅ PASS");
    }

    #[test]
    fn test_display_prefers_error() {
        let result = TestResult::verdict(false, 200, "Authentication not properly enforced");
        assert_eq!(
            result.to_string(),
            "❌ FAIL [200] - Authentication not properly enforced"
        );
    }
}
