//! Results report produced by a full run
//!
//! The `tests` mapping keeps execution order when serialized, so the
//! results file lists checks in the order they ran.

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::test_result::{TestCase, TestResult};

/// Timestamp layout written to the report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ordered mapping of check to result
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestResults(IndexMap<TestCase, TestResult>);

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result for a check, keeping first-seen order
    pub fn insert(&mut self, case: TestCase, result: TestResult) {
        self.0.insert(case, result);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TestCase, &TestResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl TestResults {
    pub fn get(&self, case: TestCase) -> Option<&TestResult> {
        self.0.get(&case)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.keys().map(TestCase::key).collect()
    }
}

/// Report for one run against one deployment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub timestamp: String,
    pub base_url: String,
    pub tests: TestResults,
}

impl ResultsReport {
    /// Start an empty report stamped with the current local time
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            base_url: base_url.into(),
            tests: TestResults::new(),
        }
    }

    pub fn record(&mut self, case: TestCase, result: TestResult) {
        self.tests.insert(case, result);
    }

    pub fn total(&self) -> usize {
        self.tests.len()
    }

    pub fn passed(&self) -> usize {
        self.tests.iter().filter(|(_, r)| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.passed() as f64 / self.total() as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    fn sample_report() -> ResultsReport {
        let mut report = ResultsReport::new("http://localhost:3000/api/public");
        report.record(
            TestCase::Status,
            TestResult::passed(200, json!({"status": "ok"}), 0.1),
        );
        report.record(TestCase::UploadImage, TestResult::errored("HTTP 500"));
        report.record(TestCase::RateLimiting, TestResult::rate_measurement(10, 10, 0));
        report
    }

    #[test]
    fn test_timestamp_format() {
        let report = ResultsReport::new("http://example.com");
        assert!(NaiveDateTime::parse_from_str(&report.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_all_passed());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut results = TestResults::new();
        results.insert(TestCase::Status, TestResult::errored("first"));
        results.insert(TestCase::Authentication, TestResult::errored("auth"));
        results.insert(TestCase::Status, TestResult::errored("second"));

        assert_eq!(results.keys(), vec!["status", "authentication"]);
        assert_eq!(
            results.get(TestCase::Status).and_then(|r| r.error.as_deref()),
            Some("second")
        );
    }

    #[test]
    fn test_serialized_keys_keep_execution_order() {
        let text = serde_json::to_string(&sample_report()).unwrap();
        let status = text.find("\"status\":{").unwrap();
        let upload = text.find("\"upload\"").unwrap();
        let rate = text.find("\"rate_limiting\"").unwrap();
        assert!(status < upload && upload < rate);
    }

    #[test]
    fn test_report_deserializes() {
        let report = sample_report();
        let text = serde_json::to_string_pretty(&report).unwrap();
        let parsed: ResultsReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_unknown_check_rejected() {
        let text = r#"{"timestamp":"2024-01-01 00:00:00","base_url":"x","tests":{"bogus":{"success":true}}}"#;
        let err = serde_json::from_str::<ResultsReport>(text).unwrap_err();
        assert!(err.to_string().contains("unknown variant `bogus`"));
    }

    #[test]
    fn test_response_data_keeps_server_key_order() {
        let data: serde_json::Value =
            serde_json::from_str(r#"{"status":"ok","service":"videogen","zeta":1,"alpha":2}"#)
                .unwrap();
        let mut report = ResultsReport::new("http://localhost:3000/api/public");
        report.record(TestCase::Status, TestResult::passed(200, data, 0.1));

        let text = serde_json::to_string(&report).unwrap();
        assert!(text.contains(r#""data":{"status":"ok","service":"videogen","zeta":1,"alpha":2}"#));

        let parsed: ResultsReport = serde_json::from_str(&text).unwrap();
        let data = parsed.tests.get(TestCase::Status).unwrap().data.as_ref().unwrap();
        let keys: Vec<&String> = data.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["status", "service", "zeta", "alpha"]);
    }
}
