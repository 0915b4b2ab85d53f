//! Smoke tests for the Video Generation API
//!
//! `ApiTester` runs six independent checks against one deployment:
//!
//! - Status (`GET /status`)
//! - Upload (`POST /upload-image`)
//! - Generate Images (`POST /generate-images`)
//! - Generate Video (`POST /generate-video`)
//! - Authentication (`POST /upload-image` without credentials, expects 401)
//! - Rate Limiting (repeated `GET /status`, counts 429s)
//!
//! Every check converts transport, status and decoding failures into a
//! failed `TestResult`; nothing propagates out of a check, so a full run
//! always yields a complete report.

mod payload;

pub use payload::{
    GenerateImagesRequest, GenerateVideoRequest, UploadImageRequest, TEST_FILENAME, TEST_IMAGE,
    TEST_PROMPT,
};

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{TesterConfig, MAX_RATE_LIMIT_REQUESTS};
use crate::http::{HttpClient, HttpError, HttpResponse};
use crate::models::{ResultsReport, TestCase, TestResult};
use crate::output::{OutputFormat, ResultFormatter};
use crate::utils::Timer;

/// Images requested from the generation endpoint
pub const NUM_IMAGES: u32 = 2;

/// Requested video length in seconds
pub const VIDEO_DURATION_SECS: u32 = 5;

/// Stateful client for one API deployment
pub struct ApiTester {
    config: TesterConfig,
    client: HttpClient,
    formatter: ResultFormatter,
}

impl ApiTester {
    /// Build the authenticated client for `config`
    pub fn new(config: TesterConfig) -> Result<Self> {
        let client = HttpClient::new(&config.base_url, config.timeout_secs)?
            .json_content()?
            .bearer_auth(&config.api_key)?;

        Ok(Self {
            config,
            client,
            formatter: ResultFormatter::new(OutputFormat::Table),
        })
    }

    /// Use a different summary format
    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// GET `/status`
    pub async fn test_status(&self) -> TestResult {
        println!("🔍 Testing status endpoint...");

        match expect_json(self.client.get("/status").await) {
            Ok((response, data)) => {
                println!("✅ Status: {}", field_or(&data, "status", "unknown"));
                println!("📋 Service: {}", field_or(&data, "service", "unknown"));
                print_response_time(&response);
                TestResult::passed(response.status_code(), data, response.response_time_secs())
            }
            Err(e) => {
                println!("❌ Status test failed: {e}");
                TestResult::errored(e)
            }
        }
    }

    /// POST `/upload-image` with the fixture image
    pub async fn test_upload_image(&self) -> TestResult {
        println!("\n📤 Testing image upload...");

        let payload = UploadImageRequest::new(TEST_IMAGE).with_filename(TEST_FILENAME);

        match expect_json(self.client.post_json("/upload-image", &payload).await) {
            Ok((response, data)) => {
                println!("✅ Upload successful");
                println!("📁 S3 Key: {}", field_or(&data, "s3Key", "N/A"));
                println!("🔗 URL: {}", field_or(&data, "imageUrl", "N/A"));
                print_response_time(&response);
                TestResult::passed(response.status_code(), data, response.response_time_secs())
            }
            Err(e) => {
                println!("❌ Upload test failed: {e}");
                TestResult::errored(e)
            }
        }
    }

    /// POST `/generate-images` asking for two variations of the fixture
    pub async fn test_generate_images(&self) -> TestResult {
        println!("\n🎨 Testing image generation...");

        let payload = GenerateImagesRequest {
            image: TEST_IMAGE,
            prompt: TEST_PROMPT,
            num_images: NUM_IMAGES,
        };

        match expect_json(self.client.post_json("/generate-images", &payload).await) {
            Ok((response, data)) => {
                println!("✅ Generation successful");
                println!(
                    "🖼️ Generated: {}/{}",
                    field_or(&data, "generatedCount", "0"),
                    field_or(&data, "requestedCount", "0")
                );
                print_response_time(&response);

                if let Some(errors) = data.get("errors").filter(|e| is_truthy(e)) {
                    println!("⚠️ Errors: {errors}");
                    warn!("Image generation reported errors: {}", errors);
                }

                TestResult::passed(response.status_code(), data, response.response_time_secs())
            }
            Err(e) => {
                println!("❌ Generation test failed: {e}");
                TestResult::errored(e)
            }
        }
    }

    /// POST `/generate-video` asking for a five second clip
    pub async fn test_generate_video(&self) -> TestResult {
        println!("\n🎬 Testing video generation...");

        let payload = GenerateVideoRequest {
            image: TEST_IMAGE,
            prompt: TEST_PROMPT,
            duration: VIDEO_DURATION_SECS,
        };

        match expect_json(self.client.post_json("/generate-video", &payload).await) {
            Ok((response, data)) => {
                println!("✅ Video generation successful");
                println!("🎥 Video URL: {}", field_or(&data, "videoUrl", "N/A"));
                println!("📊 Status: {}", field_or(&data, "status", "N/A"));
                print_response_time(&response);
                TestResult::passed(response.status_code(), data, response.response_time_secs())
            }
            Err(e) => {
                println!("❌ Video generation test failed: {e}");
                TestResult::errored(e)
            }
        }
    }

    /// POST `/upload-image` without credentials; passes only on 401
    pub async fn test_authentication(&self) -> TestResult {
        println!("\n🔒 Testing authentication...");

        let client = match HttpClient::new(&self.config.base_url, self.config.timeout_secs)
            .and_then(HttpClient::json_content)
        {
            Ok(client) => client,
            Err(e) => {
                println!("❌ Authentication test failed: {e:#}");
                return TestResult::errored(format!("{e:#}"));
            }
        };

        let payload = UploadImageRequest::new(TEST_IMAGE);

        match client.post_json("/upload-image", &payload).await {
            Ok(response) if response.status == StatusCode::UNAUTHORIZED => {
                println!("✅ Authentication working correctly (401 returned)");
                let reason = response
                    .json()
                    .map(|data| field_or(&data, "error", "N/A"))
                    .unwrap_or_else(|_| "N/A".to_string());
                println!("🔒 Error: {reason}");
                TestResult::verdict(
                    true,
                    response.status_code(),
                    "Authentication properly enforced",
                )
            }
            Ok(response) => {
                println!(
                    "❌ Authentication not working properly (got {})",
                    response.status_code()
                );
                TestResult::verdict(
                    false,
                    response.status_code(),
                    "Authentication not properly enforced",
                )
            }
            Err(e) => {
                println!("❌ Authentication test failed: {e}");
                TestResult::errored(e)
            }
        }
    }

    /// Repeated GET `/status` counting 200s and 429s
    ///
    /// This is a measurement, so the result is always a success. Requests
    /// that fail at the transport level are logged and left out of the
    /// total.
    pub async fn test_rate_limiting(&self) -> TestResult {
        println!("\n⚡ Testing rate limiting...");

        let delay = Duration::from_millis(self.config.rate_limit_delay_ms);
        let mut requests_made = 0u32;
        let mut successful = 0u32;
        let mut rate_limited = 0u32;

        let probes = self.config.rate_limit_requests.min(MAX_RATE_LIMIT_REQUESTS);

        for i in 1..=probes {
            match self.client.get("/status").await {
                Ok(response) => {
                    requests_made += 1;
                    match response.status {
                        StatusCode::OK => successful += 1,
                        StatusCode::TOO_MANY_REQUESTS => {
                            rate_limited += 1;
                            println!("Rate limited on request {i}");
                        }
                        other => debug!("Request {} returned {}", i, other.as_u16()),
                    }
                }
                Err(e) => {
                    println!("Request {i} failed: {e}");
                    warn!("Rate limit probe {} failed: {}", i, e);
                }
            }

            tokio::time::sleep(delay).await;
        }

        println!("📊 Rate limit test results:");
        println!("   Total requests: {requests_made}");
        println!("   Successful: {successful}");
        println!("   Rate limited: {rate_limited}");

        TestResult::rate_measurement(requests_made, successful, rate_limited)
    }

    /// Run a single check
    pub async fn run_test(&self, case: TestCase) -> TestResult {
        match case {
            TestCase::Status => self.test_status().await,
            TestCase::UploadImage => self.test_upload_image().await,
            TestCase::GenerateImages => self.test_generate_images().await,
            TestCase::GenerateVideo => self.test_generate_video().await,
            TestCase::Authentication => self.test_authentication().await,
            TestCase::RateLimiting => self.test_rate_limiting().await,
        }
    }

    /// Run the given checks in order, print the summary and return the report
    pub async fn run_selected(&self, cases: &[TestCase]) -> ResultsReport {
        println!("🧪 Starting API Tests...");
        println!("{}", "=".repeat(50));
        info!("Testing {} ({} checks)", self.base_url(), cases.len());

        let timer = Timer::start("test run");
        let mut report = ResultsReport::new(self.base_url());

        for &case in cases {
            let result = self.run_test(case).await;
            debug!("{}: {}", case.key(), result);
            report.record(case, result);
        }

        let elapsed = timer.stop();
        info!(
            "Finished {}/{} passed in {:.2}s",
            report.passed(),
            report.total(),
            elapsed.as_secs_f64()
        );

        println!("{}", self.formatter.format_report(&report));
        report
    }

    /// Run all six checks in fixed order
    pub async fn run_all_tests(&self) -> ResultsReport {
        self.run_selected(&TestCase::all()).await
    }
}

/// Require a 2xx status and a JSON body
fn expect_json(
    response: Result<HttpResponse, HttpError>,
) -> Result<(HttpResponse, Value), HttpError> {
    let response = response?.error_for_status()?;
    let data = response.json()?;
    Ok((response, data))
}

/// Render a response field for the console, with a fallback when missing
fn field_or(data: &Value, key: &str, default: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Non-null and non-empty
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
    }
}

fn print_response_time(response: &HttpResponse) {
    println!("🕒 Response time: {:.2}s", response.response_time_secs());
}
