//! Transcript analysis client and result types.
//!
//! The analysis service pairs interviewer questions with candidate answers
//! by position, scores each pair against its reference material, and
//! aggregates per-topic progress. Every response field is tolerated as
//! missing — the service has varied its output shape over time and a
//! partial report is better than none.

use crate::error::{Result, VivaError};
use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    topic: &'a str,
    interviewer: &'a [String],
    candidate: &'a [String],
}

/// One scored question/answer pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisItem {
    pub question: String,
    pub answer: String,
    /// Model-written ideal answer for comparison.
    pub expected: String,
    pub item_score: Option<f64>,
    /// Reference keywords the answer covered / missed.
    pub hits: Vec<String>,
    pub misses: Vec<String>,
}

/// Per-topic score aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBucket {
    pub name: String,
    pub score: f64,
    pub questions: u32,
}

/// The structured scoring result for one interview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub items: Vec<AnalysisItem>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_steps: Vec<String>,
    pub analysis: String,
    /// Older service versions named this field `buckets`.
    #[serde(alias = "buckets")]
    pub progress: Vec<ProgressBucket>,
}

/// HTTP client for the interview server's `/analyze` endpoint.
pub struct AnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Submit a transcript for scoring.
    ///
    /// A failure here does not touch the transcript; the caller can retry
    /// with the same data.
    pub async fn analyze(&self, transcript: &Transcript) -> Result<AnalysisResult> {
        let request = AnalysisRequest {
            topic: &transcript.topic,
            interviewer: &transcript.interviewer,
            candidate: &transcript.candidate,
        };

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VivaError::AnalysisRequest {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
