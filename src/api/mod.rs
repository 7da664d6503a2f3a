//! Clients for the interview server.
//!
//! Two endpoints: `/session` issues a short-lived realtime token for a
//! topic, `/analyze` scores a finished transcript. Both are plain JSON
//! over HTTP; neither is retried automatically.

pub mod analyze;
pub mod token;

pub use analyze::{AnalysisClient, AnalysisItem, AnalysisResult, ProgressBucket};
pub use token::{HttpTokenClient, TokenProvider};
