use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const ENV_ENDPOINT_URL: &str = "QUIZ_ENDPOINT_URL";
pub const ENV_PASS_THRESHOLD: &str = "QUIZ_PASS_THRESHOLD";
pub const ENV_QUESTION_COUNT: &str = "QUIZ_QUESTION_COUNT";
pub const ENV_QUESTION_BANK: &str = "QUIZ_QUESTION_BANK";
pub const ENV_TIME_LIMIT_SECS: &str = "QUIZ_TIME_LIMIT_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "QUIZ_REQUEST_TIMEOUT_SECS";
pub const ENV_SAMPLE_LATENCY_MS: &str = "QUIZ_SAMPLE_LATENCY_MS";

//
// ─── ISSUES ────────────────────────────────────────────────────────────────────
//

/// A problem with the runtime settings.
///
/// None of these stop the app; they are shown as warnings on the start screen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigIssue {
    #[error("QUIZ_ENDPOINT_URL is not set; using the built-in sample questions")]
    MissingEndpoint,

    #[error("QUIZ_ENDPOINT_URL is not a valid http(s) URL: {raw}")]
    InvalidEndpoint { raw: String },

    #[error("{key} must be a whole number, got {raw:?}; using the default")]
    InvalidNumber { key: &'static str, raw: String },

    #[error("pass threshold must be greater than 0")]
    PassThresholdTooLow,

    #[error("question count must be greater than 0")]
    QuestionCountTooLow,

    #[error("pass threshold ({threshold}) cannot exceed question count ({count})")]
    ThresholdExceedsCount { threshold: u32, count: u32 },
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Runtime settings, resolved once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    endpoint_url: String,
    pass_threshold: u32,
    question_count: u32,
    question_bank: String,
    time_limit_secs: u32,
    request_timeout: Duration,
    sample_latency: Duration,
}

/// A loaded config together with everything that looked wrong while loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoad {
    pub config: QuizConfig,
    pub issues: Vec<ConfigIssue>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            pass_threshold: Self::DEFAULT_PASS_THRESHOLD,
            question_count: Self::DEFAULT_QUESTION_COUNT,
            question_bank: Self::DEFAULT_QUESTION_BANK.to_string(),
            time_limit_secs: 0,
            request_timeout: Duration::from_secs(u64::from(Self::DEFAULT_REQUEST_TIMEOUT_SECS)),
            sample_latency: Duration::from_millis(u64::from(Self::DEFAULT_SAMPLE_LATENCY_MS)),
        }
    }
}

impl QuizConfig {
    pub const DEFAULT_PASS_THRESHOLD: u32 = 6;
    pub const DEFAULT_QUESTION_COUNT: u32 = 10;
    pub const DEFAULT_QUESTION_BANK: &'static str = "題庫一";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;
    pub const DEFAULT_SAMPLE_LATENCY_MS: u32 = 1000;

    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> ConfigLoad {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    ///
    /// Blank values count as unset. Numbers that fail to parse keep the
    /// default and are reported as `ConfigIssue::InvalidNumber`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigLoad {
        let mut issues = Vec::new();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut number = |key: &'static str, default: u32| match get(key) {
            None => default,
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                issues.push(ConfigIssue::InvalidNumber { key, raw });
                default
            }),
        };

        let pass_threshold = number(ENV_PASS_THRESHOLD, Self::DEFAULT_PASS_THRESHOLD);
        let question_count = number(ENV_QUESTION_COUNT, Self::DEFAULT_QUESTION_COUNT);
        let time_limit_secs = number(ENV_TIME_LIMIT_SECS, 0);
        let timeout_secs = number(ENV_REQUEST_TIMEOUT_SECS, Self::DEFAULT_REQUEST_TIMEOUT_SECS);
        let latency_ms = number(ENV_SAMPLE_LATENCY_MS, Self::DEFAULT_SAMPLE_LATENCY_MS);

        let config = Self {
            endpoint_url: get(ENV_ENDPOINT_URL).unwrap_or_default(),
            pass_threshold,
            question_count,
            question_bank: get(ENV_QUESTION_BANK)
                .unwrap_or_else(|| Self::DEFAULT_QUESTION_BANK.to_string()),
            time_limit_secs,
            request_timeout: Duration::from_secs(u64::from(timeout_secs)),
            sample_latency: Duration::from_millis(u64::from(latency_ms)),
        };

        issues.extend(config.validate());
        ConfigLoad { config, issues }
    }

    /// Check the settings for consistency.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.endpoint_url.is_empty() {
            issues.push(ConfigIssue::MissingEndpoint);
        } else if !is_http_url(&self.endpoint_url) {
            issues.push(ConfigIssue::InvalidEndpoint {
                raw: self.endpoint_url.clone(),
            });
        }

        if self.pass_threshold < 1 {
            issues.push(ConfigIssue::PassThresholdTooLow);
        }
        if self.question_count < 1 {
            issues.push(ConfigIssue::QuestionCountTooLow);
        }
        if self.pass_threshold > self.question_count {
            issues.push(ConfigIssue::ThresholdExceedsCount {
                threshold: self.pass_threshold,
                count: self.question_count,
            });
        }

        issues
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn with_question_bank(mut self, question_bank: impl Into<String>) -> Self {
        self.question_bank = question_bank.into();
        self
    }

    #[must_use]
    pub fn with_pass_threshold(mut self, pass_threshold: u32) -> Self {
        self.pass_threshold = pass_threshold;
        self
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: u32) -> Self {
        self.question_count = question_count;
        self
    }

    #[must_use]
    pub fn with_time_limit_secs(mut self, time_limit_secs: u32) -> Self {
        self.time_limit_secs = time_limit_secs;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    #[must_use]
    pub fn with_sample_latency(mut self, sample_latency: Duration) -> Self {
        self.sample_latency = sample_latency;
        self
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    #[must_use]
    pub fn has_endpoint(&self) -> bool {
        !self.endpoint_url.is_empty()
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn question_bank(&self) -> &str {
        &self.question_bank
    }

    /// Time limit in seconds; 0 means unlimited.
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn is_time_limited(&self) -> bool {
        self.time_limit_secs > 0
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Delay the built-in sample bank adds to every call.
    #[must_use]
    pub fn sample_latency(&self) -> Duration {
        self.sample_latency
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
