use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use quiz_core::QuizConfig;
use quiz_core::model::{OptionKey, Question, QuestionId, SessionResult};

use crate::error::QuestionServiceError;
use crate::question_service::{QuestionBank, SubmitRequest};

// A plain-text body keeps browser-hosted script endpoints from demanding a
// CORS preflight; the payload is still JSON.
const REQUEST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Question bank behind a single JSON-over-POST grading endpoint.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: Client,
    endpoint_url: String,
}

impl HttpQuestionBank {
    /// Build a bank for `endpoint_url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Http` if the HTTP client cannot be built.
    pub fn new(
        endpoint_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, QuestionServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &QuizConfig) -> Result<Self, QuestionServiceError> {
        Self::new(config.endpoint_url(), config.request_timeout())
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: &ApiRequest<'_>,
    ) -> Result<T, QuestionServiceError> {
        let body = serde_json::to_string(request)?;
        let response = self
            .client
            .post(&self.endpoint_url)
            .header(CONTENT_TYPE, REQUEST_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionServiceError::HttpStatus(response.status()));
        }

        let text = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|err| QuestionServiceError::MalformedResponse(err.to_string()))?;

        if !envelope.success {
            let message = envelope
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| request.default_failure().to_string());
            return Err(QuestionServiceError::Rejected(message));
        }

        envelope
            .data
            .ok_or_else(|| QuestionServiceError::MalformedResponse("missing data".to_string()))
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn fetch_questions(
        &self,
        bank_name: &str,
        count: u32,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        tracing::debug!(bank = bank_name, count, "requesting questions");
        let data: QuestionsData = self
            .call(&ApiRequest::GetQuestions {
                sheet_name: bank_name,
                count,
            })
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "getQuestions failed"))?;

        let questions: Vec<Question> = data.questions.into_iter().map(Question::from).collect();
        tracing::debug!(received = questions.len(), "questions received");
        Ok(questions)
    }

    async fn submit_answers(
        &self,
        request: &SubmitRequest,
    ) -> Result<SessionResult, QuestionServiceError> {
        tracing::debug!(
            player = %request.player_id,
            answers = request.answers.len(),
            elapsed_secs = request.elapsed_secs,
            overtime = request.was_overtime,
            "submitting answers"
        );
        let answers = request
            .answers
            .iter()
            .map(|entry| WireAnswer {
                question_id: &entry.question_id,
                answer: entry.chosen.map_or("", OptionKey::as_str),
            })
            .collect();
        let grade: GradeData = self
            .call(&ApiRequest::SubmitAnswers {
                user_id: request.player_id.as_str(),
                answers,
                elapsed_time: request.elapsed_secs,
                is_overtime: request.was_overtime,
            })
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "submitAnswers failed"))?;

        // Timing is echoed from the request, never taken from the grader.
        let result = SessionResult::new(
            grade.score,
            grade.total,
            grade.passed,
            grade.is_first_pass,
            request.elapsed_secs,
            request.was_overtime,
        )?;
        Ok(result)
    }
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum ApiRequest<'a> {
    #[serde(rename_all = "camelCase")]
    GetQuestions { sheet_name: &'a str, count: u32 },
    #[serde(rename_all = "camelCase")]
    SubmitAnswers {
        user_id: &'a str,
        answers: Vec<WireAnswer<'a>>,
        elapsed_time: u32,
        is_overtime: bool,
    },
}

impl ApiRequest<'_> {
    fn default_failure(&self) -> &'static str {
        match self {
            ApiRequest::GetQuestions { .. } => "failed to fetch questions",
            ApiRequest::SubmitAnswers { .. } => "failed to submit answers",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireAnswer<'a> {
    question_id: &'a QuestionId,
    answer: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsData {
    questions: Vec<QuestionRecord>,
}

// Rows may carry an `answer` column; it is dropped here by not being declared.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: QuestionId,
    #[serde(deserialize_with = "cell_text")]
    question: String,
    #[serde(rename = "optionA", deserialize_with = "cell_text")]
    option_a: String,
    #[serde(rename = "optionB", deserialize_with = "cell_text")]
    option_b: String,
    #[serde(rename = "optionC", deserialize_with = "cell_text")]
    option_c: String,
    #[serde(rename = "optionD", deserialize_with = "cell_text")]
    option_d: String,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        Question::new(
            record.id,
            record.question,
            [
                record.option_a,
                record.option_b,
                record.option_c,
                record.option_d,
            ],
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradeData {
    score: u32,
    total: u32,
    passed: bool,
    #[serde(default)]
    is_first_pass: bool,
}

/// Spreadsheet cells come back as numbers or booleans when they look like one.
fn cell_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected text, got {other}"))),
    }
}
