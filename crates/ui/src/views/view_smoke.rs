use std::sync::Arc;

use quiz_core::model::{GamePhase, OptionKey, Question, SessionResult};
use quiz_core::{ConfigIssue, QuizConfig};
use services::{QuestionBank, QuestionServiceError, SampleQuestionBank, SubmitRequest};

use super::QuizIntent;
use super::test_harness::{ViewHarness, setup_view_harness};

fn config(count: u32, limit: u32) -> QuizConfig {
    QuizConfig::default()
        .with_endpoint_url("https://grader.example.com/exec")
        .with_question_count(count)
        .with_pass_threshold(2)
        .with_time_limit_secs(limit)
}

fn sample_harness(count: u32, limit: u32) -> (ViewHarness, Arc<SampleQuestionBank>) {
    let bank = Arc::new(SampleQuestionBank::new(2).with_shuffle(false));
    let harness = setup_view_harness(config(count, limit), bank.clone(), Vec::new());
    (harness, bank)
}

async fn start(harness: &mut ViewHarness, id: &str) {
    harness.dispatch(QuizIntent::Start(id.to_string()));
    harness.drive_async().await;
    harness.drive_async().await;
}

async fn answer_all_correctly(harness: &mut ViewHarness, bank: &SampleQuestionBank) {
    while harness.with_flow(|flow| flow.phase()) == GamePhase::Playing {
        let key = harness
            .with_flow(|flow| flow.current_question().and_then(|q| bank.key_for(q.id())))
            .expect("current question has a key");
        harness.dispatch(QuizIntent::Select(key));
        harness.dispatch(QuizIntent::Advance);
    }
    harness.drive_async().await;
    harness.drive_async().await;
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_rules_and_warnings() {
    let bank = Arc::new(SampleQuestionBank::new(2));
    let harness = setup_view_harness(
        config(3, 90),
        bank,
        vec![ConfigIssue::MissingEndpoint],
    );
    let html = harness.render();
    assert!(html.contains("Quiz Challenge"), "missing title in {html}");
    assert!(html.contains("Each quiz draws 3 random questions."), "missing count in {html}");
    assert!(html.contains("Time limit: 1 minute 30 seconds"), "missing limit in {html}");
    assert!(html.contains("QUIZ_ENDPOINT_URL is not set"), "missing warning in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn blank_id_shows_inline_message() {
    let (mut harness, _) = sample_harness(3, 0);
    harness.dispatch(QuizIntent::Start("   ".to_string()));

    let html = harness.render();
    assert!(html.contains("please enter your ID"), "missing message in {html}");
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Idle);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let (mut harness, _) = sample_harness(3, 0);
    start(&mut harness, "alice").await;

    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Playing);
    let html = harness.render();
    assert!(html.contains("Progress: 1 / 3"), "missing progress in {html}");
    assert!(html.contains("Stage 1"), "missing stage in {html}");
    assert!(html.contains("Which of these is a core idea of React?"), "missing prompt in {html}");
    assert!(html.contains("Time spent"), "missing timer in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn selecting_marks_option_and_keeps_position() {
    let (mut harness, _) = sample_harness(3, 0);
    start(&mut harness, "alice").await;

    harness.dispatch(QuizIntent::Advance);
    assert_eq!(harness.with_flow(|flow| flow.current_index()), 0);

    harness.dispatch(QuizIntent::Select(OptionKey::C));
    let html = harness.render();
    assert!(html.contains("option-btn selected"), "missing selection in {html}");
    assert_eq!(harness.with_flow(|flow| flow.current_choice()), Some(OptionKey::C));
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_score_and_restart() {
    let (mut harness, bank) = sample_harness(3, 0);
    start(&mut harness, "alice").await;
    answer_all_correctly(&mut harness, &bank).await;

    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Result);
    let html = harness.render();
    assert!(html.contains("Challenge passed!"), "missing badge in {html}");
    assert!(html.contains("3 / 3"), "missing score in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(html.contains("This is your first clear!"), "missing first pass in {html}");

    harness.dispatch(QuizIntent::Restart);
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Idle);
    assert_eq!(harness.with_flow(|flow| flow.player_id_draft().to_string()), "");
    let html = harness.render();
    assert!(html.contains("Enter your ID"), "missing home in {html}");
    assert!(!html.contains("alice"), "id field not cleared in {html}");
}

struct UnavailableBank {
    fail_fetch: bool,
}

#[async_trait::async_trait]
impl QuestionBank for UnavailableBank {
    async fn fetch_questions(
        &self,
        bank_name: &str,
        count: u32,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        if self.fail_fetch {
            return Err(QuestionServiceError::Rejected("sheet not found".to_string()));
        }
        SampleQuestionBank::new(1)
            .with_shuffle(false)
            .fetch_questions(bank_name, count)
            .await
    }

    async fn submit_answers(
        &self,
        _request: &SubmitRequest,
    ) -> Result<SessionResult, QuestionServiceError> {
        Err(QuestionServiceError::MalformedResponse("missing data".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn failed_fetch_shows_overlay_over_prefilled_form() {
    let mut harness = setup_view_harness(
        config(3, 0),
        Arc::new(UnavailableBank { fail_fetch: true }),
        Vec::new(),
    );
    start(&mut harness, "carol").await;

    let html = harness.render();
    assert!(
        html.contains("Failed to load questions. Please try again later."),
        "missing overlay in {html}"
    );
    assert!(html.contains("carol"), "missing prefill in {html}");

    harness.dispatch(QuizIntent::DismissError);
    let html = harness.render();
    assert!(!html.contains("Failed to load questions"), "overlay not dismissed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submit_returns_to_last_question_with_overlay() {
    let mut harness = setup_view_harness(
        config(1, 0),
        Arc::new(UnavailableBank { fail_fetch: false }),
        Vec::new(),
    );
    start(&mut harness, "dave").await;

    harness.dispatch(QuizIntent::Select(OptionKey::A));
    harness.dispatch(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Playing);
    let html = harness.render();
    assert!(
        html.contains("Failed to submit answers. Please try again later."),
        "missing overlay in {html}"
    );
    assert!(html.contains("Submit"), "missing submit button in {html}");
}

/// Serves the sample questions and holds each submission for `delay`.
struct SlowGrader {
    inner: SampleQuestionBank,
    delay: std::time::Duration,
    reject: bool,
    submitted: std::sync::Mutex<Option<SubmitRequest>>,
}

impl SlowGrader {
    fn new(delay_secs: u64, reject: bool) -> Self {
        Self {
            inner: SampleQuestionBank::new(1).with_shuffle(false),
            delay: std::time::Duration::from_secs(delay_secs),
            reject,
            submitted: std::sync::Mutex::new(None),
        }
    }

    fn submitted(&self) -> Option<SubmitRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl QuestionBank for SlowGrader {
    async fn fetch_questions(
        &self,
        bank_name: &str,
        count: u32,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        self.inner.fetch_questions(bank_name, count).await
    }

    async fn submit_answers(
        &self,
        request: &SubmitRequest,
    ) -> Result<SessionResult, QuestionServiceError> {
        *self.submitted.lock().unwrap() = Some(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.reject {
            return Err(QuestionServiceError::Rejected("grader offline".to_string()));
        }
        self.inner.submit_answers(request).await
    }
}

async fn play_until_elapsed(harness: &mut ViewHarness, target: u32) {
    for _ in 0..(target + 10) {
        if harness.with_flow(|flow| flow.elapsed_secs()) >= target {
            break;
        }
        harness.advance_secs(1).await;
    }
    assert_eq!(harness.with_flow(|flow| flow.elapsed_secs()), target);
}

#[tokio::test(start_paused = true)]
async fn timer_reaches_overtime_and_stops_while_submitting() {
    let bank = Arc::new(SlowGrader::new(10, false));
    let mut harness = setup_view_harness(config(1, 30), bank.clone(), Vec::new());
    start(&mut harness, "erin").await;
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Playing);

    play_until_elapsed(&mut harness, 35).await;
    assert!(harness.with_flow(|flow| flow.is_overtime()));
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Playing);
    let html = harness.render();
    assert!(html.contains("Overtime"), "missing overtime badge in {html}");

    harness.dispatch(QuizIntent::Select(OptionKey::A));
    harness.dispatch(QuizIntent::Advance);
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Submitting);
    harness.drive_async().await;

    let request = bank.submitted().expect("answers were submitted");
    assert_eq!(request.elapsed_secs, 35);
    assert!(request.was_overtime);

    harness.advance_secs(5).await;
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Submitting);
    assert_eq!(harness.with_flow(|flow| flow.elapsed_secs()), 35);

    harness.advance_secs(10).await;
    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Result);
    let (elapsed, overtime) = harness.with_flow(|flow| {
        let result = flow.result().expect("graded");
        (result.elapsed_secs(), result.was_overtime())
    });
    assert_eq!(elapsed, 35);
    assert!(overtime);
}

#[tokio::test(start_paused = true)]
async fn timer_resumes_after_failed_submit() {
    let bank = Arc::new(SlowGrader::new(0, true));
    let mut harness = setup_view_harness(config(1, 0), bank, Vec::new());
    start(&mut harness, "frank").await;

    play_until_elapsed(&mut harness, 3).await;
    harness.dispatch(QuizIntent::Select(OptionKey::B));
    harness.dispatch(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.with_flow(|flow| flow.phase()), GamePhase::Playing);
    assert_eq!(harness.with_flow(|flow| flow.elapsed_secs()), 3);

    play_until_elapsed(&mut harness, 5).await;
    assert_eq!(harness.with_flow(|flow| flow.current_choice()), Some(OptionKey::B));
}
