//! Evaluation Workflow Controller: the state machine governing one
//! evaluation lifecycle.
#![allow(dead_code)]
//!
//! ```text
//! Idle ──file──▶ Parsing ──ok──▶ AwaitingInput ──submit──▶ Submitting ──ok──▶ Completed
//!   │              │                   ▲                        │
//!   └──paste───────┼───────────────────┘                        │
//!                  ▼                                            ▼
//!               Failed(decode)                            Failed(submit) ──retry──▶ Submitting
//! ```
//!
//! The controller owns the workflow state, the extracted text, and the
//! submitted request exclusively; the presentation layer only reads views.
//! One workflow never has two operations in flight: `Parsing` and
//! `Submitting` gate every other transition, and a monotonically increasing
//! parse token invalidates decode results that arrive after the input they
//! belong to was replaced.

use serde::Serialize;

use crate::decoder::ExtractedText;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, EvaluationRequest};

/// Which phase a failed workflow came from. Decode failures are recovered by
/// re-selecting a file or switching to paste; submit failures by retrying
/// the stored request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedPhase {
    Decode,
    Submit,
}

/// The single workflow state. Consolidates what would otherwise be a pile of
/// booleans (`is_parsing`, `is_analyzing`, separate result/error slots) so
/// impossible combinations cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Parsing,
    AwaitingInput,
    Submitting,
    Completed,
    Failed { phase: FailedPhase, message: String },
}

/// How the resume text currently in the workflow was provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMethod {
    File,
    Paste,
}

/// Read-only snapshot served to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowView {
    #[serde(flatten)]
    pub state: WorkflowState,
    pub input_method: InputMethod,
    pub file_name: Option<String>,
    pub job_description: String,
    pub resume_text: String,
    pub result: Option<AnalysisResult>,
}

/// One evaluation lifecycle. Created per session, driven by the handlers.
#[derive(Debug)]
pub struct EvaluationWorkflow {
    state: WorkflowState,
    input_method: InputMethod,
    file_name: Option<String>,
    job_description: String,
    resume_text: String,
    request: Option<EvaluationRequest>,
    result: Option<AnalysisResult>,
    /// Incremented every time the resume input is (re)placed. Decode
    /// outcomes carry the token they were started with; a mismatch means the
    /// input changed underneath them and the outcome is dropped.
    parse_token: u64,
}

impl Default for EvaluationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationWorkflow {
    pub fn new() -> Self {
        EvaluationWorkflow {
            state: WorkflowState::Idle,
            input_method: InputMethod::File,
            file_name: None,
            job_description: String::new(),
            resume_text: String::new(),
            request: None,
            result: None,
            parse_token: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn request(&self) -> Option<&EvaluationRequest> {
        self.request.as_ref()
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            state: self.state.clone(),
            input_method: self.input_method,
            file_name: self.file_name.clone(),
            job_description: self.job_description.clone(),
            resume_text: self.resume_text.clone(),
            result: self.result.clone(),
        }
    }

    fn busy(&self) -> Option<AppError> {
        match self.state {
            WorkflowState::Parsing => Some(AppError::Validation(
                "the resume is still being read".to_string(),
            )),
            WorkflowState::Submitting => Some(AppError::Validation(
                "an audit is already in flight".to_string(),
            )),
            _ => None,
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // File intake
    // ────────────────────────────────────────────────────────────────────

    /// Starts decoding a newly selected file. Replaces any previous resume
    /// text entirely (no merging) and invalidates in-flight decodes.
    /// Returns the parse token to hand back with the decode outcome.
    pub fn begin_file_parse(&mut self, file_name: String) -> Result<u64, AppError> {
        match self.state {
            WorkflowState::Submitting => {
                return Err(AppError::Validation(
                    "an audit is already in flight".to_string(),
                ))
            }
            WorkflowState::Completed => {
                return Err(AppError::Validation(
                    "start a new scan before uploading another resume".to_string(),
                ))
            }
            _ => {}
        }
        self.input_method = InputMethod::File;
        self.file_name = Some(file_name);
        self.resume_text.clear();
        self.parse_token += 1;
        self.state = WorkflowState::Parsing;
        Ok(self.parse_token)
    }

    /// Applies a successful decode. Returns false (and changes nothing) when
    /// the outcome is stale: the input was replaced while it was in flight.
    pub fn apply_parse_success(&mut self, token: u64, text: ExtractedText) -> bool {
        if token != self.parse_token || self.state != WorkflowState::Parsing {
            return false;
        }
        self.resume_text = text.into_string();
        self.state = WorkflowState::AwaitingInput;
        true
    }

    /// Applies a decode failure. Same staleness guard as success. The job
    /// description is left intact so the user can retry with another file.
    pub fn apply_parse_failure(&mut self, token: u64, message: String) -> bool {
        if token != self.parse_token || self.state != WorkflowState::Parsing {
            return false;
        }
        self.file_name = None;
        self.state = WorkflowState::Failed {
            phase: FailedPhase::Decode,
            message,
        };
        true
    }

    // ────────────────────────────────────────────────────────────────────
    // Paste intake and job description
    // ────────────────────────────────────────────────────────────────────

    /// Switches to paste mode with the given resume text. Discards any
    /// file-sourced text and invalidates in-flight decodes.
    pub fn set_resume_paste(&mut self, text: String) -> Result<(), AppError> {
        match self.state {
            WorkflowState::Submitting => {
                return Err(AppError::Validation(
                    "an audit is already in flight".to_string(),
                ))
            }
            WorkflowState::Completed => {
                return Err(AppError::Validation(
                    "start a new scan before entering a new resume".to_string(),
                ))
            }
            _ => {}
        }
        self.input_method = InputMethod::Paste;
        self.file_name = None;
        self.resume_text = text;
        self.parse_token += 1;
        self.state = WorkflowState::AwaitingInput;
        Ok(())
    }

    pub fn set_job_description(&mut self, text: String) -> Result<(), AppError> {
        match self.state {
            WorkflowState::Submitting => Err(AppError::Validation(
                "an audit is already in flight".to_string(),
            )),
            WorkflowState::Completed => Err(AppError::Validation(
                "start a new scan before editing the job description".to_string(),
            )),
            _ => {
                self.job_description = text;
                Ok(())
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Submission
    // ────────────────────────────────────────────────────────────────────

    /// Validates both inputs and moves to `Submitting`, returning the frozen
    /// request for the caller to send. A blank field rejects the transition
    /// in place: the state does not change and no service call is made.
    pub fn submit(&mut self) -> Result<EvaluationRequest, AppError> {
        if let Some(err) = self.busy() {
            return Err(err);
        }
        if self.state == WorkflowState::Completed {
            return Err(AppError::Validation(
                "start a new scan before submitting again".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(AppError::MissingField("job description".to_string()));
        }
        if self.resume_text.trim().is_empty() {
            return Err(AppError::MissingField("resume text".to_string()));
        }

        let request = EvaluationRequest {
            job_description: self.job_description.clone(),
            resume_text: self.resume_text.clone(),
        };
        self.request = Some(request.clone());
        self.state = WorkflowState::Submitting;
        Ok(request)
    }

    /// Re-enters `Submitting` with the same stored request after a service
    /// failure. No re-parsing and no re-validation; the request was frozen at
    /// first submission.
    pub fn retry(&mut self) -> Result<EvaluationRequest, AppError> {
        let retryable = matches!(
            self.state,
            WorkflowState::Failed {
                phase: FailedPhase::Submit,
                ..
            }
        );
        match (retryable, self.request.clone()) {
            (true, Some(request)) => {
                self.state = WorkflowState::Submitting;
                Ok(request)
            }
            _ => Err(AppError::Validation(
                "nothing to retry: no failed submission in this session".to_string(),
            )),
        }
    }

    /// Caches the validated result and completes the workflow. Returns false
    /// when no submission is in flight (e.g. the session was reset while the
    /// service call was pending).
    pub fn complete_submission(&mut self, result: AnalysisResult) -> bool {
        if self.state != WorkflowState::Submitting {
            return false;
        }
        self.result = Some(result);
        self.state = WorkflowState::Completed;
        true
    }

    /// Records a service failure. Inputs and the frozen request stay intact
    /// so the user can retry without re-entering anything.
    pub fn fail_submission(&mut self, message: String) -> bool {
        if self.state != WorkflowState::Submitting {
            return false;
        }
        self.state = WorkflowState::Failed {
            phase: FailedPhase::Submit,
            message,
        };
        true
    }

    // ────────────────────────────────────────────────────────────────────
    // Completion exits
    // ────────────────────────────────────────────────────────────────────

    /// Starts a new scan: clears the extracted text, the request, and the
    /// result. Also invalidates anything still in flight.
    pub fn reset(&mut self) {
        self.state = WorkflowState::Idle;
        self.input_method = InputMethod::File;
        self.file_name = None;
        self.job_description.clear();
        self.resume_text.clear();
        self.request = None;
        self.result = None;
        self.parse_token += 1;
    }

    /// Substitutes a cached history result; no new request is made.
    pub fn show_history_entry(&mut self, result: AnalysisResult) -> Result<(), AppError> {
        if let Some(err) = self.busy() {
            return Err(err);
        }
        self.result = Some(result);
        self.state = WorkflowState::Completed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_result() -> AnalysisResult {
        AnalysisResult {
            match_percentage: 62,
            missing_keywords: vec!["Kubernetes".to_string()],
            strengths: vec!["Go".to_string()],
            summary_critique: "Strong language fit, missing key infra skill".to_string(),
            recommended_changes: vec![],
            optimized_full_text: "Built Go services on Kubernetes clusters...".to_string(),
        }
    }

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText::new(text).expect("fixture text must be non-blank")
    }

    #[test]
    fn test_paste_submission_reaches_completed_with_exact_result() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("Built Go services; no mention of Kubernetes".to_string())
            .unwrap();
        assert_eq!(*wf.state(), WorkflowState::AwaitingInput);

        wf.set_job_description("Senior Go Engineer, 5+ years, Kubernetes required".to_string())
            .unwrap();

        let request = wf.submit().unwrap();
        assert_eq!(*wf.state(), WorkflowState::Submitting);
        assert_eq!(
            request.job_description,
            "Senior Go Engineer, 5+ years, Kubernetes required"
        );
        assert_eq!(
            request.resume_text,
            "Built Go services; no mention of Kubernetes"
        );

        assert!(wf.complete_submission(fixture_result()));
        assert_eq!(*wf.state(), WorkflowState::Completed);
        assert_eq!(wf.view().result.unwrap(), fixture_result());
    }

    #[test]
    fn test_blank_job_description_rejected_in_place() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("some resume".to_string()).unwrap();
        wf.set_job_description("   ".to_string()).unwrap();

        let err = wf.submit().unwrap_err();
        assert!(matches!(err, AppError::MissingField(f) if f == "job description"));
        assert_eq!(*wf.state(), WorkflowState::AwaitingInput);
        assert!(wf.request().is_none());
    }

    #[test]
    fn test_blank_resume_rejected_in_place() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("  \n ".to_string()).unwrap();
        wf.set_job_description("Senior Engineer".to_string()).unwrap();

        let err = wf.submit().unwrap_err();
        assert!(matches!(err, AppError::MissingField(f) if f == "resume text"));
        assert_eq!(*wf.state(), WorkflowState::AwaitingInput);
    }

    #[test]
    fn test_service_failure_keeps_inputs_and_allows_retry() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("resume body".to_string()).unwrap();
        wf.set_job_description("the role".to_string()).unwrap();
        let original = wf.submit().unwrap();

        assert!(wf.fail_submission("service unavailable".to_string()));
        assert!(matches!(
            wf.state(),
            WorkflowState::Failed {
                phase: FailedPhase::Submit,
                ..
            }
        ));
        // Prior input intact: nothing to re-enter.
        assert_eq!(wf.view().job_description, "the role");
        assert_eq!(wf.view().resume_text, "resume body");

        // Retry re-enters Submitting with the identical frozen request.
        let retried = wf.retry().unwrap();
        assert_eq!(retried, original);
        assert_eq!(*wf.state(), WorkflowState::Submitting);
    }

    #[test]
    fn test_retry_without_failed_submission_is_rejected() {
        let mut wf = EvaluationWorkflow::new();
        assert!(wf.retry().is_err());

        wf.set_resume_paste("r".to_string()).unwrap();
        assert!(wf.retry().is_err());
    }

    #[test]
    fn test_file_parse_happy_path() {
        let mut wf = EvaluationWorkflow::new();
        let token = wf.begin_file_parse("resume.docx".to_string()).unwrap();
        assert_eq!(*wf.state(), WorkflowState::Parsing);

        let text =
            extracted("Experienced engineer with 5 years in backend systems.");
        assert!(wf.apply_parse_success(token, text));
        assert_eq!(*wf.state(), WorkflowState::AwaitingInput);
        assert_eq!(
            wf.view().resume_text,
            "Experienced engineer with 5 years in backend systems."
        );
    }

    #[test]
    fn test_stale_decode_outcome_is_dropped() {
        let mut wf = EvaluationWorkflow::new();
        let first = wf.begin_file_parse("old.docx".to_string()).unwrap();
        let second = wf.begin_file_parse("new.docx".to_string()).unwrap();
        assert!(second > first);

        // The outcome of the replaced upload resolves late and must not win.
        assert!(!wf.apply_parse_success(first, extracted("old content")));
        assert_eq!(*wf.state(), WorkflowState::Parsing);

        assert!(wf.apply_parse_success(second, extracted("new content")));
        assert_eq!(wf.view().resume_text.trim(), "new content");
    }

    #[test]
    fn test_decode_failure_allows_reselecting_or_paste() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_job_description("the role".to_string()).unwrap();
        let token = wf.begin_file_parse("scan.docx".to_string()).unwrap();
        assert!(wf.apply_parse_failure(token, "no extractable text".to_string()));
        assert!(matches!(
            wf.state(),
            WorkflowState::Failed {
                phase: FailedPhase::Decode,
                ..
            }
        ));
        // Job description survives the failure.
        assert_eq!(wf.view().job_description, "the role");

        // Re-selecting a file returns to Parsing...
        assert!(wf.begin_file_parse("retry.docx".to_string()).is_ok());
        assert_eq!(*wf.state(), WorkflowState::Parsing);

        // ...and switching to paste goes straight to AwaitingInput.
        wf.set_resume_paste("typed it out instead".to_string()).unwrap();
        assert_eq!(*wf.state(), WorkflowState::AwaitingInput);
    }

    #[test]
    fn test_switching_to_paste_discards_file_text() {
        let mut wf = EvaluationWorkflow::new();
        let token = wf.begin_file_parse("resume.docx".to_string()).unwrap();
        assert!(wf.apply_parse_success(token, extracted("from the file")));

        wf.set_resume_paste("from the clipboard".to_string()).unwrap();
        let view = wf.view();
        assert_eq!(view.input_method, InputMethod::Paste);
        assert!(view.file_name.is_none());
        assert_eq!(view.resume_text, "from the clipboard");
    }

    #[test]
    fn test_submission_gated_while_parsing_or_submitting() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_job_description("role".to_string()).unwrap();
        wf.begin_file_parse("slow.docx".to_string()).unwrap();
        assert!(wf.submit().is_err());

        let mut wf2 = EvaluationWorkflow::new();
        wf2.set_resume_paste("resume".to_string()).unwrap();
        wf2.set_job_description("role".to_string()).unwrap();
        wf2.submit().unwrap();
        // Second submission while in flight is rejected.
        assert!(wf2.submit().is_err());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("resume".to_string()).unwrap();
        wf.set_job_description("role".to_string()).unwrap();
        wf.submit().unwrap();
        wf.complete_submission(fixture_result());

        wf.reset();
        let view = wf.view();
        assert_eq!(*wf.state(), WorkflowState::Idle);
        assert!(view.job_description.is_empty());
        assert!(view.resume_text.is_empty());
        assert!(view.result.is_none());
        assert!(wf.request().is_none());
    }

    #[test]
    fn test_reset_invalidates_inflight_decode() {
        let mut wf = EvaluationWorkflow::new();
        let token = wf.begin_file_parse("resume.docx".to_string()).unwrap();
        wf.reset();
        assert!(!wf.apply_parse_success(token, extracted("late arrival")));
        assert_eq!(*wf.state(), WorkflowState::Idle);
    }

    #[test]
    fn test_history_entry_substitutes_result_without_new_request() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("resume".to_string()).unwrap();
        wf.set_job_description("role".to_string()).unwrap();
        wf.submit().unwrap();
        wf.complete_submission(fixture_result());

        let mut other = fixture_result();
        other.match_percentage = 91;
        wf.show_history_entry(other.clone()).unwrap();
        assert_eq!(*wf.state(), WorkflowState::Completed);
        assert_eq!(wf.view().result.unwrap(), other);
        // The frozen request is untouched; nothing was re-submitted.
        assert_eq!(wf.request().unwrap().job_description, "role");
    }

    #[test]
    fn test_history_entry_rejected_while_busy() {
        let mut wf = EvaluationWorkflow::new();
        wf.begin_file_parse("resume.docx".to_string()).unwrap();
        assert!(wf.show_history_entry(fixture_result()).is_err());
    }

    #[test]
    fn test_completion_dropped_after_reset() {
        let mut wf = EvaluationWorkflow::new();
        wf.set_resume_paste("resume".to_string()).unwrap();
        wf.set_job_description("role".to_string()).unwrap();
        wf.submit().unwrap();
        wf.reset();
        assert!(!wf.complete_submission(fixture_result()));
        assert_eq!(*wf.state(), WorkflowState::Idle);
    }
}
