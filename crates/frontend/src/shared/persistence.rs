//! Save flow for pending proficiency selections.
//!
//! The store is never touched here: the caller passes a request snapshot and
//! applies the [`SaveOutcome`] itself, so a failed save keeps the user's edits.

use async_trait::async_trait;
use contracts::domain::a001_tutor::aggregate::Tutor;
use contracts::shared::selection::UpdateProficienciesRequest;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::shared::api_utils::ApiError;
use crate::shared::confirm::{ConfirmPrompt, ConfirmRequest, PromptResponse};
use crate::shared::notifications::Notifier;

pub const MSG_NO_CHANGES: &str = "No changes to save.";
pub const MSG_SAVED: &str = "Proficiencies updated.";
pub const MSG_NOT_CONFIRMED: &str = "Could not confirm proficiency updates.";
pub const MSG_FAILED: &str = "Failed to update proficiencies.";

/// Backend side of the save
#[async_trait(?Send)]
pub trait ProficiencyUpdater {
    /// `Ok(None)` means the call succeeded without a usable payload
    async fn update_proficiencies(
        &self,
        tutor_id: &str,
        request: &UpdateProficienciesRequest,
    ) -> Result<Option<Tutor>, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// No tutor to save for
    NoActor,
    NoChanges,
    /// Another save is still outstanding
    InFlight,
    Cancelled,
    /// Authoritative tutor returned by the server
    Saved(Tutor),
    Failed(String),
}

/// Clears the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ProficiencySaver<U, P, N> {
    updater: U,
    prompt: P,
    notifier: N,
    in_flight: AtomicBool,
}

impl<U, P, N> ProficiencySaver<U, P, N>
where
    U: ProficiencyUpdater,
    P: ConfirmPrompt,
    N: Notifier,
{
    pub fn new(updater: U, prompt: P, notifier: N) -> Self {
        Self {
            updater,
            prompt,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn save(
        &self,
        tutor: Option<&Tutor>,
        request: UpdateProficienciesRequest,
    ) -> SaveOutcome {
        let Some(tutor) = tutor else {
            log::debug!("save: no tutor selected");
            return SaveOutcome::NoActor;
        };

        if request.is_empty() {
            self.notifier.info(MSG_NO_CHANGES);
            return SaveOutcome::NoChanges;
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("save: already in flight for {}", tutor.name);
            return SaveOutcome::InFlight;
        };

        let prompt = ConfirmRequest::new(
            "Save proficiencies",
            format!("Update the proficiencies of {}?", tutor.name),
        );
        if let PromptResponse::Cancelled = self.prompt.confirm(prompt).await {
            return SaveOutcome::Cancelled;
        }

        let tutor_id = contracts::domain::common::AggregateId::as_string(&tutor.id);
        match self.updater.update_proficiencies(&tutor_id, &request).await {
            Ok(Some(updated)) => {
                self.notifier.success(MSG_SAVED);
                SaveOutcome::Saved(updated)
            }
            Ok(None) => {
                log::warn!("save: empty response for tutor {}", tutor_id);
                self.notifier.error(MSG_NOT_CONFIRMED);
                SaveOutcome::Failed(MSG_NOT_CONFIRMED.to_string())
            }
            Err(e) => {
                log::error!("save: proficiency update failed: {}", e);
                let message = e.message_or(MSG_FAILED);
                self.notifier.error(&message);
                SaveOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notifications::Severity;
    use contracts::shared::selection::{SubjectSelections, SyllabusSelections};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<(Severity, String)>>,
    }

    impl Notifier for &RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.messages
                .borrow_mut()
                .push((severity, message.to_string()));
        }
    }

    struct FixedPrompt {
        answer: bool,
        calls: Cell<usize>,
        /// When set, the prompt waits here before answering
        gate: Option<Rc<Notify>>,
    }

    impl FixedPrompt {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
                gate: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> ConfirmPrompt for &'a FixedPrompt {
        async fn confirm(&self, _request: ConfirmRequest) -> PromptResponse<()> {
            self.calls.set(self.calls.get() + 1);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.answer {
                PromptResponse::Confirmed(())
            } else {
                PromptResponse::Cancelled
            }
        }
    }

    struct StubUpdater {
        result: Result<Option<Tutor>, ApiError>,
        calls: Cell<usize>,
    }

    impl StubUpdater {
        fn returning(result: Result<Option<Tutor>, ApiError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> ProficiencyUpdater for &'a StubUpdater {
        async fn update_proficiencies(
            &self,
            _tutor_id: &str,
            _request: &UpdateProficienciesRequest,
        ) -> Result<Option<Tutor>, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn tutor() -> Tutor {
        Tutor::new_for_insert("Ada Lovelace".into(), None)
    }

    fn request() -> UpdateProficienciesRequest {
        let mut subjects = SubjectSelections::new();
        subjects.insert("Physics".into(), vec!["12".into()]);
        let mut selections = SyllabusSelections::new();
        selections.insert("Cambridge".into(), subjects);
        UpdateProficienciesRequest::new(selections)
    }

    #[tokio::test]
    async fn test_no_actor_is_silent() {
        let updater = StubUpdater::returning(Ok(None));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        assert_eq!(saver.save(None, request()).await, SaveOutcome::NoActor);
        assert_eq!(prompt.calls.get(), 0);
        assert_eq!(updater.calls.get(), 0);
        assert!(notifier.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_empty_selection_informs_without_prompt_or_backend() {
        let updater = StubUpdater::returning(Ok(Some(tutor())));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        let outcome = saver
            .save(Some(&tutor()), UpdateProficienciesRequest::default())
            .await;

        assert_eq!(outcome, SaveOutcome::NoChanges);
        assert_eq!(prompt.calls.get(), 0);
        assert_eq!(updater.calls.get(), 0);
        assert_eq!(
            *notifier.messages.borrow(),
            vec![(Severity::Info, MSG_NO_CHANGES.to_string())]
        );
    }

    #[tokio::test]
    async fn test_cancelled_prompt_skips_backend() {
        let updater = StubUpdater::returning(Ok(Some(tutor())));
        let prompt = FixedPrompt::answering(false);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        assert_eq!(
            saver.save(Some(&tutor()), request()).await,
            SaveOutcome::Cancelled
        );
        assert_eq!(updater.calls.get(), 0);
        assert!(!saver.is_saving());
    }

    #[tokio::test]
    async fn test_success_returns_server_tutor() {
        let mut server_tutor = tutor();
        server_tutor.apply_proficiency_update(&request().syllabus_selections);
        let updater = StubUpdater::returning(Ok(Some(server_tutor.clone())));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        let outcome = saver.save(Some(&tutor()), request()).await;

        assert_eq!(outcome, SaveOutcome::Saved(server_tutor));
        assert_eq!(
            *notifier.messages.borrow(),
            vec![(Severity::Success, MSG_SAVED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_null_payload_is_a_failure() {
        let updater = StubUpdater::returning(Ok(None));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        let outcome = saver.save(Some(&tutor()), request()).await;

        assert_eq!(outcome, SaveOutcome::Failed(MSG_NOT_CONFIRMED.to_string()));
        assert_eq!(
            *notifier.messages.borrow(),
            vec![(Severity::Error, MSG_NOT_CONFIRMED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_backend_error_prefers_server_message() {
        let updater = StubUpdater::returning(Err(ApiError::status(
            400,
            Some("Unknown subject 'Latin' in syllabus 'IB'".into()),
        )));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        let outcome = saver.save(Some(&tutor()), request()).await;
        assert_eq!(
            outcome,
            SaveOutcome::Failed("Unknown subject 'Latin' in syllabus 'IB'".into())
        );
    }

    #[tokio::test]
    async fn test_network_failure_uses_generic_text() {
        let updater = StubUpdater::returning(Err(ApiError::transport(
            "Failed to send request: TypeError: NetworkError when attempting to fetch resource.",
        )));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        let outcome = saver.save(Some(&tutor()), request()).await;
        assert_eq!(outcome, SaveOutcome::Failed(MSG_FAILED.to_string()));
        assert_eq!(
            *notifier.messages.borrow(),
            vec![(Severity::Error, MSG_FAILED.to_string())]
        );
        assert!(!saver.is_saving());
    }

    #[tokio::test]
    async fn test_second_save_while_first_outstanding_is_rejected() {
        let gate = Rc::new(Notify::new());
        let updater = StubUpdater::returning(Ok(Some(tutor())));
        let prompt = FixedPrompt {
            answer: true,
            calls: Cell::new(0),
            gate: Some(gate.clone()),
        };
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);
        let acting = tutor();

        let first = saver.save(Some(&acting), request());
        let second = async {
            let outcome = saver.save(Some(&acting), request()).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, SaveOutcome::Saved(_)));
        assert_eq!(second, SaveOutcome::InFlight);
        assert_eq!(prompt.calls.get(), 1);
        assert_eq!(updater.calls.get(), 1);
        assert!(!saver.is_saving());
    }

    #[tokio::test]
    async fn test_save_is_possible_again_after_failure() {
        let updater = StubUpdater::returning(Ok(None));
        let prompt = FixedPrompt::answering(true);
        let notifier = RecordingNotifier::default();
        let saver = ProficiencySaver::new(&updater, &prompt, &notifier);

        saver.save(Some(&tutor()), request()).await;
        saver.save(Some(&tutor()), request()).await;
        assert_eq!(updater.calls.get(), 2);
    }
}
