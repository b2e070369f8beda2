//! Asynchronous confirmation prompt on top of the modal stack.

use async_trait::async_trait;
use leptos::prelude::*;
use std::sync::{Arc, Mutex};
use thaw::*;
use tokio::sync::oneshot;

use crate::shared::modal_stack::{ModalOptions, ModalStackService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
        }
    }
}

/// Decision of a prompt; `Cancelled` covers "No", overlay click and Escape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse<T> {
    Confirmed(T),
    Cancelled,
}

#[async_trait(?Send)]
pub trait ConfirmPrompt {
    async fn confirm(&self, request: ConfirmRequest) -> PromptResponse<()>;
}

type Responder = Arc<Mutex<Option<oneshot::Sender<bool>>>>;

/// Answer once; later answers (e.g. dismiss after a button click) are dropped
fn respond(responder: &Responder, confirmed: bool) {
    let sender = responder.lock().ok().and_then(|mut slot| slot.take());
    if let Some(sender) = sender {
        let _ = sender.send(confirmed);
    }
}

/// [`ConfirmPrompt`] rendered as a modal dialog
#[derive(Clone, Copy)]
pub struct ModalConfirm {
    modals: ModalStackService,
}

impl ModalConfirm {
    pub fn new(modals: ModalStackService) -> Self {
        Self { modals }
    }

    pub fn from_context() -> Self {
        Self::new(
            use_context::<ModalStackService>()
                .expect("ModalStackService not provided in context"),
        )
    }
}

#[async_trait(?Send)]
impl ConfirmPrompt for ModalConfirm {
    async fn confirm(&self, request: ConfirmRequest) -> PromptResponse<()> {
        let (tx, rx) = oneshot::channel();
        let responder: Responder = Arc::new(Mutex::new(Some(tx)));

        let on_dismiss = {
            let responder = responder.clone();
            Arc::new(move || respond(&responder, false)) as Arc<dyn Fn() + Send + Sync>
        };
        let options = ModalOptions {
            modal_class: Some("confirm-dialog".to_string()),
            on_dismiss: Some(on_dismiss),
        };

        self.modals.push_with(options, move |handle| {
            let request = request.clone();
            let yes = responder.clone();
            let no = responder.clone();
            view! {
                <div class="confirm-dialog__body">
                    <h3>{request.title}</h3>
                    <p>{request.message}</p>
                    <div class="confirm-dialog__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                respond(&yes, true);
                                handle.close();
                            }
                        >
                            {request.confirm_label}
                        </Button>
                        <Button on_click=move |_| {
                            respond(&no, false);
                            handle.close();
                        }>
                            "Cancel"
                        </Button>
                    </div>
                </div>
            }
            .into_any()
        });

        match rx.await {
            Ok(true) => PromptResponse::Confirmed(()),
            _ => PromptResponse::Cancelled,
        }
    }
}
