//! One-line user notifications (success / error / info).

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Sink for user-facing messages
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);

    fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// Toast stack rendered by [`ToastHost`]; provided at the app root
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastService {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::warn!("notify: {}", message),
            _ => log::info!("notify: {}", message),
        }

        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| {
            t.push(Toast {
                id,
                severity,
                message: message.to_string(),
            })
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            svc.dismiss(id);
        });
    }
}

/// Renders active toasts; mount once at the app root
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>()
        .expect("ToastService not provided in context (provide it in app root)");

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let intent = match toast.severity {
                        Severity::Success => MessageBarIntent::Success,
                        Severity::Error => MessageBarIntent::Error,
                        Severity::Info => MessageBarIntent::Info,
                    };
                    let id = toast.id;
                    view! {
                        <div class="toast" on:click=move |_| svc.dismiss(id)>
                            <MessageBar intent=intent>{toast.message}</MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
