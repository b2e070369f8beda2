use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type DismissHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    modal_class: Option<String>,
    on_dismiss: Option<DismissHook>,
}

/// Optional settings for [`ModalStackService::push_with`]
#[derive(Clone, Default)]
pub struct ModalOptions {
    /// Extra class on the modal surface
    pub modal_class: Option<String>,
    /// Runs when the user dismisses the modal (overlay click or Escape),
    /// not when content closes it through its handle.
    pub on_dismiss: Option<DismissHook>,
}

/// Lets modal content close its own modal
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals; Escape closes the topmost one
#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with(ModalOptions::default(), builder)
    }

    pub fn push_with<F>(&self, options: ModalOptions, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder: Arc::new(builder),
                modal_class: options.modal_class,
                on_dismiss: options.on_dismiss,
            })
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    /// Close on the next tick so the originating DOM event finishes first
    pub fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.close(id);
        });
    }

    /// User-initiated close: fire the dismiss hook, then close
    fn dismiss(&self, id: u64) {
        let hook = self
            .stack
            .with_untracked(|s| s.iter().find(|e| e.id == id).and_then(|e| e.on_dismiss.clone()));
        if let Some(hook) = hook {
            hook();
        }
        self.close_deferred(id);
    }

    fn dismiss_top(&self) {
        if let Some(id) = self.stack.with_untracked(|s| s.last().map(|e| e.id)) {
            self.dismiss(id);
        }
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the modal stack; mount exactly once at the app root
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                if key.key() == "Escape" {
                    svc.dismiss_top();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // Host lives for the whole app; the listener is never removed.
            closure.forget();
        }
    });

    view! {
        <For
            each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
            key=|(_, entry)| entry.id
            children=move |(idx, entry): (usize, ModalEntry)| {
                let id = entry.id;
                let on_close = Callback::new(move |_| svc.dismiss(id));
                let content = (entry.builder)(ModalHandle { id, svc });
                view! {
                    <ModalFrame
                        on_close=on_close
                        z_index=1000 + idx as i32
                        modal_class=entry.modal_class.clone().unwrap_or_default()
                    >
                        {content}
                    </ModalFrame>
                }
            }
        />
    }
}
