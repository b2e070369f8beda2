use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay plus positioned surface. Content renders its own header and actions.
#[component]
pub fn ModalFrame(
    /// Called on an overlay click
    on_close: Callback<()>,
    #[prop(optional)] z_index: Option<i32>,
    #[prop(optional)] modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    // Press and release must both land on the overlay; dragging a text selection
    // out of the dialog must not close it.
    let pressed_on_overlay = RwSignal::new(false);

    let is_overlay_target = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    };

    let on_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(is_overlay_target(&ev));
    };

    let on_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && is_overlay_target(&ev);
        pressed_on_overlay.set(false);
        if close {
            // The overlay is removed by this close; run it after the event dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let class = match modal_class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=on_mouse_down
            on:click=on_click
        >
            <div class=class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
