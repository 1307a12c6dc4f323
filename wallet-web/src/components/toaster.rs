//! Toast stack

use crate::state::toasts::use_toast_context;
use leptos::prelude::*;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toast_context();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = if toast.notification.is_destructive() { "toast toast-destructive" } else { "toast" };
                    view! {
                        <div class=class role="status" on:click=move |_| toasts.dismiss(id)>
                            <p class="toast-title">{toast.notification.title}</p>
                            <p class="toast-description">{toast.notification.description}</p>
                        </div>
                    }
                }
            />
        </div>
    }
}
