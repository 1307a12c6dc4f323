//! Toast queue
//!
//! [`ToastContext`] is the [`NotificationSink`] handed to the swap core and
//! the wallet session. Each toast removes itself once its duration elapses.

use crate::utils::constants::MAX_VISIBLE_TOASTS;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use lib_core::notify::NotificationSink;
use shared::dto::notification::Notification;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    /// Queue `notification` and schedule its removal.
    pub fn push(&self, notification: Notification) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let duration_ms = notification.duration_ms;
        self.toasts.update(|toasts| {
            toasts.push(Toast { id, notification });
            let overflow = toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
            toasts.drain(..overflow);
        });

        let ctx = *self;
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            ctx.dismiss(id);
        });

        id
    }

    pub fn dismiss(&self, id: u64) {
        // The app may have been unmounted before the timer fired
        self.toasts.try_update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for ToastContext {
    fn notify(&self, notification: Notification) {
        log::debug!("Toast: {} - {}", notification.title, notification.description);
        self.push(notification);
    }
}

pub fn provide_toast_context() -> ToastContext {
    let context = ToastContext::new();
    provide_context(context);
    context
}

pub fn use_toast_context() -> ToastContext {
    expect_context::<ToastContext>()
}
