//! State transitions behind each page of the app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hold [`Binding`](crate::binding::Binding)s to the persisted
//! collections and mutate them with these functions, usually as
//! `posts.update(|p| feed::toggle_paw_up(p, id, user))`. Apart from the
//! session flows, which coordinate several keys, every function is pure: it
//! takes the current value and returns the next one.
//!
//! TRADE-OFFS
//! ==========
//! Timestamps are passed in rather than read here, so tests stay
//! deterministic; callers use [`crate::clock`].

pub mod alerts;
pub mod feed;
pub mod pets;
pub mod reminders;
pub mod session;

use uuid::Uuid;

/// Record id of the form `<kind>-<uuid>`.
pub(crate) fn new_id(kind: &str) -> String {
    format!("{kind}-{}", Uuid::new_v4())
}

/// `value`, or `fallback` when `value` is empty.
pub(crate) fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() { fallback.to_owned() } else { value.to_owned() }
}
