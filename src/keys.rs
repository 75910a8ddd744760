//! Typed logical keys for every piece of persisted application state.
//!
//! A [`Key`] pairs the logical name with the value type stored under it and
//! the default a fresh store starts from, so call sites cannot bind `pets`
//! as anything but `Vec<Pet>`.

use std::fmt;

use crate::clock;
use crate::fixtures;
use crate::models::{Activity, Alert, JournalEntry, Pet, Post, Reminder, User};

pub struct Key<T> {
    name: &'static str,
    default: fn() -> T,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str, default: fn() -> T) -> Self {
        Self { name, default }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn default_value(&self) -> T {
        (self.default)()
    }
}

// Manual impls: `T` itself need not be Clone for the key to be.
impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

fn no() -> bool {
    false
}

fn first_pet_id() -> String {
    fixtures::DEFAULT_ACTIVE_PET_ID.to_owned()
}

fn reminders_from_today() -> Vec<Reminder> {
    fixtures::default_reminders(clock::today())
}

pub const USER: Key<User> = Key::new("user", fixtures::default_user);
pub const PETS: Key<Vec<Pet>> = Key::new("pets", fixtures::default_pets);
pub const ACTIVE_PET_ID: Key<String> = Key::new("activePetId", first_pet_id);
pub const POSTS: Key<Vec<Post>> = Key::new("posts", fixtures::default_posts);
pub const ALERTS: Key<Vec<Alert>> = Key::new("alerts", fixtures::default_alerts);
pub const REMINDERS: Key<Vec<Reminder>> = Key::new("reminders", reminders_from_today);
pub const ACTIVITIES: Key<Vec<Activity>> = Key::new("activities", Vec::new);
pub const JOURNAL: Key<Vec<JournalEntry>> = Key::new("journal", Vec::new);
pub const IS_LOGGED_IN: Key<bool> = Key::new("isLoggedIn", no);
pub const ONBOARDING_COMPLETE: Key<bool> = Key::new("onboardingComplete", no);
pub const INITIALIZED: Key<bool> = Key::new("initialized", no);

/// Every logical key the application persists.
pub const ALL: [&str; 11] = [
    USER.name(),
    PETS.name(),
    ACTIVE_PET_ID.name(),
    POSTS.name(),
    ALERTS.name(),
    REMINDERS.name(),
    ACTIVITIES.name(),
    JOURNAL.name(),
    IS_LOGGED_IN.name(),
    ONBOARDING_COMPLETE.name(),
    INITIALIZED.name(),
];

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
