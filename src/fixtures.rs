//! Default records and first-run storage seeding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app ships with a demo household so every page has something to show
//! before the user adds data. `initialize_storage` writes it once per store,
//! guarded by the `initialized` flag.

use time::{Date, Duration};
use tracing::info;

use crate::clock::iso_date;
use crate::gateway::Storage;
use crate::keys;
use crate::models::{
    Activity, Alert, AlertKind, AlertStatus, Comment, JournalEntry, Pet, Post, PostCategory, Reminder, Species,
    User,
};

pub const DEFAULT_ACTIVE_PET_ID: &str = "pet-1";

#[must_use]
pub fn default_user() -> User {
    User {
        id: "user-1".into(),
        name: "Alex Johnson".into(),
        email: "alex@example.com".into(),
        phone: Some("+1 555-123-4567".into()),
        location: "Brooklyn, NY".into(),
        emergency_contact: "+1 555-987-6543".into(),
        avatar: None,
        joined_date: "2024-06-15".into(),
    }
}

#[must_use]
pub fn default_pets() -> Vec<Pet> {
    vec![
        Pet {
            id: "pet-1".into(),
            name: "Luna".into(),
            species: Species::Dog,
            breed: "Golden Retriever".into(),
            age: 3,
            photo: None,
            bio: Some("Professional Ball Fetcher & Certified Good Girl".into()),
            vaccinated: true,
            neutered: true,
            microchipped: true,
            temperament: vec![
                "Good with kids".into(),
                "High energy".into(),
                "Loves water".into(),
                "Friendly".into(),
            ],
            vet_contact: Some("Dr. Smith - (555) 234-5678".into()),
        },
        Pet {
            id: "pet-2".into(),
            name: "Max".into(),
            species: Species::Cat,
            breed: "Maine Coon".into(),
            age: 5,
            photo: None,
            bio: Some("Master of Naps & Window Watching".into()),
            vaccinated: true,
            neutered: true,
            microchipped: false,
            temperament: vec!["Independent".into(), "Calm".into(), "Loves treats".into()],
            vet_contact: Some("Dr. Smith - (555) 234-5678".into()),
        },
    ]
}

#[must_use]
pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "post-1".into(),
            author_id: "user-2".into(),
            author_name: "Sarah Mitchell".into(),
            author_pet_tag: "Golden Retriever Mom".into(),
            author_avatar: None,
            content: "Had the best morning walk with Cooper today! The sunrise at Prospect Park was absolutely \
                      magical. Any other early risers here? 🌅🐕"
                .into(),
            category: PostCategory::General,
            location: Some("5 mins away".into()),
            image: None,
            paw_ups: 24,
            pawed_by: vec!["user-1".into()],
            comments: vec![Comment {
                id: "comment-1".into(),
                author_id: "user-3".into(),
                author_name: "Mike Chen".into(),
                author_avatar: None,
                content: "The best time for walks! Less crowded too.".into(),
                created_at: "2024-01-15T08:30:00Z".into(),
            }],
            created_at: "2024-01-15T07:15:00Z".into(),
        },
        Post {
            id: "post-2".into(),
            author_id: "user-4".into(),
            author_name: "Emma Watson".into(),
            author_pet_tag: "Cat Parent x2".into(),
            author_avatar: None,
            content: "Looking for recommendations for a good cat-sitter in the Williamsburg area. We're going \
                      away for a week next month. Must be experienced with shy cats! 🐱"
                .into(),
            category: PostCategory::Recommendations,
            location: Some("10 mins away".into()),
            image: None,
            paw_ups: 8,
            pawed_by: Vec::new(),
            comments: Vec::new(),
            created_at: "2024-01-15T10:20:00Z".into(),
        },
        Post {
            id: "post-3".into(),
            author_id: "user-5".into(),
            author_name: "James Park".into(),
            author_pet_tag: "Rescue Dog Dad".into(),
            author_avatar: None,
            content: "Organizing a rescue dog meetup this Saturday at McCarren Park! All rescue pups welcome. \
                      Let's celebrate our second-chance babies! 🎉"
                .into(),
            category: PostCategory::Playdates,
            location: Some("15 mins away".into()),
            image: None,
            paw_ups: 45,
            pawed_by: vec!["user-1".into(), "user-2".into()],
            comments: vec![Comment {
                id: "comment-2".into(),
                author_id: "user-1".into(),
                author_name: "Alex Johnson".into(),
                author_avatar: None,
                content: "Luna and I will be there! Can't wait!".into(),
                created_at: "2024-01-15T11:00:00Z".into(),
            }],
            created_at: "2024-01-15T09:45:00Z".into(),
        },
    ]
}

#[must_use]
pub fn default_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "alert-1".into(),
            kind: AlertKind::Lost,
            pet_name: "Buddy".into(),
            pet_type: "Dog".into(),
            breed: "Beagle Mix".into(),
            description: "Brown and white, wearing a blue collar with tags. Very friendly but might be scared."
                .into(),
            location: "Last seen near Central Park West".into(),
            photo: None,
            reporter_name: "John Davis".into(),
            reporter_contact: "555-111-2222".into(),
            status: AlertStatus::Active,
            created_at: "2024-01-15T14:30:00Z".into(),
        },
        Alert {
            id: "alert-2".into(),
            kind: AlertKind::Found,
            pet_name: "Unknown".into(),
            pet_type: "Cat".into(),
            breed: "Tabby".into(),
            description: "Gray tabby cat, no collar. Found hiding under a porch. Very scared but eating.".into(),
            location: "Found on 5th Street near the bakery".into(),
            photo: None,
            reporter_name: "Lisa Chen".into(),
            reporter_contact: "555-333-4444".into(),
            status: AlertStatus::Active,
            created_at: "2024-01-15T16:00:00Z".into(),
        },
    ]
}

/// Demo reminders due today, in a week, and in three days.
#[must_use]
pub fn default_reminders(today: Date) -> Vec<Reminder> {
    let due = |days: i64| iso_date(today.saturating_add(Duration::days(days)));
    vec![
        Reminder {
            id: "reminder-1".into(),
            pet_id: "pet-1".into(),
            pet_name: "Luna".into(),
            title: "Flea & Tick Medication".into(),
            due_date: due(0),
            completed: false,
        },
        Reminder {
            id: "reminder-2".into(),
            pet_id: "pet-1".into(),
            pet_name: "Luna".into(),
            title: "Annual Vaccination".into(),
            due_date: due(7),
            completed: false,
        },
        Reminder {
            id: "reminder-3".into(),
            pet_id: "pet-2".into(),
            pet_name: "Max".into(),
            title: "Grooming Appointment".into(),
            due_date: due(3),
            completed: false,
        },
    ]
}

/// Seed every application key unless this store was already initialized.
/// Returns whether anything was written.
pub fn initialize_storage(storage: &Storage, today: Date) -> bool {
    if storage.get(keys::INITIALIZED.name(), false) {
        return false;
    }

    storage.set(keys::USER.name(), &default_user());
    storage.set(keys::PETS.name(), &default_pets());
    storage.set(keys::ACTIVE_PET_ID.name(), DEFAULT_ACTIVE_PET_ID);
    storage.set(keys::POSTS.name(), &default_posts());
    storage.set(keys::ALERTS.name(), &default_alerts());
    storage.set(keys::REMINDERS.name(), &default_reminders(today));
    storage.set(keys::ACTIVITIES.name(), &Vec::<Activity>::new());
    storage.set(keys::JOURNAL.name(), &Vec::<JournalEntry>::new());
    storage.set(keys::IS_LOGGED_IN.name(), &false);
    storage.set(keys::ONBOARDING_COMPLETE.name(), &false);
    storage.set(keys::INITIALIZED.name(), &true);

    info!(prefix = %storage.prefix(), "storage seeded with default records");
    true
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
