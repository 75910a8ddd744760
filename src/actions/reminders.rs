//! Care reminders: completion, creation, and the due-date buckets shown on
//! the reminders page and the dashboard.
//!
//! Dates are `YYYY-MM-DD` strings, which order correctly under plain string
//! comparison.

use crate::actions::new_id;
use crate::models::{Pet, Reminder};

/// Which reminders the reminders page lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReminderFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// Reminders grouped for display. A completed reminder due today appears in
/// both `today` and `completed`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Categorized<'a> {
    pub overdue: Vec<&'a Reminder>,
    pub today: Vec<&'a Reminder>,
    pub upcoming: Vec<&'a Reminder>,
    pub completed: Vec<&'a Reminder>,
}

/// Fields of the "add reminder" form.
#[derive(Debug, Clone, Default)]
pub struct NewReminder {
    pub title: String,
    pub pet_id: String,
    pub due_date: String,
}

#[must_use]
pub fn toggle_completed(reminders: &[Reminder], id: &str) -> Vec<Reminder> {
    reminders
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if r.id == id {
                r.completed = !r.completed;
            }
            r
        })
        .collect()
}

/// Build a reminder from the form, or `None` unless every field is filled.
/// A pet id that matches no pet is kept, labelled "Unknown".
#[must_use]
pub fn compose_reminder(form: &NewReminder, pets: &[Pet]) -> Option<Reminder> {
    if form.title.is_empty() || form.pet_id.is_empty() || form.due_date.is_empty() {
        return None;
    }

    let pet_name = pets.iter().find(|p| p.id == form.pet_id).map_or("Unknown", |p| p.name.as_str());
    Some(Reminder {
        id: new_id("reminder"),
        pet_id: form.pet_id.clone(),
        pet_name: pet_name.to_owned(),
        title: form.title.clone(),
        due_date: form.due_date.clone(),
        completed: false,
    })
}

#[must_use]
pub fn append(reminders: &[Reminder], reminder: Reminder) -> Vec<Reminder> {
    let mut next = reminders.to_vec();
    next.push(reminder);
    next
}

#[must_use]
pub fn delete(reminders: &[Reminder], id: &str) -> Vec<Reminder> {
    reminders.iter().filter(|r| r.id != id).cloned().collect()
}

#[must_use]
pub fn categorize<'a>(reminders: &'a [Reminder], today: &str, filter: ReminderFilter) -> Categorized<'a> {
    let mut out = Categorized::default();
    let visible = reminders.iter().filter(|r| match filter {
        ReminderFilter::All => true,
        ReminderFilter::Pending => !r.completed,
        ReminderFilter::Completed => r.completed,
    });

    for r in visible {
        let due = r.due_date.as_str();
        if due < today && !r.completed {
            out.overdue.push(r);
        }
        if due == today {
            out.today.push(r);
        }
        if due > today {
            out.upcoming.push(r);
        }
        if r.completed {
            out.completed.push(r);
        }
    }
    out
}

/// Open reminders due today.
#[must_use]
pub fn due_today<'a>(reminders: &'a [Reminder], today: &str) -> Vec<&'a Reminder> {
    reminders.iter().filter(|r| r.due_date == today && !r.completed).collect()
}

/// The first `limit` open reminders due after today, in stored order.
#[must_use]
pub fn upcoming<'a>(reminders: &'a [Reminder], today: &str, limit: usize) -> Vec<&'a Reminder> {
    reminders.iter().filter(|r| r.due_date.as_str() > today && !r.completed).take(limit).collect()
}

#[cfg(test)]
#[path = "reminders_test.rs"]
mod tests;
