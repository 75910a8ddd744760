//! Lost and found alerts (the SOS board).

use crate::actions::{new_id, or_default};
use crate::models::{Alert, AlertKind, AlertStatus};

/// Fields of the report wizard.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub kind: AlertKind,
    pub pet_name: String,
    pub pet_type: String,
    pub breed: String,
    pub description: String,
    pub location: String,
    pub contact: String,
}

/// Build an active alert reported by the current user.
#[must_use]
pub fn compose_alert(form: &NewAlert, now: &str) -> Alert {
    Alert {
        id: new_id("alert"),
        kind: form.kind,
        pet_name: or_default(&form.pet_name, "Unknown"),
        pet_type: form.pet_type.clone(),
        breed: or_default(&form.breed, "Unknown breed"),
        description: form.description.clone(),
        location: form.location.clone(),
        photo: None,
        reporter_name: "You".to_owned(),
        reporter_contact: form.contact.clone(),
        status: AlertStatus::Active,
        created_at: now.to_owned(),
    }
}

#[must_use]
pub fn prepend_alert(alerts: &[Alert], alert: Alert) -> Vec<Alert> {
    std::iter::once(alert).chain(alerts.iter().cloned()).collect()
}

/// Mark `id` resolved; it drops off every active view.
#[must_use]
pub fn resolve(alerts: &[Alert], id: &str) -> Vec<Alert> {
    alerts
        .iter()
        .map(|a| {
            let mut a = a.clone();
            if a.id == id {
                a.status = AlertStatus::Resolved;
            }
            a
        })
        .collect()
}

/// Active alerts whose pet name, breed, or location contains `query`
/// (case-insensitive), optionally restricted to one kind.
#[must_use]
pub fn search<'a>(alerts: &'a [Alert], query: &str, kind: Option<AlertKind>) -> Vec<&'a Alert> {
    let needle = query.to_lowercase();
    alerts
        .iter()
        .filter(|a| a.status == AlertStatus::Active)
        .filter(|a| kind.is_none_or(|k| a.kind == k))
        .filter(|a| {
            [&a.pet_name, &a.breed, &a.location].iter().any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The first `limit` active alerts, for the dashboard.
#[must_use]
pub fn active(alerts: &[Alert], limit: usize) -> Vec<&Alert> {
    alerts.iter().filter(|a| a.status == AlertStatus::Active).take(limit).collect()
}

#[cfg(test)]
#[path = "alerts_test.rs"]
mod tests;
