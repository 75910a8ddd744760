//! Account flows: sign-up, login, logout, and onboarding.
//!
//! DESIGN
//! ======
//! There is no real authentication. The session is the `isLoggedIn` and
//! `onboardingComplete` flags, and each flow writes them through the
//! context's shared bindings so any page bound to the same keys updates at
//! once. Each flow returns the route the app navigates to next.

use tracing::info;

use crate::actions::new_id;
use crate::actions::or_default;
use crate::actions::pets::{NewPet, build_pet};
use crate::context::Context;
use crate::error::SignUpError;
use crate::fixtures::default_pets;
use crate::keys;
use crate::models::User;
use crate::routes::Route;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Owner and first-pet details collected by the onboarding wizard.
#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    pub owner_name: String,
    pub location: String,
    pub emergency_contact: String,
    pub pet: NewPet,
}

/// Validate the sign-up form and start a fresh session that still needs
/// onboarding.
pub fn sign_up(ctx: &Context, password: &str, confirm_password: &str) -> Result<Route, SignUpError> {
    if password != confirm_password {
        return Err(SignUpError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignUpError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }

    ctx.bind_key(&keys::IS_LOGGED_IN).set(true);
    ctx.bind_key(&keys::ONBOARDING_COMPLETE).set(false);
    info!("account created");
    Ok(Route::Onboarding)
}

/// Any credentials are accepted. Unfinished onboarding resumes first.
pub fn log_in(ctx: &Context) -> Route {
    ctx.bind_key(&keys::IS_LOGGED_IN).set(true);
    if ctx.bind_key(&keys::ONBOARDING_COMPLETE).get() { Route::Dashboard } else { Route::Onboarding }
}

pub fn log_out(ctx: &Context) -> Route {
    ctx.bind_key(&keys::IS_LOGGED_IN).set(false);
    Route::Landing
}

/// Replace the profile with the onboarding answers. The new pet is listed
/// ahead of the demo pets and becomes the active pet.
pub fn complete_onboarding(ctx: &Context, form: &Onboarding, now: &str) -> Route {
    let user = User {
        id: "user-1".to_owned(),
        name: or_default(&form.owner_name, "Pet Parent"),
        email: "user@example.com".to_owned(),
        phone: None,
        location: or_default(&form.location, "New York, NY"),
        emergency_contact: form.emergency_contact.clone(),
        avatar: None,
        joined_date: now.to_owned(),
    };
    ctx.bind_key(&keys::USER).set(user);

    let pet = build_pet(new_id("pet-new"), or_default(&form.pet.name, "My Pet"), &form.pet);
    let pet_id = pet.id.clone();
    let mut pets = vec![pet];
    pets.extend(default_pets());
    ctx.bind_key(&keys::PETS).set(pets);
    ctx.bind_key(&keys::ACTIVE_PET_ID).set(pet_id);
    ctx.bind_key(&keys::ONBOARDING_COMPLETE).set(true);

    info!("onboarding complete");
    Route::Dashboard
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
