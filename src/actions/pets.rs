//! Pet profiles: adding pets and editing the active pet's badges and
//! temperament.

use crate::actions::{new_id, or_default};
use crate::models::{HealthBadge, Pet, Species};

/// Fields of the "add pet" form. `age` is free text as typed.
#[derive(Debug, Clone, Default)]
pub struct NewPet {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub age: String,
}

/// Build a pet from the form, or `None` when the name is blank.
#[must_use]
pub fn compose_pet(form: &NewPet) -> Option<Pet> {
    if form.name.trim().is_empty() {
        return None;
    }
    Some(build_pet(new_id("pet"), form.name.clone(), form))
}

/// Pet built from `form` under `id`, with the form's defaults applied.
pub(crate) fn build_pet(id: String, name: String, form: &NewPet) -> Pet {
    Pet {
        id,
        name,
        species: form.species,
        breed: or_default(&form.breed, "Mixed"),
        age: parse_age(&form.age),
        photo: None,
        bio: None,
        vaccinated: false,
        neutered: false,
        microchipped: false,
        temperament: Vec::new(),
        vet_contact: None,
    }
}

/// Leading whole number of `raw`; anything else (including 0) reads as 1.
fn parse_age(raw: &str) -> u32 {
    let digits: String = raw.trim_start().chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(age) if age > 0 => age,
        _ => 1,
    }
}

#[must_use]
pub fn add_pet(pets: &[Pet], pet: Pet) -> Vec<Pet> {
    let mut next = pets.to_vec();
    next.push(pet);
    next
}

/// The pet with `active_id`, else the first pet.
#[must_use]
pub fn active_pet<'a>(pets: &'a [Pet], active_id: &str) -> Option<&'a Pet> {
    pets.iter().find(|p| p.id == active_id).or_else(|| pets.first())
}

/// Flip `badge` on the pet with `active_id`. Only an exact id match is
/// edited, so a dangling active id changes nothing.
#[must_use]
pub fn toggle_health_badge(pets: &[Pet], active_id: &str, badge: HealthBadge) -> Vec<Pet> {
    edit_active(pets, active_id, |pet| {
        let flag = match badge {
            HealthBadge::Vaccinated => &mut pet.vaccinated,
            HealthBadge::Neutered => &mut pet.neutered,
            HealthBadge::Microchipped => &mut pet.microchipped,
        };
        *flag = !*flag;
    })
}

/// Add `trait_name` to the active pet's temperament, or remove it if present.
#[must_use]
pub fn toggle_temperament(pets: &[Pet], active_id: &str, trait_name: &str) -> Vec<Pet> {
    edit_active(pets, active_id, |pet| {
        if pet.temperament.iter().any(|t| t == trait_name) {
            pet.temperament.retain(|t| t != trait_name);
        } else {
            pet.temperament.push(trait_name.to_owned());
        }
    })
}

fn edit_active(pets: &[Pet], active_id: &str, edit: impl Fn(&mut Pet)) -> Vec<Pet> {
    pets.iter()
        .map(|pet| {
            let mut pet = pet.clone();
            if pet.id == active_id {
                edit(&mut pet);
            }
            pet
        })
        .collect()
}

#[cfg(test)]
#[path = "pets_test.rs"]
mod tests;
