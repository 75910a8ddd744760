use super::*;

use std::rc::Rc;

use crate::area::MemoryOrigin;
use crate::config::StorageConfig;
use crate::context::Context;
use crate::fixtures::default_pets;
use crate::keys;

fn form(name: &str, breed: &str, age: &str) -> NewPet {
    NewPet { name: name.into(), species: Species::Cat, breed: breed.into(), age: age.into() }
}

#[test]
fn compose_applies_defaults() {
    let pet = compose_pet(&form("Pip", "", "")).unwrap();
    assert_eq!(pet.breed, "Mixed");
    assert_eq!(pet.age, 1);
    assert_eq!(pet.species, Species::Cat);
    assert!(!pet.vaccinated && !pet.neutered && !pet.microchipped);
    assert!(pet.temperament.is_empty());
    assert!(pet.id.starts_with("pet-"));
}

#[test]
fn compose_rejects_blank_name() {
    assert!(compose_pet(&form("  ", "Tabby", "2")).is_none());
}

#[test]
fn age_parses_leading_digits() {
    assert_eq!(parse_age("4"), 4);
    assert_eq!(parse_age(" 7 years"), 7);
    assert_eq!(parse_age("two"), 1);
    assert_eq!(parse_age("0"), 1);
    assert_eq!(parse_age("-3"), 1);
}

#[test]
fn active_pet_falls_back_to_first() {
    let pets = default_pets();
    assert_eq!(active_pet(&pets, "pet-2").unwrap().name, "Max");
    assert_eq!(active_pet(&pets, "gone").unwrap().name, "Luna");
    assert!(active_pet(&[], "pet-1").is_none());
}

#[test]
fn health_badge_toggles_on_active_pet_only() {
    let pets = default_pets();
    let next = toggle_health_badge(&pets, "pet-2", HealthBadge::Microchipped);
    assert!(next[1].microchipped);
    assert_eq!(next[0], pets[0]);

    let untouched = toggle_health_badge(&pets, "gone", HealthBadge::Vaccinated);
    assert_eq!(untouched, pets);
}

#[test]
fn temperament_toggles() {
    let pets = default_pets();
    let removed = toggle_temperament(&pets, "pet-1", "Friendly");
    assert!(!removed[0].temperament.iter().any(|t| t == "Friendly"));
    let added = toggle_temperament(&removed, "pet-1", "Friendly");
    assert_eq!(added[0].temperament.last().map(String::as_str), Some("Friendly"));
}

#[test]
fn added_pet_becomes_active() {
    let origin = MemoryOrigin::unbounded();
    let ctx = Context::new(Rc::new(origin.open_context()), &StorageConfig::default());
    let pets = ctx.bind_key(&keys::PETS);
    let active_id = ctx.bind_key(&keys::ACTIVE_PET_ID);

    let pet = compose_pet(&form("Pip", "Tabby", "2")).unwrap();
    let id = pet.id.clone();
    pets.update(move |current| add_pet(current, pet));
    active_id.set(id.clone());

    let all = pets.get();
    assert_eq!(all.len(), 3);
    assert_eq!(active_pet(&all, &active_id.get()).unwrap().id, id);
    assert_eq!(ctx.storage().get(keys::ACTIVE_PET_ID.name(), String::new()), id);
}
