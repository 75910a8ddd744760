use super::*;

#[test]
fn every_path_round_trips() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), route);
    }
}

#[test]
fn unknown_paths_are_not_found() {
    assert_eq!(Route::from_path("/nope"), Route::NotFound);
    assert_eq!(Route::from_path("/dashboard/"), Route::NotFound);
    assert_eq!(Route::from_path("*"), Route::NotFound);
}

#[test]
fn auth_pages_are_public() {
    assert!(Route::Login.is_public());
    assert!(!Route::Dashboard.is_public());
    assert_eq!(Route::TownSquare.to_string(), "/town-square");
}
