// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Movie and auditorium handler tests.

use boleteria_persistence::Persistence;

use crate::{
    AuditoriumQuery, create_auditorium, create_movie, create_screening, delete_auditorium,
    delete_movie, get_auditorium, get_movie, list_auditoriums, list_movies, update_auditorium,
    update_movie,
};

use super::helpers::{
    NOW, bootstrap_test_admin, create_auditorium_request, create_movie_request,
    create_screening_request, seed_catalog, setup_persistence,
};

#[test]
fn test_movie_crud() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);

    let created = create_movie(&mut persistence, &create_movie_request("Alien", 117), &admin)
        .unwrap();
    assert_eq!(created.duration_minutes, 117);
    assert_eq!(get_movie(&mut persistence, created.id).unwrap(), created);

    let mut request = create_movie_request("Aliens", 137);
    request.genre = String::from("Action");
    let updated = update_movie(&mut persistence, created.id, &request, &admin).unwrap();
    assert_eq!(updated.title, "Aliens");
    assert_eq!(updated.genre, "Action");

    delete_movie(&mut persistence, created.id, &admin).unwrap();
    let err = get_movie(&mut persistence, created.id).unwrap_err();
    assert_eq!(err.kind(), "NOT_FOUND");
    assert_eq!(err.to_string(), "Movie not found");
}

#[test]
fn test_movies_are_listed_by_title() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);
    create_movie(&mut persistence, &create_movie_request("Zodiac", 157), &admin).unwrap();
    create_movie(&mut persistence, &create_movie_request("Amelie", 122), &admin).unwrap();

    let titles: Vec<String> = list_movies(&mut persistence)
        .unwrap()
        .movies
        .into_iter()
        .map(|movie| movie.title)
        .collect();

    assert_eq!(titles, vec![String::from("Amelie"), String::from("Zodiac")]);
}

#[test]
fn test_movie_validation_and_duplicates() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);

    let zero = create_movie(&mut persistence, &create_movie_request("Short", 0), &admin)
        .unwrap_err();
    assert_eq!(zero.kind(), "INVALID_ARGUMENT");
    assert_eq!(zero.reason(), Some("duration"));

    let too_long = create_movie(&mut persistence, &create_movie_request("Epic", 601), &admin)
        .unwrap_err();
    assert_eq!(too_long.kind(), "INVALID_ARGUMENT");

    create_movie(&mut persistence, &create_movie_request("Alien", 117), &admin).unwrap();
    let duplicate = create_movie(&mut persistence, &create_movie_request("Alien", 90), &admin)
        .unwrap_err();
    assert_eq!(duplicate.kind(), "CONFLICT_STATE");
    assert_eq!(duplicate.reason(), Some("duplicate"));
}

#[test]
fn test_movie_with_screenings_cannot_be_deleted() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);
    let catalog = seed_catalog(&mut persistence, &admin, 50);

    let err = delete_movie(&mut persistence, catalog.movie_id, &admin).unwrap_err();

    assert_eq!(err.kind(), "CONFLICT_STATE");
    assert_eq!(err.reason(), Some("in_use"));
}

#[test]
fn test_runtime_change_that_causes_overlap_is_rejected() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);
    let catalog = seed_catalog(&mut persistence, &admin, 50);
    let other = create_movie(&mut persistence, &create_movie_request("Movie N", 60), &admin)
        .unwrap();
    // Movie M runs 20:00-21:40; Movie N starts at 22:00.
    create_screening(
        &mut persistence,
        &create_screening_request(other.id, catalog.auditorium_id, "2030-01-01T22:00:00Z"),
        &admin,
        NOW,
    )
    .unwrap();

    let longer = update_movie(
        &mut persistence,
        catalog.movie_id,
        &create_movie_request("Movie M", 150),
        &admin,
    )
    .unwrap_err();
    assert_eq!(longer.reason(), Some("overlap"));

    let fits = update_movie(
        &mut persistence,
        catalog.movie_id,
        &create_movie_request("Movie M", 120),
        &admin,
    )
    .unwrap();
    assert_eq!(fits.duration_minutes, 120);
}

#[test]
fn test_auditorium_crud_and_defaults() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);

    let mut request = create_auditorium_request("Sala IMAX", 120);
    request.screen_type = String::from("imax");
    request.atmos = true;
    let created = create_auditorium(&mut persistence, &request, &admin).unwrap();
    assert_eq!(created.screen_type, "IMAX");
    assert!(created.enabled);
    assert_eq!(get_auditorium(&mut persistence, created.id).unwrap(), created);

    request.enabled = false;
    let disabled = update_auditorium(&mut persistence, created.id, &request, &admin).unwrap();
    assert!(!disabled.enabled);

    delete_auditorium(&mut persistence, created.id, &admin).unwrap();
    assert_eq!(
        get_auditorium(&mut persistence, created.id)
            .unwrap_err()
            .kind(),
        "NOT_FOUND"
    );
}

#[test]
fn test_auditorium_validation() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);

    let empty = create_auditorium(&mut persistence, &create_auditorium_request("Sala", 0), &admin)
        .unwrap_err();
    assert_eq!(empty.reason(), Some("seat_capacity"));

    let huge = create_auditorium(&mut persistence, &create_auditorium_request("Sala", 201), &admin)
        .unwrap_err();
    assert_eq!(huge.kind(), "INVALID_ARGUMENT");

    let mut request = create_auditorium_request("Sala", 10);
    request.screen_type = String::from("HOLOGRAM");
    let bad_type = create_auditorium(&mut persistence, &request, &admin).unwrap_err();
    assert_eq!(bad_type.reason(), Some("screen_type"));
}

fn names(query: AuditoriumQuery, persistence: &mut Persistence) -> Vec<String> {
    list_auditoriums(persistence, &query)
        .unwrap()
        .auditoriums
        .into_iter()
        .map(|auditorium| auditorium.name)
        .collect()
}

#[test]
fn test_auditorium_filters() {
    let mut persistence = setup_persistence();
    let admin = bootstrap_test_admin(&mut persistence);

    let mut small_3d = create_auditorium_request("Small 3D", 30);
    small_3d.screen_type = String::from("D3");
    create_auditorium(&mut persistence, &small_3d, &admin).unwrap();

    let mut big_3d = create_auditorium_request("Big 3D", 150);
    big_3d.screen_type = String::from("D3");
    big_3d.enabled = false;
    create_auditorium(&mut persistence, &big_3d, &admin).unwrap();

    create_auditorium(&mut persistence, &create_auditorium_request("Classic", 90), &admin)
        .unwrap();

    assert_eq!(names(AuditoriumQuery::default(), &mut persistence).len(), 3);
    assert_eq!(
        names(
            AuditoriumQuery {
                screen_type: Some(String::from("D3")),
                ..AuditoriumQuery::default()
            },
            &mut persistence
        ),
        vec![String::from("Small 3D"), String::from("Big 3D")]
    );
    assert_eq!(
        names(
            AuditoriumQuery {
                enabled: Some(true),
                min_seat_capacity: Some(50),
                ..AuditoriumQuery::default()
            },
            &mut persistence
        ),
        vec![String::from("Classic")]
    );

    let negative = list_auditoriums(
        &mut persistence,
        &AuditoriumQuery {
            min_seat_capacity: Some(-1),
            ..AuditoriumQuery::default()
        },
    )
    .unwrap_err();
    assert_eq!(negative.reason(), Some("min_seat_capacity"));
}
