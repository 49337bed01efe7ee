use super::*;

#[test]
fn can_return_zero_for_same_point() {
    assert!(great_circle_distance(50.5, 4.5, 50.5, 4.5) < 1E-9);
}

#[test]
fn can_compute_one_degree_on_equator() {
    let distance = great_circle_distance(0., 0., 0., 1.);

    assert!((distance - 111.19).abs() < 0.5, "unexpected distance: {distance}");
}

#[test]
fn can_be_symmetric() {
    let forward = great_circle_distance(-12., -77.1, 50.5, 4.5);
    let backward = great_circle_distance(50.5, 4.5, -12., -77.1);

    assert!((forward - backward).abs() < 1E-6);
    // transatlantic scale sanity check
    assert!(forward > 9_000. && forward < 12_000., "unexpected distance: {forward}");
}
