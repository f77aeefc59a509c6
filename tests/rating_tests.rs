use squad_rating::data::{count_ratings, get_unique_ratings};
use squad_rating::rating::{
    aggregate_rating, calculate_minimum_rating_needed, get_rating_statistics, validate_squad,
    Rating, SQUAD_CAPACITY,
};

#[test]
fn documented_rating_values() {
    let cases: [(&[Rating], u32); 10] = [
        (&[], 0),
        (&[45], 7),
        (&[60], 10),
        (&[87], 15),
        (&[99], 17),
        (&[87, 87], 28),
        (&[90, 90], 29),
        (&[85, 86, 87, 96], 52),
        (&[95, 92, 94, 93, 93, 93, 92], 80),
        (&[75; 11], 75),
    ];
    for (squad, expected) in cases {
        assert_eq!(aggregate_rating(squad), expected, "squad {squad:?}");
    }
    assert_eq!(aggregate_rating(&[85; 11]), 85);
}

#[test]
fn padding_is_idempotent_for_every_prefix() {
    let squad: [Rating; 11] = [91, 88, 86, 86, 85, 84, 84, 83, 82, 80, 79];
    for len in 0..=SQUAD_CAPACITY {
        let partial = &squad[..len];
        let mut padded = partial.to_vec();
        padded.resize(SQUAD_CAPACITY, 0);
        assert_eq!(aggregate_rating(partial), aggregate_rating(&padded), "len {len}");
    }
}

#[test]
fn adding_a_member_never_lowers_the_rating() {
    let mut squad: Vec<Rating> = Vec::new();
    let mut previous = 0;
    for rating in [84, 86, 83, 90, 85, 84, 82, 88, 84, 85, 87] {
        squad.push(rating);
        let current = aggregate_rating(&squad);
        assert!(current >= previous, "{squad:?} dropped to {current}");
        previous = current;
    }
}

#[test]
fn wrong_size_squad_fails_validation() {
    let check = validate_squad(&[85, 87, 83], 84, SQUAD_CAPACITY);
    assert!(!check.valid);
    assert!(check.message.contains("must have exactly"));
    assert_eq!(check.actual_rating, None);
}

#[test]
fn validation_accepts_custom_squad_size() {
    let check = validate_squad(&[85, 87, 83], 20, 3);
    assert!(check.valid);
    assert_eq!(check.actual_rating, Some(aggregate_rating(&[85, 87, 83])));
}

#[test]
fn statistics_summary() {
    let stats = get_rating_statistics(&[85, 84, 85, 86, 84, 87]);
    assert_eq!(stats.count, 6);
    assert_eq!(stats.min, 84);
    assert_eq!(stats.max, 87);
    assert_eq!(stats.median, 85.0);
    assert!((stats.average - 85.166_666).abs() < 1e-4);
}

#[test]
fn counts_round_trip_through_uniques() {
    let ratings = [85, 84, 85, 86, 84, 87];
    let counts = count_ratings(&ratings);
    let uniques = get_unique_ratings(&ratings);
    assert_eq!(uniques, vec![84, 85, 86, 87]);
    assert_eq!(counts.keys().copied().collect::<Vec<_>>(), uniques);
    assert_eq!(counts.values().sum::<usize>(), ratings.len());
    assert_eq!(counts[&84], 2);
    assert_eq!(counts[&85], 2);
}

#[test]
fn minimum_rating_assumes_eleven_members() {
    // 11 * 85 = 935; 935 - 4 * 90 = 575 over 7 slots
    assert_eq!(calculate_minimum_rating_needed(85, &[90; 4], 7), Some(83));
    assert_eq!(calculate_minimum_rating_needed(60, &[99; 10], 1), Some(-330));
}
