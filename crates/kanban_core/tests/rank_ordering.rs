use kanban_core::rank::{between, middle, next, prev, Rank};
use std::collections::HashSet;

#[test]
fn first_rank_sits_in_the_middle_of_the_space() {
    assert_eq!(middle().as_str(), "i");
}

#[test]
fn repeated_next_is_strictly_increasing_without_repeats() {
    let mut seen = HashSet::new();
    let mut current = middle();
    seen.insert(current.clone());

    for _ in 0..10_000 {
        let bumped = next(&current);
        assert!(bumped > current, "next({current}) produced {bumped}");
        assert!(seen.insert(bumped.clone()), "rank {bumped} repeated");
        current = bumped;
    }
}

#[test]
fn repeated_prev_is_strictly_decreasing_without_repeats() {
    let mut seen = HashSet::new();
    let mut current = middle();
    seen.insert(current.clone());

    for _ in 0..10_000 {
        let dropped = prev(&current);
        assert!(dropped < current, "prev({current}) produced {dropped}");
        assert!(seen.insert(dropped.clone()), "rank {dropped} repeated");
        current = dropped;
    }
}

#[test]
fn between_always_lands_strictly_inside_its_endpoints() {
    let pairs = [
        ("1", "2"),
        ("1", "z"),
        ("a", "b"),
        ("i", "i1"),
        ("0i", "1"),
        ("abc", "abd"),
        ("1", "11"),
    ];

    for (low, high) in pairs {
        let low = Rank::parse(low).unwrap();
        let high = Rank::parse(high).unwrap();
        let mid = between(&low, &high).unwrap();
        assert!(
            low < mid && mid < high,
            "between({low}, {high}) produced {mid}"
        );
    }
}

#[test]
fn between_rejects_equal_and_reversed_endpoints() {
    let low = Rank::parse("4").unwrap();
    let high = Rank::parse("c").unwrap();

    assert!(between(&low, &low).is_err());
    assert!(between(&high, &low).is_err());
}

#[test]
fn bisection_toward_the_low_endpoint_never_exhausts() {
    let low = Rank::parse("1").unwrap();
    let mut high = Rank::parse("2").unwrap();
    let mut seen = HashSet::new();

    for _ in 0..1_000 {
        let mid = between(&low, &high).unwrap();
        assert!(low < mid && mid < high);
        assert!(seen.insert(mid.clone()), "rank {mid} repeated");
        high = mid;
    }
}

#[test]
fn bisection_toward_the_high_endpoint_never_exhausts() {
    let mut low = Rank::parse("1").unwrap();
    let high = Rank::parse("2").unwrap();
    let mut seen = HashSet::new();

    for _ in 0..1_000 {
        let mid = between(&low, &high).unwrap();
        assert!(low < mid && mid < high);
        assert!(seen.insert(mid.clone()), "rank {mid} repeated");
        low = mid;
    }
}

#[test]
fn generator_outputs_parse_back_as_valid_ranks() {
    let mut current = middle();
    for _ in 0..100 {
        current = next(&current);
        assert!(Rank::parse(current.as_str()).is_ok());
        let below = prev(&current);
        assert!(Rank::parse(below.as_str()).is_ok());
    }
}
