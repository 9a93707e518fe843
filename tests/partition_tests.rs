mod common;

use common::{pack_140, pack_20};
use packforge::core_types::Assignment;
use packforge::error::PackForgeError;
use packforge::optimizer::mutation::apply_swap;
use packforge::partition::Partition;
use rstest::rstest;

#[test]
fn test_assignment_codec() {
    let pack = pack_140();
    let assignment = pack.seed.to_assignment(&pack.graph);
    assert_eq!(assignment.len(), 140);
    assert_eq!(assignment["140"], "1");
    assert_eq!(assignment["6"], "10");

    let decoded = Partition::from_assignment(&assignment, &pack.graph, 10).unwrap();
    assert_eq!(decoded, pack.seed);
}

#[test]
fn test_group_lists() {
    let pack = pack_20();
    let lists = pack.seed.to_group_lists(&pack.graph);
    assert_eq!(lists[0], (1..=10).collect::<Vec<u32>>());
    assert_eq!(lists[1], (11..=20).collect::<Vec<u32>>());

    let rebuilt = Partition::from_group_lists(&lists, &pack.graph).unwrap();
    assert_eq!(rebuilt, pack.seed);
}

#[test]
fn test_decode_matches_members() {
    let pack = pack_140();
    let decoded = pack.seed.decode();
    assert_eq!(decoded.len(), 10);
    for (i, members) in decoded.iter().enumerate() {
        assert_eq!(*members, pack.seed.members((i + 1) as u8));
        assert_eq!(members.len(), 14);
    }
}

#[test]
fn test_swap_is_an_involution() {
    let pack = pack_140();
    let once = apply_swap(&pack.seed, 3, 77);
    assert_ne!(once, pack.seed);
    assert_eq!(once.group_of(3), pack.seed.group_of(77));
    assert_eq!(once.group_of(77), pack.seed.group_of(3));

    let twice = apply_swap(&once, 3, 77);
    assert_eq!(twice, pack.seed);
}

#[rstest]
#[case::unknown_cell(&[("999", "1")])]
#[case::bad_group_text(&[("1", "one")])]
#[case::group_out_of_range(&[("1", "3")])]
fn test_bad_assignments(#[case] overrides: &[(&str, &str)]) {
    let pack = pack_20();
    let mut assignment = pack.seed.to_assignment(&pack.graph);
    for (cell, group) in overrides {
        assignment.insert(cell.to_string(), group.to_string());
    }
    assert!(matches!(
        Partition::from_assignment(&assignment, &pack.graph, 2),
        Err(PackForgeError::MalformedInput(_))
    ));
}

#[test]
fn test_missing_cell_is_rejected() {
    let pack = pack_20();
    let mut assignment: Assignment = pack.seed.to_assignment(&pack.graph);
    assignment.remove("7");
    let err = Partition::from_assignment(&assignment, &pack.graph, 2).unwrap_err();
    assert!(err.to_string().contains("cell 7"));
}

#[test]
fn test_duplicate_in_group_lists() {
    let pack = pack_20();
    let mut lists = pack.seed.to_group_lists(&pack.graph);
    lists[1][0] = 1;
    assert!(Partition::from_group_lists(&lists, &pack.graph).is_err());
}
