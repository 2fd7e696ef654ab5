mod common;

use ordered_tree::{OrderedTree, TreeConfig, TreeError, is_sorted_strictly};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rstest::rstest;

fn tree_of(keys: &[i32]) -> OrderedTree<i32> {
    keys.iter().copied().collect()
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

#[rstest]
#[case(&[50, 30, 70, 20, 40])]
#[case(&[1, 2, 3, 4, 5, 6])]
#[case(&[6, 5, 4, 3, 2, 1])]
#[case(&[8])]
fn every_inserted_record_is_found(#[case] keys: &[i32]) {
    common::init_test_setup();
    let mut tree = OrderedTree::new();
    for key in keys {
        assert!(tree.insert(*key));
    }
    assert!(!tree.is_empty());
    for key in keys {
        assert_eq!(tree.retrieve(key), Some(key));
        assert!(!tree.insert(*key));
    }
    assert_eq!(tree.len(), keys.len());
}

#[rstest]
#[case(40, Some(30))]
#[case(20, Some(30))]
#[case(30, Some(50))]
#[case(70, Some(50))]
#[case(50, None)]
#[case(99, None)]
fn parent_scenario(#[case] key: i32, #[case] parent: Option<i32>) {
    let tree = tree_of(&[50, 30, 70, 20, 40]);
    assert_eq!(tree.get_parent(&key), parent);
}

#[rstest]
#[case(30, Some(70))]
#[case(70, Some(30))]
#[case(20, Some(40))]
#[case(40, Some(20))]
#[case(50, None)]
#[case(99, None)]
fn sibling_scenario(#[case] key: i32, #[case] sibling: Option<i32>) {
    let tree = tree_of(&[50, 30, 70, 20, 40]);
    assert_eq!(tree.get_sibling(&key), sibling);
}

#[rstest]
fn scenario_flattens_sorted() {
    common::init_test_setup();
    let mut tree = tree_of(&[50, 30, 70, 20, 40]);
    assert_eq!(tree.to_string(), "20 30 40 50 70 \n");
    assert_eq!(tree.flatten().records, vec![20, 30, 40, 50, 70]);
    assert!(tree.is_empty());
}

#[rstest]
fn string_records_round_trip() {
    common::init_test_setup();
    let text = "iii not tttt eee r not and jj r eee pp r sssss eee not tttt ooo ff m m y z $$";
    let mut tree: OrderedTree<String> = words(text).into_iter().collect();
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.get_parent(&"not".to_string()), Some("iii".to_string()));

    let copy = tree.clone();
    let flat = tree.flatten();
    assert!(is_sorted_strictly(&flat.records));
    assert_eq!(flat.records.first().map(String::as_str), Some("$$"));

    let records = flat.records.clone();
    tree.rebuild_from_sorted(flat.records).unwrap();
    assert_ne!(tree, copy);
    assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), records);
    assert_eq!(tree.height(), 4);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(15)]
#[case(16)]
#[case(100)]
fn rebuild_then_flatten_is_identity(#[case] size: i32) {
    let sorted: Vec<i32> = (0..size).collect();
    let mut tree = OrderedTree::new();
    assert_eq!(tree.rebuild_from_sorted(sorted.clone()), Ok(size as usize));

    let mut twin = OrderedTree::new();
    twin.rebuild_from_sorted(sorted.clone()).unwrap();
    assert_eq!(tree, twin);

    let levels = (usize::BITS - (size as usize).leading_zeros()) as usize;
    assert_eq!(tree.height(), levels);
    assert_eq!(tree.flatten().records, sorted);
}

#[rstest]
fn deep_copy_is_independent() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let mut numbers: Vec<i32> = (0..60).collect();
    numbers.shuffle(&mut rng);
    let original: OrderedTree<i32> = numbers.into_iter().collect();

    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert!(copy.insert(1000));
    assert!(!original.contains(&1000));

    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(original.len(), 60);
    assert!(copy.insert(5));
    assert_eq!(copy.len(), 1);
}

#[rstest]
fn equality_tracks_shape_not_content() {
    let inserted = tree_of(&[5, 10, 15]);
    let mut rebuilt = OrderedTree::new();
    rebuilt.rebuild_from_sorted(vec![5, 10, 15]).unwrap();
    assert_ne!(inserted, rebuilt);
    assert_eq!(
        inserted.iter().collect::<Vec<_>>(),
        rebuilt.iter().collect::<Vec<_>>()
    );
}

#[rstest]
fn capacity_bounds_sequence_conversion() {
    common::init_test_setup();
    let config = TreeConfig::new(4).unwrap();
    let mut tree = OrderedTree::with_config(config);
    tree.extend([5, 3, 8, 1, 4, 9]);

    assert_eq!(
        tree.try_flatten(),
        Err(TreeError::CapacityExceeded {
            len: 6,
            capacity: 4
        })
    );
    let flat = tree.flatten();
    assert_eq!(flat.records, vec![1, 3, 4, 5]);
    assert_eq!(flat.dropped, 2);

    assert!(tree.rebuild_from_sorted(vec![1, 2, 3, 4, 5]).is_err());
    assert!(tree.is_empty());
}

#[rstest]
fn sideways_display_lists_every_record() {
    let tree = tree_of(&[50, 30, 70, 20, 40]);
    let rows: Vec<String> = tree
        .sideways()
        .to_string()
        .lines()
        .map(|row| row.trim().to_string())
        .collect();
    assert_eq!(rows, words("70 50 40 30 20"));
}
