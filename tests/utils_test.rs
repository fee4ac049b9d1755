use std::collections::HashSet;

use partmaster::types::{BrickSet, Part};
use partmaster::utils::*;

// Helper function to create a test part
fn create_test_part(id: &str, quantity: u32) -> Part {
    Part {
        id: id.to_string(),
        name: format!("Part {}", id),
        color: "Red".to_string(),
        description: String::new(),
        design_id: "3001".to_string(),
        element_id: "300121".to_string(),
        quantity,
        collected: 0,
        image_url: part_image_url("300121"),
    }
}

// Helper function to create a test set
fn create_test_set(id: &str, number: &str) -> BrickSet {
    BrickSet {
        id: id.to_string(),
        number: number.to_string(),
        name: "Test Set".to_string(),
        theme: "Creator".to_string(),
        total_parts: 0,
        image_url: set_image_url(number),
        parts: Vec::new(),
        last_modified: 0,
        external_urls: Vec::new(),
    }
}

#[test]
fn test_generate_id_is_unique() {
    let ids: HashSet<String> = (0..1000).map(|_| generate_id("part")).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_generate_id_has_prefix() {
    let id = generate_id("set");
    assert!(id.starts_with("set-"));
    assert!(id.len() > "set-".len());
}

#[test]
fn test_image_url_templates() {
    assert_eq!(
        part_image_url("4113233"),
        "https://www.lego.com/service/bricks/5/2/4113233"
    );
    assert_eq!(
        set_image_url("10221"),
        "https://images.brickset.com/sets/images/10221-1.jpg"
    );

    // Deterministic
    assert_eq!(part_image_url("1"), part_image_url("1"));
}

#[test]
fn test_resolve_set_id_by_id_and_position() {
    let sets = vec![create_test_set("set-a", "10221"), create_test_set("set-b", "75192")];

    assert_eq!(resolve_set_id(&sets, "set-b"), Some("set-b".to_string()));
    assert_eq!(resolve_set_id(&sets, "1"), Some("set-a".to_string()));
    assert_eq!(resolve_set_id(&sets, " 2 "), Some("set-b".to_string()));

    // Out of range, zero and unknown references
    assert_eq!(resolve_set_id(&sets, "3"), None);
    assert_eq!(resolve_set_id(&sets, "0"), None);
    assert_eq!(resolve_set_id(&sets, "nope"), None);
}

#[test]
fn test_resolve_set_id_by_catalog_number() {
    let sets = vec![
        create_test_set("set-new", "10221"),
        create_test_set("set-b", "75192"),
        create_test_set("set-old", "10221"),
    ];

    // duplicates resolve to the newest entry, which comes first
    assert_eq!(resolve_set_id(&sets, "10221"), Some("set-new".to_string()));
    assert_eq!(resolve_set_id(&sets, " 75192 "), Some("set-b".to_string()));
    // small numbers that match no catalog number still count as positions
    assert_eq!(resolve_set_id(&sets, "3"), Some("set-old".to_string()));
}

#[test]
fn test_resolve_part_id_prefers_exact_id() {
    // a part whose id looks like a position must still resolve by id first
    let parts = vec![create_test_part("2", 1), create_test_part("p-1", 4)];

    assert_eq!(resolve_part_id(&parts, "2"), Some("2".to_string()));
    assert_eq!(resolve_part_id(&parts, "1"), Some("2".to_string()));
    assert_eq!(resolve_part_id(&parts, "p-1"), Some("p-1".to_string()));
    assert_eq!(resolve_part_id(&[], "1"), None);
}

#[test]
fn test_progress_bar_text() {
    assert_eq!(progress_bar_text(0, 10, 10), "----------");
    assert_eq!(progress_bar_text(5, 10, 10), "#####-----");
    assert_eq!(progress_bar_text(10, 10, 10), "##########");
    assert_eq!(progress_bar_text(3, 0, 4), "----");
}

#[test]
fn test_set_progress() {
    let mut set = create_test_set("set-a", "10221");
    assert_eq!(set.progress().percent(), 0);
    assert!(!set.progress().is_complete());

    let mut first = create_test_part("a", 4);
    first.collected = 4;
    let mut second = create_test_part("b", 4);
    second.collected = 1;
    set.parts = vec![first, second];

    let progress = set.progress();
    assert_eq!(progress.collected, 5);
    assert_eq!(progress.required, 8);
    assert_eq!(progress.percent(), 62);
    assert!(!progress.is_complete());
}
