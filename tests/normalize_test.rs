use std::collections::HashSet;

use partmaster::normalize::{external_urls, normalize_set};
use partmaster::types::{
    FetchedSet, GroundingChunk, GroundingMetadata, RawPart, RawSetData, WebReference,
};

fn raw_part(name: &str, quantity: u32, element_id: &str) -> RawPart {
    RawPart {
        name: name.to_string(),
        color: "Bright Red".to_string(),
        quantity,
        description: format!("{} description", name),
        design_id: "3001".to_string(),
        element_id: element_id.to_string(),
        collected: None,
    }
}

fn fetched(total_parts: Option<u32>, parts: Vec<RawPart>) -> FetchedSet {
    FetchedSet {
        data: RawSetData {
            name: "Volkswagen T1 Camper Van".to_string(),
            theme: "Creator Expert".to_string(),
            total_parts,
            parts,
        },
        grounding: None,
    }
}

#[test]
fn test_total_parts_computed_when_missing() {
    let parts = vec![raw_part("a", 2, "1"), raw_part("b", 5, "2"), raw_part("c", 1, "3")];
    let set = normalize_set(fetched(None, parts), "10220", 42);

    assert_eq!(set.total_parts, 8);
}

#[test]
fn test_huge_quantities_saturate_total_instead_of_overflowing() {
    let json = r#"{
        "name": "Overflowing",
        "theme": "Test",
        "parts": [
            { "name": "a", "quantity": 3000000000 },
            { "name": "b", "quantity": 3000000000 }
        ]
    }"#;
    let data: RawSetData = serde_json::from_str(json).unwrap();

    let set = normalize_set(
        FetchedSet {
            data,
            grounding: None,
        },
        "10220",
        42,
    );

    assert_eq!(set.parts[0].quantity, 3_000_000_000);
    assert_eq!(set.total_parts, u32::MAX);
}

#[test]
fn test_zero_total_parts_counts_as_missing() {
    let parts = vec![raw_part("a", 3, "1"), raw_part("b", 4, "2")];
    let set = normalize_set(fetched(Some(0), parts), "10220", 42);

    assert_eq!(set.total_parts, 7);
}

#[test]
fn test_total_parts_kept_when_provided() {
    let parts = vec![raw_part("a", 3, "1")];
    let set = normalize_set(fetched(Some(1334), parts), "10220", 42);

    assert_eq!(set.total_parts, 1334);
}

#[test]
fn test_parts_start_uncollected_with_fresh_ids() {
    let mut claimed = raw_part("a", 3, "4113233");
    claimed.collected = Some(3);
    let parts = vec![claimed, raw_part("b", 2, "300121"), raw_part("c", 2, "")];

    let set = normalize_set(fetched(None, parts), "10220", 42);

    assert!(set.parts.iter().all(|p| p.collected == 0));

    let ids: HashSet<&str> = set.parts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(set.id.as_str()));
}

#[test]
fn test_part_order_and_fields_preserved() {
    let parts = vec![raw_part("first", 1, "11"), raw_part("second", 2, "22")];
    let set = normalize_set(fetched(None, parts), "10220", 42);

    assert_eq!(set.parts[0].name, "first");
    assert_eq!(set.parts[1].name, "second");
    assert_eq!(set.parts[1].quantity, 2);
    assert_eq!(set.parts[1].design_id, "3001");
    assert_eq!(
        set.parts[0].image_url,
        "https://www.lego.com/service/bricks/5/2/11"
    );
}

#[test]
fn test_set_metadata() {
    let set = normalize_set(fetched(None, vec![]), "10220", 1_700_000_000_000);

    assert_eq!(set.number, "10220");
    assert_eq!(set.name, "Volkswagen T1 Camper Van");
    assert_eq!(set.theme, "Creator Expert");
    assert_eq!(set.last_modified, 1_700_000_000_000);
    assert_eq!(
        set.image_url,
        "https://images.brickset.com/sets/images/10220-1.jpg"
    );
    assert!(set.id.starts_with("set-"));
    assert!(set.external_urls.is_empty());
    assert_eq!(set.total_parts, 0);
}

#[test]
fn test_external_urls_keep_only_web_chunks() {
    let grounding = GroundingMetadata {
        grounding_chunks: vec![
            GroundingChunk {
                web: Some(WebReference {
                    title: "bricklink.com".to_string(),
                    uri: "https://www.bricklink.com/v2/catalog".to_string(),
                }),
            },
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebReference {
                    title: "brickset.com".to_string(),
                    uri: "https://brickset.com/sets/10220-1".to_string(),
                }),
            },
        ],
    };

    let urls = external_urls(Some(&grounding));
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0].title, "bricklink.com");
    assert_eq!(urls[1].uri, "https://brickset.com/sets/10220-1");

    assert!(external_urls(None).is_empty());
}

#[test]
fn test_raw_payload_tolerates_float_counts_and_missing_ids() {
    let json = r#"{
        "name": "Winter Village Station",
        "theme": "Creator Expert",
        "parts": [
            { "name": "Brick 2 x 4", "color": "Red", "quantity": 4.0, "description": "" },
            { "name": "Plate 1 x 1", "quantity": -2 }
        ]
    }"#;

    let data: RawSetData = serde_json::from_str(json).unwrap();
    assert_eq!(data.total_parts, None);
    assert_eq!(data.parts[0].quantity, 4);
    assert_eq!(data.parts[1].quantity, 0);
    assert_eq!(data.parts[1].element_id, "");
}

#[test]
fn test_raw_payload_requires_parts() {
    let json = r#"{ "name": "x", "theme": "y" }"#;
    assert!(serde_json::from_str::<RawSetData>(json).is_err());
}
