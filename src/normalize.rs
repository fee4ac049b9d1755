//! Turns a fetched set record into the canonical [`BrickSet`] shape.
//!
//! Normalization is a pure transformation: it assigns fresh identifiers,
//! resets progress and derives image references. No I/O happens here.

use crate::{
    types::{BrickSet, ExternalUrl, FetchedSet, GroundingMetadata, Part, RawPart, RawSetData},
    utils,
};

/// Builds a [`BrickSet`] from a fetched record and the set number that was queried.
///
/// Every part gets a new id and starts with `collected = 0`, whatever the
/// source claims. When the source omits `totalParts` (or sends zero) the total
/// is the sum of all part quantities.
pub fn normalize_set(fetched: FetchedSet, set_number: &str, now: i64) -> BrickSet {
    let FetchedSet { data, grounding } = fetched;
    let RawSetData {
        name,
        theme,
        total_parts,
        parts,
    } = data;

    let parts: Vec<Part> = parts.into_iter().map(normalize_part).collect();

    let total_parts = match total_parts {
        Some(total) if total > 0 => total,
        _ => parts
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.quantity)),
    };

    BrickSet {
        id: utils::generate_id("set"),
        number: set_number.to_string(),
        name,
        theme,
        total_parts,
        image_url: utils::set_image_url(set_number),
        parts,
        last_modified: now,
        external_urls: external_urls(grounding.as_ref()),
    }
}

fn normalize_part(raw: RawPart) -> Part {
    Part {
        id: utils::generate_id("part"),
        image_url: utils::part_image_url(&raw.element_id),
        name: raw.name,
        color: raw.color,
        description: raw.description,
        design_id: raw.design_id,
        element_id: raw.element_id,
        quantity: raw.quantity,
        collected: 0,
    }
}

/// Keeps only grounding chunks that carry a web reference.
pub fn external_urls(grounding: Option<&GroundingMetadata>) -> Vec<ExternalUrl> {
    grounding
        .map(|g| {
            g.grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| ExternalUrl {
                    title: web.title.clone(),
                    uri: web.uri.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}
