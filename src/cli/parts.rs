use crate::{
    cli::{open_session, sets::target_set},
    management::{Action, Direction},
    success, utils, warning,
};

pub async fn collect_part(part: String, set: Option<String>) {
    update_part(part, set, Direction::Increment, false).await
}

pub async fn uncollect_part(part: String, set: Option<String>) {
    update_part(part, set, Direction::Decrement, false).await
}

pub async fn fill_part(part: String, set: Option<String>) {
    update_part(part, set, Direction::Increment, true).await
}

async fn update_part(reference: String, set: Option<String>, direction: Direction, set_full: bool) {
    let mut session = open_session().await;

    let Some(set_id) = target_set(session.state(), set.as_deref()) else {
        return warning!("No matching set. Pass --set with a set id, catalog number or list position, or open one first.");
    };
    let part_id = match session.state().find_set(&set_id) {
        Some(s) => utils::resolve_part_id(&s.parts, &reference),
        None => None,
    };
    let Some(part_id) = part_id else {
        return warning!("No part matches '{}'.", reference);
    };

    let state = session
        .dispatch(Action::UpdatePart {
            set_id: set_id.clone(),
            part_id: part_id.clone(),
            direction,
            set_full,
        })
        .await;

    if let Some(part) = state.find_set(&set_id).and_then(|s| s.find_part(&part_id)) {
        success!(
            "{} ({}): {}/{}",
            part.name,
            part.color,
            part.collected,
            part.quantity
        );
    }
}
