//! Collection store transitions.
//!
//! Every function takes the previous [`AppState`] and returns the next one.
//! None of them touch storage, persistence is attached by the session that
//! owns the state. Unknown set or part ids leave the state as it was.

use crate::types::{AppState, BrickSet, Part};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BeginSearch,
    SearchFailed(String),
    AddSet(BrickSet),
    DeleteSet(String),
    OpenSet(String),
    CloseActive,
    DismissError,
    UpdatePart {
        set_id: String,
        part_id: String,
        direction: Direction,
        set_full: bool,
    },
    CompleteSet(String),
}

pub fn reduce(state: &AppState, action: Action, now: i64) -> AppState {
    match action {
        Action::BeginSearch => begin_search(state),
        Action::SearchFailed(message) => search_failed(state, message),
        Action::AddSet(set) => add_set(state, set),
        Action::DeleteSet(set_id) => delete_set(state, &set_id),
        Action::OpenSet(set_id) => open_set(state, &set_id),
        Action::CloseActive => close_active(state),
        Action::DismissError => dismiss_error(state),
        Action::UpdatePart {
            set_id,
            part_id,
            direction,
            set_full,
        } => update_part(state, &set_id, &part_id, direction, set_full, now),
        Action::CompleteSet(set_id) => complete_set(state, &set_id, now),
    }
}

pub fn begin_search(state: &AppState) -> AppState {
    AppState {
        is_searching: true,
        error: None,
        ..state.clone()
    }
}

pub fn search_failed(state: &AppState, message: String) -> AppState {
    AppState {
        is_searching: false,
        error: Some(message),
        ..state.clone()
    }
}

/// Prepends the set and makes it active. Sets with the same number are kept
/// as independent entries.
pub fn add_set(state: &AppState, set: BrickSet) -> AppState {
    let active_set_id = Some(set.id.clone());
    let mut sets = Vec::with_capacity(state.sets.len() + 1);
    sets.push(set);
    sets.extend(state.sets.iter().cloned());

    AppState {
        sets,
        active_set_id,
        is_searching: false,
        error: None,
    }
}

pub fn delete_set(state: &AppState, set_id: &str) -> AppState {
    let sets = state
        .sets
        .iter()
        .filter(|s| s.id != set_id)
        .cloned()
        .collect();

    let active_set_id = match &state.active_set_id {
        Some(active) if active == set_id => None,
        other => other.clone(),
    };

    AppState {
        sets,
        active_set_id,
        ..state.clone()
    }
}

pub fn open_set(state: &AppState, set_id: &str) -> AppState {
    if state.find_set(set_id).is_none() {
        return state.clone();
    }
    AppState {
        active_set_id: Some(set_id.to_string()),
        ..state.clone()
    }
}

pub fn close_active(state: &AppState) -> AppState {
    AppState {
        active_set_id: None,
        ..state.clone()
    }
}

pub fn dismiss_error(state: &AppState) -> AppState {
    AppState {
        error: None,
        ..state.clone()
    }
}

/// Adjusts one part's collected count, clamped to `0..=quantity`.
///
/// `set_full` wins over `direction`. The set's `last_modified` moves to `now`
/// whenever the part is found, even if the clamped count did not change.
pub fn update_part(
    state: &AppState,
    set_id: &str,
    part_id: &str,
    direction: Direction,
    set_full: bool,
    now: i64,
) -> AppState {
    map_set(state, set_id, |set| {
        set.find_part(part_id)?;
        let parts = set
            .parts
            .iter()
            .map(|part| {
                if part.id != part_id {
                    return part.clone();
                }
                Part {
                    collected: next_count(part, direction, set_full),
                    ..part.clone()
                }
            })
            .collect();

        Some(BrickSet {
            parts,
            last_modified: now,
            ..set.clone()
        })
    })
}

/// Marks every part of the set as fully collected.
pub fn complete_set(state: &AppState, set_id: &str, now: i64) -> AppState {
    map_set(state, set_id, |set| {
        let parts = set
            .parts
            .iter()
            .map(|part| Part {
                collected: part.quantity,
                ..part.clone()
            })
            .collect();

        Some(BrickSet {
            parts,
            last_modified: now,
            ..set.clone()
        })
    })
}

fn next_count(part: &Part, direction: Direction, set_full: bool) -> u32 {
    if set_full {
        return part.quantity;
    }
    match direction {
        Direction::Increment => part.collected.saturating_add(1).min(part.quantity),
        Direction::Decrement => part.collected.saturating_sub(1).min(part.quantity),
    }
}

// Rebuilds the set list with `f` applied to the matching set. `f` returning
// `None` keeps that set untouched.
fn map_set<F>(state: &AppState, set_id: &str, f: F) -> AppState
where
    F: Fn(&BrickSet) -> Option<BrickSet>,
{
    if state.find_set(set_id).is_none() {
        return state.clone();
    }

    let sets = state
        .sets
        .iter()
        .map(|set| {
            if set.id != set_id {
                return set.clone();
            }
            f(set).unwrap_or_else(|| set.clone())
        })
        .collect();

    AppState {
        sets,
        ..state.clone()
    }
}
