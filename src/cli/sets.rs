use chrono::{DateTime, Local};
use colored::Colorize;
use tabled::Table;

use crate::{
    cli::{StdinConfirm, open_session},
    info,
    management::{Action, AutoConfirm},
    success,
    types::{AppState, BrickSet, PartTableRow, SetTableRow},
    utils, warning,
};

pub async fn list_sets() {
    let session = open_session().await;
    let state = session.state();

    if state.sets.is_empty() {
        info!("No sets in your collection yet. Run partmaster search <set number>.");
        return;
    }

    let active = state.active_set_id.as_deref();
    let rows: Vec<SetTableRow> = state
        .sets
        .iter()
        .enumerate()
        .map(|(idx, set)| {
            let progress = set.progress();
            let marker = if Some(set.id.as_str()) == active { "*" } else { "" };
            SetTableRow {
                position: idx + 1,
                number: format!("{}{}", set.number, marker),
                name: set.name.clone(),
                theme: set.theme.clone(),
                parts: set.total_parts,
                progress: format!(
                    "[{}] {:>3}%",
                    utils::progress_bar_text(progress.collected, progress.required, 10),
                    progress.percent()
                ),
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Shows a set's parts. Without a reference the active set is shown.
pub async fn show_set(reference: Option<String>) {
    let mut session = open_session().await;

    let set_id = match reference {
        Some(reference) => match utils::resolve_set_id(&session.state().sets, &reference) {
            Some(id) => {
                session.dispatch(Action::OpenSet(id.clone())).await;
                id
            }
            None => return warning!("No set matches '{}'.", reference),
        },
        None => match &session.state().active_set_id {
            Some(id) => id.clone(),
            None => return warning!("No set is open. Pass a set id, catalog number or list position."),
        },
    };

    if let Some(set) = session.state().find_set(&set_id) {
        print_set(set);
    }
}

pub async fn open_set(reference: String) {
    let mut session = open_session().await;
    let Some(set_id) = utils::resolve_set_id(&session.state().sets, &reference) else {
        return warning!("No set matches '{}'.", reference);
    };

    let state = session.dispatch(Action::OpenSet(set_id)).await;
    if let Some(set) = state.active_set() {
        success!("Opened set {} {}.", set.number, set.name);
    }
}

pub async fn close_set() {
    let mut session = open_session().await;
    if session.state().active_set_id.is_none() {
        return info!("No set is open.");
    }
    session.dispatch(Action::CloseActive).await;
    success!("Closed the active set.");
}

pub async fn dismiss_error() {
    let mut session = open_session().await;
    if session.state().error.is_none() {
        return info!("No error to dismiss.");
    }
    session.dispatch(Action::DismissError).await;
    success!("Error dismissed.");
}

pub async fn complete_set(reference: Option<String>) {
    let mut session = open_session().await;
    let Some(set_id) = target_set(session.state(), reference.as_deref()) else {
        return warning!("No matching set. Pass a set id, catalog number or list position, or open one first.");
    };

    let state = session.dispatch(Action::CompleteSet(set_id.clone())).await;
    if let Some(set) = state.find_set(&set_id) {
        success!("Set {} {} is complete.", set.number, set.name);
    }
}

pub async fn delete_set(reference: String, yes: bool) {
    let mut session = open_session().await;
    let Some(set_id) = utils::resolve_set_id(&session.state().sets, &reference) else {
        return warning!("No set matches '{}'.", reference);
    };

    let deleted = if yes {
        session.delete_set(&set_id, &AutoConfirm(true)).await
    } else {
        session.delete_set(&set_id, &StdinConfirm).await
    };

    if deleted {
        success!("Set deleted.");
    } else {
        info!("Nothing deleted.");
    }
}

/// Resolves an explicit reference, or falls back to the active set.
pub(crate) fn target_set(state: &AppState, reference: Option<&str>) -> Option<String> {
    match reference {
        Some(reference) => utils::resolve_set_id(&state.sets, reference),
        None => state.active_set().map(|s| s.id.clone()),
    }
}

pub(crate) fn print_set(set: &BrickSet) {
    let progress = set.progress();
    let modified = DateTime::from_timestamp_millis(set.last_modified)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    println!(
        "{} {} ({})",
        set.number.bold(),
        set.name.bold(),
        set.theme
    );
    println!(
        "[{}] {}% · {}/{} parts · {} part types · last change {}",
        utils::progress_bar_text(progress.collected, progress.required, 20),
        progress.percent(),
        progress.collected,
        progress.required,
        set.parts.len(),
        modified
    );

    let rows: Vec<PartTableRow> = set
        .parts
        .iter()
        .enumerate()
        .map(|(idx, part)| PartTableRow {
            position: idx + 1,
            name: part.name.clone(),
            color: part.color.clone(),
            element: part.element_id.clone(),
            collected: format!("{}/{}", part.collected, part.quantity),
            done: if part.is_complete() {
                "✓".green().to_string()
            } else {
                String::new()
            },
        })
        .collect();
    println!("{}", Table::new(rows));

    for url in &set.external_urls {
        println!("  {} {}", url.title, url.uri.dimmed());
    }
}
