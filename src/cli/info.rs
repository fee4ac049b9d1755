use colored::Colorize;

use crate::{
    cli::open_session,
    management::StorageSlot,
    types::{AppState, Progress},
};

pub async fn info() {
    let session = open_session().await;
    let summary = CollectionSummary::from_state(session.state());

    println!("{}", "Collection".bold());
    println!("  Sets:            {}", summary.sets);
    println!("  Completed sets:  {}", summary.completed_sets);
    println!("  Part types:      {}", summary.part_types);
    println!(
        "  Parts collected: {}/{} ({}%)",
        summary.progress.collected,
        summary.progress.required,
        summary.progress.percent()
    );
    if let Some(set) = session.state().active_set() {
        println!("  Open set:        {} {}", set.number, set.name);
    }
    println!(
        "  State file:      {}",
        session.manager().slot().location().dimmed()
    );
}

struct CollectionSummary {
    sets: usize,
    completed_sets: usize,
    part_types: usize,
    progress: Progress,
}

impl CollectionSummary {
    fn from_state(state: &AppState) -> Self {
        let mut progress = Progress {
            collected: 0,
            required: 0,
        };
        let mut completed_sets = 0;
        let mut part_types = 0;

        for set in &state.sets {
            let p = set.progress();
            progress.collected += p.collected;
            progress.required += p.required;
            part_types += set.parts.len();
            if p.is_complete() {
                completed_sets += 1;
            }
        }

        Self {
            sets: state.sets.len(),
            completed_sets,
            part_types,
            progress,
        }
    }
}
