//! # CLI Module
//!
//! User-facing commands of PartMaster. Each command restores the session from
//! the state file, applies one or more actions and prints the result.
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Session, Store, Persistence)
//!     ↓
//! Retrieval Layer (Gemini fetcher)
//! ```
//!
//! ## Commands
//!
//! - [`search`] - fetch a set's part list and add it to the collection
//! - [`list_sets`] - table of owned sets with progress
//! - [`show_set`], [`open_set`], [`close_set`] - detail view and active set
//! - [`collect_part`], [`uncollect_part`], [`fill_part`] - adjust one part
//! - [`complete_set`] - mark every part of a set collected
//! - [`delete_set`] - remove a set after confirmation
//! - [`dismiss_error`] - clear the last search error
//! - [`info`] - collection summary
//!
//! Sets are addressed by id, catalog number or 1-based position in `list`;
//! parts by id or 1-based position in `show`.

mod info;
mod parts;
mod search;
mod sets;

use std::io::{self, BufRead, Write};

use crate::management::{Confirm, FileSlot, STATE_KEY, Session};

pub use info::info;
pub use parts::collect_part;
pub use parts::fill_part;
pub use parts::uncollect_part;
pub use search::search;
pub use sets::close_set;
pub use sets::complete_set;
pub use sets::delete_set;
pub use sets::dismiss_error;
pub use sets::list_sets;
pub use sets::open_set;
pub use sets::show_set;

pub(crate) async fn open_session() -> Session<FileSlot> {
    Session::open(FileSlot::new(STATE_KEY)).await
}

/// Asks on stdin, anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
