use crate::{
    management::{
        persistence::{StateManager, StorageSlot},
        store::{self, Action},
    },
    types::AppState,
    utils, warning,
};

/// Interactive yes/no guard used before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Always answers the same way. Handy for `--yes` flags and tests.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub const DELETE_PROMPT: &str = "Delete this set?";

type Observer = Box<dyn FnMut(&AppState)>;

/// Owns the current [`AppState`] snapshot.
///
/// Actions are applied through [`store::reduce`], the new snapshot replaces the
/// old one, then the state is persisted and every subscribed observer sees it.
pub struct Session<S: StorageSlot> {
    state: AppState,
    manager: StateManager<S>,
    observers: Vec<Observer>,
}

impl<S: StorageSlot> Session<S> {
    /// Restores the session from the storage slot.
    pub async fn open(slot: S) -> Self {
        let manager = StateManager::new(slot);
        let state = manager.load().await;
        Self {
            state,
            manager,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn manager(&self) -> &StateManager<S> {
        &self.manager
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&AppState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub async fn dispatch(&mut self, action: Action) -> &AppState {
        let next = store::reduce(&self.state, action, utils::now_millis());
        self.commit(next).await;
        &self.state
    }

    /// Deletes a set after asking for confirmation. Returns whether the
    /// deletion went ahead; declining leaves the state untouched.
    pub async fn delete_set<C: Confirm>(&mut self, set_id: &str, confirm: &C) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }
        self.dispatch(Action::DeleteSet(set_id.to_string())).await;
        true
    }

    async fn commit(&mut self, next: AppState) {
        self.state = next;

        // a failed write must not take the session down, the next commit retries
        if let Err(e) = self.manager.persist(&self.state).await {
            warning!("Failed to save state. Err: {}", e);
        }

        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }
}
