mod persistence;
mod session;
pub mod store;

pub use persistence::FileSlot;
pub use persistence::MemorySlot;
pub use persistence::STATE_KEY;
pub use persistence::StateManager;
pub use persistence::StorageError;
pub use persistence::StorageSlot;
pub use session::AutoConfirm;
pub use session::Confirm;
pub use session::DELETE_PROMPT;
pub use session::Session;
pub use store::Action;
pub use store::Direction;
