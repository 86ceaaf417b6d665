pub mod notification;
pub mod state;
pub mod store;

pub use notification::NotificationKind;
pub use state::{LibraryError, LibraryState};
pub use store::InstalledStore;
