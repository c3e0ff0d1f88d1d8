//! Client state: durable storage, the session store and the course selection.

pub mod course_selection;
pub mod session;
pub mod storage;

pub use course_selection::CourseSelection;
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
