//! Currently selected course, shared across views.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Debug, Default)]
pub struct CourseSelection {
    current: Arc<RwLock<Option<u64>>>,
}

impl CourseSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_course(&self, course_id: u64) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(course_id);
        tracing::debug!(course_id, "course selected");
    }

    #[must_use]
    pub fn current_course(&self) -> Option<u64> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_shared_between_clones() {
        let selection = CourseSelection::new();
        let view = selection.clone();
        assert_eq!(view.current_course(), None);

        selection.set_current_course(5);
        assert_eq!(view.current_course(), Some(5));

        view.set_current_course(7);
        assert_eq!(selection.current_course(), Some(7));

        selection.clear();
        assert_eq!(view.current_course(), None);
    }
}
