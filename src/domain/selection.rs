//! Click-to-select, click-again-to-deselect state.

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<K> {
    selected: Option<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<K: PartialEq> Selection<K> {
    /// Select `key`, or clear the selection if `key` is already selected.
    pub fn toggle(&mut self, key: K) {
        if self.selected.as_ref() == Some(&key) {
            self.selected = None;
        } else {
            self.selected = Some(key);
        }
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.as_ref() == Some(key)
    }

    pub fn get(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}
