//! View nodes and row descriptors.
//!
//! A `Node` stands in for one element of the dashboard page. Components keep a clone of
//! the nodes they own and replace their content; the renderer only takes snapshots.
use std::sync::{Arc, Mutex};

use dashboard_common::Result;

/// Shared, lock-protected handle to one piece of view state.
#[derive(Debug, Default)]
pub struct Node<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Replace the whole content.
    pub fn set(&self, value: T) -> Result<()> {
        *self.inner.lock()? = value;
        Ok(())
    }

    /// Mutate in place while holding the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut guard = self.inner.lock()?;
        Ok(f(&mut guard))
    }
}

impl<T: Clone> Node<T> {
    /// Copy of the current content.
    pub fn snapshot(&self) -> Result<T> {
        Ok(self.inner.lock()?.clone())
    }
}

/// One rendered row of the market status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    /// 1-based position in the server's list.
    pub index: usize,
    pub name: String,
    pub status: String,
    /// Style class applied to the status cell.
    pub css_class: String,
    pub time_to_open: String,
}

/// Content of the price panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceReport {
    /// `<SYMBOL> Price`
    pub title: String,
    /// `Ask: <ask>`
    pub ask: String,
    /// `Bid: <bid>`
    pub bid: String,
}

/// Dropdown under the symbol input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBox {
    pub entries: Vec<String>,
    pub visible: bool,
}

impl SuggestionBox {
    /// Clear the entries and hide the dropdown.
    pub fn hide(&mut self) {
        self.entries.clear();
        self.visible = false;
    }

    /// Replace the entries; an empty list hides the dropdown.
    pub fn show(&mut self, entries: Vec<String>) {
        self.visible = !entries.is_empty();
        self.entries = entries;
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clock: Option<String>,
    pub rows: Vec<StatusRow>,
    pub input: String,
    pub suggestions: SuggestionBox,
    /// `None` when the page has no price panel; `Some(None)` while it is still empty.
    pub price: Option<Option<PriceReport>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_content() {
        let node = Node::new(Vec::<u32>::new());
        let other = node.clone();
        other.update(|v| v.push(7)).unwrap();
        node.set(vec![1, 2]).unwrap();

        assert_eq!(other.snapshot().unwrap(), vec![1, 2]);
    }

    #[test]
    fn poisoned_node_reports_lock_error() {
        let node = Node::new(0u8);
        let poisoner = node.clone();
        let _ = std::thread::spawn(move || {
            let _ = poisoner.update(|_| panic!("poison"));
        })
        .join();

        assert!(matches!(
            node.snapshot(),
            Err(dashboard_common::DashboardError::MutexLock(_))
        ));
    }

    #[test]
    fn empty_suggestions_hide_the_box() {
        let mut dropdown = SuggestionBox::default();
        dropdown.show(vec!["AAPL".into()]);
        assert!(dropdown.visible);

        dropdown.show(Vec::new());
        assert!(!dropdown.visible);
        assert!(dropdown.entries.is_empty());
    }
}
