//! Ordered ideas/goals list: CRUD, two-step delete, manual reordering and the
//! swap-with-main-text operation.
//!
//! The list order is user-controlled and is exactly what gets persisted;
//! entries are never re-sorted by timestamp. Every mutation that changes the
//! list leaves it ready to be written wholesale to the store.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single free-text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Creation-timestamp-derived id, unique within the list.
    pub id: String,
    pub text: String,
    /// Creation time in Unix milliseconds. Display order is independent of it.
    pub timestamp: i64,
}

/// In-memory ideas list plus the pending-delete marker of the two-step
/// delete flow.
#[derive(Debug, Clone, Default)]
pub struct IdeasList {
    ideas: Vec<Idea>,
    pending_delete: Option<String>,
}

impl IdeasList {
    pub fn from_ideas(ideas: Vec<Idea>) -> Self {
        Self {
            ideas,
            pending_delete: None,
        }
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Append a new idea. Whitespace-only text is rejected without touching
    /// the list. Returns whether the list changed.
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let (id, timestamp) = self.fresh_id();
        self.ideas.push(Idea {
            id,
            text: trimmed.to_string(),
            timestamp,
        });
        true
    }

    /// Replace the text of the entry with `id`, keeping its id and timestamp.
    /// Whitespace-only replacements and unknown ids are no-ops.
    pub fn edit(&mut self, id: &str, new_text: &str) -> bool {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.ideas.iter_mut().find(|idea| idea.id == id) {
            Some(idea) => {
                idea.text = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// First click of the delete flow: mark the entry, nothing is removed yet.
    pub fn request_delete(&mut self, id: &str) {
        if self.ideas.iter().any(|idea| idea.id == id) {
            self.pending_delete = Some(id.to_string());
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second click: remove the marked entry. Returns whether the list changed.
    pub fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != id);
        self.ideas.len() != before
    }

    /// Move the entry at `from` to `to`, shifting the entries in between.
    /// Disabled when fewer than two entries exist.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if self.ideas.len() < 2 || from == to || from >= self.ideas.len() || to >= self.ideas.len()
        {
            return false;
        }
        let moved = self.ideas.remove(from);
        self.ideas.insert(to, moved);
        true
    }

    /// Exchange an idea's text with the main display text.
    ///
    /// When the main text is blank the idea simply becomes the main text and
    /// its entry is removed. Otherwise the entry is replaced in place by a
    /// fresh idea wrapping the previous main text, so the swap keeps the list
    /// position. Returns the new main text, or `None` for an unknown id.
    pub fn swap_with_main_text(&mut self, id: &str, main_text: &str) -> Option<String> {
        let position = self.ideas.iter().position(|idea| idea.id == id)?;
        let new_main = self.ideas[position].text.clone();

        if main_text.trim().is_empty() {
            self.ideas.remove(position);
        } else {
            let (fresh_id, timestamp) = self.fresh_id();
            self.ideas[position] = Idea {
                id: fresh_id,
                text: main_text.trim().to_string(),
                timestamp,
            };
        }
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
        Some(new_main)
    }

    /// Millisecond-timestamp id, bumped past any id already in the list so
    /// two mutations within the same millisecond stay distinct.
    fn fresh_id(&self) -> (String, i64) {
        let timestamp = Utc::now().timestamp_millis();
        let mut candidate = timestamp;
        while self.ideas.iter().any(|idea| idea.id == candidate.to_string()) {
            candidate += 1;
        }
        (candidate.to_string(), timestamp)
    }
}

/// Transient drag-gesture ordering, kept apart from the committed list.
///
/// `source` is the committed index being dragged, `hover` the index the
/// pointer is currently over. The preview is discarded unless the gesture
/// ends in a drop, which commits through [`IdeasList::reorder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    pub source: Option<usize>,
    pub hover: Option<usize>,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The ordering to render while the gesture is in flight. Falls back to
    /// the committed order when there is nothing to preview.
    pub fn preview<'a>(&self, ideas: &'a [Idea]) -> Vec<&'a Idea> {
        let mut order: Vec<&Idea> = ideas.iter().collect();
        if let (Some(from), Some(to)) = (self.source, self.hover) {
            if from != to && from < order.len() && to < order.len() {
                let moved = order.remove(from);
                order.insert(to, moved);
            }
        }
        order
    }
}
