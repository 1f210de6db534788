//! Width-condition dispatch
//!
//! A [`MediaRegistry`] maps viewport-width conditions to callbacks and runs
//! each callback when its condition's truth value transitions to matching.
//! Conditions partition nothing: entries may overlap and each is evaluated
//! independently, so a width can satisfy several at once.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered width condition
    pub struct MediaEntryId;
}

/// A predicate over viewport width, inclusive on both bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaCondition {
    min_width: Option<u32>,
    max_width: Option<u32>,
}

impl MediaCondition {
    /// Matches widths of at least `width`.
    pub fn min_width(width: u32) -> Self {
        Self {
            min_width: Some(width),
            max_width: None,
        }
    }

    /// Matches widths of at most `width`.
    pub fn max_width(width: u32) -> Self {
        Self {
            min_width: None,
            max_width: Some(width),
        }
    }

    /// Matches widths in `min..=max`.
    pub fn between(min: u32, max: u32) -> Self {
        Self {
            min_width: Some(min),
            max_width: Some(max),
        }
    }

    pub fn matches(&self, width: u32) -> bool {
        self.min_width.map_or(true, |min| width >= min)
            && self.max_width.map_or(true, |max| width <= max)
    }
}

/// Callback run when an entry's condition starts matching.
pub type MatchFn = Box<dyn FnMut() + Send>;

struct MediaEntry {
    condition: MediaCondition,
    on_match: MatchFn,
    /// None until the first evaluation
    was_matching: Option<bool>,
}

/// Edge-triggered registry of width conditions.
///
/// Callbacks run on the transition into matching - including the first
/// [`update`] after registration - and never again until the condition has
/// stopped matching and matched anew.
///
/// [`update`]: MediaRegistry::update
pub struct MediaRegistry {
    entries: SlotMap<MediaEntryId, MediaEntry>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
        }
    }

    /// Register a callback for `condition`. It runs on the next [`update`]
    /// whose width matches.
    ///
    /// [`update`]: MediaRegistry::update
    pub fn register<F>(&mut self, condition: MediaCondition, on_match: F) -> MediaEntryId
    where
        F: FnMut() + Send + 'static,
    {
        self.entries.insert(MediaEntry {
            condition,
            on_match: Box::new(on_match),
            was_matching: None,
        })
    }

    /// Drop an entry. Returns `false` if it was already removed.
    pub fn remove(&mut self, id: MediaEntryId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-evaluate every entry against `width`, running the callbacks of
    /// entries that just started matching.
    pub fn update(&mut self, width: u32) {
        for (_, entry) in self.entries.iter_mut() {
            let matching = entry.condition.matches(width);
            if matching && entry.was_matching != Some(true) {
                tracing::debug!(width, condition = ?entry.condition, "media condition matched");
                (entry.on_match)();
            }
            entry.was_matching = Some(matching);
        }
    }
}

impl Default for MediaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
