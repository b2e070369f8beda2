//! Dependent autocomplete fields (parent -> child -> grandchild).
//!
//! Each field keeps its own `enabled` flag and value; views only project this
//! state. A field is always cleared before it is disabled, so a disabled field
//! never carries a value picked under a previous parent.

use super::list_utils::{SearchValue, Searchable};

/// One autocomplete control: the typed text plus the picked item, if any
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeField<T> {
    text: String,
    value: Option<T>,
    enabled: bool,
}

/// A standalone selector with no dependants (student / tutor pickers)
pub type SelectField<T> = CascadeField<T>;

impl<T> Default for CascadeField<T> {
    fn default() -> Self {
        Self::enabled()
    }
}

impl<T> CascadeField<T> {
    pub fn enabled() -> Self {
        Self {
            text: String::new(),
            value: None,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::enabled()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset_and_disable(&mut self) {
        self.text.clear();
        self.value = None;
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }
}

impl<T: Searchable + Clone> CascadeField<T> {
    /// Value to feed the filter pipeline
    pub fn search_value(&self) -> SearchValue<T> {
        match &self.value {
            Some(item) if item.display_name() == self.text => SearchValue::Selected(item.clone()),
            _ if self.text.trim().is_empty() => SearchValue::Empty,
            _ => SearchValue::Text(self.text.clone()),
        }
    }

    /// Pick an option. Ignored while disabled.
    pub fn select(&mut self, item: T) -> bool {
        if !self.enabled {
            return false;
        }
        self.text = item.display_name();
        self.value = Some(item);
        true
    }

    /// Typed text. The picked value survives only while the text still reads
    /// as its display name. Returns true when the edit dropped the value.
    pub fn set_text(&mut self, text: String) -> bool {
        if !self.enabled {
            return false;
        }
        let keep = !text.trim().is_empty()
            && self
                .value
                .as_ref()
                .is_some_and(|item| item.display_name() == text);
        self.text = text;
        if keep {
            return false;
        }
        self.value.take().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    ParentUnset,
    ChildUnset,
    ChildSet,
}

/// Three chained fields of one row, e.g. syllabus -> subject -> grade
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeRow<P, C, G> {
    parent: CascadeField<P>,
    child: CascadeField<C>,
    grandchild: CascadeField<G>,
}

impl<P, C, G> Default for CascadeRow<P, C, G>
where
    P: Searchable + Clone,
    C: Searchable + Clone,
    G: Searchable + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, C, G> CascadeRow<P, C, G>
where
    P: Searchable + Clone,
    C: Searchable + Clone,
    G: Searchable + Clone,
{
    pub fn new() -> Self {
        Self {
            parent: CascadeField::enabled(),
            child: CascadeField::disabled(),
            grandchild: CascadeField::disabled(),
        }
    }

    pub fn parent(&self) -> &CascadeField<P> {
        &self.parent
    }

    pub fn child(&self) -> &CascadeField<C> {
        &self.child
    }

    pub fn grandchild(&self) -> &CascadeField<G> {
        &self.grandchild
    }

    pub fn state(&self) -> RowState {
        match (self.parent.value(), self.child.value()) {
            (None, _) => RowState::ParentUnset,
            (Some(_), None) => RowState::ChildUnset,
            (Some(_), Some(_)) => RowState::ChildSet,
        }
    }

    pub fn select_parent(&mut self, item: P) {
        if self.parent.select(item) {
            self.child.reset_and_disable();
            self.child.enable();
            self.grandchild.reset_and_disable();
        }
    }

    pub fn set_parent_text(&mut self, text: String) {
        if self.parent.set_text(text) {
            self.child.reset_and_disable();
            self.grandchild.reset_and_disable();
        }
    }

    pub fn select_child(&mut self, item: C) {
        if self.parent.value().is_none() {
            log::debug!("cascade: child picked without a parent, ignored");
            return;
        }
        if self.child.select(item) {
            self.grandchild.reset_and_disable();
            self.grandchild.enable();
        }
    }

    pub fn set_child_text(&mut self, text: String) {
        if self.child.set_text(text) {
            self.grandchild.reset_and_disable();
        }
    }

    pub fn select_grandchild(&mut self, item: G) {
        if self.child.value().is_none() {
            log::debug!("cascade: grandchild picked without a child, ignored");
            return;
        }
        self.grandchild.select(item);
    }

    pub fn set_grandchild_text(&mut self, text: String) {
        self.grandchild.set_text(text);
    }

    /// All three values, once the row is fully filled in
    pub fn completed(&self) -> Option<(&P, &C, &G)> {
        Some((
            self.parent.value()?,
            self.child.value()?,
            self.grandchild.value()?,
        ))
    }
}
