//! # tma-picker
//!
//! Scroll-picker control. [`PickerWidget`] is the capability registered at bootstrap and carries
//! shared display options; views ask it for [`ScrollPicker`]s over their own option lists.

use maud::{html, Markup};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Picker has no options")]
    Empty,

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Value not among picker options")]
    UnknownValue,
}

/// A labelled option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption<T> {
    pub label: String,
    pub value: T,
}

impl<T> PickerOption<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Shared picker options. Visible rows are always odd so the selection sits in the middle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerWidget {
    visible_rows: usize,
    empty_text: String,
}

impl Default for PickerWidget {
    fn default() -> Self {
        Self {
            visible_rows: 5,
            empty_text: "No Items".to_string(),
        }
    }
}

impl PickerWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of rendered rows; even values are rounded up, zero becomes one.
    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.visible_rows = rows.max(1) | 1;
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Creates a picker over `options`; the first option is selected when there is one.
    pub fn picker<T>(&self, options: Vec<PickerOption<T>>) -> ScrollPicker<T> {
        let selected = if options.is_empty() { None } else { Some(0) };
        ScrollPicker {
            options,
            selected,
            visible_rows: self.visible_rows,
            empty_text: self.empty_text.clone(),
        }
    }

    /// Picker over an inclusive numeric range, labelled with the numbers themselves.
    pub fn range(&self, from: u32, to: u32) -> ScrollPicker<u32> {
        self.picker((from..=to).map(|n| PickerOption::new(n.to_string(), n)).collect())
    }
}

/// Scrollable single-selection list.
#[derive(Debug, Clone)]
pub struct ScrollPicker<T> {
    options: Vec<PickerOption<T>>,
    selected: Option<usize>,
    visible_rows: usize,
    empty_text: String,
}

impl<T: PartialEq> ScrollPicker<T> {
    pub fn options(&self) -> &[PickerOption<T>] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&PickerOption<T>> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn value(&self) -> Option<&T> {
        self.selected().map(|o| &o.value)
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), PickerError> {
        if self.options.is_empty() {
            return Err(PickerError::Empty);
        }
        if index >= self.options.len() {
            return Err(PickerError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn select_value(&mut self, value: &T) -> Result<(), PickerError> {
        let index = self
            .options
            .iter()
            .position(|o| &o.value == value)
            .ok_or(PickerError::UnknownValue)?;
        self.select_index(index)
    }

    /// Moves the selection by `delta` rows, clamped to the ends. Returns the new value.
    pub fn scroll(&mut self, delta: isize) -> Option<&T> {
        if self.options.is_empty() {
            return None;
        }
        let last = self.options.len() as isize - 1;
        let from = self.selected.unwrap_or(0) as isize;
        let to = (from + delta).clamp(0, last) as usize;
        debug!(from, to, "picker scrolled");
        self.selected = Some(to);
        self.value()
    }

    /// Rows around the selection, at most `visible_rows` of them, as (index, option) pairs.
    pub fn visible_window(&self) -> Vec<(usize, &PickerOption<T>)> {
        if self.options.is_empty() {
            return Vec::new();
        }
        let rows = self.visible_rows.min(self.options.len());
        let center = self.selected.unwrap_or(0);
        let start = center
            .saturating_sub(rows / 2)
            .min(self.options.len() - rows);
        self.options
            .iter()
            .enumerate()
            .skip(start)
            .take(rows)
            .collect()
    }

    /// Renders the visible rows; the selected row carries `aria-selected="true"`.
    pub fn render(&self, name: &str) -> Markup {
        html! {
            div class="vue-scroll-picker" data-name=(name) {
                @if self.options.is_empty() {
                    div class="vue-scroll-picker-empty" { (self.empty_text) }
                } @else {
                    ul class="vue-scroll-picker-list" {
                        @for (index, option) in self.visible_window() {
                            @let selected = if Some(index) == self.selected { "true" } else { "false" };
                            li class="vue-scroll-picker-item" aria-selected=(selected) { (option.label) }
                        }
                    }
                }
            }
        }
    }
}
