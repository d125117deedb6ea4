//! Task templates and the category set.
//!
//! Templates are keyed by name: dropping a template stamps its name, category
//! and color onto a new block, and later edits find those blocks by name.
//! Categories are plain labels with one sentinel, [`OTHER_CATEGORY`], that
//! always exists.

use serde::{Deserialize, Serialize};

/// Category that can never be deleted or renamed away.
pub const OTHER_CATEGORY: &str = "Other";

/// A reusable named preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub name: String,
    pub category: String,
    pub color: String,
}

impl TaskTemplate {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            color: color.into(),
        }
    }
}

/// Unique category labels, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Build from a list, dropping duplicates and blanks and appending the
    /// sentinel if it is missing.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.add(name);
        }
        if !set.contains(OTHER_CATEGORY) {
            set.names.push(OTHER_CATEGORY.to_string());
        }
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add a trimmed, non-empty, not yet present name.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Rename in place, keeping the position. Refuses the sentinel, unknown
    /// names, blanks and names already in use.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let new = new.trim();
        if old == OTHER_CATEGORY || new.is_empty() || self.contains(new) {
            return false;
        }
        match self.names.iter_mut().find(|n| n.as_str() == old) {
            Some(slot) => {
                *slot = new.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a category. The sentinel is never removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == OTHER_CATEGORY {
            return false;
        }
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::from_names(crate::palette::DEFAULT_CATEGORIES.iter().copied())
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.names
    }
}

/// The task palette.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCatalog {
    tasks: Vec<TaskTemplate>,
}

impl TaskCatalog {
    pub fn new(tasks: Vec<TaskTemplate>) -> Self {
        Self { tasks }
    }

    /// The built-in presets.
    pub fn presets() -> Self {
        Self::new(crate::palette::default_tasks())
    }

    pub fn find(&self, name: &str) -> Option<&TaskTemplate> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskTemplate> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a template. The name is trimmed and must be non-empty and unused.
    pub fn add(&mut self, mut template: TaskTemplate) -> Option<&TaskTemplate> {
        template.name = template.name.trim().to_string();
        if template.name.is_empty() || self.find(&template.name).is_some() {
            return None;
        }
        self.tasks.push(template);
        self.tasks.last()
    }

    /// Replace the template called `name` with `edited`, keeping its
    /// position. Returns the previous template.
    ///
    /// Refused when `name` is unknown, the edited name is blank, or the edited
    /// name belongs to a different template.
    pub fn edit(&mut self, name: &str, mut edited: TaskTemplate) -> Option<TaskTemplate> {
        edited.name = edited.name.trim().to_string();
        if edited.name.is_empty() || (edited.name != name && self.find(&edited.name).is_some()) {
            return None;
        }
        let slot = self.tasks.iter_mut().find(|t| t.name == name)?;
        Some(std::mem::replace(slot, edited))
    }

    pub fn remove(&mut self, name: &str) -> Option<TaskTemplate> {
        let index = self.tasks.iter().position(|t| t.name == name)?;
        Some(self.tasks.remove(index))
    }

    /// Move every template in category `old` to `new`.
    pub fn retag_category(&mut self, old: &str, new: &str) -> usize {
        let mut count = 0;
        for task in self.tasks.iter_mut().filter(|t| t.category == old) {
            task.category = new.to_string();
            count += 1;
        }
        count
    }
}
