//! Style registry and inheritance resolution.
//!
//! A [`StyleSheet`] owns the report's root style (every attribute defined) and
//! the named styles, in insertion order. A style names its parent by
//! [`StyleId`]; a parent must be registered before its child, so the
//! inheritance graph is acyclic by construction.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::types::{CellStyle, ResolvedStyle};

/// Handle of a style registered in a [`StyleSheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(u32);

impl StyleId {
    /// The report-level default style.
    pub const DEFAULT: StyleId = StyleId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    name: String,
    style: CellStyle,
}

/// Root default style plus the named-style registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSheet {
    root: CellStyle,
    /// Named styles; `entries[i]` has id `i + 1`.
    entries: Vec<Entry>,
    by_name: HashMap<String, StyleId>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::with_default(&ResolvedStyle::default())
    }

    /// Start from a custom root style.
    pub fn with_default(root: &ResolvedStyle) -> Self {
        Self {
            root: root.to_cell_style(),
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// The root style. Every attribute is set on it.
    pub fn default_style(&self) -> &CellStyle {
        &self.root
    }

    /// Mutable root style. Attributes may be changed; its parent is never followed.
    pub fn default_style_mut(&mut self) -> &mut CellStyle {
        &mut self.root
    }

    /// Register a named style.
    ///
    /// # Errors
    /// Fails for duplicate names and for a parent that is not registered.
    pub fn add(&mut self, name: impl Into<String>, style: CellStyle) -> Result<StyleId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ReportError::DuplicateStyleName(name));
        }
        let id = u32::try_from(self.entries.len() + 1)
            .map(StyleId)
            .map_err(|_| ReportError::OutOfRange {
                what: "style count",
                value: i64::MAX,
                min: 0,
                max: i64::from(u32::MAX),
            })?;
        if let Some(parent) = style.parent() {
            if parent >= id {
                return Err(ReportError::ForwardStyleReference {
                    style: name,
                    parent: parent.to_string(),
                });
            }
        }
        log::trace!("registered style {name:?} as {id}");
        self.by_name.insert(name.clone(), id);
        self.entries.push(Entry { name, style });
        Ok(id)
    }

    /// Register a named style inheriting from an already registered one.
    ///
    /// # Errors
    /// Fails when `parent` is unknown or `name` is taken.
    pub fn add_with_parent_name(
        &mut self,
        name: impl Into<String>,
        parent: &str,
        mut style: CellStyle,
    ) -> Result<StyleId> {
        style.set_parent(Some(self.require(parent)?));
        self.add(name, style)
    }

    /// Look up a named style.
    pub fn id(&self, name: &str) -> Option<StyleId> {
        self.by_name.get(name).copied()
    }

    /// Look up a named style, failing if it is unknown.
    ///
    /// # Errors
    /// Returns [`ReportError::UnknownStyle`].
    pub fn require(&self, name: &str) -> Result<StyleId> {
        self.id(name)
            .ok_or_else(|| ReportError::UnknownStyle(name.to_string()))
    }

    /// Name of a named style; the root style has none.
    pub fn name(&self, id: StyleId) -> Option<&str> {
        let index = id.index().checked_sub(1)?;
        self.entries.get(index).map(|e| e.name.as_str())
    }

    pub fn get(&self, id: StyleId) -> Option<&CellStyle> {
        match id.index().checked_sub(1) {
            None => Some(&self.root),
            Some(index) => self.entries.get(index).map(|e| &e.style),
        }
    }

    /// Mutable access to a registered style. Descendants see the change.
    pub fn get_mut(&mut self, id: StyleId) -> Option<&mut CellStyle> {
        match id.index().checked_sub(1) {
            None => Some(&mut self.root),
            Some(index) => self.entries.get_mut(index).map(|e| &mut e.style),
        }
    }

    /// Re-link a registered style.
    ///
    /// # Errors
    /// The parent must have been registered before `id`; anything else could
    /// form a cycle.
    pub fn set_parent(&mut self, id: StyleId, parent: Option<StyleId>) -> Result<()> {
        let label = self
            .name(id)
            .map_or_else(|| id.to_string(), str::to_string);
        if let Some(p) = parent {
            if p >= id {
                let parent_label = self.name(p).map_or_else(|| p.to_string(), str::to_string);
                return Err(ReportError::ForwardStyleReference {
                    style: label,
                    parent: parent_label,
                });
            }
        }
        let style = self
            .get_mut(id)
            .ok_or(ReportError::UnknownStyle(label))?;
        style.set_parent(parent);
        Ok(())
    }

    /// Re-link a registered style to a parent given by name.
    ///
    /// # Errors
    /// Fails for unknown names and forward references.
    pub fn set_parent_name(&mut self, id: StyleId, parent: &str) -> Result<()> {
        let parent = self.require(parent)?;
        self.set_parent(id, Some(parent))
    }

    /// Named styles in registration order.
    pub fn named(&self) -> impl Iterator<Item = (StyleId, &str, &CellStyle)> {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            let id = StyleId(u32::try_from(i + 1).ok()?);
            Some((id, e.name.as_str(), &e.style))
        })
    }

    /// Number of named styles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `acc` from the chain starting at `start`, nearest first. Parent
    /// links only ever point backwards, so the walk terminates even if a
    /// caller re-linked a style by hand.
    pub(crate) fn fill_chain(&self, acc: &mut CellStyle, start: Option<StyleId>) {
        let mut current = start;
        while let Some(id) = current {
            let Some(style) = self.get(id) else {
                break;
            };
            acc.fill_from(style);
            current = style.parent().filter(|p| *p < id);
        }
    }

    /// Resolve a chain starting from an unregistered local style, finishing with
    /// the root style.
    pub(crate) fn resolve_local(&self, local: &CellStyle, fallbacks: &[&CellStyle]) -> ResolvedStyle {
        let mut acc = local.clone();
        self.fill_chain(&mut acc, local.parent());
        for fallback in fallbacks {
            acc.fill_from(fallback);
            self.fill_chain(&mut acc, fallback.parent());
        }
        self.fill_chain(&mut acc, Some(StyleId::DEFAULT));
        ResolvedStyle::from_chain(acc)
    }

    /// Resolve every attribute of a registered style.
    pub fn resolve(&self, id: StyleId) -> ResolvedStyle {
        let mut acc = CellStyle::default();
        self.fill_chain(&mut acc, Some(id));
        self.fill_chain(&mut acc, Some(StyleId::DEFAULT));
        ResolvedStyle::from_chain(acc)
    }

    /// The nearest explicit value of one attribute along the chain of `id`,
    /// ending at the root style.
    pub fn lookup<T>(&self, id: StyleId, attr: impl Fn(&CellStyle) -> Option<T>) -> Option<T> {
        let mut current = Some(id);
        while let Some(cur) = current {
            let style = self.get(cur)?;
            if let Some(value) = attr(style) {
                return Some(value);
            }
            current = style.parent().filter(|p| *p < cur);
        }
        if id == StyleId::DEFAULT {
            return None;
        }
        self.get(StyleId::DEFAULT).and_then(attr)
    }

    /// Font names set on the root or any named style.
    pub(crate) fn collect_font_names(&self, into: &mut BTreeSet<String>) {
        let styles = std::iter::once(&self.root).chain(self.entries.iter().map(|e| &e.style));
        for style in styles {
            if let Some(name) = style.font_name() {
                into.insert(name.to_string());
            }
        }
    }
}
