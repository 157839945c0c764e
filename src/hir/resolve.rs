//! Symbol merge: the effective symbol set visible from one file.
//!
//! A file sees its own declarations plus everything its transitive
//! inclusions declare. Merging walks the include edges depth-first, visiting
//! each dependency node at most once per call:
//!
//! ```text
//! plugin.sma ──► amxmodx.inc ──► core.inc
//!      │               ▲
//!      └──► util.inc ──┘          (amxmodx.inc merged once)
//! ```
//!
//! Callables are keyed case-insensitively. When two files declare the same
//! callable, a `forward`/`native` prototype takes priority over a body.
//! Values and constants are concatenated; duplicates across files are kept
//! and the first one found answers lookups.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::trace;

use crate::base::{FileId, Span};
use crate::semantic::{DependencyId, DocumentData};
use crate::syntax::{
    CallableDescriptor, ConstantDescriptor, SymbolKind, ValueDescriptor, identifier_key,
    toggle_at_prefix,
};

/// Read access to the parsed data of dependency nodes.
pub trait DocumentLookup {
    /// Data for a dependency node; `None` when the file was never parsed.
    fn document(&self, id: DependencyId) -> Option<&DocumentData>;

    /// The dependency node standing for `uri`, if some file includes it.
    fn dependency_of(&self, uri: &FileId) -> Option<DependencyId>;
}

/// The merged callables, values and constants visible from one file.
#[derive(Clone, Debug, Default)]
pub struct SymbolView {
    callables: IndexMap<SmolStr, CallableDescriptor, FxBuildHasher>,
    values: Vec<ValueDescriptor>,
    constants: Vec<ConstantDescriptor>,
}

/// Compute the symbol view of `data`.
pub fn resolve(data: &DocumentData, lookup: &impl DocumentLookup) -> SymbolView {
    let mut view = SymbolView::default();
    for callable in &data.callables {
        view.callables.insert(callable.key(), callable.clone());
    }
    view.values.extend(data.values.iter().cloned());
    view.constants.extend(data.constants.iter().cloned());

    // The file itself may be a dependency of one of its inclusions
    let mut visited = FxHashSet::default();
    if let Some(own) = lookup.dependency_of(&data.uri) {
        visited.insert(own);
    }
    merge_dependencies(&mut view, data, lookup, &mut visited);
    view
}

fn merge_dependencies(
    view: &mut SymbolView,
    data: &DocumentData,
    lookup: &impl DocumentLookup,
    visited: &mut FxHashSet<DependencyId>,
) {
    for &dep in &data.dependencies {
        if !visited.insert(dep) {
            continue;
        }
        let Some(dep_data) = lookup.document(dep) else {
            trace!(from = %data.uri, "dependency without data contributes nothing");
            continue;
        };
        trace!(from = %data.uri, to = %dep_data.uri, "merging dependency");

        for callable in &dep_data.callables {
            view.merge_callable(callable);
        }
        view.values.extend(dep_data.values.iter().cloned());
        view.constants.extend(dep_data.constants.iter().cloned());

        merge_dependencies(view, dep_data, lookup, visited);
    }
}

impl SymbolView {
    fn merge_callable(&mut self, incoming: &CallableDescriptor) {
        match self.callables.entry(incoming.key()) {
            Entry::Vacant(entry) => {
                entry.insert(incoming.clone());
            }
            Entry::Occupied(mut entry) => {
                if incoming.is_forward && !entry.get().is_forward {
                    entry.insert(incoming.clone());
                }
            }
        }
    }

    pub fn callables(&self) -> impl Iterator<Item = &CallableDescriptor> {
        self.callables.values()
    }

    pub fn values(&self) -> &[ValueDescriptor] {
        &self.values
    }

    pub fn constants(&self) -> &[ConstantDescriptor] {
        &self.constants
    }

    /// Find a callable by name, also trying the `@`-toggled spelling.
    pub fn callable(&self, name: &str) -> Option<&CallableDescriptor> {
        self.callables
            .get(&identifier_key(name))
            .or_else(|| self.callables.get(&identifier_key(&toggle_at_prefix(name))))
    }

    pub fn value(&self, name: &str) -> Option<&ValueDescriptor> {
        let alt = toggle_at_prefix(name);
        let find = |n: &str| {
            self.values
                .iter()
                .find(|v| v.identifier.eq_ignore_ascii_case(n))
        };
        find(name).or_else(|| find(&alt))
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantDescriptor> {
        let alt = toggle_at_prefix(name);
        let find = |n: &str| {
            self.constants
                .iter()
                .find(|c| c.identifier.eq_ignore_ascii_case(n))
        };
        find(name).or_else(|| find(&alt))
    }

    /// Resolve a name the way navigation does: constants, then callables,
    /// then values.
    pub fn lookup(&self, name: &str) -> Option<ResolvedSymbol<'_>> {
        if let Some(constant) = self.constant(name) {
            return Some(ResolvedSymbol::Constant(constant));
        }
        if let Some(callable) = self.callable(name) {
            return Some(ResolvedSymbol::Callable(callable));
        }
        self.value(name).map(ResolvedSymbol::Value)
    }
}

/// A symbol found by [`SymbolView::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedSymbol<'a> {
    Constant(&'a ConstantDescriptor),
    Callable(&'a CallableDescriptor),
    Value(&'a ValueDescriptor),
}

impl ResolvedSymbol<'_> {
    pub fn identifier(&self) -> &str {
        match self {
            ResolvedSymbol::Constant(c) => &c.identifier,
            ResolvedSymbol::Callable(c) => &c.identifier,
            ResolvedSymbol::Value(v) => &v.identifier,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ResolvedSymbol::Constant(c) => &c.label,
            ResolvedSymbol::Callable(c) => &c.label,
            ResolvedSymbol::Value(v) => &v.label,
        }
    }

    pub fn documentation(&self) -> Option<&Arc<str>> {
        match self {
            ResolvedSymbol::Constant(_) => None,
            ResolvedSymbol::Callable(c) => c.documentation.as_ref(),
            ResolvedSymbol::Value(v) => v.documentation.as_ref(),
        }
    }

    pub fn file(&self) -> &FileId {
        match self {
            ResolvedSymbol::Constant(c) => &c.file,
            ResolvedSymbol::Callable(c) => &c.file,
            ResolvedSymbol::Value(v) => &v.file,
        }
    }

    /// Span of the identifier at its declaration.
    pub fn span(&self) -> Span {
        match self {
            ResolvedSymbol::Constant(c) => c.span,
            ResolvedSymbol::Callable(c) => c.span,
            ResolvedSymbol::Value(v) => v.span,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            ResolvedSymbol::Constant(_) => SymbolKind::Constant,
            ResolvedSymbol::Callable(c) => c.kind,
            ResolvedSymbol::Value(_) => SymbolKind::Value,
        }
    }
}
