//! AnalysisHost and Analysis: state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state: open documents, the include
//! graph, and the parsed data of every dependency node. It hands out
//! `Analysis` snapshots for querying.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(AnalysisConfig::default());
//!
//! // Apply document changes
//! host.open_document(uri.clone(), text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let hover = analysis.hover(&uri, Position::new(line, col))?;
//! ```
//!
//! Symbol views are merged fresh for every query, so a change to any file
//! in the include closure is visible on the next call.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::base::{FileId, Position};
use crate::error::{AnalysisError, Result};
use crate::hir::{DocumentLookup, SymbolView, resolve};
use crate::parser::parse;
use crate::project::{AnalysisConfig, FsLoader, IncludeResolver, SourceLoader};
use crate::semantic::{DependencyEdges, DependencyId, DocumentData, FileDependencyManager};
use crate::syntax::{InclusionDescriptor, ResolvedInclusion};

use super::file_position::{DocumentText, FilePosition};
use super::{
    CompletionItem, GotoResult, HoverResult, SignatureHelp, completions, goto_definition, hover,
    signature_help,
};

/// An editor buffer and what was parsed from it.
#[derive(Clone, Debug)]
struct OpenDocument {
    text: DocumentText,
    data: DocumentData,
}

/// Parsed data of dependency nodes, keyed by node.
#[derive(Clone, Debug, Default)]
struct DependencyTable(FxHashMap<DependencyId, DocumentData>);

impl DependencyEdges for DependencyTable {
    fn edges_of(&self, id: DependencyId) -> &[DependencyId] {
        self.0.get(&id).map(|d| d.dependencies.as_slice()).unwrap_or(&[])
    }
}

/// Non-owning view used by the merge walk.
#[derive(Clone, Copy)]
struct Lookup<'a> {
    graph: &'a FileDependencyManager,
    table: &'a DependencyTable,
}

impl DocumentLookup for Lookup<'_> {
    fn document(&self, id: DependencyId) -> Option<&DocumentData> {
        if !self.graph.is_alive(id) {
            return None;
        }
        self.table.0.get(&id)
    }

    fn dependency_of(&self, uri: &FileId) -> Option<DependencyId> {
        self.graph
            .get_dependency(uri)
            .or_else(|| self.graph.get_dependency(&FileId::from_path(&uri.to_path())))
    }
}

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `open_document()`, `update_document()` and
/// `close_document()`, then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost<L: SourceLoader = FsLoader> {
    resolver: IncludeResolver,
    loader: L,
    documents: FxHashMap<FileId, OpenDocument>,
    graph: FileDependencyManager,
    dependencies: DependencyTable,
}

impl AnalysisHost<FsLoader> {
    /// Create a host that reads dependencies from disk.
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_loader(config, FsLoader)
    }
}

impl<L: SourceLoader> AnalysisHost<L> {
    /// Create a host with a custom source loader.
    pub fn with_loader(config: AnalysisConfig, loader: L) -> Self {
        Self {
            resolver: IncludeResolver::new(&config),
            loader,
            documents: FxHashMap::default(),
            graph: FileDependencyManager::new(),
            dependencies: DependencyTable::default(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Mutable access to the loader. Already-loaded dependencies are not
    /// reloaded.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Open a document, replacing any previous state for it.
    pub fn open_document(&mut self, uri: FileId, text: &str) {
        debug!(%uri, "open document");
        self.sync_document(uri, text);
    }

    /// Re-parse an open document after an edit.
    pub fn update_document(&mut self, uri: FileId, text: &str) -> Result<()> {
        if !self.documents.contains_key(&uri) {
            return Err(AnalysisError::UnknownDocument(uri));
        }
        debug!(%uri, "update document");
        self.sync_document(uri, text);
        Ok(())
    }

    /// Close a document and release its include edges.
    pub fn close_document(&mut self, uri: &FileId) -> Result<()> {
        let document = self
            .documents
            .remove(uri)
            .ok_or_else(|| AnalysisError::UnknownDocument(uri.clone()))?;
        debug!(%uri, "close document");
        self.release(&document.data.dependencies);

        // Includers fall back to the copy on disk
        let included = self.lookup().dependency_of(uri).is_some();
        if let Some(text) = included.then(|| self.source_text(uri)).flatten() {
            let removed = self.refresh_dependency(uri, &text);
            self.release(&removed);
        }
        Ok(())
    }

    pub fn is_open(&self, uri: &FileId) -> bool {
        self.documents.contains_key(uri)
    }

    /// Parsed data of an open document.
    pub fn document_data(&self, uri: &FileId) -> Option<&DocumentData> {
        self.documents.get(uri).map(|d| &d.data)
    }

    pub fn dependency_graph(&self) -> &FileDependencyManager {
        &self.graph
    }

    /// Parsed data of a live dependency node.
    pub fn dependency_data(&self, id: DependencyId) -> Option<&DocumentData> {
        if !self.graph.is_alive(id) {
            return None;
        }
        self.dependencies.0.get(&id)
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            documents: &self.documents,
            lookup: self.lookup(),
        }
    }

    fn lookup(&self) -> Lookup<'_> {
        Lookup {
            graph: &self.graph,
            table: &self.dependencies,
        }
    }

    fn sync_document(&mut self, uri: FileId, text: &str) {
        let old_edges = self
            .documents
            .get(&uri)
            .map(|d| d.data.dependencies.clone())
            .unwrap_or_default();
        let (data, removed) = self.build_data(&uri, text, false, &old_edges);

        self.documents.insert(
            uri.clone(),
            OpenDocument {
                text: DocumentText::new(text),
                data,
            },
        );
        let removed_by_node = self.refresh_dependency(&uri, text);
        self.release(&removed);
        self.release(&removed_by_node);
    }

    /// Parse `text` as `uri` and link its inclusions, reusing `old_edges`
    /// where the same file is still included. Returns the data and the old
    /// edges that disappeared.
    fn build_data(
        &mut self,
        uri: &FileId,
        text: &str,
        skip_static: bool,
        old_edges: &[DependencyId],
    ) -> (DocumentData, Vec<DependencyId>) {
        let mut results = parse(uri, text, skip_static);
        let inclusions = std::mem::take(&mut results.inclusions);
        let mut data = DocumentData::from_results(uri.clone(), results);
        data.resolved_inclusions = self.resolve_inclusions(uri, &inclusions);
        let (edges, removed) = self.relink(&data.resolved_inclusions, old_edges);
        data.dependencies = edges;
        (data, removed)
    }

    /// Re-parse the dependency node of `uri`, if other files include it, so
    /// they see `text`. Returns the node's edges that disappeared.
    fn refresh_dependency(&mut self, uri: &FileId, text: &str) -> Vec<DependencyId> {
        let Some(id) = self.lookup().dependency_of(uri) else {
            return Vec::new();
        };
        let Some(node_uri) = self.graph.node(id).map(|node| node.uri.clone()) else {
            return Vec::new();
        };
        let old_edges = self
            .dependencies
            .0
            .get(&id)
            .map(|d| d.dependencies.clone())
            .unwrap_or_default();

        let (data, removed) = self.build_data(&node_uri, text, true, &old_edges);
        debug!(uri = %node_uri, "dependency refreshed");
        self.dependencies.0.insert(id, data);
        removed
    }

    fn resolve_inclusions(
        &self,
        from: &FileId,
        inclusions: &[InclusionDescriptor],
    ) -> Vec<ResolvedInclusion> {
        inclusions
            .iter()
            .filter_map(|inclusion| {
                match self.resolver.resolve(inclusion, from, &self.loader) {
                    Ok(resolved) => Some(resolved),
                    Err(err) if inclusion.is_silent => {
                        trace!(%err, "optional include not found");
                        None
                    }
                    Err(err) => {
                        warn!(%err, "include not found");
                        None
                    }
                }
            })
            .collect()
    }

    /// Compute the new edge list. Edges whose file is still included are
    /// kept, new files gain a reference (and are loaded when the node is
    /// new). Returns the new edges and the old edges that disappeared.
    fn relink(
        &mut self,
        resolved: &[ResolvedInclusion],
        old_edges: &[DependencyId],
    ) -> (Vec<DependencyId>, Vec<DependencyId>) {
        let mut edges = Vec::new();
        let mut kept = FxHashSet::default();
        let mut seen = FxHashSet::default();

        for inclusion in resolved {
            if !seen.insert(inclusion.uri.clone()) {
                continue;
            }
            let existing = old_edges.iter().copied().find(|id| {
                self.graph
                    .node(*id)
                    .is_some_and(|node| node.uri == inclusion.uri)
            });
            if let Some(id) = existing {
                kept.insert(id);
                edges.push(id);
                continue;
            }

            let (id, created) = self.graph.add_reference(&inclusion.uri);
            edges.push(id);
            if created {
                self.load_dependency(id, &inclusion.uri);
            }
        }

        let removed = old_edges
            .iter()
            .copied()
            .filter(|id| !kept.contains(id))
            .collect();
        (edges, removed)
    }

    /// Parse a newly created dependency node and link its own inclusions.
    fn load_dependency(&mut self, id: DependencyId, uri: &FileId) {
        let Some(text) = self.source_text(uri) else {
            return;
        };
        let (data, _) = self.build_data(uri, &text, true, &[]);
        trace!(%uri, callables = data.callables.len(), "dependency parsed");
        self.dependencies.0.insert(id, data);
    }

    /// The editor buffer of `uri` when it is open, the loader's copy otherwise.
    fn source_text(&self, uri: &FileId) -> Option<String> {
        if let Some(document) = self.documents.get(uri) {
            return Some(document.text.chars().iter().collect());
        }
        match self.loader.load(&uri.to_path()) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(%err, "dependency cannot be loaded");
                None
            }
        }
    }

    /// Drop one reference per edge, then sweep nodes no open document can
    /// reach any more (closed include cycles), and forget the data of every
    /// deleted node.
    fn release(&mut self, edges: &[DependencyId]) {
        if edges.is_empty() {
            return;
        }
        let mut deleted = self
            .graph
            .remove_dependencies_transitively(edges, &self.dependencies);

        let roots: Vec<DependencyId> = self
            .documents
            .values()
            .flat_map(|document| document.data.dependencies.iter().copied())
            .collect();
        let orphans = self.graph.remove_unreachable(&roots, &self.dependencies);
        if !orphans.is_empty() {
            debug!(count = orphans.len(), "unreachable dependencies swept");
        }
        deleted.extend(orphans);

        for id in deleted {
            self.dependencies.0.remove(&id);
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    documents: &'a FxHashMap<FileId, OpenDocument>,
    lookup: Lookup<'a>,
}

impl<'a> Analysis<'a> {
    fn document(&self, file: &FileId) -> Result<&'a OpenDocument> {
        self.documents
            .get(file)
            .ok_or_else(|| AnalysisError::UnknownDocument(file.clone()))
    }

    /// The merged symbol view of an open document.
    pub fn symbols(&self, file: &FileId) -> Result<SymbolView> {
        let document = self.document(file)?;
        Ok(resolve(&document.data, &self.lookup))
    }

    /// Go to definition at a position.
    pub fn goto_definition(&self, file: &FileId, position: Position) -> Result<GotoResult> {
        let document = self.document(file)?;
        let symbols = resolve(&document.data, &self.lookup);
        Ok(goto_definition(
            FilePosition::new(file, &document.text, position),
            &symbols,
        ))
    }

    /// Get hover information at a position.
    pub fn hover(&self, file: &FileId, position: Position) -> Result<Option<HoverResult>> {
        let document = self.document(file)?;
        let symbols = resolve(&document.data, &self.lookup);
        Ok(hover(FilePosition::new(file, &document.text, position), &symbols))
    }

    /// Get completions at a position.
    pub fn completions(&self, file: &FileId, position: Position) -> Result<Vec<CompletionItem>> {
        let document = self.document(file)?;
        let symbols = resolve(&document.data, &self.lookup);
        Ok(completions(
            FilePosition::new(file, &document.text, position),
            &symbols,
        ))
    }

    /// Get signature help at a position.
    pub fn signature_help(
        &self,
        file: &FileId,
        position: Position,
    ) -> Result<Option<SignatureHelp>> {
        let document = self.document(file)?;
        let symbols = resolve(&document.data, &self.lookup);
        Ok(signature_help(
            FilePosition::new(file, &document.text, position),
            &symbols,
        ))
    }
}
