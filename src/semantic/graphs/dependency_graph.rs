//! Reference-counted include graph.
//!
//! Every file reached through `#include` is one [`FileDependency`] node,
//! shared by all files that include it. Nodes live in a generational arena:
//! a [`DependencyId`] held after its node was deleted never resolves to a
//! node created later in the same slot.
//!
//! The graph stores nodes only. Outgoing edges of a node belong to that
//! node's parsed data, which the caller owns and exposes through
//! [`DependencyEdges`] when tearing down subtrees.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::FileId;

/// Handle to a dependency node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId {
    index: u32,
    generation: u32,
}

impl DependencyId {
    /// Slot index, usable for index-based visited marking
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// One included file and the number of edges pointing at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDependency {
    pub uri: FileId,
    ref_count: usize,
}

impl FileDependency {
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }
}

/// Outgoing edges of dependency nodes, as known to whoever owns their data.
pub trait DependencyEdges {
    /// Edges of `id`; empty when the node's file was never parsed.
    fn edges_of(&self, id: DependencyId) -> &[DependencyId];
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<FileDependency>,
}

/// Owner of all dependency nodes.
#[derive(Debug, Clone, Default)]
pub struct FileDependencyManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_uri: FxHashMap<FileId, DependencyId>,
}

impl FileDependencyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the live node for `uri`.
    pub fn get_dependency(&self, uri: &FileId) -> Option<DependencyId> {
        self.by_uri.get(uri).copied()
    }

    /// The node behind `id`, if it is still alive.
    pub fn node(&self, id: DependencyId) -> Option<&FileDependency> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn is_alive(&self, id: DependencyId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }

    /// Iterate over live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (DependencyId, &FileDependency)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    DependencyId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// Add one reference to `uri`, creating the node with a count of one if
    /// it does not exist yet. Returns the node and whether it was created.
    pub fn add_reference(&mut self, uri: &FileId) -> (DependencyId, bool) {
        if let Some(id) = self.by_uri.get(uri).copied() {
            if let Some(node) = self.node_mut(id) {
                node.ref_count += 1;
            }
            return (id, false);
        }

        let node = FileDependency {
            uri: uri.clone(),
            ref_count: 1,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                DependencyId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                DependencyId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        debug!(%uri, "dependency created");
        self.by_uri.insert(uri.clone(), id);
        (id, true)
    }

    /// Drop one reference to `uri`. Returns true when the node was deleted.
    pub fn remove_reference(&mut self, uri: &FileId) -> bool {
        match self.by_uri.get(uri).copied() {
            Some(id) => self.release(id),
            None => false,
        }
    }

    /// Drop one reference from each of `start`, walking depth-first into the
    /// edges of every node that reaches zero.
    ///
    /// Each node is decremented at most once per call, so cycles terminate.
    /// A node that survives the decrement is still reachable another way and
    /// its subtree is left alone. Returns the deleted nodes in deletion order.
    pub fn remove_dependencies_transitively(
        &mut self,
        start: &[DependencyId],
        edges: &impl DependencyEdges,
    ) -> Vec<DependencyId> {
        let mut visited = vec![false; self.slots.len()];
        let mut deleted = Vec::new();
        let mut stack: Vec<DependencyId> = start.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !self.is_alive(id) || visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;

            if self.release(id) {
                deleted.push(id);
                stack.extend(edges.edges_of(id).iter().rev().copied());
            }
        }

        deleted
    }

    /// Delete every live node that cannot be reached from `roots`.
    ///
    /// Reference counts alone never free a closed include cycle, since each
    /// member holds a reference to the next. Returns the deleted nodes.
    pub fn remove_unreachable(
        &mut self,
        roots: &[DependencyId],
        edges: &impl DependencyEdges,
    ) -> Vec<DependencyId> {
        let mut reachable = vec![false; self.slots.len()];
        let mut stack: Vec<DependencyId> = roots.to_vec();
        while let Some(id) = stack.pop() {
            if !self.is_alive(id) || reachable[id.index()] {
                continue;
            }
            reachable[id.index()] = true;
            stack.extend_from_slice(edges.edges_of(id));
        }

        let orphans: Vec<DependencyId> = self
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !reachable[id.index()])
            .collect();
        for &id in &orphans {
            self.delete(id);
        }
        orphans
    }

    fn node_mut(&mut self, id: DependencyId) -> Option<&mut FileDependency> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn release(&mut self, id: DependencyId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.ref_count = node.ref_count.saturating_sub(1);
        if node.ref_count > 0 {
            return false;
        }
        self.delete(id);
        true
    }

    fn delete(&mut self, id: DependencyId) {
        let slot = &mut self.slots[id.index()];
        if let Some(node) = slot.node.take() {
            debug!(uri = %node.uri, "dependency deleted");
            self.by_uri.remove(&node.uri);
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }
}
