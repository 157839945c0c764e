//! Per-file analysis state.

use crate::base::FileId;
use crate::semantic::graphs::DependencyId;
use crate::syntax::{
    CallableDescriptor, ConstantDescriptor, ParserResults, ResolvedInclusion, ValueDescriptor,
};

/// What one parsed file contributes: its own symbols plus its outgoing
/// include edges.
///
/// Edges are non-owning handles into the [`FileDependencyManager`]; the
/// node lifecycle is driven only by reference counts.
///
/// [`FileDependencyManager`]: crate::semantic::FileDependencyManager
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentData {
    pub uri: FileId,
    pub resolved_inclusions: Vec<ResolvedInclusion>,
    pub callables: Vec<CallableDescriptor>,
    pub values: Vec<ValueDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
    pub dependencies: Vec<DependencyId>,
}

impl DocumentData {
    pub fn new(uri: FileId) -> Self {
        Self {
            uri,
            resolved_inclusions: Vec::new(),
            callables: Vec::new(),
            values: Vec::new(),
            constants: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Take over the symbols of a parse pass. Inclusions and edges are
    /// filled in separately once they have been resolved.
    pub fn from_results(uri: FileId, results: ParserResults) -> Self {
        Self {
            uri,
            resolved_inclusions: Vec::new(),
            callables: results.callables,
            values: results.values,
            constants: results.constants,
            dependencies: Vec::new(),
        }
    }
}
