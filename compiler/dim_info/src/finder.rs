//! Debug info finder.
//!
//! Walks a program's debug-info graph from its compile units (and, on
//! request, from instruction attachments) and records every compile unit,
//! subprogram, global variable, type and scope it reaches. Each category
//! keeps discovery order and lists a node at most once.
//!
//! # Traversal
//!
//! Every step checks its category's visited set and marks the node before
//! descending, so cyclic graphs (a struct whose member points back at the
//! struct) terminate after one visit per node. Lexical blocks are never
//! recorded; the walk climbs through them to the enclosing named scope.
//!
//! Identifier references are resolved through an [`IdentifierMap`] built on
//! the first call that needs it. [`Finder::reset`] drops it along with
//! everything else.
//!
//! # Malformed input
//!
//! A node of the wrong kind where a particular kind is expected is treated
//! as absent. The one fatal case is an identifier reference missing from the
//! map, which means the map and the walk disagree about the program's compile
//! units.

use dim_ir::{DebugIntrinsic, Instruction, MetadataGraph, NodeId, Program};
use rustc_hash::FxHashSet;

use crate::config::FinderConfig;
use crate::elements::{DiImportedEntity, DiTemplateTypeParameter, DiTemplateValueParameter};
use crate::identifier_map::IdentifierMap;
use crate::kind::NodeKind;
use crate::node::{AnnotatedNode, DescriptorView};
use crate::scope::{DiCompileUnit, DiScope, DiSubprogram};
use crate::stack::ensure_sufficient_stack;
use crate::types::{DiCompositeType, DiDerivedType, DiType, TypeLike};
use crate::variable::{DiGlobalVariable, DiLocation, DiVariable};

/// Nodes already handled, per category.
#[derive(Default)]
struct Visited {
    compile_units: FxHashSet<NodeId>,
    subprograms: FxHashSet<NodeId>,
    global_variables: FxHashSet<NodeId>,
    types: FxHashSet<NodeId>,
    scopes: FxHashSet<NodeId>,
    /// Variables reached through `dbg.declare` / `dbg.value`.
    variables: FxHashSet<NodeId>,
    locations: FxHashSet<NodeId>,
    /// Lexical blocks already climbed through.
    lexical_blocks: FxHashSet<NodeId>,
}

impl Visited {
    fn clear(&mut self) {
        self.compile_units.clear();
        self.subprograms.clear();
        self.global_variables.clear();
        self.types.clear();
        self.scopes.clear();
        self.variables.clear();
        self.locations.clear();
        self.lexical_blocks.clear();
    }
}

/// Push `id` unless already seen.
fn record(list: &mut Vec<NodeId>, seen: &mut FxHashSet<NodeId>, id: NodeId) -> bool {
    if !seen.insert(id) {
        return false;
    }
    list.push(id);
    true
}

/// Collects the debug-info nodes used by a program.
///
/// One instance walks one program at a time; call [`reset`](Self::reset)
/// before reusing it on another.
#[derive(Default)]
pub struct Finder {
    config: FinderConfig,
    compile_units: Vec<NodeId>,
    subprograms: Vec<NodeId>,
    global_variables: Vec<NodeId>,
    types: Vec<NodeId>,
    scopes: Vec<NodeId>,
    visited: Visited,
    type_map: IdentifierMap,
    map_built: bool,
}

impl Finder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FinderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> FinderConfig {
        self.config
    }

    /// Walk everything reachable from the program's compile units.
    ///
    /// Calling this again without [`reset`](Self::reset) adds nothing for
    /// nodes already recorded.
    pub fn process_module(&mut self, program: &Program) {
        self.ensure_type_map(program);
        let graph = program.graph();
        tracing::debug!(
            compile_units = program.compile_units().len(),
            "processing module"
        );

        for &cu in program.compile_units() {
            let cu = DiCompileUnit::wrap(AnnotatedNode::new(graph, cu));
            self.add_compile_unit(cu);

            for element in cu.subprograms().iter() {
                self.process_subprogram(DiSubprogram::wrap(element));
            }

            for element in cu.global_variables().iter() {
                let global = DiGlobalVariable::wrap(element);
                if self.add_global_variable(global) {
                    self.process_scope(global.context());
                    let ty: DiType<'_> = global.type_ref().resolve(&self.type_map);
                    self.process_type(ty);
                }
            }

            if self.config.walk_enum_types {
                for element in cu.enum_types().iter() {
                    self.process_type(DiType::wrap(element));
                }
            }

            for element in cu.retained_types().iter() {
                self.process_type(DiType::wrap(element));
            }

            for element in cu.imported_entities().iter() {
                self.process_imported_entity(DiImportedEntity::wrap(element));
            }
        }

        tracing::debug!(
            compile_units = self.compile_units.len(),
            subprograms = self.subprograms.len(),
            global_variables = self.global_variables.len(),
            types = self.types.len(),
            scopes = self.scopes.len(),
            "module processed"
        );
    }

    /// Walk the variable of a `dbg.declare` instruction.
    ///
    /// Instructions that are not a declare are ignored.
    pub fn process_declare(&mut self, program: &Program, instruction: &Instruction) {
        if let Some(DebugIntrinsic::Declare { variable }) = instruction.intrinsic {
            self.ensure_type_map(program);
            self.process_variable(program.graph(), variable);
        }
    }

    /// Walk the variable of a `dbg.value` instruction.
    ///
    /// Instructions that are not a value are ignored.
    pub fn process_value(&mut self, program: &Program, instruction: &Instruction) {
        if let Some(DebugIntrinsic::Value { variable, .. }) = instruction.intrinsic {
            self.ensure_type_map(program);
            self.process_variable(program.graph(), variable);
        }
    }

    /// Walk a location's scope and the chain of call sites it was inlined
    /// through.
    pub fn process_location(&mut self, program: &Program, location: DiLocation<'_>) {
        if location.is_null() {
            return;
        }
        self.ensure_type_map(program);

        let mut current = location;
        while let Some(id) = current.id() {
            if !current.is_valid() || !self.visited.locations.insert(id) {
                break;
            }
            self.process_scope(current.scope());
            current = current.inlined_at();
        }
    }

    /// Walk every instruction attachment in the program.
    pub fn process_instructions(&mut self, program: &Program) {
        let graph = program.graph();
        for instruction in program.instructions() {
            match instruction.intrinsic {
                Some(DebugIntrinsic::Declare { .. }) => self.process_declare(program, instruction),
                Some(DebugIntrinsic::Value { .. }) => self.process_value(program, instruction),
                None => {}
            }
            if let Some(location) = instruction.location {
                let location = DiLocation::wrap(AnnotatedNode::new(graph, location));
                self.process_location(program, location);
            }
        }
    }

    /// Forget everything, including the identifier map.
    pub fn reset(&mut self) {
        self.compile_units.clear();
        self.subprograms.clear();
        self.global_variables.clear();
        self.types.clear();
        self.scopes.clear();
        self.visited.clear();
        self.type_map.clear();
        self.map_built = false;
    }

    // -- Results --

    pub fn compile_units(&self) -> &[NodeId] {
        &self.compile_units
    }

    pub fn subprograms(&self) -> &[NodeId] {
        &self.subprograms
    }

    pub fn global_variables(&self) -> &[NodeId] {
        &self.global_variables
    }

    pub fn types(&self) -> &[NodeId] {
        &self.types
    }

    pub fn scopes(&self) -> &[NodeId] {
        &self.scopes
    }

    pub fn compile_unit_count(&self) -> usize {
        self.compile_units.len()
    }

    pub fn subprogram_count(&self) -> usize {
        self.subprograms.len()
    }

    pub fn global_variable_count(&self) -> usize {
        self.global_variables.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Recorded compile units as views into `graph`.
    pub fn iter_compile_units<'a>(
        &'a self,
        graph: &'a MetadataGraph,
    ) -> impl Iterator<Item = DiCompileUnit<'a>> + 'a {
        views(graph, &self.compile_units)
    }

    pub fn iter_subprograms<'a>(
        &'a self,
        graph: &'a MetadataGraph,
    ) -> impl Iterator<Item = DiSubprogram<'a>> + 'a {
        views(graph, &self.subprograms)
    }

    pub fn iter_global_variables<'a>(
        &'a self,
        graph: &'a MetadataGraph,
    ) -> impl Iterator<Item = DiGlobalVariable<'a>> + 'a {
        views(graph, &self.global_variables)
    }

    pub fn iter_types<'a>(
        &'a self,
        graph: &'a MetadataGraph,
    ) -> impl Iterator<Item = DiType<'a>> + 'a {
        views(graph, &self.types)
    }

    pub fn iter_scopes<'a>(
        &'a self,
        graph: &'a MetadataGraph,
    ) -> impl Iterator<Item = DiScope<'a>> + 'a {
        views(graph, &self.scopes)
    }

    /// The identifier map, once built.
    pub fn type_map(&self) -> Option<&IdentifierMap> {
        self.map_built.then_some(&self.type_map)
    }

    // -- Walk --

    fn ensure_type_map(&mut self, program: &Program) {
        if self.map_built {
            return;
        }
        self.type_map = IdentifierMap::from_program(program, self.config.identifier_policy);
        self.map_built = true;
    }

    fn process_variable(&mut self, graph: &MetadataGraph, variable: Option<NodeId>) {
        let Some(id) = variable else {
            return;
        };
        let variable = DiVariable::wrap(AnnotatedNode::new(graph, id));
        if !variable.is_valid() || !self.visited.variables.insert(id) {
            return;
        }
        self.process_scope(variable.context());
        let ty: DiType<'_> = variable.type_ref().resolve(&self.type_map);
        self.process_type(ty);
    }

    fn process_imported_entity(&mut self, import: DiImportedEntity<'_>) {
        if !import.is_valid() {
            return;
        }
        let context: DiScope<'_> = import.context().resolve(&self.type_map);
        self.process_scope(context);

        let entity: AnnotatedNode<'_> = import.entity().resolve(&self.type_map);
        if entity.is_type() {
            self.process_type(DiType::wrap(entity));
        } else if entity.is_subprogram() {
            self.process_subprogram(DiSubprogram::wrap(entity));
        } else {
            self.process_scope(DiScope::wrap(entity));
        }
    }

    fn process_subprogram(&mut self, subprogram: DiSubprogram<'_>) {
        ensure_sufficient_stack(|| {
            if !self.add_subprogram(subprogram) {
                return;
            }
            let context: DiScope<'_> = subprogram.context().resolve(&self.type_map);
            self.process_scope(context);
            self.process_type(subprogram.signature().as_type());

            for element in subprogram.variables().iter() {
                let variable = DiVariable::wrap(element);
                if !variable.is_valid() {
                    continue;
                }
                let ty: DiType<'_> = variable.type_ref().resolve(&self.type_map);
                self.process_type(ty);
                self.process_scope(variable.context());
            }

            for element in subprogram.template_params().iter() {
                let (context, ty) = if element.is_template_type_parameter() {
                    let param = DiTemplateTypeParameter::wrap(element);
                    (param.context(), param.type_ref())
                } else if element.is_template_value_parameter() {
                    let param = DiTemplateValueParameter::wrap(element);
                    (param.context(), param.type_ref())
                } else {
                    continue;
                };
                let context: DiScope<'_> = context.resolve(&self.type_map);
                self.process_scope(context);
                let ty: DiType<'_> = ty.resolve(&self.type_map);
                self.process_type(ty);
            }
        });
    }

    fn process_type(&mut self, ty: DiType<'_>) {
        ensure_sufficient_stack(|| {
            if !self.add_type(ty) {
                return;
            }
            let context: DiScope<'_> = ty.context().resolve(&self.type_map);
            self.process_scope(context);

            let node = ty.node();
            if node.is_composite_type() {
                let composite = DiCompositeType::wrap(node);
                let base: DiType<'_> = composite.derived_from().resolve(&self.type_map);
                self.process_type(base);
                for element in composite.type_array().iter() {
                    if element.is_type() {
                        self.process_type(DiType::wrap(element));
                    } else if element.is_subprogram() {
                        self.process_subprogram(DiSubprogram::wrap(element));
                    }
                }
            } else if node.is_derived_type() {
                let base: DiType<'_> = DiDerivedType::wrap(node)
                    .derived_from()
                    .resolve(&self.type_map);
                self.process_type(base);
            }
        });
    }

    fn process_scope(&mut self, scope: DiScope<'_>) {
        ensure_sufficient_stack(|| {
            let Some(scope) = self.climb_lexical_blocks(scope) else {
                return;
            };
            let node = scope.node();
            if node.is_type() {
                self.process_type(DiType::wrap(node));
                return;
            }
            if !self.add_scope(scope) {
                return;
            }
            match node.kind() {
                Some(NodeKind::NameSpace) => {
                    let context: DiScope<'_> = scope.context().resolve(&self.type_map);
                    self.process_scope(context);
                }
                Some(NodeKind::Subprogram) => self.process_subprogram(DiSubprogram::wrap(node)),
                Some(NodeKind::CompileUnit) => {
                    self.add_compile_unit(DiCompileUnit::wrap(node));
                }
                _ => {}
            }
        });
    }

    /// Follow lexical blocks out to the first non-lexical scope.
    ///
    /// Returns `None` for a null scope, or when the chain reaches a block
    /// already climbed (its enclosing scope has been handled).
    fn climb_lexical_blocks<'g>(&mut self, scope: DiScope<'g>) -> Option<DiScope<'g>> {
        let mut current = scope;
        loop {
            let node = current.node();
            let id = node.id()?;
            if !node.kind().is_some_and(NodeKind::is_lexical) {
                return Some(current);
            }
            if !self.visited.lexical_blocks.insert(id) {
                return None;
            }
            current = current.context().resolve(&self.type_map);
        }
    }

    // -- Recording --

    fn add_compile_unit(&mut self, cu: DiCompileUnit<'_>) -> bool {
        match cu.id() {
            Some(id) if cu.is_valid() => {
                record(&mut self.compile_units, &mut self.visited.compile_units, id)
            }
            _ => false,
        }
    }

    fn add_global_variable(&mut self, global: DiGlobalVariable<'_>) -> bool {
        match global.id() {
            Some(id) if global.is_valid() => record(
                &mut self.global_variables,
                &mut self.visited.global_variables,
                id,
            ),
            _ => false,
        }
    }

    fn add_subprogram(&mut self, subprogram: DiSubprogram<'_>) -> bool {
        match subprogram.id() {
            Some(id) if subprogram.is_valid() => {
                record(&mut self.subprograms, &mut self.visited.subprograms, id)
            }
            _ => false,
        }
    }

    fn add_type(&mut self, ty: DiType<'_>) -> bool {
        let added = match ty.id() {
            Some(id) if ty.is_valid() => record(&mut self.types, &mut self.visited.types, id),
            _ => false,
        };
        if added {
            tracing::trace!(ty = %ty.node(), "type");
        }
        added
    }

    fn add_scope(&mut self, scope: DiScope<'_>) -> bool {
        match scope.id() {
            Some(id) if scope.is_valid() => record(&mut self.scopes, &mut self.visited.scopes, id),
            _ => false,
        }
    }
}

fn views<'a, T>(graph: &'a MetadataGraph, ids: &'a [NodeId]) -> impl Iterator<Item = T> + 'a
where
    T: DescriptorView<'a> + 'a,
{
    ids.iter()
        .map(move |&id| T::wrap(AnnotatedNode::new(graph, id)))
}
