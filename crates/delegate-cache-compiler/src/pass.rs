//! Delegate Cache Pass - cache method-group conversions in static cells.
//!
//! The pass consumes the binder's [`ConversionRequest`]s in source order and
//! decides, per site, whether the produced delegate can be stored in a
//! synthesized static field and reused.
//!
//! ## Pipeline
//!
//! ```text
//! ConversionRequest
//!        │
//!        ▼
//!   classify ──────────────► Uncached(reason) ──► Original(..)
//!        │ eligible
//!        ▼
//!   free_type_params ─┐
//!   resolve_scope     ├─ CacheError ─► Uncached(Fallback) ──► Original(..)
//!   registry lookup   │
//!   container/cell ───┘
//!        │
//!        ▼
//!   Cached { scope, cell } ──► Coalesce(LoadCell, StoreCell(CreateDelegate))
//! ```
//!
//! Placement errors never abort the pass: the site keeps its original
//! conversion and the error is recorded as the reason.

use delegate_cache_core::{CacheError, ConversionRequest, SiteId, TypeHash, TypeRef};
use delegate_cache_registry::SymbolTable;
use tracing::{debug, trace};

use crate::naming::{CellNameRequest, ContainerNameRequest, NameAllocator};
use crate::rewrite::{LoweredExpr, rewrite_cached, rewrite_uncached};
use crate::{
    CacheCell, CacheContainer, CacheKey, CacheOptions, CacheRegistry, CellId, CellRef,
    ContainerId, ContainerTypeParam, Eligibility, IneligibleReason, Placement, Scope,
    build_substitution_map, classify, free_type_params, reproduce_constraints, resolve_scope,
    substitute_type,
};

/// What the pass decided for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteDecision {
    /// The site reads through `cell`.
    Cached {
        /// Scope of the cell.
        scope: Scope,
        /// The cell.
        cell: CellId,
    },
    /// The site keeps its original conversion.
    Uncached(IneligibleReason),
}

impl SiteDecision {
    /// Whether the site is cached.
    pub fn is_cached(&self) -> bool {
        matches!(self, SiteDecision::Cached { .. })
    }

    /// Why the site is uncached, if it is.
    pub fn reason(&self) -> Option<&IneligibleReason> {
        match self {
            SiteDecision::Uncached(reason) => Some(reason),
            SiteDecision::Cached { .. } => None,
        }
    }
}

/// The rewrite of one conversion site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRewrite {
    /// The site.
    pub site: SiteId,
    /// Replacement expression.
    pub expr: LoweredExpr,
    /// The decision behind it.
    pub decision: SiteDecision,
}

/// Counters for one pass run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests seen.
    pub requests: usize,
    /// Sites rewritten to use a cell.
    pub cached: usize,
    /// Sites left unchanged, including fallbacks.
    pub uncached: usize,
    /// Cells allocated.
    pub cells: usize,
    /// Containers synthesized.
    pub containers: usize,
    /// Eligible sites that fell back after a placement error.
    pub fallbacks: usize,
}

/// Output of the pass: declarations for the emitter plus per-site rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachePlan {
    /// Synthesized containers, in creation order.
    pub containers: Vec<CacheContainer>,
    /// Cells, in allocation order.
    pub cells: Vec<CacheCell>,
    /// One rewrite per request, in request order.
    pub sites: Vec<SiteRewrite>,
    /// Counters.
    pub stats: CacheStats,
}

impl CachePlan {
    /// The rewrite of a site.
    pub fn site(&self, site: SiteId) -> Option<&SiteRewrite> {
        self.sites.iter().find(|s| s.site == site)
    }

    /// Get a container by id.
    pub fn container(&self, id: ContainerId) -> Option<&CacheContainer> {
        self.containers.get(id.0 as usize)
    }

    /// Get a cell by id.
    pub fn cell(&self, id: CellId) -> Option<&CacheCell> {
        self.cells.get(id.0 as usize)
    }

    /// The cell a site reads, if it is cached.
    pub fn cell_for(&self, site: SiteId) -> Option<&CacheCell> {
        match self.site(site)?.decision {
            SiteDecision::Cached { cell, .. } => self.cell(cell),
            SiteDecision::Uncached(_) => None,
        }
    }

    /// The container holding the cell a site reads, if it is cached.
    pub fn container_for(&self, site: SiteId) -> Option<&CacheContainer> {
        self.cell_for(site)
            .and_then(|cell| self.container(cell.container))
    }

    /// Cells of a container, in allocation order.
    pub fn cells_of(&self, container: ContainerId) -> impl Iterator<Item = &CacheCell> + '_ {
        self.container(container)
            .into_iter()
            .flat_map(|c| c.cells.iter())
            .filter_map(|id| self.cell(*id))
    }

    /// Containers serving `scope`.
    pub fn containers_in(&self, scope: Scope) -> impl Iterator<Item = &CacheContainer> + '_ {
        self.containers.iter().filter(move |c| c.scope == scope)
    }
}

/// The delegate cache pass for one compilation.
pub struct DelegateCachePass<'a> {
    symbols: &'a SymbolTable,
    options: CacheOptions,
    names: &'a mut dyn NameAllocator,
    registry: CacheRegistry,
    sites: Vec<SiteRewrite>,
    stats: CacheStats,
}

impl<'a> DelegateCachePass<'a> {
    /// Create a pass over `symbols`.
    pub fn new(
        symbols: &'a SymbolTable,
        options: CacheOptions,
        names: &'a mut dyn NameAllocator,
    ) -> Self {
        Self {
            symbols,
            options,
            names,
            registry: CacheRegistry::new(options.max_cells_per_container),
            sites: Vec::new(),
            stats: CacheStats::default(),
        }
    }

    /// Run the pass over all requests and return the plan.
    pub fn run<'r>(
        symbols: &'a SymbolTable,
        options: CacheOptions,
        names: &'a mut dyn NameAllocator,
        requests: impl IntoIterator<Item = &'r ConversionRequest>,
    ) -> CachePlan {
        let mut pass = Self::new(symbols, options, names);
        for request in requests {
            pass.rewrite(request);
        }
        pass.finish()
    }

    /// Decide and rewrite one conversion site.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn rewrite(&mut self, request: &ConversionRequest) -> SiteRewrite {
        self.stats.requests += 1;

        let rewrite = match classify(request, &self.options) {
            Eligibility::Eligible => match self.place(request) {
                Ok((scope, cell)) => {
                    debug!(
                        site = request.site.0,
                        ?scope,
                        cell = cell.cell.0,
                        "cached delegate conversion"
                    );
                    self.stats.cached += 1;
                    SiteRewrite {
                        site: request.site,
                        decision: SiteDecision::Cached {
                            scope,
                            cell: cell.cell,
                        },
                        expr: rewrite_cached(request, cell),
                    }
                }
                Err(err) => {
                    debug!(
                        site = request.site.0,
                        error = %err,
                        "delegate cache placement failed, keeping original conversion"
                    );
                    self.stats.fallbacks += 1;
                    self.uncached(request, IneligibleReason::Fallback(err))
                }
            },
            Eligibility::Ineligible(reason) => {
                trace!(site = request.site.0, %reason, "conversion not cached");
                self.uncached(request, reason)
            }
        };

        self.sites.push(rewrite.clone());
        rewrite
    }

    /// Finish the pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn finish(self) -> CachePlan {
        let (containers, cells) = self.registry.into_parts();
        let stats = CacheStats {
            cells: cells.len(),
            containers: containers.len(),
            ..self.stats
        };
        debug!(
            requests = stats.requests,
            cached = stats.cached,
            fallbacks = stats.fallbacks,
            containers = stats.containers,
            cells = stats.cells,
            "delegate cache pass finished"
        );
        CachePlan {
            containers,
            cells,
            sites: self.sites,
            stats,
        }
    }

    // ==========================================================================
    // Placement
    // ==========================================================================

    fn uncached(&mut self, request: &ConversionRequest, reason: IneligibleReason) -> SiteRewrite {
        self.stats.uncached += 1;
        SiteRewrite {
            site: request.site,
            expr: rewrite_uncached(request),
            decision: SiteDecision::Uncached(reason),
        }
    }

    fn place(&mut self, request: &ConversionRequest) -> Result<(Scope, CellRef), CacheError> {
        let key = CacheKey::for_request(request).ok_or_else(|| CacheError::Internal {
            message: "variable receiver reached cache placement".to_string(),
        })?;
        let free = free_type_params(request, self.symbols)?;
        let scope = resolve_scope(&free, request, self.symbols)?;
        trace!(site = request.site.0, ?free, ?scope, ?key, "resolved cache scope");

        let placement = Placement::new(scope, request, &free);
        let cell = match self.registry.find_cell(scope, &key) {
            Some(cell) => cell,
            None => self.allocate_cell(&placement, key, request)?,
        };

        Ok((
            scope,
            CellRef {
                cell,
                host_args: placement.host_args(self.symbols),
                own_args: placement.own_args(),
            },
        ))
    }

    fn allocate_cell(
        &mut self,
        placement: &Placement,
        key: CacheKey,
        request: &ConversionRequest,
    ) -> Result<CellId, CacheError> {
        let container = match self
            .registry
            .open_container(placement.scope, &placement.own_params)
        {
            Some(id) => id,
            None => self.create_container(placement, request)?,
        };

        let owner = self
            .registry
            .container(container)
            .ok_or_else(|| CacheError::Internal {
                message: format!("container #{} vanished", container.0),
            })?;
        let subst = build_substitution_map(&placement.own_params, &owner.param_refs())?;
        let field_type = substitute_type(&key.delegate_type, &subst);
        let index = owner.cells.len();

        let target_name = self.symbols.method_name(key.method.method);
        let name = self.names.cell_name(&CellNameRequest {
            container,
            index,
            target_name: &target_name,
        });
        trace!(container = container.0, %name, "allocated cache cell");

        Ok(self.registry.insert_cell(container, key, field_type, name))
    }

    /// Synthesize a container for `placement`. Constraints are reproduced
    /// before anything is registered, so a failure leaves no trace.
    fn create_container(
        &mut self,
        placement: &Placement,
        request: &ConversionRequest,
    ) -> Result<ContainerId, CacheError> {
        let id = self.registry.next_container_id();
        let synthetic = TypeHash::from_synthetic(u64::from(id.0));
        let own_hashes: Vec<TypeHash> = (0..placement.own_params.len())
            .map(|i| TypeHash::from_type_param(synthetic, i))
            .collect();
        let own_refs: Vec<TypeRef> = own_hashes.iter().copied().map(TypeRef::param).collect();
        let subst = build_substitution_map(&placement.own_params, &own_refs)?;
        let inherited = placement
            .host
            .map(|host| self.symbols.type_params_in_scope(host))
            .unwrap_or_default();

        let type_params = placement
            .own_params
            .iter()
            .zip(&own_hashes)
            .enumerate()
            .map(|(index, (&source, &type_hash))| {
                let entry = self
                    .symbols
                    .get_type_param(source)
                    .ok_or(CacheError::UnknownTypeParam {
                        hash: source,
                        span: request.span,
                    })?;
                let constraints = reproduce_constraints(
                    &entry.constraints,
                    &subst,
                    &inherited,
                    &entry.name,
                    request.span,
                )?;
                Ok(ContainerTypeParam {
                    name: entry.name.clone(),
                    type_hash,
                    source,
                    index,
                    constraints,
                })
            })
            .collect::<Result<Vec<_>, CacheError>>()?;

        let method_name = match placement.scope {
            Scope::Method(method) => Some(self.symbols.method_name(method)),
            Scope::Module | Scope::Type(_) => None,
        };
        let name = self.names.container_name(&ContainerNameRequest {
            scope: placement.scope,
            host: placement.host,
            method_name: method_name.as_deref(),
            split_index: self
                .registry
                .group_len(placement.scope, &placement.own_params),
            arity: type_params.len(),
        });
        debug!(
            container = id.0,
            %name,
            scope = ?placement.scope,
            arity = type_params.len(),
            "synthesized cache container"
        );

        Ok(self.registry.insert_container(CacheContainer {
            id,
            scope: placement.scope,
            name,
            host: placement.host,
            type_params,
            cells: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SequentialNames;
    use crate::test_support::World;
    use delegate_cache_core::{
        ContextFlags, ConversionSyntax, GenericOwner, MethodEntry, MethodRef, Receiver,
        TupleElement, TypeConstraint, TypeEntry,
    };

    fn run(w: &World, options: CacheOptions, requests: &[ConversionRequest]) -> CachePlan {
        let mut names = SequentialNames::new();
        DelegateCachePass::run(&w.symbols, options, &mut names, requests)
    }

    /// `C.Target<arg>` to `Func<arg>` in a field initializer of `C`.
    fn convert(w: &World, arg: TypeRef) -> ConversionRequest {
        ConversionRequest::new(SiteId(0), w.generic_target(arg.clone()), w.func_of(arg), w.c)
    }

    fn numbered(requests: Vec<ConversionRequest>) -> Vec<ConversionRequest> {
        requests
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.site = SiteId(i as u32);
                r
            })
            .collect()
    }

    #[test]
    fn implicit_and_cast_share_module_cell() {
        let w = World::new();
        let requests = numbered(vec![
            w.static_target_in(w.c, Some(w.c_main)),
            w.static_target_in(w.c, Some(w.c_main))
                .with_syntax(ConversionSyntax::Cast),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.stats.cached, 2);
        assert_eq!(plan.containers.len(), 1);
        assert_eq!(plan.cells.len(), 1);
        assert_eq!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(1)));
        assert_eq!(plan.containers[0].scope, Scope::Module);
        assert_eq!(plan.containers[0].host, None);
        assert!(!plan.containers[0].is_generic());
    }

    #[test]
    fn construction_and_quoted_are_left_alone() {
        let w = World::new();
        let requests = numbered(vec![
            w.static_target_in(w.c, Some(w.c_main))
                .with_syntax(ConversionSyntax::Construction),
            w.static_target_in(w.c, Some(w.c_main))
                .with_context(ContextFlags::QUOTED_EXPRESSION),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.stats.uncached, 2);
        assert!(plan.containers.is_empty());
        for (site, request) in plan.sites.iter().zip(&requests) {
            assert_eq!(site.expr, rewrite_uncached(request));
        }
        assert_eq!(
            plan.site(SiteId(0)).unwrap().decision.reason(),
            Some(&IneligibleReason::ExplicitConstruction)
        );
    }

    #[test]
    fn type_scoped_cell_in_generic_type() {
        let w = World::new();
        let requests = numbered(vec![
            ConversionRequest::new(
                SiteId(0),
                w.generic_target(TypeRef::param(w.box_t)),
                w.func_of(TypeRef::param(w.box_t)),
                w.boxed,
            )
            .in_method(w.box_test)
            .with_syntax(ConversionSyntax::Cast),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        let container = plan.container_for(SiteId(0)).unwrap();
        assert_eq!(container.scope, Scope::Type(w.boxed));
        assert_eq!(container.host, Some(w.boxed));
        assert_eq!(container.arity(), 0);

        let cell = plan.cell_for(SiteId(0)).unwrap();
        assert_eq!(cell.field_type, w.func_of(TypeRef::param(w.box_t)));

        let r = plan.sites[0].expr.cell_ref().unwrap();
        assert_eq!(r.host_args, vec![TypeRef::param(w.box_t)]);
        assert!(r.own_args.is_empty());
    }

    #[test]
    fn method_container_reproduces_constraints() {
        let w = World::new();
        let requests = vec![
            ConversionRequest::new(
                SiteId(0),
                w.generic_target(TypeRef::param(w.d_m)),
                w.func_of(TypeRef::param(w.d_m)),
                w.d,
            )
            .in_method(w.d_test),
        ];
        let plan = run(&w, CacheOptions::default(), &requests);

        let container = plan.container_for(SiteId(0)).unwrap();
        assert_eq!(container.scope, Scope::Method(w.d_test));
        assert_eq!(container.host, Some(w.d));
        assert_eq!(container.arity(), 1);

        let m = &container.type_params[0];
        assert_eq!(m.name, "M");
        assert_eq!(m.source, w.d_m);
        assert_eq!(
            m.constraints,
            vec![TypeConstraint::Type(TypeRef::param(w.d_t))]
        );

        let cell = plan.cell_for(SiteId(0)).unwrap();
        assert_eq!(cell.field_type, w.func_of(TypeRef::param(m.type_hash)));

        let r = plan.sites[0].expr.cell_ref().unwrap();
        assert_eq!(r.host_args, vec![TypeRef::param(w.d_t)]);
        assert_eq!(r.own_args, vec![TypeRef::param(w.d_m)]);
    }

    #[test]
    fn sibling_constraints_rewritten_into_container_space() {
        let w = World::new();
        let requests = vec![
            ConversionRequest::new(
                SiteId(0),
                w.generic_target(TypeRef::param(w.f_a)),
                w.func_of(TypeRef::param(w.f_a)),
                w.f,
            )
            .in_method(w.f_test),
        ];
        let plan = run(&w, CacheOptions::default(), &requests);

        let container = plan.container_for(SiteId(0)).unwrap();
        assert_eq!(container.sources(), vec![w.f_a, w.f_b]);
        let b = container.type_params[1].type_hash;
        assert_eq!(
            container.type_params[0].constraints,
            vec![TypeConstraint::Type(TypeRef::param(b))]
        );
        assert_eq!(
            container.type_params[1].constraints,
            vec![TypeConstraint::ReferenceType]
        );
    }

    #[test]
    fn distinct_pairs_get_distinct_cells() {
        let w = World::new();
        let int = TypeRef::named(w.int);
        let string = TypeRef::named(w.string);
        let requests = numbered(vec![
            convert(&w, int.clone()),
            convert(&w, string),
            convert(&w, int),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.cells.len(), 2);
        assert_ne!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(1)));
        assert_eq!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(2)));
    }

    #[test]
    fn annotations_share_a_cell() {
        let w = World::new();
        let named = TypeRef::tuple(vec![
            TupleElement::named(TypeRef::nullable(TypeRef::named(w.string)), "name"),
            TupleElement::named(TypeRef::Dynamic, "value"),
        ]);
        let plain = TypeRef::tuple(vec![
            TupleElement::new(TypeRef::named(w.string)),
            TupleElement::new(TypeRef::Object),
        ]);
        let requests = numbered(vec![convert(&w, named), convert(&w, plain.clone())]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.cells.len(), 1);
        assert_eq!(plan.cells[0].field_type, w.func_of(plain));
    }

    #[test]
    fn fixed_receivers_keyed_separately() {
        let w = World::new();
        let shared = Receiver::Fixed(TypeHash::from_name("C.Shared"));
        let requests = numbered(vec![
            w.static_target_in(w.c, None).with_receiver(shared),
            w.static_target_in(w.c, None).with_receiver(shared),
            w.static_target_in(w.c, None),
            w.static_target_in(w.c, None).with_receiver(Receiver::Variable),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.cells.len(), 2);
        assert_eq!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(1)));
        assert_ne!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(2)));
        assert_eq!(
            plan.site(SiteId(3)).unwrap().decision,
            SiteDecision::Uncached(IneligibleReason::VariableReceiver)
        );
    }

    #[test]
    fn capacity_splits_containers_deterministically() {
        let w = World::new();
        let requests = numbered(
            [w.int, w.string, w.action, w.int]
                .into_iter()
                .map(|t| convert(&w, TypeRef::named(t)))
                .collect(),
        );
        let options = CacheOptions::default().with_max_cells_per_container(2);
        let plan = run(&w, options, &requests);

        assert_eq!(plan.stats.cells, 3);
        assert_eq!(plan.stats.containers, 2);
        assert_eq!(plan.containers[0].cells.len(), 2);
        assert_eq!(plan.containers[1].cells.len(), 1);
        assert_eq!(plan.cell_for(SiteId(0)), plan.cell_for(SiteId(3)));
        assert_ne!(plan.containers[0].name, plan.containers[1].name);

        let again = run(&w, options, &requests);
        assert_eq!(plan, again);
    }

    #[test]
    fn out_of_scope_parameter_falls_back() {
        let w = World::new();
        let requests = vec![ConversionRequest::new(
            SiteId(0),
            w.generic_target(TypeRef::param(w.box_t)),
            w.func_of(TypeRef::param(w.box_t)),
            w.c,
        )];
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(plan.stats.fallbacks, 1);
        assert_eq!(plan.stats.uncached, 1);
        assert!(plan.containers.is_empty());
        assert!(matches!(
            plan.sites[0].decision,
            SiteDecision::Uncached(IneligibleReason::Fallback(
                CacheError::OutOfScopeTypeParam { .. }
            ))
        ));
        assert_eq!(plan.sites[0].expr, rewrite_uncached(&requests[0]));
    }

    #[test]
    fn unreproducible_constraint_falls_back_without_container() {
        let mut w = World::new();
        // G.Test<X> where X : Box.T, which G cannot see
        let g = w.symbols.register_type(TypeEntry::class("G")).unwrap();
        let g_test = w
            .symbols
            .register_method(MethodEntry::static_method(g, "Test"))
            .unwrap();
        let x = w
            .symbols
            .declare_type_param(GenericOwner::Method(g_test), "X")
            .unwrap();
        w.symbols
            .add_constraint(x, TypeConstraint::Type(TypeRef::param(w.box_t)))
            .unwrap();

        let requests = vec![
            ConversionRequest::new(
                SiteId(0),
                w.generic_target(TypeRef::param(x)),
                w.func_of(TypeRef::param(x)),
                g,
            )
            .in_method(g_test),
        ];
        let plan = run(&w, CacheOptions::default(), &requests);

        assert!(matches!(
            plan.sites[0].decision.reason(),
            Some(IneligibleReason::Fallback(
                CacheError::UnreproducibleConstraint { param, .. }
            )) if param == "X"
        ));
        assert!(plan.containers.is_empty());
        assert_eq!(plan.stats.fallbacks, 1);
    }

    #[test]
    fn disabled_creates_nothing() {
        let w = World::new();
        let requests = vec![w.static_target_in(w.c, Some(w.c_main))];
        let plan = run(&w, CacheOptions::disabled(), &requests);

        assert!(plan.containers.is_empty());
        assert_eq!(
            plan.sites[0].decision,
            SiteDecision::Uncached(IneligibleReason::Disabled)
        );
    }

    #[test]
    fn stats_add_up() {
        let w = World::new();
        let requests = numbered(vec![
            w.static_target_in(w.c, Some(w.c_main)),
            w.static_target_in(w.c, Some(w.c_main)),
            w.static_target_in(w.c, Some(w.c_main))
                .with_context(ContextFlags::OWN_TYPE_STATIC_INITIALIZER),
        ]);
        let plan = run(&w, CacheOptions::default(), &requests);

        assert_eq!(
            plan.stats,
            CacheStats {
                requests: 3,
                cached: 2,
                uncached: 1,
                cells: 1,
                containers: 1,
                fallbacks: 0,
            }
        );
    }

    #[test]
    fn incremental_rewrite_matches_run() {
        let w = World::new();
        let request = ConversionRequest::new(
            SiteId(7),
            MethodRef::new(w.c_target, TypeRef::named(w.c)),
            TypeRef::named(w.action),
            w.c,
        );

        let mut names = SequentialNames::new();
        let mut pass = DelegateCachePass::new(&w.symbols, CacheOptions::default(), &mut names);
        let rewrite = pass.rewrite(&request);
        let plan = pass.finish();

        assert_eq!(plan.sites, vec![rewrite]);
        assert_eq!(plan.cells_of(ContainerId(0)).count(), 1);
        assert_eq!(plan.containers_in(Scope::Module).count(), 1);
    }
}
