//! SymbolTable - hash-keyed storage of declared symbols.
//!
//! The binder registers every type, method and type parameter it resolved;
//! the cache pass then queries it read-only. The interesting queries are the
//! *enclosing chains*: the type parameters visible inside a nested type, and
//! the type parameters visible inside a local function or lambda nested in
//! generic methods.
//!
//! # Registration Order
//!
//! Containing declarations must be registered before the declarations nested
//! in them, and a type parameter's owner before the parameter itself.
//!
//! # Example
//!
//! ```
//! use delegate_cache_registry::SymbolTable;
//! use delegate_cache_core::{GenericOwner, TypeEntry};
//!
//! let mut symbols = SymbolTable::new();
//! let outer = symbols.register_type(TypeEntry::class("A")).unwrap();
//! let t = symbols.declare_type_param(GenericOwner::Type(outer), "T").unwrap();
//! let inner = symbols
//!     .register_type(TypeEntry::class("A.B").with_containing(outer))
//!     .unwrap();
//!
//! assert_eq!(symbols.type_params_in_scope(inner), vec![t]);
//! ```

use rustc_hash::FxHashMap;

use delegate_cache_core::{
    GenericOwner, MethodEntry, RegistrationError, TypeConstraint, TypeEntry, TypeHash,
    TypeParamEntry,
};

/// Storage for all declarations the binder resolved.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    types: FxHashMap<TypeHash, TypeEntry>,
    methods: FxHashMap<TypeHash, MethodEntry>,
    type_params: FxHashMap<TypeHash, TypeParamEntry>,
}

impl SymbolTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type. Its containing type, if any, must already be registered.
    pub fn register_type(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.type_hash;
        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType(entry.qualified_name));
        }
        if let Some(outer) = entry.containing_type
            && !self.types.contains_key(&outer)
        {
            return Err(RegistrationError::UnknownOwner(outer));
        }
        self.types.insert(hash, entry);
        Ok(hash)
    }

    /// Register a method. Its declaring type and enclosing method, if any,
    /// must already be registered.
    pub fn register_method(&mut self, entry: MethodEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.method_hash;
        if self.methods.contains_key(&hash) {
            return Err(RegistrationError::DuplicateMethod(entry.name));
        }
        if !self.types.contains_key(&entry.owner_type) {
            return Err(RegistrationError::UnknownOwner(entry.owner_type));
        }
        if let Some(outer) = entry.outer_method
            && !self.methods.contains_key(&outer)
        {
            return Err(RegistrationError::UnknownOwner(outer));
        }
        self.methods.insert(hash, entry);
        Ok(hash)
    }

    /// Register a type parameter and append it to its owner's parameter list.
    ///
    /// The entry's index must match the owner's current parameter count.
    pub fn register_type_param(
        &mut self,
        entry: TypeParamEntry,
    ) -> Result<TypeHash, RegistrationError> {
        let hash = entry.type_hash;
        if self.type_params.contains_key(&hash) {
            return Err(RegistrationError::DuplicateTypeParam {
                name: entry.name,
                owner: entry.owner.hash(),
            });
        }

        let owner_params = match entry.owner {
            GenericOwner::Type(owner) => self.types.get_mut(&owner).map(|t| &mut t.type_params),
            GenericOwner::Method(owner) => {
                self.methods.get_mut(&owner).map(|m| &mut m.type_params)
            }
        }
        .ok_or(RegistrationError::UnknownOwner(entry.owner.hash()))?;

        if owner_params.len() != entry.index {
            return Err(RegistrationError::TypeParamIndexMismatch {
                name: entry.name,
                owner: entry.owner.hash(),
                expected: owner_params.len(),
                got: entry.index,
            });
        }
        owner_params.push(hash);
        self.type_params.insert(hash, entry);
        Ok(hash)
    }

    /// Declare the next type parameter of `owner` without constraints.
    pub fn declare_type_param(
        &mut self,
        owner: GenericOwner,
        name: impl Into<String>,
    ) -> Result<TypeHash, RegistrationError> {
        let index = self.own_param_count(owner);
        self.register_type_param(TypeParamEntry::new(name, index, owner))
    }

    /// Add a constraint to an already registered type parameter.
    pub fn add_constraint(
        &mut self,
        param: TypeHash,
        constraint: TypeConstraint,
    ) -> Result<(), RegistrationError> {
        let entry = self
            .type_params
            .get_mut(&param)
            .ok_or(RegistrationError::UnknownOwner(param))?;
        entry.constraints.push(constraint);
        Ok(())
    }

    fn own_param_count(&self, owner: GenericOwner) -> usize {
        match owner {
            GenericOwner::Type(hash) => self.types.get(&hash).map_or(0, |t| t.type_params.len()),
            GenericOwner::Method(hash) => {
                self.methods.get(&hash).map_or(0, |m| m.type_params.len())
            }
        }
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by hash.
    pub fn get_type(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    /// Get a method by hash.
    pub fn get_method(&self, hash: TypeHash) -> Option<&MethodEntry> {
        self.methods.get(&hash)
    }

    /// Get a type parameter by hash.
    pub fn get_type_param(&self, hash: TypeHash) -> Option<&TypeParamEntry> {
        self.type_params.get(&hash)
    }

    /// Check if a type is registered.
    pub fn contains_type(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Check if a method is registered.
    pub fn contains_method(&self, hash: TypeHash) -> bool {
        self.methods.contains_key(&hash)
    }

    /// Number of registered types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of registered methods.
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    // ==========================================================================
    // Enclosing Chains
    // ==========================================================================

    /// The containing-type chain of `ty`, outermost first, ending with `ty`.
    ///
    /// Returns an empty chain for an unknown type.
    pub fn type_chain(&self, ty: TypeHash) -> Vec<TypeHash> {
        let mut chain = Vec::new();
        let mut current = self.types.get(&ty);
        while let Some(entry) = current {
            chain.push(entry.type_hash);
            current = entry.containing_type.and_then(|outer| self.types.get(&outer));
        }
        chain.reverse();
        chain
    }

    /// Every type parameter visible inside `ty`, outermost declaration first.
    pub fn type_params_in_scope(&self, ty: TypeHash) -> Vec<TypeHash> {
        self.type_chain(ty)
            .into_iter()
            .filter_map(|hash| self.types.get(&hash))
            .flat_map(|entry| entry.type_params.iter().copied())
            .collect()
    }

    /// The enclosing-method chain of `method`, outermost first, ending with
    /// `method`. Local functions and lambdas link to their outer method.
    pub fn method_chain(&self, method: TypeHash) -> Vec<TypeHash> {
        let mut chain = Vec::new();
        let mut current = self.methods.get(&method);
        while let Some(entry) = current {
            chain.push(entry.method_hash);
            current = entry.outer_method.and_then(|outer| self.methods.get(&outer));
        }
        chain.reverse();
        chain
    }

    /// Every method-level type parameter visible inside `method`, outermost
    /// declaration first.
    pub fn method_params_in_scope(&self, method: TypeHash) -> Vec<TypeHash> {
        self.method_chain(method)
            .into_iter()
            .filter_map(|hash| self.methods.get(&hash))
            .flat_map(|entry| entry.type_params.iter().copied())
            .collect()
    }

    /// Display name of a type, or its hash when unknown.
    pub fn type_name(&self, hash: TypeHash) -> String {
        self.types
            .get(&hash)
            .map(|t| t.qualified_name.clone())
            .unwrap_or_else(|| hash.to_string())
    }

    /// Display name of a method, or its hash when unknown.
    pub fn method_name(&self, hash: TypeHash) -> String {
        self.methods
            .get(&hash)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| hash.to_string())
    }

    /// Display name of a type parameter, or its hash when unknown.
    pub fn type_param_name(&self, hash: TypeHash) -> String {
        self.type_params
            .get(&hash)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| hash.to_string())
    }
}
