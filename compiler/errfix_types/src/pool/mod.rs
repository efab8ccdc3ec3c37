//! Type pool.
//!
//! Structural types are deduplicated, so equal structure means equal
//! [`Idx`]. Named types are identities: each declaration gets its own entry
//! and its underlying type is filled in once the declaration is resolved,
//! which lets recursive types refer to themselves.

mod format;
mod lookup;

pub use lookup::Member;

use errfix_ir::ast::ChanDir;
use errfix_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

use crate::data::{BasicKind, FuncSig, InterfaceData, Method, NamedId, NamedType, TypeData};
use crate::Idx;

/// Named types chained through `type A B` are followed at most this far.
const MAX_UNDERLYING_HOPS: usize = 32;

#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<TypeData>,
    map: FxHashMap<TypeData, Idx>,
    named: Vec<NamedType>,
}

impl Pool {
    /// Pool with every predeclared type at its fixed index.
    pub fn new(interner: &StringInterner) -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(256),
            map: FxHashMap::default(),
            named: Vec::new(),
        };
        for kind in BasicKind::ALL {
            pool.push(TypeData::Basic(kind));
        }
        let any = pool.push(TypeData::Interface(InterfaceData::default()));
        debug_assert_eq!(any, Idx::ANY);

        // `error` is `type error interface { Error() string }`.
        let error = pool.new_named(Name::EMPTY, interner.intern("error"));
        debug_assert_eq!(error, Idx::ERROR);
        let unit = pool.push(TypeData::Tuple(Box::new([])));
        debug_assert_eq!(unit, Idx::UNIT);

        let error_sig = pool.func(FuncSig {
            params: Box::new([]),
            results: Box::new([Idx::STRING]),
            variadic: false,
        });
        let iface = pool.intern(TypeData::Interface(InterfaceData {
            methods: Box::new([(interner.intern("Error"), error_sig)]),
            embedded: Box::new([]),
        }));
        pool.set_underlying(Idx::ERROR, iface);
        pool
    }

    fn push(&mut self, data: TypeData) -> Idx {
        let idx = Idx::from_raw(u32::try_from(self.items.len()).unwrap_or(u32::MAX - 1));
        if !matches!(data, TypeData::Named(_)) {
            self.map.insert(data.clone(), idx);
        }
        self.items.push(data);
        idx
    }

    /// Intern a structural type.
    pub fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.map.get(&data) {
            return idx;
        }
        self.push(data)
    }

    pub fn get(&self, idx: Idx) -> Option<&TypeData> {
        self.items.get(idx.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pointer(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::Pointer(elem))
    }

    pub fn slice(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::Slice(elem))
    }

    pub fn map(&mut self, key: Idx, value: Idx) -> Idx {
        self.intern(TypeData::Map { key, value })
    }

    pub fn chan(&mut self, dir: ChanDir, elem: Idx) -> Idx {
        self.intern(TypeData::Chan { dir, elem })
    }

    pub fn func(&mut self, sig: FuncSig) -> Idx {
        self.intern(TypeData::Func(sig))
    }

    /// Result type of a call: the single result, or a tuple.
    pub fn results(&mut self, results: &[Idx]) -> Idx {
        match results {
            [] => Idx::UNIT,
            [single] => *single,
            many => self.intern(TypeData::Tuple(many.into())),
        }
    }

    /// Declare a new named type; its underlying type starts out invalid.
    pub fn new_named(&mut self, pkg: Name, name: Name) -> Idx {
        let id = NamedId(u32::try_from(self.named.len()).unwrap_or(u32::MAX - 1));
        self.named.push(NamedType {
            name,
            pkg,
            underlying: Idx::INVALID,
            methods: Vec::new(),
        });
        self.push(TypeData::Named(id))
    }

    pub fn named(&self, idx: Idx) -> Option<&NamedType> {
        match self.get(idx)? {
            TypeData::Named(id) => self.named.get(id.0 as usize),
            _ => None,
        }
    }

    fn named_mut(&mut self, idx: Idx) -> Option<&mut NamedType> {
        match self.items.get(idx.index())? {
            TypeData::Named(id) => self.named.get_mut(id.0 as usize),
            _ => None,
        }
    }

    pub fn set_underlying(&mut self, named: Idx, underlying: Idx) {
        if let Some(named) = self.named_mut(named) {
            named.underlying = underlying;
        }
    }

    pub fn add_method(&mut self, named: Idx, method: Method) {
        if let Some(named) = self.named_mut(named) {
            named.methods.push(method);
        }
    }

    /// Strip named types down to their structural type. Returns
    /// [`Idx::INVALID`] for unresolved or cyclic declarations.
    pub fn underlying(&self, mut idx: Idx) -> Idx {
        for _ in 0..MAX_UNDERLYING_HOPS {
            match self.named(idx) {
                Some(named) => idx = named.underlying,
                None => return idx,
            }
        }
        Idx::INVALID
    }

    pub fn underlying_data(&self, idx: Idx) -> Option<&TypeData> {
        self.get(self.underlying(idx))
    }

    pub fn basic(&self, idx: Idx) -> Option<BasicKind> {
        match self.underlying_data(idx)? {
            TypeData::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// `*T` → `T`; anything else unchanged.
    pub fn deref(&self, idx: Idx) -> Idx {
        match self.underlying_data(idx) {
            Some(TypeData::Pointer(elem)) => *elem,
            _ => idx,
        }
    }

    /// Signature of a function-typed value.
    pub fn signature(&self, idx: Idx) -> Option<&FuncSig> {
        match self.underlying_data(idx)? {
            TypeData::Func(sig) => Some(sig),
            _ => None,
        }
    }

    /// Values produced by an expression of type `idx`: the tuple elements,
    /// nothing for [`Idx::UNIT`], or the type itself.
    pub fn values(&self, idx: Idx) -> Vec<Idx> {
        match self.get(idx) {
            Some(TypeData::Tuple(elems)) => elems.to_vec(),
            _ => vec![idx],
        }
    }

    pub fn is_interface(&self, idx: Idx) -> bool {
        matches!(self.underlying_data(idx), Some(TypeData::Interface(_)))
    }
}

#[cfg(test)]
mod tests;
