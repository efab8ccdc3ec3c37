//! Type representation stored in the pool.

use errfix_ir::ast::ChanDir;
use errfix_ir::Name;

use crate::Idx;

/// Predeclared basic kinds, in [`Idx`] order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedImag,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    pub(crate) const ALL: [BasicKind; 24] = [
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedRune,
        BasicKind::UntypedFloat,
        BasicKind::UntypedImag,
        BasicKind::UntypedString,
        BasicKind::UntypedNil,
    ];

    pub const fn is_bool(self) -> bool {
        matches!(self, BasicKind::Bool | BasicKind::UntypedBool)
    }

    pub const fn is_string(self) -> bool {
        matches!(self, BasicKind::String | BasicKind::UntypedString)
    }

    pub const fn is_numeric(self) -> bool {
        !self.is_bool() && !self.is_string() && !matches!(self, BasicKind::UntypedNil)
    }
}

/// A function signature without receiver.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FuncSig {
    pub params: Box<[Idx]>,
    pub results: Box<[Idx]>,
    /// The last parameter is `...T` (stored as `[]T`).
    pub variadic: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructField {
    pub name: Name,
    pub ty: Idx,
    pub embedded: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct InterfaceData {
    /// Explicit methods: name and function type.
    pub methods: Box<[(Name, Idx)]>,
    /// Embedded interfaces, resolved through the pool on demand.
    pub embedded: Box<[Idx]>,
}

/// Index of a named type in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamedId(pub(crate) u32);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Basic(BasicKind),
    Pointer(Idx),
    Slice(Idx),
    /// `len` is `None` when the length is not a literal.
    Array {
        len: Option<u64>,
        elem: Idx,
    },
    Map {
        key: Idx,
        value: Idx,
    },
    Chan {
        dir: ChanDir,
        elem: Idx,
    },
    Func(FuncSig),
    Struct(Box<[StructField]>),
    Interface(InterfaceData),
    /// Result list of a multi-value call.
    Tuple(Box<[Idx]>),
    Named(NamedId),
}

/// A method declared on a named type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Method {
    pub name: Name,
    /// Function type of the method without its receiver.
    pub sig: Idx,
    pub pointer_recv: bool,
}

/// A declared type: `type File struct { ... }`.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: Name,
    /// Import path of the declaring package; empty for `error`.
    pub pkg: Name,
    pub underlying: Idx,
    pub methods: Vec<Method>,
}
