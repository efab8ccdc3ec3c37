#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::data::StructField;
use pretty_assertions::assert_eq;

fn sig(params: &[Idx], results: &[Idx]) -> FuncSig {
    FuncSig {
        params: params.into(),
        results: results.into(),
        variadic: false,
    }
}

#[test]
fn test_predeclared_layout() {
    let interner = StringInterner::new();
    let pool = Pool::new(&interner);
    assert_eq!(pool.get(Idx::INT), Some(&TypeData::Basic(BasicKind::Int)));
    assert_eq!(pool.get(Idx::STRING), Some(&TypeData::Basic(BasicKind::String)));
    assert_eq!(pool.get(Idx::UNIT), Some(&TypeData::Tuple(Box::new([]))));
    assert!(pool.is_interface(Idx::ANY));
    assert!(pool.is_interface(Idx::ERROR));
    assert_eq!(pool.len(), Idx::PREDECLARED_COUNT as usize + 2);
}

#[test]
fn test_structural_types_are_deduplicated() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let a = pool.slice(Idx::UINT8);
    let b = pool.slice(Idx::UINT8);
    assert_eq!(a, b);
    assert_ne!(pool.pointer(Idx::INT), pool.pointer(Idx::INT64));

    let m1 = pool.map(Idx::STRING, a);
    let m2 = pool.map(Idx::STRING, b);
    assert_eq!(m1, m2);
}

#[test]
fn test_named_types_are_distinct() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let pkg = interner.intern("app");
    let name = interner.intern("ID");
    let first = pool.new_named(pkg, name);
    let second = pool.new_named(pkg, name);
    assert_ne!(first, second);

    pool.set_underlying(first, Idx::INT);
    assert_eq!(pool.underlying(first), Idx::INT);
    assert_eq!(pool.basic(first), Some(BasicKind::Int));
    // not resolved yet
    assert_eq!(pool.underlying(second), Idx::INVALID);
}

#[test]
fn test_cyclic_named_types_stop() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let a = pool.new_named(Name::EMPTY, interner.intern("A"));
    let b = pool.new_named(Name::EMPTY, interner.intern("B"));
    pool.set_underlying(a, b);
    pool.set_underlying(b, a);
    assert_eq!(pool.underlying(a), Idx::INVALID);
}

#[test]
fn test_results_shapes() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    assert_eq!(pool.results(&[]), Idx::UNIT);
    assert_eq!(pool.results(&[Idx::INT]), Idx::INT);

    let pair = pool.results(&[Idx::INT, Idx::ERROR]);
    assert_eq!(pool.values(pair), vec![Idx::INT, Idx::ERROR]);
    assert_eq!(pool.values(Idx::UNIT), Vec::<Idx>::new());
    assert_eq!(pool.values(Idx::BOOL), vec![Idx::BOOL]);
}

#[test]
fn test_deref_and_signature() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let ptr = pool.pointer(Idx::STRING);
    assert_eq!(pool.deref(ptr), Idx::STRING);
    assert_eq!(pool.deref(Idx::STRING), Idx::STRING);

    let f = pool.func(sig(&[Idx::STRING], &[Idx::INT, Idx::ERROR]));
    let found = pool.signature(f).unwrap();
    assert_eq!(&*found.results, &[Idx::INT, Idx::ERROR]);
    assert!(pool.signature(Idx::INT).is_none());
}

#[test]
fn test_method_sets_respect_receivers() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let close = interner.intern("Close");
    let name = interner.intern("Name");
    let file = pool.new_named(interner.intern("os"), interner.intern("File"));
    let body = pool.intern(TypeData::Struct(Box::new([])));
    pool.set_underlying(file, body);

    let close_sig = pool.func(sig(&[], &[Idx::ERROR]));
    let name_sig = pool.func(sig(&[], &[Idx::STRING]));
    pool.add_method(
        file,
        Method {
            name: close,
            sig: close_sig,
            pointer_recv: true,
        },
    );
    pool.add_method(
        file,
        Method {
            name,
            sig: name_sig,
            pointer_recv: false,
        },
    );

    let value_set: Vec<Name> = pool.method_set(file).into_iter().map(|(n, _)| n).collect();
    assert_eq!(value_set, vec![name]);

    let ptr = pool.pointer(file);
    let ptr_set: Vec<Name> = pool.method_set(ptr).into_iter().map(|(n, _)| n).collect();
    assert_eq!(ptr_set, vec![close, name]);
    assert_eq!(pool.lookup_method(ptr, close), Some(close_sig));
}

#[test]
fn test_member_lookup_through_embedding() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let inner = pool.new_named(Name::EMPTY, interner.intern("Inner"));
    let count = interner.intern("Count");
    let inner_body = pool.intern(TypeData::Struct(Box::new([StructField {
        name: count,
        ty: Idx::INT,
        embedded: false,
    }])));
    pool.set_underlying(inner, inner_body);
    let reset = interner.intern("Reset");
    let reset_sig = pool.func(sig(&[], &[]));
    pool.add_method(
        inner,
        Method {
            name: reset,
            sig: reset_sig,
            pointer_recv: true,
        },
    );

    let inner_ptr = pool.pointer(inner);
    let outer_body = pool.intern(TypeData::Struct(Box::new([StructField {
        name: interner.intern("Inner"),
        ty: inner_ptr,
        embedded: true,
    }])));
    let outer = pool.new_named(Name::EMPTY, interner.intern("Outer"));
    pool.set_underlying(outer, outer_body);

    assert_eq!(pool.lookup_member(outer, count), Some(Member::Field(Idx::INT)));
    assert_eq!(pool.lookup_member(outer, reset), Some(Member::Method(reset_sig)));
    // promoted through `*Inner`, so the pointer method is in the value set
    assert_eq!(pool.lookup_method(outer, reset), Some(reset_sig));
    assert_eq!(pool.lookup_member(outer, interner.intern("Missing")), None);
}

#[test]
fn test_display() {
    let interner = StringInterner::new();
    let mut pool = Pool::new(&interner);
    let file = pool.new_named(interner.intern("os"), interner.intern("File"));
    let ptr = pool.pointer(file);
    let pair = pool.results(&[ptr, Idx::ERROR]);
    assert_eq!(pool.display(pair, &interner), "(*os.File, error)");

    let bytes = pool.slice(Idx::UINT8);
    let m = pool.map(Idx::STRING, bytes);
    assert_eq!(pool.display(m, &interner), "map[string][]uint8");
    assert_eq!(pool.display(Idx::INVALID, &interner), "<invalid>");
}
