#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use errfix_ir::StringInterner;
use pretty_assertions::assert_eq;

fn var(pos: u32) -> Symbol {
    Symbol::new(SymbolKind::Var, Idx::INT, pos)
}

#[test]
fn test_lookup_walks_parents() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut tree = ScopeTree::new();
    let pkg = tree.push(tree.universe(), ScopeKind::Package, Span::DUMMY);
    let func = tree.push(pkg, ScopeKind::Func, Span::new(10, 100));
    let block = tree.push(func, ScopeKind::Block, Span::new(20, 80));

    tree.insert(pkg, x, Symbol::new(SymbolKind::Var, Idx::STRING, 500));
    let (scope, sym) = tree.lookup_parent(block, x, 30).unwrap();
    assert_eq!(scope, pkg);
    assert_eq!(sym.ty, Idx::STRING);
}

#[test]
fn test_local_is_invisible_before_its_declaration() {
    let interner = StringInterner::new();
    let err = interner.intern("err");
    let mut tree = ScopeTree::new();
    let func = tree.push(tree.universe(), ScopeKind::Func, Span::new(0, 100));
    let inner = tree.push(func, ScopeKind::Block, Span::new(5, 20));

    // `x, err := f()` ending at 40
    tree.insert(func, err, var(40));

    assert!(tree.lookup_parent(inner, err, 10).is_none());
    assert!(tree.lookup_parent(func, err, 39).is_none());
    assert_eq!(tree.lookup_parent(func, err, 40).map(|(s, _)| s), Some(func));
}

#[test]
fn test_shadowing_prefers_innermost() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut tree = ScopeTree::new();
    let func = tree.push(tree.universe(), ScopeKind::Func, Span::new(0, 100));
    let block = tree.push(func, ScopeKind::Block, Span::new(10, 50));
    tree.insert(func, x, var(5));
    tree.insert(block, x, Symbol::new(SymbolKind::Var, Idx::BOOL, 15));

    assert_eq!(tree.lookup_parent(block, x, 20).unwrap().1.ty, Idx::BOOL);
    // before the inner declaration the outer one is visible
    assert_eq!(tree.lookup_parent(block, x, 12).unwrap().1.ty, Idx::INT);
}

#[test]
fn test_insert_keeps_first_declaration() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut tree = ScopeTree::new();
    let func = tree.push(tree.universe(), ScopeKind::Func, Span::DUMMY);
    assert_eq!(tree.insert(func, x, var(1)), None);
    assert_eq!(tree.insert(func, x, var(9)), Some(var(1)));
    tree.set_type(func, x, Idx::FLOAT64);
    assert_eq!(tree.lookup_local(func, x).unwrap().ty, Idx::FLOAT64);
}

#[test]
fn test_is_ancestor() {
    let mut tree = ScopeTree::new();
    let a = tree.push(tree.universe(), ScopeKind::Package, Span::DUMMY);
    let b = tree.push(a, ScopeKind::Func, Span::DUMMY);
    let c = tree.push(b, ScopeKind::Block, Span::DUMMY);
    assert!(tree.is_ancestor(b, c));
    assert!(tree.is_ancestor(c, c));
    assert!(!tree.is_ancestor(c, b));
}
