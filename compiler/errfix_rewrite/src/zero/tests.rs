#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_ir::ast::{Decl, ExprKind};
use errfix_ir::{SharedInterner, SourceFile, TypeExprId};
use errfix_types::{Idx, Program};
use pretty_assertions::assert_eq;

use super::{Zero, ZeroValues};

/// Result types of `f` in `src`, with their resolved types.
fn results(src: &str) -> (Program, SourceFile, Vec<(TypeExprId, Idx)>) {
    let interner = SharedInterner::new();
    let file = errfix_parse::parse(src, &interner).file.expect("parses");
    let mut program = Program::new(interner);
    let checked = program.check_package("example.com/p", &[&file]);
    let info = &checked.files[0];
    let (index, func) = file
        .decls
        .iter()
        .enumerate()
        .find_map(|(i, d)| match d {
            Decl::Func(func) if program.interner().lookup(func.name.name) == "f" => Some((i, func)),
            _ => None,
        })
        .expect("func f");
    let sig = info
        .routine(errfix_types::RoutineId::Decl(index))
        .map(|r| r.sig)
        .unwrap();
    let resolved = program.pool().signature(sig).unwrap().results.to_vec();
    let types = func.sig.result_types().into_iter().zip(resolved).collect();
    (program, file, types)
}

fn classify(src: &str) -> Vec<Zero> {
    let (program, file, types) = results(src);
    let zeros = ZeroValues::new(program.pool(), program.interner());
    types
        .into_iter()
        .map(|(ty, resolved)| zeros.classify(&file.arena, ty, resolved))
        .collect()
}

#[test]
fn test_basic_and_reference_types() {
    let zeros = classify(
        "package p\n\nfunc f() (string, bool, int, float64, rune, *int, []byte, map[string]int, chan int, func(), interface{}, error) {\n\tpanic(0)\n}\n",
    );
    assert_eq!(
        zeros,
        vec![
            Zero::EmptyString,
            Zero::False,
            Zero::Number,
            Zero::Number,
            Zero::Number,
            Zero::Nil,
            Zero::Nil,
            Zero::Nil,
            Zero::Nil,
            Zero::Nil,
            Zero::Nil,
            Zero::Nil,
        ]
    );
}

#[test]
fn test_named_types_use_their_underlying_type() {
    let zeros = classify(
        r#"package p

type Celsius float64
type Mode string
type Config struct{ Name string }
type Handler func()
type Grid [3]int

func f() (Celsius, Mode, Config, Handler, Grid, [2]string, error) {
	panic(0)
}
"#,
    );
    assert_eq!(
        zeros,
        vec![
            Zero::Number,
            Zero::EmptyString,
            Zero::Composite,
            Zero::Nil,
            Zero::Composite,
            Zero::Composite,
            Zero::Nil,
        ]
    );
}

#[test]
fn test_unresolved_names_are_assumed_aggregates() {
    let zeros = classify(
        "package p\n\nimport \"example.com/unknown\"\n\nfunc f() (unknown.Thing, Missing, error) {\n\tpanic(0)\n}\n",
    );
    assert_eq!(zeros, vec![Zero::Composite, Zero::Composite, Zero::Nil]);
}

#[test]
fn test_composite_reuses_declared_type() {
    let (program, mut file, types) = results(
        "package p\n\ntype Config struct{}\n\nfunc f() (Config, error) {\n\tpanic(0)\n}\n",
    );
    let zeros = ZeroValues::new(program.pool(), program.interner());
    let (ty, resolved) = types[0];
    let id = zeros.zero_value(&mut file.arena, ty, resolved);
    let ExprKind::Composite { ty: Some(lit_ty), elts, .. } = &file.arena.expr(id).kind else {
        panic!("expected composite literal");
    };
    assert!(elts.is_empty());
    assert!(matches!(file.arena.expr(*lit_ty).kind, ExprKind::Type(t) if t == ty));
    assert!(file.arena.expr(id).span.is_dummy());
}
