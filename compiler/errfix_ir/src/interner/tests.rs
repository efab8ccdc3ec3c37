use super::*;

#[test]
fn test_intern_is_stable() {
    let interner = StringInterner::new();
    let a = interner.intern("readAll");
    let b = interner.intern("readAll");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "readAll");
}

#[test]
fn test_distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    assert_ne!(interner.intern("err"), interner.intern("errs"));
}

#[test]
fn test_empty_string_is_name_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_predeclared_names_already_present() {
    let interner = StringInterner::new();
    let before = interner.len();
    interner.intern("error");
    interner.intern("Fatalf");
    assert_eq!(interner.len(), before);
}

#[test]
fn test_interning_from_many_threads_agrees() {
    let interner = StringInterner::new();
    let names: Vec<Name> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let interner = &interner;
                scope.spawn(move || interner.intern(&format!("worker{}", i % 2)))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| panic!("thread panicked")))
            .collect()
    });
    assert!(names.iter().step_by(2).all(|n| *n == names[0]));
    assert!(names.iter().skip(1).step_by(2).all(|n| *n == names[1]));
    assert_ne!(names[0], names[1]);
    assert_eq!(interner.lookup(names[1]), "worker1");
}
