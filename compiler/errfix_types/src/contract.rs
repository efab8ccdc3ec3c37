//! The error capability contract.

use errfix_ir::{Name, StringInterner};

use crate::data::TypeData;
use crate::{Idx, Pool};

/// Decides whether a type satisfies Go's `error` interface, that is whether
/// its method set contains `Error() string`.
///
/// Built once per run and shared read-only by every rewrite.
#[derive(Copy, Clone, Debug)]
pub struct ErrorContract {
    error_method: Name,
}

impl ErrorContract {
    pub fn new(interner: &StringInterner) -> Self {
        ErrorContract {
            error_method: interner.intern("Error"),
        }
    }

    /// Unresolved types are never error-like.
    pub fn is_error_like(&self, pool: &Pool, ty: Idx) -> bool {
        if ty == Idx::ERROR {
            return true;
        }
        if ty.is_invalid() || ty.is_untyped() {
            return false;
        }
        let Some(sig) = pool.lookup_method(ty, self.error_method) else {
            return false;
        };
        matches!(
            pool.get(sig),
            Some(TypeData::Func(sig)) if sig.params.is_empty() && *sig.results == [Idx::STRING]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FuncSig, InterfaceData, Method, StructField};

    fn string_method(pool: &mut Pool) -> Idx {
        pool.func(FuncSig {
            params: Box::new([]),
            results: Box::new([Idx::STRING]),
            variadic: false,
        })
    }

    #[test]
    fn test_predeclared_error() {
        let interner = StringInterner::new();
        let pool = Pool::new(&interner);
        let contract = ErrorContract::new(&interner);
        assert!(contract.is_error_like(&pool, Idx::ERROR));
        assert!(!contract.is_error_like(&pool, Idx::STRING));
        assert!(!contract.is_error_like(&pool, Idx::ANY));
        assert!(!contract.is_error_like(&pool, Idx::INVALID));
        assert!(!contract.is_error_like(&pool, Idx::UNTYPED_NIL));
    }

    #[test]
    fn test_pointer_receiver_method() {
        let interner = StringInterner::new();
        let mut pool = Pool::new(&interner);
        let contract = ErrorContract::new(&interner);
        let sig = string_method(&mut pool);
        let my_err = pool.new_named(interner.intern("p"), interner.intern("MyErr"));
        let body = pool.intern(TypeData::Struct(Box::new([])));
        pool.set_underlying(my_err, body);
        pool.add_method(
            my_err,
            Method {
                name: interner.intern("Error"),
                sig,
                pointer_recv: true,
            },
        );
        let ptr = pool.pointer(my_err);
        assert!(contract.is_error_like(&pool, ptr));
        assert!(!contract.is_error_like(&pool, my_err));
    }

    #[test]
    fn test_value_receiver_and_embedding() {
        let interner = StringInterner::new();
        let mut pool = Pool::new(&interner);
        let contract = ErrorContract::new(&interner);
        let sig = string_method(&mut pool);
        let code = pool.new_named(interner.intern("p"), interner.intern("Code"));
        pool.set_underlying(code, Idx::INT);
        pool.add_method(
            code,
            Method {
                name: interner.intern("Error"),
                sig,
                pointer_recv: false,
            },
        );
        assert!(contract.is_error_like(&pool, code));
        let code_ptr = pool.pointer(code);
        assert!(contract.is_error_like(&pool, code_ptr));

        // struct { Code } promotes Error
        let wrapper = pool.new_named(interner.intern("p"), interner.intern("Wrapped"));
        let body = pool.intern(TypeData::Struct(Box::new([StructField {
            name: interner.intern("Code"),
            ty: code,
            embedded: true,
        }])));
        pool.set_underlying(wrapper, body);
        assert!(contract.is_error_like(&pool, wrapper));
    }

    #[test]
    fn test_interfaces() {
        let interner = StringInterner::new();
        let mut pool = Pool::new(&interner);
        let contract = ErrorContract::new(&interner);

        // interface { error; Timeout() bool }
        let timeout = pool.func(FuncSig {
            params: Box::new([]),
            results: Box::new([Idx::BOOL]),
            variadic: false,
        });
        let net_error = pool.intern(TypeData::Interface(InterfaceData {
            methods: Box::new([(interner.intern("Timeout"), timeout)]),
            embedded: Box::new([Idx::ERROR]),
        }));
        assert!(contract.is_error_like(&pool, net_error));

        // Error() with the wrong signature does not count
        let wrong = pool.func(FuncSig {
            params: Box::new([Idx::INT]),
            results: Box::new([Idx::STRING]),
            variadic: false,
        });
        let odd = pool.intern(TypeData::Interface(InterfaceData {
            methods: Box::new([(interner.intern("Error"), wrong)]),
            embedded: Box::new([]),
        }));
        assert!(!contract.is_error_like(&pool, odd));
    }
}
