//! Method sets and selector lookup.

use errfix_ir::Name;
use rustc_hash::FxHashSet;

use super::Pool;
use crate::data::TypeData;
use crate::Idx;

/// Embedded fields are searched at most this deep.
const MAX_EMBED_DEPTH: usize = 6;

/// What a selector `x.name` resolves to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Member {
    Field(Idx),
    /// Method value; the type is the method's function type.
    Method(Idx),
}

impl Member {
    pub fn ty(self) -> Idx {
        match self {
            Member::Field(ty) | Member::Method(ty) => ty,
        }
    }
}

impl Pool {
    /// Methods of `ty` as a value of that type: interface methods
    /// (embedded included), value-receiver methods of a named type, and
    /// every method of `*T` for a pointer to a named type. Methods promoted
    /// through embedded struct fields are included.
    pub fn method_set(&self, ty: Idx) -> Vec<(Name, Idx)> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        self.collect_methods(ty, false, 0, &mut seen, &mut out);
        out
    }

    fn collect_methods(
        &self,
        ty: Idx,
        via_pointer: bool,
        depth: usize,
        seen: &mut FxHashSet<Idx>,
        out: &mut Vec<(Name, Idx)>,
    ) {
        if depth > MAX_EMBED_DEPTH || ty.is_invalid() || !seen.insert(ty) {
            return;
        }
        let push = |out: &mut Vec<(Name, Idx)>, name: Name, sig: Idx| {
            if !out.iter().any(|(n, _)| *n == name) {
                out.push((name, sig));
            }
        };

        if let Some(TypeData::Pointer(elem)) = self.get(ty) {
            if self.named(*elem).is_some() && !self.is_interface(*elem) {
                self.collect_methods(*elem, true, depth, seen, out);
            }
            return;
        }

        if let Some(named) = self.named(ty) {
            for method in &named.methods {
                if via_pointer || !method.pointer_recv {
                    push(out, method.name, method.sig);
                }
            }
        }

        match self.underlying_data(ty) {
            Some(TypeData::Interface(iface)) => {
                for &(name, sig) in iface.methods.iter() {
                    push(out, name, sig);
                }
                for &embedded in iface.embedded.iter() {
                    self.collect_methods(embedded, false, depth + 1, seen, out);
                }
            }
            Some(TypeData::Struct(fields)) => {
                for field in fields.iter().filter(|f| f.embedded) {
                    let (base, pointer) = match self.get(field.ty) {
                        Some(TypeData::Pointer(elem)) => (*elem, true),
                        _ => (field.ty, via_pointer),
                    };
                    self.collect_methods(base, pointer, depth + 1, seen, out);
                }
            }
            _ => {}
        }
    }

    /// Method `name` of `ty`, if its method set has one.
    pub fn lookup_method(&self, ty: Idx, name: Name) -> Option<Idx> {
        self.method_set(ty)
            .into_iter()
            .find_map(|(n, sig)| (n == name).then_some(sig))
    }

    /// Resolve `x.name` for a value of type `ty`. Addressable values may call
    /// pointer methods, so both receiver kinds are accepted here.
    pub fn lookup_member(&self, ty: Idx, name: Name) -> Option<Member> {
        let base = self.deref(ty);
        let mut seen = FxHashSet::default();
        self.lookup_member_in(base, name, 0, &mut seen)
    }

    fn lookup_member_in(
        &self,
        ty: Idx,
        name: Name,
        depth: usize,
        seen: &mut FxHashSet<Idx>,
    ) -> Option<Member> {
        if depth > MAX_EMBED_DEPTH || ty.is_invalid() || !seen.insert(ty) {
            return None;
        }
        if let Some(named) = self.named(ty) {
            if let Some(method) = named.methods.iter().find(|m| m.name == name) {
                return Some(Member::Method(method.sig));
            }
        }
        match self.underlying_data(ty)? {
            TypeData::Interface(_) => self.lookup_method(ty, name).map(Member::Method),
            TypeData::Struct(fields) => {
                if let Some(field) = fields.iter().find(|f| f.name == name) {
                    return Some(Member::Field(field.ty));
                }
                fields
                    .iter()
                    .filter(|f| f.embedded)
                    .find_map(|f| self.lookup_member_in(self.deref(f.ty), name, depth + 1, seen))
            }
            _ => None,
        }
    }
}
