//! Human-readable type rendering for logs and tests.

use errfix_ir::ast::ChanDir;
use errfix_ir::StringInterner;

use super::Pool;
use crate::data::TypeData;
use crate::Idx;

impl Pool {
    /// Go-like spelling of a type (`*os.File`, `(int, error)`).
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_type(idx, interner, &mut out, 0);
        out
    }

    fn write_type(&self, idx: Idx, interner: &StringInterner, out: &mut String, depth: usize) {
        if depth > 8 {
            out.push_str("...");
            return;
        }
        if let Some(name) = idx.name() {
            out.push_str(name);
            return;
        }
        let Some(data) = self.get(idx) else {
            out.push_str("<invalid>");
            return;
        };
        let list = |pool: &Pool, elems: &[Idx], out: &mut String| {
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                pool.write_type(*elem, interner, out, depth + 1);
            }
        };
        match data {
            TypeData::Basic(kind) => out.push_str(&format!("{kind:?}").to_lowercase()),
            TypeData::Pointer(elem) => {
                out.push('*');
                self.write_type(*elem, interner, out, depth + 1);
            }
            TypeData::Slice(elem) => {
                out.push_str("[]");
                self.write_type(*elem, interner, out, depth + 1);
            }
            TypeData::Array { len, elem } => {
                match len {
                    Some(n) => out.push_str(&format!("[{n}]")),
                    None => out.push_str("[?]"),
                }
                self.write_type(*elem, interner, out, depth + 1);
            }
            TypeData::Map { key, value } => {
                out.push_str("map[");
                self.write_type(*key, interner, out, depth + 1);
                out.push(']');
                self.write_type(*value, interner, out, depth + 1);
            }
            TypeData::Chan { dir, elem } => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_type(*elem, interner, out, depth + 1);
            }
            TypeData::Func(sig) => {
                out.push_str("func(");
                list(self, &sig.params, out);
                out.push(')');
                match &*sig.results {
                    [] => {}
                    [single] => {
                        out.push(' ');
                        self.write_type(*single, interner, out, depth + 1);
                    }
                    many => {
                        out.push_str(" (");
                        list(self, many, out);
                        out.push(')');
                    }
                }
            }
            TypeData::Struct(fields) => {
                out.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(interner.lookup(field.name));
                        out.push(' ');
                    }
                    self.write_type(field.ty, interner, out, depth + 1);
                }
                out.push('}');
            }
            TypeData::Interface(iface) => {
                if iface.methods.is_empty() && iface.embedded.is_empty() {
                    out.push_str("interface{}");
                } else {
                    out.push_str("interface{...}");
                }
            }
            TypeData::Tuple(elems) => {
                out.push('(');
                list(self, elems, out);
                out.push(')');
            }
            TypeData::Named(_) => {
                if let Some(named) = self.named(idx) {
                    let pkg = interner.lookup(named.pkg);
                    if !pkg.is_empty() {
                        out.push_str(pkg.rsplit('/').next().unwrap_or(pkg));
                        out.push('.');
                    }
                    out.push_str(interner.lookup(named.name));
                }
            }
        }
    }
}
