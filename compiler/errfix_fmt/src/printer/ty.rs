//! Type syntax.

use errfix_ir::ast::{ChanDir, Field, FieldList, InterfaceElem, TypeExprKind};
use errfix_ir::{Span, TypeExprId};

use super::{FmtResult, Printer};

impl Printer<'_> {
    pub(super) fn strip_type_parens(&self, mut id: TypeExprId) -> FmtResult<TypeExprId> {
        while let TypeExprKind::Paren(inner) = self.type_node(id)?.kind {
            id = inner;
        }
        Ok(id)
    }

    pub(super) fn ty(&mut self, id: TypeExprId) -> FmtResult {
        errfix_stack::ensure_sufficient_stack(|| self.ty_inner(id))
    }

    fn ty_inner(&mut self, id: TypeExprId) -> FmtResult {
        let ty = self.type_node(id)?;
        match &ty.kind {
            TypeExprKind::Name(name) => self.write_name(*name),
            TypeExprKind::Qualified { pkg, name } => {
                self.write_name(*pkg);
                self.ctx.write(".");
                self.write_name(*name);
            }
            TypeExprKind::Pointer(elem) => {
                self.ctx.write("*");
                self.ty(*elem)?;
            }
            TypeExprKind::Slice(elem) => {
                self.ctx.write("[]");
                self.ty(*elem)?;
            }
            TypeExprKind::Array { len, elem } => {
                self.ctx.write("[");
                match len {
                    Some(len) => self.expr(*len)?,
                    None => self.ctx.write("..."),
                }
                self.ctx.write("]");
                self.ty(*elem)?;
            }
            TypeExprKind::Map { key, value } => {
                self.ctx.write("map[");
                self.ty(*key)?;
                self.ctx.write("]");
                self.ty(*value)?;
            }
            TypeExprKind::Chan { dir, elem } => {
                self.ctx.write(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.ty(*elem)?;
            }
            TypeExprKind::Func(sig) => {
                self.ctx.write("func");
                self.signature(sig)?;
            }
            TypeExprKind::Struct(fields) => self.struct_type(fields)?,
            TypeExprKind::Interface { elems, span } => self.interface_type(elems, *span)?,
            TypeExprKind::Ellipsis(elem) => {
                self.ctx.write("...");
                self.ty(*elem)?;
            }
            TypeExprKind::Paren(inner) => {
                self.ctx.write("(");
                self.ty(*inner)?;
                self.ctx.write(")");
            }
        }
        Ok(())
    }

    /// A struct or interface written on one source line with at most one
    /// member and no comments stays on one line.
    fn fits_one_line(&self, span: Span, members: usize) -> bool {
        if span.is_dummy() {
            return members == 0;
        }
        members <= 1
            && !self.spans_lines(Span::new(span.start, span.end.saturating_sub(1)))
            && !self.comments.any_within(span.start, span.end)
    }

    fn struct_type(&mut self, list: &FieldList) -> FmtResult {
        let span = list.span;
        self.ctx.write("struct");
        if self.fits_one_line(span, list.fields.len()) {
            match list.fields.first() {
                None => self.ctx.write("{}"),
                Some(field) => {
                    self.ctx.write("{ ");
                    self.field(field, false)?;
                    self.ctx.write(" }");
                }
            }
            return Ok(());
        }

        let real = !span.is_dummy();
        self.open_delim(" {", real.then_some(span.start));
        self.ctx.indent();
        let mut prev_span: Option<Span> = None;
        for field in &list.fields {
            if prev_span.is_some_and(|prev| self.spans_lines(prev)) {
                self.ctx.section_break();
            }
            self.break_before(field.span, 1);
            let extra = self.field(field, true)?;
            self.end_aligned_item(field.span, extra);
            prev_span = Some(field.span);
        }
        self.close_delim("}", real.then(|| span.end - 1));
        Ok(())
    }

    /// `names type tag` with cells between the parts when `aligned`.
    /// Returns the cells a trailing comment needs.
    fn field(&mut self, field: &Field, aligned: bool) -> FmtResult<usize> {
        let mut extra = 1;
        if field.names.is_empty() {
            extra = 2;
        } else {
            self.ident_list(&field.names);
            if aligned {
                self.ctx.cell();
            } else {
                self.ctx.space();
            }
        }
        self.ty(field.ty)?;
        if let Some(tag) = field.tag {
            if aligned {
                self.ctx.cell();
            } else {
                self.ctx.space();
            }
            let text = self.name(tag);
            self.ctx.write_verbatim(text);
            extra = 1;
        }
        Ok(extra)
    }

    fn interface_type(&mut self, elems: &[InterfaceElem], span: Span) -> FmtResult {
        self.ctx.write("interface");
        if self.fits_one_line(span, elems.len()) {
            match elems.first() {
                None => self.ctx.write("{}"),
                Some(elem) => {
                    self.ctx.write("{ ");
                    self.interface_elem(elem)?;
                    self.ctx.write(" }");
                }
            }
            return Ok(());
        }

        let real = !span.is_dummy();
        self.open_delim(" {", real.then_some(span.start));
        self.ctx.indent();
        for elem in elems {
            let elem_span = match elem {
                InterfaceElem::Method { name, sig } => name.span.merge(sig.span),
                InterfaceElem::Embedded(ty) => self.type_node(*ty)?.span,
            };
            self.break_before(elem_span, 1);
            self.interface_elem(elem)?;
            self.end_item(elem_span);
        }
        self.close_delim("}", real.then(|| span.end - 1));
        Ok(())
    }

    fn interface_elem(&mut self, elem: &InterfaceElem) -> FmtResult {
        match elem {
            InterfaceElem::Method { name, sig } => {
                self.write_name(name.name);
                self.signature(sig)
            }
            InterfaceElem::Embedded(ty) => self.ty(*ty),
        }
    }
}
