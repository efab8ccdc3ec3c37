//! File structure, declarations and function signatures.

use errfix_ir::ast::{
    Decl, DeclKeyword, Field, FieldList, FuncDecl, GenDecl, ImportDecl, ImportSpec, Signature,
    Spec, TypeSpec, ValueSpec,
};
use errfix_ir::{Block, BlockId, Span};

use super::{FmtResult, Printer};
use crate::context::MAX_LINE_WIDTH;

/// Declaration token; a change between neighbours forces a blank line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum DeclClass {
    Import,
    Var,
    Const,
    Type,
    Func,
}

impl DeclClass {
    fn of(decl: &Decl) -> Self {
        match decl {
            Decl::Func(_) => DeclClass::Func,
            Decl::Gen(gen) => match gen.keyword {
                DeclKeyword::Var => DeclClass::Var,
                DeclKeyword::Const => DeclClass::Const,
                DeclKeyword::Type => DeclClass::Type,
            },
        }
    }
}

/// For each spec of a grouped `var`/`const`, whether its type column is
/// kept even when empty: within a run of specs with values, the column
/// stays if any spec of the run has a type.
fn keep_type_column(specs: &[Spec]) -> Vec<bool> {
    let mut keep = vec![false; specs.len()];
    let mut run_start: Option<usize> = None;
    let mut keep_type = false;
    for (i, spec) in specs.iter().enumerate() {
        let Spec::Value(value) = spec else {
            continue;
        };
        if value.values.is_empty() {
            if let Some(start) = run_start.take() {
                if keep_type {
                    keep[start..i].fill(true);
                }
            }
        } else if run_start.is_none() {
            run_start = Some(i);
            keep_type = false;
        }
        if value.ty.is_some() {
            keep_type = true;
        }
    }
    if let Some(start) = run_start {
        if keep_type {
            keep[start..].fill(true);
        }
    }
    keep
}

impl Printer<'_> {
    pub(crate) fn print_file(&mut self) -> FmtResult {
        let file = self.file;
        self.break_before(file.package.span, 0);
        self.ctx.write("package ");
        self.write_name(file.package.name);
        self.end_item(file.package.span);

        let mut prev = None;
        for import in &file.imports {
            self.break_before(import.span, 2);
            self.import_decl(import);
            self.end_item(import.span);
            prev = Some(DeclClass::Import);
        }
        for decl in &file.decls {
            let class = DeclClass::of(decl);
            let span = decl.span();
            let documented = !span.is_dummy() && self.comments.any_within(0, span.start);
            let min = if prev != Some(class) || documented { 2 } else { 1 };
            if class == DeclClass::Func && self.spans_lines(span) {
                self.ctx.section_break();
            }
            self.break_before(span, min);
            match decl {
                Decl::Func(func) => self.func_decl(func)?,
                Decl::Gen(gen) => self.gen_decl(gen)?,
            }
            self.end_item(span);
            prev = Some(class);
        }
        self.flush_remaining_comments();
        Ok(())
    }

    fn import_decl(&mut self, decl: &ImportDecl) {
        self.ctx.write("import");
        if !decl.grouped && decl.specs.len() == 1 {
            self.ctx.space();
            self.import_spec(&decl.specs[0]);
            return;
        }
        if decl.specs.is_empty() {
            self.ctx.write(" ()");
            return;
        }
        let real = (!decl.span.is_dummy()).then_some(decl.span);
        self.open_delim(" (", real.map(|span| span.start));
        self.ctx.indent();
        for spec in &decl.specs {
            self.break_before(spec.span, 1);
            self.import_spec(spec);
            self.end_item(spec.span);
        }
        self.close_delim(")", real.map(|span| span.end - 1));
    }

    fn import_spec(&mut self, spec: &ImportSpec) {
        if let Some(name) = spec.name {
            self.write_name(name.name);
            self.ctx.space();
        }
        self.ctx.write("\"");
        self.write_name(spec.path);
        self.ctx.write("\"");
    }

    pub(super) fn gen_decl(&mut self, decl: &GenDecl) -> FmtResult {
        self.ctx.write(decl.keyword.as_str());
        if !decl.grouped && decl.specs.len() == 1 {
            self.ctx.space();
            return match &decl.specs[0] {
                Spec::Value(spec) => self.value_spec(spec, false, false).map(|_| ()),
                Spec::Type(spec) => self.type_spec(spec, false),
            };
        }
        if decl.specs.is_empty() {
            self.ctx.write(" ()");
            return Ok(());
        }

        let real = (!decl.span.is_dummy()).then_some(decl.span);
        self.open_delim(" (", real.map(|span| span.start));
        self.ctx.indent();
        let aligned = decl.specs.len() > 1;
        let keep_type = if aligned && decl.keyword != DeclKeyword::Type {
            keep_type_column(&decl.specs)
        } else {
            vec![false; decl.specs.len()]
        };
        let mut prev_span: Option<Span> = None;
        for (spec, keep) in decl.specs.iter().zip(keep_type) {
            let span = spec.span();
            if prev_span.is_some_and(|prev| self.spans_lines(prev)) {
                self.ctx.section_break();
            }
            self.break_before(span, 1);
            match spec {
                Spec::Value(value) if aligned => {
                    let extra = self.value_spec(value, true, keep)?;
                    self.end_aligned_item(span, extra);
                }
                Spec::Value(value) => {
                    self.value_spec(value, false, false)?;
                    self.end_item(span);
                }
                Spec::Type(ty) => {
                    self.type_spec(ty, aligned)?;
                    self.end_item(span);
                }
            }
            prev_span = Some(span);
        }
        self.close_delim(")", real.map(|span| span.end - 1));
        Ok(())
    }

    /// `names [type] [= values]`. In an aligned group the parts are
    /// separated by cells; returns the cells a trailing comment needs to
    /// reach the comment column.
    fn value_spec(&mut self, spec: &ValueSpec, aligned: bool, keep_type: bool) -> FmtResult<usize> {
        self.ident_list(&spec.names);
        let mut extra = 3;
        if spec.ty.is_some() || keep_type {
            if aligned {
                self.ctx.cell();
            } else {
                self.ctx.space();
            }
            extra -= 1;
        }
        if let Some(ty) = spec.ty {
            self.ty(ty)?;
        }
        if !spec.values.is_empty() {
            if aligned {
                self.ctx.cell();
            } else {
                self.ctx.space();
            }
            self.ctx.write("= ");
            self.inline_list(&spec.values, 1)?;
            extra -= 1;
        }
        Ok(extra)
    }

    fn type_spec(&mut self, spec: &TypeSpec, aligned: bool) -> FmtResult {
        self.write_name(spec.name.name);
        if aligned {
            self.ctx.cell();
        } else {
            self.ctx.space();
        }
        if spec.alias {
            self.ctx.write("= ");
        }
        self.ty(spec.ty)
    }

    fn func_decl(&mut self, func: &FuncDecl) -> FmtResult {
        let start = self.ctx.column();
        self.ctx.write("func ");
        if let Some(recv) = &func.recv {
            self.params(recv)?;
            self.ctx.space();
        }
        self.write_name(func.name.name);
        self.signature(&func.sig)?;
        if let Some(body) = func.body {
            let header = self.ctx.column().saturating_sub(start);
            self.func_body(header, body, true)?;
        }
        Ok(())
    }

    /// Body of a function declaration or literal. A body whose braces share
    /// a source line stays on one line when it is short enough; one-line
    /// bodies of declarations are aligned with their neighbours.
    pub(super) fn func_body(&mut self, header: usize, body: BlockId, is_decl: bool) -> FmtResult {
        let block = self.block_node(body)?;
        if !self.body_fits_on_line(header, block)? {
            self.ctx.space();
            return self.block(body);
        }
        if is_decl {
            self.ctx.cell();
        } else {
            self.ctx.space();
        }
        let mut first = true;
        self.ctx.write("{");
        for &stmt in &block.stmts {
            if self.is_empty_stmt(stmt)? {
                continue;
            }
            self.ctx.write(if first { " " } else { "; " });
            first = false;
            self.stmt(stmt)?;
        }
        self.ctx.write(if first { "}" } else { " }" });
        self.last_pos = Some(block.span.end);
        Ok(())
    }

    fn body_fits_on_line(&mut self, header: usize, block: &Block) -> FmtResult<bool> {
        let span = block.span;
        if span.is_dummy() || self.line(span.start) != self.line(span.end.saturating_sub(1)) {
            return Ok(false);
        }
        if block.stmts.len() > 5 || self.comments.any_within(span.start, span.end) {
            return Ok(false);
        }
        let mut size = 0;
        for (i, &stmt) in block.stmts.iter().enumerate() {
            if i > 0 {
                size += 2;
            }
            match self.measure(|p| p.stmt(stmt))? {
                Some(width) => size += width,
                None => return Ok(false),
            }
            if header + size > MAX_LINE_WIDTH {
                return Ok(false);
            }
        }
        Ok(header + size <= MAX_LINE_WIDTH)
    }

    /// Parameters and results; a single unnamed result is printed without
    /// parentheses.
    pub(super) fn signature(&mut self, sig: &Signature) -> FmtResult {
        self.params(&sig.params)?;
        let Some(results) = &sig.results else {
            return Ok(());
        };
        match results.fields.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => {
                self.ctx.space();
                let ty = self.strip_type_parens(single.ty)?;
                self.ty(ty)
            }
            _ => {
                self.ctx.space();
                self.params(results)
            }
        }
    }

    /// `(a, b int, c string)`, keeping the source's line breaks between
    /// parameters.
    pub(super) fn params(&mut self, list: &FieldList) -> FmtResult {
        let real = !list.span.is_dummy();
        self.ctx.write("(");
        let mut prev_line = real.then(|| self.line(list.span.start));
        if real {
            self.last_pos = Some(list.span.start);
        }
        let mut broke = false;
        for (i, field) in list.fields.iter().enumerate() {
            let line = (!field.span.is_dummy()).then(|| self.line(field.span.start));
            let needs_break = matches!((prev_line, line), (Some(p), Some(l)) if p < l);
            if i > 0 {
                self.ctx.write(",");
            }
            if needs_break {
                if !broke {
                    self.ctx.indent();
                    broke = true;
                }
                self.break_before(field.span, 1);
            } else if i > 0 {
                self.ctx.space();
            }
            self.param(field)?;
            if !field.span.is_dummy() {
                self.last_pos = Some(field.span.end);
                prev_line = Some(self.line(field.span.end));
            }
        }
        if real && !list.fields.is_empty() {
            let close = list.span.end.saturating_sub(1);
            if prev_line.is_some_and(|line| line < self.line(close)) {
                self.ctx.write(",");
                self.break_before(Span::point(close), 1);
            }
        }
        if broke {
            self.ctx.dedent();
        }
        self.ctx.write(")");
        if real {
            self.last_pos = Some(list.span.end);
        }
        Ok(())
    }

    fn param(&mut self, field: &Field) -> FmtResult {
        if !field.names.is_empty() {
            self.ident_list(&field.names);
            self.ctx.space();
        }
        let ty = self.strip_type_parens(field.ty)?;
        self.ty(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::keep_type_column;
    use errfix_ir::ast::{Spec, ValueSpec};
    use errfix_ir::{ExprId, Span, TypeExprId};

    fn spec(ty: bool, value: bool) -> Spec {
        Spec::Value(ValueSpec {
            names: Vec::new(),
            ty: ty.then(|| TypeExprId::new(0)),
            values: if value { vec![ExprId::new(0)] } else { Vec::new() },
            span: Span::DUMMY,
        })
    }

    #[test]
    fn test_type_column_kept_across_valued_run() {
        let specs = [spec(false, true), spec(true, true), spec(false, true)];
        assert_eq!(keep_type_column(&specs), vec![true, true, true]);
    }

    #[test]
    fn test_type_column_run_ends_at_spec_without_values() {
        let specs = [spec(true, true), spec(false, false), spec(false, true)];
        assert_eq!(keep_type_column(&specs), vec![true, false, false]);
    }
}
