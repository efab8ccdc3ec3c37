//! Expressions.
//!
//! Binary expressions get blanks around operators depending on precedence
//! and nesting depth: `a + b`, but `a*b + c` and `f(a+b, c)`. Lists follow
//! the source's line breaks; a list whose closer sat on its own line keeps a
//! trailing comma, and keyed elements on their own lines align their
//! values.

use errfix_ir::ast::{BinaryOp, ExprKind, Ident, TypeExprKind, UnaryOp};
use errfix_ir::{ExprId, Span};

use super::{FmtResult, Printer};

const UNARY_PREC: u8 = 6;
const HIGHEST_PREC: u8 = 7;

/// Keys up to this width always align with their neighbours.
const SMALL_SIZE: usize = 40;

/// A key this many times wider or narrower than the running geometric
/// mean starts a new alignment section.
const SIZE_RATIO: f64 = 2.5;

/// Parentheses undo one level of depth.
fn reduce_depth(depth: usize) -> usize {
    if depth > 1 {
        depth - 1
    } else {
        depth
    }
}

/// Would `prev` followed directly by an operand starting with `next` lex
/// as a different token?
fn may_combine(prev: &str, next: char) -> bool {
    match prev {
        "+" => next == '+',
        "-" => next == '-',
        "/" => next == '*',
        "<" | "<-" => next == '-' || next == '<',
        "&" => next == '&' || next == '^',
        _ => false,
    }
}

impl Printer<'_> {
    pub(super) fn expr(&mut self, id: ExprId) -> FmtResult {
        self.expr1(id, 0, 1)
    }

    pub(super) fn expr0(&mut self, id: ExprId, depth: usize) -> FmtResult {
        self.expr1(id, 0, depth)
    }

    pub(super) fn expr1(&mut self, id: ExprId, prec1: u8, depth: usize) -> FmtResult {
        errfix_stack::ensure_sufficient_stack(|| self.expr1_inner(id, prec1, depth))
    }

    fn expr1_inner(&mut self, id: ExprId, prec1: u8, depth: usize) -> FmtResult {
        let expr = self.expr_node(id)?;
        match &expr.kind {
            ExprKind::Ident(name) => self.write_name(*name),
            ExprKind::Lit { raw, .. } => {
                let text = self.name(*raw);
                self.ctx.write_verbatim(text);
            }
            ExprKind::Binary { op, left, right } => {
                self.binary(id, *op, *left, *right, prec1, depth)?;
            }
            ExprKind::KeyValue { key, value } => {
                self.expr(*key)?;
                self.ctx.write(": ");
                self.expr(*value)?;
            }
            ExprKind::Star(x) => {
                self.ctx.write("*");
                self.expr(*x)?;
            }
            ExprKind::Unary { op, x } => {
                if UNARY_PREC < prec1 {
                    self.ctx.write("(");
                    self.expr(id)?;
                    self.ctx.write(")");
                } else {
                    self.ctx.write(op.as_str());
                    if self.leading_char(*x)?.is_some_and(|c| may_combine(op.as_str(), c)) {
                        self.ctx.space();
                    }
                    self.expr1(*x, UNARY_PREC, depth)?;
                }
            }
            ExprKind::Paren(x) => {
                self.ctx.write("(");
                self.expr0(*x, reduce_depth(depth))?;
                self.ctx.write(")");
            }
            ExprKind::Selector { x, sel } => {
                self.selector(*x, *sel, depth, false)?;
            }
            ExprKind::TypeAssert { x, ty } => {
                self.expr1(*x, HIGHEST_PREC, depth)?;
                self.ctx.write(".(");
                match ty {
                    Some(ty) => self.ty(*ty)?,
                    None => self.ctx.write("type"),
                }
                self.ctx.write(")");
            }
            ExprKind::Index { x, indices } => {
                self.expr1(*x, HIGHEST_PREC, 1)?;
                self.ctx.write("[");
                for (i, &index) in indices.iter().enumerate() {
                    if i > 0 {
                        self.ctx.write(", ");
                    }
                    self.expr0(index, depth + 1)?;
                }
                self.ctx.write("]");
            }
            ExprKind::Slice { x, lo, hi, max } => {
                self.expr1(*x, HIGHEST_PREC, 1)?;
                self.slice_indices(*lo, *hi, *max, depth)?;
            }
            ExprKind::Call {
                func,
                args,
                ellipsis,
                multiline,
            } => {
                let depth = if args.len() > 1 { depth + 1 } else { depth };
                let func_node = self.expr_node(*func)?;
                let indented = match &func_node.kind {
                    ExprKind::Selector { x, sel } => self.selector(*x, *sel, depth, true)?,
                    ExprKind::Type(ty)
                        if matches!(self.type_node(*ty)?.kind, TypeExprKind::Func(_)) =>
                    {
                        self.ctx.write("(");
                        self.ty(*ty)?;
                        self.ctx.write(")");
                        false
                    }
                    _ => {
                        self.expr1(*func, HIGHEST_PREC, depth)?;
                        false
                    }
                };
                let real = !expr.span.is_dummy();
                let open = (real && !func_node.span.is_dummy()).then_some(func_node.span.end);
                let close = real.then(|| expr.span.end - 1);
                self.ctx.write("(");
                if *ellipsis {
                    self.expr_list(args, open, close, false, depth)?;
                    self.ctx.write("...");
                    if let Some(close) = close.filter(|_| *multiline) {
                        self.ctx.write(",");
                        self.break_before(Span::point(close), 1);
                    }
                } else {
                    self.expr_list(args, open, close, *multiline, depth)?;
                }
                self.ctx.write(")");
                if let Some(close) = close {
                    self.last_pos = Some(close + 1);
                }
                if indented {
                    self.ctx.dedent();
                }
            }
            ExprKind::Composite {
                ty,
                elts,
                multiline,
            } => {
                let mut open = (!expr.span.is_dummy()).then_some(expr.span.start);
                if let Some(ty) = ty {
                    self.expr1(*ty, HIGHEST_PREC, depth)?;
                    let ty_span = self.expr_node(*ty)?.span;
                    open = open.filter(|_| !ty_span.is_dummy()).map(|_| ty_span.end);
                }
                let close = (!expr.span.is_dummy()).then(|| expr.span.end - 1);
                self.ctx.write("{");
                self.expr_list(elts, open, close, *multiline, 1)?;
                self.ctx.write("}");
                if let Some(close) = close {
                    self.last_pos = Some(close + 1);
                }
            }
            ExprKind::FuncLit { sig, body } => {
                let start = self.ctx.column();
                self.ctx.write("func");
                self.signature(sig)?;
                let header = self.ctx.column().saturating_sub(start);
                self.func_body(header, *body, false)?;
            }
            ExprKind::Type(ty) => self.ty(*ty)?,
        }
        Ok(())
    }

    fn binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        prec1: u8,
        depth: usize,
    ) -> FmtResult {
        let prec = op.precedence();
        if prec < prec1 {
            self.ctx.write("(");
            self.expr0(id, reduce_depth(depth))?;
            self.ctx.write(")");
            return Ok(());
        }

        let mut print_blank = prec < self.cutoff(id, depth)?;
        let left_depth = depth + self.diff_prec(left, prec)?;
        self.expr1(left, prec, left_depth)?;
        if print_blank {
            self.ctx.space();
        }
        self.ctx.write(op.as_str());

        let left_span = self.expr_node(left)?.span;
        let right_span = self.expr_node(right)?.span;
        let mut broke = false;
        if !left_span.is_dummy()
            && !right_span.is_dummy()
            && self.line(left_span.end) < self.line(right_span.start)
        {
            // keep the source's break after the operator
            self.ctx.indent();
            self.last_pos = Some(left_span.end);
            self.break_before(right_span, 1);
            broke = true;
            print_blank = false;
        }
        if print_blank
            || (!broke && self.leading_char(right)?.is_some_and(|c| may_combine(op.as_str(), c)))
        {
            self.ctx.space();
        }
        self.expr1(right, prec + 1, depth + 1)?;
        if broke {
            self.ctx.dedent();
        }
        Ok(())
    }

    /// Operators binding at least this tightly are printed without
    /// surrounding blanks.
    fn cutoff(&self, id: ExprId, depth: usize) -> FmtResult<u8> {
        let (has4, has5, max_problem) = self.walk_binary(id)?;
        if max_problem > 0 {
            return Ok(max_problem + 1);
        }
        Ok(match (has4 && has5, depth == 1) {
            (true, true) => 5,
            (false, true) => 6,
            _ => 4,
        })
    }

    /// Which precedence levels occur in the operator chain, and the highest
    /// precedence at which dropping a blank would change the tokens.
    fn walk_binary(&self, id: ExprId) -> FmtResult<(bool, bool, u8)> {
        let ExprKind::Binary { op, left, right } = &self.expr_node(id)?.kind else {
            return Ok((false, false, 0));
        };
        let prec = op.precedence();
        let mut has4 = prec == 4;
        let mut has5 = prec == 5;
        let mut max_problem = 0;

        if let ExprKind::Binary { op: l_op, .. } = &self.expr_node(*left)?.kind {
            if l_op.precedence() >= prec {
                let (h4, h5, mp) = self.walk_binary(*left)?;
                has4 |= h4;
                has5 |= h5;
                max_problem = max_problem.max(mp);
            }
        }

        match &self.expr_node(*right)?.kind {
            ExprKind::Binary { op: r_op, .. } => {
                if r_op.precedence() > prec {
                    let (h4, h5, mp) = self.walk_binary(*right)?;
                    has4 |= h4;
                    has5 |= h5;
                    max_problem = max_problem.max(mp);
                }
            }
            ExprKind::Star(_) if *op == BinaryOp::Div => max_problem = 5,
            ExprKind::Unary { op: r_op, .. } => match (op, r_op) {
                (BinaryOp::And, UnaryOp::Addr | UnaryOp::BitNot) => max_problem = 5,
                (BinaryOp::Add, UnaryOp::Pos) | (BinaryOp::Sub, UnaryOp::Neg) => {
                    max_problem = max_problem.max(4);
                }
                _ => {}
            },
            _ => {}
        }
        Ok((has4, has5, max_problem))
    }

    fn diff_prec(&self, id: ExprId, prec: u8) -> FmtResult<usize> {
        Ok(match &self.expr_node(id)?.kind {
            ExprKind::Binary { op, .. } if op.precedence() == prec => 0,
            _ => 1,
        })
    }

    /// First character the operand prints, for operators that could fuse
    /// with it.
    fn leading_char(&self, id: ExprId) -> FmtResult<Option<char>> {
        Ok(match &self.expr_node(id)?.kind {
            ExprKind::Unary { op, .. } => op.as_str().chars().next(),
            ExprKind::Star(_) => Some('*'),
            ExprKind::Lit { raw, .. } => self.name(*raw).chars().next(),
            ExprKind::Binary { left, .. } => self.leading_char(*left)?,
            _ => None,
        })
    }

    /// `x.sel`. A selector on its own source line stays there, indented;
    /// for a method call the indent lasts through the arguments and the
    /// caller undoes it.
    fn selector(&mut self, x: ExprId, sel: Ident, depth: usize, is_method: bool) -> FmtResult<bool> {
        self.expr1(x, HIGHEST_PREC, depth)?;
        self.ctx.write(".");
        let x_span = self.expr_node(x)?.span;
        if !x_span.is_dummy()
            && !sel.span.is_dummy()
            && self.line(x_span.end) < self.line(sel.span.start)
        {
            self.ctx.indent();
            self.last_pos = Some(x_span.end);
            self.break_before(sel.span, 1);
            self.write_name(sel.name);
            if !is_method {
                self.ctx.dedent();
            }
            return Ok(is_method);
        }
        self.write_name(sel.name);
        Ok(false)
    }

    /// `[lo:hi:max]`, with blanks around the colons when a shallow slice
    /// has several binary indices.
    fn slice_indices(
        &mut self,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
        depth: usize,
    ) -> FmtResult {
        let mut indices = vec![lo, hi];
        if max.is_some() {
            indices.push(max);
        }
        let mut blanks = false;
        if depth <= 1 {
            let present: Vec<ExprId> = indices.iter().flatten().copied().collect();
            let mut has_binary = false;
            for &index in &present {
                has_binary |= matches!(self.expr_node(index)?.kind, ExprKind::Binary { .. });
            }
            blanks = present.len() > 1 && has_binary;
        }
        self.ctx.write("[");
        for (i, index) in indices.iter().enumerate() {
            if i > 0 {
                if indices[i - 1].is_some() && blanks {
                    self.ctx.space();
                }
                self.ctx.write(":");
                if index.is_some() && blanks {
                    self.ctx.space();
                }
            }
            if let Some(index) = index {
                self.expr0(*index, depth + 1)?;
            }
        }
        self.ctx.write("]");
        Ok(())
    }

    pub(super) fn ident_list(&mut self, idents: &[Ident]) {
        for (i, ident) in idents.iter().enumerate() {
            if i > 0 {
                self.ctx.write(", ");
            }
            self.write_name(ident.name);
        }
    }

    /// Comma-separated expressions outside brackets (assignments, returns,
    /// case lists).
    pub(super) fn inline_list(&mut self, items: &[ExprId], depth: usize) -> FmtResult {
        self.expr_list(items, None, None, false, depth)
    }

    /// Elements between `open` and `close` delimiters, following the
    /// source's line breaks. With `comma_term`, a closer on its own line
    /// gets a trailing comma and stays on its own line.
    pub(super) fn expr_list(
        &mut self,
        items: &[ExprId],
        open: Option<u32>,
        close: Option<u32>,
        comma_term: bool,
        depth: usize,
    ) -> FmtResult {
        if items.is_empty() {
            return Ok(());
        }
        let sizes_known = open.is_some() && close.is_some();
        let mut prev_line = open.map(|pos| self.line(pos));
        if open.is_some() {
            self.last_pos = open;
        }

        let mut indented = false;
        let mut prev_break: Option<usize> = None;
        let mut size = 0;
        let mut ln_sum = 0.0_f64;
        let mut count = 0_u32;

        for (i, &item) in items.iter().enumerate() {
            let expr = self.expr_node(item)?;
            let line = (!expr.span.is_dummy()).then(|| self.line(expr.span.start));
            let needs_break = matches!((prev_line, line), (Some(p), Some(l)) if p < l);
            let pair = match expr.kind {
                ExprKind::KeyValue { key, value } => Some((key, value)),
                _ => None,
            };

            let prev_size = size;
            size = 0;
            if sizes_known && !self.measuring && !expr.span.is_dummy() {
                if let Some(width) = self.measure(|p| p.expr0(item, depth))? {
                    size = match pair {
                        Some((key, _)) => self.measure(|p| p.expr(key))?.unwrap_or(0),
                        None => width,
                    };
                }
            }

            let mut use_section = true;
            if prev_size > 0 && size > 0 {
                if count == 0 || (prev_size <= SMALL_SIZE && size <= SMALL_SIZE) {
                    use_section = false;
                } else {
                    let geomean = (ln_sum / f64::from(count)).exp();
                    #[allow(clippy::cast_precision_loss)]
                    let ratio = size as f64 / geomean;
                    use_section = SIZE_RATIO * ratio <= 1.0 || SIZE_RATIO <= ratio;
                }
            }

            if i > 0 {
                self.ctx.write(",");
            }
            if needs_break {
                if !indented {
                    self.ctx.indent();
                    indented = true;
                }
                let several_on_line = prev_break.map_or(i > 0, |b| b + 1 < i);
                if i == 0 || use_section || several_on_line {
                    self.ctx.section_break();
                }
                let gap = self.gap_to(expr.span.start, 1);
                self.break_before(expr.span, 1);
                prev_break = Some(i);
                if gap > 1 {
                    ln_sum = 0.0;
                    count = 0;
                }
            } else if i > 0 {
                self.ctx.space();
            }

            match pair {
                Some((key, value)) if items.len() > 1 && size > 0 && needs_break => {
                    self.expr(key)?;
                    self.ctx.write(":");
                    self.ctx.cell();
                    self.expr(value)?;
                }
                _ => self.expr0(item, depth)?,
            }

            if size > 0 {
                #[allow(clippy::cast_precision_loss)]
                let width = size as f64;
                ln_sum += width.ln();
                count += 1;
            }
            if !expr.span.is_dummy() {
                self.last_pos = Some(expr.span.end);
                prev_line = Some(self.line(expr.span.end));
            }
        }

        if let Some(close) = close.filter(|_| comma_term) {
            if prev_line.is_some_and(|line| line < self.line(close)) {
                self.ctx.write(",");
                self.ctx.section_break();
                self.break_before(Span::point(close), 1);
            }
        }
        if indented {
            self.ctx.dedent();
        }
        Ok(())
    }
}
