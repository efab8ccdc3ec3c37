//! Expressions: precedence climbing over binary operators, then unary,
//! then primary expressions with their postfix chains.

use errfix_diagnostic::ErrorCode;
use errfix_ir::ast::{BinaryOp, Expr, ExprKind, LitKind, TypeExprKind, UnaryOp};
use errfix_ir::{ExprId, Span, TokenKind};

use crate::{PResult, ParseContext, ParseError, Parser};

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::LogOr => BinaryOp::LogOr,
        TokenKind::LogAnd => BinaryOp::LogAnd,
        TokenKind::Eql => BinaryOp::Eq,
        TokenKind::Neq => BinaryOp::NotEq,
        TokenKind::Lss => BinaryOp::Lt,
        TokenKind::Leq => BinaryOp::LtEq,
        TokenKind::Gtr => BinaryOp::Gt,
        TokenKind::Geq => BinaryOp::GtEq,
        TokenKind::Add => BinaryOp::Add,
        TokenKind::Sub => BinaryOp::Sub,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Xor => BinaryOp::Xor,
        TokenKind::Mul => BinaryOp::Mul,
        TokenKind::Quo => BinaryOp::Div,
        TokenKind::Rem => BinaryOp::Rem,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::And => BinaryOp::And,
        TokenKind::AndNot => BinaryOp::AndNot,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    pub(crate) fn expr(&mut self) -> PResult<ExprId> {
        errfix_stack::ensure_sufficient_stack(|| self.binary_expr(1))
    }

    /// Comma-separated expressions (at least one).
    pub(crate) fn expr_list(&mut self) -> PResult<Vec<ExprId>> {
        let mut list = vec![self.expr()?];
        while self.cursor.eat(TokenKind::Comma) {
            list.push(self.expr()?);
        }
        Ok(list)
    }

    fn binary_expr(&mut self, min_prec: u8) -> PResult<ExprId> {
        let mut left = self.unary_expr()?;
        while let Some(op) = binary_op(self.cursor.kind()) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.cursor.advance();
            let right = self.binary_expr(prec + 1)?;
            let span = self.arena.expr(left).span.merge(self.arena.expr(right).span);
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn unary_expr(&mut self) -> PResult<ExprId> {
        let start = self.cursor.span().start;
        let op = match self.cursor.kind() {
            TokenKind::Add => UnaryOp::Pos,
            TokenKind::Sub => UnaryOp::Neg,
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Xor => UnaryOp::BitNot,
            TokenKind::And => UnaryOp::Addr,
            TokenKind::Arrow if self.cursor.peek_kind(1) == TokenKind::Chan => {
                return self.primary_expr();
            }
            TokenKind::Arrow => UnaryOp::Recv,
            TokenKind::Mul => {
                self.cursor.advance();
                let x = errfix_stack::ensure_sufficient_stack(|| self.unary_expr())?;
                return Ok(self.alloc_expr(ExprKind::Star(x), self.cursor.span_from(start)));
            }
            _ => return self.primary_expr(),
        };
        self.cursor.advance();
        let x = errfix_stack::ensure_sufficient_stack(|| self.unary_expr())?;
        Ok(self.alloc_expr(ExprKind::Unary { op, x }, self.cursor.span_from(start)))
    }

    fn primary_expr(&mut self) -> PResult<ExprId> {
        let start = self.cursor.span().start;
        let mut x = self.operand()?;
        loop {
            x = match self.cursor.kind() {
                TokenKind::Period => self.selector_or_assert(x, start)?,
                TokenKind::LBrack => self.index_or_slice(x, start)?,
                TokenKind::LParen => self.call(x, start)?,
                TokenKind::LBrace if self.composite_allowed(x) => {
                    self.composite_lit(Some(x), start)?
                }
                _ => return Ok(x),
            };
        }
    }

    fn operand(&mut self) -> PResult<ExprId> {
        let token = self.cursor.current();
        let lit = |kind| ExprKind::Lit { kind, raw: token_name(token.kind) };
        let kind = match token.kind {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                ExprKind::Ident(name)
            }
            TokenKind::Int(_) => {
                self.cursor.advance();
                lit(LitKind::Int)
            }
            TokenKind::Float(_) => {
                self.cursor.advance();
                lit(LitKind::Float)
            }
            TokenKind::Imag(_) => {
                self.cursor.advance();
                lit(LitKind::Imag)
            }
            TokenKind::Char(_) => {
                self.cursor.advance();
                lit(LitKind::Char)
            }
            TokenKind::String(_) => {
                self.cursor.advance();
                lit(LitKind::String)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.with_context(ParseContext::NONE, |p| p.expr())?;
                self.cursor.expect_closing(TokenKind::RParen, token.span)?;
                ExprKind::Paren(inner)
            }
            TokenKind::Func => {
                self.cursor.advance();
                let sig = self.signature()?;
                if self.cursor.check(TokenKind::LBrace) {
                    let body = self.with_context(ParseContext::NONE, |p| p.block())?;
                    ExprKind::FuncLit { sig, body }
                } else {
                    let span = self.cursor.span_from(token.span.start);
                    ExprKind::Type(self.alloc_type(TypeExprKind::Func(sig), span))
                }
            }
            TokenKind::LBrack
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::Arrow => ExprKind::Type(self.parse_type()?),
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1002,
                    format!("expected expression, found `{other}`"),
                    token.span,
                )
                .with_label("expected expression"))
            }
        };
        Ok(self.alloc_expr(kind, self.cursor.span_from(token.span.start)))
    }

    fn selector_or_assert(&mut self, x: ExprId, start: u32) -> PResult<ExprId> {
        self.cursor.expect(TokenKind::Period)?;
        if self.cursor.check(TokenKind::LParen) {
            let open = self.cursor.advance().span;
            let ty = if self.cursor.eat(TokenKind::Type) {
                None
            } else {
                Some(self.parse_type()?)
            };
            self.cursor.expect_closing(TokenKind::RParen, open)?;
            return Ok(self.alloc_expr(ExprKind::TypeAssert { x, ty }, self.cursor.span_from(start)));
        }
        let sel = self.cursor.expect_ident()?;
        Ok(self.alloc_expr(ExprKind::Selector { x, sel }, self.cursor.span_from(start)))
    }

    /// `x[i]`, `x[i, j]`, `x[lo:hi]`, `x[lo:hi:max]`.
    fn index_or_slice(&mut self, x: ExprId, start: u32) -> PResult<ExprId> {
        let open = self.cursor.expect(TokenKind::LBrack)?;
        let kind = self.with_context(ParseContext::NONE, |p| -> PResult<ExprKind> {
            let first = if p.cursor.check(TokenKind::Colon) {
                None
            } else {
                Some(p.expr()?)
            };
            if !p.cursor.eat(TokenKind::Colon) {
                let mut indices: Vec<ExprId> = first.into_iter().collect();
                while p.cursor.eat(TokenKind::Comma) {
                    if p.cursor.check(TokenKind::RBrack) {
                        break;
                    }
                    indices.push(p.expr()?);
                }
                if indices.is_empty() {
                    return Err(ParseError::new(
                        ErrorCode::E1002,
                        "expected index expression",
                        p.cursor.span(),
                    )
                    .with_label("expected expression"));
                }
                return Ok(ExprKind::Index { x, indices });
            }
            let hi = if matches!(p.cursor.kind(), TokenKind::RBrack | TokenKind::Colon) {
                None
            } else {
                Some(p.expr()?)
            };
            let max = if p.cursor.eat(TokenKind::Colon) {
                Some(p.expr()?)
            } else {
                None
            };
            Ok(ExprKind::Slice { x, lo: first, hi, max })
        })?;
        self.cursor.expect_closing(TokenKind::RBrack, open)?;
        Ok(self.alloc_expr(kind, self.cursor.span_from(start)))
    }

    fn call(&mut self, func: ExprId, start: u32) -> PResult<ExprId> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let (args, ellipsis) = self.with_context(ParseContext::NONE, |p| -> PResult<_> {
            let mut args = Vec::new();
            let mut ellipsis = false;
            while !p.cursor.check(TokenKind::RParen) && !p.cursor.is_at_end() {
                args.push(p.expr()?);
                if p.cursor.eat(TokenKind::Ellipsis) {
                    ellipsis = true;
                }
                if !p.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok((args, ellipsis))
        })?;
        let multiline = self.cursor.has_newline_before();
        self.cursor.expect_closing(TokenKind::RParen, open)?;
        Ok(self.alloc_expr(
            ExprKind::Call {
                func,
                args,
                ellipsis,
                multiline,
            },
            self.cursor.span_from(start),
        ))
    }

    /// `T{` starts a composite literal when `T` can name a type. A bare
    /// name (`if x {`) only does so outside control-clause headers.
    fn composite_allowed(&self, x: ExprId) -> bool {
        match &self.arena.expr(x).kind {
            ExprKind::Type(ty) => matches!(
                self.arena.ty(*ty).kind,
                TypeExprKind::Slice(_)
                    | TypeExprKind::Array { .. }
                    | TypeExprKind::Map { .. }
                    | TypeExprKind::Struct(_)
            ),
            ExprKind::Ident(_) => self.context.allows_composite_lit(),
            ExprKind::Selector { x, .. } => {
                matches!(self.arena.expr(*x).kind, ExprKind::Ident(_))
                    && self.context.allows_composite_lit()
            }
            _ => false,
        }
    }

    /// `{...}` body of a composite literal; `ty` is `None` for elided
    /// element types.
    fn composite_lit(&mut self, ty: Option<ExprId>, start: u32) -> PResult<ExprId> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let elts = self.with_context(ParseContext::NONE, |p| -> PResult<_> {
            let mut elts = Vec::new();
            while !p.cursor.check(TokenKind::RBrace) && !p.cursor.is_at_end() {
                elts.push(p.element()?);
                if !p.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(elts)
        })?;
        let multiline = self.cursor.has_newline_before();
        self.cursor.expect_closing(TokenKind::RBrace, open)?;
        Ok(self.alloc_expr(
            ExprKind::Composite {
                ty,
                elts,
                multiline,
            },
            self.cursor.span_from(start),
        ))
    }

    fn element(&mut self) -> PResult<ExprId> {
        let start = self.cursor.span().start;
        let key = self.element_value()?;
        if !self.cursor.eat(TokenKind::Colon) {
            return Ok(key);
        }
        let value = self.element_value()?;
        Ok(self.alloc_expr(ExprKind::KeyValue { key, value }, self.cursor.span_from(start)))
    }

    fn element_value(&mut self) -> PResult<ExprId> {
        if self.cursor.check(TokenKind::LBrace) {
            let start = self.cursor.span().start;
            return self.composite_lit(None, start);
        }
        self.expr()
    }
}

fn token_name(kind: TokenKind) -> errfix_ir::Name {
    match kind {
        TokenKind::Ident(name)
        | TokenKind::Int(name)
        | TokenKind::Float(name)
        | TokenKind::Imag(name)
        | TokenKind::Char(name)
        | TokenKind::String(name) => name,
        _ => errfix_ir::Name::EMPTY,
    }
}
