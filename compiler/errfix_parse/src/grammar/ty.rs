//! Type syntax.

use errfix_diagnostic::ErrorCode;
use errfix_ir::ast::{
    ChanDir, Field, FieldList, Ident, InterfaceElem, TypeExpr, TypeExprKind,
};
use errfix_ir::{Span, TokenKind, TypeExprId};

use crate::{PResult, ParseContext, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn alloc_type(&mut self, kind: TypeExprKind, span: Span) -> TypeExprId {
        self.arena.alloc_type(TypeExpr::new(kind, span))
    }

    /// Can the current token begin a type?
    pub(crate) fn starts_type(&self) -> bool {
        matches!(
            self.cursor.kind(),
            TokenKind::Ident(_)
                | TokenKind::Mul
                | TokenKind::LBrack
                | TokenKind::LParen
                | TokenKind::Func
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Arrow
        )
    }

    /// A bare type name read back as an identifier, for parameter lists
    /// where `a, b int` is only disambiguated after the fact.
    pub(crate) fn type_as_ident(&self, ty: TypeExprId) -> Option<Ident> {
        let ty = self.arena.ty(ty);
        match ty.kind {
            TypeExprKind::Name(name) => Some(Ident::new(name, ty.span)),
            _ => None,
        }
    }

    pub(crate) fn parse_type(&mut self) -> PResult<TypeExprId> {
        errfix_stack::ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> PResult<TypeExprId> {
        let start = self.cursor.span().start;
        let kind = match self.cursor.kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.check(TokenKind::Period) {
                    self.cursor.advance();
                    let sel = self.cursor.expect_ident()?;
                    TypeExprKind::Qualified {
                        pkg: name,
                        name: sel.name,
                    }
                } else {
                    TypeExprKind::Name(name)
                }
            }
            TokenKind::Mul => {
                self.cursor.advance();
                TypeExprKind::Pointer(self.parse_type()?)
            }
            TokenKind::LBrack => {
                let open = self.cursor.advance().span;
                if self.cursor.eat(TokenKind::RBrack) {
                    TypeExprKind::Slice(self.parse_type()?)
                } else {
                    let len = if self.cursor.eat(TokenKind::Ellipsis) {
                        None
                    } else {
                        Some(self.with_context(ParseContext::NONE, |p| p.expr())?)
                    };
                    self.cursor.expect_closing(TokenKind::RBrack, open)?;
                    TypeExprKind::Array {
                        len,
                        elem: self.parse_type()?,
                    }
                }
            }
            TokenKind::Map => {
                self.cursor.advance();
                let open = self.cursor.expect(TokenKind::LBrack)?;
                let key = self.parse_type()?;
                self.cursor.expect_closing(TokenKind::RBrack, open)?;
                TypeExprKind::Map {
                    key,
                    value: self.parse_type()?,
                }
            }
            TokenKind::Chan => {
                self.cursor.advance();
                let dir = if self.cursor.eat(TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                TypeExprKind::Chan {
                    dir,
                    elem: self.parse_type()?,
                }
            }
            TokenKind::Arrow => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Chan)?;
                TypeExprKind::Chan {
                    dir: ChanDir::Recv,
                    elem: self.parse_type()?,
                }
            }
            TokenKind::Func => {
                self.cursor.advance();
                TypeExprKind::Func(self.signature()?)
            }
            TokenKind::Struct => TypeExprKind::Struct(self.struct_fields()?),
            TokenKind::Interface => self.interface_type()?,
            TokenKind::LParen => {
                let open = self.cursor.advance().span;
                let inner = self.parse_type()?;
                self.cursor.expect_closing(TokenKind::RParen, open)?;
                TypeExprKind::Paren(inner)
            }
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1005,
                    format!("expected type, found `{other}`"),
                    self.cursor.span(),
                )
                .with_label("expected type"))
            }
        };
        Ok(self.alloc_type(kind, self.cursor.span_from(start)))
    }

    /// `struct { ... }`.
    fn struct_fields(&mut self) -> PResult<FieldList> {
        let start = self.cursor.expect(TokenKind::Struct)?.start;
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            fields.push(self.struct_field()?);
            self.cursor.expect_semi()?;
        }
        self.cursor.expect_closing(TokenKind::RBrace, open)?;
        Ok(FieldList {
            fields,
            parens: false,
            span: self.cursor.span_from(start),
        })
    }

    fn struct_field(&mut self) -> PResult<Field> {
        let start = self.cursor.span().start;
        let named = self.cursor.check_ident()
            && !matches!(
                self.cursor.peek_kind(1),
                TokenKind::Period
                    | TokenKind::Semicolon
                    | TokenKind::RBrace
                    | TokenKind::String(_)
            );
        let mut names = Vec::new();
        if named {
            names.push(self.cursor.expect_ident()?);
            while self.cursor.eat(TokenKind::Comma) {
                names.push(self.cursor.expect_ident()?);
            }
        }
        let ty = self.parse_type()?;
        let tag = match self.cursor.kind() {
            TokenKind::String(raw) => {
                self.cursor.advance();
                Some(raw)
            }
            _ => None,
        };
        Ok(Field {
            names,
            ty,
            tag,
            span: self.cursor.span_from(start),
        })
    }

    /// `interface { ... }`. Type-set elements (`~T`, `A | B`) only appear
    /// in constraints and are rejected with the type-parameter error.
    fn interface_type(&mut self) -> PResult<TypeExprKind> {
        let start = self.cursor.expect(TokenKind::Interface)?.start;
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut elems = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.check(TokenKind::Tilde) {
                return Err(self.type_params_error());
            }
            if self.cursor.check_ident() && self.cursor.peek_kind(1) == TokenKind::LParen {
                let name = self.cursor.expect_ident()?;
                let sig = self.signature()?;
                elems.push(InterfaceElem::Method { name, sig });
            } else {
                elems.push(InterfaceElem::Embedded(self.parse_type()?));
            }
            if self.cursor.check(TokenKind::Or) {
                return Err(self.type_params_error());
            }
            self.cursor.expect_semi()?;
        }
        self.cursor.expect_closing(TokenKind::RBrace, open)?;
        Ok(TypeExprKind::Interface {
            elems,
            span: self.cursor.span_from(start),
        })
    }
}
