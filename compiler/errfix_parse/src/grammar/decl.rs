//! File structure and declarations.

use errfix_diagnostic::ErrorCode;
use errfix_ir::ast::{
    Decl, DeclKeyword, Field, FieldList, FuncDecl, GenDecl, Ident, ImportDecl, ImportSpec,
    Signature, SourceFile, Spec, TypeSpec, ValueSpec,
};
use errfix_ir::{CommentList, Span, TokenKind};

use crate::{PResult, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn source_file(&mut self) -> PResult<SourceFile> {
        self.cursor.expect(TokenKind::Package)?;
        let package = self.cursor.expect_ident()?;
        self.cursor.expect_semi()?;

        let mut imports = Vec::new();
        while self.cursor.check(TokenKind::Import) {
            imports.push(self.import_decl()?);
            self.cursor.expect_semi()?;
        }

        let mut decls = Vec::new();
        while !self.cursor.is_at_end() {
            let decl = match self.cursor.kind() {
                TokenKind::Func => Decl::Func(self.func_decl()?),
                TokenKind::Var | TokenKind::Const | TokenKind::Type => {
                    Decl::Gen(self.gen_decl()?)
                }
                TokenKind::Import => {
                    return Err(ParseError::new(
                        ErrorCode::E1001,
                        "imports must appear before other declarations",
                        self.cursor.span(),
                    )
                    .with_label("misplaced import"))
                }
                other => {
                    return Err(ParseError::unexpected(
                        "declaration",
                        other,
                        self.cursor.span(),
                    ))
                }
            };
            decls.push(decl);
            self.cursor.expect_semi()?;
        }

        Ok(SourceFile {
            package,
            imports,
            decls,
            comments: CommentList::new(),
            arena: std::mem::take(&mut self.arena),
            span: Span::DUMMY,
        })
    }

    fn import_decl(&mut self) -> PResult<ImportDecl> {
        let start = self.cursor.expect(TokenKind::Import)?.start;
        let mut specs = Vec::new();
        let grouped = self.cursor.check(TokenKind::LParen);
        if grouped {
            let open = self.cursor.advance().span;
            while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                specs.push(self.import_spec()?);
                self.cursor.expect_semi()?;
            }
            self.cursor.expect_closing(TokenKind::RParen, open)?;
        } else {
            specs.push(self.import_spec()?);
        }
        Ok(ImportDecl {
            specs,
            grouped,
            span: self.cursor.span_from(start),
        })
    }

    fn import_spec(&mut self) -> PResult<ImportSpec> {
        let start = self.cursor.span().start;
        let name = match self.cursor.kind() {
            TokenKind::Ident(name) => Some(Ident::new(name, self.cursor.advance().span)),
            TokenKind::Period => {
                let span = self.cursor.advance().span;
                Some(Ident::new(self.interner.intern("."), span))
            }
            _ => None,
        };
        let TokenKind::String(raw) = self.cursor.kind() else {
            return Err(ParseError::unexpected(
                "import path",
                self.cursor.kind(),
                self.cursor.span(),
            ));
        };
        self.cursor.advance();
        let text = self.interner.lookup(raw);
        let unquoted = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
        Ok(ImportSpec {
            name,
            path: self.interner.intern(unquoted),
            span: self.cursor.span_from(start),
        })
    }

    pub(crate) fn func_decl(&mut self) -> PResult<FuncDecl> {
        let start = self.cursor.expect(TokenKind::Func)?.start;
        let recv = if self.cursor.check(TokenKind::LParen) {
            Some(self.parameters()?)
        } else {
            None
        };
        let name = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::LBrack) {
            return Err(self.type_params_error());
        }
        let sig = self.signature()?;
        let body = if self.cursor.check(TokenKind::LBrace) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(FuncDecl {
            recv,
            name,
            sig,
            body,
            span: self.cursor.span_from(start),
        })
    }

    pub(crate) fn type_params_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1006,
            "type parameters are not supported",
            self.cursor.span(),
        )
        .with_label("type parameter list starts here")
    }

    /// `type L[T any]` as opposed to the array type in `type A [N]int`.
    fn at_type_params(&self) -> bool {
        self.cursor.check(TokenKind::LBrack)
            && matches!(self.cursor.peek_kind(1), TokenKind::Ident(_))
            && matches!(
                self.cursor.peek_kind(2),
                TokenKind::Ident(_)
                    | TokenKind::Comma
                    | TokenKind::Interface
                    | TokenKind::Tilde
            )
    }

    /// `(params) results`.
    pub(crate) fn signature(&mut self) -> PResult<Signature> {
        let start = self.cursor.span().start;
        let params = self.parameters()?;
        let results = if self.cursor.check(TokenKind::LParen) {
            Some(self.parameters()?)
        } else if self.starts_type() {
            let ty = self.parse_type()?;
            let span = self.arena.ty(ty).span;
            Some(FieldList {
                fields: vec![Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span,
                }],
                parens: false,
                span,
            })
        } else {
            None
        };
        Ok(Signature {
            params,
            results,
            span: self.cursor.span_from(start),
        })
    }

    /// Parenthesized parameter list, grouping `a, b int` into one field.
    pub(crate) fn parameters(&mut self) -> PResult<FieldList> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let mut entries: Vec<(Option<Ident>, errfix_ir::TypeExprId, Span)> = Vec::new();

        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            let start = self.cursor.span().start;
            let named = match self.cursor.kind() {
                TokenKind::Ident(name) if self.ident_then_type() => {
                    Some(Ident::new(name, self.cursor.advance().span))
                }
                _ => None,
            };
            let ty = self.param_type()?;
            entries.push((named, ty, self.cursor.span_from(start)));
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect_closing(TokenKind::RParen, open)?;
        let span = self.cursor.span_from(open.start);

        let any_named = entries.iter().any(|(name, _, _)| name.is_some());
        let mut fields = Vec::new();
        if any_named {
            // `a, b int`: unnamed entries before a named one are names.
            let mut pending: Vec<Ident> = Vec::new();
            let mut pending_start: Option<u32> = None;
            for (name, ty, entry_span) in entries {
                match name {
                    Some(name) => {
                        pending.push(name);
                        let start = pending_start.take().unwrap_or(entry_span.start);
                        fields.push(Field {
                            names: std::mem::take(&mut pending),
                            ty,
                            tag: None,
                            span: Span::new(start, entry_span.end),
                        });
                    }
                    None => {
                        let Some(ident) = self.type_as_ident(ty) else {
                            return Err(ParseError::new(
                                ErrorCode::E1004,
                                "mixed named and unnamed parameters",
                                entry_span,
                            )
                            .with_label("expected parameter name"));
                        };
                        pending_start.get_or_insert(entry_span.start);
                        pending.push(ident);
                    }
                }
            }
            if let Some(last) = pending.first() {
                return Err(ParseError::new(
                    ErrorCode::E1005,
                    "parameter name without type",
                    last.span,
                )
                .with_label("missing type"));
            }
        } else {
            for (_, ty, entry_span) in entries {
                fields.push(Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span: entry_span,
                });
            }
        }

        Ok(FieldList {
            fields,
            parens: true,
            span,
        })
    }

    /// Parameter type, allowing a leading `...`.
    fn param_type(&mut self) -> PResult<errfix_ir::TypeExprId> {
        if self.cursor.check(TokenKind::Ellipsis) {
            let start = self.cursor.advance().span.start;
            let elem = self.parse_type()?;
            return Ok(self.alloc_type(
                errfix_ir::ast::TypeExprKind::Ellipsis(elem),
                self.cursor.span_from(start),
            ));
        }
        self.parse_type()
    }

    /// At an identifier: is it a parameter name followed by its type?
    fn ident_then_type(&self) -> bool {
        matches!(
            self.cursor.peek_kind(1),
            TokenKind::Ident(_)
                | TokenKind::Mul
                | TokenKind::LBrack
                | TokenKind::LParen
                | TokenKind::Func
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Ellipsis
                | TokenKind::Arrow
        )
    }

    /// `var`/`const`/`type` declaration, single or grouped.
    pub(crate) fn gen_decl(&mut self) -> PResult<GenDecl> {
        let token = self.cursor.advance();
        let keyword = match token.kind {
            TokenKind::Var => DeclKeyword::Var,
            TokenKind::Const => DeclKeyword::Const,
            _ => DeclKeyword::Type,
        };
        let start = token.span.start;

        let mut specs = Vec::new();
        let grouped = self.cursor.check(TokenKind::LParen);
        if grouped {
            let open = self.cursor.advance().span;
            while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                specs.push(self.spec(keyword)?);
                self.cursor.expect_semi()?;
            }
            self.cursor.expect_closing(TokenKind::RParen, open)?;
        } else {
            specs.push(self.spec(keyword)?);
        }

        Ok(GenDecl {
            keyword,
            specs,
            grouped,
            span: self.cursor.span_from(start),
        })
    }

    fn spec(&mut self, keyword: DeclKeyword) -> PResult<Spec> {
        let start = self.cursor.span().start;
        if keyword == DeclKeyword::Type {
            let name = self.cursor.expect_ident()?;
            if self.at_type_params() {
                return Err(self.type_params_error());
            }
            let alias = self.cursor.eat(TokenKind::Assign);
            let ty = self.parse_type()?;
            return Ok(Spec::Type(TypeSpec {
                name,
                alias,
                ty,
                span: self.cursor.span_from(start),
            }));
        }

        let mut names = vec![self.cursor.expect_ident()?];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(self.cursor.expect_ident()?);
        }
        let ty = if self.starts_type() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let values = if self.cursor.eat(TokenKind::Assign) {
            self.expr_list()?
        } else {
            Vec::new()
        };
        if keyword == DeclKeyword::Var && ty.is_none() && values.is_empty() {
            return Err(ParseError::new(
                ErrorCode::E1005,
                "variable declaration needs a type or an initializer",
                self.cursor.span(),
            )
            .with_label("expected type or `=`"));
        }
        Ok(Spec::Value(ValueSpec {
            names,
            ty,
            values,
            span: self.cursor.span_from(start),
        }))
    }
}
