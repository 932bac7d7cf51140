//! `sql!` interpolation macro implementation
//!
//! The template is a string literal where `{raw:EXPR}` inserts `EXPR` as SQL text
//! and `{param:EXPR}` binds `EXPR` as a parameter. `{{` / `}}` are literal braces.
//! Anything else inside braces is rejected, so an interpolation can never be
//! untagged.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Expr, LitStr, Result};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Piece {
    Literal(String),
    Raw(String),
    Param(String),
}

pub(crate) fn parse_template(template: &str) -> std::result::Result<Vec<Piece>, String> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '}' => {
                return Err("unmatched `}` in sql! template (use `}}` for a literal brace)".into());
            }
            '{' => {
                let inner = take_interpolation(&mut chars)?;
                if !text.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut text)));
                }
                pieces.push(parse_interpolation(&inner)?);
            }
            c => text.push(c),
        }
    }
    if !text.is_empty() {
        pieces.push(Piece::Literal(text));
    }
    Ok(pieces)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

// Consume up to the `}` closing an interpolation; nested braces in the
// expression (blocks, struct literals) are balanced. Braces inside string and
// char literals do not count.
fn take_interpolation(chars: &mut Chars<'_>) -> std::result::Result<String, String> {
    let mut depth = 0_usize;
    let mut inner = String::new();
    while let Some(c) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Ok(inner),
            '}' => depth -= 1,
            '"' => {
                inner.push(c);
                take_quoted(chars, '"', &mut inner);
                continue;
            }
            '\'' if is_char_literal(chars) => {
                inner.push(c);
                take_quoted(chars, '\'', &mut inner);
                continue;
            }
            _ => {}
        }
        inner.push(c);
    }
    Err("unclosed `{` in sql! template (use `{{` for a literal brace)".into())
}

// Copy a string or char literal body up to and including its closing quote.
fn take_quoted(chars: &mut Chars<'_>, quote: char, inner: &mut String) {
    while let Some(c) = chars.next() {
        inner.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                inner.push(escaped);
            }
        } else if c == quote {
            return;
        }
    }
}

// After a `'`: `'x'` and `'\n'` are char literals, `'a` is a lifetime or label.
fn is_char_literal(chars: &Chars<'_>) -> bool {
    let mut ahead = chars.clone();
    match ahead.next() {
        Some('\\') => true,
        Some(_) => ahead.peek() == Some(&'\''),
        None => false,
    }
}

fn parse_interpolation(inner: &str) -> std::result::Result<Piece, String> {
    let Some((tag, expr)) = inner.split_once(':') else {
        return Err(format!(
            "untagged interpolation `{{{inner}}}`: write `{{raw:...}}` for SQL text \
             or `{{param:...}}` for a bound value"
        ));
    };
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(format!("empty expression in `{{{inner}}}`"));
    }
    match tag.trim() {
        "raw" => Ok(Piece::Raw(expr.to_string())),
        "param" => Ok(Piece::Param(expr.to_string())),
        other => Err(format!(
            "unknown interpolation tag `{other}`: expected `raw` or `param`"
        )),
    }
}

pub fn expand(template: LitStr) -> Result<TokenStream> {
    let pieces =
        parse_template(&template.value()).map_err(|msg| Error::new(template.span(), msg))?;

    let has_interpolation = pieces.iter().any(|p| !matches!(p, Piece::Literal(_)));
    if !has_interpolation {
        let text: String = pieces
            .into_iter()
            .map(|p| match p {
                Piece::Literal(s) => s,
                Piece::Raw(_) | Piece::Param(_) => String::new(),
            })
            .collect();
        return Ok(quote! { ::sqlfrag::QueryPart::new(#text) });
    }

    let segments = pieces
        .iter()
        .map(|piece| match piece {
            Piece::Literal(s) => Ok(quote! { ::sqlfrag::Segment::literal(#s) }),
            Piece::Raw(src) => {
                let expr = parse_expr(src, &template)?;
                Ok(quote! { ::sqlfrag::Segment::literal(#expr) })
            }
            Piece::Param(src) => {
                let expr = parse_expr(src, &template)?;
                Ok(quote! { ::sqlfrag::Segment::param(#expr) })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        ::sqlfrag::QueryPart::from_segments([#(#segments),*])
    })
}

fn parse_expr(src: &str, template: &LitStr) -> Result<Expr> {
    syn::parse_str::<Expr>(src)
        .map_err(|e| Error::new(template.span(), format!("invalid expression `{src}`: {e}")))
}
