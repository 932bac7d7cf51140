//! Validated SQL identifiers.
//!
//! Identifiers (schema/table/column names) cannot be bound as parameters, so a
//! dynamic table name has to end up in the SQL text. [`Ident`] is the checked way
//! to do that: it only accepts strings that are identifiers and nothing else.
//!
//! - Unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts (`"Mixed Case"`) accept anything except NUL; `""` escapes `"`
//! - Parts are joined with `.` (`public."UserTable".id`)

use crate::error::{FragError, FragResult};
use std::iter::Peekable;
use std::str::Chars;

/// One dot-separated component of an [`Ident`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A SQL identifier, possibly qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    parts: Vec<IdentPart>,
}

impl Ident {
    /// Wrap a single name in double quotes, accepting any non-empty text
    /// without NUL characters.
    pub fn quoted(name: &str) -> FragResult<Self> {
        if name.is_empty() {
            return Err(FragError::validation("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(FragError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse a dotted identifier with optional quoted parts.
    pub fn parse(s: &str) -> FragResult<Self> {
        if s.is_empty() {
            return Err(FragError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(FragError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut chars = s.chars().peekable();
        let mut parts = vec![parse_part(&mut chars)?];
        while let Some(c) = chars.next() {
            if c != '.' {
                return Err(FragError::validation(format!(
                    "Expected '.' between identifier parts, got '{c}'"
                )));
            }
            if chars.peek().is_none() {
                return Err(FragError::validation("Trailing '.' in identifier"));
            }
            parts.push(parse_part(&mut chars)?);
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// Render the identifier as SQL text.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(name) => out.push_str(name),
                IdentPart::Quoted(name) => {
                    out.push('"');
                    out.push_str(&name.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

fn parse_part(chars: &mut Peekable<Chars<'_>>) -> FragResult<IdentPart> {
    if chars.peek() == Some(&'"') {
        chars.next();
        let mut name = String::new();
        loop {
            match chars.next() {
                Some('"') if chars.peek() == Some(&'"') => {
                    chars.next();
                    name.push('"');
                }
                Some('"') => break,
                Some(c) => name.push(c),
                None => return Err(FragError::validation("Unclosed quoted identifier")),
            }
        }
        if name.is_empty() {
            return Err(FragError::validation("Empty quoted identifier"));
        }
        return Ok(IdentPart::Quoted(name));
    }

    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' {
            break;
        }
        let ok = if name.is_empty() {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c == '$' || c.is_ascii_alphanumeric()
        };
        if !ok {
            return Err(FragError::validation(format!(
                "Invalid character in identifier: '{c}'"
            )));
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        return Err(FragError::validation("Empty identifier segment"));
    }
    Ok(IdentPart::Unquoted(name))
}

/// Conversion into a validated [`Ident`], used by [`QueryPart::ident`](crate::QueryPart::ident).
pub trait IntoIdent {
    fn into_ident(self) -> FragResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> FragResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> FragResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> FragResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> FragResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> FragResult<Ident> {
        Ident::parse(self)
    }
}
