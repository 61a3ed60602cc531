//! core::metadata::template
//!
//! Template scanning and compilation to an anchored match pattern.
//!
//! # Syntax
//!
//! A template is literal text interleaved with two-character placeholders:
//! `%` followed by one character. `%%` is a literal `%`. A `%` at the very
//! end of a template is an incomplete placeholder and is rejected.
//!
//! ```text
//! "%a - %T"      -> [Field(%a), Literal(" - "), Field(%T)]
//! "100%% %t"     -> [Literal("100"), Literal("%"), Literal(" "), Field(%t)]
//! ```
//!
//! # Matching
//!
//! [`compile_matcher`] turns each placeholder into a named capture group built
//! from the descriptor's regex fragment and escapes every literal run, so that
//! `"%t. %T"` becomes `^(?:(?P<field0>\d+)\. (?P<field1>.+))$`. Field `i` is
//! read back from group `field{i}`, so groups inside a fragment never shift
//! the fields that follow it.

use regex::Regex;

use super::{Descriptor, MetadataError, Registry};

/// One lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// Literal text (including the `%` produced by `%%`).
    Literal(&'t str),
    /// A two-character placeholder such as `%a`, or a lone trailing `%`.
    Placeholder(&'t str),
}

/// Split a template into literal runs and placeholders.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        if literal_start < pos {
            tokens.push(Token::Literal(&template[literal_start..pos]));
        }
        let end = match chars.next() {
            Some((next_pos, next)) => next_pos + next.len_utf8(),
            None => template.len(),
        };
        let piece = &template[pos..end];
        if piece == "%%" {
            tokens.push(Token::Literal("%"));
        } else {
            tokens.push(Token::Placeholder(piece));
        }
        literal_start = end;
    }
    if literal_start < template.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    tokens
}

/// A template resolved against a registry.
#[derive(Debug, Clone)]
pub enum Segment<'r> {
    Literal(String),
    Field(&'r Descriptor),
}

/// Resolve every placeholder of `template`.
///
/// # Errors
///
/// Returns `MetadataError::UnknownField` for placeholders the registry does
/// not know. The default descriptor is never used here.
pub fn resolve<'r>(registry: &'r Registry, template: &str) -> Result<Vec<Segment<'r>>, MetadataError> {
    tokenize(template)
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => Ok(Segment::Literal(text.to_string())),
            Token::Placeholder(p) => registry.lookup_by_placeholder(p, false).map(Segment::Field),
        })
        .collect()
}

/// A compiled template: an anchored pattern and the descriptor of each
/// field, in template order.
#[derive(Debug, Clone)]
pub struct Matcher<'r> {
    template: String,
    pattern: Regex,
    fields: Vec<&'r Descriptor>,
}

impl<'r> Matcher<'r> {
    /// The compiled pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Descriptors in template order.
    pub fn fields(&self) -> &[&'r Descriptor] {
        &self.fields
    }

    /// The template this matcher was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match `text` completely and return `(descriptor, captured text)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::PatternMismatch` unless the whole of `text`
    /// matches.
    pub fn captures<'s>(&self, text: &'s str) -> Result<Vec<(&'r Descriptor, &'s str)>, MetadataError> {
        let caps = self
            .pattern
            .captures(text)
            .ok_or_else(|| MetadataError::PatternMismatch {
                text: text.to_string(),
                template: self.template.clone(),
            })?;
        Ok(self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(i, d)| caps.name(&group_name(i)).map(|m| (*d, m.as_str())))
            .collect())
    }
}

fn group_name(index: usize) -> String {
    format!("field{index}")
}

/// Compile a template into a full-match pattern.
///
/// # Errors
///
/// Returns `MetadataError::UnknownField` for unknown placeholders and
/// `MetadataError::InvalidPattern` if a descriptor's regex fragment does not
/// compile.
///
/// # Example
///
/// ```
/// use audio_organizer::core::metadata::{template::compile_matcher, Registry};
///
/// let registry = Registry::standard();
/// let matcher = compile_matcher(&registry, "%t. %T").unwrap();
/// assert_eq!(
///     matcher.pattern().as_str(),
///     r"^(?:(?P<field0>\d+)\. (?P<field1>.+))$"
/// );
/// assert_eq!(matcher.fields()[0].tag(), "track");
/// ```
pub fn compile_matcher<'r>(registry: &'r Registry, template: &str) -> Result<Matcher<'r>, MetadataError> {
    let mut body = String::new();
    let mut fields = Vec::new();
    for segment in resolve(registry, template)? {
        match segment {
            Segment::Literal(text) => body.push_str(&regex::escape(&text)),
            Segment::Field(descriptor) => {
                body.push_str(&format!(
                    "(?P<{}>{})",
                    group_name(fields.len()),
                    descriptor.regex()
                ));
                fields.push(descriptor);
            }
        }
    }
    let pattern = Regex::new(&format!("^(?:{body})$")).map_err(|e| MetadataError::InvalidPattern {
        template: template.to_string(),
        message: e.to_string(),
    })?;
    Ok(Matcher {
        template: template.to_string(),
        pattern,
        fields,
    })
}
