//! Rule line lexer using winnow.
//!
//! Turns one rule line into a [`RuleTokens`] tree. Each grammar layer is its
//! own function, and the call structure encodes CLDR precedence:
//!
//! ```text
//! or / xor  <  and  <  not  <  relation  <  list (,)  <  range (..)  <  arithmetic (%)  <  sign
//! ```
//!
//! Operator spellings are captured loosely (any one or two of `= ! < >` for
//! relations, any of `% * / + -` or `mod` for arithmetic) so the parser can
//! reject an unknown operator with a diagnostic instead of a bare mismatch.
//! Token text borrows the input line.

use winnow::combinator::{alt, delimited, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// The token tree of one rule line.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTokens<'a> {
    /// The full line the tokens borrow from.
    pub source: &'a str,
    /// `[Key=Value, ...]` entries, if the line has a rule info bracket.
    pub info: Option<Vec<KeyValueToken<'a>>>,
    /// The case segment. `None` for a header line (rule info only).
    pub case: Option<CaseToken<'a>>,
    pub samples: Vec<SampleToken<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueToken<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// A case name followed by its boolean expressions.
///
/// Well-formed lines carry at most one expression; the parser reports any
/// extra one.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseToken<'a> {
    pub name: &'a str,
    pub expressions: Vec<BooleanToken<'a>>,
}

/// A boolean expression together with the text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanToken<'a> {
    pub text: &'a str,
    pub tree: ExprToken<'a>,
}

/// An `@name v1, v2, …` segment. Values are raw text; the parser classifies
/// them as numbers, ranges or the ellipsis.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleToken<'a> {
    pub name: &'a str,
    pub values: Vec<&'a str>,
}

/// A node of the expression token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprToken<'a> {
    /// Decimal digits, optionally with a fraction: `10`, `1.5`.
    Number(&'a str),
    /// A bare word that is not a keyword: `n`, `i`.
    Word(&'a str),
    /// `true` or `false`.
    Keyword(&'a str),
    /// `not x`, `-x`, `+x`, `~x`.
    Prefix {
        operator: &'a str,
        operand: Box<ExprToken<'a>>,
    },
    /// Logical, relational, and arithmetic operators.
    Infix {
        operator: &'a str,
        left: Box<ExprToken<'a>>,
        right: Box<ExprToken<'a>>,
    },
    /// `min..max`.
    Span {
        operator: &'a str,
        min: Box<ExprToken<'a>>,
        max: Box<ExprToken<'a>>,
    },
    /// Two or more comma-separated values.
    List(Vec<ExprToken<'a>>),
    Paren(Box<ExprToken<'a>>),
}

impl<'a> ExprToken<'a> {
    /// The leftmost fragment of source text covered by this token, used to
    /// locate diagnostics.
    pub fn first_fragment(&self) -> &'a str {
        match self {
            ExprToken::Number(text) | ExprToken::Word(text) | ExprToken::Keyword(text) => text,
            ExprToken::Prefix { operator, .. } => operator,
            ExprToken::Infix { left, .. } => left.first_fragment(),
            ExprToken::Span { min, .. } => min.first_fragment(),
            ExprToken::List(items) => items.first().map_or("", ExprToken::first_fragment),
            ExprToken::Paren(inner) => inner.first_fragment(),
        }
    }

    /// The rightmost fragment of source text covered by this token.
    pub fn last_fragment(&self) -> &'a str {
        match self {
            ExprToken::Number(text) | ExprToken::Word(text) | ExprToken::Keyword(text) => text,
            ExprToken::Prefix { operand, .. } => operand.last_fragment(),
            ExprToken::Infix { right, .. } => right.last_fragment(),
            ExprToken::Span { max, .. } => max.last_fragment(),
            ExprToken::List(items) => items.last().map_or("", ExprToken::last_fragment),
            ExprToken::Paren(inner) => inner.last_fragment(),
        }
    }
}

/// Words that never lex as operands.
const KEYWORDS: &[&str] = &["and", "or", "xor", "not", "mod", "true", "false"];

/// Lex one rule line.
///
/// Returns `None` when the line is not a rule: lexing never fails with an
/// error, so callers can tell "not a rule" apart from a structural problem
/// reported later by the parser.
///
/// # Example
///
/// ```
/// use pluralis::parser::lex;
///
/// let tokens = lex("one: i = 1 and v = 0 @integer 1").unwrap();
/// assert_eq!(tokens.case.unwrap().name, "one");
/// assert!(lex("this is = not a rule").is_none());
/// ```
pub fn lex(line: &str) -> Option<RuleTokens<'_>> {
    lex_line(line).ok()
}

/// True when [`lex`] recognizes the line.
pub fn is_rule(line: &str) -> bool {
    lex(line).is_some()
}

/// Lex one line, returning the byte offset where lexing stopped on mismatch.
pub(crate) fn lex_line(source: &str) -> Result<RuleTokens<'_>, usize> {
    let mut remaining = source;
    match rule_line(&mut remaining) {
        Ok((info, case, samples)) => {
            let _ = ws(&mut remaining);
            if remaining.is_empty() {
                Ok(RuleTokens {
                    source,
                    info,
                    case,
                    samples,
                })
            } else {
                Err(source.len() - remaining.len())
            }
        }
        Err(_) => Err(source.len() - remaining.len()),
    }
}

type LineParts<'i> = (
    Option<Vec<KeyValueToken<'i>>>,
    Option<CaseToken<'i>>,
    Vec<SampleToken<'i>>,
);

/// Parse a rule line: rule info, case segment, samples.
fn rule_line<'i>(input: &mut &'i str) -> ModalResult<LineParts<'i>> {
    ws(input)?;
    let info = opt(rule_info).parse_next(input)?;
    ws(input)?;
    let case = opt(case_segment).parse_next(input)?;
    ws(input)?;
    let samples: Vec<SampleToken<'i>> =
        repeat(0.., terminated(sample_segment, ws)).parse_next(input)?;

    // Samples only make sense after a case.
    if case.is_none() && (info.is_none() || !samples.is_empty()) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok((info, case, samples))
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// Parse `[Key=Value, ...]`.
fn rule_info<'i>(input: &mut &'i str) -> ModalResult<Vec<KeyValueToken<'i>>> {
    delimited(
        ('[', ws),
        separated(1.., key_value, (ws, ',', ws)),
        (ws, ']'),
    )
    .parse_next(input)
}

/// Parse `Key=Value`. Values run to the next `,` or `]` and may be empty.
fn key_value<'i>(input: &mut &'i str) -> ModalResult<KeyValueToken<'i>> {
    let key = identifier(input)?;
    (ws, '=', ws).parse_next(input)?;
    let value = take_while(0.., |c: char| c != ',' && c != ']')
        .map(str::trim_end)
        .parse_next(input)?;
    Ok(KeyValueToken { key, value })
}

/// Parse a case name, an optional `:`, and any boolean expressions.
fn case_segment<'i>(input: &mut &'i str) -> ModalResult<CaseToken<'i>> {
    let name = case_name(input)?;
    let _ = opt((ws, ':')).parse_next(input)?;
    let expressions: Vec<BooleanToken<'i>> = repeat(
        0..,
        preceded(ws, or_expr.with_taken())
            .map(|(tree, text)| BooleanToken { text, tree }),
    )
    .parse_next(input)?;
    Ok(CaseToken { name, expressions })
}

/// Parse a case name: a letter followed by letters, digits, `_` or `-`.
fn case_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
    )
        .take()
        .parse_next(input)
}

/// Parse an `@name values` sample segment.
fn sample_segment<'i>(input: &mut &'i str) -> ModalResult<SampleToken<'i>> {
    let name = preceded('@', identifier).parse_next(input)?;
    let values: Option<Vec<&'i str>> =
        opt(preceded(ws, separated(1.., sample_value, (ws, ',', ws)))).parse_next(input)?;
    Ok(SampleToken {
        name,
        values: values.unwrap_or_default(),
    })
}

/// Parse one raw sample value: everything up to a comma, `@`, or whitespace.
fn sample_value<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c != ',' && c != '@' && !c.is_whitespace()).parse_next(input)
}

/// Parse `or`/`xor` chains (loosest binding).
fn or_expr<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let first = and_expr(input)?;
    let rest: Vec<(&'i str, ExprToken<'i>)> = repeat(
        0..,
        (
            delimited(ws, alt((keyword("or"), keyword("xor"))), ws),
            and_expr,
        ),
    )
    .parse_next(input)?;
    Ok(fold_infix(first, rest))
}

/// Parse `and` chains.
fn and_expr<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let first = not_expr(input)?;
    let rest: Vec<(&'i str, ExprToken<'i>)> =
        repeat(0.., (delimited(ws, keyword("and"), ws), not_expr)).parse_next(input)?;
    Ok(fold_infix(first, rest))
}

/// Parse `not x` (binds looser than relations, tighter than `and`).
fn not_expr<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    alt((
        (terminated(keyword("not"), ws), not_expr).map(|(operator, operand)| {
            ExprToken::Prefix {
                operator,
                operand: Box::new(operand),
            }
        }),
        rel_expr,
    ))
    .parse_next(input)
}

/// Parse a relation, a boolean keyword, or a parenthesized boolean.
fn rel_expr<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    alt((
        alt((keyword("true"), keyword("false"))).map(ExprToken::Keyword),
        relation,
        delimited(('(', ws), or_expr, (ws, ')')).map(|inner| ExprToken::Paren(Box::new(inner))),
    ))
    .parse_next(input)
}

/// Parse `list op list`.
fn relation<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let left = list(input)?;
    let operator = delimited(ws, relational_operator, ws).parse_next(input)?;
    let right = list(input)?;
    Ok(ExprToken::Infix {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Parse one or two relational operator characters.
fn relational_operator<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1..=2, ['=', '!', '<', '>']).parse_next(input)
}

/// Parse comma-separated values; a single value is returned unwrapped.
fn list<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let mut items: Vec<ExprToken<'i>> =
        separated(1.., range_expr, (ws, ',', ws)).parse_next(input)?;
    if items.len() > 1 {
        return Ok(ExprToken::List(items));
    }
    items
        .pop()
        .ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// Parse `value` or `value..value`.
fn range_expr<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let min = arith(input)?;
    let max = opt((delimited(ws, "..", ws), arith)).parse_next(input)?;
    Ok(match max {
        Some((operator, max)) => ExprToken::Span {
            operator,
            min: Box::new(min),
            max: Box::new(max),
        },
        None => min,
    })
}

/// Parse arithmetic chains such as `n % 100`.
fn arith<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    let first = prefix(input)?;
    let rest: Vec<(&'i str, ExprToken<'i>)> =
        repeat(0.., (delimited(ws, arith_operator, ws), prefix)).parse_next(input)?;
    Ok(fold_infix(first, rest))
}

fn arith_operator<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((keyword("mod"), one_of(['%', '*', '/', '+', '-']).take())).parse_next(input)
}

/// Parse sign prefixes: `-x`, `+x`, `~x`.
fn prefix<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    alt((
        (terminated(one_of(['-', '+', '~']).take(), ws), prefix).map(|(operator, operand)| {
            ExprToken::Prefix {
                operator,
                operand: Box::new(operand),
            }
        }),
        primary,
    ))
    .parse_next(input)
}

/// Parse a number, an operand word, or a parenthesized value.
fn primary<'i>(input: &mut &'i str) -> ModalResult<ExprToken<'i>> {
    alt((
        number.map(ExprToken::Number),
        word.map(ExprToken::Word),
        delimited(('(', ws), list, (ws, ')')).map(|inner| ExprToken::Paren(Box::new(inner))),
    ))
    .parse_next(input)
}

/// Parse `digits ('.' digits)?`.
fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)
}

/// Parse a bare word that is not a keyword.
fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_')
        .verify(|w: &str| !KEYWORDS.contains(&w))
        .parse_next(input)
}

/// Parse an identifier (rule info keys, sample names).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// A keyword that is not the prefix of a longer word.
fn keyword<'i>(text: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    terminated(text, not(one_of(is_ident_cont)))
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Fold `first (op next)*` into a left-associative infix tree.
fn fold_infix<'i>(first: ExprToken<'i>, rest: Vec<(&'i str, ExprToken<'i>)>) -> ExprToken<'i> {
    rest.into_iter()
        .fold(first, |left, (operator, right)| ExprToken::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
}
