//! Recursive-descent grammar over `nom` combinators.
//!
//! Binding, loosest to tightest:
//!
//! ```text
//! expr  := term (("+" | "-") term)*
//! term  := unary (("*" | "/") unary | implicit-factor)*
//! unary := "-" unary | power
//! power := atom (("^" | "**") exponent)?      right-associative
//! atom  := number | call | constant | symbol | "(" expr ")"
//! ```
//!
//! Implicit multiplication folds a factor written directly against a
//! numeric one: `2pi`, `2x^2`, `3(1 + 2)`, `2sin(30)`. Whitespace breaks
//! the chain, so `2 x` stays a parse error.

use crate::error::ParseError;
use calc_ast::Constant;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::multispace0,
    combinator::{map, opt},
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};

/// Untyped syntax tree, one node per source construct.
///
/// Literals keep their machine type: `2` is [`ParseNode::Int`] and `2.0`
/// is [`ParseNode::Float`], so the evaluator can route them differently.
/// Call names stay strings here; the evaluator resolves them.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Int(i64),
    Float(f64),
    Constant(Constant),
    Symbol(String),
    Add(Box<ParseNode>, Box<ParseNode>),
    Sub(Box<ParseNode>, Box<ParseNode>),
    Mul(Box<ParseNode>, Box<ParseNode>),
    Div(Box<ParseNode>, Box<ParseNode>),
    Pow(Box<ParseNode>, Box<ParseNode>),
    Neg(Box<ParseNode>),
    Call(String, Vec<ParseNode>),
}

// Parser for numeric literals (integers and decimals)
// Supports: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    // Optional integer part, then optional (dot + fractional part)
    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let (int_str, frac_str) = match maybe_frac {
        Some((_, frac)) => (int_part, frac),
        None => (int_part, ""),
    };

    // Must have digits somewhere; a lone "." is not a number
    if int_str.is_empty() && frac_str.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    // A dot anywhere makes the literal a float, as in "8." and ".5"
    if maybe_frac.is_some() {
        let text = format!("{}.{}", int_str, frac_str);
        return match text.parse::<f64>() {
            Ok(value) => Ok((remaining, ParseNode::Float(value))),
            Err(_) => Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Float,
            ))),
        };
    }

    // Integer literals wider than i64 degrade to floats, the same way
    // machine-int arithmetic overflows into floats downstream
    match int_str.parse::<i64>() {
        Ok(n) => Ok((remaining, ParseNode::Int(n))),
        Err(_) => match int_str.parse::<f64>() {
            Ok(value) => Ok((remaining, ParseNode::Float(value))),
            Err(_) => Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Digit,
            ))),
        },
    }
}

// Parser for constants with word boundary check
// 'e' and 'pi' should not match prefixes of longer identifiers (e.g., 'exp', 'pivot')
fn parse_constant(input: &str) -> IResult<&str, ParseNode> {
    // Helper: check if next char would continue an identifier
    fn is_word_boundary(remaining: &str) -> bool {
        remaining
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_')
    }

    // Try 'pi' first (longer prefix)
    if input.starts_with("pi") && is_word_boundary(&input[2..]) {
        return Ok((&input[2..], ParseNode::Constant(Constant::Pi)));
    }

    if let Some(rest) = input.strip_prefix('π') {
        return Ok((rest, ParseNode::Constant(Constant::Pi)));
    }

    // 'e' must not be followed by an identifier char
    if input.starts_with('e') && is_word_boundary(&input[1..]) {
        return Ok((&input[1..], ParseNode::Constant(Constant::E)));
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}

// Parser for identifiers (symbol/function names)
// Start with letter or underscore, then letters, digits, underscores
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    let first = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Alpha,
            )))
        }
    };

    let mut len = first.len_utf8();
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' {
            len += c.len_utf8();
        } else {
            break;
        }
    }

    Ok((&input[len..], &input[..len]))
}

fn parse_symbol(input: &str) -> IResult<&str, ParseNode> {
    map(parse_identifier, |s: &str| {
        ParseNode::Symbol(s.to_string())
    })(input)
}

fn parse_parens(input: &str) -> IResult<&str, ParseNode> {
    delimited(
        preceded(multispace0, tag("(")),
        parse_expr,
        preceded(multispace0, tag(")")),
    )(input)
}

// Parser for function calls: name(arg, ...)
// Names are not resolved here; the evaluator decides what "sin" means
fn parse_call(input: &str) -> IResult<&str, ParseNode> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = preceded(multispace0, tag("("))(input)?;
    let (input, args) = separated_list0(preceded(multispace0, tag(",")), parse_expr)(input)?;
    let (input, _) = preceded(multispace0, tag(")"))(input)?;

    Ok((input, ParseNode::Call(name.to_string(), args)))
}

// Atom
fn parse_atom(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((
            parse_number,
            parse_call,
            parse_constant,
            parse_symbol,
            parse_parens,
        )),
    )(input)
}

// Power - right associative: 2^3^2 = 2^(3^2), not (2^3)^2
// Accepts "**" as an alternate spelling of "^"
fn parse_power_op(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((tag("**"), tag("^"))))(input)
}

fn parse_power(input: &str) -> IResult<&str, ParseNode> {
    let (input, base) = parse_atom(input)?;

    if let Ok((input, _)) = parse_power_op(input) {
        let (input, exp) = parse_power_exponent(input)?;
        Ok((input, ParseNode::Pow(Box::new(base), Box::new(exp))))
    } else {
        Ok((input, base))
    }
}

// Parser for exponents: allows a sign prefix (x^-2), then recurses for
// chained powers (2^3^2)
fn parse_power_exponent(input: &str) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((
            map(pair(tag("-"), parse_power_exponent), |(_, expr)| {
                ParseNode::Neg(Box::new(expr))
            }),
            map(pair(tag("+"), parse_power_exponent), |(_, expr)| expr),
            parse_power,
        )),
    )(input)
}

// Unary
fn parse_unary(input: &str) -> IResult<&str, ParseNode> {
    alt((
        map(
            pair(preceded(multispace0, tag("-")), parse_unary),
            |(_, expr)| ParseNode::Neg(Box::new(expr)),
        ),
        parse_power,
    ))(input)
}

// Term - handles explicit * and /, then implicit multiplication
fn parse_term(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_unary(input)?;

    let (input, result) = fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("/")))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" => ParseNode::Mul(Box::new(acc), Box::new(val)),
            _ => ParseNode::Div(Box::new(acc), Box::new(val)),
        },
    )(input)?;

    parse_implicit_mul_chain(input, result)
}

// Implicit multiplication chain: 2x → 2*x, 2xy → 2*x*y
// Only fires when the factor is written directly against the previous
// token; whitespace between them keeps the input two separate terms
fn parse_implicit_mul_chain(input: &str, acc: ParseNode) -> IResult<&str, ParseNode> {
    let first_char = input.chars().next();

    match first_char {
        // Letter (unicode, so π folds too), underscore, or open paren
        Some(c) if c.is_alphabetic() || c == '_' || c == '(' => {
            if can_implicit_mul(&acc) {
                if let Ok((remaining, next_factor)) = parse_unary(input) {
                    let new_acc = ParseNode::Mul(Box::new(acc), Box::new(next_factor));
                    return parse_implicit_mul_chain(remaining, new_acc);
                }
            }
            Ok((input, acc))
        }
        _ => Ok((input, acc)),
    }
}

// A factor can follow implicitly only after something number-like;
// `x y` stays an error while `2y` and `x^2(x+1)` parse
fn can_implicit_mul(node: &ParseNode) -> bool {
    match node {
        ParseNode::Int(_) | ParseNode::Float(_) => true,
        ParseNode::Pow(_, _) => true,
        ParseNode::Mul(_, right) | ParseNode::Div(_, right) => can_implicit_mul(right),
        _ => false,
    }
}

// Expr
fn parse_expr(input: &str) -> IResult<&str, ParseNode> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => ParseNode::Add(Box::new(acc), Box::new(val)),
            _ => ParseNode::Sub(Box::new(acc), Box::new(val)),
        },
    )(input)
}

/// Parse a complete input line into a [`ParseNode`].
///
/// The whole line must be consumed; trailing garbage is an error rather
/// than silently ignored.
pub fn parse(input: &str) -> Result<ParseNode, ParseError> {
    let (remaining, node) = parse_expr(input).map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    Ok(node)
}
