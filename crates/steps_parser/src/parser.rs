use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::multispace0,
    combinator::{map, opt},
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use std::rc::Rc;

use crate::error::ParseError;
use steps_ast::{Constant, Equation, Expr};

/// Convert a superscript digit character to its numeric value.
fn superscript_to_digit(c: char) -> Option<u32> {
    match c {
        '⁰' => Some(0),
        '¹' => Some(1),
        '²' => Some(2),
        '³' => Some(3),
        '⁴' => Some(4),
        '⁵' => Some(5),
        '⁶' => Some(6),
        '⁷' => Some(7),
        '⁸' => Some(8),
        '⁹' => Some(9),
        _ => None,
    }
}

/// Parse a run of superscript digits; returns the value and the rest.
fn parse_superscript_number(input: &str) -> Option<(u64, &str)> {
    let mut value: u64 = 0;
    let mut byte_len = 0;
    for c in input.chars() {
        match superscript_to_digit(c) {
            Some(d) => {
                value = value * 10 + d as u64;
                byte_len += c.len_utf8();
            }
            None => break,
        }
    }
    if byte_len > 0 {
        Some((value, &input[byte_len..]))
    } else {
        None
    }
}

/// Convert a decimal string to BigRational: "8.2" -> 41/5, ".5" -> 1/2.
fn decimal_to_rational(integer_part: &str, fractional_part: &str) -> BigRational {
    let k = fractional_part.len();
    if k == 0 {
        let n: BigInt = integer_part.parse().unwrap_or_else(|_| BigInt::from(0));
        return BigRational::from_integer(n);
    }

    let ten = BigInt::from(10);
    let mut denominator = BigInt::from(1);
    for _ in 0..k {
        denominator *= &ten;
    }

    let int_val: BigInt = if integer_part.is_empty() {
        BigInt::from(0)
    } else {
        integer_part.parse().unwrap_or_else(|_| BigInt::from(0))
    };
    let frac_val: BigInt = fractional_part.parse().unwrap_or_else(|_| BigInt::from(0));

    let numerator = int_val * &denominator + frac_val;
    BigRational::new(numerator, denominator)
}

// Numeric literals: 123, 8.2, .5, 8.
fn parse_number(input: &str) -> IResult<&str, Rc<Expr>> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(pair(tag("."), take_while(is_digit))),
    )(input)?;

    let (int_str, frac_str) = match maybe_frac {
        Some((_, frac)) => (int_part, frac),
        None => (int_part, ""),
    };

    if int_str.is_empty() && frac_str.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    Ok((
        remaining,
        Expr::rational(decimal_to_rational(int_str, frac_str)),
    ))
}

// Constants 'pi' and 'e' with a word-boundary check so identifiers like
// 'even' or 'pivot' are not clipped.
fn parse_constant(input: &str) -> IResult<&str, Rc<Expr>> {
    fn is_word_boundary(remaining: &str) -> bool {
        remaining
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_')
    }

    if input.starts_with("pi") && is_word_boundary(&input[2..]) {
        return Ok((&input[2..], Expr::constant(Constant::Pi)));
    }
    if input.starts_with('e') && is_word_boundary(&input[1..]) {
        return Ok((&input[1..], Expr::constant(Constant::E)));
    }
    if input.starts_with('π') {
        return Ok((&input['π'.len_utf8()..], Expr::constant(Constant::Pi)));
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}

// Identifiers: letter or underscore, then letters/digits/underscores.
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    let first = chars.next();
    if !matches!(first, Some(c) if c.is_ascii_alphabetic() || c == '_') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Alpha,
        )));
    }

    let mut len = 1;
    for c in chars {
        if c.is_ascii_alphanumeric() || c == '_' {
            len += c.len_utf8();
        } else {
            break;
        }
    }

    Ok((&input[len..], &input[..len]))
}

fn parse_variable(input: &str) -> IResult<&str, Rc<Expr>> {
    map(parse_identifier, |s: &str| Expr::var(s))(input)
}

fn parse_parens(input: &str) -> IResult<&str, Rc<Expr>> {
    delimited(
        preceded(multispace0, tag("(")),
        parse_expr,
        preceded(multispace0, tag(")")),
    )(input)
}

fn parse_function(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = preceded(multispace0, tag("("))(input)?;
    let (input, args) = separated_list0(preceded(multispace0, tag(",")), parse_expr)(input)?;
    let (input, _) = preceded(multispace0, tag(")"))(input)?;

    Ok((input, Expr::func(name, args)))
}

// Unicode square root: √x, √(x+1)
fn parse_unicode_root(input: &str) -> IResult<&str, Rc<Expr>> {
    let input = input.trim_start();
    if !input.starts_with('√') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    let after = &input['√'.len_utf8()..];
    let (remaining, arg) = alt((parse_parens, parse_postfix))(after)?;
    Ok((remaining, Expr::func("sqrt", vec![arg])))
}

fn parse_atom(input: &str) -> IResult<&str, Rc<Expr>> {
    preceded(
        multispace0,
        alt((
            parse_unicode_root,
            parse_number,
            parse_function,
            parse_constant,
            parse_variable,
            parse_parens,
        )),
    )(input)
}

// Postfix: factorials bind tightest, then attached superscript exponents
// (x² -> x^2). No whitespace is allowed before a superscript.
fn parse_postfix(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, atom) = parse_atom(input)?;

    let (input, with_factorial) = fold_many0(
        preceded(multispace0, tag("!")),
        move || atom.clone(),
        |acc, _| Expr::func("fact", vec![acc]),
    )(input)?;

    if let Some((exp_value, remaining)) = parse_superscript_number(input) {
        let exp = Expr::rational(BigRational::from_integer(BigInt::from(exp_value)));
        return Ok((remaining, Expr::pow(with_factorial, exp)));
    }

    Ok((input, with_factorial))
}

// Power is right-associative: 2^3^4 = 2^(3^4). Negative exponents allowed.
fn parse_power(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, base) = parse_postfix(input)?;

    let try_caret = preceded::<_, _, _, nom::error::Error<&str>, _, _>(
        multispace0::<_, nom::error::Error<&str>>,
        tag::<_, _, nom::error::Error<&str>>("^"),
    )(input);

    if let Ok((input, _)) = try_caret {
        let (input, exp) = parse_power_exponent(input)?;
        Ok((input, Expr::pow(base, exp)))
    } else {
        Ok((input, base))
    }
}

fn parse_power_exponent(input: &str) -> IResult<&str, Rc<Expr>> {
    preceded(
        multispace0,
        alt((
            map(pair(tag("-"), parse_power_exponent), |(_, expr)| {
                Expr::neg(expr)
            }),
            map(pair(tag("+"), parse_power_exponent), |(_, expr)| expr),
            parse_power,
        )),
    )(input)
}

fn parse_unary(input: &str) -> IResult<&str, Rc<Expr>> {
    alt((
        map(
            pair(preceded(multispace0, tag("-")), parse_unary),
            |(_, expr)| Expr::neg(expr),
        ),
        parse_power,
    ))(input)
}

// Explicit * and /, then implicit multiplication chains (2x, 3sin(x), 2pi).
fn parse_term(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, init) = parse_unary(input)?;

    let (input, result) = fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("/")))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, val)| match op {
            "*" => Expr::mul(acc, val),
            "/" => Expr::div(acc, val),
            _ => unreachable!(),
        },
    )(input)?;

    parse_implicit_mul_chain(input, result)
}

// 2xy -> 2*x*y; only fires with no whitespace between the factors.
fn parse_implicit_mul_chain(input: &str, acc: Rc<Expr>) -> IResult<&str, Rc<Expr>> {
    let first_char = input.chars().next();
    match first_char {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '(' || c == '√' => {
            if can_implicit_mul(&acc) {
                if let Ok((remaining, next_factor)) = parse_unary(input) {
                    let new_acc = Expr::mul(acc, next_factor);
                    return parse_implicit_mul_chain(remaining, new_acc);
                }
            }
            Ok((input, acc))
        }
        _ => Ok((input, acc)),
    }
}

// Implicit multiplication is only legal after something number-like; a bare
// variable must not swallow a following identifier.
fn can_implicit_mul(node: &Expr) -> bool {
    match node {
        Expr::Number(_) => true,
        Expr::Pow(_, _) => true,
        Expr::Function(name, args) => name == "fact" && args.len() == 1,
        Expr::Neg(inner) => can_implicit_mul(inner),
        Expr::Mul(_, right) | Expr::Div(_, right) => can_implicit_mul(right),
        _ => false,
    }
}

fn parse_expr(input: &str) -> IResult<&str, Rc<Expr>> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, alt((tag("+"), tag("-")))), parse_term),
        move || init.clone(),
        |acc, (op, val)| match op {
            "+" => Expr::add(acc, val),
            "-" => Expr::sub(acc, val),
            _ => unreachable!(),
        },
    )(input)
}

/// Parse a complete expression; the whole input must be consumed.
pub fn parse(input: &str) -> Result<Rc<Expr>, ParseError> {
    let (remaining, expr) =
        parse_expr(input).map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    Ok(expr)
}

/// Parse `lhs = rhs`. Errors when there is no `=` at all.
pub fn parse_equation(input: &str) -> Result<Equation, ParseError> {
    let Some((lhs_text, rhs_text)) = input.split_once('=') else {
        return Err(ParseError::MissingEquals);
    };
    let lhs = parse(lhs_text)?;
    let rhs = parse(rhs_text)?;
    Ok(Equation { lhs, rhs })
}
