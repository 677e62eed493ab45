// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for scalar values as defined in RFC 5545 Section 3.3.

use chumsky::prelude::*;

use crate::value::Extra;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
pub(crate) fn value_float<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> + Clone {
    let digits = select! { c @ '0'..='9' => c }.repeated().at_least(1);

    sign()
        .or_not()
        .then(digits.clone())
        .then(just('.').then(digits).or_not())
        .to_slice()
        .try_map(|s: &str, span| {
            let unsigned = s.strip_prefix('+').unwrap_or(s);
            match lexical::parse::<f64, _>(unsigned) {
                Ok(f) if f.is_finite() => Ok(f),
                _ => Err(Rich::custom(span, format!("`{s}` is not a finite float"))),
            }
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
pub(crate) fn value_integer<'src>() -> impl Parser<'src, &'src str, i32, Extra<'src>> + Clone {
    sign()
        .or_not()
        .then(select! { c @ '0'..='9' => c }.repeated().at_least(1))
        .to_slice()
        .try_map(|s: &str, span| {
            let digits = s.strip_prefix('+').unwrap_or(s);
            lexical::parse::<i32, _>(digits)
                .map_err(|_| Rich::custom(span, format!("`{s}` is out of range")))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// boolean    = "TRUE" / "FALSE"
/// ```
pub(crate) fn value_boolean<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Clone {
    // case-sensitive
    choice((just("TRUE").to(true), just("FALSE").to(false)))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// binary     = *(4b-char) [b-end]
/// ; A "BASE64" encoded character string, as defined by [RFC4648].
///
/// b-end      = (2b-char "==") / (3b-char "=")
///
/// b-char = ALPHA / DIGIT / "+" / "/"
/// ```
pub(crate) fn value_binary<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    // b-char = ALPHA / DIGIT / "+" / "/"
    let b_char = select! {
        'A'..='Z' => (),
        'a'..='z' => (),
        '0'..='9' => (),
        '+' => (),
        '/' => (),
    };

    // 4b-char
    let quartet = b_char.repeated().exactly(4).ignored();

    // b-end = (2b-char "==") / (3b-char "=")
    let b_end = b_char
        .repeated()
        .exactly(2)
        .then_ignore(just("=="))
        .or(b_char.repeated().exactly(3).then_ignore(just('=')))
        .ignored();

    // *(4b-char) [b-end]
    quartet.repeated().ignore_then(b_end.or_not()).ignored()
}

const fn sign<'src>() -> impl Parser<'src, &'src str, char, Extra<'src>> + Copy {
    select! { c @ ('+' | '-') => c }
}
