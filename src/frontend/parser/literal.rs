use std::fmt::Write;
use std::str::FromStr;

use lalrpop_util::ParseError;

use crate::frontend::ast::{Expression, ExpressionKind, Type};
use crate::frontend::error::LiteralError;
use crate::meta::LocationMeta;

/// literal expression located at given offset, used by grammar actions
pub fn located_literal<T>(
    offset: usize, t: Type, text: &str,
) -> Result<Box<Expression<LocationMeta>>, ParseError<usize, T, LiteralError>> {
    match literal(t, text) {
        Ok(kind) => Ok(Box::new(Expression::new(kind, LocationMeta::from(offset)))),
        Err(message) => Err(ParseError::User { error: LiteralError { offset, message } }),
    }
}

/// build literal expression from its source text,
/// hex literals are canonicalized to int literals of the same value
pub fn literal<MetaT>(t: Type, text: &str) -> Result<ExpressionKind<MetaT>, String> {
    match t {
        Type::Int => {
            i32::from_str(text)
                .map(|val| ExpressionKind::LitInt { val })
                .map_err(|_| format!("integer literal {} does not fit in 32 bits", text))
        }
        Type::Hex => {
            let digits = &text[2..];
            if digits.len() > 8 {
                return Err(format!("hexadecimal literal {} does not fit in 32 bits", text));
            }
            u32::from_str_radix(digits, 16)
                .map(|val| ExpressionKind::LitInt { val: val as i32 })
                .map_err(|_| format!("invalid hexadecimal literal {}", text))
        }
        Type::Double => {
            f64::from_str(text)
                .map(|val| ExpressionKind::LitDouble { val })
                .map_err(|_| format!("invalid real literal {}", text))
        }
        Type::Bool => {
            match text {
                "true" => Ok(ExpressionKind::LitBool { val: true }),
                "false" => Ok(ExpressionKind::LitBool { val: false }),
                _ => Err(format!("invalid boolean literal {}", text)),
            }
        }
        Type::Void => Err(format!("literal {} has no type", text)),
    }
}

/// translate quoted string literal to the contents of LLVM c"..." constant:
/// \n, \" and \\ become hex escapes, any other backslash is dropped,
/// bytes that are not printable ascii are hex escaped as well
pub fn escape_string(quoted: &str) -> String {
    let content = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted);
    let mut escaped = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => escaped.push_str("\\0A"),
                Some('"') => escaped.push_str("\\22"),
                Some('\\') => escaped.push_str("\\5C"),
                Some(other) => push_escaped(&mut escaped, other),
                None => {}
            }
        } else {
            push_escaped(&mut escaped, c);
        }
    }
    escaped
}

fn push_escaped(escaped: &mut String, c: char) {
    if c.is_ascii() && !c.is_ascii_control() && c != '"' {
        escaped.push(c);
    } else {
        let mut buf = [0u8; 4];
        for byte in c.encode_utf8(&mut buf).bytes() {
            // writing to String never fails
            let _ = write!(escaped, "\\{:02X}", byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(t: Type, text: &str) -> ExpressionKind<()> {
        literal(t, text).unwrap()
    }

    #[test]
    fn hex_literal_is_canonical_int() {
        assert_eq!(lit(Type::Hex, "0x1A"), lit(Type::Int, "26"));
        assert_eq!(lit(Type::Hex, "0XfF"), ExpressionKind::LitInt { val: 255 });
        assert_eq!(lit(Type::Hex, "0xFFFFFFFF"), ExpressionKind::LitInt { val: -1 });
    }

    #[test]
    fn out_of_range_literals_are_rejected() {
        assert!(literal::<()>(Type::Int, "2147483648").is_err());
        assert!(literal::<()>(Type::Hex, "0x100000000").is_err());
        assert_eq!(lit(Type::Int, "2147483647"), ExpressionKind::LitInt { val: i32::max_value() });
    }

    #[test]
    fn real_literal() {
        assert_eq!(lit(Type::Double, "0.25"), ExpressionKind::LitDouble { val: 0.25 });
    }

    #[test]
    fn recognized_escapes_become_hex() {
        assert_eq!(escape_string(r#""a\nb""#), "a\\0Ab");
        assert_eq!(escape_string(r#""say \"hi\"""#), "say \\22hi\\22");
        assert_eq!(escape_string(r#""back\\slash""#), "back\\5Cslash");
    }

    #[test]
    fn unknown_escape_drops_backslash() {
        assert_eq!(escape_string(r#""\q""#), "q");
        assert_eq!(escape_string(r#""a\qb\n""#), "aqb\\0A");
        assert_eq!(escape_string(r#""\\\q""#), "\\5Cq");
    }

    #[test]
    fn non_ascii_is_escaped_bytewise() {
        assert_eq!(escape_string("\"\u{e9}\""), "\\C3\\A9");
        assert_eq!(escape_string("\"\t\""), "\\09");
    }
}
