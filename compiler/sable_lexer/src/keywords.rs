//! Keyword resolution.
//!
//! Identifiers are checked against the reserved words once the identifier
//! is complete. The lookup buckets by length first (keywords are 2 to 10
//! bytes) and only compares against the handful of keywords of that length.

use sable_ir::Keyword;

/// Look up a reserved word by its bytes.
#[inline]
pub(crate) fn lookup(text: &[u8]) -> Option<Keyword> {
    if !(2..=10).contains(&text.len()) || !text[0].is_ascii_lowercase() {
        return None;
    }

    match text.len() {
        2 => match text {
            b"do" => Some(Keyword::Do),
            b"in" => Some(Keyword::In),
            b"of" => Some(Keyword::Of),
            b"if" => Some(Keyword::If),
            _ => None,
        },
        3 => match text {
            b"for" => Some(Keyword::For),
            b"let" => Some(Keyword::Let),
            b"new" => Some(Keyword::New),
            b"try" => Some(Keyword::Try),
            b"var" => Some(Keyword::Var),
            _ => None,
        },
        4 => match text {
            b"void" => Some(Keyword::Void),
            b"with" => Some(Keyword::With),
            b"this" => Some(Keyword::This),
            b"case" => Some(Keyword::Case),
            b"else" => Some(Keyword::Else),
            _ => None,
        },
        5 => match text {
            b"break" => Some(Keyword::Break),
            b"catch" => Some(Keyword::Catch),
            b"class" => Some(Keyword::Class),
            b"const" => Some(Keyword::Const),
            b"super" => Some(Keyword::Super),
            b"throw" => Some(Keyword::Throw),
            b"while" => Some(Keyword::While),
            b"yield" => Some(Keyword::Yield),
            _ => None,
        },
        6 => match text {
            b"delete" => Some(Keyword::Delete),
            b"export" => Some(Keyword::Export),
            b"import" => Some(Keyword::Import),
            b"return" => Some(Keyword::Return),
            b"switch" => Some(Keyword::Switch),
            b"typeof" => Some(Keyword::Typeof),
            _ => None,
        },
        7 => match text {
            b"default" => Some(Keyword::Default),
            b"extends" => Some(Keyword::Extends),
            b"finally" => Some(Keyword::Finally),
            _ => None,
        },
        8 => match text {
            b"function" => Some(Keyword::Function),
            b"continue" => Some(Keyword::Continue),
            b"debugger" => Some(Keyword::Debugger),
            _ => None,
        },
        10 => match text {
            b"instanceof" => Some(Keyword::Instanceof),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_resolves() {
        for kw in Keyword::ALL {
            assert_eq!(lookup(kw.as_str().as_bytes()), Some(kw), "{kw}");
        }
    }

    #[test]
    fn near_misses_stay_identifiers() {
        for text in ["d", "doo", "Function", "instanceOf", "null", "true", "returns", "$if", "i"] {
            assert_eq!(lookup(text.as_bytes()), None, "{text}");
        }
    }
}
