//! Line classification.
//!
//! Scripts are whitespace-tokenized, one statement per line. The first
//! token decides the statement form; everything structural about a line
//! is validated here, before the stack machine sees it.

use gfd_types::ScriptErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `% <file>`
    Import(String),
    /// `? <tokens...>`
    Query(Vec<String>),
    /// `> <arity> <name> = <body...>`
    MacroDef {
        arity: usize,
        name: String,
        body: Vec<String>,
    },
    /// `<names...> = <tokens...>`
    Construction {
        names: Vec<String>,
        tokens: Vec<String>,
    },
}

/// Classify one line. Blank lines and comments yield `None`.
pub fn classify(line: &str) -> Result<Option<Statement>, ScriptErrorKind> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(None);
    };
    if first.starts_with('#') {
        return Ok(None);
    }
    match first {
        "%" => match &tokens[1..] {
            [file] => Ok(Some(Statement::Import(file.to_string()))),
            [] => Err(ScriptErrorKind::MalformedImport(
                "missing file name".to_string(),
            )),
            _ => Err(ScriptErrorKind::MalformedImport(
                "expected a single file name".to_string(),
            )),
        },
        "?" => Ok(Some(Statement::Query(owned(&tokens[1..])))),
        ">" => macro_def(&tokens[1..]),
        _ => {
            let equals = tokens
                .iter()
                .position(|&t| t == "=")
                .ok_or(ScriptErrorKind::MissingEquals)?;
            Ok(Some(Statement::Construction {
                names: owned(&tokens[..equals]),
                tokens: owned(&tokens[equals + 1..]),
            }))
        }
    }
}

fn macro_def(tokens: &[&str]) -> Result<Option<Statement>, ScriptErrorKind> {
    let malformed = |reason: &str| ScriptErrorKind::MalformedMacro(reason.to_string());
    let [arity, name, equals, body @ ..] = tokens else {
        return Err(malformed("expected '<arity> <name> = <body>'"));
    };
    let arity: usize = arity
        .parse()
        .map_err(|_| malformed("arity must be an integer"))?;
    if *equals != "=" {
        return Err(malformed("expected '=' after the macro name"));
    }
    // Placeholders are range-checked at definition time.
    for token in body {
        if let Some(rest) = token.strip_prefix('$') {
            let valid = rest
                .parse::<usize>()
                .is_ok_and(|i| (1..=arity).contains(&i));
            if !valid {
                return Err(ScriptErrorKind::BadPlaceholder(token.to_string()));
            }
        }
    }
    Ok(Some(Statement::MacroDef {
        arity,
        name: name.to_string(),
        body: owned(body),
    }))
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify("").unwrap(), None);
        assert_eq!(classify("   ").unwrap(), None);
        assert_eq!(classify("# a comment").unwrap(), None);
        assert_eq!(classify("#comment").unwrap(), None);
    }

    #[test]
    fn test_construction_statement() {
        let stmt = classify("M = A B midpoint").unwrap().unwrap();
        assert_eq!(
            stmt,
            Statement::Construction {
                names: vec!["M".to_string()],
                tokens: vec!["A".into(), "B".into(), "midpoint".into()],
            }
        );
    }

    #[test]
    fn test_missing_equals() {
        assert_eq!(
            classify("M A B midpoint").unwrap_err(),
            ScriptErrorKind::MissingEquals
        );
    }

    #[test]
    fn test_import_and_query() {
        assert_eq!(
            classify("% shared").unwrap().unwrap(),
            Statement::Import("shared".to_string())
        );
        assert!(matches!(
            classify("%").unwrap_err(),
            ScriptErrorKind::MalformedImport(_)
        ));
        assert_eq!(
            classify("? A B C is_collinear").unwrap().unwrap(),
            Statement::Query(vec![
                "A".into(),
                "B".into(),
                "C".into(),
                "is_collinear".into()
            ])
        );
    }

    #[test]
    fn test_macro_definition() {
        let stmt = classify("> 3 euler_line = $1 $2 $3 circumcenter $1 $2 $3 centroid line")
            .unwrap()
            .unwrap();
        match stmt {
            Statement::MacroDef { arity, name, body } => {
                assert_eq!(arity, 3);
                assert_eq!(name, "euler_line");
                assert_eq!(body.len(), 9);
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn test_macro_rejects_bad_arity_and_placeholder() {
        assert!(matches!(
            classify("> x f = $1").unwrap_err(),
            ScriptErrorKind::MalformedMacro(_)
        ));
        assert!(matches!(
            classify("> 1 f = $2").unwrap_err(),
            ScriptErrorKind::BadPlaceholder(_)
        ));
        assert!(matches!(
            classify("> 1 f = $0").unwrap_err(),
            ScriptErrorKind::BadPlaceholder(_)
        ));
        assert!(matches!(
            classify("> 2 f").unwrap_err(),
            ScriptErrorKind::MalformedMacro(_)
        ));
    }
}
