//! Helpers for producing C# source text.

/// Render a verbatim string literal (`@"..."`), doubling embedded quotes.
/// `None` renders as `null`.
pub fn verbatim_literal(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("@\"{}\"", value.replace('"', "\"\"")),
        None => "null".to_string(),
    }
}

/// Turn arbitrary text into a valid C# identifier.
///
/// Characters that cannot appear in an identifier become `_`, and a leading
/// digit is prefixed with `_`. Empty input yields `_`.
pub fn sanitize_identifier(text: &str) -> String {
    let mut identifier: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    match identifier.chars().next() {
        None => identifier.push('_'),
        Some(first) if first.is_ascii_digit() => identifier.insert(0, '_'),
        Some(_) => {}
    }
    identifier
}

/// Class name generated for a template at `relative_path`.
///
/// `/Views/Home/Index.cshtml` becomes `Views_Home_Index`; without a path the
/// class is called `GeneratedDocument`.
pub fn class_name_from_path(relative_path: Option<&str>) -> String {
    let Some(path) = relative_path else {
        return "GeneratedDocument".to_string();
    };
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches('/');
    let stem = match path.rfind('.') {
        Some(dot) if dot > path.rfind('/').map_or(0, |slash| slash + 1) => &path[..dot],
        _ => path,
    };
    if stem.is_empty() {
        return "GeneratedDocument".to_string();
    }
    sanitize_identifier(&stem.replace('/', "_"))
}

/// Returns true if `text` is a dotted C# name such as `Company.App.Views`.
pub fn is_qualified_name(text: &str) -> bool {
    !text.is_empty()
        && text.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_literal() {
        assert_eq!(verbatim_literal(Some("/a/b")), "@\"/a/b\"");
        assert_eq!(verbatim_literal(Some("say \"hi\"")), "@\"say \"\"hi\"\"\"");
        assert_eq!(verbatim_literal(None), "null");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("Index"), "Index");
        assert_eq!(sanitize_identifier("my-page"), "my_page");
        assert_eq!(sanitize_identifier("404"), "_404");
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn test_class_name_from_path() {
        assert_eq!(
            class_name_from_path(Some("/Views/Home/Index.cshtml")),
            "Views_Home_Index"
        );
        assert_eq!(
            class_name_from_path(Some("Pages\\Error.cshtml")),
            "Pages_Error"
        );
        assert_eq!(class_name_from_path(Some("/Pages/.hidden")), "Pages__hidden");
        assert_eq!(class_name_from_path(Some("/v1.2/Index")), "v1_2_Index");
        assert_eq!(class_name_from_path(None), "GeneratedDocument");
        assert_eq!(class_name_from_path(Some("/")), "GeneratedDocument");
    }

    #[test]
    fn test_is_qualified_name() {
        assert!(is_qualified_name("App"));
        assert!(is_qualified_name("Company.App_1.Views"));
        assert!(!is_qualified_name(""));
        assert!(!is_qualified_name("App..Views"));
        assert!(!is_qualified_name("1App"));
    }
}
