//! Spec template placeholder extraction.

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[A-Za-z][A-Za-z0-9_]*").expect("valid placeholder regex"));

/// Parameter tokens the Host renders on its own.
pub const HOST_STANDARD_TOKENS: &[&str] = &[
    "%n", "%s", "%b", "%c", "%l", "%txt", "%mlt", "%code", "%idx", "%dir", "%inst", "%clr",
    "%spr", "%obj", "%var", "%lst", "%cmdRing", "%repRing", "%predRing",
];

/// Returns whether `token` is rendered by the Host without help.
pub fn is_host_standard_token(token: &str) -> bool {
    HOST_STANDARD_TOKENS.contains(&token)
}

/// Returns `%token` placeholders of `template` in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .find_iter(template)
        .map(|found| found.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_host_standard_token, placeholders};

    #[test]
    fn extracts_placeholders_in_order() {
        assert_eq!(
            placeholders("set motor %ftroboMotor %ftroboDirection speed %ftroboSpeed"),
            vec!["%ftroboMotor", "%ftroboDirection", "%ftroboSpeed"]
        );
        assert_eq!(placeholders("wait %n secs"), vec!["%n"]);
    }

    #[test]
    fn ignores_literal_text_and_bare_percent() {
        assert!(placeholders("stop all outputs").is_empty());
        assert!(placeholders("100 % done").is_empty());
    }

    #[test]
    fn recognizes_host_tokens_exactly() {
        assert!(is_host_standard_token("%n"));
        assert!(!is_host_standard_token("%N"));
        assert!(!is_host_standard_token("%ftroboOutput"));
    }
}
