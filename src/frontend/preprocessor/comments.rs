use regex::{Captures, Regex};

/// replace `//` comments with spaces, leaving string literals intact,
/// byte offsets in the clean code are the same as in the source code
pub fn clean_comments(source_code: &str) -> String {
    // string literals are matched first, so comment markers inside them are kept
    let pattern = Regex::new(r#""(\\.|[^"\\\n])*"|//[^\n]*"#)
        .expect("comment pattern is a valid regex");
    pattern
        .replace_all(source_code, |caps: &Captures| {
            let matched = &caps[0];
            if matched.starts_with("//") {
                " ".repeat(matched.len())
            } else {
                String::from(matched)
            }
        })
        .into_owned()
}
