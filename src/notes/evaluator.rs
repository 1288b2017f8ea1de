//! Turns a trailing `expr=` line into `expr=result`.

use bevy::prelude::*;

use super::math;

/// Evaluate the last line of `text` when it ends with `=`.
///
/// Returns the rewritten text, or `None` when the last line is not a
/// request (no trailing `=`, empty expression) or cannot be evaluated.
/// Already-evaluated lines are not special-cased: `4=` followed by another
/// `=` makes `4=4=`, whose expression `4=4` fails to parse.
pub fn evaluate_last_line(text: &str) -> Option<String> {
    let line_start = text.rfind('\n').map_or(0, |i| i + 1);
    let last_line = &text[line_start..];

    let expression = last_line.strip_suffix('=')?.trim();
    if expression.is_empty() {
        return None;
    }

    match math::evaluate(expression) {
        Ok(result) => Some(format!("{}{}={}", &text[..line_start], expression, result)),
        Err(e) => {
            debug!("Not evaluating {:?}: {}", expression, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_sum() {
        assert_eq!(evaluate_last_line("2+2=").as_deref(), Some("2+2=4"));
    }

    #[test]
    fn test_function_call() {
        assert_eq!(evaluate_last_line("sin(0)=").as_deref(), Some("sin(0)=0"));
    }

    #[test]
    fn test_unknown_symbol_leaves_text() {
        assert_eq!(evaluate_last_line("foo="), None);
    }

    #[test]
    fn test_only_last_line_is_evaluated() {
        let text = "shopping\n3*4=\nnotes\n10/4=";
        assert_eq!(
            evaluate_last_line(text).as_deref(),
            Some("shopping\n3*4=\nnotes\n10/4=5/2")
        );
    }

    #[test]
    fn test_earlier_lines_are_ignored() {
        assert_eq!(evaluate_last_line("2+2=\nmore text"), None);
    }

    #[test]
    fn test_expression_whitespace_is_trimmed() {
        assert_eq!(
            evaluate_last_line("a\n  7 * 6  =").as_deref(),
            Some("a\n7 * 6=42")
        );
    }

    #[test]
    fn test_no_trailing_equals() {
        assert_eq!(evaluate_last_line("2+2"), None);
        assert_eq!(evaluate_last_line("2+2= "), None);
        assert_eq!(evaluate_last_line(""), None);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(evaluate_last_line("="), None);
        assert_eq!(evaluate_last_line("hello\n   ="), None);
    }

    #[test]
    fn test_trailing_newline_means_empty_last_line() {
        assert_eq!(evaluate_last_line("2+2=\n"), None);
    }

    #[test]
    fn test_already_evaluated_line_with_extra_equals() {
        // "2+2=4=" asks to evaluate "2+2=4", which is not an expression
        assert_eq!(evaluate_last_line("2+2=4="), None);
    }

    #[test]
    fn test_bare_number_re_evaluates() {
        assert_eq!(evaluate_last_line("4=").as_deref(), Some("4=4"));
    }

    #[test]
    fn test_unicode_before_last_line() {
        assert_eq!(
            evaluate_last_line("café ☕\n1+1=").as_deref(),
            Some("café ☕\n1+1=2")
        );
    }
}
