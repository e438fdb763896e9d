//! Leading-tab normalization for Markdown embedded in indented page sources
//!
//! Markdown blocks inside component pages are indented to match the HTML
//! around them. Before rendering, the common leading-tab prefix is removed so
//! the prose is not mistaken for an indented code block.

use serde::{Deserialize, Serialize};

/// How much indentation is removed from tab-prefixed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedentMode {
    /// Strip one character more than the common minimum.
    ///
    /// The closing-delimiter line of an embedded block sits one tab left of
    /// the prose, so it defines the minimum and the prose loses that extra tab.
    #[default]
    Legacy,
    /// Strip exactly the common minimum.
    Exact,
}

/// Remove the common leading-tab indentation using [`DedentMode::Legacy`]
pub fn normalize(text: &str) -> String {
    normalize_with(text, DedentMode::Legacy)
}

/// Remove the common leading-tab indentation
///
/// Only lines starting with at least one tab are considered for the minimum
/// and only those lines are shortened. Everything else is returned untouched,
/// and the line count never changes.
pub fn normalize_with(text: &str, mode: DedentMode) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(min_tabs) = min_leading_tabs(&lines) else {
        return text.to_string();
    };

    let strip = match mode {
        DedentMode::Legacy => min_tabs + 1,
        DedentMode::Exact => min_tabs,
    };

    lines
        .iter()
        .map(|line| {
            if leading_tabs(line) > 0 {
                skip_chars(line, strip)
            } else {
                line
            }
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Length of the leading-tab run of a line
pub fn leading_tabs(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'\t').count()
}

/// Smallest non-empty leading-tab run, `None` if no line starts with a tab
fn min_leading_tabs(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .map(|line| leading_tabs(line))
        .filter(|&tabs| tabs > 0)
        .min()
}

/// Drop the first `n` characters, yielding an empty slice for shorter lines
fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_no_tabs_unchanged() {
        assert_eq!(normalize("no tabs here"), "no tabs here");
        assert_eq!(normalize("a\n  b\nc"), "a\n  b\nc");
    }

    #[test]
    fn test_uniform_indentation_strips_past_tabs() {
        // min is 2, three characters go: both tabs and the first letter
        assert_eq!(normalize("\t\tfoo\n\t\tbar"), "oo\nar");
    }

    #[test]
    fn test_mixed_indentation_off_by_one() {
        assert_eq!(normalize("\tA-line\n\t\t\tB-line"), "-line\n\tB-line");
    }

    #[test]
    fn test_untabbed_lines_are_untouched() {
        let input = "\t\tone\nplain line\n\t\t\ttwo\n  spaces\n";
        let output = normalize(input);
        let lines: Vec<&str> = output.split('\n').collect();
        assert_eq!(lines[1], "plain line");
        assert_eq!(lines[3], "  spaces");
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_line_count_preserved() {
        let inputs = [
            "",
            "\n",
            "\t\n\t\n",
            "\t\t\tdeep\n\tshallow\n\n\nend",
            "no\ttabs\tat\tstart",
        ];
        for input in inputs {
            let output = normalize(input);
            assert_eq!(
                input.split('\n').count(),
                output.split('\n').count(),
                "line count changed for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_short_line_becomes_empty() {
        assert_eq!(normalize("\t\t\tprose\n\t\t"), "prose\n");
        assert_eq!(normalize("\t"), "");
    }

    #[test]
    fn test_embedded_block_shape() {
        // What a <markdown> block inside an indented page looks like
        let input = "\n\t\t\t\t\t# Title\n\n\t\t\t\t\tSome *text*.\n\t\t\t\t\t\tnested\n\t\t\t\t";
        assert_eq!(
            normalize(input),
            "\n# Title\n\nSome *text*.\n\tnested\n"
        );
    }

    #[test]
    fn test_multibyte_after_tabs() {
        assert_eq!(normalize("\tébc\n\t\tx"), "bc\nx");
        assert_eq!(normalize("\t日本"), "本");
    }

    #[test]
    fn test_exact_mode() {
        assert_eq!(
            normalize_with("\t\tfoo\n\t\t\tbar", DedentMode::Exact),
            "foo\n\tbar"
        );
        assert_eq!(normalize_with("plain", DedentMode::Exact), "plain");
    }

    #[test]
    fn test_crlf_kept() {
        assert_eq!(normalize("\t\t\tline\r\n\t\tend"), "line\r\n");
    }

    #[test]
    fn test_leading_tabs() {
        assert_eq!(leading_tabs(""), 0);
        assert_eq!(leading_tabs("x\t"), 0);
        assert_eq!(leading_tabs("\t\t x"), 2);
    }
}
