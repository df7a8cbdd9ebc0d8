use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // \name, \name*, \name[opt]{arg}{arg}...
    static ref COMMAND: Regex = Regex::new(r"\\[A-Za-z]+\*?(?:\[[^\]]*\])?(?:\{[^}]*\})*").unwrap();
    static ref INLINE_MATH: Regex = Regex::new(r"\$[^$]*\$").unwrap();
    static ref DISPLAY_MATH: Regex = Regex::new(r"(?s)\\\[.*?\\\]").unwrap();
}

/// Remove commands, inline math and display math, in that order
pub fn strip(content: &str) -> String {
    let text = COMMAND.replace_all(content, "");
    let text = INLINE_MATH.replace_all(&text, "");
    DISPLAY_MATH.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_removed_with_arguments() {
        let stripped = strip(r"\section*{Sissejuhatus} Tere \textbf{paks} maailm \cite[lk 3]{knuth}{x}.");
        assert_eq!(stripped, " Tere  maailm .");
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(strip(r"\noindent Tere \LaTeX!"), " Tere !");
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(strip("kui $a + b = c$ siis"), "kui  siis");
        // commands inside math go first, then the empty span
        assert_eq!(strip(r"nurk $\alpha$ on"), "nurk  on");
    }

    #[test]
    fn test_display_math_spans_lines() {
        let content = "enne\n\\[\n  x = 1\n\\]\nvahel\n\\[ y \\]\npärast";
        assert_eq!(strip(content), "enne\n\nvahel\n\npärast");
    }

    #[test]
    fn test_plain_words_untouched() {
        assert_eq!(strip("Tere, kuidas läheb?"), "Tere, kuidas läheb?");
    }
}
