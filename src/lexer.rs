//! Splitting of a raw input line into argument tokens.
//!
//! Only single quotes are special: they group characters (spaces included)
//! into one token and are themselves dropped, so quoted and unquoted runs that
//! touch each other are glued together. Double quotes and backslashes are
//! ordinary characters.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    /// Between tokens; spaces are skipped.
    Start,
    /// Inside an unquoted run of the current token.
    ReadingWord,
    /// Inside a single-quoted run of the current token.
    ReadingSingleQuote,
}

struct LexingFSM {
    state: LexingState,
    tokens: Vec<String>,
    buffer: String,
}

impl LexingFSM {
    fn new() -> Self {
        LexingFSM {
            state: LexingState::Start,
            tokens: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Runs the machine over `line` and returns the collected tokens.
    ///
    /// An unterminated quote is not an error: the rest of the line is taken
    /// as quoted content.
    fn make_tokens(mut self, line: &str) -> Vec<String> {
        for ch in line.chars() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch),
                LexingState::ReadingSingleQuote => self.handle_single_quote(ch),
            }
        }

        if self.state != LexingState::Start {
            self.finalize_token();
        }
        self.tokens
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            ' ' => {}
            '\'' => self.state = LexingState::ReadingSingleQuote,
            _ => {
                self.buffer.push(ch);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char) {
        match ch {
            ' ' => self.finalize_token(),
            '\'' => self.state = LexingState::ReadingSingleQuote,
            _ => self.buffer.push(ch),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            // A closing quote keeps the token open so that `'a'b` stays one word.
            '\'' => self.state = LexingState::ReadingWord,
            _ => self.buffer.push(ch),
        }
    }

    fn finalize_token(&mut self) {
        self.tokens.push(std::mem::take(&mut self.buffer));
        self.state = LexingState::Start;
    }
}

/// Split `line` into argument tokens.
///
/// Tokens are separated by runs of spaces outside quotes. A quoted empty string
/// (`''`) still produces an empty token. A blank line produces no tokens.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    LexingFSM::new().make_tokens(line)
}

#[cfg(test)]
mod tests {
    use super::split_into_tokens;

    fn tokens(line: &str) -> Vec<String> {
        split_into_tokens(line)
    }

    #[test]
    fn test_blank_lines_have_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_spaces_collapse() {
        assert_eq!(tokens("echo  hello   world"), ["echo", "hello", "world"]);
        assert_eq!(tokens("  pwd  "), ["pwd"]);
    }

    #[test]
    fn test_adjacent_quoted_runs_concatenate() {
        assert_eq!(tokens("'a'b'c'"), ["abc"]);
        assert_eq!(tokens("x'y z'w"), ["xy zw"]);
    }

    #[test]
    fn test_empty_quotes_make_empty_token() {
        assert_eq!(tokens("echo ''"), ["echo", ""]);
        assert_eq!(tokens("'' ''"), ["", ""]);
    }

    #[test]
    fn test_quotes_preserve_spaces() {
        assert_eq!(
            tokens("echo 'hello    world'  x"),
            ["echo", "hello    world", "x"]
        );
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(tokens("echo 'a b  c"), ["echo", "a b  c"]);
        assert_eq!(tokens("echo '"), ["echo", ""]);
    }

    #[test]
    fn test_double_quotes_and_backslashes_are_literal() {
        assert_eq!(tokens(r#"echo "a b" c\ d"#), ["echo", "\"a", "b\"", "c\\", "d"]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(tokens("a\tb c"), ["a\tb", "c"]);
    }
}
