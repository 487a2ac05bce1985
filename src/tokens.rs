use regex::Regex;

#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    OpenParen,
    CloseParen,
    PlainChars(&'a str),
}

/// Split source text into tokens: parentheses and whitespace-delimited atoms.
/// There are no string literals, comments or escapes, so this cannot fail;
/// empty input yields no tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r"(?x)
                \s*          # whitespace, ignored
                (            # token capture group
                    [()]     # a single parenthesis
                    |[^\s()]+ # or a maximal run of plain characters
                )
            "
        )
        .unwrap();
    }
    TOKEN_RE
        .captures_iter(input)
        .map(|caps| match caps.get(1).unwrap().as_str() {
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            chars => Token::PlainChars(chars),
        })
        .collect()
}
