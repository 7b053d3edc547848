pub const ARROW: &str = "->";
pub const OR: char = '|';

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    // Trimmed text between two delimiters
    Text(String)
}

fn is_delimiter(rest: &str) -> bool {
    rest.starts_with(ARROW) || rest.starts_with(OR)
}

// Byte offset of the next delimiter, or the end of the line
fn text_end(line: &str) -> usize {
    line.char_indices()
        .find(|&(i, _)| is_delimiter(&line[i..]))
        .map_or(line.len(), |(i, _)| i)
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(ARROW) {
            tokens.push(Token::Arrow);
            rest = after;
        } else if let Some(after) = rest.strip_prefix(OR) {
            tokens.push(Token::Or);
            rest = after;
        } else {
            let end = text_end(rest);
            let text = rest[..end].trim();
            if !text.is_empty() {
                tokens.push(Token::Text(text.to_string()));
            }
            rest = &rest[end..];
        }
    }

    return tokens;
}
