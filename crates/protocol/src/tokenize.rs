use ventokv_common::CommandError;

/// Separa uma linha de comando em tokens.
///
/// Tokens são separados por espaço em branco. Aspas simples ou duplas agrupam
/// um token que pode conter espaços; dentro delas `\n`, `\t`, `\\`, `\"` e `\'`
/// são escapes. `""` produz um token vazio.
pub fn tokenize(input: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distingue `""` (token vazio) de nenhum token.
    let mut has_token = false;
    let mut in_quote = false;
    let mut quote_char = '"';
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quote {
            if c == quote_char {
                in_quote = false;
            } else if c == '\\' {
                match chars.peek() {
                    Some('n') => {
                        current.push('\n');
                        chars.next();
                    }
                    Some('t') => {
                        current.push('\t');
                        chars.next();
                    }
                    Some(&(e @ ('\\' | '"' | '\''))) => {
                        current.push(e);
                        chars.next();
                    }
                    _ => current.push(c),
                }
            } else {
                current.push(c);
            }
        } else if c == '"' || c == '\'' {
            in_quote = true;
            quote_char = c;
            has_token = true;
        } else if c.is_whitespace() {
            if has_token {
                tokens.push(std::mem::take(&mut current));
                has_token = false;
            }
        } else {
            current.push(c);
            has_token = true;
        }
    }

    if in_quote {
        return Err(CommandError::UnterminatedQuote);
    }

    if has_token {
        tokens.push(current);
    }

    Ok(tokens)
}
