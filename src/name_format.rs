//! Output-name templates such as `{first}.{last}@acme.com` or `acme\{f}{last}`.
//!
//! `{first}`/`{last}` insert the whole first/last name, `{f}`/`{l}` their
//! initials. A position prefix (`{1:first}`, `{-2:last}`) picks which token of
//! a longer name to use; negative positions count from the end.

use regex::Regex;

/// Compiled template.
pub struct NameFormat {
    template: String,
    first_position: isize,
    last_position: isize,
}

impl NameFormat {
    pub fn new(template: &str) -> Self {
        let number = Regex::new(r"-?\d+").ok();
        let position_prefix = Regex::new(r"-?\d+:").ok();

        let mut parts = template.split('}');
        let first_part = parts.next().unwrap_or_default();
        let last_part = parts.next().unwrap_or_default();

        let position = |part: &str, default: isize| -> isize {
            if !part.contains(':') {
                return default;
            }
            number
                .as_ref()
                .and_then(|re| re.find(part))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(default)
        };

        let stripped = match &position_prefix {
            Some(re) => re.replace_all(template, "").into_owned(),
            None => template.to_string(),
        };

        NameFormat {
            first_position: position(first_part, 0),
            last_position: position(last_part, -1),
            template: stripped,
        }
    }

    pub fn format(&self, name: &str) -> String {
        let tokens: Vec<&str> = name.split(' ').collect();
        let first_token = tokens.first().copied().unwrap_or_default();
        let last_token = tokens.last().copied().unwrap_or_default();

        let (first, last) = if tokens.len() > 2 {
            match (pick(&tokens, self.first_position), pick(&tokens, self.last_position)) {
                (Some(first), Some(last)) => (first, last),
                _ => (first_token, last_token),
            }
        } else {
            (first_token, last_token)
        };

        self.template
            .replace("{f}", initial(first))
            .replace("{first}", first)
            .replace("{l}", initial(last))
            .replace("{last}", last)
    }
}

/// Convenience wrapper for one-off formatting.
pub fn format_name(template: &str, name: &str) -> String {
    NameFormat::new(template).format(name)
}

fn pick<'a>(tokens: &[&'a str], position: isize) -> Option<&'a str> {
    let index = if position < 0 {
        tokens.len().checked_sub(position.unsigned_abs())?
    } else {
        position as usize
    };
    tokens.get(index).copied()
}

fn initial(word: &str) -> &str {
    word.char_indices()
        .nth(1)
        .map(|(end, _)| &word[..end])
        .unwrap_or(word)
}
