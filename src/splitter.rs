use crate::config::{FieldPolicy, ParseConfig};

/// Splits raw lines into quote-stripped field payloads and renders rows back.
pub struct Splitter {
    config: ParseConfig,
}

impl Splitter {
    pub fn new(config: ParseConfig) -> Self {
        Splitter { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Payloads of every field, or `None` if any field is malformed.
    pub fn fields<'a>(&self, line: &'a str) -> Option<Vec<&'a str>> {
        // A blank line would split into one empty field; it is noise, not a row.
        if line.is_empty() {
            return None;
        }
        line.split(self.config.delimiter)
            .map(|field| self.payload(field))
            .collect()
    }

    /// Strips the quote pair from a non-empty field and checks what is left.
    pub fn payload<'a>(&self, field: &'a str) -> Option<&'a str> {
        if field.is_empty() {
            return Some(field);
        }
        let inner = field
            .strip_prefix(self.config.quote)?
            .strip_suffix(self.config.quote)?;
        is_valid_payload(inner, self.config.policy).then_some(inner)
    }

    pub fn is_valid_line(&self, line: &str) -> bool {
        self.fields(line).is_some()
    }

    /// Inverse of `fields`: `Some` tokens are quoted, `None` is a bare empty field.
    pub fn render<'a, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut line = String::new();
        for (i, token) in tokens.into_iter().enumerate() {
            if i > 0 {
                line.push(self.config.delimiter);
            }
            if let Some(token) = token {
                line.push(self.config.quote);
                line.push_str(token);
                line.push(self.config.quote);
            }
        }
        line
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(ParseConfig::default())
    }
}

pub fn is_valid_payload(payload: &str, policy: FieldPolicy) -> bool {
    match policy {
        FieldPolicy::Strict => payload.bytes().all(|b| b.is_ascii_digit()),
        FieldPolicy::Tolerant => {
            let mut dots = 0;
            payload.bytes().all(|b| match b {
                b'0'..=b'9' => true,
                b'.' => {
                    dots += 1;
                    dots == 1
                }
                _ => false,
            })
        }
    }
}
