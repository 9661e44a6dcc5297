use regex::Regex;

/// Ordered list of prefix-anchored name patterns, each carrying a payload.
///
/// Patterns are tried in declaration order and the first match wins.
#[derive(Debug, Clone)]
pub struct PatternSet<T> {
    entries: Vec<(Regex, T)>,
}

impl<T> PatternSet<T> {
    pub fn new<'a, I>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, T)>,
    {
        let entries = patterns
            .into_iter()
            .map(|(pattern, payload)| Ok((Regex::new(&format!("^(?:{})", pattern))?, payload)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { entries })
    }

    /// Payload of the first pattern matching the start of `name`
    pub fn first_match(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(regex, _)| regex.is_match(name))
            .map(|(_, payload)| payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
