/// A reserved key that changes control flow instead of storing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `include <path>`: read another file into the same dictionary.
    Include,
    /// `enforce <key> <value>`: assert or set a string value.
    Enforce,
    /// `warning <text...>`: report the rest of the line.
    Warning,
    /// `BREAK`: stop reading the current source.
    Break,
}

impl Directive {
    /// Recognizes a directive key, spelled all-lowercase or all-uppercase.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "include" | "INCLUDE" => Some(Directive::Include),
            "enforce" | "ENFORCE" => Some(Directive::Enforce),
            "warning" | "WARNING" => Some(Directive::Warning),
            "break" | "BREAK" => Some(Directive::Break),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_spellings() {
        assert_eq!(Directive::from_key("include"), Some(Directive::Include));
        assert_eq!(Directive::from_key("INCLUDE"), Some(Directive::Include));
        assert_eq!(Directive::from_key("ENFORCE"), Some(Directive::Enforce));
        assert_eq!(Directive::from_key("warning"), Some(Directive::Warning));
        assert_eq!(Directive::from_key("BREAK"), Some(Directive::Break));
    }

    #[test]
    fn test_mixed_case_is_plain_key() {
        assert_eq!(Directive::from_key("Include"), None);
        assert_eq!(Directive::from_key("Warning"), None);
        assert_eq!(Directive::from_key("SCHEME"), None);
    }
}
