//! Tri-state option controls and the query strings they generate.
//!
//! Each control in an option panel holds on / off / indeterminate, cycling
//! `0 → -1 → 1 → 0` on click. Every change rewrites the panel's links by
//! appending all controls' values to each link's declared base URL.

/// Value of one tri-state option control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriState {
    /// `1`
    On,
    /// `-1`
    Off,
    /// `0`
    Unset,
}

impl TriState {
    /// Parse the control's value attribute. Absent and malformed both read
    /// as indeterminate.
    pub fn from_attr(raw: Option<&str>) -> Self {
        match raw {
            Some("1") => Self::On,
            Some("-1") => Self::Off,
            _ => Self::Unset,
        }
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            Self::On => "1",
            Self::Off => "-1",
            Self::Unset => "0",
        }
    }

    /// One click: `0 → -1 → 1 → 0`.
    pub fn next(self) -> Self {
        match self {
            Self::Unset => Self::Off,
            Self::Off => Self::On,
            Self::On => Self::Unset,
        }
    }
}

/// `name=value` pairs for every control, joined with `&`.
pub fn option_query(options: &[(String, TriState)]) -> String {
    options
        .iter()
        .map(|(name, value)| format!("{name}={}", value.as_attr()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append `query` to `base`, picking `?` or `&` by whether the base URL
/// already carries a query.
pub fn extend_url(base: &str, query: &str) -> String {
    if query.is_empty() {
        return base.to_string();
    }
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_is_total_and_ordered() {
        // Starting at 0, three clicks visit -1 then 1 and return to 0.
        let start = TriState::Unset;
        let first = start.next();
        let second = first.next();
        let third = second.next();
        assert_eq!(first, TriState::Off);
        assert_eq!(second, TriState::On);
        assert_eq!(third, TriState::Unset);
    }

    #[test]
    fn test_attr_roundtrip() {
        for value in [TriState::On, TriState::Off, TriState::Unset] {
            assert_eq!(TriState::from_attr(Some(value.as_attr())), value);
        }
        assert_eq!(TriState::from_attr(None), TriState::Unset);
        assert_eq!(TriState::from_attr(Some("2")), TriState::Unset);
    }

    #[test]
    fn test_query_includes_every_control() {
        let query = option_query(&[
            ("assessed".to_string(), TriState::On),
            ("reviewed".to_string(), TriState::Unset),
            ("selected".to_string(), TriState::Off),
        ]);
        assert_eq!(query, "assessed=1&reviewed=0&selected=-1");
    }

    #[test]
    fn test_extend_url_separator() {
        assert_eq!(extend_url("/list", "a=1"), "/list?a=1");
        assert_eq!(extend_url("/list?sort=x", "a=1"), "/list?sort=x&a=1");
        assert_eq!(extend_url("/list", ""), "/list");
    }
}
