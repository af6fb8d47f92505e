use std::fmt::{self, Display};

/// One already-formatted unit of telemetry text, usually a single
/// newline-terminated line. The sink never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metric(String);

impl Metric {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// `key=value` followed by a newline.
    pub fn key_value(key: &str, value: impl Display) -> Self {
        Self(format!("{key}={value}\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Metric {
    fn from(line: String) -> Self {
        Self(line)
    }
}

impl From<&str> for Metric {
    fn from(line: &str) -> Self {
        Self(line.to_string())
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_is_one_line() {
        let metric = Metric::key_value("num_tasks", 12);
        assert_eq!(metric.as_str(), "num_tasks=12\n");
        assert_eq!(metric.len(), 13);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let metric = Metric::from("not key value at all");
        assert_eq!(metric.to_string(), "not key value at all");
        assert!(Metric::new("").is_empty());
    }
}
