//! Narration sink - the single-line text interface the engine talks through

/// Receives one human-readable line per narrated sub-event
///
/// The engine never reads anything back from the sink.
pub trait NarrationSink {
    fn narrate(&mut self, line: &str);
}

impl<F> NarrationSink for F
where
    F: FnMut(&str),
{
    fn narrate(&mut self, line: &str) {
        self(line)
    }
}

/// Sink that keeps every line in memory
#[derive(Debug, Clone, Default)]
pub struct NarrationLog {
    pub lines: Vec<String>,
}

impl NarrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl NarrationSink for NarrationLog {
    fn narrate(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NarrationSink for Silent {
    fn narrate(&mut self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |line: &str| seen.push(line.to_uppercase());
            sink.narrate("hello");
        }
        assert_eq!(seen, vec!["HELLO".to_string()]);
    }

    #[test]
    fn test_log_collects_lines() {
        let mut log = NarrationLog::new();
        log.narrate("first");
        log.narrate("second");
        assert_eq!(log.lines.len(), 2);
        assert!(log.contains("fir"));
        assert_eq!(log.last(), Some("second"));
    }
}
