//! Operator message sink
//!
//! Wraps the optional logging callback supplied by the caller. Messages meant
//! for the person running the conversion (lines to fix, withdrawals to
//! verify, the run summary) go through here; developer diagnostics use the
//! `log` macros instead.

/// Forwards operator messages to an optional callback
pub struct Reporter<'a> {
    callback: Option<&'a mut dyn FnMut(&str)>,
}

impl<'a> Reporter<'a> {
    pub fn new(callback: Option<&'a mut dyn FnMut(&str)>) -> Self {
        Reporter { callback }
    }

    /// A reporter that drops every message
    pub fn silent() -> Self {
        Reporter { callback: None }
    }

    pub fn report(&mut self, message: &str) {
        if let Some(callback) = self.callback.as_deref_mut() {
            callback(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_reach_callback() {
        let mut messages: Vec<String> = Vec::new();
        {
            let mut collect = |message: &str| messages.push(message.to_string());
            let mut reporter = Reporter::new(Some(&mut collect));
            reporter.report("first");
            reporter.report("second");
        }
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_silent_reporter() {
        let mut reporter = Reporter::silent();
        reporter.report("dropped");
    }
}
