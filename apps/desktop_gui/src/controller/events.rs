//! UI/backend events and error modeling for the control panel.

pub enum UiEvent {
    SubmissionAccepted { activity_count: usize },
    ServerProbed { detail: String },
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    Probe,
}

pub fn classify_submit_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build backend runtime")
        || lower.contains("backend worker startup failure")
    {
        "Backend worker startup failure; relaunch the panel and retry.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Activity runner unreachable; check the server URL/network and retry.".to_string()
    } else {
        format!("Run submission error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("unknown activity")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_connection_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "failed to connect to http://127.0.0.1:8000/cgi-bin/run_activity",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_malformed_input_as_validation() {
        let err = UiError::from_message(UiErrorContext::Submit, "unknown activity: 99");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn unmatched_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::Probe, "something odd happened");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.category().label(), "Unexpected");
    }

    #[test]
    fn submit_failure_text_names_the_runner_when_unreachable() {
        let text = classify_submit_failure("failed to connect to http://localhost:8000");
        assert!(text.contains("Activity runner unreachable"));
    }
}
