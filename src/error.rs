#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{panicked} of {invoked} callbacks panicked while handling a notification")]
    CallbackPanicked { invoked: usize, panicked: usize },
}

impl Error {
    /// Number of callbacks that ran (successfully or not) before the error was reported.
    pub fn invoked(&self) -> usize {
        match self {
            Error::CallbackPanicked { invoked, .. } => *invoked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_panicked_message() {
        let err = Error::CallbackPanicked {
            invoked: 3,
            panicked: 1,
        };
        assert_eq!(
            err.to_string(),
            "1 of 3 callbacks panicked while handling a notification"
        );
        assert_eq!(err.invoked(), 3);
    }
}
