//! Retry policy for transient transport failures.
//!
//! Some ACOS builds reset connections under load or answer with a malformed
//! status line. Those failures are retried; everything else surfaces at once
//! so real connectivity problems are not hidden.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};

/// Signatures of a malformed HTTP status line.
///
/// `BadStatusLine` is the name the device's own tooling reports; the others
/// are what the Rust HTTP stack renders for the same fault, including a
/// connection closed before any status line arrived.
pub const MALFORMED_STATUS_MARKERS: &[&str] = &[
    "BadStatusLine",
    "invalid HTTP status-code parsed",
    "invalid HTTP version parsed",
    "connection closed before message completed",
];

/// Which transport errors are retried, how often, and how far apart.
///
/// # Example
///
/// ```rust
/// use acos_client::clients::{is_retryable, RetryPolicy, TransportError};
///
/// let policy = RetryPolicy::new([104]);
/// let reset = TransportError::from(std::io::Error::from_raw_os_error(104));
/// let refused = TransportError::from(std::io::Error::from_raw_os_error(111));
///
/// assert!(is_retryable(&reset, &policy));
/// assert!(!is_retryable(&refused, &policy));
/// assert_eq!(policy.max_attempts(), 1500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    errnos: BTreeSet<i32>,
    markers: Vec<String>,
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy retrying the given OS error codes.
    ///
    /// Each code contributes two markers: the `(os error N)` fragment and
    /// the platform's description of the code, so errors that only survive
    /// as text are still recognised.
    #[must_use]
    pub fn new(errnos: impl IntoIterator<Item = i32>) -> Self {
        let errnos: BTreeSet<i32> = errnos.into_iter().collect();

        let mut markers: Vec<String> = MALFORMED_STATUS_MARKERS
            .iter()
            .map(|m| (*m).to_string())
            .collect();
        for code in &errnos {
            markers.push(format!("(os error {code})"));
            if let Some(description) = os_error_description(*code) {
                markers.push(description);
            }
        }

        Self {
            errnos,
            markers,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Sets the attempt cap. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the pause between retryable failures.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the retryable OS error codes.
    #[must_use]
    pub const fn errnos(&self) -> &BTreeSet<i32> {
        &self.errnos
    }

    /// Returns the string markers matched against rendered errors.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Returns the attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the pause between retryable failures.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new([])
    }
}

/// Returns `true` if `error` should be retried under `policy`.
///
/// An error qualifies when its OS error code is in the policy, or when its
/// rendered chain contains any of the policy's markers.
#[must_use]
pub fn is_retryable(error: &TransportError, policy: &RetryPolicy) -> bool {
    if error
        .os_error()
        .is_some_and(|code| policy.errnos.contains(&code))
    {
        return true;
    }
    let message = error.message();
    policy.markers.iter().any(|marker| message.contains(marker.as_str()))
}

/// The platform description of an OS error code, without the trailing
/// `(os error N)` fragment. Unknown codes yield `None`.
fn os_error_description(code: i32) -> Option<String> {
    let rendered = io::Error::from_raw_os_error(code).to_string();
    let description = rendered
        .strip_suffix(&format!(" (os error {code})"))
        .unwrap_or(&rendered)
        .trim();

    if description.is_empty() || description.starts_with("Unknown error") {
        None
    } else {
        Some(description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_match_is_retryable() {
        let policy = RetryPolicy::new([104]);
        let error = TransportError::new("connection closed").with_os_error(104);
        assert!(is_retryable(&error, &policy));
    }

    #[test]
    fn test_rendered_os_error_marker_is_retryable() {
        let policy = RetryPolicy::new([104]);
        let error = TransportError::new(
            "error sending request for url (https://10.0.0.1:443/axapi/v3/auth): \
             connection error: Connection reset by peer (os error 104)",
        );
        assert!(error.os_error().is_none());
        assert!(is_retryable(&error, &policy));
    }

    #[test]
    fn test_bad_status_line_is_always_retryable() {
        let policy = RetryPolicy::default();
        assert!(is_retryable(
            &TransportError::new("BadStatusLine(\"''\")"),
            &policy
        ));
        assert!(is_retryable(
            &TransportError::new("error sending request: invalid HTTP status-code parsed"),
            &policy
        ));
    }

    #[test]
    fn test_empty_reply_is_always_retryable() {
        let policy = RetryPolicy::default();
        let error = TransportError::new(
            "error sending request for url (http://10.0.0.1:80/axapi/v3/auth): \
             connection closed before message completed",
        );
        assert!(is_retryable(&error, &policy));
    }

    #[test]
    fn test_errno_description_alone_is_retryable() {
        let policy = RetryPolicy::new([104]);
        let description = os_error_description(104).unwrap();
        let error = TransportError::new(format!("connection error: {description}"));

        assert!(error.os_error().is_none());
        assert!(!error.message().contains("(os error"));
        assert!(is_retryable(&error, &policy));
        assert!(!is_retryable(&error, &RetryPolicy::new([111])));
    }

    #[test]
    fn test_unlisted_errno_is_not_retryable() {
        let policy = RetryPolicy::new([104]);
        let error = TransportError::from(io::Error::from_raw_os_error(111));
        assert!(!is_retryable(&error, &policy));
    }

    #[test]
    fn test_empty_policy_rejects_socket_errors() {
        let policy = RetryPolicy::default();
        let error = TransportError::from(io::Error::from_raw_os_error(104));
        assert!(!is_retryable(&error, &policy));
    }

    #[test]
    fn test_markers_include_errno_fragments() {
        let policy = RetryPolicy::new([104, 111]);
        let markers = policy.markers();
        assert!(markers.iter().any(|m| m == "BadStatusLine"));
        assert!(markers.iter().any(|m| m == "(os error 104)"));
        assert!(markers.iter().any(|m| m == "(os error 111)"));
    }

    #[test]
    fn test_unknown_code_adds_no_description() {
        assert!(os_error_description(987_654).is_none());
    }

    #[test]
    fn test_max_attempts_floor_is_one() {
        let policy = RetryPolicy::default().with_max_attempts(0);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 1500);
        assert_eq!(policy.delay(), Duration::from_millis(100));
        assert!(policy.errnos().is_empty());
    }
}
