use std::time::Duration;

use super::constants::MIN_PAYLOAD_EXPIRE_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSettings {
    pub poll_interval: Duration,
    /// Lifetime of an unanswered payload on the Xaman side.
    pub expire_minutes: u64,
}

impl PayloadSettings {
    /// Payloads live no longer than the caller is willing to wait for them.
    pub fn new(poll_interval: Duration, sign_timeout: Duration) -> Self {
        Self {
            poll_interval,
            expire_minutes: sign_timeout
                .as_secs()
                .div_ceil(60)
                .max(MIN_PAYLOAD_EXPIRE_MINUTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_follows_sign_timeout() {
        let poll = Duration::from_secs(2);

        assert_eq!(PayloadSettings::new(poll, Duration::from_secs(300)).expire_minutes, 5);
        assert_eq!(PayloadSettings::new(poll, Duration::from_secs(90)).expire_minutes, 2);
        assert_eq!(PayloadSettings::new(poll, Duration::from_secs(5)).expire_minutes, 1);
        assert_eq!(PayloadSettings::new(poll, Duration::ZERO).expire_minutes, 1);
    }
}
