//! Business keys for test records.
//!
//! A key is `local_part + template_name + millis`, so a record left behind by a
//! failed run can still be traced back to the template and the moment it was
//! created. Millisecond stamps are handed out through a monotonic source: when
//! the clock has not moved since the previous key, the previous stamp plus one
//! is used instead.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicI64, Ordering};
use time::OffsetDateTime;

/// Mail domain used for generated e-mail addresses.
pub const FAKE_MAIL_SERVER: &str = "fakemail.com";

/// Source of wall-clock milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// Issues business keys with strictly increasing millisecond stamps.
#[derive(Debug)]
pub struct UniqueKeyGenerator<C = SystemClock> {
    clock: C,
    last: AtomicI64,
}

impl UniqueKeyGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for UniqueKeyGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> UniqueKeyGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    fn next_stamp(&self) -> i64 {
        let now = self.clock.now_millis();
        let bump = |last: i64| now.max(last + 1);
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => bump(previous),
        }
    }

    /// `local_part + template_name + millis`.
    pub fn unique_key(&self, template_name: &str, local_part: &str) -> String {
        let stamp = self.next_stamp();
        let mut key = String::with_capacity(local_part.len() + template_name.len() + 13);
        key.push_str(local_part);
        key.push_str(template_name);
        key.push_str(&stamp.to_string());
        key
    }

    /// A unique key for `user` turned into an address at [`FAKE_MAIL_SERVER`].
    pub fn unique_email(&self, template_name: &str, user: &str) -> String {
        format!("{}@{FAKE_MAIL_SERVER}", self.unique_key(template_name, user))
    }
}

static GLOBAL_KEYS: LazyLock<UniqueKeyGenerator> = LazyLock::new(UniqueKeyGenerator::new);

/// Builds a business key from the process-wide generator.
pub fn build_unique_key(template_name: &str, local_part: &str) -> String {
    GLOBAL_KEYS.unique_key(template_name, local_part)
}

/// Builds a unique fake e-mail address from the process-wide generator.
pub fn build_unique_email(template_name: &str, user: &str) -> String {
    GLOBAL_KEYS.unique_email(template_name, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a fixed sequence of readings, repeating the last one.
    struct ScriptedClock(Mutex<Vec<i64>>);

    impl ScriptedClock {
        fn new(readings: &[i64]) -> Self {
            let mut readings = readings.to_vec();
            readings.reverse();
            Self(Mutex::new(readings))
        }
    }

    impl Clock for ScriptedClock {
        fn now_millis(&self) -> i64 {
            let mut readings = self.0.lock().unwrap();
            if readings.len() > 1 {
                readings.pop().unwrap()
            } else {
                readings[0]
            }
        }
    }

    #[test]
    fn test_key_layout() {
        let keys = UniqueKeyGenerator::with_clock(ScriptedClock::new(&[1394000000000]));
        assert_eq!(
            keys.unique_key("contact-migration", "LastName_1_"),
            "LastName_1_contact-migration1394000000000"
        );
    }

    #[test]
    fn test_keys_differ_across_timestamps() {
        let keys = UniqueKeyGenerator::with_clock(ScriptedClock::new(&[1000, 2000]));
        let first = keys.unique_key("contact-migration", "LastName_1_");
        let second = keys.unique_key("contact-migration", "LastName_1_");

        assert_ne!(first, second);
        for key in [&first, &second] {
            assert!(key.contains("contact-migration"));
            assert!(key.contains("LastName_1_"));
        }
        assert!(second.ends_with("2000"));
    }

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let keys = UniqueKeyGenerator::with_clock(ScriptedClock::new(&[5000]));
        let first = keys.unique_key("t", "n_");
        let second = keys.unique_key("t", "n_");
        let third = keys.unique_key("t", "n_");

        assert_eq!(first, "n_t5000");
        assert_eq!(second, "n_t5001");
        assert_eq!(third, "n_t5002");
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let keys = UniqueKeyGenerator::with_clock(ScriptedClock::new(&[9000, 8000]));
        assert_eq!(keys.unique_key("t", ""), "t9000");
        assert_eq!(keys.unique_key("t", ""), "t9001");
    }

    #[test]
    fn test_unique_email() {
        let keys = UniqueKeyGenerator::with_clock(ScriptedClock::new(&[42]));
        assert_eq!(
            keys.unique_email("contact-migration", "some.email.1"),
            "some.email.1contact-migration42@fakemail.com"
        );
    }

    #[test]
    fn test_global_helpers_never_repeat() {
        let first = build_unique_key("contact-migration", "LastName_1_");
        let second = build_unique_key("contact-migration", "LastName_1_");
        assert_ne!(first, second);
        assert!(build_unique_email("contact-migration", "u").ends_with("@fakemail.com"));
    }
}
