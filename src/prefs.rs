//! Persisted-preference interface.
//!
//! The store holds small named integers (currently just the brightness).
//! Consumers keep their own in-memory copy and treat the store as best
//! effort: a missing or failing store falls back to the value already in
//! memory instead of erroring up the stack.

use heapless::String;

/// Preference-store failure. Carried only far enough to be ignored by
/// callers that have a usable in-memory fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefError {
    /// The backing store could not be read or written.
    Unavailable,
}

/// Get/set of named integer preferences.
pub trait PrefStore {
    /// Read a stored value. `None` when the key was never written or the
    /// store is unavailable.
    fn get_i32(&mut self, key: &str) -> Option<i32>;

    /// Persist a value. Callers may ignore the error; the in-memory value
    /// stays authoritative for the session.
    fn set_i32(&mut self, key: &str, value: i32) -> Result<(), PrefError>;
}

const MAX_PREFS: usize = 8;
const MAX_KEY_LEN: usize = 16;

/// RAM-backed preference store for host builds and tests. Contents do not
/// survive a restart.
pub struct RamPrefs {
    slots: [Option<(String<MAX_KEY_LEN>, i32)>; MAX_PREFS],
}

impl RamPrefs {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_PREFS],
        }
    }
}

impl Default for RamPrefs {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefStore for RamPrefs {
    fn get_i32(&mut self, key: &str) -> Option<i32> {
        self.slots
            .iter()
            .flatten()
            .find(|(k, _)| k.as_str() == key)
            .map(|&(_, v)| v)
    }

    fn set_i32(&mut self, key: &str, value: i32) -> Result<(), PrefError> {
        for slot in self.slots.iter_mut() {
            match slot {
                Some((k, v)) if k.as_str() == key => {
                    *v = value;
                    return Ok(());
                }
                None => {
                    let mut k = String::new();
                    if k.push_str(key).is_err() {
                        return Err(PrefError::Unavailable);
                    }
                    *slot = Some((k, value));
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(PrefError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let mut prefs = RamPrefs::new();
        assert_eq!(prefs.get_i32("brightness"), None);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let mut prefs = RamPrefs::new();
        prefs.set_i32("brightness", 128).unwrap();
        assert_eq!(prefs.get_i32("brightness"), Some(128));
        prefs.set_i32("brightness", 64).unwrap();
        assert_eq!(prefs.get_i32("brightness"), Some(64));
    }

    #[test]
    fn independent_keys() {
        let mut prefs = RamPrefs::new();
        prefs.set_i32("a", 1).unwrap();
        prefs.set_i32("b", 2).unwrap();
        assert_eq!(prefs.get_i32("a"), Some(1));
        assert_eq!(prefs.get_i32("b"), Some(2));
    }

    #[test]
    fn store_full_reports_unavailable() {
        let mut prefs = RamPrefs::new();
        for i in 0..MAX_PREFS {
            let mut key = std::string::String::new();
            use std::fmt::Write as _;
            write!(key, "key{i}").unwrap();
            prefs.set_i32(&key, i as i32).unwrap();
        }
        assert_eq!(prefs.set_i32("overflow", 9), Err(PrefError::Unavailable));
    }
}
