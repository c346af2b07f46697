// Persisted preferences
//
// Key/value preference storage consumed at build time (display mode) and by
// the selection list (tracked targets). The storage format is owned by the
// host; this crate only needs get/set.

use std::collections::HashMap;

/// Preference storage seam
pub trait Preferences {
    fn get_int(&self, key: &str) -> Option<i32>;
    fn set_int(&mut self, key: &str, value: i32);
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);

    /// Integer preference with a fallback for missing keys
    fn int_or(&self, key: &str, default: i32) -> i32 {
        self.get_int(key).unwrap_or(default)
    }
}

/// Process-lifetime preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    ints: HashMap<String, i32>,
    strings: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_int(&self, key: &str) -> Option<i32> {
        self.ints.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.ints.insert(key.to_string(), value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_or_falls_back() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.int_or("ARDisplayMode", 1), 1);
        prefs.set_int("ARDisplayMode", 2);
        assert_eq!(prefs.int_or("ARDisplayMode", 1), 2);
    }
}
