//! Key state derived from drained commands

use heapless::{LinearMap, Vec};

use mycontroller_protocol::{AxisCode, CommandName};

use super::pending::MAX_PENDING;

/// Maximum number of names in the pressed set
///
/// Axis codes and the `none` sentinel are never released, so they hold
/// their slots for good on top of the keys actually held down.
pub const MAX_PRESSED_KEYS: usize = MAX_PENDING + AxisCode::COUNT + 1;

/// Maximum number of names with a toggle counter
pub const MAX_TOGGLE_STATES: usize = 32;

/// Errors that can occur when tracking a pressed key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyError {
    /// Set holds [`MAX_PRESSED_KEYS`] names already
    Full,
}

/// Keys currently held down, in press order
#[derive(Debug, Default)]
pub struct PressedKeys {
    keys: Vec<CommandName, MAX_PRESSED_KEYS>,
}

impl PressedKeys {
    /// Create an empty set
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Mark a key as pressed
    ///
    /// Returns `Ok(false)` if the key was already pressed.
    pub fn press(&mut self, key: &str) -> Result<bool, KeyError> {
        if self.contains(key) {
            return Ok(false);
        }
        let mut name = CommandName::new();
        name.push_str(key).map_err(|_| KeyError::Full)?;
        self.keys.push(name).map_err(|_| KeyError::Full)?;
        Ok(true)
    }

    /// Mark a key as released
    ///
    /// Returns false if the key was not pressed.
    pub fn release(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k.as_str() == key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check if a key is pressed
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.as_str() == key)
    }

    /// Check if any pressed key matches `predicate`
    pub fn any(&self, predicate: impl FnMut(&str) -> bool) -> bool {
        self.iter().any(predicate)
    }

    /// Iterate pressed keys in press order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_str())
    }

    /// Number of pressed keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no key is pressed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Per-name toggle counters
///
/// Counters are created on first use and never removed. Once the table is
/// full, names without a counter behave as if freshly created on every call.
#[derive(Debug, Default)]
pub struct ToggleStates {
    counters: LinearMap<CommandName, u32, MAX_TOGGLE_STATES>,
}

impl ToggleStates {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            counters: LinearMap::new(),
        }
    }

    /// Flip the on/off state for `name` and return the new state
    ///
    /// A counter left above 1 by [`ToggleStates::count`] flips to off.
    pub fn toggle(&mut self, name: &str) -> bool {
        self.update(name, |counter| if counter == 0 { 1 } else { 0 }) == 1
    }

    /// Advance the counter for `name`, wrapping to zero after `max`
    pub fn count(&mut self, name: &str, max: u32) -> u32 {
        self.update(name, |counter| if counter < max { counter + 1 } else { 0 })
    }

    /// Current counter for `name` (zero if never used)
    pub fn get(&self, name: &str) -> u32 {
        self.counters
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Number of names with a counter
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Check if no counter exists
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    fn update(&mut self, name: &str, step: impl FnOnce(u32) -> u32) -> u32 {
        if let Some((_, counter)) = self
            .counters
            .iter_mut()
            .find(|(k, _)| k.as_str() == name)
        {
            *counter = step(*counter);
            return *counter;
        }

        let next = step(0);
        let mut key = CommandName::new();
        if key.push_str(name).is_ok() {
            // Full table: the value is returned but not remembered
            let _ = self.counters.insert(key, next);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut keys = PressedKeys::new();
        assert_eq!(keys.press("a"), Ok(true));
        assert!(keys.contains("a"));
        assert!(keys.release("a"));
        assert!(!keys.contains("a"));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut keys = PressedKeys::new();
        assert_eq!(keys.press("a"), Ok(true));
        assert_eq!(keys.press("a"), Ok(false));
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_release_unpressed_is_noop() {
        let mut keys = PressedKeys::new();
        keys.press("a").unwrap();
        keys.press("b").unwrap();
        assert!(!keys.release("c"));
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("b"));
    }

    #[test]
    fn test_press_order_kept() {
        let mut keys = PressedKeys::new();
        keys.press("b").unwrap();
        keys.press("a").unwrap();
        keys.press("c").unwrap();
        keys.release("a");
        let mut iter = keys.iter();
        assert_eq!(iter.next(), Some("b"));
        assert_eq!(iter.next(), Some("c"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_fixed_codes_leave_room_for_held_keys() {
        let mut keys = PressedKeys::new();
        for axis in AxisCode::ALL {
            keys.press(axis.code()).unwrap();
        }
        keys.press("none").unwrap();

        for key in ["up", "down", "left", "right", "a", "b"] {
            assert_eq!(keys.press(key), Ok(true));
        }
        assert!(keys.contains("b"));
        assert_eq!(keys.len(), AxisCode::COUNT + 1 + 6);
    }

    #[test]
    fn test_press_when_full_reports_error() {
        let mut keys = PressedKeys::new();
        let mut name: heapless::String<8> = heapless::String::new();
        for i in 0..MAX_PRESSED_KEYS {
            name.clear();
            core::fmt::Write::write_fmt(&mut name, format_args!("k{}", i)).unwrap();
            keys.press(&name).unwrap();
        }

        assert_eq!(keys.press("extra"), Err(KeyError::Full));
        assert!(!keys.contains("extra"));
        // Already tracked keys still answer
        assert_eq!(keys.press("k0"), Ok(false));
    }

    #[test]
    fn test_toggle_flips() {
        let mut toggles = ToggleStates::new();
        assert!(toggles.toggle("a"));
        assert!(!toggles.toggle("a"));
        assert!(toggles.toggle("a"));
        // Independent per name
        assert!(toggles.toggle("b"));
        assert_eq!(toggles.len(), 2);
    }

    #[test]
    fn test_count_wraps_after_max() {
        let mut toggles = ToggleStates::new();
        let seen: [u32; 7] = core::array::from_fn(|_| toggles.count("a", 2));
        assert_eq!(seen, [1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_count_max_zero_stays_zero() {
        let mut toggles = ToggleStates::new();
        assert_eq!(toggles.count("a", 0), 0);
        assert_eq!(toggles.count("a", 0), 0);
    }

    #[test]
    fn test_toggle_after_count_above_one_turns_off() {
        let mut toggles = ToggleStates::new();
        toggles.count("a", 3);
        toggles.count("a", 3);
        assert_eq!(toggles.get("a"), 2);
        assert!(!toggles.toggle("a"));
        assert_eq!(toggles.get("a"), 0);
    }

    #[test]
    fn test_full_table_does_not_remember() {
        let mut toggles = ToggleStates::new();
        let mut name: heapless::String<8> = heapless::String::new();
        for i in 0..MAX_TOGGLE_STATES {
            name.clear();
            core::fmt::Write::write_fmt(&mut name, format_args!("k{}", i)).unwrap();
            toggles.toggle(&name);
        }

        assert!(toggles.toggle("extra"));
        assert!(toggles.toggle("extra"));
        assert_eq!(toggles.get("extra"), 0);
    }
}
