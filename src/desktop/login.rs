//! Passcode gate in front of the desktop.

use log::info;

use crate::store::PhaseStore;

/// How long the rejection indicator stays up (seconds)
pub const ERROR_DISPLAY_S: f32 = 2.0;

/// Longest passcode the input accepts
pub const MAX_PASSCODE_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Unlocked,
    Rejected,
}

/// Input buffer plus passcode check; unlocking is recorded in the store
#[derive(Debug, Clone)]
pub struct LoginGate {
    passcode: String,
    buffer: String,
    error_remaining_s: f32,
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new("1307")
    }
}

impl LoginGate {
    /// Passcodes longer than [`MAX_PASSCODE_LEN`] are truncated
    pub fn new(passcode: &str) -> Self {
        Self {
            passcode: passcode.chars().take(MAX_PASSCODE_LEN).collect(),
            buffer: String::new(),
            error_remaining_s: 0.0,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Rejection indicator (shake/highlight) currently shown
    pub fn is_error_shown(&self) -> bool {
        self.error_remaining_s > 0.0
    }

    /// Type a character; ignored once the buffer is full
    pub fn push_char(&mut self, c: char) {
        if self.buffer.chars().count() < MAX_PASSCODE_LEN {
            self.buffer.push(c);
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Check the typed buffer
    pub fn submit_buffer(&mut self, store: &mut PhaseStore) -> LoginOutcome {
        let attempt = std::mem::take(&mut self.buffer);
        self.submit(&attempt, store)
    }

    /// Check `attempt`; a match unlocks the desktop, a miss clears the
    /// buffer and raises the error indicator
    pub fn submit(&mut self, attempt: &str, store: &mut PhaseStore) -> LoginOutcome {
        if attempt == self.passcode {
            info!("login accepted");
            self.error_remaining_s = 0.0;
            store.set_unlocked(true);
            LoginOutcome::Unlocked
        } else {
            info!("login rejected");
            self.buffer.clear();
            self.error_remaining_s = ERROR_DISPLAY_S;
            LoginOutcome::Rejected
        }
    }

    /// Count down the error indicator
    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.error_remaining_s = (self.error_remaining_s - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_passcode_unlocks() {
        let mut gate = LoginGate::default();
        let mut store = PhaseStore::new();
        for c in "1307".chars() {
            gate.push_char(c);
        }
        assert_eq!(gate.submit_buffer(&mut store), LoginOutcome::Unlocked);
        assert!(store.flags().is_unlocked);
        assert_eq!(gate.buffer(), "");
    }

    #[test]
    fn test_wrong_passcode_shows_error_for_two_seconds() {
        let mut gate = LoginGate::default();
        let mut store = PhaseStore::new();

        assert_eq!(gate.submit("0000", &mut store), LoginOutcome::Rejected);
        assert!(!store.flags().is_unlocked);
        assert!(gate.is_error_shown());

        gate.tick(1.5);
        assert!(gate.is_error_shown());
        gate.tick(0.6);
        assert!(!gate.is_error_shown());
    }

    #[test]
    fn test_buffer_capped() {
        let mut gate = LoginGate::default();
        for c in "130799".chars() {
            gate.push_char(c);
        }
        assert_eq!(gate.buffer(), "1307");
        gate.clear();
        assert_eq!(gate.buffer(), "");
    }

    #[test]
    fn test_custom_passcode_truncated() {
        let mut gate = LoginGate::new("abcdef");
        let mut store = PhaseStore::new();
        assert_eq!(gate.submit("abcd", &mut store), LoginOutcome::Unlocked);
    }
}
