//! Commands received but not yet drained
//!
//! Keeps the latest value per command name in arrival order. Re-sending a
//! name before it is drained replaces the value but keeps the original
//! position, so a fast-moving slider cannot starve other inputs.

use heapless::Deque;

use mycontroller_protocol::Command;

/// Maximum number of distinct pending commands
pub const MAX_PENDING: usize = 32;

/// Errors that can occur when queueing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PendingError {
    /// Queue holds [`MAX_PENDING`] distinct names already
    Full,
}

/// Insertion-ordered latest-value table
#[derive(Debug, Default)]
pub struct PendingCommands {
    queue: Deque<Command, MAX_PENDING>,
}

impl PendingCommands {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
        }
    }

    /// Insert a command, overwriting an undrained value for the same name
    pub fn insert(&mut self, command: Command) -> Result<(), PendingError> {
        if let Some(existing) = self.queue.iter_mut().find(|c| c.name == command.name) {
            existing.value = command.value;
            return Ok(());
        }
        self.queue
            .push_back(command)
            .map_err(|_| PendingError::Full)
    }

    /// Remove the oldest command
    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    /// Value waiting for a name, if any
    pub fn get(&self, name: &str) -> Option<f32> {
        self.queue
            .iter()
            .find(|c| c.name.as_str() == name)
            .map(|c| c.value)
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
