//! Test doubles shared by unit tests

use heapless::Vec;

use mycontroller_protocol::MessageLine;

use crate::traits::LineSink;

/// Sink that records every outbound line
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Vec<MessageLine, 32>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&str, 32> {
        self.lines.iter().map(|l| l.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LineSink for RecordingSink {
    fn write_line(&mut self, line: &str) {
        let mut stored = MessageLine::new();
        stored.push_str(line).unwrap();
        self.lines.push(stored).unwrap();
    }
}
