use anyhow::Result;
use std::collections::VecDeque;

/// Line buffer for frame extraction across arbitrary chunk boundaries.
///
/// Incoming chunks are appended as raw bytes; complete lines are drained as
/// they become available and any trailing partial frame stays buffered until
/// the next chunk arrives.
pub struct FrameBuffer {
    buffer: VecDeque<u8>,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Append raw chunk bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Drain the next complete line (up to `\n`), trimmed.
    /// Returns None while only a partial frame is buffered.
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        match std::str::from_utf8(&line_bytes) {
            Ok(line_str) => Some(Ok(line_str.trim().to_string())),
            Err(e) => Some(Err(anyhow::anyhow!("Invalid UTF-8 in frame: {}", e))),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines() {
        let mut buffer = FrameBuffer::with_capacity(64);

        buffer.extend(b"frame1\nframe2\n");

        assert_eq!(buffer.next_line().unwrap().unwrap(), "frame1");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "frame2");
        assert!(buffer.next_line().is_none());
    }

    #[test]
    fn test_partial_frame_held_back() {
        let mut buffer = FrameBuffer::with_capacity(64);

        buffer.extend(b"partial");
        assert!(buffer.next_line().is_none());
        assert_eq!(buffer.len(), 7);

        buffer.extend(b" frame\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "partial frame");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let mut buffer = FrameBuffer::with_capacity(64);
        let text = "prix fixe \u{00e9}\n".as_bytes();

        // Split in the middle of the two-byte e-acute.
        let split = text.len() - 2;
        buffer.extend(&text[..split]);
        assert!(buffer.next_line().is_none());

        buffer.extend(&text[split..]);
        assert_eq!(buffer.next_line().unwrap().unwrap(), "prix fixe \u{00e9}");
    }
}
