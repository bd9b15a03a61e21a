use std::collections::VecDeque;

pub(crate) const BUFFER_SIZE: usize = 4 * 1024 * 1024;
pub(crate) const PREFETCH_TRIGGER: usize = 128 * 1024;

/// Sliding window over the remote media body.
///
/// Holds one contiguous byte range `[start_pos, end_pos)`. Appends that do
/// not continue the window replace it.
#[derive(Debug)]
pub struct BufferState {
    data: VecDeque<u8>,
    start_pos: u64,
    total_bytes: u64,
    pub(crate) eof: bool,
    pending: Option<(u64, u64)>,
}

impl BufferState {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            data: VecDeque::new(),
            start_pos: 0,
            total_bytes,
            eof: false,
            pending: None,
        }
    }

    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.start_pos && pos < self.end_pos()
    }

    pub fn available_from(&self, pos: u64) -> usize {
        if !self.contains(pos) {
            return 0;
        }
        self.data.len() - (pos - self.start_pos) as usize
    }

    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> usize {
        let len = buf.len().min(self.available_from(pos));
        if len == 0 {
            return 0;
        }
        let off = (pos - self.start_pos) as usize;
        for (dst, src) in buf[..len].iter_mut().zip(self.data.range(off..off + len)) {
            *dst = *src;
        }
        len
    }

    /// Returns `false` when the chunk was dropped: it starts before the
    /// window, or the window was just reset to a different offset.
    pub fn append(&mut self, new: &[u8], start: u64) -> bool {
        if let Some((s, e)) = self.pending
            && (s..e).contains(&start)
        {
            self.pending = None;
        }

        if new.is_empty() || start < self.start_pos {
            return false;
        }

        if self.data.is_empty() {
            if start != self.start_pos {
                return false;
            }
        } else if start != self.end_pos() {
            self.data.clear();
            self.start_pos = start;
            self.eof = false;
        }

        let overflow = (self.data.len() + new.len()).saturating_sub(BUFFER_SIZE);
        if overflow > 0 {
            let dropped = overflow.min(self.data.len());
            self.data.drain(..dropped);
            self.start_pos += dropped as u64;
        }

        self.data.extend(new);
        if self.end_pos() >= self.total_bytes {
            self.eof = true;
        }
        true
    }

    pub fn clear(&mut self, start: u64) {
        self.data.clear();
        self.start_pos = start;
        self.pending = None;
        self.eof = false;
    }

    pub fn discard_before(&mut self, pos: u64) {
        if pos <= self.start_pos {
            return;
        }
        let drop = ((pos - self.start_pos) as usize).min(self.data.len());
        self.data.drain(..drop);
        self.start_pos += drop as u64;
    }

    pub fn end_pos(&self) -> u64 {
        self.start_pos + self.data.len() as u64
    }

    pub fn should_prefetch(&self, pos: u64) -> bool {
        !self.eof && self.pending.is_none() && self.available_from(pos) < PREFETCH_TRIGGER
    }

    pub fn mark_pending(&mut self, start: u64, end: u64) {
        self.pending = Some((start, end));
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_appends_extend_the_window() {
        let mut buf = BufferState::new(10);
        assert!(buf.append(&[0, 1, 2, 3], 0));
        assert!(buf.append(&[4, 5], 4));
        assert_eq!(buf.end_pos(), 6);
        assert_eq!(buf.available_from(2), 4);

        let mut out = [0u8; 3];
        assert_eq!(buf.read_at(3, &mut out), 3);
        assert_eq!(out, [3, 4, 5]);
        assert!(!buf.eof);
    }

    #[test]
    fn reaching_total_marks_eof() {
        let mut buf = BufferState::new(4);
        buf.append(&[1, 2, 3, 4], 0);
        assert!(buf.eof);
        assert!(!buf.should_prefetch(0));
    }

    #[test]
    fn non_contiguous_append_replaces_window() {
        let mut buf = BufferState::new(100);
        buf.append(&[1, 2, 3], 0);
        buf.append(&[9, 9], 50);
        assert!(!buf.contains(0));
        assert!(buf.contains(50));
        assert_eq!(buf.end_pos(), 52);
    }

    #[test]
    fn stale_chunk_is_rejected_after_clear() {
        let mut buf = BufferState::new(100);
        buf.clear(40);
        assert!(!buf.append(&[1, 2], 60));
        assert!(buf.append(&[3, 4], 40));
        assert!(buf.contains(41));
    }

    #[test]
    fn discard_before_moves_start() {
        let mut buf = BufferState::new(100);
        buf.append(&[0, 1, 2, 3, 4], 10);
        buf.discard_before(13);
        assert!(!buf.contains(12));
        assert_eq!(buf.available_from(13), 2);
    }

    #[test]
    fn pending_fetch_blocks_prefetch_until_it_lands() {
        let mut buf = BufferState::new(1_000_000);
        buf.mark_pending(0, 1024);
        assert!(!buf.should_prefetch(0));
        buf.append(&[0; 1024], 0);
        assert!(buf.should_prefetch(0));
    }

    #[test]
    fn reading_outside_window_returns_nothing() {
        let mut buf = BufferState::new(100);
        buf.append(&[1, 2], 0);
        let mut out = [0u8; 4];
        assert_eq!(buf.read_at(5, &mut out), 0);
    }
}
