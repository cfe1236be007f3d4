use super::tracker::ScrollTarget;
use crate::timer::TimerQueue;

/// Index holder for a swipeable strip with no auto-advance clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStrip {
    count: usize,
    current: usize,
}

impl CardStrip {
    pub fn new(count: usize) -> Self {
        Self { count, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Replace the item count, keeping the index in range
    pub fn set_len(&mut self, count: usize) {
        self.count = count;
        self.current = self.current.min(count.saturating_sub(1));
    }
}

impl ScrollTarget for CardStrip {
    fn item_count(&self) -> usize {
        self.count
    }

    fn preempt(&mut self, _timers: &mut TimerQueue) {}

    fn settle(&mut self, index: usize, _timers: &mut TimerQueue) {
        self.current = index.min(self.count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrinking_keeps_index_in_range() {
        let mut strip = CardStrip::new(5);
        strip.settle(4, &mut TimerQueue::new());
        strip.set_len(3);
        assert_eq!(strip.current(), 2);
        strip.set_len(0);
        assert_eq!(strip.current(), 0);
        assert!(strip.is_empty());
    }
}
