//! Generic countdown shared by every construction queue
//!
//! Each tick `ticks_remaining = max(0, ticks_remaining - 1)`. A task that
//! reaches 0 leaves the queue and is handed back for its completion effect;
//! anything above 0 stays queued in its original order.

use crate::core::types::TaskId;

/// A queued task counting down to completion
pub trait Countdown {
    fn id(&self) -> TaskId;
    fn ticks_remaining(&self) -> u32;
    fn ticks_remaining_mut(&mut self) -> &mut u32;
    fn total_ticks(&self) -> u32;

    /// Fraction complete, 0.0 to 1.0
    fn progress(&self) -> f64 {
        let total = self.total_ticks();
        if total == 0 {
            return 1.0;
        }
        1.0 - self.ticks_remaining() as f64 / total as f64
    }
}

/// Result of counting a queue down by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct QueueAdvance<T> {
    /// Tasks still in progress, in queue order
    pub pending: Vec<T>,
    /// Tasks that reached zero this tick, in queue order
    pub completed: Vec<T>,
}

/// Count every task down by one tick and split off the finished ones
pub fn advance_queue<T: Countdown>(queue: Vec<T>) -> QueueAdvance<T> {
    let mut pending = Vec::with_capacity(queue.len());
    let mut completed = Vec::new();

    for mut task in queue {
        let remaining = task.ticks_remaining_mut();
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            completed.push(task);
        } else {
            pending.push(task);
        }
    }

    QueueAdvance { pending, completed }
}

/// Remove a task by id, returns it if it was queued
pub fn remove_task<T: Countdown>(queue: &mut Vec<T>, id: TaskId) -> Option<T> {
    let idx = queue.iter().position(|t| t.id() == id)?;
    Some(queue.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestTask {
        id: TaskId,
        remaining: u32,
        total: u32,
    }

    impl Countdown for TestTask {
        fn id(&self) -> TaskId {
            self.id
        }
        fn ticks_remaining(&self) -> u32 {
            self.remaining
        }
        fn ticks_remaining_mut(&mut self) -> &mut u32 {
            &mut self.remaining
        }
        fn total_ticks(&self) -> u32 {
            self.total
        }
    }

    fn task(id: u32, remaining: u32) -> TestTask {
        TestTask { id: TaskId(id), remaining, total: 4 }
    }

    #[test]
    fn test_advance_splits_completed() {
        let result = advance_queue(vec![task(1, 1), task(2, 3), task(3, 0)]);
        assert_eq!(result.pending, vec![task(2, 2)]);
        // Already-zero tasks complete without underflow
        assert_eq!(result.completed, vec![task(1, 0), task(3, 0)]);
    }

    #[test]
    fn test_progress_fraction() {
        assert!((task(1, 1).progress() - 0.75).abs() < 1e-9);
        let instant = TestTask { id: TaskId(9), remaining: 0, total: 0 };
        assert_eq!(instant.progress(), 1.0);
    }

    #[test]
    fn test_remove_task() {
        let mut queue = vec![task(1, 2), task(2, 2)];
        assert_eq!(remove_task(&mut queue, TaskId(2)), Some(task(2, 2)));
        assert_eq!(remove_task(&mut queue, TaskId(7)), None);
        assert_eq!(queue.len(), 1);
    }
}
