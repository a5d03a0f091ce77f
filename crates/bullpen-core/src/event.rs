//! Scheduled events and the time-ordered queue that holds them.
//!
//! The studio's day is a sequence of [`Event`]s executed in timestamp
//! order. Ties are broken by insertion order: the queue stamps every push
//! with a monotonically increasing sequence number and orders on the pair
//! `(time, sequence)`, so two events at the same simulated instant always
//! come back in the order they were scheduled, regardless of how the
//! underlying heap happens to arrange equal keys.
//!
//! The queue itself is deliberately dumb: it knows nothing about pacing,
//! budgets, or the clock. The run loop in [`crate::studio`] owns all of
//! that.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bullpen_types::{AgentKind, SimHours};

/// What a scheduled moment does when its time comes.
///
/// The set is closed: every action the studio can perform is a variant
/// here, picked when the event is scheduled. Dispatch is a `match` in the
/// run loop, so a forgotten handler is a compile error rather than a
/// runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// The named crew member takes their working turn.
    Crew(AgentKind),
    /// The named crew member whispers a gossip line at the kettle.
    Gossip(AgentKind),
    /// Coffee break: morale up, a little fatigue recovered.
    CoffeeBreak,
    /// Team meeting: morale down.
    TeamMeeting,
    /// Lunch break: a larger slice of fatigue recovered.
    LunchBreak,
    /// The end of the last day: log the closing line.
    Deadline,
}

/// A scheduled moment in the studio's day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the action runs, on the simulated clock.
    pub time: SimHours,
    /// What happens at that moment.
    pub action: EventAction,
    /// Short human-readable description for logs.
    pub label: String,
}

/// An [`Event`] stamped with its insertion sequence number.
///
/// Ordering is `(time, seq)` ascending, which makes the tie-break
/// deterministic: equal timestamps come back in insertion order.
#[derive(Debug, Clone)]
struct OrderedEvent {
    seq: u64,
    event: Event,
}

impl PartialEq for OrderedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedEvent {}

impl PartialOrd for OrderedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .cmp(&other.event.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending events, earliest timestamp first.
///
/// A [`BinaryHeap`] is a max-heap, so entries are wrapped in [`Reverse`].
/// The sequence counter only ever goes up; it is never reused within a
/// run, even after a [`clear`](EventQueue::clear).
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<OrderedEvent>>,
    next_seq: u64,
}

impl EventQueue {
    /// Add an event to the queue.
    pub fn push(&mut self, event: Event) {
        let ordered = OrderedEvent {
            seq: self.next_seq,
            event,
        };
        self.next_seq = self.next_seq.saturating_add(1);
        self.heap.push(Reverse(ordered));
    }

    /// Remove and return the earliest pending event, if any.
    ///
    /// Equal timestamps come back in the order they were pushed.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(ordered)| ordered.event)
    }

    /// Drop every pending event, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.heap.len();
        self.heap.clear();
        dropped
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue has no pending events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn event_at(hours: f64, label: &str) -> Event {
        Event {
            time: SimHours::new(hours).unwrap(),
            action: EventAction::CoffeeBreak,
            label: label.to_owned(),
        }
    }

    #[test]
    fn pops_in_timestamp_order() {
        let mut queue = EventQueue::default();
        queue.push(event_at(2.0, "late"));
        queue.push(event_at(0.5, "early"));
        queue.push(event_at(1.0, "middle"));

        let order: Vec<String> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.label)
            .collect();
        assert_eq!(order, ["early", "middle", "late"]);
    }

    #[test]
    fn equal_timestamps_pop_in_insertion_order() {
        let mut queue = EventQueue::default();
        queue.push(event_at(1.5, "first"));
        queue.push(event_at(1.5, "second"));
        queue.push(event_at(1.5, "third"));

        assert_eq!(queue.pop().unwrap().label, "first");
        assert_eq!(queue.pop().unwrap().label, "second");
        assert_eq!(queue.pop().unwrap().label, "third");
    }

    #[test]
    fn interleaved_ties_stay_stable() {
        let mut queue = EventQueue::default();
        queue.push(event_at(3.0, "tie-a"));
        queue.push(event_at(1.0, "solo"));
        queue.push(event_at(3.0, "tie-b"));

        assert_eq!(queue.pop().unwrap().label, "solo");
        assert_eq!(queue.pop().unwrap().label, "tie-a");
        assert_eq!(queue.pop().unwrap().label, "tie-b");
    }

    #[test]
    fn clear_drops_everything_and_reports_count() {
        let mut queue = EventQueue::default();
        queue.push(event_at(1.0, "a"));
        queue.push(event_at(2.0, "b"));

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn sequence_numbers_survive_a_clear() {
        let mut queue = EventQueue::default();
        queue.push(event_at(1.0, "before"));
        queue.clear();

        // Pushes after a clear must still tie-break after anything that
        // could have been pushed before it.
        queue.push(event_at(1.0, "after-a"));
        queue.push(event_at(1.0, "after-b"));
        assert_eq!(queue.pop().unwrap().label, "after-a");
        assert_eq!(queue.pop().unwrap().label, "after-b");
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue = EventQueue::default();
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }
}
