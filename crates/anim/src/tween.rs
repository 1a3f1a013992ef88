//! Value queues subdivided by ratio templates.
//!
//! A tween tracks two things: the queue of values still to be displayed and
//! the final target the queue drains toward. Enqueuing a new transition always
//! starts from the final target, not from whatever is currently displayed, so
//! back-to-back transitions chain without skipping or coalescing.

use std::collections::VecDeque;

use gridfall_types::Vec2;

/// Interpolated steps from `start` toward `end` at each template ratio.
fn staged<'a>(start: f32, end: f32, ratios: &'a [f32]) -> impl Iterator<Item = f32> + 'a {
    let diff = end - start;
    ratios.iter().map(move |&r| start + diff * r)
}

/// A scalar animation channel.
#[derive(Debug, Clone, Default)]
pub struct Tween {
    target: f32,
    queue: VecDeque<f32>,
}

impl Tween {
    pub fn new(initial: f32) -> Self {
        Self {
            target: initial,
            queue: VecDeque::new(),
        }
    }

    /// The value the queue drains toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump the target without enqueuing any steps.
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// Queue a transition to `target`, one step per template ratio.
    ///
    /// An empty template is a 1-step jump: the bare target is appended. Steps
    /// are appended after any pending ones and start from the current final
    /// target, so chained seeks replay in order.
    pub fn seek(&mut self, target: f32, ratios: &[f32]) {
        if ratios.is_empty() {
            self.queue.push_back(target);
        } else {
            let from = self.target;
            self.queue.extend(staged(from, target, ratios));
        }
        self.target = target;
    }

    /// Queue a transition by a delta from the current final target.
    pub fn seek_by(&mut self, delta: f32, ratios: &[f32]) {
        self.seek(self.target + delta, ratios);
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the next value to display. `None` when the channel is at rest.
    pub fn tick(&mut self) -> Option<f32> {
        self.queue.pop_front()
    }
}

/// A 2D animation channel (position, size).
#[derive(Debug, Clone, Default)]
pub struct Tween2 {
    target: Vec2,
    queue: VecDeque<Vec2>,
}

impl Tween2 {
    pub fn new(initial: Vec2) -> Self {
        Self {
            target: initial,
            queue: VecDeque::new(),
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, value: Vec2) {
        self.target = value;
    }

    /// Queue a transition to `target`; both components share the template.
    pub fn seek(&mut self, target: Vec2, ratios: &[f32]) {
        if ratios.is_empty() {
            self.queue.push_back(target);
        } else {
            let from = self.target;
            let xs = staged(from.0, target.0, ratios);
            let ys = staged(from.1, target.1, ratios);
            self.queue.extend(xs.zip(ys));
        }
        self.target = target;
    }

    /// Queue a transition by a delta from the current final target.
    pub fn seek_by(&mut self, delta: Vec2, ratios: &[f32]) {
        self.seek((self.target.0 + delta.0, self.target.1 + delta.1), ratios);
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn tick(&mut self) -> Option<Vec2> {
        self.queue.pop_front()
    }
}
