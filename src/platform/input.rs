//! Discrete input events
//!
//! Device polling and key mapping happen on the host; the game only sees
//! the handful of actions below, delivered in batches once per frame.

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    /// Enter / select
    Confirm,
    Escape,
    /// Space: flap
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Window closed or process asked to stop
    Quit,
}

/// Anything that can hand the loop a batch of events each frame
pub trait EventSource {
    fn poll(&mut self, now_ms: u64) -> Vec<InputEvent>;
}

/// Replays events at fixed clock times (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// `(due_ms, event)`, kept sorted by due time
    timeline: Vec<(u64, InputEvent)>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for the first poll at or after `due_ms`
    pub fn at(mut self, due_ms: u64, event: InputEvent) -> Self {
        let idx = self.timeline.partition_point(|(t, _)| *t <= due_ms);
        self.timeline.insert(idx, (due_ms, event));
        self
    }

    /// Queue `event` every `period_ms` in `[start_ms, end_ms)`
    pub fn every(mut self, start_ms: u64, end_ms: u64, period_ms: u64, event: InputEvent) -> Self {
        let mut t = start_ms;
        while t < end_ms {
            self = self.at(t, event);
            t += period_ms.max(1);
        }
        self
    }

    /// Whether every scripted event has been delivered
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.timeline.len()
    }
}

impl EventSource for ScriptedInput {
    fn poll(&mut self, now_ms: u64) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.timeline.len() && self.timeline[self.cursor].0 <= now_ms {
            self.cursor += 1;
        }
        self.timeline[start..self.cursor].iter().map(|(_, e)| *e).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_delivery_in_order() {
        let mut input = ScriptedInput::new()
            .at(100, InputEvent::Quit)
            .at(0, InputEvent::KeyDown(Key::Confirm))
            .at(100, InputEvent::KeyDown(Key::Jump));

        assert_eq!(input.poll(0), vec![InputEvent::KeyDown(Key::Confirm)]);
        assert!(input.poll(99).is_empty());
        // Same due time keeps insertion order
        assert_eq!(
            input.poll(150),
            vec![InputEvent::Quit, InputEvent::KeyDown(Key::Jump)]
        );
        assert!(input.is_finished());
    }

    #[test]
    fn test_every() {
        let mut input = ScriptedInput::new().every(0, 1000, 300, InputEvent::KeyDown(Key::Jump));
        assert_eq!(input.poll(1000).len(), 4);
    }
}
