use glam::Vec2;

/// Lifecycle stage of a raw input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Control actuated but the action's interaction has not completed yet.
    Started,
    /// Action fired (or its value changed while held).
    Performed,
    /// Control released or interaction aborted.
    Canceled,
}

/// Payload carried by a raw action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionValue {
    #[default]
    None,
    Axis2(Vec2),
    Button(bool),
}

impl ActionValue {
    pub fn as_vec2(self) -> Option<Vec2> {
        match self {
            ActionValue::Axis2(v) => Some(v),
            _ => None,
        }
    }
}

/// A raw action event as the host's input layer reports it:
/// action name + phase + payload. No gameplay semantics yet.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub action: String,
    pub phase: ActionPhase,
    pub value: ActionValue,
}

impl InputEvent {
    pub fn new(action: impl Into<String>, phase: ActionPhase, value: ActionValue) -> Self {
        Self {
            action: action.into(),
            phase,
            value,
        }
    }

    pub fn started(action: impl Into<String>) -> Self {
        Self::new(action, ActionPhase::Started, ActionValue::None)
    }

    pub fn performed(action: impl Into<String>) -> Self {
        Self::new(action, ActionPhase::Performed, ActionValue::Button(true))
    }

    pub fn canceled(action: impl Into<String>) -> Self {
        Self::new(action, ActionPhase::Canceled, ActionValue::Button(false))
    }

    /// A stick/vector action reporting a new value.
    pub fn axis(action: impl Into<String>, value: Vec2) -> Self {
        Self::new(action, ActionPhase::Performed, ActionValue::Axis2(value))
    }
}

/// A queue of raw input events.
/// The host pushes events as they arrive; the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::axis("Move", Vec2::new(0.0, 1.0)));
        q.push(InputEvent::performed("Jump"));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0].action, "Move");
        assert_eq!(events[1].phase, ActionPhase::Performed);
        assert!(q.is_empty());
    }

    #[test]
    fn axis_payload() {
        let e = InputEvent::axis("Look", Vec2::new(0.5, -0.5));
        assert_eq!(e.value.as_vec2(), Some(Vec2::new(0.5, -0.5)));
        assert_eq!(InputEvent::canceled("Look").value.as_vec2(), None);
    }
}
