use glam::Vec2;

use crate::fsm::StateMachine;

/// Drag controller phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    /// `pointer_offset` is the pointer position minus the body's top-left
    /// corner at the moment of the grab.
    Dragging { pointer_offset: Vec2 },
}

/// Pointer-drag state attached to a body.
#[derive(Debug, Clone)]
pub struct DragState {
    pub fsm: StateMachine<DragPhase>,
    /// Pointer position seen on the previous held frame.
    pub last_pointer: Vec2,
    /// Pointer velocity measured over the last held frame, used for throws.
    pub pointer_velocity: Vec2,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            fsm: StateMachine::new(DragPhase::Idle),
            last_pointer: Vec2::ZERO,
            pointer_velocity: Vec2::ZERO,
        }
    }
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.fsm.state, DragPhase::Dragging { .. })
    }

    /// Grab offset, only while a drag is in progress.
    pub fn pointer_offset(&self) -> Option<Vec2> {
        match self.fsm.state {
            DragPhase::Dragging { pointer_offset } => Some(pointer_offset),
            DragPhase::Idle => None,
        }
    }

    pub fn begin(&mut self, pointer: Vec2, top_left: Vec2) {
        self.fsm.go(DragPhase::Dragging {
            pointer_offset: pointer - top_left,
        });
        self.last_pointer = pointer;
        self.pointer_velocity = Vec2::ZERO;
    }

    pub fn end(&mut self) {
        self.fsm.go(DragPhase::Idle);
    }

    /// Drop any drag in progress and forget pointer history.
    pub fn reset(&mut self) {
        self.fsm.reset(DragPhase::Idle);
        self.last_pointer = Vec2::ZERO;
        self.pointer_velocity = Vec2::ZERO;
    }
}
