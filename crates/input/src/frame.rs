use crate::action::Action;
use glam::Vec2;
use std::collections::BTreeSet;

/// Logical controls the arena reacts to. Physical key bindings live in the
/// windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    Sprint,
    FirePrimary,
    FireSecondary,
    Quit,
}

/// Polled input state at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Absolute pointer position.
    pub pointer: Vec2,
    pub held: BTreeSet<Control>,
}

impl InputSnapshot {
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }
}

/// Two-slot input state: the snapshot taken at the end of the last frame and
/// the one being filled during the current frame.
#[derive(Debug, Clone)]
pub struct InputFrame {
    previous: InputSnapshot,
    current: InputSnapshot,
    /// Relative motion received this frame, cleared by `end_frame`.
    motion: Vec2,
    focused: bool,
    suppress_pointer: bool,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl InputFrame {
    /// Starts focused, with the first pointer delta suppressed so the
    /// initial cursor position never registers as motion.
    pub fn new() -> Self {
        Self {
            previous: InputSnapshot::default(),
            current: InputSnapshot::default(),
            motion: Vec2::ZERO,
            focused: true,
            suppress_pointer: true,
        }
    }

    pub fn press(&mut self, control: Control) {
        self.current.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.current.held.remove(&control);
    }

    pub fn set_control(&mut self, control: Control, down: bool) {
        if down {
            self.press(control);
        } else {
            self.release(control);
        }
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.current.pointer = position;
    }

    /// Accumulate relative motion (e.g. raw mouse deltas) for this frame.
    /// The total never exceeds one frame's worth of movement.
    pub fn add_pointer_motion(&mut self, delta: Vec2) {
        self.motion += delta;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Regaining focus suppresses the next pointer delta.
    pub fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.suppress_pointer = true;
        }
        if !focused {
            // Keys released while unfocused never reach us.
            self.current.held.clear();
        }
        self.focused = focused;
    }

    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    pub fn held(&self, control: Control) -> bool {
        self.current.is_held(control)
    }

    /// True only on the frame `control` went from up to down.
    pub fn pressed(&self, control: Control) -> bool {
        self.current.is_held(control) && !self.previous.is_held(control)
    }

    pub fn pointer_delta(&self) -> Vec2 {
        if self.suppress_pointer {
            Vec2::ZERO
        } else {
            self.current.pointer - self.previous.pointer + self.motion
        }
    }

    /// Actions for this frame. Quit is honoured even while unfocused; nothing
    /// else is.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.held(Control::Quit) {
            actions.push(Action::Quit);
        }
        if !self.focused {
            return actions;
        }

        let delta = self.pointer_delta();
        if delta != Vec2::ZERO {
            actions.push(Action::Look(delta));
        }

        let mut axis = Vec2::ZERO;
        if self.held(Control::MoveForward) {
            axis.y += 1.0;
        }
        if self.held(Control::MoveBackward) {
            axis.y -= 1.0;
        }
        if self.held(Control::StrafeRight) {
            axis.x += 1.0;
        }
        if self.held(Control::StrafeLeft) {
            axis.x -= 1.0;
        }
        if axis != Vec2::ZERO {
            actions.push(Action::Move {
                axis,
                sprint: self.held(Control::Sprint),
            });
        }

        if self.pressed(Control::FirePrimary) || self.pressed(Control::FireSecondary) {
            actions.push(Action::Fire);
        }

        actions
    }

    /// Close the frame: the current snapshot becomes the previous one.
    pub fn end_frame(&mut self) {
        self.previous = self.current.clone();
        self.motion = Vec2::ZERO;
        if self.suppress_pointer {
            tracing::trace!("pointer delta resynchronised");
        }
        self.suppress_pointer = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> InputFrame {
        let mut frame = InputFrame::new();
        frame.end_frame();
        frame
    }

    #[test]
    fn press_is_edge_triggered() {
        let mut frame = settled();
        frame.press(Control::FirePrimary);
        assert!(frame.pressed(Control::FirePrimary));
        frame.end_frame();
        assert!(frame.held(Control::FirePrimary));
        assert!(!frame.pressed(Control::FirePrimary));
    }

    #[test]
    fn held_fire_produces_single_fire_action() {
        let mut frame = settled();
        frame.press(Control::FireSecondary);
        assert!(frame.actions().contains(&Action::Fire));
        frame.end_frame();
        assert!(!frame.actions().contains(&Action::Fire));
        frame.release(Control::FireSecondary);
        frame.end_frame();
        frame.press(Control::FireSecondary);
        assert!(frame.actions().contains(&Action::Fire));
    }

    #[test]
    fn pointer_delta_compares_against_previous_frame() {
        let mut frame = settled();
        frame.set_pointer(Vec2::new(10.0, 4.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(10.0, 4.0));
        frame.end_frame();
        frame.add_pointer_motion(Vec2::new(-2.0, 1.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(-2.0, 1.0));
        frame.end_frame();
        assert_eq!(frame.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn small_motion_survives_large_travel() {
        let mut frame = settled();
        frame.add_pointer_motion(Vec2::new(16_777_216.0, 0.0));
        frame.end_frame();
        frame.add_pointer_motion(Vec2::new(1.0, 0.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(1.0, 0.0));

        for _ in 0..1_000 {
            frame.end_frame();
            frame.add_pointer_motion(Vec2::new(50_000.0, -3.0));
        }
        frame.end_frame();
        frame.add_pointer_motion(Vec2::new(0.5, 0.25));
        assert_eq!(frame.pointer_delta(), Vec2::new(0.5, 0.25));
    }

    #[test]
    fn motion_adds_to_absolute_pointer_change() {
        let mut frame = settled();
        frame.set_pointer(Vec2::new(4.0, 0.0));
        frame.add_pointer_motion(Vec2::new(1.0, 2.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(5.0, 2.0));
        frame.end_frame();
        assert_eq!(frame.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn first_frame_pointer_is_suppressed() {
        let mut frame = InputFrame::new();
        frame.set_pointer(Vec2::new(640.0, 360.0));
        assert_eq!(frame.pointer_delta(), Vec2::ZERO);
        assert!(frame.actions().is_empty());
    }

    #[test]
    fn refocus_suppresses_one_delta() {
        let mut frame = settled();
        frame.set_focused(false);
        frame.add_pointer_motion(Vec2::new(300.0, 0.0));
        assert!(frame.actions().is_empty());
        frame.set_focused(true);
        assert_eq!(frame.pointer_delta(), Vec2::ZERO);
        frame.end_frame();
        frame.add_pointer_motion(Vec2::new(5.0, 0.0));
        assert_eq!(frame.pointer_delta(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn quit_is_honoured_while_unfocused() {
        let mut frame = settled();
        frame.set_focused(false);
        frame.press(Control::Quit);
        assert_eq!(frame.actions(), vec![Action::Quit]);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut frame = settled();
        frame.press(Control::MoveForward);
        frame.press(Control::MoveBackward);
        assert!(frame.actions().is_empty());
        frame.press(Control::StrafeRight);
        frame.press(Control::Sprint);
        assert_eq!(
            frame.actions(),
            vec![Action::Move {
                axis: Vec2::X,
                sprint: true
            }]
        );
    }
}
