use glam::Vec2;

/// A high-level command produced from one frame of input.
///
/// The arena consumes actions, never raw input events, so the desktop
/// window and the headless simulator drive the same game logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Pointer motion since the previous frame, in pointer units
    /// (+x right, +y down).
    Look(Vec2),
    /// Walk along the ground plane. `axis.x` strafes right, `axis.y` walks
    /// forward; each component is in `[-1, 1]`.
    Move { axis: Vec2, sprint: bool },
    /// Attempt a shot. Subject to the fire cooldown.
    Fire,
    /// Leave the game.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_carries_delta() {
        let a = Action::Look(Vec2::new(3.0, -1.0));
        assert!(matches!(a, Action::Look(d) if d.x == 3.0 && d.y == -1.0));
    }

    #[test]
    fn move_carries_sprint_flag() {
        let a = Action::Move {
            axis: Vec2::Y,
            sprint: true,
        };
        assert!(matches!(a, Action::Move { sprint: true, .. }));
    }
}
