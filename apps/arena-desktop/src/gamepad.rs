use arena_input::{Control, InputFrame};
use gilrs::{Button, EventType, Gilrs};

pub fn control_for_button(button: Button) -> Option<Control> {
    match button {
        Button::Select => Some(Control::Quit),
        Button::South => Some(Control::FirePrimary),
        _ => None,
    }
}

/// Gamepad buttons folded into the shared [`InputFrame`]. Runs without a
/// backend when the platform has no gamepad support.
pub struct Gamepads {
    gilrs: Option<Gilrs>,
}

impl Gamepads {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                tracing::warn!("gamepad support unavailable: {e}");
                None
            }
        };
        Self { gilrs }
    }

    /// Drain pending gamepad events into `input`.
    pub fn poll(&mut self, input: &mut InputFrame) {
        let Some(gilrs) = &mut self.gilrs else {
            return;
        };
        while let Some(event) = gilrs.next_event() {
            apply_event(&event.event, input);
        }
    }
}

fn apply_event(event: &EventType, input: &mut InputFrame) {
    match event {
        EventType::ButtonPressed(button, _) => apply_button(*button, true, input),
        EventType::ButtonReleased(button, _) => apply_button(*button, false, input),
        EventType::Connected => tracing::info!("gamepad connected"),
        EventType::Disconnected => {
            tracing::info!("gamepad disconnected");
            release_all(input);
        }
        _ => {}
    }
}

fn apply_button(button: Button, down: bool, input: &mut InputFrame) {
    if let Some(control) = control_for_button(button) {
        input.set_control(control, down);
    }
}

fn release_all(input: &mut InputFrame) {
    for button in [Button::Select, Button::South] {
        apply_button(button, false, input);
    }
}
