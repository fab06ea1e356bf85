pub mod intent;
pub mod keyboard;
pub mod touch;

pub use intent::MovementIntent;
pub use keyboard::read_keyboard_input;
pub use touch::{
    TouchAction, TouchButton, TouchControls, fold_touch_intent, read_touch_buttons,
    read_touch_joystick,
};
