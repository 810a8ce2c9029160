use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::player::resolve_move_axis;
use crate::session::GameSession;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<FrameInput>()
            .add_systems(PreUpdate, (read_movement, read_intents, read_typed_text));
    }
}

const RECIPE_KEYS: [(KeyCode, Recipe); 4] = [
    (KeyCode::Digit1, Recipe::Fabric),
    (KeyCode::Digit2, Recipe::Campfire),
    (KeyCode::Digit3, Recipe::Tent),
    (KeyCode::Digit4, Recipe::Lantern),
];

/// Recipe buttons while the crafting panel is open. North stays the panel
/// toggle, so the lantern lives on the d-pad only.
const RECIPE_BUTTONS: [(GamepadButton, Recipe); 7] = [
    (GamepadButton::South, Recipe::Fabric),
    (GamepadButton::West, Recipe::Campfire),
    (GamepadButton::East, Recipe::Tent),
    (GamepadButton::DPadDown, Recipe::Fabric),
    (GamepadButton::DPadLeft, Recipe::Campfire),
    (GamepadButton::DPadRight, Recipe::Tent),
    (GamepadButton::DPadUp, Recipe::Lantern),
];

const SLOT_KEYS: [(KeyCode, u8); 3] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
];

/// Keyboard direction keys as an axis, screen space (+y is down).
pub fn keyboard_axis(keys: &ButtonInput<KeyCode>, bindings: &KeyBindings) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    axis
}

/// Movement is a held state, so it is overwritten every frame rather than queued.
fn read_movement(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<FrameInput>,
) {
    // Gamepad sticks report +y up; the simulation wants +y down.
    let stick = gamepads
        .iter()
        .map(|pad| pad.left_stick() * Vec2::new(1.0, -1.0))
        .find(|s| *s != Vec2::ZERO)
        .unwrap_or(Vec2::ZERO);
    input.movement = resolve_move_axis(keyboard_axis(&keys, &bindings), stick);
}

/// Button presses become intents for whatever mode the session is in.
/// They queue until the next fixed tick drains them.
fn read_intents(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    gamepads: Query<&Gamepad>,
    session: Res<GameSession>,
    mut input: ResMut<FrameInput>,
) {
    let mode = session.mode();
    let crafting = session.crafting_open;

    let mut intents = keyboard_intents(mode, crafting, &keys, &bindings);
    if mode == UiMode::Play && mouse.just_pressed(MouseButton::Left) {
        intents.push(Intent::Attack);
    }
    for pad in gamepads.iter() {
        intents.extend(gamepad_intents(mode, crafting, |button| pad.just_pressed(button)));
    }
    input.intents.extend(intents);
}

/// Name entry reads logical keys so layouts and shift work.
fn read_typed_text(
    mut events: EventReader<KeyboardInput>,
    session: Res<GameSession>,
    mut input: ResMut<FrameInput>,
) {
    if session.mode() != UiMode::Typing {
        events.clear();
        return;
    }
    for event in events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Character(text) => input.intents.extend(text.chars().map(Intent::TypeChar)),
            Key::Space => input.intents.push(Intent::TypeChar(' ')),
            Key::Backspace => input.intents.push(Intent::Backspace),
            Key::Enter => input.intents.push(Intent::Confirm),
            Key::Escape => input.intents.push(Intent::Cancel),
            _ => {}
        }
    }
}

/// Keyboard intents for one frame. Text entry is handled separately.
pub fn keyboard_intents(
    mode: UiMode,
    crafting_open: bool,
    keys: &ButtonInput<KeyCode>,
    bindings: &KeyBindings,
) -> Vec<Intent> {
    let mut intents = Vec::new();
    if mode == UiMode::Typing {
        return intents;
    }
    let mut on = |key: KeyCode, intent: Intent| {
        if keys.just_pressed(key) {
            intents.push(intent);
        }
    };

    match mode {
        UiMode::Menu => {
            on(bindings.jump, Intent::NewGame);
            on(bindings.load_menu, Intent::OpenLoadMenu);
        }
        UiMode::Play => {
            on(bindings.jump, Intent::Jump);
            on(bindings.interact, Intent::Interact);
            on(bindings.attack, Intent::Attack);
            on(bindings.crafting, Intent::ToggleCrafting);
            on(bindings.map, Intent::ToggleMap);
            if crafting_open {
                for (key, recipe) in RECIPE_KEYS {
                    on(key, Intent::Craft(recipe));
                }
            }
        }
        UiMode::SlotSelect(_) => {
            for (key, slot) in SLOT_KEYS {
                on(key, Intent::SelectSlot(slot));
            }
            on(bindings.confirm, Intent::Confirm);
            on(bindings.jump, Intent::Confirm);
            on(bindings.cancel, Intent::Cancel);
        }
        UiMode::GameOver => on(bindings.restart, Intent::Restart),
        UiMode::Typing => {}
    }

    on(bindings.dev_toggle, Intent::ToggleFreeCrafting);
    intents
}

/// Gamepad intents for one frame; `pressed` reports this frame's presses.
fn gamepad_intents(
    mode: UiMode,
    crafting_open: bool,
    pressed: impl Fn(GamepadButton) -> bool,
) -> Vec<Intent> {
    let mut intents = Vec::new();
    match mode {
        UiMode::Menu => {
            if pressed(GamepadButton::South) || pressed(GamepadButton::Start) {
                intents.push(Intent::NewGame);
            }
            if pressed(GamepadButton::Select) {
                intents.push(Intent::OpenLoadMenu);
            }
        }
        UiMode::Play if crafting_open => {
            for (button, recipe) in RECIPE_BUTTONS {
                if pressed(button) {
                    intents.push(Intent::Craft(recipe));
                }
            }
            if pressed(GamepadButton::North) {
                intents.push(Intent::ToggleCrafting);
            }
        }
        UiMode::Play => {
            for (button, intent) in [
                (GamepadButton::South, Intent::Jump),
                (GamepadButton::East, Intent::Interact),
                (GamepadButton::West, Intent::Attack),
                (GamepadButton::North, Intent::ToggleCrafting),
                (GamepadButton::Select, Intent::ToggleMap),
            ] {
                if pressed(button) {
                    intents.push(intent);
                }
            }
        }
        UiMode::SlotSelect(_) => {
            if pressed(GamepadButton::South) {
                intents.push(Intent::Confirm);
            }
            if pressed(GamepadButton::East) {
                intents.push(Intent::Cancel);
            }
        }
        UiMode::Typing => {}
        UiMode::GameOver => {
            if pressed(GamepadButton::Start) {
                intents.push(Intent::Restart);
            }
        }
    }
    intents
}
