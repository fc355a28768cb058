//! Action mapping: binds abstract viewer actions to physical inputs.
//!
//! [`InputMap`] defines which physical inputs (keys, mouse buttons) trigger
//! which [`Action`]s. [`ActionState`] is recomputed each frame from the
//! current keyboard and mouse state.

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Serde helper module for [`KeyCode`], which doesn't implement serde natively.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug string (e.g., `"KeyW"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    fn string_to_keycode(s: &str) -> Option<KeyCode> {
        // Matches the Debug output of the KeyCode variants we bind by default.
        Some(match s {
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyF" => KeyCode::KeyF,
            "KeyQ" => KeyCode::KeyQ,
            "KeyS" => KeyCode::KeyS,
            "KeyW" => KeyCode::KeyW,
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "AltLeft" => KeyCode::AltLeft,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "F1" => KeyCode::F1,
            _ => return None,
        })
    }
}

/// Semantic viewer actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Walk forward.
    MoveForward,
    /// Walk backward.
    MoveBack,
    /// Strafe left.
    StrafeLeft,
    /// Strafe right.
    StrafeRight,
    /// Run faster while held.
    Sprint,
    /// Jump (recognized on the surface but intentionally inert).
    Jump,
    /// Enter/leave first-person surface mode on the focused planet.
    ToggleSurfaceMode,
    /// Toggle the free-fly camera.
    ToggleFreeFly,
    /// Pause/resume orbital motion.
    TogglePause,
}

/// All actions, for iteration when resolving a frame.
pub(crate) const ALL_ACTIONS: [Action; 9] = [
    Action::MoveForward,
    Action::MoveBack,
    Action::StrafeLeft,
    Action::StrafeRight,
    Action::Sprint,
    Action::Jump,
    Action::ToggleSurfaceMode,
    Action::ToggleFreeFly,
    Action::TogglePause,
];

/// A physical input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
}

/// Wrapper for [`winit::event::MouseButton`] that supports serde.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

impl MouseButtonBinding {
    /// Convert to the winit [`MouseButton`] type.
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// Maps [`Action`]s to lists of [`InputBinding`]s.
///
/// Multiple bindings per action are OR-ed. Serializable to RON so users can
/// edit bindings in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::default_walk()
    }
}

impl InputMap {
    /// Create an empty input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Standard walk-mode bindings: WASD + arrows, shift sprint, space jump.
    #[must_use]
    pub fn default_walk() -> Self {
        let mut bindings: HashMap<Action, Vec<InputBinding>> = HashMap::new();

        bindings.insert(
            Action::MoveForward,
            vec![
                InputBinding::Key(KeyCode::KeyW),
                InputBinding::Key(KeyCode::ArrowUp),
            ],
        );
        bindings.insert(
            Action::MoveBack,
            vec![
                InputBinding::Key(KeyCode::KeyS),
                InputBinding::Key(KeyCode::ArrowDown),
            ],
        );
        bindings.insert(
            Action::StrafeLeft,
            vec![
                InputBinding::Key(KeyCode::KeyA),
                InputBinding::Key(KeyCode::ArrowLeft),
            ],
        );
        bindings.insert(
            Action::StrafeRight,
            vec![
                InputBinding::Key(KeyCode::KeyD),
                InputBinding::Key(KeyCode::ArrowRight),
            ],
        );
        bindings.insert(Action::Sprint, vec![InputBinding::Key(KeyCode::ShiftLeft)]);
        bindings.insert(Action::Jump, vec![InputBinding::Key(KeyCode::Space)]);
        bindings.insert(
            Action::ToggleSurfaceMode,
            vec![InputBinding::Key(KeyCode::KeyE)],
        );
        bindings.insert(Action::ToggleFreeFly, vec![InputBinding::Key(KeyCode::F1)]);
        bindings.insert(Action::TogglePause, vec![InputBinding::Key(KeyCode::Tab)]);

        Self { bindings }
    }

    /// Whether any binding for `action` is currently held.
    #[must_use]
    pub fn is_held(&self, action: Action, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|binds| binds.iter().any(|b| binding_held(b, keyboard, mouse)))
    }

    /// Whether any binding for `action` transitioned to pressed this frame.
    #[must_use]
    pub fn just_pressed(
        &self,
        action: Action,
        keyboard: &KeyboardState,
        mouse: &MouseState,
    ) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|binds| binds.iter().any(|b| binding_just_pressed(b, keyboard, mouse)))
    }

    /// Resolve the full per-frame action snapshot.
    #[must_use]
    pub fn resolve(&self, keyboard: &KeyboardState, mouse: &MouseState) -> ActionState {
        let mut state = ActionState::default();
        for action in ALL_ACTIONS {
            if self.is_held(action, keyboard, mouse) {
                state.held.insert(action);
            }
            if self.just_pressed(action, keyboard, mouse) {
                state.just_pressed.insert(action);
            }
        }
        state
    }
}

fn binding_held(binding: &InputBinding, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
    match binding {
        InputBinding::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
        InputBinding::MouseButton(btn) => mouse.is_button_pressed(btn.to_winit()),
    }
}

fn binding_just_pressed(
    binding: &InputBinding,
    keyboard: &KeyboardState,
    mouse: &MouseState,
) -> bool {
    match binding {
        InputBinding::Key(code) => keyboard.just_pressed(PhysicalKey::Code(*code)),
        InputBinding::MouseButton(btn) => mouse.just_button_pressed(btn.to_winit()),
    }
}

/// Snapshot of resolved action state for one frame.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    held: std::collections::HashSet<Action>,
    just_pressed: std::collections::HashSet<Action>,
}

impl ActionState {
    /// Whether the action is held this frame.
    #[must_use]
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Whether the action transitioned to pressed this frame.
    #[must_use]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }
}
