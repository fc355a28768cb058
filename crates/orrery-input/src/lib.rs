//! Input abstraction: keyboard and mouse state mapped through configurable
//! action-based keybindings.

pub mod action_map;
pub mod keyboard;
pub mod mouse;

pub use action_map::{Action, ActionState, InputBinding, InputMap, MouseButtonBinding};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
