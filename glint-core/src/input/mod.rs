//! Per-frame keyboard and mouse state.
//!
//! [`InputState`] is owned by the frame loop and handed to whoever needs to query input. Once a
//! frame the windowing backend feeds it the frame's [`InputEvent`]s through
//! [`InputState::poll_events`], optionally followed by live keyboard and mouse snapshots. Query
//! results are valid until the next `poll_events` or [`InputState::clear`].

use fxhash::FxHashSet;
use glam::IVec2;

pub mod keys;

pub use keys::scancode_from_name;

/// The three mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
}

impl MouseButton {
    /// Converts a 1-based button index into a button.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub x: i32,
    pub y: i32,
    pub clicks: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMotionEvent {
    pub x: i32,
    pub y: i32,
    pub xrel: i32,
    pub yrel: i32,
}

/// A backend independent input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// `repeat` is set for auto-repeats of a key that is being held.
    KeyDown { scancode: u32, repeat: bool },
    KeyUp { scancode: u32 },
    MouseButtonDown(MouseButtonEvent),
    MouseButtonUp(MouseButtonEvent),
    MouseMotion(MouseMotionEvent),
}

/// Keyboard, mouse and quit state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    quit: bool,
    mouse_moved: bool,
    mouse_clicked: bool,
    keys: FxHashSet<u32>,
    pressed: FxHashSet<u32>,
    buttons: FxHashSet<MouseButton>,
    mouse_pos: IVec2,
    last_click: Option<MouseButtonEvent>,
    last_motion: Option<MouseMotionEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame and applies all of its events.
    ///
    /// Mouse motion and click edges from the previous frame are dropped first. A quit request
    /// stays set until [`InputState::clear`] or [`InputState::set_quit`].
    pub fn poll_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.mouse_moved = false;
        self.mouse_clicked = false;
        self.last_click = None;
        self.last_motion = None;
        self.pressed.clear();

        for event in events {
            match event {
                InputEvent::Quit => self.quit = true,
                InputEvent::KeyDown { scancode, repeat } => {
                    self.keys.insert(scancode);
                    if !repeat {
                        self.pressed.insert(scancode);
                    }
                }
                InputEvent::KeyUp { scancode } => {
                    self.keys.remove(&scancode);
                }
                InputEvent::MouseButtonDown(evt) => {
                    self.mouse_clicked = true;
                    self.last_click = Some(evt);
                    self.buttons.insert(evt.button);
                    self.mouse_pos = IVec2::new(evt.x, evt.y);
                }
                InputEvent::MouseButtonUp(evt) => {
                    self.buttons.remove(&evt.button);
                    self.mouse_pos = IVec2::new(evt.x, evt.y);
                }
                InputEvent::MouseMotion(evt) => {
                    self.mouse_moved = true;
                    self.last_motion = Some(match self.last_motion {
                        // several motion events in one frame accumulate their deltas
                        Some(prev) => MouseMotionEvent {
                            xrel: prev.xrel + evt.xrel,
                            yrel: prev.yrel + evt.yrel,
                            ..evt
                        },
                        None => evt,
                    });
                    self.mouse_pos = IVec2::new(evt.x, evt.y);
                }
            }
        }
    }

    /// Replaces the held keys with a live snapshot from the backend.
    pub fn set_keyboard_snapshot(&mut self, scancodes: impl IntoIterator<Item = u32>) {
        self.keys.clear();
        self.keys.extend(scancodes);
    }

    /// Replaces the mouse position and held buttons with a live snapshot from the backend.
    pub fn set_mouse_snapshot(&mut self, pos: IVec2, buttons: impl IntoIterator<Item = MouseButton>) {
        self.mouse_pos = pos;
        self.buttons.clear();
        self.buttons.extend(buttons);
    }

    /// Checks if the key with the given name is held, e.g. `"w"` or `"Space"`.
    ///
    /// Unknown key names are never down.
    pub fn key_down(&self, name: &str) -> bool {
        scancode_from_name(name).is_some_and(|code| self.key_down_scancode(code))
    }

    /// Checks if the key with the given scancode is held.
    pub fn key_down_scancode(&self, scancode: u32) -> bool {
        self.keys.contains(&scancode)
    }

    /// Checks if the key with the given name went down this frame.
    pub fn key_pressed(&self, name: &str) -> bool {
        scancode_from_name(name).is_some_and(|code| self.key_pressed_scancode(code))
    }

    /// Checks if the key with the given scancode went down this frame.
    pub fn key_pressed_scancode(&self, scancode: u32) -> bool {
        self.pressed.contains(&scancode)
    }

    /// Checks if `button` was clicked this frame.
    pub fn mouse_click(&self, button: MouseButton) -> bool {
        self.mouse_clicked && self.last_click.is_some_and(|evt| evt.button == button)
    }

    /// Checks if `button` is currently held.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// The latest click of this frame.
    pub fn click(&self) -> Option<MouseButtonEvent> {
        self.last_click
    }

    /// Checks if the mouse moved this frame.
    pub fn mouse_motion(&self) -> bool {
        self.mouse_moved
    }

    /// The mouse motion of this frame, with the relative movement summed over all events.
    pub fn motion(&self) -> Option<MouseMotionEvent> {
        self.last_motion
    }

    pub fn mouse_pos(&self) -> IVec2 {
        self.mouse_pos
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    pub fn set_quit(&mut self, quit: bool) {
        self.quit = quit;
    }

    /// Forgets all input, used when switching states so old input does not leak into the new one.
    pub fn clear(&mut self) {
        *self = Self {
            mouse_pos: self.mouse_pos,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(button: MouseButton) -> MouseButtonEvent {
        MouseButtonEvent {
            button,
            x: 10,
            y: 20,
            clicks: 1,
        }
    }

    fn key_press(scancode: u32) -> InputEvent {
        InputEvent::KeyDown {
            scancode,
            repeat: false,
        }
    }

    fn key_repeat(scancode: u32) -> InputEvent {
        InputEvent::KeyDown {
            scancode,
            repeat: true,
        }
    }

    fn motion(xrel: i32, yrel: i32) -> MouseMotionEvent {
        MouseMotionEvent {
            x: 100,
            y: 50,
            xrel,
            yrel,
        }
    }

    #[test]
    fn test_keys_by_name_and_scancode() {
        let mut input = InputState::new();
        input.poll_events([key_press(26)]);
        assert!(input.key_down("w"));
        assert!(input.key_down("W"));
        assert!(input.key_down_scancode(26));
        assert!(!input.key_down("s"));
        assert!(!input.key_down("no such key"));

        input.poll_events([InputEvent::KeyUp { scancode: 26 }]);
        assert!(!input.key_down("w"));
    }

    #[test]
    fn test_key_pressed_is_an_edge() {
        let mut input = InputState::new();
        input.poll_events([key_press(21)]);
        assert!(input.key_pressed("r"));
        assert!(input.key_down("r"));

        // a key repeat is not a new press
        input.poll_events([key_repeat(21)]);
        assert!(!input.key_pressed("r"));
        assert!(input.key_down("r"));

        input.poll_events([InputEvent::KeyUp { scancode: 21 }]);
        input.poll_events([key_press(21)]);
        assert!(input.key_pressed_scancode(21));
    }

    #[test]
    fn test_repeat_after_clear_is_not_a_press() {
        let mut input = InputState::new();
        input.poll_events([key_press(19)]);
        assert!(input.key_pressed("p"));

        input.clear();
        input.poll_events([key_repeat(19)]);
        assert!(!input.key_pressed("p"));
        assert!(input.key_down("p"));
    }

    #[test]
    fn test_keys_persist_across_frames() {
        let mut input = InputState::new();
        input.poll_events([key_press(44)]);
        input.poll_events([]);
        assert!(input.key_down("Space"));
    }

    #[test]
    fn test_click_is_an_edge_and_down_is_a_level() {
        let mut input = InputState::new();
        input.poll_events([InputEvent::MouseButtonDown(click(MouseButton::Left))]);
        assert!(input.mouse_click(MouseButton::Left));
        assert!(!input.mouse_click(MouseButton::Right));
        assert!(input.mouse_down(MouseButton::Left));
        assert_eq!(input.click(), Some(click(MouseButton::Left)));

        input.poll_events([]);
        assert!(!input.mouse_click(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.poll_events([InputEvent::MouseButtonUp(click(MouseButton::Left))]);
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_motion_accumulates_within_a_frame() {
        let mut input = InputState::new();
        input.poll_events([
            InputEvent::MouseMotion(motion(3, -1)),
            InputEvent::MouseMotion(motion(2, 4)),
        ]);
        assert!(input.mouse_motion());
        let m = input.motion().unwrap();
        assert_eq!((m.xrel, m.yrel), (5, 3));
        assert_eq!(input.mouse_pos(), IVec2::new(100, 50));

        input.poll_events([]);
        assert!(!input.mouse_motion());
        assert_eq!(input.motion(), None);
    }

    #[test]
    fn test_quit_is_latched() {
        let mut input = InputState::new();
        input.poll_events([InputEvent::Quit]);
        input.poll_events([]);
        assert!(input.quit());
        input.set_quit(false);
        assert!(!input.quit());
        input.set_quit(true);
        assert!(input.quit());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut input = InputState::new();
        input.poll_events([
            InputEvent::Quit,
            key_press(4),
            InputEvent::MouseButtonDown(click(MouseButton::Right)),
            InputEvent::MouseMotion(motion(1, 1)),
        ]);
        input.clear();
        assert!(!input.quit());
        assert!(!input.mouse_motion());
        assert!(!input.mouse_click(MouseButton::Right));
        assert!(!input.mouse_down(MouseButton::Right));
        assert!(!input.key_down("a"));
        assert!(!input.key_pressed("a"));
        assert_eq!(input.click(), None);
        assert_eq!(input.motion(), None);
    }

    #[test]
    fn test_snapshots_replace_level_state() {
        let mut input = InputState::new();
        input.poll_events([key_press(4)]);
        input.set_keyboard_snapshot([5, 6]);
        assert!(!input.key_down("a"));
        assert!(input.key_down("b"));
        assert!(input.key_down("c"));

        input.set_mouse_snapshot(IVec2::new(3, 4), [MouseButton::Middle]);
        assert_eq!(input.mouse_pos(), IVec2::new(3, 4));
        assert!(input.mouse_down(MouseButton::Middle));
    }

    #[test]
    fn test_button_from_index() {
        assert_eq!(MouseButton::from_index(1), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_index(3), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_index(0), None);
        assert_eq!(MouseButton::Middle as u8, 2);
    }
}
