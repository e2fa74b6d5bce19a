//! Feeds SDL2 events into an [`InputState`].

use glam::IVec2;
use glint_core::input::{InputEvent, InputState, MouseButton, MouseButtonEvent, MouseMotionEvent};
use sdl2::{event::Event, event::WindowEvent};

fn mouse_button(button: sdl2::mouse::MouseButton) -> Option<MouseButton> {
    match button {
        sdl2::mouse::MouseButton::Left => Some(MouseButton::Left),
        sdl2::mouse::MouseButton::Middle => Some(MouseButton::Middle),
        sdl2::mouse::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

/// Translates an SDL event, or returns `None` for events that are not input.
fn translate(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            scancode: Some(scancode),
            repeat,
            ..
        } => Some(InputEvent::KeyDown {
            scancode: scancode as i32 as u32,
            repeat,
        }),
        Event::KeyUp {
            scancode: Some(scancode),
            ..
        } => Some(InputEvent::KeyUp {
            scancode: scancode as i32 as u32,
        }),
        Event::MouseButtonDown {
            mouse_btn,
            clicks,
            x,
            y,
            ..
        } => mouse_button(mouse_btn).map(|button| {
            InputEvent::MouseButtonDown(MouseButtonEvent {
                button,
                x,
                y,
                clicks,
            })
        }),
        Event::MouseButtonUp {
            mouse_btn,
            clicks,
            x,
            y,
            ..
        } => mouse_button(mouse_btn).map(|button| {
            InputEvent::MouseButtonUp(MouseButtonEvent {
                button,
                x,
                y,
                clicks,
            })
        }),
        Event::MouseMotion {
            x, y, xrel, yrel, ..
        } => Some(InputEvent::MouseMotion(MouseMotionEvent { x, y, xrel, yrel })),
        _ => None,
    }
}

/// Drains every pending SDL event into `input` and refreshes its keyboard and mouse snapshots.
///
/// Must be called once per frame before `input` is queried. Window events are handed back to the
/// caller.
pub fn poll(pump: &mut sdl2::EventPump, input: &mut InputState) -> Vec<WindowEvent> {
    let mut window_events = Vec::new();
    let mut events = Vec::new();
    for event in pump.poll_iter() {
        if let Event::Window { win_event, .. } = event {
            window_events.push(win_event);
        } else if let Some(event) = translate(&event) {
            events.push(event);
        }
    }
    input.poll_events(events);

    input.set_keyboard_snapshot(
        pump.keyboard_state()
            .pressed_scancodes()
            .map(|scancode| scancode as i32 as u32),
    );
    let mouse = pump.mouse_state();
    input.set_mouse_snapshot(
        IVec2::new(mouse.x(), mouse.y()),
        mouse.pressed_mouse_buttons().filter_map(mouse_button),
    );
    window_events
}
