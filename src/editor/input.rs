//! Keyboard bindings for the document surface.
//!
//! Raw egui input is turned into `SurfaceEvent`s here so the panel can apply
//! them without touching egui types.

use crate::document::{KeyCommand, Motion, SelectionPoint};
use eframe::egui::{self, Key, Modifiers};

/// Input the document surface forwards to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Printable text, typed or pasted
    Text(String),
    Command(KeyCommand),
    Tab { shift: bool },
    Move { motion: Motion, extend: bool },
    SelectAll,
    /// Pointer press at a character position
    Click { point: SelectionPoint, extend: bool },
    /// Pointer drag to a character position
    Drag(SelectionPoint),
    Focus,
    Blur,
}

/// Named command bound to a key chord, if any.
pub fn key_binding(key: Key, modifiers: Modifiers) -> Option<KeyCommand> {
    let command = modifiers.command;
    match key {
        Key::Enter if modifiers.shift => Some(KeyCommand::SoftEnter),
        Key::Enter => Some(KeyCommand::SplitBlock),
        Key::Backspace if command || modifiers.alt => Some(KeyCommand::BackspaceWord),
        Key::Backspace => Some(KeyCommand::Backspace),
        Key::Delete => Some(KeyCommand::Delete),
        Key::B if command => Some(KeyCommand::Bold),
        Key::I if command => Some(KeyCommand::Italic),
        Key::U if command => Some(KeyCommand::Underline),
        Key::J if command => Some(KeyCommand::Code),
        Key::X if command && modifiers.shift => Some(KeyCommand::Strikethrough),
        _ => None,
    }
}

/// Cursor motion bound to a key chord. The flag is whether the selection
/// extends.
pub fn motion_binding(key: Key, modifiers: Modifiers) -> Option<(Motion, bool)> {
    let motion = match key {
        Key::ArrowLeft => Motion::Left,
        Key::ArrowRight => Motion::Right,
        Key::ArrowUp => Motion::Up,
        Key::ArrowDown => Motion::Down,
        Key::Home if modifiers.command => Motion::DocumentStart,
        Key::End if modifiers.command => Motion::DocumentEnd,
        Key::Home => Motion::BlockStart,
        Key::End => Motion::BlockEnd,
        _ => return None,
    };
    Some((motion, modifiers.shift))
}

/// Translate this frame's keyboard events for a focused surface.
pub fn surface_events(input: &egui::InputState) -> Vec<SurfaceEvent> {
    let mut events = Vec::new();
    for event in &input.events {
        match event {
            egui::Event::Text(text) if !text.is_empty() => {
                events.push(SurfaceEvent::Text(text.clone()));
            }
            egui::Event::Paste(text) if !text.is_empty() => {
                events.push(SurfaceEvent::Text(text.clone()));
            }
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if *key == Key::Tab {
                    events.push(SurfaceEvent::Tab {
                        shift: modifiers.shift,
                    });
                } else if *key == Key::A && modifiers.command {
                    events.push(SurfaceEvent::SelectAll);
                } else if let Some(command) = key_binding(*key, *modifiers) {
                    events.push(SurfaceEvent::Command(command));
                } else if let Some((motion, extend)) = motion_binding(*key, *modifiers) {
                    events.push(SurfaceEvent::Move { motion, extend });
                }
            }
            _ => {}
        }
    }
    events
}
