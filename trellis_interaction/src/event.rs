// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event vocabulary consumed by the controllers.
//!
//! These are deliberately thin: the host translates its native keyboard, pointer, and focus
//! events into them, and reads back [`KeyEvent::is_default_prevented`] and friends afterwards
//! to decide whether to run its own default action.

use trellis_selection::PointerType;

bitflags::bitflags! {
    /// Modifier keys held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Meta / Command / Windows.
        const META  = 0b1000;
    }
}

/// Platform family, which decides the meaning of some modifiers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS and iOS: Command acts as Control, Option adds to a selection.
    Apple,
    /// Everything else.
    #[default]
    Other,
}

impl Platform {
    /// Whether the platform's "control" modifier (Command on Apple) is held.
    pub fn is_ctrl_key_pressed(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Apple => modifiers.contains(Modifiers::META),
            Self::Other => modifiers.contains(Modifiers::CTRL),
        }
    }

    /// Whether the modifier that moves focus without replacing the selection is held.
    pub fn is_non_contiguous_selection_modifier(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Apple => modifiers.contains(Modifiers::ALT),
            Self::Other => modifiers.contains(Modifiers::CTRL),
        }
    }
}

/// A logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character; Space is `Character(' ')`.
    Character(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Any other named key.
    Other,
}

/// Where an event's target sits relative to the element handling it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The handling element itself.
    #[default]
    Current,
    /// Something inside the handling element.
    Descendant,
    /// Something outside it (for example reached through a portal).
    Outside,
}

impl EventTarget {
    /// Whether the target is the handling element or inside it.
    pub fn is_within(self) -> bool {
        matches!(self, Self::Current | Self::Descendant)
    }
}

/// Position of a focus event's related element (where focus came from or goes to).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelatedTarget {
    /// Inside the handling element.
    Within,
    /// Before the handling element in document order.
    Before,
    /// After the handling element in document order.
    After,
}

/// Mouse button identifier; `0` is the primary button.
pub type Button = u8;

/// The primary (usually left) mouse button.
pub const PRIMARY_BUTTON: Button = 0;

/// A key press.
#[derive(Clone, Debug)]
pub struct KeyEvent {
    /// The key pressed.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Where the event originated relative to the handling element.
    pub target: EventTarget,
    /// Event time in milliseconds; drives the typeahead timeout.
    pub timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    /// A key press on the handling element with no modifiers at time zero.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            target: EventTarget::Current,
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the target position.
    #[must_use]
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the timestamp in milliseconds.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler asked to skip the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Ask the host not to deliver the event to further elements.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A pointer press, release, click, or long press.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    /// Kind of pointer.
    pub pointer_type: PointerType,
    /// Button involved; [`PRIMARY_BUTTON`] for touch and pen contacts.
    pub button: Button,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Where the event originated relative to the handling element.
    pub target: EventTarget,
    default_prevented: bool,
}

impl PointerEvent {
    /// A primary-button event from `pointer_type` on the handling element.
    pub fn new(pointer_type: PointerType) -> Self {
        Self {
            pointer_type,
            button: PRIMARY_BUTTON,
            modifiers: Modifiers::empty(),
            target: EventTarget::Current,
            default_prevented: false,
        }
    }

    /// A primary mouse button event.
    pub fn mouse() -> Self {
        Self::new(PointerType::Mouse)
    }

    /// A touch contact.
    pub fn touch() -> Self {
        Self::new(PointerType::Touch)
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the target position.
    #[must_use]
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Whether this is a primary-button mouse event.
    pub fn is_primary_mouse(&self) -> bool {
        self.pointer_type == PointerType::Mouse && self.button == PRIMARY_BUTTON
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler asked to skip the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Focus entering or leaving an element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusEvent {
    /// The element that gained (focus-in) or lost (focus-out) focus.
    pub target: EventTarget,
    /// The element focus came from (focus-in) or moves to (focus-out), if any.
    pub related_target: Option<RelatedTarget>,
}
