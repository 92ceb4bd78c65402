//=========================================================================
// Input Vocabulary
//=========================================================================
//
// Portable key identifiers and key events fed to move strategies.
//
// The framework does not own a window or poll an OS event loop — that is
// the external driver's job. The driver translates whatever its toolkit
// reports into this stable vocabulary and forwards the events to the
// strategies that care about them.
//
// Flow:
// ```text
//   Driver toolkit (SDL, Winit, terminal, ...)
//           ↓  (driver-side mapping)
//       KeyEvent (this module)
//           ↓
//   KeyboardMoveStrategy → MotionVector
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Identifies the physical key location, not the character it produces,
/// so bindings survive layout differences (QWERTY vs AZERTY). The set
/// covers the keys a 2D game typically binds; drivers map anything else
/// to [`KeyCode::Unidentified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Letters ----------------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Number Row -------------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Arrows -----------------------------------------------------------
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Specials ---------------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    ShiftLeft,
    ShiftRight,

    /// Any key the driver could not map.
    Unidentified,
}

//=== KeyEvent ============================================================

/// A single key state change reported by the driver.
///
/// Drivers should report transitions, not key repeats: one `Pressed` when
/// the key goes down, one `Released` when it comes back up. Strategies
/// tolerate repeats (pressed-set semantics) but deterministic ordering is
/// the driver's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Key transitioned to the down state.
    Pressed(KeyCode),

    /// Key transitioned to the up state.
    Released(KeyCode),
}

impl KeyEvent {
    /// The key this event concerns.
    pub fn key(&self) -> KeyCode {
        match *self {
            KeyEvent::Pressed(key) | KeyEvent::Released(key) => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_codes_are_hashable_and_distinct() {
        let mut set = HashSet::new();
        set.insert(KeyCode::ArrowUp);
        set.insert(KeyCode::ArrowUp);
        set.insert(KeyCode::ArrowDown);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&KeyCode::ArrowUp));
    }

    #[test]
    fn key_event_exposes_its_key() {
        assert_eq!(KeyEvent::Pressed(KeyCode::Space).key(), KeyCode::Space);
        assert_eq!(KeyEvent::Released(KeyCode::KeyW).key(), KeyCode::KeyW);
    }

    #[test]
    fn press_and_release_of_same_key_differ() {
        assert_ne!(
            KeyEvent::Pressed(KeyCode::Enter),
            KeyEvent::Released(KeyCode::Enter)
        );
    }
}
