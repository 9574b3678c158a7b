use crate::domain::DeckError;
use serde::{Deserialize, Serialize};

/// Cooldown applied to wheel-triggered transitions. Keyboard, dot-click, and
/// viewport events bypass it, matching how the distinct input devices
/// naturally pace their events.
pub const DEFAULT_WHEEL_COOLDOWN_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WheelDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

/// One event from any of the four input sources the shell listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavEvent {
    Wheel(WheelDirection),
    Key(NavKey),
    DotClick(usize),
    ViewportSync(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavTransition {
    pub index: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("a deck needs at least one slide")]
    EmptyDeck,
}

impl NavError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyDeck => "NAV.EMPTY_DECK",
        }
    }
}

impl From<NavError> for DeckError {
    fn from(error: NavError) -> Self {
        DeckError::input_validation(error.code(), error.to_string())
    }
}

/// Slide-navigation state machine.
///
/// All input sources funnel through [`NavController::submit`] so the
/// reconciliation of wheel, keyboard, dot-click, and viewport observations
/// happens at a single point. Throttling is an explicit ready-at timestamp
/// against a caller-supplied clock, so the policy tests without real timers.
#[derive(Debug, Clone)]
pub struct NavController {
    current_index: usize,
    slide_count: usize,
    wheel_cooldown_ms: u64,
    wheel_ready_at_ms: u64,
}

impl NavController {
    pub fn new(slide_count: usize) -> Result<Self, NavError> {
        Self::with_cooldown(slide_count, DEFAULT_WHEEL_COOLDOWN_MS)
    }

    pub fn with_cooldown(slide_count: usize, wheel_cooldown_ms: u64) -> Result<Self, NavError> {
        if slide_count == 0 {
            return Err(NavError::EmptyDeck);
        }

        Ok(Self {
            current_index: 0,
            slide_count,
            wheel_cooldown_ms,
            wheel_ready_at_ms: 0,
        })
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub const fn is_throttled(&self, now_ms: u64) -> bool {
        now_ms < self.wheel_ready_at_ms
    }

    /// Single intake for all navigation sources.
    ///
    /// Returns the transition for the shell to apply (scroll, focus, dot
    /// refresh), or `None` when a wheel event lands inside the cooldown
    /// window. Clamped commands that do not move the index still emit, so the
    /// dot indicator can refresh.
    pub fn submit(&mut self, event: NavEvent, now_ms: u64) -> Option<NavTransition> {
        match event {
            NavEvent::Wheel(direction) => {
                if self.is_throttled(now_ms) {
                    return None;
                }
                self.wheel_ready_at_ms = now_ms.saturating_add(self.wheel_cooldown_ms);
                Some(match direction {
                    WheelDirection::Down => self.advance(),
                    WheelDirection::Up => self.retreat(),
                })
            }
            NavEvent::Key(key) => Some(match key {
                NavKey::ArrowDown | NavKey::PageDown => self.advance(),
                NavKey::ArrowUp | NavKey::PageUp => self.retreat(),
                NavKey::Home => self.go_to_start(),
                NavKey::End => self.go_to_end(),
            }),
            NavEvent::DotClick(index) => Some(self.go_to(index)),
            NavEvent::ViewportSync(index) => Some(self.sync_from(index)),
        }
    }

    pub fn advance(&mut self) -> NavTransition {
        self.set_index(self.current_index.saturating_add(1))
    }

    pub fn retreat(&mut self) -> NavTransition {
        self.set_index(self.current_index.saturating_sub(1))
    }

    pub fn go_to(&mut self, index: usize) -> NavTransition {
        self.set_index(index)
    }

    pub fn go_to_start(&mut self) -> NavTransition {
        self.set_index(0)
    }

    pub fn go_to_end(&mut self) -> NavTransition {
        self.set_index(self.slide_count - 1)
    }

    /// External correction from the shell's viewport observer. The observed
    /// slide is what the user is actually looking at, so it wins over the
    /// internally tracked index.
    pub fn sync_from(&mut self, observed_index: usize) -> NavTransition {
        self.set_index(observed_index)
    }

    fn set_index(&mut self, requested: usize) -> NavTransition {
        let clamped = requested.min(self.slide_count - 1);
        let changed = clamped != self.current_index;
        self.current_index = clamped;
        NavTransition {
            index: clamped,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NavController, NavError, NavEvent, NavKey, NavTransition, WheelDirection};

    #[test]
    fn construction_rejects_an_empty_deck() {
        assert!(matches!(NavController::new(0), Err(NavError::EmptyDeck)));
        let controller = NavController::new(10).expect("controller");
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.slide_count(), 10);
    }

    #[test]
    fn retreat_clamps_at_the_first_slide() {
        let mut controller = NavController::new(10).expect("controller");

        let transition = controller.retreat();
        assert_eq!(
            transition,
            NavTransition {
                index: 0,
                changed: false
            }
        );
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn repeated_advances_clamp_at_the_last_slide() {
        let mut controller = NavController::new(10).expect("controller");

        for _ in 0..15 {
            controller.advance();
        }
        assert_eq!(controller.current_index(), 9);
    }

    #[test]
    fn go_to_and_out_of_range_dot_clicks_clamp_silently() {
        let mut controller = NavController::new(5).expect("controller");

        assert_eq!(controller.go_to(3).index, 3);
        let transition = controller.submit(NavEvent::DotClick(99), 0);
        assert_eq!(
            transition,
            Some(NavTransition {
                index: 4,
                changed: true
            })
        );
    }

    #[test]
    fn home_and_end_keys_jump_to_the_edges() {
        let mut controller = NavController::new(8).expect("controller");

        controller.submit(NavEvent::Key(NavKey::End), 0);
        assert_eq!(controller.current_index(), 7);
        controller.submit(NavEvent::Key(NavKey::Home), 0);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn wheel_events_inside_the_cooldown_are_dropped() {
        let mut controller = NavController::with_cooldown(10, 800).expect("controller");

        let first = controller.submit(NavEvent::Wheel(WheelDirection::Down), 0);
        assert_eq!(
            first,
            Some(NavTransition {
                index: 1,
                changed: true
            })
        );

        let second = controller.submit(NavEvent::Wheel(WheelDirection::Down), 300);
        assert_eq!(second, None);
        assert_eq!(controller.current_index(), 1);
        assert!(controller.is_throttled(300));

        let third = controller.submit(NavEvent::Wheel(WheelDirection::Down), 800);
        assert_eq!(
            third,
            Some(NavTransition {
                index: 2,
                changed: true
            })
        );
        assert!(!controller.is_throttled(1600));
    }

    #[test]
    fn keyboard_and_dot_clicks_bypass_the_wheel_throttle() {
        let mut controller = NavController::with_cooldown(10, 800).expect("controller");

        controller.submit(NavEvent::Wheel(WheelDirection::Down), 0);
        let key = controller.submit(NavEvent::Key(NavKey::ArrowDown), 100);
        assert_eq!(key.map(|transition| transition.index), Some(2));
        let dot = controller.submit(NavEvent::DotClick(5), 200);
        assert_eq!(dot.map(|transition| transition.index), Some(5));
    }

    #[test]
    fn viewport_sync_wins_over_command_driven_state() {
        let mut controller = NavController::new(10).expect("controller");

        controller.go_to(7);
        let transition = controller.submit(NavEvent::ViewportSync(2), 0);
        assert_eq!(
            transition,
            Some(NavTransition {
                index: 2,
                changed: true
            })
        );
        assert_eq!(controller.current_index(), 2);

        // Idempotent: re-observing the same slide emits an unchanged transition.
        let repeat = controller.submit(NavEvent::ViewportSync(2), 1);
        assert_eq!(
            repeat,
            Some(NavTransition {
                index: 2,
                changed: false
            })
        );
    }
}
