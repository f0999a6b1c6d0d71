//! Auto-hide state for the on-screen controls

/// Visible/hidden toggle with a generation token for the pending hide timer.
///
/// Each qualifying pointer event bumps the generation; a timer only hides the
/// controls if it still carries the current generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlVisibility {
    visible: bool,
    generation: u64,
}

impl Default for ControlVisibility {
    fn default() -> Self {
        Self {
            visible: true,
            generation: 0,
        }
    }
}

impl ControlVisibility {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pointer moved or entered: show and hand out the token for a new timer
    pub fn pointer_activity(&mut self) -> u64 {
        self.visible = true;
        self.generation += 1;
        self.generation
    }

    pub fn pointer_left(&mut self, active: bool) {
        self.generation += 1;
        if active {
            self.visible = false;
        }
    }

    /// Idle timer fired. Hides only for the latest timer and while active.
    pub fn expire(&mut self, token: u64, active: bool) -> bool {
        if token != self.generation || !active {
            return false;
        }
        self.visible = false;
        true
    }

    /// Show and invalidate any pending hide
    pub fn force_visible(&mut self) {
        self.visible = true;
        self.generation += 1;
    }
}
