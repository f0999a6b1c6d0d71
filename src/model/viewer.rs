//! Document and image viewer state

use super::types::{FitMode, Rotation};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    /// 1-based; meaningful once `total_pages` is known
    pub page: u32,
    pub total_pages: u32,
    pub scale: f64,
    pub rotation: Rotation,
    pub fit_mode: FitMode,
    pub fullscreen: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            scale: FitMode::PAGE_SCALE,
            rotation: Rotation::Deg0,
            fit_mode: FitMode::Page,
            fullscreen: false,
            loading: true,
            error: None,
        }
    }
}

impl ViewerState {
    /// Back to the first page at default zoom, waiting for the new source
    pub fn reset(&mut self) {
        let fullscreen = self.fullscreen;
        *self = Self { fullscreen, ..Self::default() };
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none() && self.total_pages > 0
    }

    pub fn change_page(&mut self, offset: i64) -> u32 {
        if self.total_pages == 0 {
            return self.page;
        }
        let target = (self.page as i64).saturating_add(offset);
        self.page = target.clamp(1, self.total_pages as i64) as u32;
        self.page
    }

    /// Parse a manual page entry. Anything unparseable or out of range is
    /// ignored and the current page is returned unchanged.
    pub fn submit_page_jump(&mut self, raw: &str) -> u32 {
        match raw.trim().parse::<i64>() {
            Ok(requested) if requested >= 1 && requested <= self.total_pages as i64 => {
                self.page = requested as u32;
            }
            _ => {
                tracing::debug!(raw, page = self.page, "Rejected page jump");
            }
        }
        self.page
    }

    pub fn change_scale(&mut self, delta: f64) -> f64 {
        if delta.is_nan() {
            return self.scale;
        }
        let target = ((self.scale + delta) * 100.0).round() / 100.0;
        self.scale = target.clamp(MIN_SCALE, MAX_SCALE);
        self.scale
    }

    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.next();
        self.rotation
    }

    pub fn toggle_fit_mode(&mut self) -> FitMode {
        self.fit_mode = self.fit_mode.toggle();
        self.scale = self.fit_mode.scale();
        self.fit_mode
    }

    pub fn load_succeeded(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.loading = false;
        self.error = None;
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    pub fn load_failed(&mut self, reason: String) {
        self.loading = false;
        self.error = Some(reason);
    }
}

/// Static images only track whether the native load has finished
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageState {
    pub loading: bool,
    pub error: Option<String>,
    pub dimensions: Option<(u32, u32)>,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            dimensions: None,
        }
    }
}

impl ImageState {
    pub fn loaded(&mut self, width: u32, height: u32) {
        self.loading = false;
        self.error = None;
        self.dimensions = Some((width, height));
    }

    pub fn failed(&mut self, reason: String) {
        self.loading = false;
        self.error = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(total_pages: u32, page: u32) -> ViewerState {
        let mut state = ViewerState::default();
        state.load_succeeded(total_pages);
        state.page = page;
        state
    }

    #[test]
    fn change_page_stops_at_last_page() {
        let mut state = document(10, 10);
        assert_eq!(state.change_page(1), 10);
        assert_eq!(state.change_page(-100), 1);
        assert_eq!(state.change_page(3), 4);
    }

    #[test]
    fn change_page_is_ignored_before_load() {
        let mut state = ViewerState::default();
        assert_eq!(state.change_page(1), 1);
    }

    #[test]
    fn invalid_page_jumps_keep_current_page() {
        let mut state = document(10, 4);
        for raw in ["abc", "", "0", "11", "-2", "4.5", "99999999999999999999"] {
            assert_eq!(state.submit_page_jump(raw), 4, "input {raw:?}");
        }
        assert_eq!(state.submit_page_jump(" 7 "), 7);
    }

    #[test]
    fn scale_stays_within_bounds() {
        let mut state = document(3, 1);
        state.scale = 3.0;
        assert_eq!(state.change_scale(0.5), 3.0);

        for delta in [-10.0, -0.1, 0.1, 0.3, 10.0, f64::INFINITY, f64::NAN] {
            let scale = state.change_scale(delta);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&scale), "delta {delta}");
        }
    }

    #[test]
    fn zoom_steps_land_on_hundredths() {
        let mut state = document(3, 1);
        state.change_scale(0.1);
        state.change_scale(0.1);
        assert_eq!(state.scale, 1.2);
    }

    #[test]
    fn reset_restores_defaults_but_keeps_fullscreen() {
        let mut state = document(8, 6);
        state.scale = 2.2;
        state.rotate();
        state.fullscreen = true;

        state.reset();
        assert_eq!(state.page, 1);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.rotation, Rotation::Deg0);
        assert!(state.loading);
        assert!(state.fullscreen);
    }

    #[test]
    fn load_failure_is_recorded_inline() {
        let mut state = ViewerState::default();
        state.load_failed("broken xref".to_string());
        assert!(!state.loading);
        assert!(!state.is_ready());
        assert_eq!(state.error.as_deref(), Some("broken xref"));
    }

    #[test]
    fn image_load_clears_flag() {
        let mut image = ImageState::default();
        assert!(image.loading);
        image.loaded(640, 480);
        assert!(!image.loading);
        assert_eq!(image.dimensions, Some((640, 480)));
    }
}
