//! Document navigation and transform operations

use super::AppController;

impl AppController {
    pub async fn change_page(&self, offset: i64) {
        let mut model = self.model.lock().await;
        let Some(document) = model.document_mut() else {
            return;
        };
        let page = document.change_page(offset);
        model.page_input.sync(page);
        tracing::debug!(page, offset, "Page changed");
    }

    /// Apply a manual page entry; the field always ends up showing the
    /// page actually displayed
    pub async fn submit_page_jump(&self, raw: &str) {
        let mut model = self.model.lock().await;
        let Some(document) = model.document_mut() else {
            return;
        };
        let page = document.submit_page_jump(raw);
        model.page_input.sync(page);
        model.page_input.blur();
    }

    pub async fn change_scale(&self, delta: f64) {
        let mut model = self.model.lock().await;
        if let Some(document) = model.document_mut() {
            let scale = document.change_scale(delta);
            tracing::debug!(scale, "Zoom changed");
        }
    }

    pub async fn rotate(&self) {
        let mut model = self.model.lock().await;
        if let Some(document) = model.document_mut() {
            let rotation = document.rotate();
            tracing::debug!(degrees = rotation.degrees(), "Rotated");
        }
    }

    pub async fn toggle_fit_mode(&self) {
        let mut model = self.model.lock().await;
        if let Some(document) = model.document_mut() {
            let mode = document.toggle_fit_mode();
            tracing::debug!(mode = mode.label(), scale = document.scale, "Fit mode toggled");
        }
    }

    // ========================================================================
    // Page-jump field
    // ========================================================================

    pub async fn focus_page_input(&self) {
        {
            let mut model = self.model.lock().await;
            if !model.document().is_some_and(|d| d.is_ready()) {
                return;
            }
            model.page_input.text.clear();
            model.page_input.focus();
        }
        self.pin_controls().await;
    }

    pub async fn page_input_digit(&self, c: char) {
        self.model.lock().await.page_input.push_digit(c);
    }

    pub async fn page_input_backspace(&self) {
        self.model.lock().await.page_input.backspace();
    }

    pub async fn submit_page_input(&self) {
        let raw = self.model.lock().await.page_input.text.clone();
        self.submit_page_jump(&raw).await;
        self.pointer_activity().await;
    }

    pub async fn cancel_page_input(&self) {
        {
            let mut model = self.model.lock().await;
            let page = model.document().map(|d| d.page).unwrap_or(1);
            model.page_input.sync(page);
            model.page_input.blur();
        }
        self.pointer_activity().await;
    }
}
