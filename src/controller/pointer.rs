//! Auto-hide of the on-screen controls

use super::timers::ScopedTimer;
use super::AppController;

impl AppController {
    /// Pointer moved over or entered the viewer
    pub async fn pointer_activity(&self) {
        let token = self.model.lock().await.controls.pointer_activity();

        let model = self.model.clone();
        let timer = ScopedTimer::after(self.config.hide_after, async move {
            let mut model = model.lock().await;
            let active = model.is_content_active();
            if model.controls.expire(token, active) {
                tracing::trace!(token, "Controls auto-hidden");
            }
        });
        self.timers.lock().await.replace_hide(timer);
    }

    pub async fn pointer_left(&self) {
        {
            let mut model = self.model.lock().await;
            let active = model.is_content_active();
            model.controls.pointer_left(active);
        }
        self.timers.lock().await.cancel_hide();
    }

    /// Show the controls and drop any pending hide
    pub(crate) async fn pin_controls(&self) {
        self.model.lock().await.controls.force_visible();
        self.timers.lock().await.cancel_hide();
    }
}
