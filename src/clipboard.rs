use crate::notify::Notifier;
use eframe::egui::Color32;
use std::time::{Duration, Instant};

/// How long a copy button shows its "copied" state.
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// `None` when no clipboard is available on this system.
    pub fn new() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(inner) => Some(Self { inner }),
            Err(e) => {
                tracing::error!("failed to init clipboard: {e}");
                None
            }
        }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.inner.set_text(text.to_string())?;
        Ok(())
    }
}

/// Copy path through the UI toolkit: the text is queued here and handed to
/// egui's output on the next frame. Copying fails until a frame has attached
/// a context to flush through.
#[derive(Debug, Default)]
pub struct PlatformCopy {
    pending: Option<String>,
    attached: bool,
}

impl PlatformCopy {
    /// Mark that a UI frame is running and will call [`PlatformCopy::flush`].
    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn flush(&mut self, ctx: &eframe::egui::Context) {
        if let Some(text) = self.take_pending() {
            ctx.output_mut(|o| o.copied_text = text);
        }
    }
}

impl ClipboardBackend for PlatformCopy {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if !self.attached {
            anyhow::bail!("no UI context to copy through");
        }
        self.pending = Some(text.to_string());
        Ok(())
    }
}

/// A copy button whose label and fill flash after a successful copy.
#[derive(Debug, Clone)]
pub struct CopyButton {
    idle_label: String,
    copied_label: String,
    idle_fill: Color32,
    copied_fill: Color32,
    flashed_until: Option<Instant>,
}

impl CopyButton {
    pub fn new(idle_label: &str, copied_label: &str, idle_fill: Color32) -> Self {
        Self {
            idle_label: idle_label.into(),
            copied_label: copied_label.into(),
            idle_fill,
            copied_fill: Color32::from_rgb(0x20, 0xc9, 0x97),
            flashed_until: None,
        }
    }

    pub fn share() -> Self {
        Self::new("📋 Copy", "✅ Copied!", Color32::from_rgb(0x66, 0x7e, 0xea))
    }

    pub fn settings() -> Self {
        Self::new(
            "📋 Copy settings URL",
            "✅ URL copied!",
            Color32::from_rgb(0x28, 0xa7, 0x45),
        )
    }

    pub fn is_flashing(&self) -> bool {
        self.flashed_until.is_some()
    }

    pub fn label(&self) -> &str {
        if self.is_flashing() {
            &self.copied_label
        } else {
            &self.idle_label
        }
    }

    pub fn fill(&self) -> Color32 {
        if self.is_flashing() {
            self.copied_fill
        } else {
            self.idle_fill
        }
    }

    pub fn flash(&mut self, now: Instant) {
        self.flashed_until = Some(now + FEEDBACK_DURATION);
    }

    /// Restore the idle state once the feedback window has passed. Returns
    /// the time left while still flashing.
    pub fn refresh(&mut self, now: Instant) -> Option<Duration> {
        let until = self.flashed_until?;
        if now >= until {
            self.flashed_until = None;
            None
        } else {
            Some(until - now)
        }
    }
}

/// Copy `text`, preferring `primary` and falling back to `fallback`.
///
/// On success `button` flashes. When both paths fail the user is told to
/// copy by hand.
pub fn copy_with_feedback(
    text: &str,
    primary: Option<&mut dyn ClipboardBackend>,
    fallback: &mut dyn ClipboardBackend,
    button: &mut CopyButton,
    notifier: &mut dyn Notifier,
    now: Instant,
) -> bool {
    let copied = match primary {
        Some(clipboard) => match clipboard.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("clipboard error: {e}");
                false
            }
        },
        None => false,
    };
    if copied {
        button.flash(now);
        return true;
    }
    match fallback.set_text(text) {
        Ok(()) => {
            button.flash(now);
            true
        }
        Err(e) => {
            tracing::error!("copy failed: {e}");
            notifier.alert("Copy failed. Please copy manually.");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_restores_after_window() {
        let start = Instant::now();
        let mut button = CopyButton::share();
        let idle = button.label().to_string();
        button.flash(start);
        assert_eq!(button.label(), "✅ Copied!");
        assert!(button.refresh(start + Duration::from_millis(1500)).is_some());
        assert!(button.refresh(start + FEEDBACK_DURATION).is_none());
        assert_eq!(button.label(), idle);
        assert_eq!(button.fill(), Color32::from_rgb(0x66, 0x7e, 0xea));
    }

    #[test]
    fn platform_copy_needs_a_frame() {
        let mut copy = PlatformCopy::default();
        assert!(copy.set_text("x").is_err());
        assert!(copy.take_pending().is_none());

        copy.attach();
        copy.set_text("x").unwrap();
        assert_eq!(copy.take_pending().as_deref(), Some("x"));
    }
}
