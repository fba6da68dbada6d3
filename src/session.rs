use crate::clipboard::{copy_with_feedback, ClipboardBackend, CopyButton};
use crate::codec::{self, DecodeReport};
use crate::form::OverlayForm;
use crate::notify::Notifier;
use crate::samples::SampleGallery;
use crate::submission::{RenderService, Submission};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// File name used when saving the rendered image.
pub const DOWNLOAD_FILE_NAME: &str = "image_with_text.jpg";

static NEXT_PREVIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Rendered image currently shown in the results area.
#[derive(Debug, Clone)]
pub struct Preview {
    id: u64,
    bytes: Arc<[u8]>,
}

impl Preview {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            id: NEXT_PREVIEW_ID.fetch_add(1, Ordering::Relaxed),
            bytes: bytes.into(),
        }
    }

    /// Session-local handle of this image; a new render gets a new id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn fetch(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

/// The two URL display fields and the panel that hosts the share URL.
#[derive(Debug, Clone, Default)]
pub struct SharePanel {
    pub share_url: String,
    pub settings_url: String,
    pub visible: bool,
}

/// State of one open control panel.
pub struct PanelSession {
    form: Option<OverlayForm>,
    base_url: Url,
    pub gallery: SampleGallery,
    pub share: SharePanel,
    preview: Option<Preview>,
    pub preview_visible: bool,
    loading: bool,
    last_submission: Option<Submission>,
}

impl PanelSession {
    /// A session whose form is not attached yet.
    pub fn new(base_url: Url, gallery: SampleGallery) -> Self {
        Self {
            form: None,
            base_url,
            gallery,
            share: SharePanel::default(),
            preview: None,
            preview_visible: false,
            loading: false,
            last_submission: None,
        }
    }

    /// A session with a fresh form, restored from `query` when given, and
    /// its share URL already computed.
    pub fn open(base_url: Url, gallery: SampleGallery, query: Option<&str>) -> Self {
        let mut session = Self::new(base_url, gallery);
        session.attach_form(OverlayForm::new());
        if let Some(query) = query {
            session.load_from_query(query);
        }
        session.update_share_url();
        session
    }

    pub fn attach_form(&mut self, form: OverlayForm) {
        self.form = Some(form);
    }

    pub fn form(&self) -> Option<&OverlayForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut OverlayForm> {
        self.form.as_mut()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// Restore form state from a share URL or query string.
    pub fn load_from_query(&mut self, query: &str) -> Option<DecodeReport> {
        let Some(form) = self.form.as_mut() else {
            tracing::error!("form not attached; cannot load settings from url");
            return None;
        };
        let report = codec::decode_into(query, form);
        if let Some(name) = &report.sample {
            self.gallery.clear();
            if !self.gallery.select(name) {
                tracing::warn!("sample '{name}' from url is not in the gallery");
            }
        }
        tracing::info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "loaded settings from url"
        );
        Some(report)
    }

    /// Re-encode the form into the share and settings URL fields and show
    /// the share panel.
    pub fn update_share_url(&mut self) -> Option<Url> {
        let Some(form) = self.form.as_ref() else {
            tracing::error!("form not attached; share url not updated");
            return None;
        };
        let url = codec::encode_form(&self.base_url, form);
        self.share.share_url = url.to_string();
        self.share.settings_url = url.to_string();
        self.share.visible = true;
        tracing::debug!(%url, "share url generated");
        Some(url)
    }

    /// Select a sample image. Any uploaded file is dropped.
    pub fn select_sample(&mut self, name: &str) -> bool {
        if !self.gallery.select(name) {
            tracing::warn!("unknown sample '{name}'");
            return false;
        }
        if let Some(form) = self.form.as_mut() {
            form.set_sample(name);
            form.clear_upload();
        }
        self.update_share_url();
        true
    }

    /// Attach an uploaded file. Clears the sample selection and hides the
    /// share panel since a local file cannot be shared by URL.
    pub fn attach_upload(&mut self, path: PathBuf) {
        let Some(form) = self.form.as_mut() else {
            tracing::error!("form not attached; upload ignored");
            return;
        };
        tracing::info!("attached upload {}", path.display());
        form.set_upload(path);
        form.clear_sample();
        self.gallery.clear();
        self.share.visible = false;
    }

    /// Snapshot the form and enter the loading state.
    ///
    /// Returns `None` when nothing should be sent: no form, a request already
    /// in flight, or a snapshot that could not be taken.
    pub fn begin_submit(&mut self, notifier: &mut dyn Notifier) -> Option<Submission> {
        let Some(form) = self.form.as_ref() else {
            tracing::error!("form not attached; submit ignored");
            return None;
        };
        if self.loading {
            tracing::warn!("submission already in flight; ignoring submit");
            return None;
        }
        let submission = match Submission::capture(form) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("form submit error: {e:#}");
                notifier.alert(&format!("Error: {e:#}"));
                return None;
            }
        };
        self.loading = true;
        self.preview_visible = false;
        Some(submission)
    }

    /// Apply the outcome of a request started with [`Self::begin_submit`].
    pub fn finish_submit(
        &mut self,
        submission: Submission,
        result: anyhow::Result<Vec<u8>>,
        notifier: &mut dyn Notifier,
    ) {
        match result {
            Ok(bytes) => {
                let preview = Preview::new(bytes);
                tracing::info!(id = preview.id(), "preview ready");
                self.preview = Some(preview);
                self.preview_visible = true;
                self.last_submission = Some(submission);
                self.update_share_url();
            }
            Err(e) => {
                tracing::error!("form submit error: {e:#}");
                notifier.alert(&format!("Error: {e:#}"));
            }
        }
        self.loading = false;
    }

    /// Submit synchronously through `service`.
    pub fn submit(&mut self, service: &dyn RenderService, notifier: &mut dyn Notifier) -> bool {
        let Some(submission) = self.begin_submit(notifier) else {
            return false;
        };
        let result = service.process(&submission);
        let ok = result.is_ok();
        self.finish_submit(submission, result, notifier);
        ok
    }

    /// Save the displayed preview as [`DOWNLOAD_FILE_NAME`] inside `dir`.
    pub fn download(&self, dir: &Path, notifier: &mut dyn Notifier) -> Option<PathBuf> {
        if self.last_submission.is_none() {
            notifier.alert("Please create a preview first!");
            return None;
        }
        let Some(preview) = self.preview.as_ref() else {
            notifier.alert("Download error: no preview available");
            return None;
        };
        let path = dir.join(DOWNLOAD_FILE_NAME);
        let bytes = preview.fetch();
        if let Err(e) = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, &bytes[..])) {
            tracing::error!("download error: {e}");
            notifier.alert(&format!("Download error: {e}"));
            return None;
        }
        tracing::info!("saved preview to {}", path.display());
        notifier.info(&format!("Saved {}", path.display()));
        Some(path)
    }

    pub fn copy_share_url(
        &mut self,
        primary: Option<&mut dyn ClipboardBackend>,
        fallback: &mut dyn ClipboardBackend,
        button: &mut CopyButton,
        notifier: &mut dyn Notifier,
        now: Instant,
    ) -> bool {
        let text = self.share.share_url.clone();
        copy_with_feedback(&text, primary, fallback, button, notifier, now)
    }

    /// Copy the settings URL, encoding it first so it is never stale.
    pub fn copy_settings_url(
        &mut self,
        primary: Option<&mut dyn ClipboardBackend>,
        fallback: &mut dyn ClipboardBackend,
        button: &mut CopyButton,
        notifier: &mut dyn Notifier,
        now: Instant,
    ) -> bool {
        self.update_share_url();
        if self.share.settings_url.is_empty() {
            notifier.alert("No URL available yet.");
            return false;
        }
        let text = self.share.settings_url.clone();
        copy_with_feedback(&text, primary, fallback, button, notifier, now)
    }
}
