use crate::form::OverlayForm;
use crate::overlay::OverlaySettings;
use anyhow::{bail, Context, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Largest upload the rendering server accepts (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Multipart field carrying an uploaded file.
pub const IMAGE_FIELD: &str = "image";
/// Multipart field carrying the selected sample name.
pub const SAMPLE_FIELD: &str = "sample_image";

/// Image the text is rendered onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Upload { file_name: String, bytes: Arc<[u8]> },
    Sample(String),
}

/// Snapshot of the form taken at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub settings: OverlaySettings,
    pub text: String,
    pub image: ImageSource,
}

impl Submission {
    /// Capture the form. An attached upload wins over the sample field;
    /// the two are kept exclusive by the session anyway.
    pub fn capture(form: &OverlayForm) -> Result<Self> {
        let image = if let Some(path) = form.upload() {
            read_upload(path)?
        } else if !form.sample().is_empty() {
            ImageSource::Sample(form.sample().to_string())
        } else {
            bail!("no image selected");
        };
        Ok(Self {
            settings: OverlaySettings::from_form(form),
            text: form.text.clone(),
            image,
        })
    }

    /// Text fields of the request body in the order they are sent.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("text", self.text.clone())];
        fields.extend(self.settings.pairs());
        if let ImageSource::Sample(name) = &self.image {
            fields.push((SAMPLE_FIELD, name.clone()));
        }
        fields
    }

    pub fn to_multipart(&self) -> Result<Form> {
        let mut form = Form::new();
        for (key, value) in self.text_fields() {
            form = form.text(key, value);
        }
        if let ImageSource::Upload { file_name, bytes } = &self.image {
            let part = Part::bytes(bytes.to_vec())
                .file_name(file_name.clone())
                .mime_str(mime_for(file_name))?;
            form = form.part(IMAGE_FIELD, part);
        }
        Ok(form)
    }
}

fn read_upload(path: &Path) -> Result<ImageSource> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    if meta.len() > MAX_UPLOAD_BYTES {
        bail!(
            "{} is larger than the {} MiB upload limit",
            path.display(),
            MAX_UPLOAD_BYTES / (1024 * 1024)
        );
    }
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(ImageSource::Upload {
        file_name,
        bytes: bytes.into(),
    })
}

pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// The external service that composites the text onto the image.
pub trait RenderService {
    /// Render `submission` and return the encoded image.
    fn process(&self, submission: &Submission) -> Result<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`RenderService`] backed by the server's `/process` HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpRenderService {
    client: Client,
    base: Url,
}

impl HttpRenderService {
    pub fn new(server_url: &str) -> Result<Self> {
        let mut base = Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent("overlay-panel")
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn process_url(&self) -> Result<Url> {
        Ok(self.base.join("process")?)
    }

    pub fn sample_image_url(&self, name: &str) -> Result<Url> {
        Ok(self
            .base
            .join(&format!("sample_image/{}", urlencoding::encode(name)))?)
    }

    /// Fetch a sample image from the server, used for thumbnails.
    pub fn sample_image(&self, name: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(self.sample_image_url(name)?)
            .send()
            .with_context(|| format!("fetch sample '{name}'"))?;
        if !resp.status().is_success() {
            bail!("sample '{name}' unavailable ({})", resp.status());
        }
        Ok(resp.bytes().context("read sample body")?.to_vec())
    }
}

impl RenderService for HttpRenderService {
    fn process(&self, submission: &Submission) -> Result<Vec<u8>> {
        let url = self.process_url()?;
        tracing::debug!(%url, "posting overlay submission");
        let resp = self
            .client
            .post(url)
            .multipart(submission.to_multipart()?)
            .send()
            .context("send /process request")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => bail!("processing failed ({status}): {}", err.error),
                Err(_) => bail!("processing failed ({status})"),
            }
        }
        Ok(resp.bytes().context("read /process body")?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_without_image_fails() {
        let form = OverlayForm::new();
        assert!(Submission::capture(&form).is_err());
    }

    #[test]
    fn sample_name_is_sent() {
        let mut form = OverlayForm::new();
        form.set_sample("beach.jpg");
        let sub = Submission::capture(&form).unwrap();
        let fields = sub.text_fields();
        assert_eq!(fields[0], ("text", "Sample Text".to_string()));
        assert!(fields.contains(&(SAMPLE_FIELD, "beach.jpg".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "font_name"));
    }

    #[test]
    fn urls_are_joined_under_base() {
        let svc = HttpRenderService::new("http://localhost:5000/app").unwrap();
        assert_eq!(svc.process_url().unwrap().as_str(), "http://localhost:5000/app/process");
        assert_eq!(
            svc.sample_image_url("my beach.jpg").unwrap().as_str(),
            "http://localhost:5000/app/sample_image/my%20beach.jpg"
        );
    }

    #[test]
    fn mime_by_extension() {
        assert_eq!(mime_for("a.JPG"), "image/jpeg");
        assert_eq!(mime_for("a.png"), "image/png");
        assert_eq!(mime_for("a"), "application/octet-stream");
    }
}
