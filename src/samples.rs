use std::path::Path;

/// File extensions the rendering server accepts as sample images.
pub const SAMPLE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

pub fn is_sample_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SAMPLE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// List sample image names found in `dir`. A missing directory yields an
/// empty list.
pub fn scan_dir(dir: &Path) -> anyhow::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_sample_file(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// The set of selectable sample images. At most one is selected.
#[derive(Debug, Clone, Default)]
pub struct SampleGallery {
    names: Vec<String>,
    selected: Option<usize>,
}

impl SampleGallery {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self {
            names,
            selected: None,
        }
    }

    /// Gallery from configured names plus an optional directory scan.
    pub fn load(configured: &[String], dir: Option<&Path>) -> Self {
        let mut names = configured.to_vec();
        if let Some(dir) = dir {
            match scan_dir(dir) {
                Ok(found) => names.extend(found),
                Err(e) => tracing::error!("failed to scan sample directory {}: {e}", dir.display()),
            }
        }
        Self::new(names)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Mark `name` as the only selected sample. Returns `false` and leaves the
    /// selection untouched when no such sample exists.
    pub fn select(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|idx| self.names[idx].as_str())
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected() == Some(name)
    }
}
