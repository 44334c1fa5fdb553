//! Stylesheet sources for exported documents.

use std::path::PathBuf;

/// The checked-in wireframe stylesheet.
pub const BASE_CSS: &str = include_str!("../assets/base.css");

/// Appended after the base stylesheet in every exported document.
pub const EXPORT_OVERRIDES: &str = "\
/* Export overrides */
.wf-component { position: relative; }
.wf-info {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  z-index: 5;
}
.wf-info__button {
  width: 1.75rem;
  height: 1.75rem;
  border-radius: 50%;
  border: 1px solid var(--wf-line);
  background: var(--wf-bg);
  font: inherit;
  font-weight: 700;
  cursor: pointer;
}
.wf-modal {
  position: fixed;
  inset: 0;
  z-index: 100;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(0, 0, 0, 0.45);
}
.wf-modal__dialog {
  max-width: 480px;
  width: calc(100% - 2rem);
  background: var(--wf-bg);
  border-radius: var(--wf-radius);
  padding: 1.5rem;
}
.wf-showcase__entry--inactive { opacity: 0.45; }
.wf-showcase__badge { font-size: 0.75rem; text-transform: uppercase; color: var(--wf-muted); }
.wf-index__pages { list-style: none; padding: 0; }
.wf-index__pages li { padding: 0.5rem 0; border-bottom: 1px solid var(--wf-line); }
";

/// Supplies the base CSS inlined into exported documents.
pub trait StylesheetProvider: Send + Sync {
    fn base_css(&self) -> String;
}

/// Serves [`BASE_CSS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedStylesheet;

impl StylesheetProvider for EmbeddedStylesheet {
    fn base_css(&self) -> String {
        BASE_CSS.to_string()
    }
}

/// Reads CSS files from disk, in order.
///
/// Unreadable files are skipped with a warning. When nothing could be read
/// the embedded stylesheet is used instead.
#[derive(Debug, Clone)]
pub struct FileStylesheet {
    paths: Vec<PathBuf>,
}

impl FileStylesheet {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl StylesheetProvider for FileStylesheet {
    fn base_css(&self) -> String {
        let mut sheets = Vec::new();
        for path in &self.paths {
            match std::fs::read_to_string(path) {
                Ok(css) => sheets.push(css),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable stylesheet");
                }
            }
        }

        if sheets.is_empty() {
            tracing::warn!("No stylesheet could be read, using embedded stylesheet");
            return BASE_CSS.to_string();
        }
        sheets.join("\n")
    }
}

/// Full stylesheet for an exported document.
pub fn document_css(provider: &dyn StylesheetProvider) -> String {
    let mut css = provider.base_css();
    if !css.ends_with('\n') {
        css.push('\n');
    }
    css.push_str(EXPORT_OVERRIDES);
    css
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn embedded_stylesheet_includes_overrides() {
        let css = document_css(&EmbeddedStylesheet);
        assert!(css.starts_with(BASE_CSS.trim_end()));
        assert!(css.contains(".wf-modal"));
    }

    #[test]
    fn file_stylesheet_skips_unreadable_paths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ".custom {{ color: red; }}").unwrap();

        let provider = FileStylesheet::new([
            PathBuf::from("/definitely/not/here.css"),
            file.path().to_path_buf(),
        ]);
        let css = provider.base_css();
        assert!(css.contains(".custom"));
        assert!(!css.contains("--wf-ink"));
    }

    #[test]
    fn file_stylesheet_falls_back_when_nothing_readable() {
        let provider = FileStylesheet::new(["/nope/a.css", "/nope/b.css"]);
        assert_eq!(provider.base_css(), BASE_CSS);
    }
}
