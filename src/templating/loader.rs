//! Collection of the templates taking part in one render.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::binding::StdinArbiter;
use crate::constants::{EVAL_TEMPLATE_NAME, STDIN_SENTINEL, STDIN_TEMPLATE_NAME};
use crate::core::TmplxError;

/// Key under which a template read from stdin claims the stream.
const STDIN_TEMPLATE_KEY: &str = "template";

/// A named template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name the template is registered under (usable with `include`)
    pub name: String,
    /// Raw template text
    pub content: String,
}

/// Ordered templates of one invocation; the first one is rendered, the rest
/// are partials.
///
/// The entry point is the `--eval` text when given, otherwise the first
/// template file. Files are registered under their file name, so
/// `tmplx main.txt parts/header.txt` lets `main.txt` use
/// `{% include "header.txt" %}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    templates: Vec<TemplateSource>,
}

impl TemplateSet {
    /// Fail early when there is nothing to render.
    ///
    /// # Errors
    ///
    /// [`TmplxError::NoTemplate`] if `eval` is `None` and `paths` is empty.
    pub fn ensure_given(eval: Option<&str>, paths: &[PathBuf]) -> Result<(), TmplxError> {
        if eval.is_none() && paths.is_empty() {
            return Err(TmplxError::NoTemplate);
        }
        Ok(())
    }

    /// Read every template.
    ///
    /// A path of `-` reads the template from stdin through `stdin`, so it
    /// follows the same claim policy as data references.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::NoTemplate`] when nothing was given
    /// - [`TmplxError::TemplateRead`] for unreadable or non-UTF-8 templates,
    ///   and for two templates sharing a name
    /// - stdin claim errors from the arbiter
    pub fn load(
        eval: Option<&str>,
        paths: &[PathBuf],
        stdin: &mut StdinArbiter,
    ) -> Result<Self, TmplxError> {
        Self::ensure_given(eval, paths)?;

        let mut set = Self::default();
        let mut names = HashSet::new();

        if let Some(text) = eval {
            names.insert(EVAL_TEMPLATE_NAME.to_string());
            set.templates.push(TemplateSource {
                name: EVAL_TEMPLATE_NAME.to_string(),
                content: text.to_string(),
            });
        }

        for path in paths {
            let source = if path.as_os_str() == STDIN_SENTINEL {
                read_stdin_template(stdin)?
            } else {
                read_template_file(path)?
            };

            if !names.insert(source.name.clone()) {
                return Err(TmplxError::TemplateRead {
                    path: path.display().to_string(),
                    reason: format!("a template named '{}' is already registered", source.name),
                });
            }
            debug!("Loaded template '{}' ({} bytes)", source.name, source.content.len());
            set.templates.push(source);
        }

        Ok(set)
    }

    /// Append a template after the ones already in the set.
    pub fn push(&mut self, source: TemplateSource) {
        self.templates.push(source);
    }

    /// The template that is rendered.
    #[must_use]
    pub fn entry(&self) -> Option<&TemplateSource> {
        self.templates.first()
    }

    /// All templates, entry point first.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateSource> {
        self.templates.iter()
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn read_stdin_template(stdin: &mut StdinArbiter) -> Result<TemplateSource, TmplxError> {
    let bytes = stdin.read(STDIN_TEMPLATE_KEY)?;
    let content = std::str::from_utf8(bytes).map_err(|e| TmplxError::TemplateRead {
        path: STDIN_SENTINEL.to_string(),
        reason: e.to_string(),
    })?;
    Ok(TemplateSource {
        name: STDIN_TEMPLATE_NAME.to_string(),
        content: content.to_string(),
    })
}

fn read_template_file(path: &Path) -> Result<TemplateSource, TmplxError> {
    let content = fs::read_to_string(path).map_err(|e| TmplxError::TemplateRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(TemplateSource {
        name,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::StdinPolicy;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn no_stdin() -> StdinArbiter {
        StdinArbiter::from_reader(StdinPolicy::Cached, Cursor::new(Vec::new()))
    }

    #[test]
    fn test_nothing_given_is_no_template() {
        assert_eq!(TemplateSet::ensure_given(None, &[]), Err(TmplxError::NoTemplate));
        assert_eq!(TemplateSet::load(None, &[], &mut no_stdin()), Err(TmplxError::NoTemplate));
    }

    #[test]
    fn test_eval_is_entry_and_files_are_partials() {
        let temp = TempDir::new().unwrap();
        let partial = temp.path().join("header.txt");
        fs::write(&partial, "HEADER").unwrap();

        let set = TemplateSet::load(Some("{% include \"header.txt\" %}"), &[partial], &mut no_stdin())
            .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.entry().unwrap().name, EVAL_TEMPLATE_NAME);
        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["eval", "header.txt"]);
    }

    #[test]
    fn test_first_file_is_entry_without_eval() {
        let temp = TempDir::new().unwrap();
        let main = temp.path().join("main.tmpl");
        fs::write(&main, "{{ Var.x }}").unwrap();

        let set = TemplateSet::load(None, &[main], &mut no_stdin()).unwrap();
        let entry = set.entry().unwrap();
        assert_eq!(entry.name, "main.tmpl");
        assert_eq!(entry.content, "{{ Var.x }}");
    }

    #[test]
    fn test_template_from_stdin() {
        let mut stdin =
            StdinArbiter::from_reader(StdinPolicy::Cached, Cursor::new(b"Hello {{ Var.who }}".to_vec()));

        let set = TemplateSet::load(None, &[PathBuf::from("-")], &mut stdin).unwrap();
        assert_eq!(set.entry().unwrap().name, STDIN_TEMPLATE_NAME);
        assert_eq!(set.entry().unwrap().content, "Hello {{ Var.who }}");
    }

    #[test]
    fn test_stdin_template_respects_exclusive_claim() {
        let mut stdin = StdinArbiter::from_reader(StdinPolicy::Exclusive, Cursor::new(b"x".to_vec()));
        stdin.read("rows").unwrap();

        let err = TemplateSet::load(None, &[PathBuf::from("-")], &mut stdin).unwrap_err();
        assert_eq!(
            err,
            TmplxError::StdinAlreadyClaimed {
                key: "template".to_string(),
                claimed_by: "rows".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_file_is_template_read_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.tmpl");

        match TemplateSet::load(None, &[missing], &mut no_stdin()) {
            Err(TmplxError::TemplateRead { path, .. }) => assert!(path.ends_with("nope.tmpl")),
            other => panic!("Expected TemplateRead, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();
        let first = temp.path().join("a").join("part.txt");
        let second = temp.path().join("b").join("part.txt");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "2").unwrap();

        let err = TemplateSet::load(None, &[first, second], &mut no_stdin()).unwrap_err();
        assert!(err.to_string().contains("already registered"), "{err}");
    }
}
