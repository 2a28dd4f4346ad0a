//! `pandoc` subprocess backend

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use super::{PageSource, RenderError, Renderer};
use crate::config::{SiteConfig, StyleConfig};

/// Input format: Markdown with YAML metadata blocks, without generated
/// heading identifiers
pub const SOURCE_FORMAT: &str = "markdown+yaml_metadata_block-auto_identifiers";

/// Renders documents by running `pandoc`
#[derive(Debug, Clone)]
pub struct PandocRenderer {
    program: String,
    /// Flags used by every invocation
    base_args: Vec<OsString>,
    /// Extra flags for page passes: styling, then pass-through flags
    page_flags: Vec<OsString>,
}

impl PandocRenderer {
    /// Create a renderer from the site configuration
    pub fn new(config: &SiteConfig) -> Self {
        let base_args = vec![
            OsString::from(format!("--from={}", SOURCE_FORMAT)),
            OsString::from("-t"),
            OsString::from("html5"),
            OsString::from("--ascii"),
        ];

        let mut page_flags = style_args(&config.style);
        page_flags.extend(config.renderer_args.iter().map(OsString::from));

        Self {
            program: config.renderer_program.clone(),
            base_args,
            page_flags,
        }
    }

    /// Program name as configured
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolve the program on `PATH`
    pub fn locate(&self) -> Result<PathBuf, RenderError> {
        which::which(&self.program).map_err(|source| RenderError::NotFound {
            program: self.program.clone(),
            source,
        })
    }

    /// Arguments of a capture pass
    fn fragment_args(&self, source: &Path) -> Vec<OsString> {
        let source = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        let mut args = self.base_args.clone();
        args.push(source.into_os_string());
        args
    }

    /// Arguments of a page pass; `None` reads Markdown from stdin
    fn page_args(&self, source: Option<&Path>, output: &Path) -> Vec<OsString> {
        let mut args = self.base_args.clone();
        args.extend(self.page_flags.iter().cloned());
        args.push(OsString::from("-o"));
        args.push(output.as_os_str().to_owned());
        if let Some(source) = source {
            args.push(source.as_os_str().to_owned());
        }
        args
    }

    fn command(&self, args: &[OsString]) -> Command {
        tracing::debug!("Running {} {:?}", self.program, args);
        let mut command = Command::new(&self.program);
        command.args(args);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> RenderError {
        RenderError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Turn a finished process into an error when it failed
    fn check(&self, output: &Output) -> Result<(), RenderError> {
        if output.status.success() {
            return Ok(());
        }
        Err(RenderError::Failed {
            program: self.program.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Renderer for PandocRenderer {
    fn render_fragment(&self, source: &Path) -> Result<String, RenderError> {
        let output = self
            .command(&self.fragment_args(source))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        self.check(&output)?;

        String::from_utf8(output.stdout).map_err(|_| RenderError::InvalidOutput {
            program: self.program.clone(),
        })
    }

    fn render_page(&self, source: PageSource<'_>, output: &Path) -> Result<(), RenderError> {
        let result = match source {
            PageSource::File(path) => self
                .command(&self.page_args(Some(path), output))
                .stdin(Stdio::null())
                .output()
                .map_err(|e| self.spawn_error(e))?,

            PageSource::Markdown(text) => {
                let mut child = self
                    .command(&self.page_args(None, output))
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(|e| self.spawn_error(e))?;

                // Dropping stdin after the write signals EOF
                let written = child
                    .stdin
                    .take()
                    .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));

                // An early exit breaks the pipe; its status and stderr say why
                let result = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
                self.check(&result)?;
                written.map_err(|e| self.spawn_error(e))?;
                result
            }
        };

        self.check(&result)
    }
}

/// Page-pass styling flags; standalone mode when none are configured
fn style_args(style: &StyleConfig) -> Vec<OsString> {
    if style.is_empty() {
        return vec![OsString::from("-s")];
    }

    let paths = [
        ("--template", &style.template),
        ("--include-in-header", &style.include_in_header),
        ("--include-before-body", &style.include_before_body),
        ("--include-after-body", &style.include_after_body),
    ];

    let mut args: Vec<OsString> = paths
        .into_iter()
        .filter_map(|(flag, path)| path.as_ref().map(|p| flag_value(flag, p.as_os_str())))
        .collect();

    if let Some(css) = &style.css {
        args.push(flag_value("--css", OsStr::new(css)));
    }

    args
}

/// `--flag=value`
fn flag_value(flag: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push("=");
    arg.push(value);
    arg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Author;

    fn config() -> SiteConfig {
        SiteConfig::new(
            "Blog",
            "https://example.com/",
            Author {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            },
        )
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_standalone_without_style() {
        let renderer = PandocRenderer::new(&config());
        let args = strings(renderer.page_args(Some(Path::new("a.md")), Path::new("a.html")));
        assert_eq!(
            args,
            vec![
                "--from=markdown+yaml_metadata_block-auto_identifiers",
                "-t",
                "html5",
                "--ascii",
                "-s",
                "-o",
                "a.html",
                "a.md",
            ]
        );
    }

    #[test]
    fn test_style_and_passthrough_args() {
        let mut config = config();
        config.style.template = Some(PathBuf::from("tpl.html"));
        config.style.include_after_body = Some(PathBuf::from("footer.html"));
        config.style.css = Some("/style.css".to_string());
        config.renderer_args = vec!["--toc".to_string(), "--mathjax".to_string()];

        let renderer = PandocRenderer::new(&config);
        let args = strings(renderer.page_args(None, Path::new("index.html")));
        assert_eq!(
            &args[4..],
            &[
                "--template=tpl.html",
                "--include-after-body=footer.html",
                "--css=/style.css",
                "--toc",
                "--mathjax",
                "-o",
                "index.html",
            ]
        );
        assert!(!args.contains(&"-s".to_string()));
    }

    #[test]
    fn test_fragment_args_have_no_page_flags() {
        let mut config = config();
        config.style.css = Some("/style.css".to_string());
        config.renderer_args = vec!["--toc".to_string()];

        let renderer = PandocRenderer::new(&config);
        let args = strings(renderer.fragment_args(Path::new("missing.md")));
        assert_eq!(args.len(), 5);
        assert_eq!(args[4], "missing.md");
    }

    #[test]
    fn test_missing_program() {
        let mut config = config();
        config.renderer_program = "yass-no-such-converter".to_string();

        let renderer = PandocRenderer::new(&config);
        assert!(matches!(renderer.locate(), Err(RenderError::NotFound { .. })));
        assert!(matches!(
            renderer.render_fragment(Path::new("a.md")),
            Err(RenderError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_early_exit_reports_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config();
        // `sh` rejects the format flags and exits without reading its input
        config.renderer_program = "sh".to_string();

        let renderer = PandocRenderer::new(&config);
        let markdown = "# Archive\n".repeat(100_000);
        let err = renderer
            .render_page(PageSource::Markdown(&markdown), &dir.path().join("index.html"))
            .unwrap_err();
        match err {
            RenderError::Failed { stderr, .. } => assert!(!stderr.is_empty()),
            other => panic!("expected a failed run, got {:?}", other),
        }
    }
}
