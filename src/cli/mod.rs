//! Command-line interface for tmplx.
//!
//! tmplx has a single command: bind the data given by flags into a data tree
//! and render one template against it.
//!
//! # Usage
//!
//! ```bash
//! # Inline template, inline data
//! tmplx --var greeting=hello -e '{{ Var.greeting }}, world'
//!
//! # CSV from a file, template from a file, a partial next to it
//! tmplx --csv people=people.csv report.txt header.txt
//!
//! # JSON piped in, shared by two keys
//! curl -s https://example.com/api | tmplx --json a=- --json b=- page.html
//!
//! # Template itself from stdin
//! echo '{{ Env.HOME }}' | tmplx -
//! ```
//!
//! # Execution Flow
//!
//! 1. the presence of a template is checked (no I/O)
//! 2. `--var`, `--csv`, `--json`, `--yml` and the environment are bound, in
//!    that order, through one [`StdinArbiter`]
//! 3. template files are read (a `-` template also goes through the arbiter)
//! 4. the entry template is rendered and written to stdout in one piece
//!
//! Any failure aborts before anything is written to stdout.


use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::binding::{
    CsvMode, CsvOptions, DataTree, EnvSnapshot, NamespaceBinder, References, StdinArbiter,
    StdinPolicy,
};
use crate::constants::{ENV_CSV_LENIENT, ENV_CSV_TYPED, ENV_EXCLUSIVE_STDIN};
use crate::core::TmplxError;
use crate::templating::{TemplateRenderer, TemplateSet};

/// Runtime configuration derived from the command line.
///
/// Holding these settings in a plain value lets tests drive
/// [`Cli::execute_with`] with any policy without touching the process
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter directive (`error`, `warn` or `debug`).
    ///
    /// `RUST_LOG`, when set, takes precedence over this value.
    pub log_level: String,

    /// How `-` descriptors share standard input.
    pub stdin_policy: StdinPolicy,

    /// How CSV content is decoded.
    pub csv_options: CsvOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            stdin_policy: StdinPolicy::default(),
            csv_options: CsvOptions::default(),
        }
    }
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render a template with data taken from flags, files and stdin.
///
/// Every data flag takes `key=descriptor`. The descriptor is `-` for stdin,
/// a path with the flag's extension for an existing file, or the content
/// itself. `--var` descriptors are always taken literally.
#[derive(Parser, Debug)]
#[command(
    name = "tmplx",
    about = "Render Tera templates with data from flags, files and stdin",
    version,
    author,
    long_about = "tmplx renders a Tera template against data bound from --var, --csv, --json and --yml \
                  references plus the process environment. Templates reach the data under the \
                  Var, CSV, JSON, YML and Env roots."
)]
pub struct Cli {
    /// Template file followed by partial templates; `-` reads the template from stdin.
    ///
    /// Partials are registered under their file name and can be used with
    /// `{% include "name" %}`. With `--eval`, all files are partials.
    #[arg(value_name = "TEMPLATE")]
    templates: Vec<PathBuf>,

    /// Inline template text, rendered instead of the first template file.
    #[arg(short, long, value_name = "TEMPLATE")]
    eval: Option<String>,

    /// String variable, exposed as `Var.<key>`. Repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,

    /// CSV records (file, `-` or inline), exposed as `CSV.<key>`. Repeatable.
    #[arg(long = "csv", value_name = "KEY=DESCRIPTOR")]
    csvs: Vec<String>,

    /// JSON document (file, `-` or inline), exposed as `JSON.<key>`. Repeatable.
    #[arg(long = "json", value_name = "KEY=DESCRIPTOR")]
    jsons: Vec<String>,

    /// YAML document (file, `-` or inline), exposed as `YML.<key>`. Repeatable.
    #[arg(long = "yml", value_name = "KEY=DESCRIPTOR")]
    ymls: Vec<String>,

    /// Allow only one reference to read stdin instead of sharing its content.
    #[arg(long, env = ENV_EXCLUSIVE_STDIN)]
    exclusive_stdin: bool,

    /// Treat a second CSV row of type hints (`int`, `bool`, ...) as column types.
    #[arg(long, env = ENV_CSV_TYPED)]
    csv_typed: bool,

    /// Bind undecodable CSV as an empty record list instead of failing.
    #[arg(long, env = ENV_CSV_LENIENT)]
    csv_lenient: bool,

    /// Log resolution decisions to stderr.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Build a [`CliConfig`] from the parsed arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clap::Parser;
    /// use tmplx_cli::binding::StdinPolicy;
    /// use tmplx_cli::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["tmplx", "--verbose", "--exclusive-stdin", "-e", "x"]);
    /// let config = cli.build_config();
    /// assert_eq!(config.log_level, "debug");
    /// assert_eq!(config.stdin_policy, StdinPolicy::Exclusive);
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        let stdin_policy = if self.exclusive_stdin {
            StdinPolicy::Exclusive
        } else {
            StdinPolicy::Cached
        };

        let mode = if self.csv_typed {
            CsvMode::Typed
        } else {
            CsvMode::Untyped
        };

        CliConfig {
            log_level: log_level.to_string(),
            stdin_policy,
            csv_options: CsvOptions {
                mode,
                lenient: self.csv_lenient,
            },
        }
    }

    /// The data references given on the command line.
    #[must_use]
    pub fn references(&self) -> References {
        References {
            vars: self.vars.clone(),
            csvs: self.csvs.clone(),
            jsons: self.jsons.clone(),
            ymls: self.ymls.clone(),
        }
    }

    /// Run against the real stdin and stdout.
    ///
    /// `env` is the environment captured when the process started.
    ///
    /// # Errors
    ///
    /// Any [`TmplxError`] from binding, loading or rendering, wrapped in
    /// `anyhow`.
    pub fn execute(&self, config: &CliConfig, env: &EnvSnapshot) -> Result<()> {
        let mut stdin = StdinArbiter::new(config.stdin_policy);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.execute_with(config, &mut stdin, env, &mut out)
    }

    /// Run with injected stdin, environment and output.
    ///
    /// The rendered text is written to `out` only after rendering succeeded.
    ///
    /// # Errors
    ///
    /// - [`TmplxError::NoTemplate`] before any input is read
    /// - the first binding failure
    /// - template read or render failures
    /// - [`TmplxError::OutputWrite`] if `out` rejects the output
    pub fn execute_with<W: Write>(
        &self,
        config: &CliConfig,
        stdin: &mut StdinArbiter,
        env: &EnvSnapshot,
        out: &mut W,
    ) -> Result<()> {
        TemplateSet::ensure_given(self.eval.as_deref(), &self.templates)?;

        let data = {
            let mut binder = NamespaceBinder::new(stdin, config.csv_options);
            DataTree::bind(&self.references(), env, &mut binder)?
        };

        let templates = TemplateSet::load(self.eval.as_deref(), &self.templates, stdin)?;
        let renderer = TemplateRenderer::new(&templates)?;
        let rendered = renderer.render(&data)?;

        debug!("Rendered '{}' ({} bytes)", renderer.entry(), rendered.len());
        out.write_all(rendered.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| TmplxError::OutputWrite {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
