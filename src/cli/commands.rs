use crate::core::encoding::encoding_for_name;
use crate::core::prompt_assembler::assemble_prompt;
use crate::domain::models::{DEFAULT_EXTENSION, ExtensionSet, RunConfig};
use crate::infra::file_system::collect_files_content;
use crate::infra::ignore_rules::{IGNORE_FILE_NAME, IgnoreMatcher};
use crate::infra::input::read_instructions_from_stdin;
use crate::infra::logger::setup_logger;
use crate::infra::output::write_output;
use anyhow::{Context, bail};
use clap::Parser;
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "promptcat", version)]
#[command(
    about = "Concatenate a source tree and your instructions into one prompt",
    long_about = "Walks a directory, keeps files matching the selected extensions that are \
neither hidden nor excluded by the root .gitignore, converts them to UTF-8 and prints them \
together with the instructions read from standard input."
)]
pub struct Cli {
    /// Directory to scan
    #[arg(short = 'p', long = "path", default_value = "./")]
    pub path: PathBuf,

    /// Extensions to include (repeatable or comma-separated, `.` selects every file)
    #[arg(short = 'e', long = "ext", default_value = DEFAULT_EXTENSION)]
    pub ext: Vec<String>,

    /// Input encoding (shift-jis, euc-jp, iso-2022-jp, utf-16le, utf-16be, utf-8); detected when omitted
    #[arg(long)]
    pub encoding: Option<String>,

    /// Write the prompt to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also copy the prompt to the system clipboard
    #[arg(short, long)]
    pub clipboard: bool,

    /// Use this text as the instructions instead of reading standard input
    #[arg(short, long)]
    pub instructions: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<RunConfig> {
        let root_path = std::path::absolute(&self.path)
            .with_context(|| format!("failed to resolve input path {}", self.path.display()))?;

        if let Some(name) = &self.encoding {
            encoding_for_name(name)?;
        }

        Ok(RunConfig {
            root_path,
            extensions: ExtensionSet::from_raw(self.ext.as_slice()),
            encoding: self.encoding,
            output_path: self.output,
            clipboard: self.clipboard,
            instructions: self.instructions,
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;
    debug!("Command line: {:?}", cli);

    let config = cli.into_config()?;
    generate_prompt(&config)
}

fn generate_prompt(config: &RunConfig) -> anyhow::Result<()> {
    let prompt = build_prompt(config, read_instructions_from_stdin)?;

    info!("Writing output");
    write_output(&prompt, config.output_path.as_deref(), config.clipboard)
}

/// Runs the pipeline up to the rendered prompt. `read_stdin` is only called
/// when no inline instructions were given, and only after files were found.
pub fn build_prompt<F>(config: &RunConfig, read_stdin: F) -> anyhow::Result<String>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    let root = config.root_path.as_path();
    let matcher = load_matcher(root)?;

    info!("Scanning for files in {}", root.display());
    let files = collect_files_content(
        root,
        &config.extensions,
        matcher.as_ref(),
        config.encoding.as_deref(),
    )
    .context("failed while collecting file contents")?;

    if files.is_empty() {
        bail!("no valid files found in {}", root.display());
    }

    let instructions = match &config.instructions {
        Some(text) => {
            info!("Using instructions from the command line");
            format!("{}\n", text)
        }
        None => read_stdin()?,
    };

    info!("Building prompt from {} files", files.len());
    Ok(assemble_prompt(&files, &instructions))
}

fn load_matcher(root: &Path) -> anyhow::Result<Option<IgnoreMatcher>> {
    let path = root.join(IGNORE_FILE_NAME);
    IgnoreMatcher::load(&path).with_context(|| format!("failed to load {}", path.display()))
}
