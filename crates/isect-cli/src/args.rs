use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the isect binary.
#[derive(Parser, Debug)]
#[command(
    name = "isect",
    version,
    about = "Checks intersection and union types in class declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check source files and directories.
    Check(CheckArgs),
    /// Parse one type expression and print its rendering and members.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check. Directories are walked recursively.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Treat classes that cannot be found as unrelated instead of reporting them.
    #[arg(long)]
    pub permissive: bool,

    /// Do not warn about `callable` in intersection types.
    #[arg(long = "no-lint")]
    pub no_lint: bool,

    /// Path to an isect.json file. Defaults to ./isect.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// File extensions collected from directories (comma-separated).
    #[arg(long = "ext", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// The type expression, e.g. `?Foo` or `A&B`.
    #[arg(value_name = "TYPE")]
    pub ty: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
