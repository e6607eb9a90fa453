//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for jiracon: issue
//! listings, bulk transitions and the release reports.

mod bugs;
mod extract;
mod history;
mod list;
mod print;
mod timing;
mod transit;
mod versions;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use jiracon_core::ColorMode;

pub use self::extract::ExtractSource;
pub use self::timing::TimingField;
use crate::context::{GlobalArgs, load_config_from_env};

/// Top-level CLI command for the jiracon tool
#[derive(Parser)]
#[command(name = "jiracon")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Reports and bulk operations over Jira searches")]
#[command(
  long_about = "Jiracon runs JQL searches page by page and turns the results into reports.\n\n\
        It lists and transitions matching issues, summarizes the bugs of a release,\n\
        looks up release versions and digs through an issue's change history."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  #[command(flatten)]
  pub global: GlobalArgs,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the jiracon tool
#[derive(Subcommand)]
pub enum Commands {
  /// List the issues matching a JQL filter
  #[command(long_about = "List every issue matching a JQL filter.\n\n\
            Each issue is printed as 'KEY - summary | created DATE'. The number of issues\n\
            is capped by --limit; pages are requested --count issues at a time.")]
  #[command(alias = "ls")]
  List(list::ListArgs),

  /// Print a type/key/status table, page by page
  #[command(long_about = "Print a fixed-width TYPE|KEY|STATUS table of the issues matching a filter.\n\n\
            Rows are written as soon as each page arrives, so long searches show\n\
            progress before the whole result is in.")]
  Print(print::PrintArgs),

  /// Transition every issue matching a filter
  #[command(long_about = "Apply a named workflow transition to every issue matching a filter.\n\n\
            Issues without the transition are left untouched. With --reassign-from the\n\
            issue is first assigned back to whoever last moved it into that status.\n\
            Issues that do not end up in the expected status are reported as warnings.")]
  Transit(transit::TransitArgs),

  /// Canned bug reports for a project version
  #[command(long_about = "Run one of the canned release queries for a project version.\n\n\
            The table shows each issue's key, a shortened summary and its resolution\n\
            date. The production report needs the release date; without --since it is\n\
            taken from the project's version list.")]
  Bugs(bugs::BugsArgs),

  /// First and last release of a major version
  Versions(versions::VersionsArgs),

  /// Status history of an issue
  #[command(long_about = "Summarize an issue's change history.\n\n\
            Shows who last moved the issue into a status (the configured resolver\n\
            status by default), when that happened and how often it was reopened.")]
  History(history::HistoryArgs),

  /// Extract values from an issue with a regular expression
  #[command(long_about = "Extract values such as build numbers from an issue.\n\n\
            The pattern is matched against the description, a custom field or the\n\
            attachment filenames, and capture group 1 of each match is printed.")]
  Extract(extract::ExtractArgs),

  /// Intervals between the timestamps of matching issues
  Timing(timing::TimingArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let config = load_config_from_env(&cli.global)?;

  match cli.command {
    Commands::List(args) => list::handle_list_command(&args, &config),
    Commands::Print(args) => print::handle_print_command(&args, &config),
    Commands::Transit(args) => transit::handle_transit_command(&args, &config),
    Commands::Bugs(args) => bugs::handle_bugs_command(&args, &config),
    Commands::Versions(args) => versions::handle_versions_command(&args, &config),
    Commands::History(args) => history::handle_history_command(&args, &config),
    Commands::Extract(args) => extract::handle_extract_command(&args, &config),
    Commands::Timing(args) => timing::handle_timing_command(&args, &config),
  }
}
