use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use partmaster::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a set's part list and add it to the collection
    Search(SearchOptions),

    /// List the sets in your collection
    List,

    /// Show the parts of a set (defaults to the open set)
    Show(OptionalSetOptions),

    /// Open a set for the part commands
    Open(SetOptions),

    /// Close the open set
    Close,

    /// Count one more collected piece of a part
    Collect(PartOptions),

    /// Count one less collected piece of a part
    Uncollect(PartOptions),

    /// Mark a part as fully collected
    Fill(PartOptions),

    /// Mark every part of a set as collected
    Complete(OptionalSetOptions),

    /// Remove a set from the collection
    Delete(DeleteOptions),

    /// Clear the last search error
    Dismiss,

    /// Summary of the collection
    Info,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Catalog number of the set, e.g. 10221
    pub set_number: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SetOptions {
    /// Set id, catalog number or position in `list`
    pub set: String,
}

#[derive(Parser, Debug, Clone)]
pub struct OptionalSetOptions {
    /// Set id, catalog number or position in `list`
    pub set: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PartOptions {
    /// Part id or position in `show`
    pub part: String,

    /// Set id, catalog number or position; defaults to the open set
    #[clap(long)]
    pub set: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// Set id, catalog number or position in `list`
    pub set: String,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Search(opt) => cli::search(opt.set_number).await,
        Command::List => cli::list_sets().await,
        Command::Show(opt) => cli::show_set(opt.set).await,
        Command::Open(opt) => cli::open_set(opt.set).await,
        Command::Close => cli::close_set().await,
        Command::Collect(opt) => cli::collect_part(opt.part, opt.set).await,
        Command::Uncollect(opt) => cli::uncollect_part(opt.part, opt.set).await,
        Command::Fill(opt) => cli::fill_part(opt.part, opt.set).await,
        Command::Complete(opt) => cli::complete_set(opt.set).await,
        Command::Delete(opt) => cli::delete_set(opt.set, opt.yes).await,
        Command::Dismiss => cli::dismiss_error().await,
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
