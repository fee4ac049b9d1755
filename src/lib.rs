//! PartMaster Library
//!
//! Tracks a collection of construction-toy sets and how far each set's parts
//! have been collected. A set's part list is fetched from a generative service,
//! normalized into canonical shapes and kept in one persisted application state.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `gemini` - Generative service client used to fetch part lists
//! - `management` - Application state: store transitions, session and persistence
//! - `normalize` - Conversion of fetched records into sets and parts
//! - `retrieval` - Search orchestration over a pluggable fetcher
//! - `types` - Data structures and type definitions
//! - `utils` - Identifier generation, URL templates and helpers
//!
//! # Example
//!
//! ```
//! use partmaster::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> partmaster::Res<()> {
//!     config::load_env().await?;
//!     cli::list_sets().await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod gemini;
pub mod management;
pub mod normalize;
pub mod retrieval;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use partmaster::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Opening saved collection...");
/// info!("Found {} sets", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Set added to the collection");
/// success!("Collected {} parts", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. Only the binary layer uses it, for configuration
/// problems that make a command impossible to run.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Saved state unreadable, starting with an empty collection");
/// warning!("No set matches '{}'", reference);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
