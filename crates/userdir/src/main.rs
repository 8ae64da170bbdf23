use crate::prelude::*;
use clap::Parser;

mod error;
mod prelude;
mod users;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse a user directory, its posts and author profiles from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the users/posts REST API
    #[clap(
        long,
        env = "USERDIR_API_BASE",
        global = true,
        default_value = users::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Whether to display additional information.
    #[clap(long, env = "USERDIR_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Directory operations (list users, read posts, show profiles)
    Users(crate::users::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Users(sub_app) => crate::users::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
