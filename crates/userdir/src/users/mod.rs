use crate::prelude::{println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::de::DeserializeOwned;
use userdir_core::directory::{Post, User};
use userdir_core::pagination::PaginationControl;

pub mod list;
pub mod posts;
pub mod show;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, clap::Parser)]
#[command(name = "users")]
#[command(about = "Directory operations (list users, read posts, show profiles)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List users as cards or a table, with search, company filters and sorting
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Page through the posts written by a user
    #[clap(name = "posts")]
    Posts(posts::PostsOptions),

    /// Show a user's profile
    #[clap(name = "show")]
    Show(show::ShowOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Directory API Base: {}", api_base(&global));
        println!();
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Posts(options) => posts::run(options, global).await,
        Commands::Show(options) => show::run(options, global).await,
    }
}

// Shared utility functions
pub fn api_base(global: &crate::Global) -> &str {
    global.api_base.trim_end_matches('/')
}

pub fn extract_user_id(input: &str) -> Result<u64> {
    // Try to parse as number first
    if let Ok(id) = input.trim().parse::<u64>() {
        return Ok(id);
    }

    // Try to extract from an API URL
    let re = Regex::new(r"/users/(\d+)").map_err(|e| eyre!("Invalid user pattern: {}", e))?;
    if let Some(id_match) = re.captures(input).and_then(|caps| caps.get(1)) {
        return id_match
            .as_str()
            .parse::<u64>()
            .map_err(|_| eyre!("Failed to parse user ID from URL"));
    }

    Err(Error::InvalidUser(input.to_string()).into())
}

async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    log::debug!("GET {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Failed to fetch {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "Failed to fetch {url}: HTTP {}",
            response.status()
        ))
        .into());
    }

    response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse response from {}: {}", url, e))
}

pub async fn fetch_users(client: &reqwest::Client, base: &str) -> Result<Vec<User>> {
    fetch_json(client, &format!("{base}/users")).await
}

pub async fn fetch_posts(client: &reqwest::Client, base: &str) -> Result<Vec<Post>> {
    fetch_json(client, &format!("{base}/posts")).await
}

pub async fn fetch_user_posts(
    client: &reqwest::Client,
    base: &str,
    user_id: u64,
) -> Result<Vec<Post>> {
    fetch_json(client, &format!("{base}/posts?userId={user_id}")).await
}

pub async fn fetch_user(client: &reqwest::Client, base: &str, user_id: u64) -> Result<User> {
    let url = format!("{base}/users/{user_id}");
    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(format!("Failed to fetch {url}: {e}")))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::UserNotFound(user_id).into());
    }

    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "Failed to fetch {url}: HTTP {}",
            response.status()
        ))
        .into());
    }

    let user: User = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse user {}: {}", user_id, e))?;

    // JSONPlaceholder answers unknown ids with `{}`
    if user.id == 0 {
        return Err(Error::UserNotFound(user_id).into());
    }

    Ok(user)
}

/// Collapse a failed collection fetch into an empty collection, logging the cause.
pub fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        log::error!("Error fetching {what}: {err}");
        Vec::new()
    })
}

pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Render a pagination control as a single line of buttons.
///
/// The current page is bracketed, disabled previous/next controls are dimmed.
pub fn format_pagination_control(control: &PaginationControl) -> String {
    let previous = format!("‹ {}", PaginationControl::PREVIOUS_LABEL);
    let next = format!("{} ›", PaginationControl::NEXT_LABEL);

    let mut parts = Vec::new();
    parts.push(if control.prev_disabled() {
        previous.bright_black().to_string()
    } else {
        previous.green().to_string()
    });

    for button in control.buttons() {
        if button.is_current {
            parts.push(format!("[{}]", button.page).bright_cyan().bold().to_string());
        } else {
            parts.push(format!(" {} ", button.page).white().to_string());
        }
    }

    parts.push(if control.next_disabled() {
        next.bright_black().to_string()
    } else {
        next.green().to_string()
    });

    parts.join(" ")
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(control: &PaginationControl) -> String {
        colored::control::set_override(false);
        format_pagination_control(control)
    }

    #[test]
    fn test_extract_user_id_number() {
        assert_eq!(extract_user_id("7").unwrap(), 7);
        assert_eq!(extract_user_id(" 12 ").unwrap(), 12);
    }

    #[test]
    fn test_extract_user_id_url() {
        let id = extract_user_id("https://jsonplaceholder.typicode.com/users/3").unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_extract_user_id_invalid() {
        let err = extract_user_id("not-a-user").unwrap_err();
        assert!(err.to_string().contains("Invalid user ID or URL"));
    }

    #[test]
    fn test_or_empty_on_error() {
        let users: Vec<User> = or_empty(Err(eyre!("boom")), "users");
        assert!(users.is_empty());
    }

    #[test]
    fn test_or_empty_on_success() {
        let posts = or_empty(Ok(vec![Post::default()]), "posts");
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_format_pagination_control_middle() {
        let line = plain(&PaginationControl::new(5, 10));

        assert!(line.contains("‹ Previous page"));
        assert!(line.contains("[5]"));
        assert!(line.contains(" 3 "));
        assert!(line.contains(" 7 "));
        assert!(!line.contains(" 8 "));
        assert!(line.contains("Next page ›"));
    }

    #[test]
    fn test_format_pagination_control_single_page() {
        let line = plain(&PaginationControl::new(1, 1));
        assert!(line.contains("[1]"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
    }
}
