use crate::prelude::{println, *};
use colored::Colorize;
use userdir_core::directory::{
    DirectoryOutput, DirectoryQuery, DirectoryView, Post, SortKey, User, UserCard,
    DEFAULT_PAGE_SIZE,
};
use userdir_core::pagination::{PageChange, PaginationControl};

use super::{api_base, fetch_posts, fetch_users, format_pagination_control, new_spinner, or_empty};

/// How the directory page is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum ViewMode {
    Cards,
    Table,
}

/// Ordering of the directory, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
pub enum SortArg {
    None,
    Name,
    Email,
    Company,
    City,
    Posts,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => SortKey::None,
            SortArg::Name => SortKey::Name,
            SortArg::Email => SortKey::Email,
            SortArg::Company => SortKey::Company,
            SortArg::City => SortKey::City,
            SortArg::Posts => SortKey::Posts,
        }
    }
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Case-insensitive search over name, username, email and company
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show users working for this company (can be repeated)
    #[arg(short, long = "company", value_name = "COMPANY")]
    pub companies: Vec<String>,

    /// Sort order (posts sorts by post count, most first)
    #[arg(long, value_enum, default_value = "none")]
    pub sort: SortArg,

    /// Number of users per page
    #[arg(short, long, env = "USERDIR_LIMIT", default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: usize,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Layout of the directory page
    #[arg(long, value_enum, env = "USERDIR_VIEW", default_value = "cards")]
    pub view: ViewMode,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    fn query(&self) -> Result<DirectoryQuery> {
        if self.limit == 0 {
            return Err(eyre!("--limit must be at least 1"));
        }

        Ok(DirectoryQuery {
            search: self.search.clone(),
            companies: self.companies.clone(),
            sort: self.sort.into(),
            page_size: self.limit,
        })
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching users and posts...");
    }

    let spinner = new_spinner("Fetching users and posts...");
    let output = list_users_data(&options, api_base(&global)).await;
    spinner.finish_and_clear();
    let output = output?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output, &options);
    }

    Ok(())
}

/// Fetches users and posts and returns the requested directory page
pub async fn list_users_data(options: &ListOptions, base: &str) -> Result<DirectoryOutput> {
    let query = options.query()?;

    let client = reqwest::Client::new();
    let (users, posts) = futures::join!(fetch_users(&client, base), fetch_posts(&client, base));
    let users = or_empty(users, "users");
    let posts = or_empty(posts, "posts");

    log::debug!("Loaded {} users and {} posts", users.len(), posts.len());

    Ok(build_directory(users, posts, query, options.page))
}

/// Build the directory page the options point at.
///
/// Page requests outside the filtered range are ignored and the first page is shown.
pub fn build_directory(
    users: Vec<User>,
    posts: Vec<Post>,
    query: DirectoryQuery,
    page: usize,
) -> DirectoryOutput {
    let mut view = DirectoryView::with_query(users, posts, query);
    if !view.change_page(PageChange(page)) && page != 1 {
        log::warn!(
            "Page {} is out of range ({} pages available), showing page 1",
            page,
            view.total_pages()
        );
    }
    view.render()
}

/// Convert directory output to JSON string
fn format_list_json(output: &DirectoryOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_card(card: &UserCard) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {} {}\n",
        format!("[{}]", card.id).yellow().bold(),
        card.name.white().bold(),
        format!("@{}", card.username).bright_black()
    ));
    result.push_str(&format!("    {}: {}\n", "Email".green(), card.email.cyan()));
    result.push_str(&format!(
        "    {}: {}\n",
        "Company".green(),
        card.company.bright_white()
    ));
    if let Some(phrase) = &card.catch_phrase {
        result.push_str(&format!("    {}\n", format!("\"{phrase}\"").italic()));
    }
    result.push_str(&format!(
        "    {}: {} | {}: {} | {}: {}\n",
        "City".green(),
        card.city.as_deref().unwrap_or("unknown").bright_white(),
        "Posts".green(),
        card.post_count.to_string().bright_magenta(),
        "Avatar".green(),
        card.avatar.bright_black()
    ));
    result.push_str(&format!(
        "    {}: {}\n",
        "View posts".green(),
        format!("userdir users posts {}", card.id).cyan()
    ));

    result
}

fn format_table(cards: &[UserCard]) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Email".bold().cyan(),
        "Company".bold().cyan(),
        "City".bold().cyan(),
        "Posts".bold().cyan()
    ]);

    for card in cards {
        table.add_row(prettytable::row![
            card.id.to_string().bright_yellow(),
            card.name.bright_white(),
            card.email,
            card.company.bright_magenta(),
            card.city.as_deref().unwrap_or("-"),
            card.post_count
        ]);
    }

    table.to_string()
}

/// Convert directory output to formatted text with colors
fn format_list_text(output: &DirectoryOutput, options: &ListOptions) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    // Header
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "USER DIRECTORY (Page {} of {})",
            pagination.current_page, pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}: {} | {}: {}\n",
        "Total users".green(),
        output.total_users.to_string().bright_white(),
        "Total posts".green(),
        output.total_posts.to_string().bright_white()
    ));

    if !output.active_filters.is_empty() {
        result.push_str(&format!(
            "{}: {}\n",
            "Active filters".green(),
            output.active_filters.join(" | ").bright_yellow()
        ));
    }

    if output.users.is_empty() {
        result.push_str(&format!("\n{}\n", "No users found.".yellow()));
    } else {
        match options.view {
            ViewMode::Cards => {
                for card in &output.users {
                    result.push_str(&format_card(card));
                }
            }
            ViewMode::Table => {
                result.push('\n');
                result.push_str(&format_table(&output.users));
            }
        }
    }

    // Navigation section
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    let control = PaginationControl::new(pagination.current_page, pagination.total_pages);
    result.push_str(&format!("\n{}\n", format_pagination_control(&control)));

    result.push_str(&format!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "matching users".bright_white()
    ));

    result.push_str(&format!("\n{}:\n", "To navigate".bright_white().bold()));
    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }

    if !output.companies.is_empty() {
        result.push_str(&format!(
            "\n{}:\n",
            "To filter by company".bright_white().bold()
        ));
        result.push_str(&format!(
            "  {}\n",
            "userdir users list --company <name>".cyan()
        ));
        result.push_str(&format!(
            "  {}: {}\n",
            "Companies".green(),
            output.companies.join(", ").bright_black()
        ));
    }

    if !output.active_filters.is_empty() {
        result.push_str(&format!("\n{}:\n", "To clear filters".bright_white().bold()));
        result.push_str(&format!("  {}\n", "userdir users list".cyan()));
    }

    result.push_str(&format!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", "userdir users list --json".cyan()));

    result.push('\n');
    result
}

fn output_json(output: &DirectoryOutput) -> Result<()> {
    let json = format_list_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &DirectoryOutput, options: &ListOptions) {
    let formatted = format_list_text(output, options);
    print!("{}", formatted);
}
