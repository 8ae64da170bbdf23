use crate::prelude::{println, *};
use colored::Colorize;
use userdir_core::pagination::PaginationControl;
use userdir_core::posts::{build_posts_output, PostsOutput};

use super::{
    api_base, extract_user_id, fetch_user, fetch_user_posts, format_pagination_control,
    new_spinner, or_empty, truncate_text,
};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct PostsOptions {
    /// User ID or API URL (e.g., "1" or "https://jsonplaceholder.typicode.com/users/1")
    #[clap(env = "USERDIR_USER")]
    pub user: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: PostsOptions, global: crate::Global) -> Result<()> {
    let user_id = extract_user_id(&options.user)?;

    if global.verbose {
        println!("Fetching posts for user ID: {}", user_id);
    }

    let spinner = new_spinner("Fetching posts...");
    let output = user_posts_data(user_id, options.page, api_base(&global)).await;
    spinner.finish_and_clear();
    let output = output?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_posts_text(&output));
    }

    Ok(())
}

/// Fetches a user and their posts and returns the requested page
pub async fn user_posts_data(user_id: u64, page: usize, base: &str) -> Result<PostsOutput> {
    let client = reqwest::Client::new();
    let (user, posts) = futures::join!(
        fetch_user(&client, base, user_id),
        fetch_user_posts(&client, base, user_id)
    );

    let user = user.wrap_err("Error fetching user")?;
    let posts = or_empty(posts, "posts");

    let output = build_posts_output(&user, &posts, page);
    if output.requested_page != output.pagination.current_page {
        log::warn!(
            "Page {} is out of range ({} pages available), showing page 1",
            page,
            output.pagination.total_pages
        );
    }
    Ok(output)
}

/// Convert a posts page to formatted text with colors
fn format_posts_text(output: &PostsOutput) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("Posts from {}", output.author).bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.posts.is_empty() {
        result.push_str(&format!("\n{}\n", "No posts on this page.".yellow()));
    } else {
        for post in &output.posts {
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{}]", post.id).yellow().bold(),
                post.title.white().bold()
            ));
            for line in truncate_text(&post.body, 300).lines() {
                result.push_str(&format!("    {}\n", line));
            }
            result.push_str(&format!(
                "    {}: {}\n",
                "View Author".green(),
                post.view_author_command.cyan()
            ));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if output.show_pagination {
        let control = PaginationControl::new(pagination.current_page, pagination.total_pages);
        result.push_str(&format!("\n{}\n", format_pagination_control(&control)));
    }

    result.push_str(&format!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "posts".bright_white()
    ));

    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }

    result.push_str(&format!("\n{}:\n", "To go back".bright_white().bold()));
    result.push_str(&format!("  {}\n", "userdir users list".cyan()));
    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdir_core::directory::{Post, User};

    fn create_test_output(post_count: u64, page: usize) -> PostsOutput {
        let user = User {
            id: 1,
            name: "John Doe".to_string(),
            ..Default::default()
        };
        let posts: Vec<Post> = (1..=post_count)
            .map(|id| Post {
                id,
                user_id: 1,
                title: format!("Post {id}"),
                body: format!("This is the body of post {id}"),
            })
            .collect();
        build_posts_output(&user, &posts, page)
    }

    fn plain_text(output: &PostsOutput) -> String {
        colored::control::set_override(false);
        format_posts_text(output)
    }

    #[test]
    fn test_format_posts_heading() {
        let text = plain_text(&create_test_output(2, 1));

        assert!(text.contains("Posts from John Doe"));
        assert!(text.contains("Post 1"));
        assert!(text.contains("This is the body of post 2"));
        assert!(text.contains("View Author: userdir users show 1 --post 1 --page 1"));
    }

    #[test]
    fn test_format_posts_hides_control_for_single_page() {
        let text = plain_text(&create_test_output(2, 1));

        assert!(!text.contains("Previous page"));
        assert!(!text.contains("Next page"));
    }

    #[test]
    fn test_format_posts_shows_control_for_many_pages() {
        let text = plain_text(&create_test_output(6, 1));

        assert!(text.contains("‹ Previous page"));
        assert!(text.contains("[1]"));
        assert!(text.contains("Next page: userdir users posts 1 --page 2"));
    }

    #[test]
    fn test_format_posts_out_of_range_page_shows_first() {
        let text = plain_text(&create_test_output(6, 0));

        assert!(text.contains("Showing page 1 of 2"));
        assert!(text.contains("[1]"));
        assert!(text.contains("Next page: userdir users posts 1 --page 2"));
    }

    #[test]
    fn test_format_posts_empty() {
        let text = plain_text(&create_test_output(0, 1));

        assert!(text.contains("No posts on this page."));
    }
}
