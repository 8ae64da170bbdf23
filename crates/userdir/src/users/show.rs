use crate::prelude::{println, *};
use colored::Colorize;
use userdir_core::posts::{build_profile_output, ProfileOutput};

use super::{api_base, extract_user_id, fetch_user, new_spinner};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// User ID or API URL (e.g., "1" or "https://jsonplaceholder.typicode.com/users/1")
    #[clap(env = "USERDIR_USER")]
    pub user: String,

    /// Post the profile was opened from, enables the way back to the posts list
    #[arg(long)]
    pub post: Option<u64>,

    /// Posts page the post was listed on
    #[arg(short, long, default_value = "1", requires = "post")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let user_id = extract_user_id(&options.user)?;

    if global.verbose {
        println!("Fetching user ID: {}", user_id);
    }

    let spinner = new_spinner("Fetching user...");
    let output = profile_data(user_id, options.post, options.page, api_base(&global)).await;
    spinner.finish_and_clear();
    let output = output?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_profile_text(&output));
    }

    Ok(())
}

/// Fetches a single user and returns their profile
pub async fn profile_data(
    user_id: u64,
    from_post: Option<u64>,
    from_page: usize,
    base: &str,
) -> Result<ProfileOutput> {
    let client = reqwest::Client::new();
    let user = fetch_user(&client, base, user_id)
        .await
        .wrap_err("Error fetching user")?;

    Ok(build_profile_output(&user, from_post, from_page))
}

fn format_profile_text(profile: &ProfileOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{} {}\n",
        profile.name.bright_cyan().bold(),
        format!("@{}", profile.username).bright_black()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    let mut table = new_table();
    table.add_row(prettytable::row!["Email", profile.email]);
    if let Some(phone) = &profile.phone {
        table.add_row(prettytable::row!["Phone", phone]);
    }
    if let Some(website) = &profile.website {
        table.add_row(prettytable::row!["Website", website]);
    }
    if let Some(address) = &profile.address {
        table.add_row(prettytable::row!["Address", address]);
    }
    table.add_row(prettytable::row!["Company", profile.company]);
    if let Some(phrase) = &profile.catch_phrase {
        table.add_row(prettytable::row!["Catch phrase", phrase]);
    }
    if let Some(business) = &profile.business {
        table.add_row(prettytable::row!["Business", business]);
    }
    table.add_row(prettytable::row!["Avatar", profile.avatar]);
    table.add_row(prettytable::row!["ID", profile.id]);

    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if let Some(back) = &profile.back_command {
        result.push_str(&format!("\n{}:\n", "To go back to posts".bright_white().bold()));
        result.push_str(&format!("  {}\n", back.cyan()));
    }

    result.push_str(&format!("\n{}:\n", "To read their posts".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("userdir users posts {}", profile.id).cyan()
    ));

    result.push_str(&format!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("userdir users show {} --json", profile.id).cyan()
    ));
    result.push('\n');
    result
}
