use crate::pagination::{paginate, total_pages, Control, PageChange, Pager, PaginationControl};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default number of user cards per directory page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Number of bundled avatar images the directory cycles through.
pub const AVATAR_COUNT: u64 = 10;

/// User record from the `/users` endpoint
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Address,
    pub company: Company,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Address {
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub geo: Option<Geo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: Option<String>,
    pub bs: Option<String>,
}

/// Post record from the `/posts` endpoint
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// Ordering applied to the filtered directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Name,
    Email,
    Company,
    City,
    Posts,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            SortKey::None => "none",
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Company => "company",
            SortKey::City => "city",
            SortKey::Posts => "posts",
        };
        f.write_str(key)
    }
}

/// Search, filter, sort and page size selected for the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryQuery {
    pub search: String,
    pub companies: Vec<String>,
    pub sort: SortKey,
    pub page_size: usize,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            companies: Vec::new(),
            sort: SortKey::None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

const SEARCH_PREFIX: &str = "Search: ";
const COMPANY_PREFIX: &str = "Company: ";

impl DirectoryQuery {
    /// Human readable labels for every filter currently narrowing the directory.
    pub fn active_filters(&self) -> Vec<String> {
        let mut filters = Vec::new();
        if !self.search.trim().is_empty() {
            filters.push(format!("{SEARCH_PREFIX}{}", self.search.trim()));
        }
        if !self.companies.is_empty() {
            filters.push(format!("{COMPANY_PREFIX}{}", self.companies.join(", ")));
        }
        filters
    }

    /// Drop the filter rendered as `label`. Unknown labels are ignored.
    pub fn remove_filter(&mut self, label: &str) {
        if label.starts_with(SEARCH_PREFIX) {
            self.search.clear();
        } else if label.starts_with(COMPANY_PREFIX) {
            self.companies.clear();
        }
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.companies.clear();
    }

    fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || [&user.name, &user.username, &user.email, &user.company.name]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        let matches_company =
            self.companies.is_empty() || self.companies.iter().any(|c| *c == user.company.name);

        matches_search && matches_company
    }
}

/// Users matching the query's search text and company selection, in input order.
pub fn filter_users(users: &[User], query: &DirectoryQuery) -> Vec<User> {
    users
        .iter()
        .filter(|user| query.matches(user))
        .cloned()
        .collect()
}

/// Reorder users by `key`. Ties fall back to the user id.
pub fn sort_users(users: &mut [User], key: SortKey, posts: &[Post]) {
    let by_text = |a: &str, b: &str| a.to_lowercase().cmp(&b.to_lowercase());

    users.sort_by(|a, b| {
        let ordering = match key {
            SortKey::None => Ordering::Equal,
            SortKey::Name => by_text(&a.name, &b.name),
            SortKey::Email => by_text(&a.email, &b.email),
            SortKey::Company => by_text(&a.company.name, &b.company.name),
            SortKey::City => by_text(
                a.address.city.as_deref().unwrap_or_default(),
                b.address.city.as_deref().unwrap_or_default(),
            ),
            SortKey::Posts => post_count(posts, b.id).cmp(&post_count(posts, a.id)),
        };
        ordering.then(a.id.cmp(&b.id))
    });
}

pub fn post_count(posts: &[Post], user_id: u64) -> usize {
    posts.iter().filter(|p| p.user_id == user_id).count()
}

pub fn posts_for_user(posts: &[Post], user_id: u64) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.user_id == user_id)
        .cloned()
        .collect()
}

/// Avatar image path for a user, cycling through the bundled avatars.
pub fn avatar_path(user_id: u64) -> String {
    let index = if user_id == 0 {
        1
    } else {
        (user_id - 1) % AVATAR_COUNT + 1
    };
    format!("/image{index}.png")
}

/// Sorted, de-duplicated company names (the company filter menu).
pub fn companies(users: &[User]) -> Vec<String> {
    let mut names: Vec<String> = users
        .iter()
        .map(|u| u.company.name.clone())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// One entry of the directory grid or table
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserCard {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub company: String,
    pub catch_phrase: Option<String>,
    pub city: Option<String>,
    pub post_count: usize,
    pub avatar: String,
}

/// Pagination metadata for a rendered view
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub window: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

impl PaginationInfo {
    /// Build pagination metadata from a control, rendering navigation commands with
    /// `command_for(page)`.
    pub fn from_control(
        control: &PaginationControl,
        total_items: usize,
        limit: usize,
        command_for: impl Fn(usize) -> String,
    ) -> Self {
        let next = control.activate(Control::Next);
        let prev = control.activate(Control::Previous);

        Self {
            current_page: control.current(),
            total_pages: control.total_pages(),
            total_items,
            limit,
            window: control.buttons().iter().map(|b| b.page).collect(),
            has_prev: prev.is_some(),
            has_next: next.is_some(),
            next_page_command: next.map(|change| command_for(change.page())),
            prev_page_command: prev.map(|change| command_for(change.page())),
        }
    }
}

/// Complete directory page with cards and pagination
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DirectoryOutput {
    pub users: Vec<UserCard>,
    pub total_users: usize,
    pub total_posts: usize,
    pub companies: Vec<String>,
    pub active_filters: Vec<String>,
    pub pagination: PaginationInfo,
}

/// Navigation command that reproduces `query` at `page`.
pub fn list_command(query: &DirectoryQuery, page: usize) -> String {
    let mut command = String::from("userdir users list");
    if !query.search.trim().is_empty() {
        command.push_str(&format!(" --search {:?}", query.search.trim()));
    }
    for company in &query.companies {
        command.push_str(&format!(" --company {company:?}"));
    }
    if query.sort != SortKey::None {
        command.push_str(&format!(" --sort {}", query.sort));
    }
    if query.page_size != DEFAULT_PAGE_SIZE {
        command.push_str(&format!(" --limit {}", query.page_size));
    }
    command.push_str(&format!(" --page {page}"));
    command
}

/// Directory state owner: the data, the query and the page the user is looking at.
///
/// Every mutation goes through [`DirectoryView::recompute`], which refreshes the
/// filtered collection and sends the pager back to page 1 whenever the number of
/// visible users or the page size changed.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    users: Vec<User>,
    posts: Vec<Post>,
    query: DirectoryQuery,
    filtered: Vec<User>,
    pager: Pager,
}

impl DirectoryView {
    pub fn new(users: Vec<User>, posts: Vec<Post>) -> Self {
        Self::with_query(users, posts, DirectoryQuery::default())
    }

    pub fn with_query(users: Vec<User>, posts: Vec<Post>, query: DirectoryQuery) -> Self {
        let mut view = Self {
            users,
            posts,
            query,
            filtered: Vec::new(),
            pager: Pager::new(0),
        };
        view.recompute();
        view
    }

    pub fn query(&self) -> &DirectoryQuery {
        &self.query
    }

    pub fn filtered_users(&self) -> &[User] {
        &self.filtered
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn control(&self) -> PaginationControl {
        self.pager.control()
    }

    /// Users visible on the current page.
    pub fn page_users(&self) -> &[User] {
        paginate(&self.filtered, self.pager.current(), self.query.page_size)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.recompute();
    }

    pub fn set_companies(&mut self, companies: Vec<String>) {
        self.query.companies = companies;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let changed = page_size != self.query.page_size;
        self.query.page_size = page_size;
        self.recompute();
        if changed {
            self.pager.reset();
        }
    }

    pub fn remove_filter(&mut self, label: &str) {
        self.query.remove_filter(label);
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.recompute();
    }

    /// Apply a navigation request. Out-of-range pages are ignored.
    pub fn change_page(&mut self, change: PageChange) -> bool {
        self.pager.apply(change)
    }

    /// Refresh the filtered and sorted collection from the current query.
    pub fn recompute(&mut self) {
        let previous_len = self.filtered.len();

        let mut filtered = filter_users(&self.users, &self.query);
        sort_users(&mut filtered, self.query.sort, &self.posts);
        self.filtered = filtered;

        self.pager
            .set_total_pages(total_pages(self.filtered.len(), self.query.page_size));
        if self.filtered.len() != previous_len {
            self.pager.reset();
        }
    }

    fn card(&self, user: &User) -> UserCard {
        UserCard {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            company: user.company.name.clone(),
            catch_phrase: user.company.catch_phrase.clone(),
            city: user.address.city.clone(),
            post_count: post_count(&self.posts, user.id),
            avatar: avatar_path(user.id),
        }
    }

    /// Render the current page into its output model.
    pub fn render(&self) -> DirectoryOutput {
        let control = self.pager.control();

        DirectoryOutput {
            users: self.page_users().iter().map(|u| self.card(u)).collect(),
            total_users: self.users.len(),
            total_posts: self.posts.len(),
            companies: companies(&self.users),
            active_filters: self.query.active_filters(),
            pagination: PaginationInfo::from_control(
                &control,
                self.filtered.len(),
                self.query.page_size,
                |page| list_command(&self.query, page),
            ),
        }
    }
}
