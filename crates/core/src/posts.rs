//! Per-user posts and author profile views
//!
//! The posts view pages through a single user's posts five at a time and links every
//! post to its author's profile. The profile view can carry a back reference to the
//! post and posts page it was opened from so the user can return to the same page.

use crate::directory::{avatar_path, PaginationInfo, Post, User};
use crate::pagination::{paginate, total_pages, PageChange, Pager};
use serde::Serialize;

/// Posts shown per page in the posts view.
pub const POSTS_PAGE_SIZE: usize = 5;

/// Post entry in the posts view
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostSummary {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
    pub view_author_command: String,
}

/// One page of a user's posts
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostsOutput {
    pub user_id: u64,
    pub author: String,
    pub requested_page: usize,
    pub posts: Vec<PostSummary>,
    pub show_pagination: bool,
    pub pagination: PaginationInfo,
}

/// Author profile
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProfileOutput {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub avatar: String,
    pub address: Option<String>,
    pub company: String,
    pub catch_phrase: Option<String>,
    pub business: Option<String>,
    pub from_post: Option<u64>,
    pub from_page: usize,
    pub back_command: Option<String>,
}

pub fn posts_command(user_id: u64, page: usize) -> String {
    format!("userdir users posts {user_id} --page {page}")
}

/// Profile command; with a post reference it also remembers the posts page.
pub fn profile_command(user_id: u64, from: Option<(u64, usize)>) -> String {
    match from {
        Some((post_id, page)) => {
            format!("userdir users show {user_id} --post {post_id} --page {page}")
        }
        None => format!("userdir users show {user_id}"),
    }
}

/// Build one page of `user`'s posts.
///
/// `posts` may contain other users' posts; only the ones written by `user` are kept.
/// A `page` outside the available range is ignored and the first page is built;
/// `requested_page` keeps what was asked for.
pub fn build_posts_output(user: &User, posts: &[Post], page: usize) -> PostsOutput {
    let owned: Vec<&Post> = posts.iter().filter(|p| p.user_id == user.id).collect();
    let total_items = owned.len();

    let mut pager = Pager::new(total_pages(total_items, POSTS_PAGE_SIZE));
    pager.apply(PageChange(page));
    let control = pager.control();
    let current = pager.current();

    let summaries = paginate(&owned, current, POSTS_PAGE_SIZE)
        .iter()
        .map(|post| PostSummary {
            id: post.id,
            user_id: post.user_id,
            title: post.title.clone(),
            body: post.body.clone(),
            view_author_command: profile_command(post.user_id, Some((post.id, current))),
        })
        .collect();

    PostsOutput {
        user_id: user.id,
        author: user.name.clone(),
        requested_page: page,
        posts: summaries,
        show_pagination: control.is_visible(),
        pagination: PaginationInfo::from_control(&control, total_items, POSTS_PAGE_SIZE, |p| {
            posts_command(user.id, p)
        }),
    }
}

/// Single-line postal address, skipping missing parts.
pub fn format_address(user: &User) -> Option<String> {
    let address = &user.address;
    let parts: Vec<&str> = [
        address.street.as_deref(),
        address.suite.as_deref(),
        address.city.as_deref(),
        address.zipcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Build the profile of `user`, optionally remembering the post it was opened from
/// and the posts page that post was listed on.
pub fn build_profile_output(
    user: &User,
    from_post: Option<u64>,
    from_page: usize,
) -> ProfileOutput {
    let from_page = from_page.max(1);

    ProfileOutput {
        id: user.id,
        name: user.name.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        website: user.website.clone(),
        avatar: avatar_path(user.id),
        address: format_address(user),
        company: user.company.name.clone(),
        catch_phrase: user.company.catch_phrase.clone(),
        business: user.company.bs.clone(),
        from_post,
        from_page,
        back_command: from_post.map(|_| posts_command(user.id, from_page)),
    }
}
