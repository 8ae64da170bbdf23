//! Core library for userdir
//!
//! This crate implements the **Functional Core** of the userdir application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`userdir_core`** (this crate): Pure transformation functions with zero I/O
//! - **`userdir`**: HTTP fetching, argument parsing and terminal rendering (the Imperative Shell)
//!
//! All functions in this crate are deterministic and side-effect free, so they can be
//! tested with fixture data and no mocking.
//!
//! # Module Organization
//!
//! - [`pagination`]: Page window calculation, pagination controls and pager state
//! - [`directory`]: User/post models, search, company filters, sorting and the directory view
//! - [`posts`]: Per-user posts pages and author profiles
//!
//! # Example Usage
//!
//! ```rust
//! use userdir_core::directory::{DirectoryView, User};
//! use userdir_core::pagination::PageChange;
//!
//! let users: Vec<User> = (1..=20)
//!     .map(|id| User { id, name: format!("User {id}"), ..Default::default() })
//!     .collect();
//!
//! let mut view = DirectoryView::new(users, vec![]);
//! view.change_page(PageChange(2));
//!
//! let output = view.render();
//! assert_eq!(output.pagination.current_page, 2);
//! assert_eq!(output.pagination.window, vec![1, 2, 3]);
//! ```

pub mod directory;
pub mod pagination;
pub mod posts;
