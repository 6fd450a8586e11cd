//! The states of the author/post menu.
//!
//! Each function builds the program for one screen. Its result is the route
//! to enter next; nothing here performs I/O.

use crate::domain::{Author, Post};
use crate::effects::{all, print, question, save, Program, Record};
use crate::router::{resolve, Route, Router};

pub const MENU_PROMPT: &str = "Where do you want to go today? (createAuthor, write, latest, all) ";
pub const TITLE_PROMPT: &str = "Title: ";
pub const BODY_PROMPT: &str = "Body: ";
pub const NAME_PROMPT: &str = "Name? ";
pub const NO_POSTS: &str = "No posts yet.";

/// Notice shown when the menu answer names no selectable route.
pub fn unknown_destination(answer: &str) -> String {
    format!("Unknown destination '{answer}'.")
}

/// Entered once: without any author, one must be created first.
pub fn start(router: &Router) -> Program<Route> {
    all(router.catalog().authors.clone(), None).map(|authors| {
        if authors.is_empty() {
            Route::CreateAuthor
        } else {
            Route::Menu
        }
    })
}

/// Ask where to go. Unknown answers redisplay the menu.
pub fn menu(router: &Router) -> Program<Route> {
    let choices = router.selectable();
    question(MENU_PROMPT).chain(move |answer| {
        match resolve(&choices, &answer) {
            Some(route) => Program::pure(route),
            None => print(unknown_destination(&answer)).map(|()| Route::Menu),
        }
    })
}

/// Ask for a title and a body, save the post, then show it.
pub fn write(router: &Router) -> Program<Route> {
    let posts = router.catalog().posts.clone();
    question(TITLE_PROMPT)
        .chain(|title| question(BODY_PROMPT).map(move |body| Post::new(title, body)))
        .chain(move |post| save(posts, post.into()))
        .map(|_| Route::Latest)
}

/// Show the most recent post.
pub fn latest(router: &Router) -> Program<Route> {
    all(router.catalog().posts.clone(), None)
        .chain(|records| match records.last() {
            Some(record) => print(Post::from_record(record).to_string()),
            None => print(NO_POSTS),
        })
        .map(|()| Route::Menu)
}

/// Show every post, oldest first.
pub fn all_posts(router: &Router) -> Program<Route> {
    all(router.catalog().posts.clone(), None)
        .chain(|records| {
            if records.is_empty() {
                return print(NO_POSTS);
            }
            Program::sequence(records.iter().map(show_post).collect::<Vec<_>>())
        })
        .map(|()| Route::Menu)
}

/// Ask for a name and save the author.
pub fn create_author(router: &Router) -> Program<Route> {
    let authors = router.catalog().authors.clone();
    question(NAME_PROMPT)
        .map(Author::new)
        .chain(move |author| save(authors, author.into()))
        .map(|_| Route::Menu)
}

fn show_post(record: &Record) -> Program<()> {
    print(Post::from_record(record).to_string())
}
