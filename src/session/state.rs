use crate::models::Listing;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the user currently sees for one session.
///
/// Fields are private so every change goes through a transition that keeps
/// listings and error mutually exclusive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchState {
    query_title: String,
    listings: Vec<Listing>,
    is_loading: bool,
    error_message: String,
    has_searched_once: bool,
    completed_at: Option<DateTime<Utc>>,
}

/// Mutually exclusive projection of [`SearchState`] for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// Nothing submitted yet
    Idle,
    Loading,
    Failed(&'a str),
    /// Searched, server returned zero listings
    NoResults(&'a str),
    Results(&'a [Listing]),
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a submit: loading, prior error cleared, marked as searched.
    /// Listings stay until the response replaces them.
    pub fn begin(&mut self, title: &str) {
        self.query_title = title.to_string();
        self.is_loading = true;
        self.error_message.clear();
        self.has_searched_once = true;
    }

    /// Replace listings wholesale, empty included
    pub fn succeed(&mut self, listings: Vec<Listing>) {
        self.listings = listings;
        self.error_message.clear();
        self.is_loading = false;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.listings.clear();
        self.error_message = if message.trim().is_empty() {
            crate::error::GENERIC_ERROR.to_string()
        } else {
            message
        };
        self.is_loading = false;
        self.completed_at = Some(Utc::now());
    }

    pub fn view(&self) -> View<'_> {
        if self.is_loading {
            View::Loading
        } else if !self.error_message.is_empty() {
            View::Failed(&self.error_message)
        } else if !self.listings.is_empty() {
            View::Results(&self.listings)
        } else if self.has_searched_once {
            View::NoResults(&self.query_title)
        } else {
            View::Idle
        }
    }

    pub fn query_title(&self) -> &str {
        &self.query_title
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn has_searched_once(&self) -> bool {
        self.has_searched_once
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
