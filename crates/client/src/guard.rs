//! Navigation read contract for the route table.
//!
//! The route guard itself lives with the route table, outside this engine;
//! what is owned here is the decision it reads: an authenticated user has no
//! business on the login or registration pages and is sent back to the site
//! root.

/// Entry pages gated against already-authenticated users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPage {
    /// The login form.
    Login,
    /// The registration form.
    Register,
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Let the navigation proceed.
    Allow,
    /// Redirect to the site root.
    RedirectToRoot,
}

/// Decide whether a navigation to an entry page may proceed.
///
/// Pure function over session state: authenticated users are redirected away
/// from both entry pages; anonymous users pass. Note that right after session
/// restore this reads the optimistic authenticated value - a stale token can
/// briefly bounce a user off the login page until validation corrects it.
#[must_use]
pub const fn entry_page_outcome(is_authenticated: bool, _page: EntryPage) -> NavigationOutcome {
    if is_authenticated {
        NavigationOutcome::RedirectToRoot
    } else {
        NavigationOutcome::Allow
    }
}
