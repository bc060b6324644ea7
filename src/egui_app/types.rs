/**
 * Shared Types Module
 *
 * Routes between the app's views and the navigation history that moves
 * between them.
 */

use std::fmt;

/// A view the app can show. Each maps to the path the web client used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` - the document list
    Documents,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/create`
    Create,
    /// `/edit/:id`
    Edit(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Documents => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(trimmed);
        match trimmed {
            "/" | "" => Some(Route::Documents),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/create" => Some(Route::Create),
            other => other
                .strip_prefix("/edit/")
                .and_then(|id| id.parse().ok())
                .map(Route::Edit),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Back-stack of visited routes; never empty
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Route {
        // the stack always holds at least the start route
        self.stack.last().copied().unwrap_or(Route::Documents)
    }

    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.stack.push(route);
        }
    }

    /// Swap the current entry so "back" skips it
    pub fn replace(&mut self, route: Route) {
        self.stack.pop();
        self.stack.push(route);
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn back(&mut self) -> Route {
        if self.can_go_back() {
            self.stack.pop();
        }
        self.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_round_trip() {
        for route in [
            Route::Documents,
            Route::Login,
            Route::Register,
            Route::Create,
            Route::Edit(42),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_route_parse_rejects_bad_ids() {
        assert_eq!(Route::parse("/edit/abc"), None);
        assert_eq!(Route::parse("/edit/"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/login/"), Some(Route::Login));
    }

    #[test]
    fn test_history_replace_skips_entry() {
        let mut history = History::new(Route::Documents);
        history.push(Route::Login);
        history.replace(Route::Documents);
        assert_eq!(history.current(), Route::Documents);
        assert_eq!(history.depth(), 2);

        let mut history = History::new(Route::Login);
        history.replace(Route::Documents);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_history_back() {
        let mut history = History::new(Route::Documents);
        history.push(Route::Edit(3));
        history.push(Route::Edit(3));
        assert_eq!(history.depth(), 2);
        assert_eq!(history.back(), Route::Documents);
        assert_eq!(history.back(), Route::Documents);
    }
}
