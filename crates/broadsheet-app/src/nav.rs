//! Screen navigation: a back stack of routes rooted at home.

use serde_json::Value;

/// A screen the reader can show.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Article { id: String },
    Paper { id: String },
    PicsPreview {
        default_active_index: usize,
        pics: Vec<Value>,
    },
    /// Web view for non-article links (ads, outside sites).
    External { url: String },
    Dash,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Article { .. } => "article",
            Self::Paper { .. } => "paper",
            Self::PicsPreview { .. } => "picsPreview",
            Self::External { .. } => "ad",
            Self::Dash => "dash",
        }
    }
}

/// Back stack of routes. Home is the root and is never popped.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    /// Push `route` on top of the current screen.
    pub fn navigate(&mut self, route: Route) {
        log::info!("navigate -> {}", route.name());
        self.stack.push(route);
    }

    /// Pop the current screen. Returns the screen left behind, or `None`
    /// at the root.
    pub fn go_back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        let left = self.stack.pop();
        if let Some(route) = self.stack.last() {
            log::info!("back -> {}", route.name());
        }
        left
    }

    pub fn current(&self) -> &Route {
        // Never empty: the root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Routes from root to top.
    pub fn history(&self) -> &[Route] {
        &self.stack
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), &Route::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn navigate_and_back() {
        let mut nav = Navigator::new();
        nav.navigate(Route::Article { id: "1".into() });
        nav.navigate(Route::External {
            url: "https://ads.example".into(),
        });
        assert_eq!(nav.depth(), 3);

        assert_eq!(
            nav.go_back(),
            Some(Route::External {
                url: "https://ads.example".into()
            })
        );
        assert_eq!(nav.current(), &Route::Article { id: "1".into() });
    }

    #[test]
    fn back_at_root_is_noop() {
        let mut nav = Navigator::new();
        assert_eq!(nav.go_back(), None);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn route_names() {
        assert_eq!(Route::Dash.name(), "dash");
        assert_eq!(Route::Paper { id: "1".into() }.name(), "paper");
    }
}
