use crate::config::SessionConfig;

/// What a host should do when the user lands on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Gates routes on whether a session exists.
///
/// Anonymous users are sent to the login page from any non-public route;
/// authenticated users are sent home from the public ones.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    public_paths: Vec<String>,
    login_path: String,
    home_path: String,
}

impl RouteGuard {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            public_paths: config.public_paths.clone(),
            login_path: config.login_path.clone(),
            home_path: "/".to_string(),
        }
    }

    pub fn with_home_path(mut self, home_path: impl Into<String>) -> Self {
        self.home_path = home_path.into();
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.public_paths.iter().any(|p| normalize(p) == path)
    }

    pub fn check(&self, path: &str, authenticated: bool) -> RouteDecision {
        match (authenticated, self.is_public(path)) {
            (false, false) => RouteDecision::Redirect(self.login_path.clone()),
            (true, true) => RouteDecision::Redirect(self.home_path.clone()),
            _ => RouteDecision::Allow,
        }
    }
}

// Ignore query strings and a trailing slash when comparing routes.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RouteGuard {
        RouteGuard::new(&SessionConfig::default())
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            guard().check("/habits", false),
            RouteDecision::Redirect("/login".to_string())
        );
        assert_eq!(
            guard().check("/", false),
            RouteDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_anonymous_may_open_public_routes() {
        assert_eq!(guard().check("/login", false), RouteDecision::Allow);
        assert_eq!(guard().check("/register/", false), RouteDecision::Allow);
        assert_eq!(guard().check("/login?next=/habits", false), RouteDecision::Allow);
    }

    #[test]
    fn test_authenticated_is_sent_home_from_public_routes() {
        assert_eq!(
            guard().check("/register", true),
            RouteDecision::Redirect("/".to_string())
        );
        assert_eq!(
            guard().with_home_path("/today").check("/login", true),
            RouteDecision::Redirect("/today".to_string())
        );
    }

    #[test]
    fn test_authenticated_may_open_protected_routes() {
        assert_eq!(guard().check("/habits/4", true), RouteDecision::Allow);
    }
}
