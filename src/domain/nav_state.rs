/// Top-level pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Chats,
    Groups,
    Friends,
}

impl Route {
    /// Service-style path for the page, as the server names it.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Chats => "/Chat",
            Route::Groups => "/Group",
            Route::Friends => "/Friend",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Chats => "Chats",
            Route::Groups => "Groups",
            Route::Friends => "Friends",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Chats",
        href: "/chat",
        route: Route::Chats,
    },
    NavLink {
        label: "Groups",
        href: "/group",
        route: Route::Groups,
    },
    NavLink {
        label: "Friends",
        href: "/friend",
        route: Route::Friends,
    },
];

/// A link is active when the current path contains its href as a
/// case-insensitive substring. Containment, not equality: subpages and
/// query strings keep their section highlighted.
pub fn is_active(href: &str, current_path: &str) -> bool {
    current_path
        .to_lowercase()
        .contains(&href.to_lowercase())
}

/// Resolves an in-app path back to a route using the same containment
/// rule the highlighter uses. Paths outside the sidebar map to `None`.
pub fn route_for_path(path: &str) -> Option<Route> {
    NAV_LINKS
        .iter()
        .find(|link| is_active(link.href, path))
        .map(|link| link.route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_path_activates_its_link() {
        assert!(is_active("/chat", "/chat"));
        assert!(!is_active("/group", "/chat"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_active("/chat", "/Chat"));
        assert!(is_active("/group", "/GROUP/Detail"));
    }

    #[test]
    fn subpages_and_query_strings_keep_the_link_active() {
        assert!(is_active("/group", "/Group/Detail?id=5"));
        assert!(is_active("/friend", "/Friend/Search?q=lan"));
    }

    #[test]
    fn containment_matches_even_inside_longer_segments() {
        // The rule is substring containment, not path-segment equality.
        assert!(is_active("/chat", "/group/chatter"));
    }

    #[test]
    fn route_paths_activate_their_own_links() {
        for link in NAV_LINKS {
            assert!(
                is_active(link.href, link.route.path()),
                "link {} should be active on {}",
                link.href,
                link.route.path()
            );
        }
    }

    #[test]
    fn route_for_path_resolves_known_sections() {
        assert_eq!(route_for_path("/Friend/Index"), Some(Route::Friends));
        assert_eq!(route_for_path("/Chat?friendId=42"), Some(Route::Chats));
        assert_eq!(route_for_path("/Settings"), None);
    }
}
