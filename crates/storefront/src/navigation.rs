//! Application routes.
//!
//! Operations report where the user should land next as a [`Route`]; the
//! embedding UI owns actual navigation.

use std::fmt;

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Browse,
    SignIn,
    SignUp,
    AddProduct,
    NotFound,
}

impl Route {
    /// URL path of the route. `NotFound` has no canonical path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Browse => "/browse",
            Self::SignIn => "/sign-in",
            Self::SignUp => "/sign-up",
            Self::AddProduct => "/add-product",
            Self::NotFound => "*",
        }
    }

    /// Resolve a path. Query strings, fragments and a trailing slash are
    /// ignored; unknown paths resolve to `NotFound`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Home,
            "/browse" => Self::Browse,
            "/sign-in" => Self::SignIn,
            "/sign-up" => Self::SignUp,
            "/add-product" => Self::AddProduct,
            _ => Self::NotFound,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/browse/"), Route::Browse);
        assert_eq!(Route::from_path("/sign-in?next=/add-product"), Route::SignIn);
        assert_eq!(Route::from_path("/add-product#form"), Route::AddProduct);
        assert_eq!(Route::from_path("/checkout"), Route::NotFound);
    }

    #[test]
    fn test_paths_resolve_to_themselves() {
        for route in [
            Route::Home,
            Route::Browse,
            Route::SignIn,
            Route::SignUp,
            Route::AddProduct,
        ] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }
}
