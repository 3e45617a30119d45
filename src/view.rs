// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ViewId {
    Home,
    Auth,
    List,
    Form,
}

impl ViewId {
    #[cfg(test)]
    pub(crate) const ALL: [Self; 4] = [Self::Home, Self::Auth, Self::List, Self::Form];

    /// The logout button and welcome text belong to the platform views only.
    pub(crate) const fn shows_platform_controls(self) -> bool {
        matches!(self, Self::List | Self::Form)
    }

    pub(crate) const fn shows_header(self) -> bool {
        !matches!(self, Self::Home)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Home => "home",
            Self::Auth => "auth",
            Self::List => "list",
            Self::Form => "form",
        })
    }
}

/// Exactly one view is visible at a time, and it alone decides what the
/// header shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Router {
    current: ViewId,
}

impl Router {
    pub(crate) const fn new() -> Self {
        Self {
            current: ViewId::Home,
        }
    }

    pub(crate) fn show(&mut self, view: ViewId) {
        debug!("Showing the {} view", view);
        self.current = view;
    }

    pub(crate) const fn current(&self) -> ViewId {
        self.current
    }

    pub(crate) fn is_visible(&self, view: ViewId) -> bool {
        self.current == view
    }

    pub(crate) const fn header_visible(&self) -> bool {
        self.current.shows_header()
    }

    pub(crate) const fn controls_visible(&self) -> bool {
        self.current.shows_platform_controls()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_controls_follow_the_view() {
        let mut router = Router::new();
        for view in ViewId::ALL {
            router.show(view);
            assert_eq!(router.current(), view);
            assert_eq!(router.header_visible(), view != ViewId::Home);
            assert_eq!(
                router.controls_visible(),
                view == ViewId::List || view == ViewId::Form
            );
        }
    }

    #[test]
    fn only_the_current_view_is_visible() {
        let mut router = Router::new();
        router.show(ViewId::Form);
        let visible: Vec<_> = ViewId::ALL
            .into_iter()
            .filter(|v| router.is_visible(*v))
            .collect();
        assert_eq!(visible, vec![ViewId::Form]);
    }

    #[test]
    fn starts_at_home_without_header() {
        let router = Router::default();
        assert_eq!(router.current(), ViewId::Home);
        assert!(!router.header_visible());
        assert!(!router.controls_visible());
    }
}
