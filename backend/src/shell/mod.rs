//! Top-level composition of the console.
//!
//! The [`Shell`] maps a requested path to what the client should see: the
//! login screen, the unauthorized screen, a redirect, or a page wrapped in the
//! sidebar. Every page goes through the [`RouteGuard`] with the roles the
//! access policy table lists for it.

use serde::Serialize;

use crate::auth::{Branch, GuardDecision, Profile, Role, RouteGuard, Session};
use crate::navigation::{self, MenuNode, MenuState, SidebarNode};
use crate::policy::{self, paths, AccessPolicyTable, PolicyError};

pub const UNAUTHORIZED_MESSAGE: &str =
    "You do not have permission to access this page. Please log in with an account that does.";

/// A console page the shell knows how to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub path: &'static str,
    pub title: &'static str,
}

pub const CONSOLE_SCREENS: &[Screen] = &[
    Screen { path: paths::DASHBOARD, title: "Dashboard" },
    Screen { path: paths::TEAM, title: "Team" },
    Screen { path: paths::BRANCH, title: "Branch" },
    Screen { path: paths::CALENDAR, title: "Calendar" },
    Screen { path: paths::CUSTOMERS, title: "Customers" },
    Screen { path: paths::PENDING_RESERVATION, title: "Pending Reservation" },
    Screen { path: paths::CONFIRMED_RESERVATION, title: "Confirmed Reservation" },
    Screen { path: paths::ORDER_SUMMARY, title: "Order Summary" },
    Screen { path: paths::DISBURSEMENT, title: "Disbursement" },
    Screen { path: paths::DISBURSEMENT_LIST, title: "Disbursement List" },
    Screen { path: paths::BRANCH_QUOTA, title: "Branch Quota" },
    Screen { path: paths::CONFIG_MENU, title: "Menu Configuration" },
    Screen { path: paths::CONFIG_PRIVASI, title: "Privacy Configuration" },
    Screen { path: paths::CONFIGURATION, title: "Configuration" },
    Screen { path: paths::CATEGORY, title: "Category" },
    Screen { path: paths::MENU, title: "Menu" },
    Screen { path: paths::OPTION, title: "Option" },
    Screen { path: paths::ITEM_OPTION, title: "Item Option" },
    Screen { path: paths::ADD_USER, title: "Add User" },
    Screen { path: paths::ADD_CONFIG, title: "Add Configuration" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub name: String,
    pub role: Role,
    pub photo_url: String,
    pub branches: Vec<Branch>,
}

impl From<&Profile> for UserSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name().to_string(),
            role: profile.role().clone(),
            photo_url: profile.photo_url().to_string(),
            branches: profile.branches().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub path: String,
    pub title: String,
    pub user: UserSummary,
    pub sidebar: Vec<SidebarNode>,
}

/// What a navigation resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ShellView {
    Login,
    Unauthorized {
        message: &'static str,
        login_path: &'static str,
    },
    Redirect {
        to: String,
    },
    Screen(ScreenView),
}

#[derive(Debug, Clone)]
pub struct Shell {
    policy: AccessPolicyTable,
    menu: Vec<MenuNode>,
    screens: Vec<Screen>,
}

impl Shell {
    pub fn new(policy: AccessPolicyTable, menu: Vec<MenuNode>, screens: Vec<Screen>) -> Self {
        Self {
            policy,
            menu,
            screens,
        }
    }

    /// The console as shipped: its route table, sidebar, and pages.
    pub fn console() -> Result<Self, PolicyError> {
        let policy = policy::console_policy()?;
        let menu = navigation::console_menu(&policy);
        Ok(Self::new(policy, menu, CONSOLE_SCREENS.to_vec()))
    }

    pub fn policy(&self) -> &AccessPolicyTable {
        &self.policy
    }

    pub fn menu(&self) -> &[MenuNode] {
        &self.menu
    }

    pub fn screen(&self, path: &str) -> Option<&Screen> {
        self.screens.iter().find(|screen| screen.path == path)
    }

    pub fn sidebar(&self, role: &Role, state: &MenuState) -> Vec<SidebarNode> {
        navigation::sidebar(navigation::build_menu(&self.menu, role), state)
    }

    /// Where to send a session that asked for no page in particular.
    pub fn landing_path(&self, session: &Session) -> &str {
        if !session.is_authenticated() {
            return paths::LOGIN;
        }
        session
            .role()
            .and_then(|role| navigation::first_visible_path(&self.menu, role))
            .unwrap_or(paths::UNAUTHORIZED)
    }

    pub fn navigate(&self, path: &str, session: &Session, menu_state: &MenuState) -> ShellView {
        match path {
            paths::LOGIN => return ShellView::Login,
            paths::UNAUTHORIZED => {
                return ShellView::Unauthorized {
                    message: UNAUTHORIZED_MESSAGE,
                    login_path: paths::LOGIN,
                }
            }
            "/" => return redirect(self.landing_path(session)),
            _ => {}
        }

        let Some(screen) = self.screen(path) else {
            tracing::debug!(path, "no screen mounted at path, sending to login");
            return redirect(paths::LOGIN);
        };

        let decision = RouteGuard::check(session, self.policy.allowed_roles(screen.path));
        if let Some(target) = decision.redirect_target() {
            tracing::debug!(path, ?decision, "route guard redirect");
            return redirect(target);
        }

        match (&decision, &session.profile) {
            (GuardDecision::Render, Some(profile)) => ShellView::Screen(ScreenView {
                path: screen.path.to_string(),
                title: screen.title.to_string(),
                user: UserSummary::from(profile),
                sidebar: self.sidebar(profile.role(), menu_state),
            }),
            _ => redirect(paths::UNAUTHORIZED),
        }
    }
}

fn redirect(to: &str) -> ShellView {
    ShellView::Redirect { to: to.to_string() }
}
