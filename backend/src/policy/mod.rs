//! Access policy table: which roles may open which console page.
//!
//! The table is authored once, here, and consulted by the route guard, the
//! shell, and the sidebar menu. Each path lists its roles in full; there is no
//! wildcard matching and no role inheritance. A path without an entry is
//! visible to nobody.

use std::collections::HashMap;
use thiserror::Error;

use crate::auth::{Role, RoleSet};

pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const UNAUTHORIZED: &str = "/unauthorized";

    pub const DASHBOARD: &str = "/dashboard";
    pub const TEAM: &str = "/team";
    pub const BRANCH: &str = "/branch";
    pub const CALENDAR: &str = "/calendar";
    pub const CUSTOMERS: &str = "/customers";
    pub const PENDING_RESERVATION: &str = "/pending_reservation";
    pub const CONFIRMED_RESERVATION: &str = "/confirmed_reservation";
    pub const ORDER_SUMMARY: &str = "/order_summary";
    pub const DISBURSEMENT: &str = "/disbursement";
    pub const DISBURSEMENT_LIST: &str = "/disbursement_list";
    pub const BRANCH_QUOTA: &str = "/branch_quota";
    pub const CONFIG_MENU: &str = "/config_menu";
    pub const CONFIG_PRIVASI: &str = "/config_privasi";
    pub const CONFIGURATION: &str = "/configuration";
    pub const CATEGORY: &str = "/category";
    pub const MENU: &str = "/menu";
    pub const OPTION: &str = "/option";
    pub const ITEM_OPTION: &str = "/item_option";
    pub const ADD_USER: &str = "/add-user";
    pub const ADD_CONFIG: &str = "/add-config";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("route {0} is declared more than once")]
    DuplicatePath(String),
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    pub path: String,
    pub allowed_roles: RoleSet,
}

impl RoutePolicy {
    pub fn new(path: impl Into<String>, allowed_roles: impl Into<RoleSet>) -> Self {
        Self {
            path: path.into(),
            allowed_roles: allowed_roles.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicyTable {
    entries: Vec<RoutePolicy>,
    by_path: HashMap<String, usize>,
    deny_all: RoleSet,
}

impl AccessPolicyTable {
    pub fn new(entries: Vec<RoutePolicy>) -> Result<Self, PolicyError> {
        let mut by_path = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_path.insert(entry.path.clone(), idx).is_some() {
                return Err(PolicyError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(Self {
            entries,
            by_path,
            deny_all: RoleSet::empty(),
        })
    }

    /// Roles allowed on `path`; the empty set when the path has no entry.
    pub fn allowed_roles(&self, path: &str) -> &RoleSet {
        self.lookup(path)
            .map(|entry| &entry.allowed_roles)
            .unwrap_or(&self.deny_all)
    }

    pub fn lookup(&self, path: &str) -> Option<&RoutePolicy> {
        self.by_path.get(path).map(|&idx| &self.entries[idx])
    }

    pub fn is_allowed(&self, path: &str, role: &Role) -> bool {
        self.allowed_roles(path).contains(role)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RoutePolicy] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The console's route table.
pub fn console_policy() -> Result<AccessPolicyTable, PolicyError> {
    use paths::*;
    use Role::{Gro, It, ManagerAccounting, StaffAccounting};

    let entries = vec![
        RoutePolicy::new(DASHBOARD, [It]),
        RoutePolicy::new(TEAM, [It]),
        RoutePolicy::new(BRANCH, [It]),
        RoutePolicy::new(CALENDAR, [It, Gro, ManagerAccounting, StaffAccounting]),
        RoutePolicy::new(CUSTOMERS, [It, Gro, ManagerAccounting, StaffAccounting]),
        RoutePolicy::new(PENDING_RESERVATION, [It, Gro]),
        RoutePolicy::new(CONFIRMED_RESERVATION, [It, Gro]),
        RoutePolicy::new(ORDER_SUMMARY, [It, Gro]),
        RoutePolicy::new(DISBURSEMENT, [It, ManagerAccounting]),
        RoutePolicy::new(DISBURSEMENT_LIST, [It, ManagerAccounting]),
        RoutePolicy::new(BRANCH_QUOTA, [It, Gro]),
        RoutePolicy::new(CONFIG_MENU, [It, Gro]),
        RoutePolicy::new(CONFIG_PRIVASI, [It, Gro]),
        RoutePolicy::new(CONFIGURATION, [It]),
        RoutePolicy::new(CATEGORY, [It, Gro]),
        RoutePolicy::new(MENU, [It, Gro]),
        RoutePolicy::new(OPTION, [It, Gro]),
        RoutePolicy::new(ITEM_OPTION, [It, Gro]),
        RoutePolicy::new(ADD_USER, [It]),
        RoutePolicy::new(ADD_CONFIG, [It]),
    ];

    AccessPolicyTable::new(entries)
}
