//! The console sidebar as shipped.
//!
//! Entries take their allowed roles from the access policy table, so a page
//! and its menu link can never disagree about who may open it.

use super::{MenuEntry, MenuGroup, MenuNode};
use crate::policy::{paths, AccessPolicyTable};

pub fn console_menu(policy: &AccessPolicyTable) -> Vec<MenuNode> {
    let entry = |title: &str, path: &str, icon: &str| {
        MenuEntry::new(title, path, icon, policy.allowed_roles(path).clone())
    };

    vec![
        MenuNode::Item(entry("Dashboard", paths::DASHBOARD, "dashboard")),
        MenuNode::Group(MenuGroup::new(
            "Reservations",
            "event",
            vec![
                entry("Calendar", paths::CALENDAR, "calendar_month"),
                entry("Pending Reservation", paths::PENDING_RESERVATION, "pending_actions"),
                entry("Confirmed Reservation", paths::CONFIRMED_RESERVATION, "event_available"),
                entry("Order Summary", paths::ORDER_SUMMARY, "receipt_long"),
                entry("Customers", paths::CUSTOMERS, "groups"),
            ],
        )),
        MenuNode::Group(MenuGroup::new(
            "Disbursement",
            "payments",
            vec![
                entry("Disbursement", paths::DISBURSEMENT, "request_quote"),
                entry("Disbursement List", paths::DISBURSEMENT_LIST, "list_alt"),
            ],
        )),
        MenuNode::Group(MenuGroup::new(
            "Branch",
            "store",
            vec![
                entry("Branch", paths::BRANCH, "storefront"),
                entry("Branch Quota", paths::BRANCH_QUOTA, "event_seat"),
                entry("Team", paths::TEAM, "badge"),
            ],
        )),
        MenuNode::Group(MenuGroup::new(
            "Menu Management",
            "restaurant_menu",
            vec![
                entry("Category", paths::CATEGORY, "category"),
                entry("Menu", paths::MENU, "lunch_dining"),
                entry("Option", paths::OPTION, "tune"),
                entry("Item Option", paths::ITEM_OPTION, "playlist_add"),
                entry("Menu Configuration", paths::CONFIG_MENU, "settings_applications"),
            ],
        )),
        MenuNode::Group(MenuGroup::new(
            "Settings",
            "settings",
            vec![
                entry("Configuration", paths::CONFIGURATION, "settings"),
                entry("Privacy Configuration", paths::CONFIG_PRIVASI, "privacy_tip"),
                entry("Add User", paths::ADD_USER, "person_add"),
                entry("Add Configuration", paths::ADD_CONFIG, "add_box"),
            ],
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::navigation::build_menu;
    use crate::policy::console_policy;

    #[test]
    fn every_menu_link_has_a_policy_entry() {
        let policy = console_policy().expect("policy");
        for node in console_menu(&policy) {
            for entry in node.entries() {
                assert!(policy.lookup(&entry.path).is_some(), "{} unlisted", entry.path);
                assert_eq!(&entry.allowed_roles, policy.allowed_roles(&entry.path));
            }
        }
    }

    #[test]
    fn every_policy_route_is_linked_once() {
        let policy = console_policy().expect("policy");
        let menu = console_menu(&policy);
        let linked: Vec<&str> = menu
            .iter()
            .flat_map(MenuNode::entries)
            .map(|e| e.path.as_str())
            .collect();
        for route in policy.entries() {
            let count = linked.iter().filter(|p| **p == route.path).count();
            assert_eq!(count, 1, "{} linked {count} times", route.path);
        }
    }

    #[test]
    fn gro_sidebar_has_no_disbursement_group() {
        let policy = console_policy().expect("policy");
        let filtered = build_menu(&console_menu(&policy), &Role::Gro);
        assert!(filtered.iter().all(|node| match node {
            MenuNode::Group(g) => g.title != "Disbursement",
            MenuNode::Item(_) => true,
        }));
        assert!(!filtered.is_empty());
    }

    #[test]
    fn manager_accounting_sees_calendar_customers_and_disbursement() {
        let policy = console_policy().expect("policy");
        let filtered = build_menu(&console_menu(&policy), &Role::ManagerAccounting);
        let visible: Vec<&str> = filtered
            .iter()
            .flat_map(MenuNode::entries)
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(
            visible,
            vec![
                paths::CALENDAR,
                paths::CUSTOMERS,
                paths::DISBURSEMENT,
                paths::DISBURSEMENT_LIST
            ]
        );
    }
}
