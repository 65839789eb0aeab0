//! Static sidebar entries per layout. Visibility is a pure function of the
//! current role; reaching the layout itself is the guard's job.

use crate::features::auth::role::{Role, has_role};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub target: &'static str,
    pub icon: &'static str,
    /// Empty means any session that reached the layout.
    pub required_roles: &'static [Role],
}

impl NavItem {
    const fn open(title: &'static str, target: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            target,
            icon,
            required_roles: &[],
        }
    }

    const fn restricted(
        title: &'static str,
        target: &'static str,
        icon: &'static str,
        required_roles: &'static [Role],
    ) -> Self {
        Self {
            title,
            target,
            icon,
            required_roles,
        }
    }

    #[must_use]
    pub fn is_visible_to(&self, role: Option<Role>) -> bool {
        has_role(role, self.required_roles)
    }
}

pub const ORGANIZATION_NAV: &[NavItem] = &[
    NavItem::open("Dashboard", "/", "dashboard"),
    NavItem::open("Projects", "/projects", "apartment"),
    NavItem::restricted(
        "Estimates",
        "/smetas",
        "calculate",
        &[Role::Direktor, Role::Boss, Role::Pto, Role::Prorab],
    ),
    NavItem::restricted(
        "Workers",
        "/workers",
        "engineering",
        &[Role::Direktor, Role::Boss, Role::Prorab],
    ),
    NavItem::restricted(
        "Finance",
        "/finance",
        "payments",
        &[Role::Direktor, Role::Boss, Role::Bugalteriya],
    ),
    NavItem::restricted(
        "Warehouse",
        "/warehouse",
        "inventory_2",
        &[Role::Direktor, Role::Boss, Role::Sklad, Role::Snabjeniya],
    ),
];

pub const ADMIN_NAV: &[NavItem] = &[
    NavItem::open("Overview", "/admin", "admin_panel_settings"),
    NavItem::open("Companies", "/admin/companies", "corporate_fare"),
    NavItem::restricted("Operators", "/admin/operators", "shield_person", &[Role::SuperAdmin]),
    NavItem::open("Users", "/admin/users", "group"),
];

/// Entries of `items` the given role may see, in declaration order.
#[must_use]
pub fn visible_items(items: &'static [NavItem], role: Option<Role>) -> Vec<&'static NavItem> {
    items.iter().filter(|item| item.is_visible_to(role)).collect()
}

/// Sidebar for the layout a role lands in.
#[must_use]
pub fn nav_for(role: Option<Role>) -> Vec<&'static NavItem> {
    match role {
        Some(role) if role.is_admin_tier() => visible_items(ADMIN_NAV, Some(role)),
        Some(_) => visible_items(ORGANIZATION_NAV, role),
        None => Vec::new(),
    }
}
