//! The one authorization predicate every tab check goes through

use crate::domain::Role;
use crate::router::Tab;

/// Whether a session holding `role` may view `tab`. `None` means logged out.
pub fn permits(role: Option<Role>, tab: Tab) -> bool {
    match (role, tab) {
        (None, _) => false,
        (Some(role), Tab::Users) => role.is_admin(),
        (Some(_), _) => true,
    }
}

/// Tabs visible to `role`, in display order
pub fn visible_tabs(role: Option<Role>) -> Vec<Tab> {
    Tab::ALL
        .iter()
        .copied()
        .filter(|tab| permits(role, *tab))
        .collect()
}
