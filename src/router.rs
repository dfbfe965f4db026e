//! Tab router - tracks which dashboard view is active

/// Main tabs in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tab {
    Products,
    Suppliers,
    Transactions,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Products, Tab::Suppliers, Tab::Transactions, Tab::Users];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Products => "Products",
            Tab::Suppliers => "Suppliers",
            Tab::Transactions => "Transactions",
            Tab::Users => "Users",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Products => '1',
            Tab::Suppliers => '2',
            Tab::Transactions => '3',
            Tab::Users => '4',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Tab> {
        Tab::ALL.iter().copied().find(|tab| tab.shortcut() == ch)
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        match name.trim().to_lowercase().as_str() {
            "products" | "product" | "p" => Some(Tab::Products),
            "suppliers" | "supplier" | "s" => Some(Tab::Suppliers),
            "transactions" | "transaction" | "txs" | "t" => Some(Tab::Transactions),
            "users" | "user" | "u" => Some(Tab::Users),
            _ => None,
        }
    }
}

/// Single writer of the active tab
#[derive(Debug, Clone)]
pub struct TabRouter {
    active: Tab,
}

impl Default for TabRouter {
    fn default() -> Self {
        Self {
            active: Tab::Products,
        }
    }
}

impl TabRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Activate `tab` if `permits` allows it. Returns whether the switch happened.
    pub fn switch_to(&mut self, tab: Tab, permits: impl Fn(Tab) -> bool) -> bool {
        if !permits(tab) {
            return false;
        }
        self.active = tab;
        true
    }

    /// Move to the next (or previous) permitted tab, wrapping around
    pub fn cycle(&mut self, forward: bool, permits: impl Fn(Tab) -> bool) -> Tab {
        let len = Tab::ALL.len();
        let start = Tab::ALL
            .iter()
            .position(|tab| *tab == self.active)
            .unwrap_or(0);
        for step in 1..=len {
            let index = if forward {
                (start + step) % len
            } else {
                (start + len - step) % len
            };
            let candidate = Tab::ALL[index];
            if permits(candidate) {
                self.active = candidate;
                break;
            }
        }
        self.active
    }

    pub fn reset(&mut self) {
        self.active = Tab::Products;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tab_is_products() {
        assert_eq!(TabRouter::new().active(), Tab::Products);
    }

    #[test]
    fn test_denied_switch_is_noop() {
        let mut router = TabRouter::new();
        router.switch_to(Tab::Suppliers, |_| true);
        assert!(!router.switch_to(Tab::Users, |tab| tab != Tab::Users));
        assert_eq!(router.active(), Tab::Suppliers);
    }

    #[test]
    fn test_cycle_skips_denied_tabs() {
        let mut router = TabRouter::new();
        let no_users = |tab: Tab| tab != Tab::Users;
        router.switch_to(Tab::Transactions, no_users);
        assert_eq!(router.cycle(true, no_users), Tab::Products);
        assert_eq!(router.cycle(false, no_users), Tab::Transactions);
        assert_eq!(router.cycle(true, |_| true), Tab::Users);
    }

    #[test]
    fn test_tab_lookup() {
        assert_eq!(Tab::from_shortcut('3'), Some(Tab::Transactions));
        assert_eq!(Tab::from_shortcut('9'), None);
        assert_eq!(Tab::from_name("Users"), Some(Tab::Users));
        assert_eq!(Tab::from_name("orders"), None);
    }
}
