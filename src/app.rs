//! Application state - the explicit context every key and event goes through

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::{Action, Command, PromptKind};
use crate::domain::{Dataset, Query};
use crate::forms::{LoginForm, RegisterForm};
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use crate::notify::{Notifier, ToastLevel};
use crate::renderers::{
    ProductsView, Renderer, SuppliersView, TransactionsView, UsersView, NOT_SEARCHABLE,
};
use crate::router::{Tab, TabRouter};
use crate::session::{authz, SessionManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Prompt(PromptKind),
    Confirm,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

/// A question waiting for y/n
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub message: String,
    pub then: Action,
}

pub struct App {
    pub screen: Screen,
    pub session: SessionManager,
    pub router: TabRouter,
    pub products: ProductsView,
    pub suppliers: SuppliersView,
    pub transactions: TransactionsView,
    pub users: UsersView,
    pub notifier: Notifier,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub prompt_input: String,
    pub pending_confirm: Option<PendingConfirm>,
    /// Set when a request is queued, cleared when any request completes
    pub loading: bool,
    pub api_endpoint: String,
    pub help_open: bool,
    pub should_quit: bool,
    pending_requests: Vec<RuntimeCommand>,
}

impl App {
    pub fn new(session: SessionManager, toast_ttl: Duration) -> Self {
        Self {
            screen: Screen::Login,
            session,
            router: TabRouter::new(),
            products: ProductsView::new(),
            suppliers: SuppliersView::new(),
            transactions: TransactionsView::new(),
            users: UsersView::new(),
            notifier: Notifier::new(toast_ttl),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            prompt_input: String::new(),
            pending_confirm: None,
            loading: false,
            api_endpoint: String::new(),
            help_open: false,
            should_quit: false,
            pending_requests: Vec::new(),
        }
    }

    /// Restore a persisted session; land on the dashboard if there is one
    pub fn start(&mut self) {
        if self.session.restore().is_some() {
            self.show_main();
        } else {
            self.screen = Screen::Login;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: ToastLevel) {
        self.notifier.push(text, level);
    }

    pub fn status_text(&self) -> Option<(&str, ToastLevel)> {
        self.notifier
            .latest()
            .map(|toast| (toast.text.as_str(), toast.level))
    }

    pub fn on_tick(&mut self) {
        self.notifier.on_tick();
    }

    pub fn welcome(&self) -> Option<String> {
        self.session
            .current()
            .map(|session| format!("Welcome, {}", session.user.username))
    }

    pub fn visible_tabs(&self) -> Vec<Tab> {
        authz::visible_tabs(self.session.role())
    }

    pub fn active_tab(&self) -> Tab {
        self.router.active()
    }

    pub fn renderer(&self, tab: Tab) -> &dyn Renderer {
        match tab {
            Tab::Products => &self.products,
            Tab::Suppliers => &self.suppliers,
            Tab::Transactions => &self.transactions,
            Tab::Users => &self.users,
        }
    }

    pub fn renderer_mut(&mut self, tab: Tab) -> &mut dyn Renderer {
        match tab {
            Tab::Products => &mut self.products,
            Tab::Suppliers => &mut self.suppliers,
            Tab::Transactions => &mut self.transactions,
            Tab::Users => &mut self.users,
        }
    }

    /// Requests queued since the last call, in order
    pub fn take_requests(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.pending_requests.is_empty()
    }

    // ---- authentication ----

    pub fn submit_login(&mut self) {
        match self.login_form.credentials() {
            Ok((username, password)) => {
                debug!(%username, "login requested");
                self.queue(RuntimeCommand::Login { username, password });
            }
            Err(message) => self.set_status(message, ToastLevel::Error),
        }
    }

    pub fn submit_register(&mut self) {
        match self.register_form.validate() {
            Ok(request) => {
                debug!(
                    username = %request.username,
                    role = %request.role,
                    "registration requested"
                );
                self.queue(RuntimeCommand::Register(request));
            }
            Err(message) => self.set_status(message, ToastLevel::Error),
        }
    }

    pub fn show_register(&mut self) {
        self.register_form.clear();
        self.screen = Screen::Register;
    }

    pub fn show_login(&mut self) {
        self.screen = Screen::Login;
    }

    /// Explicit logout
    pub fn logout(&mut self) {
        self.teardown_session();
        self.set_status("Logged out successfully", ToastLevel::Success);
    }

    fn teardown_session(&mut self) {
        self.session.logout();
        self.products.clear();
        self.suppliers.clear();
        self.transactions.clear();
        self.users.clear();
        self.router.reset();
        self.input_mode = InputMode::Normal;
        self.pending_confirm = None;
        self.help_open = false;
        self.login_form.clear();
        self.screen = Screen::Login;
    }

    fn show_main(&mut self) {
        self.screen = Screen::Main;
        self.router.reset();
        self.load_current_tab();
    }

    // ---- navigation ----

    /// Activate `tab` and load it; denied tabs leave everything unchanged
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        let role = self.session.role();
        if !self.router.switch_to(tab, |tab| authz::permits(role, tab)) {
            debug!(?tab, ?role, "tab switch denied");
            return false;
        }
        self.load_current_tab();
        true
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let role = self.session.role();
        let before = self.router.active();
        let after = self.router.cycle(forward, |tab| authz::permits(role, tab));
        if after != before {
            self.load_current_tab();
        }
    }

    pub fn load_current_tab(&mut self) {
        let query = self.renderer(self.router.active()).load();
        self.dispatch(query);
    }

    /// Queue a fetch if the session may run it
    pub fn dispatch(&mut self, query: Query) {
        let Some(token) = self.session.token().map(str::to_string) else {
            debug!(?query, "not logged in; fetch skipped");
            return;
        };
        if query.touches_users() && !self.session.can_access(Tab::Users) {
            debug!(?query, "user listing requires an administrator");
            return;
        }
        self.queue(RuntimeCommand::Fetch {
            query,
            token: Some(token),
        });
    }

    fn queue(&mut self, cmd: RuntimeCommand) {
        self.pending_requests.push(cmd);
        self.loading = true;
    }

    // ---- commands and actions ----

    /// Execute a parsed `:` command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Tab(tab) => Action::SwitchTab(*tab),
            Command::Search(_) if !self.renderer(self.router.active()).searchable() => {
                Action::Notify(NOT_SEARCHABLE.to_string(), ToastLevel::Warn)
            }
            Command::Search(Some(term)) => {
                Action::Fetch(self.renderer(self.router.active()).search(term))
            }
            Command::Search(None) => Action::Prompt(PromptKind::Search),
            Command::Category(category) => {
                let role = self.session.role();
                self.router
                    .switch_to(Tab::Products, |tab| authz::permits(role, tab));
                match category {
                    Some(category) => Action::Fetch(self.products.filter_category(category)),
                    None => Action::Prompt(PromptKind::Category),
                }
            }
            Command::Refresh => Action::Fetch(self.renderer(self.router.active()).refresh()),
            Command::Logout => Action::Logout,
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), ToastLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or renderer
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::Fetch(query) => self.dispatch(query),
            Action::Prompt(kind) => {
                self.prompt_input.clear();
                self.input_mode = InputMode::Prompt(kind);
            }
            Action::Confirm { message, then } => {
                self.pending_confirm = Some(PendingConfirm {
                    message,
                    then: *then,
                });
                self.input_mode = InputMode::Confirm;
            }
            Action::SwitchTab(tab) => {
                self.switch_tab(tab);
            }
            Action::CycleTab(forward) => self.cycle_tab(forward),
            Action::Logout => self.logout(),
            Action::Help => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Resolve the pending confirmation
    pub fn answer_confirm(&mut self, yes: bool) {
        self.input_mode = InputMode::Normal;
        if let Some(pending) = self.pending_confirm.take() {
            if yes {
                self.apply_action(pending.then);
            }
        }
    }

    /// Run the prompt's text through the active renderer
    pub fn submit_prompt(&mut self) {
        let InputMode::Prompt(kind) = self.input_mode else {
            return;
        };
        self.input_mode = InputMode::Normal;
        let term = std::mem::take(&mut self.prompt_input);
        let query = match kind {
            PromptKind::Search => self.renderer(self.router.active()).search(&term),
            PromptKind::Category => self.products.filter_category(&term),
        };
        self.dispatch(query);
    }

    // ---- runtime events ----

    /// Whether a response sent with `token` belongs to the live session
    fn is_current_session(&self, token: Option<&str>) -> bool {
        self.session.is_logged_in() && self.session.token() == token
    }

    pub fn apply_event(&mut self, evt: RuntimeEvent) {
        match evt {
            RuntimeEvent::LoggedIn(resp) => {
                self.loading = false;
                let persisted = self.session.establish(resp).map(|_| ());
                match persisted {
                    Ok(()) => self.set_status("Login successful!", ToastLevel::Success),
                    Err(err) => {
                        warn!("session not persisted: {err:#}");
                        self.set_status(
                            "Logged in, but the session could not be saved",
                            ToastLevel::Warn,
                        );
                    }
                }
                self.login_form.clear();
                self.show_main();
            }
            RuntimeEvent::Registered { username } => {
                self.loading = false;
                info!(%username, "registered");
                self.register_form.clear();
                self.login_form.clear();
                self.login_form.username.value = username;
                self.login_form.focus = 1;
                self.screen = Screen::Login;
                self.set_status("Registration successful! Please login.", ToastLevel::Success);
            }
            RuntimeEvent::AuthFailed { message } => {
                self.loading = false;
                self.login_form.reset_password();
                self.set_status(message, ToastLevel::Error);
            }
            RuntimeEvent::Loaded {
                query,
                token,
                dataset,
            } => {
                self.loading = false;
                if !self.is_current_session(token.as_deref()) {
                    debug!(?query, "dropping response for an ended session");
                    return;
                }
                let tab = tab_for(&dataset);
                if !self.session.can_access(tab) {
                    return;
                }
                self.renderer_mut(tab).apply(dataset);
            }
            RuntimeEvent::Unauthorized { query, token } => {
                self.loading = false;
                if !self.is_current_session(token.as_deref()) {
                    debug!(?query, "ignoring 401 for an ended session");
                    return;
                }
                warn!(?query, "401 from backend; tearing down session");
                self.teardown_session();
                self.set_status("Session expired. Please login again.", ToastLevel::Error);
            }
            RuntimeEvent::RequestFailed {
                query,
                token,
                message,
            } => {
                self.loading = false;
                warn!(?query, "request failed: {message}");
                if self.is_current_session(token.as_deref()) {
                    self.set_status(query.failure_message(), ToastLevel::Error);
                }
            }
            RuntimeEvent::Error { message } => {
                self.loading = false;
                self.set_status(message, ToastLevel::Error);
            }
        }
    }
}

fn tab_for(dataset: &Dataset) -> Tab {
    match dataset {
        Dataset::Products(_) => Tab::Products,
        Dataset::Suppliers(_) => Tab::Suppliers,
        Dataset::Transactions(_) => Tab::Transactions,
        Dataset::Users { .. } => Tab::Users,
    }
}
