use crate::catalog::{CatalogClient, Product};
use crate::screens::detail::{DeleteOutcome, DetailController};
use crate::screens::form::{FormController, FormField, FormRow, SaveOutcome};
use crate::screens::list::ListController;
use crate::screens::login::{LoginField, LoginForm, LoginRow};
use crate::shared::logging::EventLog;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const LOGIN_STATUS_TEXT: &str = "Sign in to start shopping.";
const LOGIN_HINT_TEXT: &str = "Up/Down move | Enter edit/sign in | Esc quit";
const LIST_STATUS_TEXT: &str = "Enter opens a product. `a` adds one.";
const LIST_HINT_TEXT: &str = "Up/Down move | Enter open | a add | r refresh | Esc quit";
const DETAIL_HINT_TEXT: &str = "e edit | d delete | Esc back";
const CONFIRM_HINT_TEXT: &str = "y confirm delete | n keep product";
const FORM_HINT_TEXT: &str = "Up/Down move | Enter edit/save | Esc discard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Login,
    List,
    Detail,
    Form,
}

impl ScreenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKind::Login => "login",
            ScreenKind::List => "list",
            ScreenKind::Detail => "detail",
            ScreenKind::Form => "form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    MovePrev,
    MoveNext,
    Enter,
    Back,
    Refresh,
    Add,
    Edit,
    Delete,
    ConfirmYes,
    ConfirmNo,
    Quit,
}

/// What a controller asks the coordinator to do.
#[derive(Debug, Clone, PartialEq)]
pub enum NavRequest {
    None,
    Push(ScreenRequest),
    Pop,
    Replace(ScreenRequest),
}

/// Navigation payload contract: detail requires a product, the form
/// optionally carries one to edit (absence means create mode).
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenRequest {
    List,
    Detail { product: Product },
    Form { product_to_edit: Option<Product> },
}

/// Work the hosting loop has to do with the terminal; everything else
/// is settled inside the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    None,
    EditLoginField(LoginField),
    EditFormField(FormField),
    Quit,
}

pub enum ScreenEntry {
    Login(LoginForm),
    List(ListController),
    Detail(DetailController),
    Form(FormController),
}

impl ScreenEntry {
    pub fn kind(&self) -> ScreenKind {
        match self {
            ScreenEntry::Login(_) => ScreenKind::Login,
            ScreenEntry::List(_) => ScreenKind::List,
            ScreenEntry::Detail(_) => ScreenKind::Detail,
            ScreenEntry::Form(_) => ScreenKind::Form,
        }
    }

    pub fn confirming_delete(&self) -> bool {
        matches!(self, ScreenEntry::Detail(detail) if detail.confirming_delete)
    }
}

/// Screen stack. Each entry owns its controller state; an entry popped
/// off the stack is dropped and can never receive another focus signal,
/// which is what keeps late mutations away from torn-down screens.
pub struct NavStack {
    entries: Vec<ScreenEntry>,
    pub status_text: String,
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavStack {
    pub fn new() -> Self {
        Self {
            entries: vec![ScreenEntry::Login(LoginForm::new())],
            status_text: LOGIN_STATUS_TEXT.to_string(),
        }
    }

    pub fn top(&self) -> Option<&ScreenEntry> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScreenEntry> {
        self.entries.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn hint_text(&self) -> &'static str {
        match self.entries.last() {
            Some(entry) if entry.confirming_delete() => CONFIRM_HINT_TEXT,
            Some(ScreenEntry::Login(_)) => LOGIN_HINT_TEXT,
            Some(ScreenEntry::List(_)) => LIST_HINT_TEXT,
            Some(ScreenEntry::Detail(_)) => DETAIL_HINT_TEXT,
            Some(ScreenEntry::Form(_)) => FORM_HINT_TEXT,
            None => "",
        }
    }

    pub fn handle_action(
        &mut self,
        action: ScreenAction,
        client: &CatalogClient,
        log: &EventLog,
    ) -> UiEffect {
        if action == ScreenAction::Quit {
            return UiEffect::Quit;
        }
        let mut request = NavRequest::None;
        let mut effect = UiEffect::None;
        match self.entries.last_mut() {
            None => return UiEffect::Quit,
            Some(ScreenEntry::Login(login)) => match action {
                ScreenAction::MovePrev => login.move_prev(),
                ScreenAction::MoveNext => login.move_next(),
                ScreenAction::Enter => match login.row() {
                    LoginRow::Field(field) => effect = UiEffect::EditLoginField(field),
                    LoginRow::SignIn => match login.submit() {
                        Ok(req) => {
                            request = req;
                            self.status_text = String::new();
                        }
                        Err(msg) => self.status_text = msg,
                    },
                },
                _ => {}
            },
            Some(ScreenEntry::List(list)) => match action {
                ScreenAction::MovePrev => list.move_prev(),
                ScreenAction::MoveNext => list.move_next(),
                ScreenAction::Enter => request = list.select_product(),
                ScreenAction::Add => request = list.request_create(),
                ScreenAction::Refresh => match list.on_manual_refresh(client) {
                    Ok(()) => self.status_text = "Products refreshed.".to_string(),
                    Err(err) => {
                        self.status_text = format!("failed to refresh products: {err}");
                        log.record("warn", "list_refresh_failed", &err.to_string());
                    }
                },
                _ => {}
            },
            Some(ScreenEntry::Detail(detail)) => match action {
                ScreenAction::Edit => request = detail.request_edit(),
                ScreenAction::Delete => detail.request_delete(),
                ScreenAction::ConfirmNo => detail.cancel_delete(),
                ScreenAction::ConfirmYes => match detail.confirm_delete(client) {
                    DeleteOutcome::Deleted => {
                        request = NavRequest::Pop;
                        self.status_text = "Product deleted.".to_string();
                        log.record("info", "product_deleted", &detail.current.id);
                    }
                    DeleteOutcome::Failed(msg) => {
                        self.status_text = msg.clone();
                        log.record("warn", "product_delete_failed", &msg);
                    }
                    DeleteOutcome::Ignored => {}
                },
                ScreenAction::Back => request = NavRequest::Pop,
                _ => {}
            },
            Some(ScreenEntry::Form(form)) => match action {
                ScreenAction::MovePrev => form.move_prev(),
                ScreenAction::MoveNext => form.move_next(),
                ScreenAction::Enter => match form.row() {
                    FormRow::Field(field) => effect = UiEffect::EditFormField(field),
                    FormRow::Save => match form.save(client) {
                        SaveOutcome::Saved => {
                            request = NavRequest::Pop;
                            self.status_text = "Product saved.".to_string();
                        }
                        SaveOutcome::Rejected(msg) => self.status_text = msg,
                        SaveOutcome::Failed(msg) => {
                            self.status_text = msg.clone();
                            log.record("warn", "product_save_failed", &msg);
                        }
                        SaveOutcome::Ignored => {}
                    },
                },
                ScreenAction::Back => request = NavRequest::Pop,
                _ => {}
            },
        }
        if !self.apply_request(request, client, log) {
            return UiEffect::Quit;
        }
        effect
    }

    /// Applies a navigation request and delivers the focus signal to
    /// whichever entry ends up topmost. Returns false once the stack is
    /// empty.
    fn apply_request(
        &mut self,
        request: NavRequest,
        client: &CatalogClient,
        log: &EventLog,
    ) -> bool {
        match request {
            NavRequest::None => return true,
            NavRequest::Push(req) => {
                self.entries.push(instantiate(req));
            }
            NavRequest::Pop => {
                self.entries.pop();
                if self.entries.is_empty() {
                    return false;
                }
            }
            NavRequest::Replace(req) => {
                self.entries.pop();
                self.entries.push(instantiate(req));
            }
        }
        self.focus_top(client, log);
        true
    }

    fn focus_top(&mut self, client: &CatalogClient, log: &EventLog) {
        match self.entries.last_mut() {
            Some(ScreenEntry::List(list)) => match list.on_focus_gained(client) {
                Ok(()) => {
                    if self.status_text.is_empty() {
                        self.status_text = LIST_STATUS_TEXT.to_string();
                    }
                }
                Err(err) => {
                    self.status_text = format!("failed to refresh products: {err}");
                    log.record("warn", "list_refresh_failed", &err.to_string());
                }
            },
            Some(ScreenEntry::Detail(detail)) => {
                // Soft reload: a failure keeps the payload we navigated
                // in with and is logged only, never surfaced.
                if let Err(err) = detail.on_focus_gained(client) {
                    log.record("warn", "detail_soft_reload_failed", &err.to_string());
                }
            }
            _ => {}
        }
    }
}

fn instantiate(request: ScreenRequest) -> ScreenEntry {
    match request {
        ScreenRequest::List => ScreenEntry::List(ListController::new()),
        ScreenRequest::Detail { product } => ScreenEntry::Detail(DetailController::new(product)),
        ScreenRequest::Form { product_to_edit } => {
            ScreenEntry::Form(FormController::new(product_to_edit))
        }
    }
}

pub fn action_from_key(
    screen: ScreenKind,
    confirming_delete: bool,
    key: KeyEvent,
) -> Option<ScreenAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(ScreenAction::Quit);
    }
    if screen == ScreenKind::Detail && confirming_delete {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(ScreenAction::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Esc => Some(ScreenAction::ConfirmNo),
            _ => None,
        };
    }
    match (screen, key.code) {
        (_, KeyCode::Up) => Some(ScreenAction::MovePrev),
        (_, KeyCode::Down) => Some(ScreenAction::MoveNext),
        (_, KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r')) => {
            Some(ScreenAction::Enter)
        }
        (ScreenKind::Login | ScreenKind::List, KeyCode::Esc) => Some(ScreenAction::Quit),
        (ScreenKind::Detail | ScreenKind::Form, KeyCode::Esc) => Some(ScreenAction::Back),
        (ScreenKind::Login, KeyCode::Tab) => Some(ScreenAction::MoveNext),
        (ScreenKind::List, KeyCode::Char('a')) => Some(ScreenAction::Add),
        (ScreenKind::List, KeyCode::Char('r')) => Some(ScreenAction::Refresh),
        (ScreenKind::Detail, KeyCode::Char('e')) => Some(ScreenAction::Edit),
        (ScreenKind::Detail, KeyCode::Char('d')) => Some(ScreenAction::Delete),
        _ => None,
    }
}

pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "a" => KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE),
            "r" => KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            "e" => KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE),
            "d" => KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            "y" => KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE),
            "n" => KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid NEXO_SCRIPT_KEYS token `{other}`; valid tokens: up,down,enter,esc,tab,ctrl-c,a,r,e,d,y,n"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}
