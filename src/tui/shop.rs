use crate::catalog::CatalogClient;
use crate::config::{default_state_root, load_settings};
use crate::screens::navigation::{
    action_from_key, parse_scripted_keys, NavStack, ScreenEntry, UiEffect,
};
use crate::shared::logging::EventLog;
use crate::tui::views::{
    centered_rect, draw_detail_screen, draw_form_screen, draw_list_screen, draw_login_screen,
    tail_for_display,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::time::Duration;

pub(crate) fn cmd_shop() -> Result<String, String> {
    let settings = load_settings().map_err(|e| e.to_string())?;
    let client = CatalogClient::from_settings(&settings);
    let state_root = default_state_root().map_err(|e| e.to_string())?;
    let log = EventLog::new(state_root);
    let mut stack = NavStack::new();

    if let Some(keys) = load_scripted_keys()? {
        run_shop_scripted(&mut stack, &client, &log, keys)?;
        return Ok("shop session ended".to_string());
    }
    if !is_interactive() {
        return Err(
            "shop requires an interactive terminal (or NEXO_SCRIPT_KEYS for scripted runs)"
                .to_string(),
        );
    }
    run_shop_tui(&mut stack, &client, &log)?;
    Ok("shop session ended".to_string())
}

fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_keys() -> Result<Option<Vec<crossterm::event::KeyEvent>>, String> {
    let Ok(raw) = std::env::var("NEXO_SCRIPT_KEYS") else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

fn run_shop_scripted(
    stack: &mut NavStack,
    client: &CatalogClient,
    log: &EventLog,
    keys: Vec<crossterm::event::KeyEvent>,
) -> Result<(), String> {
    for key in keys {
        let Some(top) = stack.top() else {
            return Ok(());
        };
        let Some(action) = action_from_key(top.kind(), top.confirming_delete(), key) else {
            continue;
        };
        match stack.handle_action(action, client, log) {
            UiEffect::None => {}
            UiEffect::Quit => return Ok(()),
            UiEffect::EditLoginField(_) | UiEffect::EditFormField(_) => {
                return Err("scripted shop does not support field editing prompts".to_string());
            }
        }
    }
    Ok(())
}

fn run_shop_tui(
    stack: &mut NavStack,
    client: &CatalogClient,
    log: &EventLog,
) -> Result<(), String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter shop screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create shop terminal: {e}"))?;
    let result = run_shop_tui_loop(stack, client, log, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave shop screen: {e}"))?;
    result
}

fn run_shop_tui_loop(
    stack: &mut NavStack,
    client: &CatalogClient,
    log: &EventLog,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), String> {
    loop {
        draw_active_screen(terminal, stack, client.api_base())?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll shop input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read shop input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(top) = stack.top() else {
            return Ok(());
        };
        let Some(action) = action_from_key(top.kind(), top.confirming_delete(), key) else {
            continue;
        };
        match stack.handle_action(action, client, log) {
            UiEffect::None => {}
            UiEffect::Quit => return Ok(()),
            UiEffect::EditLoginField(field) => {
                let initial = match stack.top() {
                    Some(ScreenEntry::Login(login)) => match field {
                        crate::screens::login::LoginField::Email => login.email.clone(),
                        crate::screens::login::LoginField::Password => String::new(),
                    },
                    _ => String::new(),
                };
                if let Some(value) = prompt_line_tui(
                    terminal,
                    "Sign in",
                    &format!("Enter {}", field.label().to_lowercase()),
                    &initial,
                )? {
                    if let Some(ScreenEntry::Login(login)) = stack.top_mut() {
                        login.update_field(field, value);
                    }
                }
            }
            UiEffect::EditFormField(field) => {
                let initial = match stack.top() {
                    Some(ScreenEntry::Form(form)) => form.draft.field(field).to_string(),
                    _ => String::new(),
                };
                if let Some(value) = prompt_line_tui(
                    terminal,
                    "Product Form",
                    &format!("Enter {}", field.label().to_lowercase()),
                    &initial,
                )? {
                    if let Some(ScreenEntry::Form(form)) = stack.top_mut() {
                        form.update_field(field, value);
                    }
                }
            }
        }
    }
}

fn draw_active_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    stack: &NavStack,
    api_base: &str,
) -> Result<(), String> {
    let hint = stack.hint_text();
    let status = stack.status_text.clone();
    match stack.top() {
        Some(ScreenEntry::Login(login)) => {
            draw_login_screen(terminal, login, api_base, &status, hint)
        }
        Some(ScreenEntry::List(list)) => draw_list_screen(terminal, list, &status, hint),
        Some(ScreenEntry::Detail(detail)) => draw_detail_screen(terminal, detail, &status, hint),
        Some(ScreenEntry::Form(form)) => draw_form_screen(terminal, form, &status, hint),
        None => Ok(()),
    }
}

fn prompt_line_tui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    title: &str,
    prompt: &str,
    initial: &str,
) -> Result<Option<String>, String> {
    let mut value = initial.to_string();
    loop {
        terminal
            .draw(|frame| {
                let area = centered_rect(70, 30, frame.area());
                let block = Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::new(2, 2, 1, 1));
                frame.render_widget(block.clone(), area);
                let inner = block.inner(area);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(1),
                    ])
                    .split(inner);
                let max_input_width = rows[3].width.saturating_sub(2) as usize;
                let display_value = tail_for_display(&value, max_input_width);

                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))),
                    rows[0],
                );
                frame.render_widget(Paragraph::new(prompt), rows[2]);
                frame.render_widget(
                    Paragraph::new(Line::from(format!("> {display_value}"))),
                    rows[3],
                );
                frame.render_widget(Paragraph::new("Enter apply, Esc cancel"), rows[4]);
                frame.set_cursor_position((
                    rows[3].x + 2 + display_value.chars().count() as u16,
                    rows[3].y,
                ));
            })
            .map_err(|e| format!("failed to render prompt: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read prompt input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => return Ok(Some(value)),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            _ => {}
        }
    }
}
