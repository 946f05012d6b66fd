use crate::screens::detail::DetailController;
use crate::screens::form::{FormController, FormRow, FORM_FIELDS};
use crate::screens::list::{ListController, ListStatus};
use crate::screens::login::LoginForm;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Padding, Paragraph, Row, Table};
use ratatui::{Frame, Terminal};
use std::io;

pub fn format_price(price: f64) -> String {
    format!("$ {price:.2}")
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 1, 1))
}

fn screen_chunks(frame: &Frame<'_>) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area())
}

fn render_header(frame: &mut Frame<'_>, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(subtitle.to_string()),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, hint: &str, status: &str) {
    let footer = Paragraph::new(vec![
        Line::from(hint.to_string()),
        Line::from(format!("Status: {status}")),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_login_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    login: &LoginForm,
    api_base: &str,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let chunks = screen_chunks(frame);
            render_header(frame, chunks[0], "Nexo", &format!("Store: {api_base}"));

            let masked: String = login.password.chars().map(|_| '*').collect();
            let rows = [
                ("Email", login.email.clone()),
                ("Password", masked),
                ("Sign in", String::new()),
            ];
            let table_rows = rows.iter().enumerate().map(|(idx, (label, value))| {
                Row::new(vec![Cell::from(*label), Cell::from(value.clone())])
                    .style(selected_style(idx == login.selected))
            });
            let table = Table::new(
                table_rows,
                [Constraint::Percentage(35), Constraint::Percentage(65)],
            )
            .column_spacing(2)
            .block(main_panel_block());
            frame.render_widget(table, chunks[1]);

            render_footer(frame, chunks[2], hint, status);
        })
        .map_err(|e| format!("failed to render login screen: {e}"))?;
    Ok(())
}

pub fn draw_list_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    list: &ListController,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let chunks = screen_chunks(frame);
            let subtitle = match list.status {
                ListStatus::Loading => "Loading products...".to_string(),
                ListStatus::Error => "Showing last known products (refresh failed)".to_string(),
                ListStatus::Idle => format!("{} products", list.items.len()),
            };
            render_header(frame, chunks[0], "Nexo > Products", &subtitle);

            let mut items = Vec::with_capacity(list.items.len());
            for (idx, product) in list.items.iter().enumerate() {
                let line = format!("{}  {}", product.name, format_price(product.price));
                let mut item = ListItem::new(Line::from(Span::raw(line)));
                if idx == list.selected {
                    item = item.style(selected_style(true));
                }
                items.push(item);
            }
            frame.render_widget(List::new(items).block(main_panel_block()), chunks[1]);

            render_footer(frame, chunks[2], hint, status);
        })
        .map_err(|e| format!("failed to render product list: {e}"))?;
    Ok(())
}

pub fn draw_detail_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    detail: &DetailController,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let chunks = screen_chunks(frame);
            render_header(frame, chunks[0], "Nexo > Product", &detail.current.name);

            let product = &detail.current;
            let mut lines = vec![
                Line::from(Span::styled(
                    product.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format_price(product.price),
                    Style::default().fg(Color::Green),
                )),
                Line::from(""),
            ];
            if !product.description.is_empty() {
                lines.push(Line::from("About this product"));
                lines.push(Line::from(product.description.clone()));
                lines.push(Line::from(""));
            }
            if !product.image.is_empty() {
                lines.push(Line::from(format!("Image: {}", product.image)));
            }
            frame.render_widget(Paragraph::new(lines).block(main_panel_block()), chunks[1]);

            render_footer(frame, chunks[2], hint, status);

            if detail.confirming_delete {
                let area = centered_rect(60, 30, frame.area());
                frame.render_widget(Clear, area);
                let dialog = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Delete product?",
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(product.name.clone()),
                    Line::from(""),
                    Line::from("y delete | n keep"),
                ])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::new(2, 2, 1, 1)),
                );
                frame.render_widget(dialog, area);
            }
        })
        .map_err(|e| format!("failed to render product detail: {e}"))?;
    Ok(())
}

pub fn draw_form_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    form: &FormController,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let chunks = screen_chunks(frame);
            let title = match form.row() {
                FormRow::Save => "Nexo > Product Form > Save",
                _ => "Nexo > Product Form",
            };
            let subtitle = match &form.mode {
                crate::screens::form::FormMode::Create => "New product".to_string(),
                crate::screens::form::FormMode::Edit { original_id } => {
                    format!("Editing product {original_id}")
                }
            };
            render_header(frame, chunks[0], title, &subtitle);

            let mut table_rows = Vec::with_capacity(FORM_FIELDS.len() + 1);
            for (idx, field) in FORM_FIELDS.iter().enumerate() {
                table_rows.push(
                    Row::new(vec![
                        Cell::from(field.label()),
                        Cell::from(form.draft.field(*field).to_string()),
                    ])
                    .style(selected_style(idx == form.selected)),
                );
            }
            table_rows.push(
                Row::new(vec![Cell::from("Save"), Cell::from("")])
                    .style(selected_style(form.selected == FORM_FIELDS.len())),
            );
            let table = Table::new(
                table_rows,
                [Constraint::Percentage(30), Constraint::Percentage(70)],
            )
            .column_spacing(2)
            .block(main_panel_block());
            frame.render_widget(table, chunks[1]);

            render_footer(frame, chunks[2], hint, status);
        })
        .map_err(|e| format!("failed to render product form: {e}"))?;
    Ok(())
}
