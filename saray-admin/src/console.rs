//! Operator console
//!
//! Line commands driving an [`AdminApp`], and plain-text rendering of the
//! panel state.

use shared::{Record, ResourceKind};
use std::fmt::Write;
use std::str::FromStr;

use crate::app::AdminApp;
use crate::error::{AdminError, AdminResult};
use crate::form::FormState;
use crate::manager::{AdminResourceManager, Confirm};

pub const HELP: &str = "\
Commands:
  login <password>      log in
  tab <kind>            switch to tables | chefs | menu | reservations
  list                  show the current collection
  new                   open an empty form for the current tab
  edit <id>             open the form for a listed record
  set <field> <value>   change one form field
  show                  show the open form
  save                  submit the open form
  cancel                close the form without saving
  delete <id>           delete a listed record (asks first)
  refresh               reload the current collection
  logout                end the session
  help                  this text
  quit                  leave the console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Tab(ResourceKind),
    List,
    New,
    Edit(String),
    Set { field: String, value: String },
    Show,
    Save,
    Cancel,
    Delete(String),
    Refresh,
    Logout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };
        match word.to_ascii_lowercase().as_str() {
            "login" => arg("login <password>").map(Command::Login),
            "tab" => arg("tab <kind>")?.parse().map(Command::Tab),
            "list" | "ls" => Ok(Command::List),
            "new" => Ok(Command::New),
            "edit" => arg("edit <id>").map(Command::Edit),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".into());
                }
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "show" => Ok(Command::Show),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "delete" | "rm" => arg("delete <id>").map(Command::Delete),
            "refresh" => Ok(Command::Refresh),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".into()),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

/// What the console loop does next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// One line per record
pub fn render_record(record: &Record) -> String {
    match record {
        Record::Table(t) => format!(
            "Masa {:<3} {:>2} kişi  {:<16} {:<10} [{}]",
            t.table_number,
            t.capacity,
            t.location,
            t.status.label(),
            t.id
        ),
        Record::Chef(c) => format!("{}  ({})  [{}]", c.name, c.signature_dish, c.id),
        Record::MenuItem(m) => format!(
            "{:<20} {:<28} ₺{:.2}  [{}]",
            m.category.label(),
            m.name,
            m.price,
            m.id
        ),
        Record::Reservation(r) => format!(
            "{} {}  {:<20} {:>2} kişi  {} {}  {}  [{}]",
            r.reservation_date.format("%d.%m.%Y"),
            r.reservation_time.format("%H:%M"),
            r.customer_name,
            r.guest_count,
            r.customer_email,
            r.customer_phone,
            r.status.label(),
            r.id
        ),
    }
}

/// The active tab: header, rows and the last notice
pub fn render_panel(panel: &AdminResourceManager) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", panel.active().label());
    if panel.is_loading() {
        out.push_str("Loading...\n");
    } else if panel.records().is_empty() {
        out.push_str("(no records)\n");
    }
    for record in panel.records() {
        let _ = writeln!(out, "  {}", render_record(record));
    }
    if let Some(notice) = panel.notice() {
        let marker = if notice.is_error() { "!" } else { "*" };
        let _ = writeln!(out, "{marker} {}", notice.message);
    }
    out
}

pub fn render_form(form: &FormState, editing: Option<&str>) -> String {
    let mut out = match editing {
        Some(id) => format!("Editing {} [{}]\n", form.kind().label(), id),
        None => format!("New {}\n", form.kind().label()),
    };
    for (field, value) in form.fields() {
        let _ = writeln!(out, "  {field:<15} {value}");
    }
    out
}

/// Run one command against the app
pub async fn execute(
    app: &mut AdminApp,
    command: Command,
    confirm: &mut impl Confirm,
) -> AdminResult<Outcome> {
    let text = match command {
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
        Command::Login(password) => {
            match app.login(&password).await {
                Ok(()) => render_panel(app.panel_mut()?),
                Err(AdminError::AuthFailed) => {
                    app.login_form().error.clone().unwrap_or_default()
                }
                Err(other) => return Err(other),
            }
        }
        Command::Logout => {
            app.logout()?;
            "Logged out".to_string()
        }
        Command::Tab(kind) => {
            let panel = app.panel_mut()?;
            // A failed load is already on the panel as a notice
            let _ = panel.select_tab(kind).await;
            render_panel(panel)
        }
        Command::List => render_panel(app.panel_mut()?),
        Command::Refresh => {
            let panel = app.panel_mut()?;
            let _ = panel.refresh().await;
            render_panel(panel)
        }
        Command::New => {
            let panel = app.panel_mut()?;
            let kind = panel.active();
            panel.open_create_form(kind)?;
            show_form(panel)?
        }
        Command::Edit(id) => {
            let panel = app.panel_mut()?;
            panel.open_edit_form_by_id(&id)?;
            show_form(panel)?
        }
        Command::Set { field, value } => {
            let panel = app.panel_mut()?;
            panel.set_field(&field, value)?;
            show_form(panel)?
        }
        Command::Show => show_form(app.panel_mut()?)?,
        Command::Cancel => {
            let panel = app.panel_mut()?;
            panel.cancel_form();
            "Form closed".to_string()
        }
        Command::Save => {
            let panel = app.panel_mut()?;
            let kind = panel.active();
            match panel.submit(kind).await {
                Ok(()) => render_panel(panel),
                Err(AdminError::Validation(e)) => format!("{e}\n{}", show_form(panel)?),
                Err(AdminError::Remote(_)) => {
                    format!("{}\n{}", notice_text(panel), show_form(panel)?)
                }
                Err(other) => return Err(other),
            }
        }
        Command::Delete(id) => {
            let panel = app.panel_mut()?;
            let kind = panel.active();
            match panel.remove(kind, &id, confirm).await {
                Ok(true) => render_panel(panel),
                Ok(false) => "Not deleted".to_string(),
                Err(AdminError::Remote(_)) => notice_text(panel),
                Err(other) => return Err(other),
            }
        }
    };
    Ok(Outcome::Print(text))
}

fn show_form(panel: &AdminResourceManager) -> AdminResult<String> {
    let form = panel.form().ok_or(AdminError::NoOpenForm)?;
    Ok(render_form(form, panel.editing()))
}

fn notice_text(panel: &AdminResourceManager) -> String {
    panel
        .notice()
        .map(|n| n.message.clone())
        .unwrap_or_default()
}
