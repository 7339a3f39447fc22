use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::Style;

use term_balloon::drivers::console::ConsoleInputDriver;
use term_balloon::editor_ui::BalloonEditorUi;
use term_balloon::event_loop::{ControlFlow, EventLoop};
use term_balloon::keybindings::{Action, KeyBindings};
use term_balloon::surface::{EditableSurface, resolve_placeholder};
use term_balloon::terminal::TerminalSession;
use term_balloon::theme;
use term_balloon::toolbar::{ToolbarItem, ToolbarView};
use term_balloon::ui::UiFrame;
use term_balloon::{toolbar::ToolbarState, tracing_sub};

#[derive(Parser, Debug)]
#[command(name = "term-balloon", about = "Editable surface with a contextual balloon toolbar")]
struct Args {
    /// Placeholder shown while the surface is empty.
    #[arg(long)]
    placeholder: Option<String>,

    /// Initial surface content.
    #[arg(long, default_value = "")]
    text: String,
}

fn main() -> io::Result<()> {
    tracing_sub::init_default();
    let args = Args::parse();

    let placeholder = resolve_placeholder(
        args.placeholder.as_deref(),
        Some("Type here, Alt+F10 for the toolbar"),
    );
    let surface = EditableSurface::new("main", &args.text, placeholder);
    let toolbar = ToolbarView::new(vec![
        ToolbarItem::new("bold", "Bold"),
        ToolbarItem::new("italic", "Italic"),
        ToolbarItem::new("link", "Link"),
    ]);
    let bindings = KeyBindings::default();
    let quit_hint = bindings
        .combos_for(Action::Quit)
        .first()
        .cloned()
        .unwrap_or_default();

    let mut ui = BalloonEditorUi::new(surface, toolbar, bindings.clone());
    ui.init();

    let mut session = TerminalSession::new().map_err(io::Error::other)?;
    session.enter().map_err(io::Error::other)?;

    let driver = ConsoleInputDriver::new();
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(16));
    let mut last_activated: Option<&'static str> = None;

    let result = event_loop.run(|_, event| {
        match event {
            Some(Event::Key(key)) if bindings.matches(Action::Quit, &key) => {
                return Ok(ControlFlow::Quit);
            }
            Some(evt) => {
                ui.handle_event(&evt);
                if let Some(id) = ui.take_activated() {
                    last_activated = Some(id);
                }
            }
            None => {
                session
                    .draw(|mut frame| {
                        let area = frame.area();
                        if area.height == 0 {
                            return;
                        }
                        let editor_area = Rect {
                            height: area.height.saturating_sub(1),
                            ..area
                        };
                        ui.render(&mut frame, editor_area);
                        draw_status_line(&mut frame, area, &ui, &quit_hint, last_activated);
                    })
                    .map_err(io::Error::other)?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    ui.destroy();
    session.exit().map_err(io::Error::other)?;
    result
}

fn draw_status_line(
    frame: &mut UiFrame<'_>,
    area: Rect,
    ui: &BalloonEditorUi,
    quit_hint: &str,
    last_activated: Option<&'static str>,
) {
    let y = area.y + area.height - 1;
    let state = match ui.toolbar_state() {
        ToolbarState::Hidden => "hidden",
        ToolbarState::Shown => "shown",
    };
    let mut status = format!(
        "toolbar: {state} | focused: {} | {} to quit",
        if ui.is_focused() { "yes" } else { "no" },
        quit_hint
    );
    if let Some(id) = last_activated {
        status.push_str(&format!(" | last: {id}"));
    }
    frame
        .buffer_mut()
        .set_string(area.x, y, status, Style::default().fg(theme::status_fg()));
}
