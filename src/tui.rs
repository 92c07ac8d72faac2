//! Terminal surface
//!
//! Draws the controller's panel and input, and maps keys and mouse clicks to
//! controller calls.

mod render;

use crate::runtime::ChatController;
use crate::transport::ChatTransport;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stderr};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

const SCROLL_STEP: u16 = 3;

/// Whether the event loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Regions captured during the last draw, for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub messages: Rect,
    pub send_button: Rect,
}

pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let entered = execute!(
        io::stderr(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    );
    unwind_on_err(entered, abandon_setup)?;

    let backend = CrosstermBackend::new(io::stderr());
    unwind_on_err(Terminal::new(backend), abandon_setup)
}

/// Best-effort undo of a partial `init`; raw mode goes even if restore fails
fn abandon_setup() {
    let _ = restore();
    let _ = disable_raw_mode();
}

/// Run `unwind` before handing back a failed setup step
fn unwind_on_err<T>(result: io::Result<T>, unwind: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        unwind();
    }
    result
}

pub fn restore() -> io::Result<()> {
    execute!(
        io::stderr(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Run until the user quits or the terminal event stream ends
pub async fn run<T>(terminal: &mut Tui, controller: &mut ChatController<T>) -> io::Result<()>
where
    T: ChatTransport + 'static,
{
    let mut events = EventStream::new();
    let mut areas = HitAreas::default();

    loop {
        terminal.draw(|frame| areas = render::draw(frame, controller))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if handle_event(controller, &areas, &event) == Flow::Quit {
                        break;
                    }
                }
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(outcome) = controller.next_outcome() => controller.dispatch(outcome),
        }
    }

    Ok(())
}

pub fn handle_event<T>(
    controller: &mut ChatController<T>,
    areas: &HitAreas,
    event: &TermEvent,
) -> Flow
where
    T: ChatTransport + 'static,
{
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key(controller, *key),
        // Single-line input: pasted newlines become spaces
        TermEvent::Paste(text) => {
            controller.input_mut().insert_str(&text.replace(['\r', '\n'], " "));
            Flow::Continue
        }
        TermEvent::Mouse(mouse) => {
            handle_mouse(controller, areas, *mouse);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn handle_key<T>(controller: &mut ChatController<T>, key: KeyEvent) -> Flow
where
    T: ChatTransport + 'static,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if ctrl => return Flow::Quit,

        // Enter sends; it never inserts a newline
        KeyCode::Enter => controller.submit(),

        KeyCode::Char(c) if !ctrl => controller.input_mut().insert(c),
        KeyCode::Backspace => controller.input_mut().backspace(),
        KeyCode::Delete => controller.input_mut().delete(),
        KeyCode::Left => controller.input_mut().move_left(),
        KeyCode::Right => controller.input_mut().move_right(),
        KeyCode::Home => controller.input_mut().home(),
        KeyCode::End => controller.input_mut().end(),

        KeyCode::Up => controller.panel_mut().scroll_up(1),
        KeyCode::Down => controller.panel_mut().scroll_down(1),
        KeyCode::PageUp => controller.panel_mut().scroll_up(SCROLL_STEP * 4),
        KeyCode::PageDown => controller.panel_mut().scroll_down(SCROLL_STEP * 4),
        _ => {}
    }
    Flow::Continue
}

fn handle_mouse<T>(controller: &mut ChatController<T>, areas: &HitAreas, mouse: MouseEvent)
where
    T: ChatTransport + 'static,
{
    let at = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if areas.send_button.contains(at) => {
            controller.submit();
        }
        MouseEventKind::ScrollUp if areas.messages.contains(at) => {
            controller.panel_mut().scroll_up(SCROLL_STEP);
        }
        MouseEventKind::ScrollDown if areas.messages.contains(at) => {
            controller.panel_mut().scroll_down(SCROLL_STEP);
        }
        _ => {}
    }
}
