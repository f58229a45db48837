use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::thread;
use std::time;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

use cellgrid::cell::ExampleCell;
use cellgrid::events::Command;
use cellgrid::events::SimMode;
use cellgrid::point::Point;
use cellgrid::sim::Simulation;

use ext::crossterm::TermColorExt;

mod ext;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

const LOG_FILE: &str = "cellgrid.log";

/// Each cell is drawn two columns wide so it looks roughly square.
const COLS_PER_CELL: u16 = 2;

enum Input {
    Command(Command),
    Exit,
}

/// Terminal cell to screen space, in the same units as the grid's cell size.
fn to_screen(col: u16, row: u16, cell_size: f64) -> Point {
    Point::new(
        col as f64 * cell_size / COLS_PER_CELL as f64,
        row as f64 * cell_size,
    )
}

fn handle_key(key_event: KeyEvent) -> Option<Input> {
    let command = match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return Some(Input::Exit),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Command::ZoomIn,
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Command::ZoomOut,
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Command::ResetCamera,
        KeyEvent {
            code: KeyCode::Char('0'),
            ..
        } => Command::SetMode(SimMode::Stopped),
        KeyEvent {
            code: KeyCode::Char('1'),
            ..
        } => Command::SetMode(SimMode::Ticking),
        KeyEvent {
            code: KeyCode::Char('2'),
            ..
        } => Command::SetMode(SimMode::Stepping),
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => Command::Step,
        KeyEvent {
            code: KeyCode::Char('s'),
            ..
        } => Command::ToggleStroke,
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Command::ResetGrid,
        _ => return None,
    };

    Some(Input::Command(command))
}

fn handle_mouse(mouse_event: MouseEvent, cell_size: f64) -> Option<Input> {
    let p = to_screen(mouse_event.column, mouse_event.row, cell_size);

    let command = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Command::BeginDrag(p),
        MouseEventKind::Drag(MouseButton::Left) => Command::Drag(p),
        MouseEventKind::Up(MouseButton::Left) => Command::EndDrag,
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            Command::CycleAt(p)
        }
        MouseEventKind::ScrollUp => Command::ZoomIn,
        MouseEventKind::ScrollDown => Command::ZoomOut,
        _ => return None,
    };

    Some(Input::Command(command))
}

fn handle_event(event: CtEvent, cell_size: f64) -> Option<Input> {
    match event {
        CtEvent::Key(key_event) => handle_key(key_event),
        CtEvent::Mouse(mouse_event) => handle_mouse(mouse_event, cell_size),
        _ => None,
    }
}

fn draw<W: Write>(out: &mut W, sim: &Simulation<ExampleCell>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;

    // The bottom row is the status line
    let rows = rows.saturating_sub(1);

    let cell_size = sim.config().cell_size as f64;
    let viewport = to_screen(cols, rows, cell_size);
    let camera = sim.camera();

    queue!(
        out,
        style::SetBackgroundColor(sim.config().background.to_term()),
        terminal::Clear(terminal::ClearType::All),
    )?;

    for paint in sim.paint() {
        let p = Point::new(paint.x as f64 * cell_size, paint.y as f64 * cell_size);
        let p = camera.to_screen(p, viewport);

        let (col, row) = (p.x / cell_size, p.y / cell_size);
        if col < 0.0 || row < 0.0 || col >= (cols / COLS_PER_CELL) as f64 || row >= rows as f64 {
            continue;
        }

        let (col, row) = (col as u16 * COLS_PER_CELL, row as u16);

        queue!(
            out,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(paint.fill.to_term()),
        )?;

        match paint.stroke {
            Some(stroke) => queue!(
                out,
                style::SetForegroundColor(stroke.to_term()),
                style::Print("▏ ")
            )?,
            None => queue!(out, style::Print("  "))?,
        }
    }

    let generation = sim.grid().map(|g| g.generation()).unwrap_or_default();

    let status = match sim.notice() {
        Some(notice) => notice.to_string(),
        None => "q quit, 0/1/2 mode, enter step, r reset view".to_string(),
    };

    queue!(
        out,
        style::ResetColor,
        cursor::MoveTo(0, rows),
        style::Print(format!(
            "gen {generation} | {:?} | scale {:.1} | {status}",
            sim.mode(),
            camera.scale()
        )),
    )?;

    out.flush()
}

fn run<W: Write>(out: &mut W, sim: &mut Simulation<ExampleCell>) -> anyhow::Result<()> {
    let cell_size = sim.config().cell_size as f64;

    loop {
        let t = Instant::now();

        // Poll event for as long as FRAMETIME
        let input = if event::poll(FRAMETIME)? {
            handle_event(event::read()?, cell_size)
        } else {
            None
        };

        match input {
            None => {}
            Some(Input::Exit) => break,
            Some(Input::Command(command)) => sim.apply(command),
        }

        sim.tick(Instant::now());
        draw(out, sim).context("Failed to draw frame")?;

        let time_left = FRAMETIME.saturating_sub(t.elapsed());
        thread::sleep(time_left);
    }

    Ok(())
}

/// Run `body` on the alternate screen with mouse capture. The terminal is restored afterwards
/// even if setting it up failed.
fn on_alternate_screen<W: Write>(
    out: &mut W,
    body: impl FnOnce(&mut W) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let res = execute!(
        out,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )
    .context("Failed to set up the terminal")
    .and_then(|()| body(out));

    let restored = execute!(
        out,
        style::ResetColor,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("Failed to restore the terminal");

    res.and(restored)
}

fn main() -> anyhow::Result<()> {
    let log = File::create(LOG_FILE).with_context(|| format!("Failed to create {LOG_FILE}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut sim: Simulation<ExampleCell> = Simulation::new();
    sim.set_grid_width(40).set_grid_height(20);
    sim.start().context("Failed to start the simulation")?;

    let mut stdout = io::stdout();

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;

    let res = on_alternate_screen(&mut stdout, |out| run(out, &mut sim));
    let raw = terminal::disable_raw_mode().context("Failed to disable raw mode");

    res.and(raw)
}

#[cfg(test)]
mod test {
    use std::io;
    use std::io::Write;

    use super::on_alternate_screen;

    const ENTER: &str = "\x1b[?1049h";
    const LEAVE: &str = "\x1b[?1049l";

    /// Fails its first write, then records everything.
    #[derive(Default)]
    struct Unplugged {
        failed: bool,
        written: Vec<u8>,
    }

    impl Write for Unplugged {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::other("terminal unplugged"));
            }

            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn restores_after_failed_body() {
        let mut out = Vec::new();

        let err =
            on_alternate_screen(&mut out, |_| Err(anyhow::anyhow!("draw failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");

        let written = String::from_utf8(out).unwrap();
        let enter = written.find(ENTER).unwrap();
        let leave = written.find(LEAVE).unwrap();
        assert!(enter < leave);
    }

    #[test]
    fn restores_after_failed_setup() {
        let mut out = Unplugged::default();
        let mut ran = false;

        let err = on_alternate_screen(&mut out, |_| {
            ran = true;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to set up the terminal");
        assert!(!ran);
        assert!(String::from_utf8(out.written).unwrap().contains(LEAVE));
    }
}
