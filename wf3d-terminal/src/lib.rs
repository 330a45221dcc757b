//! Terminal host for the wf3d wireframe renderer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::collections::HashMap;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{Camera, ControllerConfig, FrameStats, Key, Scene, SceneController, Viewport};

pub mod renderer;

pub use renderer::CellCanvas;

/// 30 FPS target
const TARGET_FRAME_TIME: Duration = Duration::from_millis(1000 / 30);
/// How long a key counts as held when the terminal cannot report releases
const KEY_HOLD_TIMEOUT: Duration = Duration::from_millis(300);
/// Degrees per cell of pointer motion; a cell is far coarser than a pixel
const LOOK_SENSITIVITY: f32 = 4.0;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    controller: SceneController,
    canvas: CellCanvas,
    running: bool,
    clock: Instant,
    frames: u64,
    fps: Option<u32>,
    last_pointer: Option<(u16, u16)>,
    /// True when the terminal reports key release events
    reports_release: bool,
    hold_deadlines: HashMap<Key, Instant>,
}

impl TerminalApp {
    pub fn new(scene: Scene, camera: Camera) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, camera, width, height))
    }

    pub fn with_size(scene: Scene, camera: Camera, width: u16, height: u16) -> Self {
        let config = ControllerConfig {
            look_sensitivity: LOOK_SENSITIVITY,
            ..ControllerConfig::default()
        };
        Self {
            controller: SceneController::new(
                scene,
                camera,
                Viewport::new(width as u32, height as u32),
                config,
                0.0,
            ),
            canvas: CellCanvas::new(width as usize, height as usize),
            running: true,
            clock: Instant::now(),
            frames: 0,
            fps: None,
            last_pointer: None,
            reports_release: false,
            hold_deadlines: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        self.reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "terminal renderer started, key release events {}",
            if self.reports_release { "reported" } else { "emulated" }
        );

        let result = self.main_loop();

        // Cleanup runs every step even if an earlier one fails
        let popped = if self.reports_release {
            execute!(stdout(), PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        };
        let left = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let raw = terminal::disable_raw_mode();
        log::info!("terminal renderer stopped");

        first_error([result, popped, left, raw])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event, frame_start);
            }
            self.expire_held_keys(frame_start);

            // Update and render
            self.render()?;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < TARGET_FRAME_TIME {
                std::thread::sleep(TARGET_FRAME_TIME - elapsed);
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key_event) => self.handle_key(key_event, now),
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            Event::Resize(width, height) => {
                self.controller.resize(width as u32, height as u32);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, modifiers, kind, .. }: KeyEvent, now: Instant) {
        if kind == KeyEventKind::Release {
            if let Some(key) = map_key(code) {
                self.hold_deadlines.remove(&key);
                self.controller.input_mut().key_up(key);
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc => {
                self.controller.input_mut().release_capture();
                self.last_pointer = None;
            }
            _ => {
                if let Some(key) = map_key(code) {
                    self.controller.input_mut().key_down(key);
                    if !self.reports_release {
                        self.hold_deadlines.insert(key, now + KEY_HOLD_TIMEOUT);
                    }
                }
            }
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.controller.input_mut().primary_click() {
                    self.last_pointer = Some((column, row));
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some((last_col, last_row)) = self.last_pointer {
                    let dx = column as f32 - last_col as f32;
                    let dy = row as f32 - last_row as f32;
                    self.controller.input_mut().pointer_moved(dx, dy);
                }
                if self.controller.input().is_captured() {
                    self.last_pointer = Some((column, row));
                }
            }
            _ => {}
        }
    }

    /// Synthesize releases for keys whose hold window has passed
    pub fn expire_held_keys(&mut self, now: Instant) {
        let input = self.controller.input_mut();
        self.hold_deadlines.retain(|key, deadline| {
            if *deadline <= now {
                input.key_up(*key);
                false
            } else {
                true
            }
        });
    }

    /// Keep the latest FPS for the overlay. The first frame is measured
    /// against construction time rather than a previous frame, so its rate
    /// is not shown.
    fn record_stats(&mut self, stats: FrameStats) {
        if self.frames > 0 && stats.fps.is_some() {
            self.fps = stats.fps;
        }
        self.frames += 1;
    }

    fn render(&mut self) -> io::Result<()> {
        let now_ms = self.clock.elapsed().as_secs_f64() * 1000.0;
        let stats = self.controller.tick(now_ms, &mut self.canvas);
        self.record_stats(stats);

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let fps = self.fps.map_or_else(|| "--".to_string(), |f| f.to_string());
        let look = if self.controller.input().is_captured() {
            "Esc=Release mouse"
        } else {
            "Click=Capture mouse"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | {} FPS | WASD/Arrows=Move {} Q=Quit",
                fps, look
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// The first failure among results, in order
fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

/// Translate a terminal key code into a controller key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::character(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> TerminalApp {
        let (scene, camera) = Scene::demo();
        TerminalApp::with_size(scene, camera, 80, 24)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Up), Some(Key::ArrowUp));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Key::Char('w')));
        assert_eq!(map_key(KeyCode::Tab), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_event(press(KeyCode::Char('q')), Instant::now());
        assert!(!app.is_running());

        let mut app = self::app();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_event(ctrl_c, Instant::now());
        assert!(!app.is_running());
    }

    #[test]
    fn test_emulated_release_after_timeout() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(press(KeyCode::Char('w')), now);
        assert!(app.controller().input().is_held(Key::Char('w')));

        app.expire_held_keys(now);
        assert!(app.controller().input().is_held(Key::Char('w')));

        app.expire_held_keys(now + KEY_HOLD_TIMEOUT);
        assert!(!app.controller().input().is_held(Key::Char('w')));
    }

    #[test]
    fn test_reported_release() {
        let mut app = app();
        app.reports_release = true;
        let now = Instant::now();
        app.handle_event(press(KeyCode::Left), now);
        app.expire_held_keys(now + KEY_HOLD_TIMEOUT * 2);
        assert!(app.controller().input().is_held(Key::ArrowLeft));

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        app.handle_event(release, now);
        assert!(!app.controller().input().is_held(Key::ArrowLeft));
    }

    #[test]
    fn test_mouse_look_requires_click() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(mouse(MouseEventKind::Moved, 10, 10), now);
        app.handle_event(mouse(MouseEventKind::Moved, 15, 10), now);
        assert!(!app.controller().input().is_captured());

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 10), now);
        app.handle_event(mouse(MouseEventKind::Moved, 18, 8), now);
        app.handle_event(mouse(MouseEventKind::Moved, 20, 8), now);
        let mut canvas = CellCanvas::new(80, 24);
        app.controller.tick(16.0, &mut canvas);
        assert_eq!(app.controller().camera().yaw(), 5.0 * LOOK_SENSITIVITY);
        assert_eq!(app.controller().camera().pitch(), -2.0 * LOOK_SENSITIVITY);

        app.handle_event(press(KeyCode::Esc), now);
        assert!(!app.controller().input().is_captured());
    }

    #[test]
    fn test_first_frame_rate_is_not_shown() {
        let mut app = app();
        app.record_stats(FrameStats { dt: 0.000_01, fps: Some(100_000) });
        assert_eq!(app.fps, None);

        app.record_stats(FrameStats { dt: 0.033, fps: Some(30) });
        assert_eq!(app.fps, Some(30));

        app.record_stats(FrameStats { dt: 0.0, fps: None });
        assert_eq!(app.fps, Some(30));
    }

    #[test]
    fn test_first_error_keeps_order() {
        assert!(first_error([Ok(()), Ok(())]).is_ok());

        let err = first_error([
            Ok(()),
            Err(io::Error::new(io::ErrorKind::Other, "leave screen")),
            Err(io::Error::new(io::ErrorKind::Other, "raw mode")),
        ]);
        assert_eq!(err.map_err(|e| e.to_string()), Err("leave screen".to_string()));
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut app = app();
        app.handle_event(Event::Resize(120, 40), Instant::now());
        assert_eq!(app.controller().viewport(), Viewport::new(120, 40));
    }

    #[test]
    fn test_demo_frame_fills_canvas() {
        let mut app = app();
        let mut canvas = CellCanvas::new(80, 24);
        app.controller.tick(33.0, &mut canvas);
        assert!(canvas.filled_cells() > 0);
    }
}
