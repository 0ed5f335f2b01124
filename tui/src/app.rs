//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize, paste)
//! - A [`Session`] holding all interaction and animation state
//! - A compositor with one layer per screen region
//!
//! The App:
//! 1. Converts terminal events to [`SurfaceEvent`]s
//! 2. Hands them to the session
//! 3. Drives the ambient tick and watches for request completions
//! 4. Renders what the session exposes

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;
use unicode_width::UnicodeWidthStr;

use aura_conductor::{Classifier, RequestState, Session, SubmitOutcome, SurfaceEvent};

use crate::compositor::{Compositor, LayerId};
use crate::theme::{DIM_TEXT, EXAMPLE_PROMPTS, TITLE_CYAN};
use crate::widgets::ambient::{cell_center, viewport_for};
use crate::widgets::panel::panel_area;
use crate::widgets::{AmbientView, AnalyzerPanel, ThinkingIndicator};

/// Hint text on the status line
const HINTS: &str = "Enter analyze · F1-F3 examples · Ctrl+U clear · Esc quit";

/// Layer IDs for UI regions
struct AppLayers {
    ambient: LayerId,
    panel: LayerId,
    status: LayerId,
}

impl AppLayers {
    fn bounds(area: Rect) -> [Rect; 3] {
        [
            area,
            panel_area(area),
            Rect::new(0, area.height.saturating_sub(1), area.width, area.height.min(1)),
        ]
    }
}

/// Main application state
pub struct App<C: Classifier + 'static> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Interaction, request and animation state
    session: Session<C>,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Dots on the analyze button
    thinking: ThinkingIndicator,

    // === Misc State ===
    /// Render period
    frame_interval: Duration,
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

impl<C: Classifier + 'static> App<C> {
    /// Create an App over `session` for a terminal of `size` cells
    pub fn new(session: Session<C>, frame_interval: Duration, size: (u16, u16)) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);

        let [ambient_bounds, panel_bounds, status_bounds] = AppLayers::bounds(area);
        let layers = AppLayers {
            ambient: compositor.create_layer(ambient_bounds, 0),
            panel: compositor.create_layer(panel_bounds, 10),
            status: compositor.create_layer(status_bounds, 20),
        };

        Self {
            running: true,
            session,
            compositor,
            layers,
            thinking: ThinkingIndicator::new(),
            frame_interval,
            last_frame: Instant::now(),
            size,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        let mut ticker = self.session.ambient().ticker();
        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            cols = self.size.0,
            rows = self.size.1,
            frame_ms = self.frame_interval.as_millis() as u64,
            "Surface started"
        );

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event),
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                // Request settled (success after its delay, or failure)
                () = async { self.session.completed().await; } => self.on_request_settled(),

                // Ambient tick, fixed period regardless of frame rate
                _ = ticker.tick() => {
                    self.session.tick();
                }

                // Frame tick - animate and render
                _ = frames.tick() => {
                    self.update();
                    self.render(terminal)?;
                }
            }
        }

        self.session.dispose();
        Ok(())
    }

    /// Route one terminal event
    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            Event::Paste(text) => {
                let mut combined = self.session.input().as_str().to_string();
                combined.push_str(&text);
                self.session
                    .handle_event(SurfaceEvent::InputChanged { text: combined });
            }
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if ctrl => self.quit(),

            // Clear
            KeyCode::Char('u') if ctrl => {
                self.session.handle_event(SurfaceEvent::InputCleared);
            }

            // Submit
            KeyCode::Enter => {
                if let SubmitOutcome::Accepted(request_id) = self.session.submit() {
                    tracing::debug!(%request_id, "Analyze requested");
                    self.thinking.reset();
                }
            }

            // Example prompts
            KeyCode::F(n @ 1..=3) => {
                let text = EXAMPLE_PROMPTS[usize::from(n - 1)].to_string();
                self.session.handle_event(SurfaceEvent::InputChanged { text });
            }

            // Typing
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.session.handle_event(SurfaceEvent::InputAppended { ch });
            }

            KeyCode::Backspace => {
                self.session.handle_event(SurfaceEvent::InputBackspace);
            }

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let (x, y) = cell_center(mouse.column, mouse.row);
                self.session.handle_event(SurfaceEvent::PointerMoved { x, y });
            }
            _ => {}
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let area = Rect::new(0, 0, width, height);
        self.compositor.resize(area);

        let [ambient_bounds, panel_bounds, status_bounds] = AppLayers::bounds(area);
        self.compositor.set_layer_bounds(self.layers.ambient, ambient_bounds);
        self.compositor.set_layer_bounds(self.layers.panel, panel_bounds);
        self.compositor.set_layer_bounds(self.layers.status, status_bounds);

        let viewport = viewport_for(width, height);
        self.session.handle_event(SurfaceEvent::Resized {
            width: viewport.width,
            height: viewport.height,
        });
    }

    fn on_request_settled(&mut self) {
        match self.session.request_state() {
            RequestState::Succeeded(result) => tracing::debug!(
                sentiment = %result.sentiment,
                percent = result.percent(),
                "Showing result"
            ),
            RequestState::Failed(error) => tracing::debug!(error = %error, "Showing error"),
            RequestState::Idle | RequestState::InFlight { .. } => {}
        }
    }

    fn quit(&mut self) {
        self.session.handle_event(SurfaceEvent::Disposed);
        self.running = false;
    }

    /// Update frame-timed animations
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        if self.session.request_state().is_in_flight() {
            self.thinking.update(delta);
        } else {
            self.thinking.reset();
        }
    }

    /// Compose all layers and draw them
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal backend fails to draw.
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.render_ambient();
        self.render_panel();
        self.render_status();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let Some(cell) = output.cell((x, y)) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    fn render_ambient(&mut self) {
        let particles = self.session.particles();
        let pointer = self.session.pointer();
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.ambient) {
            buf.reset();
            let area = buf.area;
            AmbientView::new(particles, pointer).render(area, buf);
        }
    }

    fn render_panel(&mut self) {
        let panel = AnalyzerPanel::new(
            self.session.input().as_str(),
            self.session.request_state(),
            self.session.can_submit(),
            self.thinking.current(),
        );
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.panel) {
            buf.reset();
            let area = buf.area;
            if area.width >= 20 && area.height >= 8 {
                panel.render(area, buf);
            }
        }
    }

    fn render_status(&mut self) {
        let state = self.session.request_state().description();
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            buf.set_string(area.x, area.y, format!(" {state} "), Style::default().fg(TITLE_CYAN));
            let offset = u16::try_from(state.width() + 3).unwrap_or(u16::MAX);
            buf.set_string(
                area.x.saturating_add(offset),
                area.y,
                HINTS,
                Style::default().fg(DIM_TEXT),
            );
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The underlying session
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Mutable access for drivers that settle requests outside [`App::run`]
    pub fn session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    /// Current terminal size in cells
    pub fn size(&self) -> (u16, u16) {
        self.size
    }
}
