//! Terminal front end for the design-space viewer
use axiscube_core::{
    assemble, parse_axes, rebuild_camera, rebuild_structure, update, AxisInfo, CameraSettings,
    Message, Model, ProjectionMode, Structure,
};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info, warn};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;

pub use config::AppConfig;
pub use renderer::CellRenderer;

/// Axes shown when no descriptor is supplied
pub const DEFAULT_AXES: &str = r#"
wght "Weight"       400  100  900
wdth "Width"        100   75  125
opsz "Optical size"  14    8  144
slnt "Slant"          0  -15    0
GRAD "Grade"          0 -200  150
"#;

/// The built-in axis list
pub fn default_axes() -> Vec<AxisInfo> {
    parse_axes(DEFAULT_AXES).unwrap_or_default()
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: AppConfig,
    model: Model,
    settings: CameraSettings,
    structure: Structure,
    renderer: CellRenderer,
    selected: usize,
    drag_origin: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// An app sized to the current terminal
    pub fn new(axes: Vec<AxisInfo>, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(axes, config, width, height))
    }

    /// An app for a `width` by `height` cell grid
    pub fn with_size(axes: Vec<AxisInfo>, config: AppConfig, width: u16, height: u16) -> Self {
        let model = Model::new(axes).with_orbit(config.camera.orbit());
        let structure = rebuild_structure(&model);

        Self {
            settings: config.camera.settings(),
            renderer: CellRenderer::new(
                width as usize,
                height as usize,
                config.view.cell_width_px,
                config.view.cell_height_px,
            ),
            config,
            model,
            structure,
            selected: 0,
            drag_origin: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.view.target_fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.tick();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply a message, rebuilding the structure when axis data changed.
    pub fn apply(&mut self, message: Message) {
        let camera_only = matches!(
            message,
            Message::Rotate { .. } | Message::Drag { .. } | Message::SetPerspective(_)
        );
        match update(&self.model, message) {
            Ok(model) => {
                self.model = model;
                if !camera_only {
                    self.structure = rebuild_structure(&self.model);
                }
            }
            Err(e) => warn!("ignored edit: {}", e),
        }
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, KeyEvent { code, .. }: KeyEvent) {
        let input = self.config.input.clone();
        let axis_count = self.model.axes.len();

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.apply(Message::Rotate {
                d_yaw: 0.0,
                d_pitch: input.rotate_step,
            }),
            KeyCode::Char('s') | KeyCode::Down => self.apply(Message::Rotate {
                d_yaw: 0.0,
                d_pitch: -input.rotate_step,
            }),
            KeyCode::Char('a') | KeyCode::Left => self.apply(Message::Rotate {
                d_yaw: -input.rotate_step,
                d_pitch: 0.0,
            }),
            KeyCode::Char('d') | KeyCode::Right => self.apply(Message::Rotate {
                d_yaw: input.rotate_step,
                d_pitch: 0.0,
            }),
            KeyCode::Tab if axis_count > 0 => {
                self.selected = (self.selected + 1) % axis_count;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < axis_count {
                    self.selected = index;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_value(input.value_step),
            KeyCode::Char('-') => self.nudge_value(-input.value_step),
            KeyCode::Char(']') => self.nudge_distance(input.distance_step),
            KeyCode::Char('[') => self.nudge_distance(-input.distance_step),
            KeyCode::Char('n') => self.apply(Message::SetActive(self.model.active + 1)),
            KeyCode::Char('N') => {
                self.apply(Message::SetActive(self.model.active.saturating_sub(1)))
            }
            KeyCode::Char('p') => {
                self.apply(Message::SetPerspective(self.model.orbit.perspective + 1.0))
            }
            KeyCode::Char('P') => {
                self.apply(Message::SetPerspective(self.model.orbit.perspective - 1.0))
            }
            KeyCode::Char('o') => {
                self.settings.mode = match self.settings.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
                info!("projection switched to {:?}", self.settings.mode);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((column, row)) = self.drag_origin {
                    let dx = (f32::from(mouse.column) - f32::from(column)) * self.config.view.cell_width_px;
                    let dy = (f32::from(mouse.row) - f32::from(row)) * self.config.view.cell_height_px;
                    self.apply(Message::Drag {
                        dx,
                        dy,
                        sensitivity: self.config.input.drag_sensitivity,
                    });
                }
                self.drag_origin = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_origin = None;
            }
            _ => {}
        }
    }

    fn nudge_value(&mut self, fraction: f32) {
        if let Some(axis) = self.model.axes.get(self.selected) {
            let value = (axis.value + (axis.max - axis.min) * fraction).clamp(axis.min, axis.max);
            self.apply(Message::SetValue {
                index: self.selected,
                value,
            });
        }
    }

    fn nudge_distance(&mut self, delta: f32) {
        if let Some(distance) = self.model.distances.get(self.selected).copied() {
            self.apply(Message::SetDistance {
                index: self.selected,
                distance: distance + delta,
            });
        }
    }

    fn tick(&mut self) {
        if self.config.view.auto_rotate != 0.0 && self.drag_origin.is_none() {
            self.apply(Message::Rotate {
                d_yaw: self.config.view.auto_rotate,
                d_pitch: 0.0,
            });
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.renderer.pixel_size();
        let camera = rebuild_camera(&self.model, &self.settings, width, height);
        let frame = assemble(&self.structure, &camera, self.model.orbit.display_scale());

        self.renderer.clear();
        self.renderer.render_frame(&frame);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Axiscube | FPS: {:.1} | {}/{} axes | perspective {:.0} | WASD/drag=orbit Tab/1-9=axis +/-=value [/]=distance n/N=axes p/P=perspective o=projection Q=quit",
                self.fps,
                self.model.active,
                self.model.axes.len(),
                self.model.orbit.perspective,
            )),
            ResetColor
        )?;

        if self.config.debug.show_overlay {
            self.draw_overlay(&mut stdout)?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn draw_overlay<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, axis) in self.model.axes.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            let color = if i < self.model.active {
                renderer::terminal_color(axiscube_core::catalog::color_for(i)).unwrap_or(Color::Grey)
            } else {
                Color::DarkGrey
            };
            queue!(
                out,
                cursor::MoveTo(0, i as u16 + 1),
                SetForegroundColor(color),
                Print(format!(
                    "{} {:<4} {:<14} {:>8.1} [{} .. {}] d={:.1}",
                    marker,
                    axis.name,
                    axis.title,
                    axis.value,
                    axis.min,
                    axis.max,
                    self.model.distances.get(i).copied().unwrap_or_default(),
                )),
                ResetColor
            )?;
        }
        Ok(())
    }
}
