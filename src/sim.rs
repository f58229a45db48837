use std::time::Duration;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::camera::Camera;
use crate::cell::Cell;
use crate::color::Color;
use crate::config::Config;
use crate::config::ConfigError;
use crate::events::Command;
use crate::events::SimMode;
use crate::grid::CellPaint;
use crate::grid::Grid;

/// A grid, its camera and the settings driving them.
///
/// Configure with the `set_*` methods, then [`Simulation::start`]. Once started, configuration is
/// frozen: further `set_*` calls only log a warning.
pub struct Simulation<C> {
    config: Config,

    /// Taken by the grid on start
    factory: Option<Box<dyn Fn() -> C>>,

    /// `Some` once started
    grid: Option<Grid<C>>,

    camera: Camera,
    mode: SimMode,
    stroke: bool,
    last_tick: Instant,
    rng: StdRng,

    /// Last refused input, for the front end to show
    notice: Option<String>,
}

impl<C: Cell + Default + 'static> Simulation<C> {
    pub fn new() -> Self {
        Self::with_factory(C::default)
    }
}

impl<C: Cell + Default + 'static> Default for Simulation<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cell + 'static> Simulation<C> {
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> C + 'static,
    {
        let config = Config::default();

        Self {
            stroke: config.stroke,
            config,
            factory: Some(Box::new(factory)),
            grid: None,
            camera: Camera::new(),
            mode: SimMode::Stopped,
            last_tick: Instant::now(),
            rng: StdRng::from_entropy(),
            notice: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.grid.is_some()
    }

    fn configure(&mut self, what: &str, f: impl FnOnce(&mut Config)) -> &mut Self {
        if self.is_running() {
            warn!("Cannot change {what}, the simulation is already running");
        } else {
            f(&mut self.config);
        }

        self
    }

    pub fn set_grid_width(&mut self, width: usize) -> &mut Self {
        self.configure("grid width", |c| c.width = width)
    }

    pub fn set_grid_height(&mut self, height: usize) -> &mut Self {
        self.configure("grid height", |c| c.height = height)
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> &mut Self {
        self.configure("cell size", |c| c.cell_size = cell_size)
    }

    pub fn set_tick(&mut self, tick: Duration) -> &mut Self {
        self.configure("tick length", |c| c.tick = tick)
    }

    pub fn set_randomize(&mut self, randomize: bool) -> &mut Self {
        self.configure("randomization", |c| c.randomize = randomize)
    }

    pub fn set_background(&mut self, background: Color) -> &mut Self {
        self.configure("background color", |c| c.background = background)
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.configure("seed", |c| c.seed = Some(seed))
    }

    /// Replace the whole configuration at once.
    pub fn set_config(&mut self, config: Config) -> &mut Self {
        self.configure("configuration", |c| *c = config)
    }

    /// Choose how cells are built. Switching variants once running is refused.
    pub fn set_cell_factory<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> C + 'static,
    {
        if self.is_running() {
            warn!("Cannot switch cell variant, the simulation is already running");
        } else {
            self.factory = Some(Box::new(factory));
        }

        self
    }

    /// Build the grid and, if configured, randomize it. Starting twice only logs a warning.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if self.is_running() {
            warn!("The simulation is already running");
            return Ok(());
        }

        self.config.validate()?;

        let Some(factory) = self.factory.take() else {
            unreachable!("the cell factory is only taken by a successful start")
        };

        let Config {
            width,
            height,
            cell_size,
            ..
        } = self.config;

        let mut grid = Grid::with_factory(width, height, cell_size, factory)?;

        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        if self.config.randomize {
            grid.randomize(&mut self.rng);
        }

        info!(width, height, "Simulation started");

        self.stroke = self.config.stroke;
        self.grid = Some(grid);
        self.last_tick = Instant::now();

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> Option<&Grid<C>> {
        self.grid.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> SimMode {
        self.mode
    }

    pub fn stroke(&self) -> bool {
        self.stroke
    }

    /// Why the last pointer selection was refused. Cleared by the next one that lands.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Advance one generation if ticking and more than one tick has passed since the last one.
    /// Returns whether a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.mode != SimMode::Ticking {
            return false;
        }

        let Some(grid) = self.grid.as_mut() else {
            return false;
        };

        if now.saturating_duration_since(self.last_tick) <= self.config.tick {
            return false;
        }

        grid.update();
        self.last_tick = now;

        true
    }

    /// The render sink: one entry per cell, honoring the stroke toggle. Empty until started.
    pub fn paint(&self) -> impl Iterator<Item = CellPaint> + '_ {
        self.grid.iter().flat_map(|grid| grid.paint(self.stroke))
    }

    /// Apply one input command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ZoomIn => self.camera.zoom_in(),
            Command::ZoomOut => self.camera.zoom_out(),
            Command::BeginDrag(p) => self.camera.begin_drag(p),
            Command::Drag(p) => self.camera.while_dragging(p),
            Command::EndDrag => self.camera.end_drag(),
            Command::ResetCamera => self.camera.reset(),
            Command::SetMode(mode) => {
                debug!(?mode, "Switched simulation mode");
                self.mode = mode;
            }
            Command::ToggleStroke => self.stroke = !self.stroke,
            Command::Step => {
                if self.mode != SimMode::Stepping {
                    return;
                }

                if let Some(grid) = self.grid.as_mut() {
                    grid.update();
                }
            }
            Command::ResetGrid => {
                if let Some(grid) = self.grid.as_mut() {
                    grid.reset_grid();
                }
            }
            Command::CycleAt(p) => {
                let Some(grid) = self.grid.as_mut() else {
                    return;
                };

                match grid.board_coords(p, &self.camera) {
                    Ok((x, y)) => {
                        grid.cycle_state(x, y);
                        self.notice = None;
                    }
                    Err(e) => {
                        warn!("{e}");
                        self.notice = Some(e.to_string());
                    }
                }
            }
        }
    }
}
