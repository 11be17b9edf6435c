//! Headless desktop simulator for the orrery display device.
//!
//! Runs the real core scheduler against a simulated panel in accelerated
//! virtual time. A scripted button sequence walks through every mode, then
//! leaves the device idle until it dims and sleeps, then wakes it again.
//! Transitions are logged and each mode is saved as a PNG snapshot.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=debug orrery-simulator [snapshot-dir]
//! ```
//!
//! Set `ORRERY_CONFIG` to the path of a postcard-encoded `DeviceConfig` to
//! override the defaults.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{error, info, warn};

use orrery_core::DeviceConfig;
use orrery_core::hardware::{Button, ButtonPad, IndicatorLed, Panel, WallClock};
use orrery_core::orbital::MeanLongitudeEphemeris;
use orrery_core::sensors::{SensorError, TemperatureSensor};
use orrery_core::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Peripherals, Scheduler};

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// Pixel scale factor for snapshots.
const SNAPSHOT_SCALE: u32 = 2;

/// Virtual time the simulation runs for.
const RUN_FOR: Duration = Duration::from_secs(160);

/// The simulated RTC reads 1970 until this much uptime has passed.
const RTC_SYNC_AFTER: Duration = Duration::from_secs(4);

/// How long a scripted press is held.
const PRESS_HOLD: Duration = Duration::from_millis(200);

/// Button presses, by uptime in seconds.
const PRESSES: &[(u64, Button)] = &[
    (2, Button::B),
    (8, Button::X),
    (12, Button::Y),
    (150, Button::A),
];

/// Snapshots, by uptime in seconds.
const SNAPSHOTS: &[(u64, &str)] = &[
    (1, "greeting"),
    (3, "clock"),
    (11, "thermometer"),
    (20, "solar-system"),
    (60, "solar-system-later"),
    (155, "woken"),
];

// ---------------------------------------------------------------------------
// Simulated peripherals
// ---------------------------------------------------------------------------

/// Simulator display plus a backlight level that is only logged.
struct SimPanel {
    display: SimulatorDisplay<Rgb565>,
    backlight: f32,
}

impl SimPanel {
    fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(
                DISPLAY_WIDTH_PX as u32,
                DISPLAY_HEIGHT_PX as u32,
            )),
            backlight: 0.0,
        }
    }

    fn save_snapshot(&self, path: &Path) {
        let settings = OutputSettingsBuilder::new().scale(SNAPSHOT_SCALE).build();
        match self.display.to_rgb_output_image(&settings).save_png(path) {
            Ok(()) => info!("Saved {} (backlight {:.2})", path.display(), self.backlight),
            Err(e) => error!("Failed to save {}: {}", path.display(), e),
        }
    }
}

impl OriginDimensions for SimPanel {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for SimPanel {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.display.fill_contiguous(area, colors)
    }
}

impl Panel for SimPanel {
    fn set_backlight(&mut self, level: f32) {
        info!("Backlight {:.2}", level);
        self.backlight = level;
    }
}

/// Buttons held according to [`PRESSES`].
#[derive(Default)]
struct ScriptedButtons {
    held: Option<Button>,
}

impl ScriptedButtons {
    fn update(&mut self, uptime: Instant) {
        self.held = PRESSES.iter().find_map(|&(at, button)| {
            let start = Instant::from_secs(at);
            (uptime >= start && uptime < start + PRESS_HOLD).then_some(button)
        });
    }
}

impl ButtonPad for ScriptedButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.held == Some(button)
    }
}

/// On-board sensor drifting slowly around room temperature.
#[derive(Default)]
struct SyntheticSensor {
    reads: u32,
}

impl TemperatureSensor for SyntheticSensor {
    async fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.reads += 1;
        // ~14190 counts is 22C; 12 counts is about half a degree.
        let wobble = (self.reads as f32 / 3.0).sin() * 24.0;
        Ok((14_190.0 + wobble) as u16)
    }
}

/// RTC that reads near 1970 until it "syncs" to host time.
struct SimClock {
    host_epoch: i64,
    uptime: Instant,
}

impl SimClock {
    fn new() -> Self {
        let host_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        Self {
            host_epoch,
            uptime: Instant::from_ticks(0),
        }
    }
}

impl WallClock for SimClock {
    fn now_epoch(&mut self) -> i64 {
        let uptime = self.uptime.as_secs() as i64;
        if self.uptime < Instant::from_ticks(0) + RTC_SYNC_AFTER {
            uptime
        } else {
            self.host_epoch + uptime
        }
    }
}

/// Indicator LED that logs colour changes.
#[derive(Default)]
struct ConsoleLed {
    color: Option<Rgb888>,
}

impl IndicatorLed for ConsoleLed {
    fn set_color(&mut self, color: Rgb888) {
        if self.color != Some(color) {
            info!("LED ({}, {}, {})", color.r(), color.g(), color.b());
        }
        self.color = Some(color);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn load_config() -> Result<DeviceConfig, String> {
    let Ok(path) = std::env::var("ORRERY_CONFIG") else {
        return Ok(DeviceConfig::default());
    };
    let bytes = std::fs::read(&path).map_err(|e| format!("reading {path}: {e}"))?;
    let config = DeviceConfig::from_bytes(&bytes).map_err(|e| format!("{path}: {e}"))?;
    info!("Loaded configuration from {}", path);
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("snapshots"));
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        error!("Cannot create {}: {}", out_dir.display(), e);
        std::process::exit(1);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting orrery simulator: {}x{} panel, {}s of virtual time",
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
        RUN_FOR.as_secs()
    );

    let peripherals = Peripherals {
        panel: SimPanel::new(),
        buttons: ScriptedButtons::default(),
        sensor: SyntheticSensor::default(),
        led: ConsoleLed::default(),
        clock: SimClock::new(),
    };
    let start = Instant::from_ticks(0);
    let mut scheduler = match Scheduler::new(config, peripherals, MeanLongitudeEphemeris, start) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("Boot failed: {}", e);
            std::process::exit(1);
        }
    };

    let end = start + RUN_FOR;
    let mut snapshots = SNAPSHOTS.iter().peekable();
    let mut now = start;

    while now < end {
        let io = scheduler.peripherals_mut();
        io.buttons.update(now);
        io.clock.uptime = now;

        let next = match block_on(scheduler.step(now)) {
            Ok(next) => next,
            Err(e) => {
                error!("Device halted: {}", e);
                std::process::exit(1);
            }
        };

        while let Some(&&(at, name)) = snapshots.peek() {
            if now < Instant::from_secs(at) {
                break;
            }
            let path = out_dir.join(format!("{name}.png"));
            scheduler.peripherals().panel.save_snapshot(&path);
            snapshots.next();
        }

        now = next;
    }

    let state = scheduler.state();
    if scheduler.time_sync_running() {
        warn!("Time sync watchdog still running at exit");
    }
    info!(
        "Finished in {:?} mode; solar system advanced {} days; {} samples read",
        state.modes.mode(),
        state.sim_clock.forward_days(),
        scheduler.peripherals().sensor.reads
    );
}
