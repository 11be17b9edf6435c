//! Cooperative scheduler for the render loop, sampler, and time-sync watchdog
//!
//! All three tasks share one execution context. The platform calls
//! [`Scheduler::step`] and sleeps until the deadline it returns; nothing
//! runs in between. Within a step the render loop goes first, then the
//! sampler, then the watchdog, each only if it is due.

use core::fmt::Debug;

use embassy_time::{Duration, Instant};
use log::{error, info, warn};

use crate::app_state::{AppError, DeviceState};
use crate::config::DeviceConfig;
use crate::hardware::{ButtonPad, IndicatorLed, Panel, WallClock};
use crate::mode::Mode;
use crate::orbital::Ephemeris;
use crate::sensors::TemperatureSensor;
use crate::tasks::{RenderLoop, TemperatureSampler, TimeSyncWatchdog, Yield};

/// Board peripherals handed to the scheduler at boot.
pub struct Peripherals<P, B, S, L, C> {
    pub panel: P,
    pub buttons: B,
    pub sensor: S,
    pub led: L,
    pub clock: C,
}

pub struct Scheduler<P, B, S, L, C, E> {
    state: DeviceState,
    render: RenderLoop<E>,
    sampler: TemperatureSampler,
    watchdog: TimeSyncWatchdog,
    io: Peripherals<P, B, S, L, C>,
    next_render: Option<Instant>,
    next_sample: Option<Instant>,
    next_sync: Option<Instant>,
}

impl<P, B, S, L, C, E> Scheduler<P, B, S, L, C, E>
where
    P: Panel,
    P::Error: Debug,
    B: ButtonPad,
    S: TemperatureSensor,
    L: IndicatorLed,
    C: WallClock,
    E: Ephemeris,
{
    /// Boot into the greeting page at full backlight with every task due now.
    pub fn new(
        config: DeviceConfig,
        mut io: Peripherals<P, B, S, L, C>,
        ephemeris: E,
        now: Instant,
    ) -> Result<Self, AppError> {
        let wall_epoch = io.clock.now_epoch();
        let state = DeviceState::new(config, Mode::Greeting, now, wall_epoch)?;
        io.panel.set_backlight(state.config.full_backlight);

        info!("Scheduler starting at wall epoch {}", wall_epoch);
        Ok(Self {
            render: RenderLoop::new(ephemeris, state.config.tick_period()),
            sampler: TemperatureSampler::new(state.config.sample_interval()),
            watchdog: TimeSyncWatchdog::new(&state.config),
            state,
            io,
            next_render: Some(now),
            next_sample: Some(now),
            next_sync: Some(now),
        })
    }

    /// Run every task that is due at `now` and return the earliest next deadline.
    ///
    /// A sensor failure aborts the step and is returned; the device is
    /// expected to halt on it.
    pub async fn step(&mut self, now: Instant) -> Result<Instant, AppError> {
        let tick = self.state.config.tick_period();

        if let Some(due) = Self::take_due(&mut self.next_render, now, tick, "render") {
            let sleep = self.render.tick(
                &mut self.state,
                &mut self.io.panel,
                &mut self.io.buttons,
                &mut self.io.clock,
                due,
            );
            self.next_render = Self::reschedule(sleep, now);
        }

        if Self::take_due(&mut self.next_sample, now, tick, "sampler").is_some() {
            let sleep = self
                .sampler
                .step(&mut self.io.sensor, &self.state)
                .await
                .inspect_err(|e| error!("Temperature sampler halted: {}", e))?;
            self.next_sample = Self::reschedule(sleep, now);
        }

        if Self::take_due(&mut self.next_sync, now, tick, "time sync").is_some() {
            let sleep = self.watchdog.step(&mut self.io.led, &mut self.io.clock);
            self.next_sync = Self::reschedule(sleep, now);
        }

        Ok(self.next_deadline().unwrap_or(now + tick))
    }

    /// Earliest pending deadline across the tasks still running.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.next_render, self.next_sample, self.next_sync]
            .into_iter()
            .flatten()
            .min()
    }

    /// Whether the watchdog task is still running.
    pub fn time_sync_running(&self) -> bool {
        self.next_sync.is_some()
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn render_loop(&self) -> &RenderLoop<E> {
        &self.render
    }

    pub fn peripherals(&self) -> &Peripherals<P, B, S, L, C> {
        &self.io
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<P, B, S, L, C> {
        &mut self.io
    }

    /// Returns `now` if the task is due, warning when it is more than one
    /// tick late.
    fn take_due(
        deadline: &mut Option<Instant>,
        now: Instant,
        tick: Duration,
        task: &str,
    ) -> Option<Instant> {
        let due = (*deadline)?;
        if now < due {
            return None;
        }
        let late = now - due;
        if late > tick {
            warn!("Task {} overran by {}ms", task, late.as_millis());
        }
        Some(now)
    }

    fn reschedule(sleep: Yield, now: Instant) -> Option<Instant> {
        match sleep {
            Yield::For(duration) => Some(now + duration),
            Yield::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::Button;
    use crate::mode::Activity;
    use crate::orbital::MeanLongitudeEphemeris;
    use crate::palette;
    use crate::sensors::SensorError;
    use embassy_futures::block_on;
    use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    #[derive(Default)]
    struct FakePanel {
        backlight: std::vec::Vec<f32>,
        flushes: usize,
    }

    impl OriginDimensions for FakePanel {
        fn size(&self) -> Size {
            Size::new(240, 135)
        }
    }

    impl DrawTarget for FakePanel {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, _area: &Rectangle, _colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.flushes += 1;
            Ok(())
        }
    }

    impl Panel for FakePanel {
        fn set_backlight(&mut self, level: f32) {
            self.backlight.push(level);
        }
    }

    #[derive(Default)]
    struct Pad(Option<Button>);

    impl ButtonPad for Pad {
        fn is_pressed(&mut self, button: Button) -> bool {
            self.0 == Some(button)
        }
    }

    /// Replays raw readings in order, failing once they run out.
    struct ScriptedSensor {
        readings: std::vec::Vec<u16>,
        reads: usize,
    }

    impl TemperatureSensor for ScriptedSensor {
        async fn read_raw(&mut self) -> Result<u16, SensorError> {
            let reading = self.readings.get(self.reads).copied();
            self.reads += 1;
            reading.ok_or(SensorError::ReadFailed {
                sensor: "onboard",
                details: "adc fault",
            })
        }
    }

    #[derive(Default)]
    struct Led(std::vec::Vec<Rgb888>);

    impl IndicatorLed for Led {
        fn set_color(&mut self, color: Rgb888) {
            self.0.push(color);
        }
    }

    struct Clock(i64);

    impl WallClock for Clock {
        fn now_epoch(&mut self) -> i64 {
            self.0
        }
    }

    type TestScheduler =
        Scheduler<FakePanel, Pad, ScriptedSensor, Led, Clock, MeanLongitudeEphemeris>;

    fn scheduler(readings: std::vec::Vec<u16>, epoch: i64) -> TestScheduler {
        try_scheduler(DeviceConfig::default(), readings, epoch).unwrap()
    }

    fn try_scheduler(
        config: DeviceConfig,
        readings: std::vec::Vec<u16>,
        epoch: i64,
    ) -> Result<TestScheduler, AppError> {
        Scheduler::new(
            config,
            Peripherals {
                panel: FakePanel::default(),
                buttons: Pad::default(),
                sensor: ScriptedSensor { readings, reads: 0 },
                led: Led::default(),
                clock: Clock(epoch),
            },
            MeanLongitudeEphemeris,
            Instant::from_secs(0),
        )
    }

    /// Step through virtual time, sleeping to each returned deadline.
    fn run_until(scheduler: &mut TestScheduler, mut now: Instant, until: Instant) -> Instant {
        while now < until {
            now = block_on(scheduler.step(now)).unwrap();
        }
        now
    }

    #[test]
    fn test_boot_at_full_backlight_on_greeting() {
        let mut scheduler = scheduler(std::vec![20_000; 4], 1_700_000_000);
        let next = block_on(scheduler.step(Instant::from_secs(0))).unwrap();

        assert_eq!(next, Instant::from_millis(100));
        assert_eq!(scheduler.peripherals().panel.backlight, [0.5]);
        assert_eq!(scheduler.state().modes.mode(), Mode::Greeting);
        assert_eq!(
            scheduler.render_loop().frame().pixel(Point::zero()),
            Some(palette::DARK_GREEN)
        );
    }

    #[test]
    fn test_idle_dims_to_zero_then_sleeps_without_rendering() {
        let mut scheduler = scheduler(std::vec![20_000; 100], 1_700_000_000);
        let now = run_until(&mut scheduler, Instant::from_secs(0), Instant::from_secs(120));
        assert_eq!(scheduler.peripherals().panel.backlight, [0.5]);
        assert_eq!(scheduler.state().modes.activity(), Activity::Active);

        let now = run_until(&mut scheduler, now, Instant::from_secs(125));
        let levels = &scheduler.peripherals().panel.backlight;
        assert_eq!(levels.len(), 11, "full level plus ten dim steps");
        assert!(levels.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(levels.last(), Some(&0.0));
        assert_eq!(scheduler.state().modes.activity(), Activity::Sleeping);
        assert_eq!(scheduler.state().modes.mode(), Mode::Sleeping);

        let flushes = scheduler.peripherals().panel.flushes;
        let now = run_until(&mut scheduler, now, Instant::from_secs(200));
        assert_eq!(scheduler.peripherals().panel.flushes, flushes);
        assert_eq!(scheduler.peripherals().panel.backlight.len(), 11);

        // Sampling carries on while asleep.
        assert!(scheduler.peripherals().sensor.reads > 25);

        scheduler.peripherals_mut().buttons.0 = Some(Button::Y);
        block_on(scheduler.step(now)).unwrap();
        assert_eq!(scheduler.state().modes.mode(), Mode::SolarSystem);
        assert_eq!(scheduler.peripherals().panel.backlight.last(), Some(&0.5));
        assert_eq!(scheduler.state().sim_clock.forward_days(), 1);
    }

    #[test]
    fn test_thermometer_shows_freshest_sample() {
        // raw 0 -> 437.2C, raw 65535 -> -1480.3C
        let mut scheduler = scheduler(std::vec![0, 65_535, 65_535], 1_700_000_000);
        scheduler.peripherals_mut().buttons.0 = Some(Button::X);

        // Sampler runs after the render in the same step, so the first frame
        // has nothing to show yet.
        block_on(scheduler.step(Instant::from_secs(0))).unwrap();
        assert_eq!(scheduler.render_loop().pages().thermometer().shown(), "--.-C");

        block_on(scheduler.step(Instant::from_millis(100))).unwrap();
        assert_eq!(scheduler.render_loop().pages().thermometer().shown(), "437.2C");

        run_until(&mut scheduler, Instant::from_millis(200), Instant::from_secs(6));
        assert_eq!(scheduler.render_loop().pages().thermometer().shown(), "-1480.3C");
    }

    #[test]
    fn test_sensor_failure_is_fatal() {
        let mut scheduler = scheduler(std::vec![], 1_700_000_000);
        let result = block_on(scheduler.step(Instant::from_secs(0)));
        assert!(matches!(result, Err(AppError::Sensor(_))));
    }

    #[test]
    fn test_watchdog_blinks_until_synchronized_then_finishes() {
        let mut scheduler = scheduler(std::vec![20_000; 100], 0);
        let now = run_until(&mut scheduler, Instant::from_secs(0), Instant::from_secs(5));
        let alerts = scheduler
            .peripherals()
            .led
            .0
            .iter()
            .filter(|c| **c == palette::LED_ALERT)
            .count();
        assert!(alerts >= 6, "expected at least two bursts, saw {alerts} pulses");
        assert!(scheduler.time_sync_running());

        scheduler.peripherals_mut().clock.0 = 1_609_545_601;
        let now = run_until(&mut scheduler, now, Instant::from_secs(8));
        assert_eq!(scheduler.peripherals().led.0.last(), Some(&palette::LED_OK));

        run_until(&mut scheduler, now, Instant::from_secs(20));
        assert_eq!(scheduler.peripherals().led.0.last(), Some(&palette::LED_OFF));
        assert!(!scheduler.time_sync_running());
    }

    #[test]
    fn test_next_deadline_is_earliest_task() {
        let mut scheduler = scheduler(std::vec![20_000; 4], 1_700_000_000);
        block_on(scheduler.step(Instant::from_secs(0))).unwrap();
        // render 100ms, sampler 5s, watchdog hold 10s
        assert_eq!(scheduler.next_deadline(), Some(Instant::from_millis(100)));
    }

    #[test]
    fn test_rejects_watchdog_config_that_never_sleeps() {
        let config = DeviceConfig {
            sync_pulses: 0,
            sync_pause_ms: 0,
            ..DeviceConfig::default()
        };
        let result = try_scheduler(config, std::vec![20_000; 4], 0);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_unsynchronized_clock_always_moves_time_forward() {
        let mut scheduler = scheduler(std::vec![20_000; 100], 0);
        let mut now = Instant::from_secs(0);
        for _ in 0..200 {
            let next = block_on(scheduler.step(now)).unwrap();
            assert!(next > now, "deadline stuck at {now:?}");
            now = next;
        }
    }
}
