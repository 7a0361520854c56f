#![forbid(unsafe_code)]

//! Headless wheelpick demo.
//!
//! Builds an hours wheel and a minutes wheel on one update thread, wires
//! them to simulated viewports, and plays a short scripted session against
//! them: taps, a fling, a programmatic select. Every selector event is
//! logged; set `RUST_LOG=wheelpick_widgets=debug` to see the state machine.

mod sim;

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use wheelpick_runtime::{Flow, FrameTicker, SelectorMessage, UpdateThread, apply_message};
use wheelpick_widgets::{
    ActivationCoordinator, ConfigError, ScrollViewport, SelectorConfig, WheelSelector,
};

use crate::sim::SimViewport;

const VIEWPORT_HEIGHT: f64 = 300.0;

#[derive(Debug, Parser)]
#[command(
    name = "wheelpick-demo",
    about = "Drive two sibling wheel selectors through a scripted session",
    version
)]
struct Args {
    /// Selector config file (`.json` is read as JSON, anything else as TOML).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Items per wheel.
    #[arg(long, default_value_t = 12)]
    items: usize,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Lose the settled notification of every selector-issued scroll, so
    /// snaps only end through the fail-safe.
    #[arg(long)]
    drop_settles: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wheel {
    Hours,
    Minutes,
}

impl Wheel {
    fn name(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
        }
    }
}

#[derive(Debug)]
enum DemoMessage {
    Frame(Duration),
    Selector(Wheel, SelectorMessage<String>),
    Fling { wheel: Wheel, to: f64 },
    Quit,
}

type Selector = WheelSelector<String, SimViewport>;

struct Session {
    hours: Selector,
    minutes: Selector,
}

impl Session {
    fn build(
        config: SelectorConfig,
        items: usize,
        drop_settles: bool,
    ) -> Result<Self, ConfigError> {
        let coordinator = Rc::new(ActivationCoordinator::new());
        let content_height = items as f64 * config.item_layout().slot_height();
        let build_one = |wheel: Wheel| -> Result<Selector, ConfigError> {
            let mut selector = WheelSelector::new(config.clone(), Rc::clone(&coordinator))?;
            selector.set_items((0..items).map(|i| format!("{i:02}")));
            selector.attach(
                SimViewport::new(wheel.name(), VIEWPORT_HEIGHT, content_height)
                    .dropping_settles(drop_settles),
            );
            Ok(selector)
        };
        Ok(Self {
            hours: build_one(Wheel::Hours)?,
            minutes: build_one(Wheel::Minutes)?,
        })
    }

    fn selector_mut(&mut self, wheel: Wheel) -> &mut Selector {
        match wheel {
            Wheel::Hours => &mut self.hours,
            Wheel::Minutes => &mut self.minutes,
        }
    }

    fn handle(&mut self, msg: DemoMessage) -> Flow {
        match msg {
            DemoMessage::Frame(dt) => {
                for wheel in [Wheel::Hours, Wheel::Minutes] {
                    frame(wheel, self.selector_mut(wheel), dt);
                }
            }
            DemoMessage::Selector(wheel, msg) => {
                let selector = self.selector_mut(wheel);
                if let Some(outcome) = apply_message(selector, msg) {
                    tracing::info!(wheel = wheel.name(), ?outcome, "tap");
                }
                report_events(wheel, selector);
            }
            DemoMessage::Fling { wheel, to } => {
                let accepted = self
                    .selector_mut(wheel)
                    .host_mut()
                    .is_some_and(|viewport| viewport.fling_to(to));
                tracing::info!(wheel = wheel.name(), to, accepted, "fling");
            }
            DemoMessage::Quit => {
                self.summarize();
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    fn summarize(&self) {
        for (wheel, selector) in [(Wheel::Hours, &self.hours), (Wheel::Minutes, &self.minutes)] {
            let shown = selector.placeholder_content().map(String::as_str);
            tracing::info!(
                wheel = wheel.name(),
                selected = ?selector.selected_index(),
                shown,
                active = selector.is_active(),
                opacity = selector.opacity(),
                phase = ?selector.phase(),
                "final state"
            );
            if let Some(viewport) = selector.host() {
                tracing::info!(
                    viewport = viewport.name(),
                    offset = viewport.scroll_offset(),
                    opacity = viewport.opacity(),
                    placeholder = viewport.is_placeholder_visible(),
                    hit_testable = viewport.is_hit_testable(),
                    "final viewport"
                );
            }
        }
    }
}

fn frame(wheel: Wheel, selector: &mut Selector, dt: Duration) {
    let notices = selector
        .host_mut()
        .map(|viewport| viewport.advance(dt))
        .unwrap_or_default();
    for notice in notices {
        selector.on_offset_changing(notice.offset, notice.settled);
    }
    selector.tick(dt);
    report_events(wheel, selector);
}

fn report_events(wheel: Wheel, selector: &mut Selector) {
    for event in selector.drain_events() {
        tracing::info!(wheel = wheel.name(), ?event, "selector event");
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SelectorConfig> {
    let Some(path) = path else {
        return Ok(SelectorConfig::default());
    };
    let loaded = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => SelectorConfig::from_json_file(path),
        _ => SelectorConfig::from_toml_file(path),
    };
    loaded.with_context(|| format!("loading selector config from {}", path.display()))
}

/// The scripted session: how long to wait, then what to post.
fn script(slot: f64) -> Vec<(Duration, DemoMessage)> {
    let centre = |index: usize| (index as f64 + 0.5) * slot;
    let ms = Duration::from_millis;
    vec![
        (ms(100), DemoMessage::Selector(Wheel::Hours, SelectorMessage::Tap { y: centre(0) })),
        (ms(300), DemoMessage::Selector(Wheel::Hours, SelectorMessage::Tap { y: centre(3) })),
        (ms(800), DemoMessage::Fling { wheel: Wheel::Minutes, to: 4.3 * slot }),
        (ms(800), DemoMessage::Selector(Wheel::Minutes, SelectorMessage::Tap { y: centre(4) })),
        (ms(600), DemoMessage::Selector(Wheel::Hours, SelectorMessage::Select(7))),
        (ms(1000), DemoMessage::Quit),
    ]
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    let slot = config.item_layout().slot_height();
    let (items, drop_settles) = (args.items, args.drop_settles);

    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), ConfigError>>();
    let update = UpdateThread::spawn(move |_| {
        let mut session = match Session::build(config, items, drop_settles) {
            Ok(session) => {
                let _ = ready_tx.send(Ok(()));
                Some(session)
            }
            Err(err) => {
                let _ = ready_tx.send(Err(err));
                None
            }
        };
        move |msg: DemoMessage| match session.as_mut() {
            Some(session) => session.handle(msg),
            None => Flow::Stop,
        }
    })
    .context("spawning update thread")?;

    ready_rx
        .recv()
        .map_err(|_| anyhow!("update thread exited before building selectors"))?
        .context("building selectors")?;

    let ticker = FrameTicker::start(
        Duration::from_millis(args.frame_ms.max(1)),
        update.dispatcher(),
        DemoMessage::Frame,
    )
    .context("starting frame ticker")?;

    for (wait, msg) in script(slot) {
        thread::sleep(wait);
        if !update.post(msg) {
            break;
        }
    }

    if !update.join() {
        return Err(anyhow!("update thread panicked"));
    }
    ticker.stop();
    Ok(())
}
