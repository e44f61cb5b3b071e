//! Headless orrery session: drives the engine on a virtual 60 Hz clock
//! through a short scripted interaction and logs what happened.

use std::time::Duration;

use anyhow::{Context, Result};
use catalogue::StarField;
use engine_core::{DVec2, Time};
use input::{PointerSample, WheelInput};
use orrery::{Controls, HoverChange, Orrery, OrreryConfig, StarMap};
use renderer::CountingCanvas;

const FRAME: Duration = Duration::from_micros(16_667);
const STAR_MAP_FRAMES: u32 = 120;
const STAR_FIELD_SEED: u64 = 0x5EED;

fn mouse(p: DVec2) -> PointerSample {
    PointerSample::Mouse(p)
}

/// Scripted input for frame `n` of the solar-system session.
fn script(n: u32, orrery: &mut Orrery, controls: &mut Controls) -> Result<()> {
    let earth = orrery
        .system()
        .id_of("Earth")
        .context("built-in catalogue has no Earth")?;
    match n {
        60 => {
            if let Some(area) = orrery.hit_areas().get(earth).copied() {
                let change = orrery.pointer_move(&mouse(area.center));
                log::info!("pointer over Earth: {:?}", change);
            }
        }
        150 => orrery.cycle_layer(earth),
        200 => {
            if let Some(area) = orrery.hit_areas().get(earth).copied() {
                orrery.pointer_down(&mouse(area.center));
                orrery.pointer_up(&mouse(area.center));
            }
        }
        300 => {
            if let HoverChange::Left(id) = orrery.pointer_move(&mouse(DVec2::new(4.0, 4.0))) {
                log::info!("pointer left {}", orrery.system().name(id));
            }
        }
        400..=420 => controls.wheel(orrery, WheelInput::vertical(120.0)),
        450..=470 => controls.wheel(orrery, WheelInput::horizontal(40.0)),
        _ => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = OrreryConfig::load();
    let mut orrery = Orrery::with_builtin_data(&config)?;
    let mut controls = Controls::new(orrery.sim());
    let mut canvas = CountingCanvas::new();
    let mut time = Time::manual();

    let mut redrawn = 0u32;
    let mut advanced = 0u32;
    for n in 0..config.headless_frames {
        script(n, &mut orrery, &mut controls)?;
        time.update();
        let outcome = orrery.frame(time.now(), &mut canvas);
        redrawn += outcome.redrawn as u32;
        advanced += outcome.advanced as u32;
        time.advance(FRAME);
    }

    let readouts = controls.readouts(&orrery);
    log::info!(
        "solar system: {} frames, {} redrawn, {} advanced, {:.1} days simulated",
        config.headless_frames,
        redrawn,
        advanced,
        orrery.sim().time
    );
    log::info!(
        "center {}, view {:?}, scale {}, time {}, orbit bar {}, size bar {}",
        orrery.system().name(orrery.center().effective()),
        orrery.sim().view_mode,
        readouts.scale,
        readouts.time_speed,
        readouts.orbit_scale,
        readouts.planet_scale
    );
    log::info!(
        "primitives: {} circles, {} polylines, {} texts, {} rects",
        canvas.circles,
        canvas.polylines,
        canvas.texts,
        canvas.rects
    );

    let viewport = orrery.viewport();
    let mut map = StarMap::new(StarField::generate(STAR_FIELD_SEED, 400, 30.0), viewport);
    let mut map_canvas = CountingCanvas::new();
    let mut map_time = Time::manual();
    let mut map_frames = 0u32;
    for _ in 0..STAR_MAP_FRAMES {
        map_time.update();
        map_frames += map.tick(map_time.now(), &mut map_canvas) as u32;
        map_time.advance(FRAME);
    }
    let summary = map.summary();
    log::info!(
        "star map: {} of {} stars within {} ly, rotation {}°, {} frames drawn",
        summary.visible,
        summary.total,
        map.max_distance,
        map.view.rotation.round(),
        map_frames
    );

    Ok(())
}
