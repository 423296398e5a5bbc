//! # Orbit Trace
//!
//! Command-line tool that loads a timeline document and prints the ring
//! layout frame by frame.

use orbitfolio_ui::clock::{FrameSource, ManualClock};
use orbitfolio_ui::widget::{ItemId, OrbitalLayoutEngine, TimelineData};
use orbitfolio_ui::UiConfig;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         ORBITFOLIO ORBIT TRACE                                   ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: orbit_trace <timeline.toml>");
        println!();
        println!("Options:");
        println!("  --config <file>   UI configuration (TOML)");
        println!("  --frames <n>      Frames to simulate (default 240)");
        println!("  --every <n>       Print every n-th frame (default 60)");
        println!("  --select <id>     Select an item before the first frame");
        return;
    }

    let flag = |name: &str| {
        args.iter()
            .position(|a| a == name)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };
    let frames: usize = flag("--frames").and_then(|s| s.parse().ok()).unwrap_or(240);
    let every: usize = flag("--every").and_then(|s| s.parse().ok()).unwrap_or(60).max(1);
    let select: Option<u32> = flag("--select").and_then(|s| s.parse().ok());

    let config = match flag("--config").map(UiConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    let timeline_path = &args[1];
    println!("Loading timeline: {timeline_path}");
    let data = match TimelineData::load(timeline_path) {
        Ok(data) => data,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    let mut engine = OrbitalLayoutEngine::with_config(data.items, config.orbital);

    println!();
    println!("┌─ RING ───────────────────────────────────────────────────────────┐");
    println!("│ Items:              {}", engine.items().len());
    println!("│ Radius:             {} px", engine.config().radius);
    println!("│ Step:               {}° per frame", engine.config().rotation_step);
    println!("│ Reference angle:    {}°", engine.config().reference_angle);
    println!("└──────────────────────────────────────────────────────────────────┘");

    if let Some(id) = select {
        let state = engine.select_item(ItemId(id));
        println!();
        println!(
            "Selected {id}: rotation {:.2}°, highlighted {:?}",
            state.rotation_angle(),
            state.highlighted().iter().map(|h| h.0).collect::<Vec<_>>()
        );
    }

    let mut clock = ManualClock::new();
    for frame in 0..=frames {
        if frame > 0 {
            clock.step(1.0 / 60.0);
            if let Some(stamp) = clock.latest_frame() {
                engine.advance(stamp);
            }
        }
        if frame % every != 0 {
            continue;
        }

        let layout = engine.layout();
        println!();
        println!("── frame {frame:>5}  rotation {:>7.2}° ──", engine.rotation_angle());
        println!(
            "   {:>4}  {:>7}  {:>8}  {:>8}  {:>4}  {:>7}",
            "id", "angle", "x", "y", "z", "opacity"
        );
        for index in layout.paint_order().into_iter().rev() {
            let node = &layout.nodes[index];
            let item = &engine.items()[index];
            let marker = if engine.is_active(item.id) {
                "*"
            } else if engine.is_related_to_active(item.id) {
                "+"
            } else {
                " "
            };
            println!(
                "{marker}  {:>4}  {:>7.2}  {:>8.2}  {:>8.2}  {:>4}  {:>7.3}",
                item.id.0, node.angle, node.x, node.y, node.z_index, node.opacity
            );
        }
    }
}
