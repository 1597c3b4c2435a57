//! Button scene — headless walkthrough of load, link and reconcile.
//!
//! Builds a small scene with two overlapping buttons, then feeds a scripted
//! pointer through the frame schedule and logs what each button shows.
//!
//! Run with: `RUST_LOG=debug cargo run -p vellum --example button_scene`

use vellum::button::button_state;
use vellum::prelude::*;

// ── Scene ────────────────────────────────────────────────────────────────

fn button(identifier: &str, x: f32, z_index: i32) -> CompositeDescriptor {
    let face = |suffix: &str, layer: &str| {
        let mut image = ImageDescriptor::new("panel");
        image.item.item_identifier = format!("{identifier}_{suffix}");
        image.item.layer_name = layer.into();
        image
    };

    let mut button = CompositeDescriptor::new(2.0, 1.0);
    button.item.item_identifier = identifier.into();
    button.item.tags = vec!["button".into()];
    button.item.x = x;
    button.item.y = 1.0;
    button.item.z_index = z_index;
    button.layers = vec![
        LayerDescriptor::new("normal", true),
        LayerDescriptor::new("pressed", true),
    ];
    button.composite.images = vec![face("up", "normal"), face("down", "pressed")];
    button
}

fn scene() -> SceneDescriptor {
    let mut root = CompositeDescriptor::new(8.0, 6.0);
    root.composite.composites = vec![button("left", 1.0, 0), button("right", 2.5, 1)];
    SceneDescriptor {
        scene_name: "buttons".into(),
        composite: root,
    }
}

// ── Pointer script ───────────────────────────────────────────────────────

/// (label, pointer down?, screen x, screen y)
const FRAMES: &[(&str, bool, f32, f32)] = &[
    ("idle", false, 0.0, 0.0),
    ("press left only", true, 150.0, 450.0),
    ("drag into overlap", true, 300.0, 450.0),
    ("release", false, 300.0, 450.0),
    ("press overlap", true, 300.0, 450.0),
    ("release", false, 300.0, 450.0),
];

fn main() {
    env_logger::init();

    let mut cache = ResourceCache::new(ProjectInfo {
        pixel_to_world: 100.0,
        original_resolution: Resolution::new("orig", 800, 600, 0),
        resolutions: Vec::new(),
    });
    cache.add_region("panel", 200, 100);

    let mut world = World::new();
    let load = match EntityFactory::new(&cache).load_scene(
        &mut world,
        &scene(),
        Some(ViewPort::new(800.0, 600.0, 100.0)),
    ) {
        Ok(load) => load,
        Err(err) => {
            log::error!("scene failed to load: {err}");
            return;
        }
    };
    log::info!("root {:?}, {} entities", load.root, load.entities.len());

    let buttons = world.entities_with::<Button>();
    world.insert_resource(PointerState::new());

    let mut schedule = Schedule::new();
    schedule
        .add_system(layer_system)
        .add_system(bounding_box_system)
        .add_system(button_system);

    for &(label, down, x, y) in FRAMES {
        let pointer = world.resource_mut::<PointerState>();
        pointer.move_to(x, y);
        if down {
            pointer.touch(x, y);
        } else {
            pointer.lift();
        }

        schedule.run(&mut world);
        world.resource_mut::<PointerState>().end_frame();

        let focus = world.resource::<InputFocus>().holder();
        log::info!("── {label} ── focus: {focus:?}");
        for &entity in &buttons {
            let item = world.component::<MainItem>(entity);
            log::info!(
                "  {:<6} {:?}",
                item.item_identifier,
                button_state(&world, entity)
            );
        }
    }
}
