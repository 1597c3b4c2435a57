//! Load → link → reconcile, end to end, through the public API.

use vellum::prelude::*;

const SCENE: &str = r#"{
    "scene_name": "title",
    "composite": {
        "width": 8.0,
        "height": 6.0,
        "layers": [
            { "name": "Default", "is_visible": true },
            { "name": "hud", "is_visible": false }
        ],
        "composite": {
            "images": [
                { "item_identifier": "backdrop", "image_name": "sky", "z_index": 2 },
                { "item_identifier": "logo", "image_name": "logo", "layer_name": "hud", "z_index": 1 }
            ],
            "composites": [{
                "item_identifier": "play",
                "tags": ["button"],
                "x": 2.0,
                "y": 1.0,
                "width": 2.0,
                "height": 1.0,
                "layers": [
                    { "name": "normal", "is_visible": true },
                    { "name": "pressed", "is_visible": true }
                ],
                "composite": {
                    "images": [
                        { "item_identifier": "play_up", "image_name": "button", "layer_name": "normal" },
                        { "item_identifier": "play_down", "image_name": "button", "layer_name": "pressed" }
                    ]
                }
            }]
        }
    }
}"#;

const PROJECT: &str = r#"{
    "pixel_to_world": 100.0,
    "original_resolution": { "name": "orig", "width": 800, "height": 600 }
}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn resources() -> ResourceCache {
    let mut cache = ResourceCache::new(ProjectInfo::from_json(PROJECT).unwrap());
    cache.add_region("sky", 800, 600);
    cache.add_region("logo", 300, 100);
    cache.add_region("button", 200, 100);
    cache.add_region("button.normal", 200, 100);
    cache
}

struct Loaded {
    world: World,
    schedule: Schedule,
    root: Entity,
}

fn load() -> Loaded {
    init_logging();
    let scene = SceneDescriptor::from_json(SCENE).unwrap();
    let cache = resources();
    let mut world = World::new();
    let load = EntityFactory::new(&cache)
        .load_scene(&mut world, &scene, Some(ViewPort::new(800.0, 600.0, 100.0)))
        .unwrap();
    assert!(load.skipped.is_empty());
    world.insert_resource(PointerState::new());

    let mut schedule = Schedule::new();
    schedule
        .add_system(layer_system)
        .add_system(bounding_box_system)
        .add_system(button_system);

    Loaded {
        world,
        schedule,
        root: load.root,
    }
}

fn find(world: &World, identifier: &str) -> Entity {
    world
        .entities_with::<MainItem>()
        .into_iter()
        .find(|&e| world.component::<MainItem>(e).item_identifier == identifier)
        .unwrap_or_else(|| panic!("no entity `{identifier}`"))
}

fn visible(world: &World, identifier: &str) -> bool {
    world.component::<MainItem>(find(world, identifier)).visible
}

#[test]
fn scene_components_are_composed() {
    let Loaded { world, root, .. } = load();

    let backdrop = find(&world, "backdrop");
    let dims = world.component::<Dimensions>(backdrop);
    assert_eq!((dims.width, dims.height), (8.0, 6.0));
    assert_eq!(world.component::<ZIndex>(backdrop).layer_name, DEFAULT_LAYER);
    assert_eq!(world.component::<ParentNode>(backdrop).0, root);

    let up = find(&world, "play_up");
    assert!(world.has::<NormalMapRendering>(up));
    assert!(!world.has::<NormalMapRendering>(backdrop));

    // Inherited from the root's own "Default" layer, not the item's "hud".
    assert!(visible(&world, "logo"));
}

#[test]
fn layer_system_orders_root_children() {
    let Loaded {
        mut world,
        mut schedule,
        root,
    } = load();
    let before = world.component::<Node>(root).children.clone();

    schedule.run(&mut world);

    let after = &world.component::<Node>(root).children;
    assert_eq!(before.len(), after.len());
    // "Default" before "hud"; within "Default" the button (z 0) before the
    // backdrop (z 2).
    assert_eq!(
        after,
        &vec![find(&world, "play"), find(&world, "backdrop"), find(&world, "logo")]
    );

    // Layer order never changes visibility.
    assert!(visible(&world, "logo"));
    refresh_layer_visibility(&mut world, root);
    assert!(!visible(&world, "logo"));
}

#[test]
fn button_press_release_and_toggle() {
    let Loaded {
        mut world,
        mut schedule,
        ..
    } = load();
    let play = find(&world, "play");

    schedule.run(&mut world);
    assert!(visible(&world, "play_up"));
    assert!(!visible(&world, "play_down"));

    // The button covers scene x 2..4, y 1..2. Scene (3, 1.5) is screen
    // (300, 450).
    world.resource_mut::<PointerState>().touch(300.0, 450.0);
    schedule.run(&mut world);
    assert_eq!(world.resource::<InputFocus>().holder(), Some(play));
    assert!(!visible(&world, "play_up"));
    assert!(visible(&world, "play_down"));

    world.resource_mut::<PointerState>().lift();
    schedule.run(&mut world);
    assert_eq!(world.resource::<InputFocus>().holder(), None);
    assert!(visible(&world, "play_up"));
    assert!(!visible(&world, "play_down"));

    world.component_mut::<Button>(play).toggle();
    schedule.run(&mut world);
    assert!(!visible(&world, "play_up"));
    assert!(visible(&world, "play_down"));
}

#[test]
fn press_outside_the_button_does_nothing() {
    let Loaded {
        mut world,
        mut schedule,
        ..
    } = load();

    // Scene (5, 1.5): right of the button.
    world.resource_mut::<PointerState>().touch(500.0, 450.0);
    schedule.run(&mut world);
    assert_eq!(world.resource::<InputFocus>().holder(), None);
    assert!(visible(&world, "play_up"));
}

#[test]
fn bounding_boxes_are_in_scene_space() {
    let Loaded {
        mut world,
        mut schedule,
        ..
    } = load();
    schedule.run(&mut world);

    let down = find(&world, "play_down");
    let bbox = world.component::<BoundingBox>(down);
    assert_eq!(bbox.rect.min, Vec2::new(2.0, 1.0));
    assert_eq!(bbox.rect.max, Vec2::new(4.0, 2.0));
}
