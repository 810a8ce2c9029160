//! Headless integration tests for Kindle.
//!
//! These drive the session through a Bevy `App` with `MinimalPlugins`: no
//! window, GPU or input devices. Intents are queued on `FrameInput` the way
//! the input plugin would, and `advance_session` runs in `Update`, so each
//! `app.update()` is exactly one simulation tick.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::path::PathBuf;

use kindle::config::GameConfig;
use kindle::enemies::{Enemy, Species, WolfVariant};
use kindle::player::Inventory;
use kindle::save::read_slots;
use kindle::session::{advance_session, sync_game_state, GameSession};
use kindle::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// A seeded session writing saves into `save_path`, with only the
/// simulation systems registered.
fn build_test_app(save_path: PathBuf) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Session Resources (mirrors SessionPlugin) ────────────────────────
    let config = GameConfig::seeded(2024, save_path);
    app.insert_resource(GameSession::new(config.clone()))
        .insert_resource(config)
        .init_resource::<FrameInput>();

    app.add_systems(Update, (advance_session, sync_game_state).chain());
    app
}

fn scratch_app() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = build_test_app(dir.path().join("savegame.json"));
    (dir, app)
}

/// Queues `intents` and runs one tick.
fn send(app: &mut App, intents: &[Intent]) {
    app.world_mut()
        .resource_mut::<FrameInput>()
        .intents
        .extend_from_slice(intents);
    app.update();
}

fn hold(app: &mut App, axis: Vec2, ticks: usize) {
    app.world_mut().resource_mut::<FrameInput>().movement = axis;
    for _ in 0..ticks {
        app.update();
    }
    app.world_mut().resource_mut::<FrameInput>().movement = Vec2::ZERO;
}

fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

fn session_mut(app: &mut App) -> Mut<'_, GameSession> {
    app.world_mut().resource_mut::<GameSession>()
}

fn started(app: &mut App) {
    send(app, &[Intent::NewGame]);
    assert_eq!(session(app).mode(), UiMode::Play);
}

// ─────────────────────────────────────────────────────────────────────────────
// Modes and Game State
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_game_state_follows_the_session_mode() {
    let (_dir, mut app) = scratch_app();
    app.update();
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::MainMenu);

    started(&mut app);
    app.update();
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Playing);
}

#[test]
fn test_intents_are_consumed_once() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    assert!(app.world().resource::<FrameInput>().intents.is_empty());

    send(&mut app, &[Intent::ToggleMap]);
    assert!(session(&app).show_map);
    app.update();
    assert!(session(&app).show_map, "toggle must not repeat without a new press");
}

#[test]
fn test_empty_fire_ends_the_run_on_the_next_tick() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);

    session_mut(&mut app).fire.set(0.0);
    assert_eq!(session(&app).mode(), UiMode::Play);
    app.update();
    assert_eq!(session(&app).mode(), UiMode::GameOver);
    app.update();
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::GameOver);

    send(&mut app, &[Intent::Restart]);
    assert_eq!(session(&app).mode(), UiMode::Menu);
}

// ─────────────────────────────────────────────────────────────────────────────
// Hub
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_origin_room_is_bare() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    let room = session(&app).current_room().expect("hub is loaded");
    assert!(room.is_hub());
    assert_eq!(room.entity_count(), 0);
    assert!(room.mud_patches.is_empty() && room.water_tiles.is_empty());
}

#[test]
fn test_empty_handed_interact_at_the_fire_lights_a_torch() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    send(&mut app, &[Intent::Interact]);

    let s = session(&app);
    let torch = s.player.torch.expect("torch lit");
    assert!(torch.health > 99.0);
    assert_eq!(s.dialogue.text(), Some("Torch Lit."));
}

#[test]
fn test_feeding_raises_the_fire_by_one_log() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    {
        let mut s = session_mut(&mut app);
        s.fire.set(40.0);
        s.player.inventory = Inventory::from(vec![ItemKind::Wood]);
    }
    send(&mut app, &[Intent::Interact]);
    let s = session(&app);
    assert!((s.fire.level() - (40.0 + 15.0 - 0.005)).abs() < 1e-3);
    assert!(s.player.inventory.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Crafting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_crafting_is_all_or_nothing() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    session_mut(&mut app).player.inventory =
        Inventory::from(vec![ItemKind::Wood, ItemKind::Wood, ItemKind::Wood, ItemKind::Fur]);

    send(&mut app, &[Intent::ToggleCrafting]);
    send(&mut app, &[Intent::Craft(Recipe::Tent)]);
    let s = session(&app);
    assert_eq!(s.player.inventory.len(), 4);
    assert_eq!(s.mode(), UiMode::Play);
    assert_eq!(s.dialogue.text(), Some("Not enough materials."));
}

#[test]
fn test_crafting_pauses_the_world() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    send(&mut app, &[Intent::ToggleCrafting]);
    let before = session(&app).fire.level();
    let pos = session(&app).player.pos;

    hold(&mut app, Vec2::new(1.0, 0.0), 30);
    assert_eq!(session(&app).fire.level(), before);
    assert_eq!(session(&app).player.pos, pos);
}

// ─────────────────────────────────────────────────────────────────────────────
// Exploration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_movement_walks_at_base_speed() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    let start = session(&app).player.pos;
    hold(&mut app, Vec2::new(1.0, 0.0), 10);
    let moved = session(&app).player.pos - start;
    assert!((moved.x - 30.0).abs() < 1e-3);
    assert_eq!(moved.y, 0.0);
    assert_eq!(session(&app).player.facing, Facing::Right);
}

#[test]
fn test_revisiting_a_room_returns_the_same_room() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    session_mut(&mut app).player.pos = Vec2::new(SCREEN_WIDTH - 2.0, SCREEN_HEIGHT - 40.0);
    hold(&mut app, Vec2::new(1.0, 0.0), 1);
    assert_eq!(session(&app).current_coord(), RoomCoord(1, 0));

    let first: Vec<_> = session(&app)
        .current_room()
        .map(|room| room.obstacles.clone())
        .unwrap_or_default();

    {
        let mut s = session_mut(&mut app);
        s.load_room(RoomCoord::HUB);
        s.load_room(RoomCoord(1, 0));
    }
    let again = session(&app).current_room().map(|room| room.obstacles.clone());
    assert_eq!(again, Some(first));
    assert_eq!(session(&app).world.len(), 2);
}

#[test]
fn test_slain_enemies_leave_the_room() {
    let (_dir, mut app) = scratch_app();
    started(&mut app);
    {
        let mut s = session_mut(&mut app);
        s.player.facing = Facing::Right;
        let p = s.player.pos;
        let mut wolf = Enemy::with_variant(p + Vec2::new(12.0, -15.0), Species::Wolf, Some(WolfVariant::Brown));
        wolf.hp = 1;
        s.world
            .get_mut(RoomCoord::HUB)
            .expect("hub")
            .enemies
            .push(wolf);
    }
    send(&mut app, &[Intent::Attack]);
    let s = session(&app);
    assert!(s.current_room().expect("hub").enemies.is_empty());
    assert!(s.dialogue.text().is_some_and(|t| t.starts_with("Slain")));
}

// ─────────────────────────────────────────────────────────────────────────────
// Save / Load
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tent_save_then_load_from_the_menu() {
    let (dir, mut app) = scratch_app();
    started(&mut app);
    {
        let mut s = session_mut(&mut app);
        s.fire.set(63.0);
        s.player.inventory = Inventory::from(vec![ItemKind::Rope, ItemKind::Oil]);
        s.player.pos = Vec2::new(500.0, 300.0);
    }

    // Free crafting pays for the tent; the tent opens the slot menu.
    send(&mut app, &[Intent::ToggleFreeCrafting]);
    send(&mut app, &[Intent::ToggleCrafting]);
    send(&mut app, &[Intent::Craft(Recipe::Tent)]);
    assert_eq!(session(&app).mode(), UiMode::SlotSelect(SlotPurpose::Save));

    send(&mut app, &[Intent::SelectSlot(2), Intent::Confirm]);
    assert_eq!(session(&app).mode(), UiMode::Typing);
    let name: Vec<Intent> = "north camp".chars().map(Intent::TypeChar).collect();
    send(&mut app, &name);
    send(&mut app, &[Intent::Confirm]);
    assert_eq!(session(&app).mode(), UiMode::Play);
    assert!(session(&app).tents.contains(&RoomCoord::HUB));

    let on_disk = read_slots(&dir.path().join("savegame.json"));
    let saved = on_disk.get(2).expect("slot 2 written").clone();
    assert_eq!(saved.name, "north camp");
    assert_eq!(saved.pos, [500.0, 300.0]);

    // Lose the run and come back through the title menu.
    session_mut(&mut app).fire.set(0.0);
    app.update();
    send(&mut app, &[Intent::Restart]);
    send(&mut app, &[Intent::OpenLoadMenu]);
    assert_eq!(session(&app).mode(), UiMode::SlotSelect(SlotPurpose::Load));
    send(&mut app, &[Intent::SelectSlot(2), Intent::Confirm]);

    let s = session(&app);
    assert_eq!(s.mode(), UiMode::Play);
    assert_eq!(s.player.pos, Vec2::new(500.0, 300.0));
    assert_eq!(s.player.inventory.count(ItemKind::Rope), 1);
    assert_eq!(s.player.inventory.count(ItemKind::Oil), 1);
    assert!((s.fire.level() - saved.fire).abs() < 0.01);
    assert!(s.current_room().expect("room").has_tent);
}
