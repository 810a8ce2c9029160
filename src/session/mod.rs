//! The game session: one struct that owns a whole run.
//!
//! `GameSession` holds the fire, the player, the stockpile, the room cache
//! and the UI mode. Everything that changes during play goes through
//! `GameSession::advance`, once per fixed tick:
//!
//! 1. queued intents are applied for the current mode
//! 2. if the session is in play with crafting closed, the world ticks
//!
//! The Bevy side is a thin wrapper: `advance_session` feeds it the input
//! gathered since the last tick, and `sync_game_state` mirrors the mode
//! into `GameState` so view systems can gate on it.

mod crafting;
mod dialogue;
mod fire;
mod hazards;
mod interaction;
mod save_flow;
mod transitions;

pub use crafting::CraftOutcome;
pub use dialogue::Dialogue;
pub use fire::Fire;
pub use hazards::{respawn_point, ICE_BREAK_COST, ICE_STILL_SPEED, WATER_COST};
pub use interaction::{tent_spot, FEED_RADIUS, STOCKPILE_BOUNDS, TENT_RADIUS};
pub use save_flow::MAX_NAME_LEN;
pub use transitions::EDGE_INSET;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::enemies::update_pack;
use crate::entities::Keeper;
use crate::player::{Inventory, Player};
use crate::save::SaveSlots;
use crate::shared::*;
use crate::world::{Biome, Room, RoomRegistry};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<FrameInput>()
            .init_resource::<GameSession>()
            .init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_systems(FixedUpdate, advance_session)
            .add_systems(Update, sync_game_state);
    }
}

/// Consumes the input queued since the last tick and steps the session.
pub fn advance_session(mut session: ResMut<GameSession>, mut input: ResMut<FrameInput>) {
    let intents = std::mem::take(&mut input.intents);
    let movement = input.movement;
    session.advance(movement, &intents);
}

pub fn sync_game_state(
    session: Res<GameSession>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let wanted = session.mode().game_state();
    if *state.get() != wanted {
        next.set(wanted);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource)]
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    mode: UiMode,
    current: RoomCoord,
    slots: SaveSlots,

    pub fire: Fire,
    pub player: Player,
    pub stockpile: Inventory,
    pub automation_unlocked: bool,
    pub keeper: Keeper,
    pub world: RoomRegistry,
    /// Rooms with a pitched tent.
    pub tents: Vec<RoomCoord>,
    pub dialogue: Dialogue,

    pub crafting_open: bool,
    pub show_map: bool,
    /// Dev toggle: crafting ignores costs.
    pub free_crafting: bool,
    /// Slot highlighted in the slot menu, 1-based.
    pub selected_slot: u8,
    /// Save name being typed.
    pub input_text: String,
    pub frame_count: u64,
}

impl FromWorld for GameSession {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        GameSession::new(config)
    }
}

impl GameSession {
    /// A fresh session sitting on the title menu with the hub loaded.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            fire: Fire::new(config.starting_fire),
            config,
            rng,
            mode: UiMode::Menu,
            current: RoomCoord::HUB,
            slots: SaveSlots::default(),
            player: Player::default(),
            stockpile: Inventory::new(),
            automation_unlocked: false,
            keeper: Keeper::at_hub(),
            world: RoomRegistry::new(),
            tents: Vec::new(),
            dialogue: Dialogue::default(),
            crafting_open: false,
            show_map: false,
            free_crafting: false,
            selected_slot: 1,
            input_text: String::new(),
            frame_count: 0,
        };
        session.slots = crate::save::read_slots(&session.config.save_path);
        session.load_room(RoomCoord::HUB);
        session
    }

    // ─── Read access for the view ───────────────────────────────────────

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_coord(&self) -> RoomCoord {
        self.current
    }

    pub fn biome(&self) -> Biome {
        Biome::classify(self.current)
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.get(self.current)
    }

    pub fn revealed(&self) -> &BTreeSet<RoomCoord> {
        &self.world.revealed
    }

    pub fn visited(&self) -> &BTreeSet<RoomCoord> {
        &self.world.visited
    }

    pub fn slots(&self) -> &SaveSlots {
        &self.slots
    }

    pub fn hub_fire_light_radius(&self) -> f32 {
        self.fire.light_radius()
    }

    // ─── Stepping ───────────────────────────────────────────────────────

    /// Applies `intents` in order, then ticks the world if it is live.
    pub fn advance(&mut self, movement: Vec2, intents: &[Intent]) {
        self.frame_count += 1;
        for &intent in intents {
            self.apply(intent);
        }
        if self.mode == UiMode::Play && !self.crafting_open {
            self.tick(movement);
        }
    }

    fn apply(&mut self, intent: Intent) {
        if intent == Intent::ToggleFreeCrafting {
            if self.config.dev_tools {
                self.free_crafting = !self.free_crafting;
                let state = if self.free_crafting { "ON" } else { "OFF" };
                self.dialogue
                    .say(format!("DEV: Free Crafting {}", state), Dialogue::NORMAL);
            }
            return;
        }

        match self.mode {
            UiMode::Menu => match intent {
                Intent::NewGame => self.new_game(),
                Intent::OpenLoadMenu => self.open_slot_menu(SlotPurpose::Load),
                _ => {}
            },
            UiMode::Play => self.apply_play(intent),
            UiMode::SlotSelect(purpose) => self.apply_slot_select(purpose, intent),
            UiMode::Typing => self.apply_typing(intent),
            UiMode::GameOver => {
                if intent == Intent::Restart {
                    self.mode = UiMode::Menu;
                }
            }
        }
    }

    fn apply_play(&mut self, intent: Intent) {
        if intent == Intent::ToggleCrafting {
            self.crafting_open = !self.crafting_open;
            return;
        }
        if self.crafting_open {
            if let Intent::Craft(recipe) = intent {
                self.craft(recipe);
            }
            return;
        }
        match intent {
            Intent::Jump => self.player.jump(),
            Intent::Interact => self.interact(),
            Intent::Attack => self.swing(),
            Intent::ToggleMap => self.show_map = !self.show_map,
            _ => {}
        }
    }

    fn tick(&mut self, movement: Vec2) {
        self.player.tick_animation();
        self.fire.drain(self.config.fire_decay_per_tick);

        if self.player.burn_torch(self.biome().is_cold()) {
            self.dialogue.say("Torch faded.", Dialogue::LONG);
        }

        self.run_automation();

        if self.fire.is_out() {
            self.lose("the fire went out");
            return;
        }

        let room = self.world.get_or_generate(self.current, &mut self.rng);
        for damage in update_pack(&mut room.enemies, self.player.pos) {
            self.player.take_damage(damage);
        }
        room.remove_dead_enemies();

        if self.player.is_dead() {
            self.lose("the survivor fell");
            return;
        }

        self.player.step(movement, room);
        self.apply_hazards();
        self.update_echoes();
        self.check_room_exit();

        self.dialogue.tick();
    }

    fn run_automation(&mut self) {
        if !self.automation_unlocked
            || self.fire.level() >= Fire::AUTOMATION_BELOW
            || self.stockpile.is_empty()
        {
            return;
        }
        if self.rng.gen_bool(Fire::AUTOMATION_CHANCE) {
            self.stockpile.pop();
            self.fire.add(Fire::FEED);
            self.dialogue.say("The keeper burned a log.", Dialogue::NORMAL);
        }
    }

    fn swing(&mut self) {
        if !self.player.attack() {
            return;
        }
        let room = self.world.get_or_generate(self.current, &mut self.rng);
        for report in self.player.strike(&mut room.enemies, &mut self.rng) {
            if report.killed {
                self.dialogue
                    .say(format!("Slain {}", report.target), Dialogue::NORMAL);
            } else {
                self.dialogue
                    .say(format!("Hit {}!", report.target), Dialogue::SHORT);
            }
        }
        room.remove_dead_enemies();
    }

    fn lose(&mut self, reason: &str) {
        info!("[Session] Game over: {}", reason);
        self.mode = UiMode::GameOver;
    }

    /// Drops every room and all progress and starts over at the hub.
    fn reset_run(&mut self) {
        self.fire = Fire::new(self.config.starting_fire);
        self.stockpile.clear();
        self.automation_unlocked = false;
        self.player = Player::default();
        self.world.clear();
        self.tents.clear();
        self.dialogue.clear();
        self.crafting_open = false;
        self.show_map = false;
    }

    fn new_game(&mut self) {
        self.reset_run();
        self.load_room(RoomCoord::HUB);
        self.mode = UiMode::Play;
        info!("[Session] New game started");
    }
}
