//! Shared types, constants, and intents for Kindle.
//!
//! This is the type contract. Every domain module imports from here.
//! The simulation core only uses `bevy::math` and the ECS derives; nothing
//! in here touches rendering, windows, or assets.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: mirrors the session's UI mode for view-system gating
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    SlotSelect,
    Typing,
    GameOver,
}

/// Which slot flow the slot menu was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPurpose {
    Save,
    Load,
}

/// The session's active UI mode. Owned by `GameSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiMode {
    #[default]
    Menu,
    Play,
    SlotSelect(SlotPurpose),
    Typing,
    GameOver,
}

impl UiMode {
    pub fn game_state(self) -> GameState {
        match self {
            UiMode::Menu => GameState::MainMenu,
            UiMode::Play => GameState::Playing,
            UiMode::SlotSelect(_) => GameState::SlotSelect,
            UiMode::Typing => GameState::Typing,
            UiMode::GameOver => GameState::GameOver,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

/// Four-way facing, screen space (+y is down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing along the dominant axis of `v`. Ties go vertical.
    pub fn from_vector(v: Vec2) -> Self {
        if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if v.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        }
    }

    pub fn opposite_unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, 1.0),
            Facing::Down => Vec2::new(0.0, -1.0),
            Facing::Left => Vec2::new(1.0, 0.0),
            Facing::Right => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Axis-aligned rectangle in screen space, top-left anchored.
///
/// Overlap is strict (touching edges do not collide) and point containment
/// is half-open, so two tiles laid edge to edge never both claim a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Grid coordinate of a room. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCoord(pub i32, pub i32);

impl RoomCoord {
    pub const HUB: RoomCoord = RoomCoord(0, 0);

    pub fn x(self) -> i32 {
        self.0
    }

    pub fn y(self) -> i32 {
        self.1
    }

    pub fn is_hub(self) -> bool {
        self == Self::HUB
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        RoomCoord(self.0.saturating_add(dx), self.1.saturating_add(dy))
    }

    /// Chebyshev distance from the hub; drives enemy counts.
    pub fn ring(self) -> u32 {
        self.0.unsigned_abs().max(self.1.unsigned_abs())
    }
}

impl fmt::Display for RoomCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

/// Every resource token the player can carry.
///
/// Saved as the plain name string; unknown names fall back to `Branch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Wood,
    Branch,
    Reeds,
    Flint,
    Fur,
    Oil,
    Iron,
    Rope,
    Fabric,
}

impl ItemKind {
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Wood,
        ItemKind::Branch,
        ItemKind::Reeds,
        ItemKind::Flint,
        ItemKind::Fur,
        ItemKind::Oil,
        ItemKind::Iron,
        ItemKind::Rope,
        ItemKind::Fabric,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Wood => "Wood",
            ItemKind::Branch => "branch",
            ItemKind::Reeds => "Reeds",
            ItemKind::Flint => "Flint",
            ItemKind::Fur => "Fur",
            ItemKind::Oil => "Oil",
            ItemKind::Iron => "Iron",
            ItemKind::Rope => "Rope",
            ItemKind::Fabric => "Fabric",
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .unwrap_or(ItemKind::Branch)
    }

    /// Lines the keeper says when this item is fed to the fire.
    pub fn flavor_lines(self) -> &'static [&'static str] {
        match self {
            ItemKind::Branch => &["It burns quickly.", "Better than freezing.", "Keep it bright."],
            ItemKind::Wood => &["Solid fuel.", "A heavy log.", "Good for the fire."],
            ItemKind::Rope => &["Strong fibers.", "Useful for binding."],
            ItemKind::Reeds => &["Flexible swamp grass.", "Weaves easily."],
            ItemKind::Flint => &["A spark in the dark.", "Sharp stone."],
            ItemKind::Fur => &["Thick and warm.", "Smells of musk."],
            ItemKind::Oil => &["Viscous fuel.", "Burns slow and hot."],
            ItemKind::Iron => &["Rusted scrap.", "Old world metal."],
            ItemKind::Fabric => &["Woven cloth.", "Basic protection."],
        }
    }

    /// Placeholder colour used when no sprite is available.
    pub fn placeholder_rgb(self) -> [u8; 3] {
        match self {
            ItemKind::Wood => [139, 69, 19],
            ItemKind::Branch => [160, 110, 60],
            ItemKind::Reeds => [120, 170, 80],
            ItemKind::Flint => [90, 90, 100],
            ItemKind::Fur => [200, 180, 150],
            ItemKind::Oil => [30, 30, 30],
            ItemKind::Iron => [150, 150, 160],
            ItemKind::Rope => [190, 160, 100],
            ItemKind::Fabric => [220, 220, 200],
        }
    }
}

impl From<String> for ItemKind {
    fn from(name: String) -> Self {
        ItemKind::from_name(&name)
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INTENTS: what the input layer hands to the simulation
// ═══════════════════════════════════════════════════════════════════════

/// Recipes available from the crafting overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipe {
    Fabric,
    Campfire,
    Tent,
    Lantern,
}

/// A discrete player intent. Movement is carried separately as an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    NewGame,
    OpenLoadMenu,
    Restart,
    Jump,
    Attack,
    Interact,
    ToggleCrafting,
    ToggleMap,
    ToggleFreeCrafting,
    Craft(Recipe),
    SelectSlot(u8),
    Confirm,
    Cancel,
    TypeChar(char),
    Backspace,
}

/// Input accumulated between simulation ticks.
///
/// `movement` is the latest resolved movement axis (screen space, +y down);
/// `intents` queue up until the next fixed tick consumes them.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    pub movement: Vec2,
    pub intents: Vec<Intent>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(axis: Vec2) -> Self {
        Self {
            movement: axis,
            intents: Vec::new(),
        }
    }

    pub fn with(intent: Intent) -> Self {
        Self {
            movement: Vec2::ZERO,
            intents: vec![intent],
        }
    }
}

/// Keyboard bindings for the input plugin.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub jump: KeyCode,
    pub interact: KeyCode,
    pub attack: KeyCode,
    pub crafting: KeyCode,
    pub map: KeyCode,
    pub dev_toggle: KeyCode,
    pub load_menu: KeyCode,
    pub restart: KeyCode,
    pub confirm: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            jump: KeyCode::Space,
            interact: KeyCode::KeyE,
            attack: KeyCode::KeyJ,
            crafting: KeyCode::KeyI,
            map: KeyCode::KeyM,
            dev_toggle: KeyCode::Digit0,
            load_menu: KeyCode::KeyL,
            restart: KeyCode::KeyR,
            confirm: KeyCode::Enter,
            cancel: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;
pub const TICK_RATE_HZ: f64 = 60.0;

pub const MAX_FIRE: f32 = 100.0;
pub const CARRY_THRESHOLD: usize = 5;

/// Centre of every room; hub fire sits here and hazards teleport here.
pub fn room_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

/// Converts an RGB triple into a Bevy colour for placeholder visuals.
pub fn rgb(c: [u8; 3]) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}
