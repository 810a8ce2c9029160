use bevy::prelude::*;

use crate::save::SaveSlots;
use crate::session::{GameSession, MAX_NAME_LEN};
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudStatusText;

#[derive(Component)]
pub struct HudInventoryText;

#[derive(Component)]
pub struct HudDialogueText;

/// Centre panel: title menu, crafting list, slot menu, name entry, game over.
#[derive(Component)]
pub struct HudOverlayText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    let font = |size: f32| TextFont {
        font_size: size,
        ..default()
    };

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                ))
                .with_children(|bar| {
                    bar.spawn((HudStatusText, Text::new(""), font(18.0), TextColor(Color::WHITE)));
                    bar.spawn((
                        HudInventoryText,
                        Text::new(""),
                        font(16.0),
                        TextColor(Color::srgb(0.9, 0.85, 0.7)),
                    ));
                });

            // ─── CENTRE PANEL ───
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                })
                .with_children(|centre| {
                    centre.spawn((
                        HudOverlayText,
                        Text::new(""),
                        font(22.0),
                        TextColor(Color::WHITE),
                        TextLayout::new_with_justify(JustifyText::Center),
                        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
                        Node {
                            padding: UiRect::all(Val::Px(16.0)),
                            ..default()
                        },
                    ));
                });

            // ─── DIALOGUE LINE ───
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    padding: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                })
                .with_children(|bottom| {
                    bottom.spawn((
                        HudDialogueText,
                        Text::new(""),
                        font(20.0),
                        TextColor(Color::srgb(1.0, 0.95, 0.8)),
                    ));
                });
        });
}

// ═══════════════════════════════════════════════════════════════════════
// TEXT BUILDERS
// ═══════════════════════════════════════════════════════════════════════

pub fn status_line(session: &GameSession) -> String {
    let p = &session.player;
    let mut line = format!(
        "Fire {}%   {} {}   HP {}/{}",
        session.fire.percent(),
        session.biome(),
        session.current_coord(),
        p.hp,
        p.max_hp
    );
    if p.has_lantern {
        line.push_str("   Lantern");
    }
    if let Some(torch) = p.torch {
        line.push_str(&format!("   Torch {:.0}", torch.health));
    }
    if session.free_crafting {
        line.push_str("   [FREE CRAFT]");
    }
    line
}

pub fn inventory_line(session: &GameSession) -> String {
    let bag = &session.player.inventory;
    if bag.is_empty() {
        return "Empty-handed".to_string();
    }
    let mut parts: Vec<String> = bag
        .tally()
        .into_iter()
        .map(|(kind, n)| format!("{} x{}", kind, n))
        .collect();
    if session.player.is_overloaded() {
        parts.push("(heavy)".to_string());
    }
    parts.join("  ")
}

fn slot_menu(title: &str, slots: &SaveSlots, selected: u8) -> String {
    let mut text = format!("{}\n\n", title);
    for (n, label) in slots.labels() {
        let cursor = if n == selected { ">" } else { " " };
        text.push_str(&format!("{} {}. {}\n", cursor, n, label));
    }
    text.push_str("\n1-3 choose   Enter confirm   Esc back");
    text
}

fn crafting_menu(session: &GameSession) -> String {
    let mut text = String::from("CRAFTING\n\n");
    for recipe in Recipe::ALL {
        let costs: Vec<String> = recipe
            .costs()
            .iter()
            .map(|(kind, n)| format!("{} {}", n, kind))
            .collect();
        let ready = session.free_crafting || session.player.inventory.covers(recipe.costs());
        text.push_str(&format!(
            "[{}] {} ({}){}\n    {}\n",
            recipe.hotkey(),
            recipe.name(),
            costs.join(", "),
            if ready { "" } else { " - missing" },
            recipe.description()
        ));
    }
    text.push_str("\nI to close");
    text
}

/// Text for the centre panel, or `None` when nothing should cover play.
pub fn overlay_text(session: &GameSession) -> Option<String> {
    match session.mode() {
        UiMode::Menu => Some("KINDLE\n\nSpace  New Game\nL  Load Game".to_string()),
        UiMode::Play if session.crafting_open => Some(crafting_menu(session)),
        UiMode::Play => None,
        UiMode::SlotSelect(SlotPurpose::Load) => {
            Some(slot_menu("LOAD GAME", session.slots(), session.selected_slot))
        }
        UiMode::SlotSelect(SlotPurpose::Save) => {
            Some(slot_menu("SAVE GAME", session.slots(), session.selected_slot))
        }
        UiMode::Typing => Some(format!(
            "Name this camp ({} max)\n\n{}_\n\nEnter to save   Esc to cancel",
            MAX_NAME_LEN, session.input_text
        )),
        UiMode::GameOver => Some("THE FIRE HAS GONE OUT\n\nPress R to return".to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_status(
    session: Res<GameSession>,
    mut status: Query<&mut Text, (With<HudStatusText>, Without<HudInventoryText>)>,
    mut inventory: Query<&mut Text, (With<HudInventoryText>, Without<HudStatusText>)>,
) {
    let playing = session.mode() == UiMode::Play;
    for mut text in &mut status {
        **text = if playing { status_line(&session) } else { String::new() };
    }
    for mut text in &mut inventory {
        **text = if playing { inventory_line(&session) } else { String::new() };
    }
}

pub fn update_dialogue(session: Res<GameSession>, mut query: Query<&mut Text, With<HudDialogueText>>) {
    for mut text in &mut query {
        **text = session.dialogue.text().unwrap_or_default().to_string();
    }
}

pub fn update_overlay(
    session: Res<GameSession>,
    mut query: Query<(&mut Text, &mut Visibility), With<HudOverlayText>>,
) {
    for (mut text, mut visibility) in &mut query {
        match overlay_text(&session) {
            Some(body) => {
                **text = body;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
