//! Per-frame simulation step
//!
//! Order within a tick: throws from input, pending spawns go live,
//! backdrop scroll, motion, contacts, spawn timer, outcome check. Contacts
//! run before the outcome check so a star that lands on the same tick a
//! monster reaches the left edge still saves the session.

use glam::Vec2;

use crate::consts::MAX_CONTACT_SUBSTEPS;

use super::background;
use super::collision::{Contact, ContactKind};
use super::registry::MotionReport;
use super::score::Outcome;
use super::spawner::spawn_enemy;
use super::state::{EntityId, GameEvent, GameState};

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World-space aim points, one per discrete fire event
    pub fire_at: Vec<Vec2>,
    /// Idle/demo mode - autopilot throws at the nearest monster
    pub idle_mode: bool,
}

/// Advance the session by one frame of `dt` seconds.
///
/// Does nothing once the session has reached a terminal outcome.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.outcome().is_terminal() {
        log::trace!("Tick ignored: session already over");
        return;
    }

    for &aim in &input.fire_at {
        state.fire(aim);
    }
    if input.idle_mode {
        autopilot(state, dt);
    }

    // Last frame's spawns become visible now
    state.registry.flush_spawns();

    background::scroll(state.registry.tiles_mut(), dt);

    // Closing distance per pass stays below the star/monster contact extent
    let steps = contact_substeps(state, dt);
    let step_dt = dt / steps as f32;
    let mut report = MotionReport::default();
    for _ in 0..steps {
        report.merge(state.registry.advance_motion(step_dt));

        let contacts = state.contacts.begin_contacts(&state.registry.bodies());
        for contact in contacts {
            resolve_contact(state, contact);
        }
    }

    let due = state.spawner.tick(dt);
    for _ in 0..due {
        spawn_enemy(&mut state.registry, &mut state.rng, &state.settings);
    }

    settle(state, report);

    state.clock += dt;
    state.time_ticks += 1;
}

/// Number of motion/contact passes needed so the closing distance between
/// any star and monster per pass stays below their combined contact extent.
fn contact_substeps(state: &GameState, dt: f32) -> u32 {
    let projectiles = state.registry.projectiles();
    let enemies = state.registry.enemies();
    if projectiles.is_empty() || enemies.is_empty() {
        return 1;
    }

    let star_speed = projectiles
        .iter()
        .map(|p| p.motion.velocity().length())
        .fold(0.0, f32::max);
    let monster_speed = enemies
        .iter()
        .map(|e| e.motion.velocity().length())
        .fold(0.0, f32::max);
    let star_radius = projectiles
        .iter()
        .map(|p| p.radius())
        .fold(f32::INFINITY, f32::min);
    let monster_half = enemies
        .iter()
        .map(|e| e.size.min_element() / 2.0)
        .fold(f32::INFINITY, f32::min);

    let closing = (star_speed + monster_speed) * dt;
    let step_size = star_radius + monster_half;
    if !(closing > 0.0 && step_size > 0.0) {
        return 1;
    }
    ((closing / step_size).ceil() as u32).clamp(1, MAX_CONTACT_SUBSTEPS)
}

/// Apply one begin-contact. Returns true if it scored.
///
/// A pair where either side is already gone is skipped, which makes
/// resolution idempotent within a tick and across ticks.
pub fn resolve_contact(state: &mut GameState, contact: Contact) -> bool {
    match contact.kind {
        ContactKind::ProjectileHitsMonster => {
            projectile_hit_monster(state, contact.first, contact.second)
        }
    }
}

fn projectile_hit_monster(state: &mut GameState, monster: EntityId, star: EntityId) -> bool {
    if !state.registry.is_live(monster) || !state.registry.is_live(star) {
        return false;
    }
    if !state.scoreboard.record_hit() {
        return false;
    }

    if let Some(enemy) = state.registry.enemy_mut(monster) {
        enemy.disarm();
    }
    state.registry.destroy(star);
    state.registry.destroy(monster);
    state.contacts.forget(star);
    state.contacts.forget(monster);

    state.update_score_label();
    log::debug!(
        "Hit: star {} took monster {} ({} total)",
        star,
        monster,
        state.hit_count()
    );
    true
}

/// Clean up finished motion and decide the outcome
fn settle(state: &mut GameState, report: MotionReport) {
    for id in report.finished_projectiles {
        state.registry.destroy(id);
    }

    // Only monsters that survived the contact pass can breach
    let mut breached = false;
    for id in report.arrived_enemies {
        let armed = state
            .registry
            .enemies()
            .iter()
            .any(|e| e.id == id && e.breached());
        if armed {
            breached = true;
            log::debug!("Monster {} reached the left edge", id);
        }
        state.registry.destroy(id);
    }

    let outcome = if state.scoreboard.threshold_reached() {
        Outcome::Won
    } else if breached {
        Outcome::Lost
    } else {
        return;
    };

    if state.scoreboard.conclude(outcome) {
        let won = outcome == Outcome::Won;
        let score = state.hit_count();
        log::info!(
            "Game over: {} with {} hits after {:.2}s",
            if won { "won" } else { "lost" },
            score,
            state.clock
        );
        state.push_event(GameEvent::GameOver { won, score });
    }
}

/// Demo play: throw at the nearest monster, leading its path
fn autopilot(state: &mut GameState, dt: f32) {
    state.autopilot_cooldown -= dt;
    if state.autopilot_cooldown > 0.0 {
        return;
    }

    let origin = state.registry.player().pos;
    let speed = state.settings.projectile_reach / state.settings.projectile_duration;

    let aim = state
        .registry
        .enemies()
        .iter()
        .filter(|e| e.pos.x > origin.x)
        .min_by(|a, b| {
            (a.pos - origin)
                .length()
                .partial_cmp(&(b.pos - origin).length())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| {
            // Lead the target by the star's flight time
            let flight = (e.pos - origin).length() / speed;
            e.pos + e.motion.velocity() * flight
        });

    if let Some(aim) = aim
        && state.fire(aim).is_some()
    {
        state.autopilot_cooldown = state.settings.autopilot_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::audio::SoundEffect;
    use crate::consts::FRAME_DT;
    use crate::sim::motion::Motion;

    /// Settings with spawning pushed far out so tests place monsters by hand
    fn quiet_settings() -> Settings {
        Settings {
            spawn_interval: 1_000.0,
            ..Settings::default()
        }
    }

    fn quiet_state() -> GameState {
        let mut state = GameState::new(quiet_settings(), 12345);
        // Consume the spawn due on the first tick
        state.spawner.tick(0.0);
        state.drain_events();
        state
    }

    fn place_monster(state: &mut GameState, start: Vec2, duration: f32) -> EntityId {
        let size = state.settings.enemy_size;
        let target = Vec2::new(-size.x / 2.0, start.y);
        let id = state
            .registry
            .spawn_enemy(start, size, Motion::move_to(start, target, duration));
        state.registry.flush_spawns();
        id
    }

    fn game_over_events(state: &GameState) -> Vec<GameEvent> {
        state
            .events()
            .iter()
            .copied()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect()
    }

    #[test]
    fn test_tick_spawns_first_monster() {
        let mut state = GameState::new(Settings::default(), 1);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        // Spawned this tick, live from the next
        assert!(state.registry.enemies().is_empty());
        assert_eq!(state.registry.pending_count(), 1);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.registry.enemies().len(), 1);
    }

    #[test]
    fn test_uncollided_star_removed_at_completion() {
        let mut state = quiet_state();
        state.registry.player_mut().pos = Vec2::new(50.0, 300.0);
        let input = TickInput {
            fire_at: vec![Vec2::new(200.0, 300.0)],
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);
        let star = &state.registry.projectiles()[0];
        assert!((star.pos - Vec2::new(300.0, 300.0)).length() < 1e-3);

        let idle = TickInput::default();
        tick(&mut state, &idle, 0.5);
        tick(&mut state, &idle, 0.5);
        assert_eq!(state.registry.projectiles().len(), 1);
        tick(&mut state, &idle, 0.5);
        assert!(state.registry.projectiles().is_empty());
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_hit_destroys_both_and_scores() {
        let mut state = quiet_state();
        state.registry.player_mut().pos = Vec2::new(50.0, 300.0);
        let monster = place_monster(&mut state, Vec2::new(820.0, 300.0), 3.0);

        // Star at 500/s, monster at 280/s: they meet about 1.0s in
        let input = TickInput {
            fire_at: vec![Vec2::new(200.0, 300.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        let idle = TickInput::default();
        for _ in 0..90 {
            tick(&mut state, &idle, FRAME_DT);
        }

        assert_eq!(state.hit_count(), 1);
        assert!(!state.registry.is_live(monster));
        assert!(state.registry.projectiles().is_empty());
        assert_eq!(state.score_label.text, "1");
        assert!(state.events().contains(&GameEvent::ScoreChanged(1)));

        // Well past the monster's would-be arrival: no loss
        for _ in 0..240 {
            tick(&mut state, &idle, FRAME_DT);
        }
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_contacts_substep_only_when_needed() {
        let mut state = quiet_state();
        assert_eq!(contact_substeps(&state, 0.2), 1);

        place_monster(&mut state, Vec2::new(400.0, 300.0), 2.0);
        let from = Vec2::new(300.0, 300.0);
        state.registry.spawn_projectile(
            from,
            state.settings.projectile_size,
            Motion::move_to(from, Vec2::new(1300.0, 300.0), 2.0),
        );
        state.registry.flush_spawns();

        assert_eq!(contact_substeps(&state, FRAME_DT), 1);
        assert!(contact_substeps(&state, 0.2) > 1);
        assert!(contact_substeps(&state, 1_000.0) <= MAX_CONTACT_SUBSTEPS);
    }

    #[test]
    fn test_coarse_step_star_does_not_pass_through_monster() {
        let mut state = quiet_state();
        let monster = place_monster(&mut state, Vec2::new(400.0, 300.0), 2.0);
        let from = Vec2::new(300.0, 300.0);
        let star = state.registry.spawn_projectile(
            from,
            state.settings.projectile_size,
            Motion::move_to(from, Vec2::new(1300.0, 300.0), 2.0),
        );
        state.registry.flush_spawns();

        // 100 units of star travel per tick: would skip the monster unsplit
        let idle = TickInput::default();
        for _ in 0..3 {
            tick(&mut state, &idle, 0.2);
        }

        assert_eq!(state.hit_count(), 1);
        assert!(!state.registry.is_live(monster));
        assert!(!state.registry.is_live(star));
        assert!(state.events().contains(&GameEvent::ScoreChanged(1)));
    }

    #[test]
    fn test_monster_reaching_edge_loses_once() {
        let mut state = quiet_state();
        place_monster(&mut state, Vec2::new(820.0, 100.0), 2.0);
        place_monster(&mut state, Vec2::new(820.0, 400.0), 2.0);

        let idle = TickInput::default();
        for _ in 0..200 {
            tick(&mut state, &idle, 0.05);
        }

        assert_eq!(state.outcome(), Outcome::Lost);
        assert_eq!(
            game_over_events(&state),
            vec![GameEvent::GameOver {
                won: false,
                score: 0
            }]
        );
    }

    #[test]
    fn test_hit_on_final_frame_prevents_loss() {
        let mut state = quiet_state();
        let monster = place_monster(&mut state, Vec2::new(820.0, 300.0), 1.0);
        // Star parked on the monster's arrival point
        let target = Vec2::new(-20.0, 300.0);
        state.registry.spawn_projectile(
            target,
            state.settings.projectile_size,
            Motion::move_to(target, target + Vec2::new(0.0, 1.0), 10.0),
        );

        tick(&mut state, &TickInput::default(), 1.0);

        assert!(!state.registry.is_live(monster));
        assert_eq!(state.hit_count(), 1);
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_one_star_two_monsters_scores_once() {
        let mut state = quiet_state();
        let a = place_monster(&mut state, Vec2::new(400.0, 300.0), 100.0);
        let b = place_monster(&mut state, Vec2::new(410.0, 300.0), 100.0);
        let pos = Vec2::new(405.0, 300.0);
        state.registry.spawn_projectile(
            pos,
            state.settings.projectile_size,
            Motion::move_to(pos, pos, 10.0),
        );

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.hit_count(), 1);
        assert_eq!(state.registry.enemies().len(), 1);
        assert!(!state.registry.is_live(a) || !state.registry.is_live(b));
    }

    #[test]
    fn test_win_at_threshold() {
        let mut state = quiet_state();
        let size = state.settings.projectile_size;

        for i in 0..31 {
            let pos = Vec2::new(400.0, 20.0 + i as f32 * 18.0);
            place_monster(&mut state, pos, 100.0);
            state
                .registry
                .spawn_projectile(pos, size, Motion::move_to(pos, pos, 10.0));
            state.registry.flush_spawns();
            tick(&mut state, &TickInput::default(), FRAME_DT);
        }

        assert_eq!(state.outcome(), Outcome::Won);
        assert_eq!(state.hit_count(), 30);
        assert_eq!(
            game_over_events(&state),
            vec![GameEvent::GameOver {
                won: true,
                score: 30
            }]
        );

        // Frozen: nothing moves and nothing scores
        let ticks = state.time_ticks;
        let before = state.registry.tiles()[0].pos;
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.registry.tiles()[0].pos, before);
        assert_eq!(state.hit_count(), 30);
    }

    #[test]
    fn test_many_hits_in_one_tick_stop_at_threshold() {
        let settings = Settings {
            win_threshold: 3,
            ..quiet_settings()
        };
        let mut state = GameState::new(settings, 9);
        state.spawner.tick(0.0);
        let size = state.settings.projectile_size;
        for i in 0..5 {
            let pos = Vec2::new(400.0, 50.0 + i as f32 * 100.0);
            place_monster(&mut state, pos, 100.0);
            state
                .registry
                .spawn_projectile(pos, size, Motion::move_to(pos, pos, 10.0));
        }

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.hit_count(), 3);
        assert_eq!(state.outcome(), Outcome::Won);
        assert_eq!(state.registry.enemies().len(), 2);
    }

    #[test]
    fn test_background_scrolls_each_tick() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.registry.tiles()[0].pos.x, -2.0);
        assert_eq!(state.registry.tiles()[1].pos.x, 798.0);
    }

    #[test]
    fn test_fire_sound_only_for_accepted_throws() {
        let mut state = quiet_state();
        let input = TickInput {
            fire_at: vec![Vec2::new(10.0, 300.0), Vec2::new(500.0, 300.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        let sounds = state
            .events()
            .iter()
            .filter(|e| **e == GameEvent::PlaySound(SoundEffect::Fire))
            .count();
        assert_eq!(sounds, 1);
        assert_eq!(state.registry.projectiles().len(), 1);
    }

    #[test]
    fn test_autopilot_throws_at_monsters() {
        let mut state = quiet_state();
        place_monster(&mut state, Vec2::new(600.0, 300.0), 4.0);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.registry.projectiles().len(), 1);
        assert!(state.autopilot_cooldown > 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Settings::default(), 99999);
        let mut state2 = GameState::new(Settings::default(), 99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input, FRAME_DT);
            tick(&mut state2, &input, FRAME_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.hit_count(), state2.hit_count());
        assert_eq!(state1.outcome(), state2.outcome());
        assert_eq!(state1.registry.enemies().len(), state2.registry.enemies().len());
    }
}
