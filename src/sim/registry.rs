//! Entity registry
//!
//! Typed collections per entity kind, indexed by stable id. Spawns land in a
//! pending buffer and only join the live set when `flush_spawns` runs at the
//! start of the next tick, so iteration within a tick never sees them.

use glam::Vec2;

use super::collision::{Body, CollisionCategory, Shape};
use super::motion::Motion;
use super::state::{BackgroundTile, Enemy, EntityId, EntityKind, Player, Projectile};

/// Read-only view of any entity, used for drawing and generic iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Sprite center
    pub center: Vec2,
    pub size: Vec2,
    pub category: CollisionCategory,
}

/// Ids of entities whose motion finished during `advance_motion`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionReport {
    pub finished_projectiles: Vec<EntityId>,
    pub arrived_enemies: Vec<EntityId>,
}

impl MotionReport {
    /// Fold a later report into this one, keeping each id once
    pub fn merge(&mut self, other: MotionReport) {
        for id in other.finished_projectiles {
            if !self.finished_projectiles.contains(&id) {
                self.finished_projectiles.push(id);
            }
        }
        for id in other.arrived_enemies {
            if !self.arrived_enemies.contains(&id) {
                self.arrived_enemies.push(id);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    player: Player,
    projectiles: Vec<Projectile>,
    enemies: Vec<Enemy>,
    tiles: Vec<BackgroundTile>,
    pending_projectiles: Vec<Projectile>,
    pending_enemies: Vec<Enemy>,
    next_id: EntityId,
}

impl Registry {
    /// Create the registry with its singleton player and two background
    /// tiles laid edge to edge across the screen.
    pub fn new(player_pos: Vec2, player_size: Vec2, screen: Vec2, scroll_per_tick: f32) -> Self {
        let mut registry = Self {
            player: Player {
                id: 0,
                pos: player_pos,
                size: player_size,
            },
            projectiles: Vec::new(),
            enemies: Vec::new(),
            tiles: Vec::with_capacity(2),
            pending_projectiles: Vec::new(),
            pending_enemies: Vec::new(),
            next_id: 1,
        };
        registry.player.id = registry.next_entity_id();

        for i in 0..2 {
            let id = registry.next_entity_id();
            registry.tiles.push(BackgroundTile {
                id,
                pos: Vec2::new(i as f32 * screen.x, 0.0),
                size: screen,
                motion: Motion::drift(Vec2::new(-scroll_per_tick, 0.0)),
            });
        }
        registry
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn tiles(&self) -> &[BackgroundTile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [BackgroundTile] {
        &mut self.tiles
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Queue a projectile; it goes live on the next `flush_spawns`
    pub fn spawn_projectile(&mut self, pos: Vec2, size: Vec2, motion: Motion) -> EntityId {
        let id = self.next_entity_id();
        self.pending_projectiles.push(Projectile {
            id,
            pos,
            size,
            motion,
        });
        id
    }

    /// Queue an enemy with its loss trigger armed
    pub fn spawn_enemy(&mut self, pos: Vec2, size: Vec2, motion: Motion) -> EntityId {
        let id = self.next_entity_id();
        self.pending_enemies.push(Enemy {
            id,
            pos,
            size,
            motion,
            loss_armed: true,
        });
        id
    }

    /// Move queued spawns into the live set
    pub fn flush_spawns(&mut self) {
        self.projectiles.append(&mut self.pending_projectiles);
        self.enemies.append(&mut self.pending_enemies);
    }

    pub fn pending_count(&self) -> usize {
        self.pending_projectiles.len() + self.pending_enemies.len()
    }

    /// Remove a projectile or enemy (live or pending). Returns false if the
    /// id is unknown, so destroying twice is harmless.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if let Some(idx) = self.enemies.iter().position(|e| e.id == id) {
            self.enemies.remove(idx);
            return true;
        }
        if let Some(idx) = self.projectiles.iter().position(|p| p.id == id) {
            self.projectiles.remove(idx);
            return true;
        }
        if let Some(idx) = self.pending_enemies.iter().position(|e| e.id == id) {
            self.pending_enemies.remove(idx);
            return true;
        }
        if let Some(idx) = self.pending_projectiles.iter().position(|p| p.id == id) {
            self.pending_projectiles.remove(idx);
            return true;
        }
        false
    }

    /// True if the id names a live projectile or enemy (or the player)
    pub fn is_live(&self, id: EntityId) -> bool {
        id == self.player.id
            || self.projectiles.iter().any(|p| p.id == id)
            || self.enemies.iter().any(|e| e.id == id)
    }

    /// Visit every live entity of one kind in id order
    pub fn for_each(&self, kind: EntityKind, mut f: impl FnMut(EntityRef)) {
        match kind {
            EntityKind::Player => f(EntityRef {
                id: self.player.id,
                kind,
                center: self.player.pos,
                size: self.player.size,
                category: kind.category(),
            }),
            EntityKind::Projectile => {
                for p in &self.projectiles {
                    f(EntityRef {
                        id: p.id,
                        kind,
                        center: p.pos,
                        size: p.size,
                        category: kind.category(),
                    });
                }
            }
            EntityKind::Enemy => {
                for e in &self.enemies {
                    f(EntityRef {
                        id: e.id,
                        kind,
                        center: e.pos,
                        size: e.size,
                        category: kind.category(),
                    });
                }
            }
            EntityKind::BackgroundTile => {
                for t in &self.tiles {
                    f(EntityRef {
                        id: t.id,
                        kind,
                        center: t.pos + t.size / 2.0,
                        size: t.size,
                        category: kind.category(),
                    });
                }
            }
        }
    }

    /// Contact bodies for the detection pass: monsters are boxes, stars are
    /// circles.
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies = Vec::with_capacity(self.enemies.len() + self.projectiles.len());
        for e in &self.enemies {
            bodies.push(Body {
                id: e.id,
                category: CollisionCategory::Monster,
                shape: Shape::Rect {
                    center: e.pos,
                    half: e.size / 2.0,
                },
            });
        }
        for p in &self.projectiles {
            bodies.push(Body {
                id: p.id,
                category: CollisionCategory::Projectile,
                shape: Shape::Circle {
                    center: p.pos,
                    radius: p.radius(),
                },
            });
        }
        bodies
    }

    /// Advance projectile and enemy motion, reporting what finished
    pub fn advance_motion(&mut self, dt: f32) -> MotionReport {
        let mut report = MotionReport::default();
        for p in &mut self.projectiles {
            p.pos = p.motion.advance(p.pos, dt);
            if p.motion.is_complete() {
                report.finished_projectiles.push(p.id);
            }
        }
        for e in &mut self.enemies {
            e.pos = e.motion.advance(e.pos, dt);
            if e.motion.is_complete() {
                report.arrived_enemies.push(e.id);
            }
        }
        report
    }

    /// Total live entities (player and tiles included)
    pub fn live_count(&self) -> usize {
        1 + self.projectiles.len() + self.enemies.len() + self.tiles.len()
    }
}
