//! Contact detection between thrown stars and monsters
//!
//! Contacts are detection-only: nothing bounces. A pair is reported when
//! each side's contact mask includes the other's category, and the
//! resulting ordered pair is looked up in a closed match table.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Collision group of an entity
///
/// Variants are declared in ascending bit order, so `Ord` on the enum
/// agrees with ordering by `bits()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollisionCategory {
    None,
    Monster,
    Projectile,
    All,
}

impl CollisionCategory {
    pub const fn bits(self) -> u32 {
        match self {
            CollisionCategory::None => 0,
            CollisionCategory::Monster => 0b1,
            CollisionCategory::Projectile => 0b10,
            CollisionCategory::All => u32::MAX,
        }
    }

    /// Categories this group reports contact against
    pub const fn contact_mask(self) -> u32 {
        match self {
            CollisionCategory::Monster => CollisionCategory::Projectile.bits(),
            CollisionCategory::Projectile => CollisionCategory::Monster.bits(),
            CollisionCategory::None | CollisionCategory::All => 0,
        }
    }

    /// Categories this group physically collides with (none: contacts only)
    pub const fn collision_mask(self) -> u32 {
        CollisionCategory::None.bits()
    }
}

/// What a qualifying contact means for gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    ProjectileHitsMonster,
}

/// Order two categories by ascending bit value
#[inline]
pub fn order_pair(
    a: CollisionCategory,
    b: CollisionCategory,
) -> (CollisionCategory, CollisionCategory) {
    if a.bits() <= b.bits() { (a, b) } else { (b, a) }
}

/// Look up the contact an ordered pair of categories produces
pub fn classify(a: CollisionCategory, b: CollisionCategory) -> Option<ContactKind> {
    let (lo, hi) = order_pair(a, b);
    if lo.contact_mask() & hi.bits() == 0 || hi.contact_mask() & lo.bits() == 0 {
        return None;
    }
    match (lo, hi) {
        (CollisionCategory::Monster, CollisionCategory::Projectile) => {
            Some(ContactKind::ProjectileHitsMonster)
        }
        _ => None,
    }
}

/// Contact volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { center: Vec2, half: Vec2 },
}

/// A contact-capable entity as seen by one detection pass
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: EntityId,
    pub category: CollisionCategory,
    pub shape: Shape,
}

/// Check whether two shapes overlap (touching edges count)
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    match (*a, *b) {
        (
            Shape::Circle { center: c1, radius: r1 },
            Shape::Circle { center: c2, radius: r2 },
        ) => (c1 - c2).length_squared() <= (r1 + r2) * (r1 + r2),
        (Shape::Circle { center, radius }, Shape::Rect { center: rc, half })
        | (Shape::Rect { center: rc, half }, Shape::Circle { center, radius }) => {
            // Closest point on the rectangle to the circle center
            let closest = center.clamp(rc - half, rc + half);
            (center - closest).length_squared() <= radius * radius
        }
        (Shape::Rect { center: c1, half: h1 }, Shape::Rect { center: c2, half: h2 }) => {
            let d = (c1 - c2).abs();
            d.x <= h1.x + h2.x && d.y <= h1.y + h2.y
        }
    }
}

/// A newly touching pair, ordered (lower category, higher category)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactKind,
    pub first: EntityId,
    pub second: EntityId,
}

/// Tracks which qualifying pairs were touching last pass so only
/// begin-contacts are reported.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: HashSet<(EntityId, EntityId)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every pair of bodies and return contacts that began this pass
    pub fn begin_contacts(&mut self, bodies: &[Body]) -> Vec<Contact> {
        let mut now_touching = HashSet::new();
        let mut began = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let Some(kind) = classify(a.category, b.category) else {
                    continue;
                };
                if !overlaps(&a.shape, &b.shape) {
                    continue;
                }
                let (first, second) = if a.category.bits() <= b.category.bits() {
                    (a.id, b.id)
                } else {
                    (b.id, a.id)
                };
                if !self.touching.contains(&(first, second)) {
                    began.push(Contact { kind, first, second });
                }
                now_touching.insert((first, second));
            }
        }

        self.touching = now_touching;
        began
    }

    /// Drop every pair involving a destroyed entity
    pub fn forget(&mut self, id: EntityId) {
        self.touching.retain(|&(a, b)| a != id && b != id);
    }

    pub fn touching_count(&self) -> usize {
        self.touching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(id: EntityId, category: CollisionCategory, x: f32, y: f32, r: f32) -> Body {
        Body {
            id,
            category,
            shape: Shape::Circle {
                center: Vec2::new(x, y),
                radius: r,
            },
        }
    }

    fn rect(id: EntityId, category: CollisionCategory, x: f32, y: f32, w: f32, h: f32) -> Body {
        Body {
            id,
            category,
            shape: Shape::Rect {
                center: Vec2::new(x, y),
                half: Vec2::new(w / 2.0, h / 2.0),
            },
        }
    }

    #[test]
    fn test_classify_table() {
        use CollisionCategory as C;
        let hit = Some(ContactKind::ProjectileHitsMonster);
        assert_eq!(classify(C::Monster, C::Projectile), hit);
        assert_eq!(classify(C::Projectile, C::Monster), hit);
        assert_eq!(classify(C::Monster, C::Monster), None);
        assert_eq!(classify(C::Projectile, C::Projectile), None);
        assert_eq!(classify(C::None, C::Projectile), None);
        assert_eq!(classify(C::All, C::Monster), None);
    }

    #[test]
    fn test_order_pair_ascending() {
        use CollisionCategory as C;
        assert_eq!(order_pair(C::Projectile, C::Monster), (C::Monster, C::Projectile));
        assert_eq!(order_pair(C::Monster, C::Projectile), (C::Monster, C::Projectile));
        assert_eq!(order_pair(C::All, C::None), (C::None, C::All));
    }

    #[test]
    fn test_detection_only() {
        assert_eq!(CollisionCategory::Monster.collision_mask(), 0);
        assert_eq!(CollisionCategory::Projectile.collision_mask(), 0);
    }

    #[test]
    fn test_circle_rect_overlap() {
        let star = Shape::Circle {
            center: Vec2::new(100.0, 100.0),
            radius: 8.0,
        };
        let near = Shape::Rect {
            center: Vec2::new(125.0, 100.0),
            half: Vec2::new(20.0, 20.0),
        };
        let far = Shape::Rect {
            center: Vec2::new(130.0, 100.0),
            half: Vec2::new(20.0, 20.0),
        };
        assert!(overlaps(&star, &near));
        assert!(overlaps(&near, &star));
        assert!(!overlaps(&star, &far));
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        let star = Shape::Circle {
            center: Vec2::new(0.0, 0.0),
            radius: 8.0,
        };
        // Corner at (7, 7) is ~9.9 away
        let corner = Shape::Rect {
            center: Vec2::new(17.0, 17.0),
            half: Vec2::new(10.0, 10.0),
        };
        assert!(!overlaps(&star, &corner));
    }

    #[test]
    fn test_begin_contact_reported_once() {
        let mut tracker = ContactTracker::new();
        let bodies = [
            circle(5, CollisionCategory::Projectile, 100.0, 100.0, 8.0),
            rect(3, CollisionCategory::Monster, 110.0, 100.0, 40.0, 40.0),
        ];

        let contacts = tracker.begin_contacts(&bodies);
        assert_eq!(
            contacts,
            vec![Contact {
                kind: ContactKind::ProjectileHitsMonster,
                first: 3,
                second: 5,
            }]
        );

        // Still touching: not a new contact
        assert!(tracker.begin_contacts(&bodies).is_empty());
        assert_eq!(tracker.touching_count(), 1);

        tracker.forget(5);
        assert_eq!(tracker.touching_count(), 0);
    }

    #[test]
    fn test_same_category_never_contacts() {
        let mut tracker = ContactTracker::new();
        let bodies = [
            rect(1, CollisionCategory::Monster, 100.0, 100.0, 40.0, 40.0),
            rect(2, CollisionCategory::Monster, 100.0, 100.0, 40.0, 40.0),
            circle(3, CollisionCategory::Projectile, 300.0, 100.0, 8.0),
            circle(4, CollisionCategory::Projectile, 300.0, 100.0, 8.0),
        ];
        assert!(tracker.begin_contacts(&bodies).is_empty());
    }
}
