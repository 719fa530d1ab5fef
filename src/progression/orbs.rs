//! XP orbs dropped by defeated enemies.
//!
//! An orb lands at the distance its enemy died. Orbs inside the player's
//! pickup range are pulled in at [`XP_ORB_ATTRACT_SPEED`]; the rest drift
//! closer as the player roams, at a fraction of the player's move speed.
//! An orb is collected once it is within [`XP_ORB_COLLECT_DISTANCE`].

use crate::core::constants::{XP_ORB_ATTRACT_SPEED, XP_ORB_COLLECT_DISTANCE, XP_ORB_SWEEP_FACTOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpOrb {
    pub xp: u32,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbField {
    orbs: Vec<XpOrb>,
}

impl OrbField {
    pub fn drop_orb(&mut self, xp: u32, distance: f64) {
        if xp == 0 {
            return;
        }
        self.orbs.push(XpOrb {
            xp,
            distance: distance.max(0.0),
        });
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &XpOrb> {
        self.orbs.iter()
    }

    /// Unscaled XP still lying on the field.
    pub fn uncollected_xp(&self) -> u64 {
        self.orbs.iter().map(|o| o.xp as u64).sum()
    }

    /// Moves every orb toward the player for `dt` seconds.
    ///
    /// Returns the XP of each orb collected this tick, in drop order.
    pub fn tick(&mut self, dt: f64, pickup_range: f64, move_speed: f64) -> Vec<u32> {
        if dt <= 0.0 {
            return Vec::new();
        }
        let sweep_speed = move_speed.max(0.0) * XP_ORB_SWEEP_FACTOR;

        let mut collected = Vec::new();
        self.orbs.retain_mut(|orb| {
            let speed = if orb.distance <= pickup_range {
                XP_ORB_ATTRACT_SPEED
            } else {
                sweep_speed
            };
            orb.distance = (orb.distance - speed * dt).max(0.0);
            if orb.distance < XP_ORB_COLLECT_DISTANCE {
                collected.push(orb.xp);
                false
            } else {
                true
            }
        });
        collected
    }
}
