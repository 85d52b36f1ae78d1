use crate::catalog::Monster;
use crate::core::balance::group_difficulty;
use rand::Rng;

/// Total hit points of a lured group.
pub fn group_hp(monster: &Monster, group_size: u32) -> u64 {
    monster.hp.saturating_mul(group_size.max(1) as u64)
}

/// Where an offensive ability came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilitySource {
    Spell(String),
    Rune(String),
}

/// An automatic offensive action layered on top of the basic attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityHit {
    pub source: AbilitySource,
    pub name: String,
    /// Damage across the whole group.
    pub damage: u32,
    pub mana_spent: u32,
}

/// One counter attack from a monster group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAttack {
    /// Damage before mitigation.
    pub raw: u32,
    /// Damage that reaches the player.
    pub damage: u32,
}

impl CounterAttack {
    pub fn is_miss(&self) -> bool {
        self.damage == 0
    }
}

/// Rolls a group's counter attack and subtracts the player's mitigation.
pub fn roll_counter_attack<R: Rng>(
    monster: &Monster,
    group_size: u32,
    mitigation: u32,
    rng: &mut R,
) -> CounterAttack {
    let n = group_size.max(1);
    let lo = monster.damage_min.min(monster.damage_max);
    let base = rng.gen_range(lo..=monster.damage_max) as f64;
    let raw = (base * n as f64 * group_difficulty(n)).floor().max(0.0) as u32;
    CounterAttack {
        raw,
        damage: raw.saturating_sub(mitigation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_group_hp_scales() {
        let rat = Monster::new("rat", "Rat", 1, 20, (0, 8), (0, 4), 5);
        assert_eq!(group_hp(&rat, 1), 20);
        assert_eq!(group_hp(&rat, 4), 80);
        assert_eq!(group_hp(&rat, 0), 20);
    }

    #[test]
    fn test_counter_attack_fixed_damage() {
        let golem = Monster::new("golem", "Golem", 1, 20, (10, 10), (0, 0), 5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let hit = roll_counter_attack(&golem, 1, 3, &mut rng);
        assert_eq!(hit.raw, 10);
        assert_eq!(hit.damage, 7);

        // Three units: 10 * 3 * 1.16 = 34.8
        let hit = roll_counter_attack(&golem, 3, 0, &mut rng);
        assert_eq!(hit.raw, 34);
    }

    #[test]
    fn test_mitigation_never_goes_negative() {
        let rat = Monster::new("rat", "Rat", 1, 20, (0, 8), (0, 4), 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let hit = roll_counter_attack(&rat, 1, 100, &mut rng);
            assert!(hit.is_miss());
        }
    }
}
