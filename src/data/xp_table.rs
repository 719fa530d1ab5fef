//! Fixed experience curve for in-run leveling.

/// XP needed to advance from level `i` to `i + 1`. Index 0 is unused.
const XP_REQUIREMENTS: [u64; 21] = [
    0, 10, 25, 45, 70, 100, 140, 190, 250, 320, 400, 500, 620, 760, 920, 1100, 1300, 1520, 1760,
    2020, 2300,
];

/// XP required to level up from `level`. Out-of-range levels use the last entry.
pub fn xp_required_for_level(level: u32) -> u64 {
    let index = level as usize;
    if index < 1 || index >= XP_REQUIREMENTS.len() {
        return XP_REQUIREMENTS[XP_REQUIREMENTS.len() - 1];
    }
    XP_REQUIREMENTS[index]
}

/// Highest reachable level.
pub fn max_level() -> u32 {
    (XP_REQUIREMENTS.len() - 1) as u32
}

/// Total XP to go from level 1 to `level`.
pub fn total_xp_to_reach(level: u32) -> u64 {
    (1..level.min(max_level())).map(xp_required_for_level).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert_eq!(xp_required_for_level(1), 10);
        assert_eq!(xp_required_for_level(5), 100);
        assert_eq!(xp_required_for_level(20), 2300);
    }

    #[test]
    fn test_out_of_range_uses_last_entry() {
        assert_eq!(xp_required_for_level(0), 2300);
        assert_eq!(xp_required_for_level(21), 2300);
        assert_eq!(xp_required_for_level(u32::MAX), 2300);
    }

    #[test]
    fn test_curve_is_strictly_increasing() {
        for level in 1..max_level() {
            assert!(xp_required_for_level(level + 1) > xp_required_for_level(level));
        }
    }

    #[test]
    fn test_total_xp_to_reach() {
        assert_eq!(max_level(), 20);
        assert_eq!(total_xp_to_reach(1), 0);
        assert_eq!(total_xp_to_reach(2), 10);
        assert_eq!(total_xp_to_reach(4), 10 + 25 + 45);
    }
}
