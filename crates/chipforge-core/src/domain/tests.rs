//! Tests for domain types (board, chip, strategy, snapshots).

use super::*;

// ============================================================================
// Board / Cell Type Tests
// ============================================================================

#[test]
fn test_board_star_range() {
    assert!(BoardRef::new("Alpha", 0).is_err());
    assert!(BoardRef::new("Alpha", 1).is_ok());
    assert!(BoardRef::new("Alpha", 5).is_ok());
    assert!(BoardRef::new("Alpha", 6).is_err());
}

#[test]
fn test_cell_type_ordering() {
    let four: CellType = "4".parse().unwrap();
    let five_a: CellType = "5A".parse().unwrap();
    let five_b: CellType = "5b".parse().unwrap();
    let six: CellType = "6".parse().unwrap();

    assert!(four < five_a);
    assert!(five_a < five_b);
    assert!(five_b < six);
    assert_eq!(five_b.to_string(), "5B");
}

#[test]
fn test_cell_type_rejects_garbage() {
    assert!("".parse::<CellType>().is_err());
    assert!("0".parse::<CellType>().is_err());
    assert!("7".parse::<CellType>().is_err());
    assert!("5AB".parse::<CellType>().is_err());
    assert!("55".parse::<CellType>().is_err());
}

// ============================================================================
// Chip Tests
// ============================================================================

fn chip(cells: u8) -> Chip {
    Chip::new(CellType::new(cells).unwrap(), Color::Orange, 5)
}

#[test]
fn test_points_valid_when_budget_used() {
    let valid = chip(4).with_points(StatPoints::new(2, 0, 1, 1));
    let short = chip(4).with_points(StatPoints::new(1, 0, 1, 1));
    let over = chip(4).with_points(StatPoints::new(3, 0, 1, 1));

    assert!(valid.is_points_valid());
    assert!(!short.is_points_valid());
    assert!(!over.is_points_valid());
}

#[test]
fn test_max_level_copies() {
    let original = chip(6).with_level(7);
    let maxed = original.with_max_level();

    assert_eq!(original.level(), 7);
    assert_eq!(maxed.level(), MAX_CHIP_LEVEL);
}

#[test]
fn test_level_is_clamped() {
    assert_eq!(chip(3).with_level(99).level(), MAX_CHIP_LEVEL);
}

#[test]
fn test_type_geq() {
    let floor: CellType = "5B".parse().unwrap();
    assert!(chip(6).type_geq(floor));
    assert!(!chip(5).type_geq(floor));
    assert!(!chip(4).type_geq(floor));
}

// ============================================================================
// Strategy Tests
// ============================================================================

struct OnlySubset;

impl PresetCatalog for OnlySubset {
    fn has_partial(&self, _board: &BoardRef) -> bool {
        false
    }

    fn min_type(&self, _board: &BoardRef, _variant: DictionaryVariant) -> Option<CellType> {
        Some(CellType::new(5).unwrap())
    }

    fn preset_exists(&self, _board: &BoardRef, variant: DictionaryVariant) -> bool {
        variant == DictionaryVariant::Subset
    }

    fn has_any_preset(&self, _board: &BoardRef) -> bool {
        true
    }
}

#[test]
fn test_dictionary_plan_requires_preset() {
    let board = BoardRef::new("Alpha", 5).unwrap();

    let plan = DictionaryPlan::verify(&board, DictionaryVariant::Subset, &OnlySubset).unwrap();
    assert_eq!(plan.variant(), DictionaryVariant::Subset);
    assert_eq!(plan.min_type(), Some(CellType::new(5).unwrap()));

    assert!(DictionaryPlan::verify(&board, DictionaryVariant::Extended, &OnlySubset).is_none());
}

#[test]
fn test_strategy_size_floor() {
    let board = BoardRef::new("Alpha", 5).unwrap();
    let plan = DictionaryPlan::verify(&board, DictionaryVariant::Subset, &OnlySubset).unwrap();

    assert_eq!(
        Strategy::Dictionary(plan).size_floor(),
        Some(CellType::new(5).unwrap())
    );
    assert_eq!(Strategy::Fallback.size_floor(), None);
    assert_eq!(Strategy::Fallback.kind(), StrategyKind::Fallback);
}

#[test]
fn test_variant_index() {
    assert_eq!(DictionaryVariant::Subset.index(), 0);
    assert_eq!(DictionaryVariant::Extended.index(), 1);
}

// ============================================================================
// Candidate / Snapshot Tests
// ============================================================================

#[test]
fn test_candidate_set_is_detached_from_source() {
    let mut inventory = vec![chip(4), chip(6)];
    let candidates: CandidateSet = inventory.iter().cloned().collect();

    inventory[0] = chip(1);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].cell_type().cells(), 4);
}

#[test]
fn test_snapshot_push_does_not_touch_shared_copy() {
    let mut live = ResultSnapshot::new();
    live.push(BoardCombination::default());
    let published = live.clone();

    live.push(BoardCombination::new(vec![Placement {
        candidate: 0,
        rotation: 1,
        row: 2,
        col: 3,
    }]));

    assert_eq!(published.revision(), 1);
    assert_eq!(published.len(), 1);
    assert_eq!(live.revision(), 2);
    assert_eq!(live.len(), 2);
}

#[test]
fn test_job_state_is_active() {
    assert!(!JobState::Stopped.is_active());
    assert!(JobState::Running.is_active());
    assert!(JobState::Paused.is_active());
}
