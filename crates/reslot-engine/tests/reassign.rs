use reslot_common::{CircuitKey, GridLayout};
use reslot_engine::accessor::read_key_at;
use reslot_engine::{Direction, PanelGroup, PanelResolver, ReorderError, move_circuits};
use reslot_grid::{MemoryGrid, ScheduleGrid};

fn layout() -> GridLayout {
    GridLayout {
        first_data_row: 2,
        key_col: 1,
        content_col: 2,
        scratch_start: 12,
        scratch_end: 14,
    }
}

/// Test double for the external schedule lookup.
struct PanelBook {
    grids: Vec<(String, MemoryGrid)>,
}

impl PanelBook {
    fn new() -> Self {
        Self { grids: Vec::new() }
    }

    fn add(&mut self, panel: &str, rows: &[(u32, u32)]) {
        let layout = layout();
        let mut grid = MemoryGrid::for_layout(&layout);
        for &(row, key) in rows {
            grid.seed_circuit(&layout, row, CircuitKey::new(key), &format!("circuit {key}"))
                .unwrap();
        }
        self.grids.push((panel.to_string(), grid));
    }

    fn grid(&self, panel: &str) -> &MemoryGrid {
        &self
            .grids
            .iter()
            .find(|(name, _)| name == panel)
            .unwrap()
            .1
    }
}

impl PanelResolver for PanelBook {
    type Grid = MemoryGrid;

    fn schedule_for(&mut self, panel: &str) -> Option<&mut MemoryGrid> {
        self.grids
            .iter_mut()
            .find(|(name, _)| name == panel)
            .map(|(_, grid)| grid)
    }
}

fn key_at(grid: &MemoryGrid, row: u32) -> Option<u32> {
    read_key_at(grid, &layout(), row).unwrap().map(CircuitKey::get)
}

fn keys(panel: &str) -> PanelGroup {
    PanelGroup::new(panel, Vec::new())
}

#[test]
fn empty_selection_is_nothing_to_do() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10)]);

    let summary =
        move_circuits(&mut book, &[], Direction::Down, &layout()).unwrap();
    assert!(summary.is_nothing_to_do());

    let summary =
        move_circuits(&mut book, &[keys("LP-1")], Direction::Down, &layout()).unwrap();
    assert!(summary.is_nothing_to_do());
    assert_eq!(key_at(book.grid("LP-1"), 2), Some(10));
}

#[test]
fn unresolved_panel_is_skipped_while_others_proceed() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10)]);

    let groups = [
        PanelGroup::new("GHOST", vec![CircuitKey::new(1)]),
        PanelGroup::new("LP-1", vec![CircuitKey::new(10)]),
    ];
    let summary = move_circuits(&mut book, &groups, Direction::Down, &layout()).unwrap();

    assert_eq!(summary.panels_skipped(), 1);
    assert_eq!(summary.moved_count(), 1);
    assert_eq!(key_at(book.grid("LP-1"), 3), Some(10));
}

#[test]
fn each_panel_commits_independently() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10), (3, 11)]);
    book.add("LP-2", &[(4, 10)]);

    let groups = [
        PanelGroup::new("LP-1", vec![CircuitKey::new(10)]),
        PanelGroup::new("LP-2", vec![CircuitKey::new(10)]),
    ];
    let summary = move_circuits(&mut book, &groups, Direction::Down, &layout()).unwrap();

    assert_eq!(summary.moved_count(), 2);
    // LP-1 rotated 10 past 11; LP-2 moved its own 10 directly.
    assert_eq!(key_at(book.grid("LP-1"), 2), Some(11));
    assert_eq!(key_at(book.grid("LP-1"), 3), Some(10));
    assert_eq!(key_at(book.grid("LP-2"), 5), Some(10));
    assert_eq!(
        summary.report_for("LP-2").unwrap().moved_count(),
        1
    );
}

#[test]
fn a_failing_panel_aborts_after_earlier_panels_committed() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10)]);
    book.add("LP-2", &[(2, 20)]);
    book.grids[1].1.lock_row(3);
    let lp2_before = book.grid("LP-2").cells().unwrap();

    let groups = [
        PanelGroup::new("LP-1", vec![CircuitKey::new(10)]),
        PanelGroup::new("LP-2", vec![CircuitKey::new(20)]),
    ];
    let err = move_circuits(&mut book, &groups, Direction::Down, &layout()).unwrap_err();
    assert!(matches!(err, ReorderError::MoveFailed { .. }));

    // The first panel's transaction already committed; the failing one
    // rolled back.
    assert_eq!(key_at(book.grid("LP-1"), 3), Some(10));
    assert_eq!(book.grid("LP-2").cells().unwrap(), lp2_before);
}

#[test]
fn invalid_layout_is_rejected_up_front() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10)]);

    let bad = GridLayout {
        key_col: 2,
        ..layout()
    };
    let err = move_circuits(
        &mut book,
        &[PanelGroup::new("LP-1", vec![CircuitKey::new(10)])],
        Direction::Down,
        &bad,
    )
    .unwrap_err();
    assert!(matches!(err, ReorderError::Layout(_)));
    assert_eq!(key_at(book.grid("LP-1"), 2), Some(10));
}

#[test]
fn move_up_through_the_driver() {
    let mut book = PanelBook::new();
    book.add("LP-1", &[(2, 10), (3, 11), (4, 12), (5, 13)]);

    let groups = [PanelGroup::new("LP-1", vec![CircuitKey::new(12)])];
    let summary = move_circuits(&mut book, &groups, Direction::Up, &layout()).unwrap();

    assert_eq!(summary.moved_count(), 1);
    let grid = book.grid("LP-1");
    assert_eq!(key_at(grid, 2), Some(12));
    assert_eq!(key_at(grid, 3), Some(10));
    assert_eq!(key_at(grid, 4), Some(11));
    assert_eq!(key_at(grid, 5), Some(13));
}
