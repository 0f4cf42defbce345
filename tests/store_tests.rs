use std::fs;
use std::path::PathBuf;

use lifegrid::Coord;
use lifegrid::grid::Grid;
use lifegrid::grid::LoadError;

/// A scratch path under the system temp dir, unique per test name.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lifegrid_{}_{}.life", name, std::process::id()))
}

fn cells(grid: &Grid) -> Vec<(Coord, Coord)> {
    let dim = grid.dim() as Coord;

    (0..dim)
        .flat_map(|r| (0..dim).map(move |c| (r, c)))
        .filter(|&(r, c)| grid.is_alive(r, c))
        .collect()
}

#[test]
fn save_then_load_round_trips() -> anyhow::Result<()> {
    let path = scratch("roundtrip");

    let mut original = Grid::seeded(10, 99);
    original.populate_random(23)?;
    original.save(&path)?;

    let mut restored = Grid::seeded(10, 0);
    restored.load(&path)?;

    assert_eq!(cells(&restored), cells(&original));
    assert_eq!(restored.live_count(), original.live_count());
    assert_eq!(restored.source(), Some(path.as_path()));

    fs::remove_file(&path)?;

    Ok(())
}

#[test]
fn load_missing_file_clears_and_errors() {
    let mut grid = Grid::seeded(4, 0);
    grid.populate_random(5).unwrap();

    let err = grid
        .load("tests/fixtures/does_not_exist.life")
        .unwrap_err();

    assert!(matches!(err, LoadError::Io(_)));
    assert_eq!(grid.live_count(), 0);
    assert_eq!(grid.generation(), 0);
}

#[test]
fn load_block_fixture() -> anyhow::Result<()> {
    let mut grid = Grid::seeded(4, 0);
    grid.load("tests/fixtures/block.life")?;

    assert_eq!(grid.live_count(), 4);
    for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        assert!(grid.is_alive(r, c));
    }

    // a freshly loaded block must be stable under the rules
    grid.step();
    assert_eq!(grid.live_count(), 4);

    Ok(())
}

#[test]
fn load_short_fixture_is_malformed() {
    let mut grid = Grid::seeded(4, 0);

    let err = grid.load("tests/fixtures/short.life").unwrap_err();

    assert!(matches!(err, LoadError::Malformed(_)));
    assert_eq!(grid.live_count(), 0);
}

#[test]
fn load_garbage_fixture_is_malformed() {
    let mut grid = Grid::seeded(4, 0);

    let err = grid.load("tests/fixtures/garbage.life").unwrap_err();

    assert!(matches!(err, LoadError::Malformed(_)));
    assert_eq!(grid.live_count(), 0);
}

#[test]
fn save_updates_source() -> anyhow::Result<()> {
    let path = scratch("source");

    let mut grid = Grid::seeded(4, 0);
    assert_eq!(grid.source(), None);

    grid.save(&path)?;
    assert_eq!(grid.source(), Some(path.as_path()));

    // clear keeps the label
    grid.clear();
    assert_eq!(grid.source(), Some(path.as_path()));

    fs::remove_file(&path)?;

    Ok(())
}
