use std::fs;

use parlife::B3S23;
use parlife::Grid;
use parlife::SimulationConfig;
use parlife::pattern;
use parlife::pattern::PatternError;
use parlife::simulate;

#[test]
fn binary_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("glider.bin");

    let glider = Grid::with_alive(8, [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    pattern::save(&path, &glider)?;

    assert_eq!(fs::metadata(&path)?.len(), 64);
    assert_eq!(pattern::load(&path, None)?, glider);

    Ok(())
}

#[test]
fn cells_to_binary_after_simulation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("blinker.cells");
    let output = dir.path().join("result.bin");

    fs::write(&input, "!Name: Blinker\n.....\n.....\n.OOO.\n")?;

    let grid = pattern::load(&input, Some(8))?;
    assert_eq!(grid.side(), 8);

    let config = SimulationConfig {
        generations: 1,
        workers: 2,
        rules: B3S23,
    };
    let outcome = simulate(&grid, &config)?;
    pattern::save(&output, &outcome.grid)?;

    let bytes = fs::read(&output)?;
    let alive: Vec<usize> = (0..bytes.len()).filter(|&i| bytes[i] == 1).collect();
    assert_eq!(alive, vec![8 + 2, 2 * 8 + 2, 3 * 8 + 2]);

    Ok(())
}

#[test]
fn cells_output_is_plaintext() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("block.cells");

    let block = Grid::with_alive(4, [(1, 1), (2, 1), (1, 2), (2, 2)]);
    pattern::save(&path, &block)?;

    assert_eq!(fs::read_to_string(&path)?, "....\n.OO.\n.OO.\n....\n");
    assert_eq!(pattern::load(&path, None)?, block);

    Ok(())
}

#[test]
fn load_errors_are_typed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let missing = pattern::load(&dir.path().join("missing.bin"), None);
    assert!(matches!(missing, Err(PatternError::Io { .. })));

    let odd = dir.path().join("odd.bin");
    fs::write(&odd, [0u8; 36])?;
    assert!(matches!(pattern::load(&odd, None), Err(PatternError::Bin(_))));

    let bad = dir.path().join("bad.cells");
    fs::write(&bad, "O?O\n")?;
    assert!(matches!(pattern::load(&bad, None), Err(PatternError::Cells(_))));

    Ok(())
}
