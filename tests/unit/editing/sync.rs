//! Tests for presentation sync targets and spawn placements

#[cfg(test)]
mod tests {
    use gridlevel::editing::engine::GridEditingEngine;
    use gridlevel::editing::sync::{RecordingSync, placements};
    use gridlevel::math::coordinates::GridCoordinateMapper;
    use gridlevel::spatial::cell::{ColorId, GridPosition};
    use gridlevel::spatial::footprint::{ItemSize, Rotation};
    use gridlevel::spatial::grid::GridStore;

    // Tests placements cover occupied colored cells only, lifted above the grid
    // Verified by listing every occupied cell regardless of color
    #[test]
    fn test_placements_skip_uncolored_and_stale_cells() {
        let mut engine = GridEditingEngine::new(GridStore::new());
        assert!(engine.open(4, 4).is_ok());

        let red = ColorId::new(1);
        assert!(engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), red).is_ok());
        assert!(engine
            .toggle_occupancy(2, 1, ItemSize::OneByOne, Rotation::default(), ColorId::NONE)
            .is_ok());
        // Toggled on and off again: stale color, unoccupied
        assert!(engine.toggle_occupancy(3, 3, ItemSize::OneByOne, Rotation::default(), red).is_ok());
        assert!(engine.toggle_occupancy(3, 3, ItemSize::OneByOne, Rotation::default(), red).is_ok());
        assert!(engine.toggle_occupancy(1, 2, ItemSize::OneByOne, Rotation::default(), ColorId::new(4)).is_ok());

        let Ok(mapper) = GridCoordinateMapper::new(50.0_f32) else {
            unreachable!("positive spacing should be accepted");
        };
        let Ok(working) = engine.working_copy() else {
            unreachable!("opened engine has a working copy");
        };
        let spawned = placements(working.grid(), &mapper, 0.25);

        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned.first().map(|p| p.position), Some(GridPosition::new(0, 0)));
        assert_eq!(spawned.first().map(|p| p.color_id), Some(red));
        let second = spawned.get(1);
        assert_eq!(second.map(|p| p.position), Some(GridPosition::new(1, 2)));
        assert!(second.is_some_and(|p| {
            (p.world[0] - 50.0).abs() < f32::EPSILON
                && (p.world[1] - 0.25).abs() < f32::EPSILON
                && (p.world[2] - 100.0).abs() < f32::EPSILON
        }));
    }

    // Tests the recording target receives every written cell and replacement
    // Verified by notifying only the anchor cell of a footprint
    #[test]
    fn test_recording_sync_receives_mutations() {
        let mut engine = GridEditingEngine::with_sync(GridStore::new(), RecordingSync::default());
        assert!(engine.open(3, 3).is_ok());
        assert_eq!(engine.sync().replacements, 1);

        assert!(engine
            .toggle_occupancy(1, 1, ItemSize::TwoByTwo, Rotation::default(), ColorId::new(2))
            .is_ok());
        assert!(engine.set_cell_color(0, 0, ColorId::new(3)).is_ok());

        let changed = engine.sync_mut().drain();
        let positions: Vec<GridPosition> = changed.iter().map(|cell| cell.position).collect();
        assert_eq!(
            positions,
            vec![
                GridPosition::new(1, 1),
                GridPosition::new(2, 1),
                GridPosition::new(1, 2),
                GridPosition::new(0, 0),
            ]
        );
        assert!(engine.sync().changed.is_empty());

        assert!(engine.reset_all().is_ok());
        assert!(engine.load().is_ok());
        assert_eq!(engine.sync().replacements, 3);
    }

    // Tests a footprint entirely off the grid notifies nothing
    // Verified by notifying with an empty slice
    #[test]
    fn test_no_notification_without_writes() {
        let mut engine = GridEditingEngine::with_sync(GridStore::new(), RecordingSync::default());
        assert!(engine.open(2, 2).is_ok());

        let written =
            engine.toggle_occupancy(5, 5, ItemSize::ThreeByTwo, Rotation::default(), ColorId::new(1));
        assert!(written.is_ok_and(|cells| cells.is_empty()));
        assert!(engine.sync().changed.is_empty());
    }
}
