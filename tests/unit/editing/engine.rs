//! Tests for the editing session: toggles, colors, reset and save/load

#[cfg(test)]
mod tests {
    use gridlevel::editing::palette::{ColorPalette, Palette, PaletteEntry, Rgba};
    use gridlevel::io::configuration::EMPTY_COLOR;
    use gridlevel::spatial::cell::{ColorId, GridCell, GridPosition};
    use gridlevel::spatial::footprint::{ItemSize, Rotation, resolve_index};
    use gridlevel::spatial::grid::GridStore;
    use gridlevel::{Brush, EditState, GridEditingEngine, LevelError};

    const RED: ColorId = ColorId::new(1);
    const BLUE: ColorId = ColorId::new(2);

    fn opened(width: usize, height: usize) -> GridEditingEngine {
        let mut engine = GridEditingEngine::new(GridStore::new());
        assert!(engine.open(width, height).is_ok());
        engine
    }

    fn occupied(engine: &GridEditingEngine, x: i32, y: i32) -> bool {
        engine.cell(x, y).is_ok_and(|cell| cell.is_occupied)
    }

    fn palette() -> Palette {
        Palette::new(vec![
            PaletteEntry {
                color_id: ColorId::NONE,
                name: "None".to_string(),
                rgba: [0, 0, 0, 0],
            },
            PaletteEntry {
                color_id: RED,
                name: "Red".to_string(),
                rgba: [200, 10, 10, 255],
            },
        ])
    }

    // Tests toggling twice restores occupancy while color follows the last call
    // Verified by clearing color when a cell is toggled off
    #[test]
    fn test_double_toggle_restores_occupancy() {
        let mut engine = opened(4, 4);

        for size in ItemSize::ALL {
            let first = engine.toggle_occupancy(1, 1, size, Rotation::default(), RED);
            let second = engine.toggle_occupancy(1, 1, size, Rotation::default(), BLUE);
            assert!(first.is_ok());
            assert!(second.is_ok_and(|cells| !cells.is_empty()));

            assert!(
                engine.occupied_cells().is_ok_and(|cells| cells.is_empty()),
                "double toggle of {size:?} should leave the grid empty"
            );
            assert!(engine.cell(1, 1).is_ok_and(|cell| cell.color_id == BLUE));
        }
    }

    // Tests toggle flips only the footprint and colors every covered cell
    // Verified by toggling the whole bounding box of the shape
    #[test]
    fn test_toggle_covers_exact_footprint() {
        let mut engine = opened(5, 5);
        let written =
            engine.toggle_occupancy(1, 1, ItemSize::ThreeByTwo, Rotation::new(90, 0), RED);

        assert_eq!(
            written.ok(),
            Some(vec![
                GridPosition::new(1, 1),
                GridPosition::new(2, 1),
                GridPosition::new(3, 1),
                GridPosition::new(2, 2),
            ])
        );
        assert!(occupied(&engine, 2, 2));
        assert!(!occupied(&engine, 1, 2));
        assert!(!occupied(&engine, 3, 2));
        assert_eq!(engine.occupied_cells().map(|cells| cells.len()).ok(), Some(4));
        assert!(
            engine
                .occupied_cells()
                .is_ok_and(|cells| cells.iter().all(|cell| cell.color_id == RED))
        );
    }

    // Tests toggling off still writes the new color
    // Verified by only writing color on the occupy branch
    #[test]
    fn test_toggle_off_overwrites_color() {
        let mut engine = opened(2, 2);
        assert!(engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert!(engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), BLUE).is_ok());

        assert_eq!(
            engine.cell(0, 0).ok(),
            Some(GridCell {
                is_occupied: false,
                color_id: BLUE,
                position: GridPosition::new(0, 0),
            })
        );
    }

    // Tests anchors partly or wholly off the grid place what fits
    // Verified by rejecting the whole shape when any cell is out of bounds
    #[test]
    fn test_toggle_clips_at_edges() {
        let mut engine = opened(3, 3);

        let written = engine.toggle_occupancy(-1, 0, ItemSize::ThreeByTwo, Rotation::default(), RED);
        assert_eq!(
            written.ok(),
            Some(vec![
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(0, 1),
            ])
        );

        let off_grid = engine.toggle_occupancy(10, -4, ItemSize::TwoByTwo, Rotation::default(), RED);
        assert!(off_grid.is_ok_and(|cells| cells.is_empty()));
    }

    // Tests painting changes color but not occupancy and is bounds checked
    // Verified by setting occupancy when painting
    #[test]
    fn test_set_cell_color() {
        let mut engine = opened(3, 2);

        assert!(engine.set_cell_color(2, 1, RED).is_ok());
        assert_eq!(
            engine.cell(2, 1).ok(),
            Some(GridCell {
                is_occupied: false,
                color_id: RED,
                position: GridPosition::new(2, 1),
            })
        );
        assert!(matches!(
            engine.set_cell_color(3, 0, RED),
            Err(LevelError::OutOfBounds { x: 3, y: 0, .. })
        ));
    }

    // Tests the session state machine through edit, save, load and reset
    // Verified by leaving the state at Dirty after save
    #[test]
    fn test_state_transitions() {
        let mut engine = GridEditingEngine::new(GridStore::new());
        assert_eq!(engine.state(), EditState::Uninitialized);

        assert!(engine.open(3, 3).is_ok());
        assert_eq!(engine.state(), EditState::Initialized);
        assert!(!engine.is_dirty());

        assert!(engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert_eq!(engine.state(), EditState::Dirty);
        assert!(engine.is_dirty());

        assert!(engine.save().is_ok());
        assert_eq!(engine.state(), EditState::Committed);
        assert!(!engine.is_dirty());

        assert!(engine.set_cell_color(1, 1, BLUE).is_ok());
        assert!(engine.load().is_ok());
        assert_eq!(engine.state(), EditState::Reverted);

        assert!(engine.reset_all().is_ok());
        assert_eq!(engine.state(), EditState::Initialized);
    }

    // Tests load discards unsaved edits and save persists them
    // Verified by committing on load
    #[test]
    fn test_load_discards_and_save_keeps() {
        let mut engine = opened(3, 3);

        assert!(engine.toggle_occupancy(2, 2, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert!(engine.store().get_cell(2, 2).is_ok_and(|cell| !cell.is_occupied));
        assert!(engine.load().is_ok());
        assert!(!occupied(&engine, 2, 2));

        assert!(engine.toggle_occupancy(2, 2, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert!(engine.save().is_ok());
        assert!(engine.store().get_cell(2, 2).is_ok_and(|cell| cell.is_occupied));
        assert!(engine.load().is_ok());
        assert!(occupied(&engine, 2, 2));
    }

    // Tests reset writes both the working copy and the store
    // Verified by resetting only the working copy
    #[test]
    fn test_reset_all_clears_both() {
        let mut engine = opened(4, 3);
        assert!(engine.toggle_occupancy(0, 0, ItemSize::ThreeByTwo, Rotation::default(), RED).is_ok());
        assert!(engine.save().is_ok());
        assert!(engine.toggle_occupancy(2, 1, ItemSize::TwoByTwo, Rotation::default(), BLUE).is_ok());

        assert!(engine.reset_all().is_ok());

        let cleared = |cell: &GridCell| !cell.is_occupied && cell.color_id == ColorId::NONE;
        assert!(engine.working_copy().is_ok_and(|w| w.cells().all(cleared)));
        assert!(engine.store().grid().iter().all(cleared));
        assert!(
            engine
                .store()
                .get_cell(3, 2)
                .is_ok_and(|cell| cell.position == GridPosition::new(3, 2))
        );
    }

    // Tests reopening with the stored dimensions keeps saved data
    // Verified by reinitializing the store on every open
    #[test]
    fn test_open_preserves_matching_store() {
        let mut engine = opened(3, 3);
        assert!(engine.toggle_occupancy(1, 0, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert!(engine.save().is_ok());

        let mut reopened = GridEditingEngine::new(engine.into_store());
        assert!(reopened.open(3, 3).is_ok());
        assert!(occupied(&reopened, 1, 0));

        assert!(reopened.open(4, 3).is_ok());
        assert!(!occupied(&reopened, 1, 0));
        assert_eq!(reopened.width(), 4);
    }

    // Tests color queries: palette color when occupied, sentinel otherwise
    // Verified by returning the palette color for unoccupied cells
    #[test]
    fn test_query_color() {
        let mut engine = opened(3, 1);
        let palette = palette();

        assert!(engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), RED).is_ok());
        assert!(engine.toggle_occupancy(1, 0, ItemSize::OneByOne, Rotation::default(), BLUE).is_ok());
        assert!(engine.set_cell_color(2, 0, RED).is_ok());

        assert_eq!(engine.query_color(0, 0, &palette).ok(), Some([200, 10, 10, 255]));
        // Occupied but missing from the palette
        assert_eq!(engine.query_color(1, 0, &palette).ok(), Some(EMPTY_COLOR));
        // Colored but unoccupied
        assert_eq!(engine.query_color(2, 0, &palette).ok(), Some(EMPTY_COLOR));
        assert!(matches!(
            engine.query_color(0, 1, &palette),
            Err(LevelError::OutOfBounds { .. })
        ));
    }

    // Tests the brush helpers use the current selection
    // Verified by ignoring the brush size
    #[test]
    fn test_brush_application_and_color() {
        let mut engine = opened(3, 3);
        let brush = Brush {
            size: ItemSize::TwoByTwo,
            rotation: Rotation::new(0, 90),
            color: RED,
        };

        let written = engine.apply_brush(0, 0, &brush);
        assert!(written.is_ok_and(|cells| cells.len() == 3));
        assert_eq!(brush.display_color(&palette()), [200, 10, 10, 255]);
        assert_eq!(
            Brush {
                color: BLUE,
                ..brush
            }
            .display_color(&palette()),
            EMPTY_COLOR
        );
    }

    // Tests the brush color works with any palette source
    // Verified by requiring the concrete palette type
    #[test]
    fn test_brush_color_from_custom_palette() {
        struct Grayscale;

        impl ColorPalette for Grayscale {
            fn display_color(&self, color: ColorId) -> Option<Rgba> {
                let level = u8::try_from(color.slot()).ok()?;
                Some([level, level, level, 255])
            }
        }

        let brush = Brush {
            color: ColorId::new(40),
            ..Brush::default()
        };
        assert_eq!(brush.display_color(&Grayscale), [40, 40, 40, 255]);
        assert_eq!(
            Brush {
                color: ColorId::new(300),
                ..brush
            }
            .display_color(&Grayscale),
            EMPTY_COLOR
        );
    }

    // Tests a footprint resolved from a raw size index toggles like its size
    // Verified by toggling only the anchor for resolved footprints
    #[test]
    fn test_toggle_footprint_from_size_index() {
        let mut engine = opened(3, 3);

        let written = engine.toggle_footprint(0, 0, resolve_index(1, Rotation::default()), RED);
        assert_eq!(
            written.ok(),
            Some(vec![
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(0, 1),
            ])
        );

        let unknown = engine.toggle_footprint(2, 2, resolve_index(7, Rotation::default()), BLUE);
        assert_eq!(unknown.ok(), Some(vec![GridPosition::new(2, 2)]));
        assert_eq!(engine.occupied_cells().map(|cells| cells.len()).ok(), Some(4));
    }

    // Tests every operation before the first capture reports an uninitialized grid
    // Verified by lazily initializing a 0x0 grid
    #[test]
    fn test_operations_require_capture() {
        let mut engine = GridEditingEngine::new(GridStore::new());

        assert!(matches!(engine.load(), Err(LevelError::UninitializedGrid { .. })));
        assert!(matches!(engine.save(), Err(LevelError::UninitializedGrid { .. })));
        assert!(matches!(engine.reset_all(), Err(LevelError::UninitializedGrid { .. })));
        assert!(matches!(
            engine.toggle_occupancy(0, 0, ItemSize::OneByOne, Rotation::default(), RED),
            Err(LevelError::UninitializedGrid { .. })
        ));
        assert!(matches!(
            engine.set_cell_color(0, 0, RED),
            Err(LevelError::UninitializedGrid { .. })
        ));
        assert!(matches!(engine.cell(0, 0), Err(LevelError::UninitializedGrid { .. })));
        assert_eq!(engine.width(), 0);
        assert_eq!(engine.state(), EditState::Uninitialized);
    }
}
