//! The two scenes of the page and how to mount them.
//!
//! - `board` is the hero background, sized to the window
//! - `piece` is the king with its halo, sized to its container
//!
//! Each scene gets its own seeded generator; nothing is shared between them.

pub mod board;
pub mod piece;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::{BoardConfig, PieceConfig, TableauConfig},
    context::{Sizing, SurfaceOptions},
    flow::{SceneFlow, SceneMount},
};

pub use board::BoardScene;
pub use piece::{PieceScene, PieceState};

pub const BOARD: &str = "board";
pub const PIECE: &str = "piece";

pub fn board_mount(config: BoardConfig, seed: u64) -> SceneMount {
    SceneMount {
        name: BOARD.to_string(),
        container: config.container.clone(),
        sizing: Sizing::Window,
        options: SurfaceOptions::default(),
        build: Box::new(move |_| {
            let mut rng = StdRng::seed_from_u64(seed);
            Box::new(BoardScene::new(config, &mut rng)) as Box<dyn SceneFlow>
        }),
    }
}

pub fn piece_mount(config: PieceConfig, seed: u64) -> SceneMount {
    SceneMount {
        name: PIECE.to_string(),
        container: config.container.clone(),
        sizing: Sizing::Container,
        options: SurfaceOptions::default(),
        build: Box::new(move |_| {
            let mut rng = StdRng::seed_from_u64(seed);
            Box::new(PieceScene::new(config, &mut rng)) as Box<dyn SceneFlow>
        }),
    }
}

/// Both scenes, board first.
pub fn mounts(config: &TableauConfig, seed: u64) -> Vec<SceneMount> {
    vec![
        board_mount(config.board.clone(), seed),
        piece_mount(config.piece.clone(), seed.wrapping_add(1)),
    ]
}
