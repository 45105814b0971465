#![deny(clippy::all)]
#![forbid(unsafe_code)]

use pixels_main_support::{WindowOptions, animate};
use predprey_grid::Random;
use predprey_sim::{PredPreyWorld, RuleConfig};
use std::time::Duration;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 500;
const CELL_PIXEL_WIDTH: u32 = 2;
const TICK_MILLIS: u64 = 10;

fn main() {
    env_logger::init();
    animate(
        WindowOptions {
            title: "Predator-Prey CA Model",
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            tick: Duration::from_millis(TICK_MILLIS),
        },
        |window_size| {
            PredPreyWorld::new(
                window_size.width / CELL_PIXEL_WIDTH,
                window_size.height / CELL_PIXEL_WIDTH,
                RuleConfig::default(),
                Random::new(),
            )
        },
    );
}
