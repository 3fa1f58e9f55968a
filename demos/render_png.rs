//! Renders a few justified, wrapped and shadowed lines into `debug/render_png.png`.
//!
//! Usage: `cargo run --example render_png -- <data dir> [language]`
//!
//! The data directory needs `engine/font_settings.txt` with a `font_regular`
//! section, optionally `engine/font_colors.txt`, and the referenced fonts below
//! `fonts/`.

use image::{ImageBuffer, Rgb};
use typeset::{Color, CpuBackend, DrawTarget, EngineConfig, FontEngine, Justify};

const WIDTH: usize = 480;
const HEIGHT: usize = 320;
const WRAP: i32 = 200;

const BODY: &str = "The old lighthouse keeper climbed the stairs every night, \
                    counting each step as if it might be the last.\nHe never missed one.";

#[allow(clippy::unwrap_used)]
fn main() {
    let mut args = std::env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| ".".to_string());
    let language = args.next().unwrap_or_else(|| "en".to_string());

    // 1. Build the engine from the data directory
    let config = EngineConfig {
        data_dir: data_dir.into(),
        language,
        ..Default::default()
    };
    let mut engine = match FontEngine::from_config(CpuBackend::new(WIDTH, HEIGHT), &config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    engine.backend_mut().screen_mut().fill(Color::new(20, 20, 25));

    // 2. Measure and lay out
    let block = engine.measure_block(BODY, WRAP).unwrap();
    println!("Block: {}x{}", block.width, block.height);

    let title = engine.lookup_color("menu_normal");
    let center_x = WIDTH as i32 / 2;
    engine
        .render_line_shadowed("Lighthouse", center_x, 10, Justify::Center, DrawTarget::Screen, title)
        .unwrap();

    let mut y = 10 + 2 * engine.active_line_height().unwrap();
    for justify in [Justify::Left, Justify::Right] {
        let x = match justify {
            Justify::Right => WIDTH as i32 - 10,
            _ => 10,
        };
        y = engine
            .render_wrapped_shadowed(BODY, x, y, justify, DrawTarget::Screen, WRAP, Color::WHITE)
            .unwrap();
        y += engine.active_line_height().unwrap();
    }

    // 3. Save
    let screen = engine.backend().screen();
    let image_buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(screen.width as u32, screen.height as u32, |x, y| {
            let [r, g, b, _] = screen.get(x as i32, y as i32).unwrap();
            Rgb([r, g, b])
        });

    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    let output_path = "debug/render_png.png";
    image_buffer
        .save(output_path)
        .expect("failed to save image");

    println!("Saved debug image to: {}", output_path);
}
