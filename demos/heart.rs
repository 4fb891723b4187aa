use aafsr::{ArtDocument, ColorManager, ColorToken, Pixel, RgbColor, RenderOptions, Renderer};

fn main() {
    // Pixels with named colors
    let heart = [
        "  ♥♥  ♥♥  ",
        " ♥♥♥♥♥♥♥ ",
        " ♥♥♥♥♥♥♥ ",
        "  ♥♥♥♥♥  ",
        "   ♥♥♥   ",
        "    ♥    ",
    ];
    let colors = ["RED", "BRIGHT_RED", "MAGENTA", "BRIGHT_MAGENTA"];
    let rows: Vec<Vec<Pixel>> = heart
        .iter()
        .enumerate()
        .map(|(i, line)| {
            line.chars()
                .map(|ch| Pixel::create_colored(&ch.to_string(), colors[i % colors.len()]))
                .collect()
        })
        .collect();
    let renderer = Renderer::new(RenderOptions { compact: true });
    println!("{}\n", renderer.render_pixels(&rows));

    // The same shape as a document with a vertical gradient
    let mut art = ArtDocument::default();
    for line in heart {
        let width = line.chars().count();
        art.push_row(line, vec![ColorToken::new(15, 0); width]).unwrap();
    }
    let (start, end) = (RgbColor::new(255, 0, 0), RgbColor::new(0, 0, 255));
    let stops = ColorManager::create_gradient(start, end, art.height()).unwrap();
    let stops: Vec<String> = stops.iter().map(RgbColor::hex).collect();
    println!("gradient: {}", stops.join(" "));
    art.apply_row_gradient(start, end).unwrap();
    println!("{}\n", art.render().unwrap());

    // Saving and loading
    let path = std::env::temp_dir().join("heart.aafsr");
    art.save(&path).unwrap();
    let mut loaded = ArtDocument::example();
    loaded.load(&path).unwrap();
    println!("{}", loaded);
}
