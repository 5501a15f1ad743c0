use image::Rgba;

/// Named colors
pub struct Colors;

impl Colors {
    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    pub const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);
    pub const GRID: Rgba<u8> = Rgba([204, 204, 204, 255]); // whitegrid
    pub const SALMON: Rgba<u8> = Rgba([250, 128, 114, 255]);
    pub const DARK_SLATE_GRAY: Rgba<u8> = Rgba([47, 79, 79, 255]);
    pub const WHITE_SMOKE: Rgba<u8> = Rgba([245, 245, 245, 255]);
    pub const LINE_BG: Rgba<u8> = Rgba([244, 244, 244, 255]); // #F4F4F4
    pub const LEGEND_EDGE: Rgba<u8> = Rgba([204, 204, 204, 255]);
}

/// Qualitative palette for pie wedges (Set3)
pub const SET3: [Rgba<u8>; 12] = [
    Rgba([141, 211, 199, 255]),
    Rgba([255, 255, 179, 255]),
    Rgba([190, 186, 218, 255]),
    Rgba([251, 128, 114, 255]),
    Rgba([128, 177, 211, 255]),
    Rgba([253, 180, 98, 255]),
    Rgba([179, 222, 105, 255]),
    Rgba([252, 205, 229, 255]),
    Rgba([217, 217, 217, 255]),
    Rgba([188, 128, 189, 255]),
    Rgba([204, 235, 197, 255]),
    Rgba([255, 237, 111, 255]),
];

/// Color of the i-th wedge, cycling through Set3
pub fn set3(index: usize) -> Rgba<u8> {
    SET3[index % SET3.len()]
}

// viridis control points, evenly spaced over [0, 1]
const VIRIDIS_STOPS: [[u8; 3]; 10] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 73, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [110, 206, 88],
    [181, 222, 43],
    [253, 231, 37],
];

/// Samples the viridis colormap at `t` in [0, 1]
pub fn viridis_at(t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let span = (VIRIDIS_STOPS.len() - 1) as f64;
    let pos = t * span;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS_STOPS.len() - 1);
    let frac = pos - lo as f64;

    let channel = |i: usize| {
        let a = VIRIDIS_STOPS[lo][i] as f64;
        let b = VIRIDIS_STOPS[hi][i] as f64;
        (a + (b - a) * frac).round() as u8
    };
    Rgba([channel(0), channel(1), channel(2), 255])
}

/// `n` colors from viridis, skipping both ends of the map
pub fn viridis(n: usize) -> Vec<Rgba<u8>> {
    (0..n)
        .map(|i| viridis_at((i + 1) as f64 / (n + 1) as f64))
        .collect()
}
