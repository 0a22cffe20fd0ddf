// Body-id → color lookup for the segmentation overlay.

use image::Rgba;

/// Nothing drawn.
pub const TRANSPARENT: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0x00]);
/// Translucent blue tint for floor pixels that don't belong to a body.
pub const FLOOR_COLOR: Rgba<u8> = Rgba([0x00, 0x00, 0xFF, 0x88]);
/// Used for any id the palette does not cover.
pub const FALLBACK_COLOR: Rgba<u8> = Rgba([0xAA, 0xAA, 0xAA, 0xFF]);

const fn opaque(rgb: u32) -> Rgba<u8> {
    Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xFF])
}

/// Indexed by `id % 24`; slot 0 is what ids 24, 48, ... land on.
pub const BODY_PALETTE: [Rgba<u8>; 24] = [
    opaque(0x008800),
    opaque(0x0000FF),
    opaque(0x880000),
    opaque(0x00FF00),
    opaque(0x000088),
    opaque(0xFF0000),
    opaque(0xFF8800),
    opaque(0xFF00FF),
    opaque(0x8800FF),
    opaque(0x00FFFF),
    opaque(0x00FF88),
    opaque(0xFFFF00),
    opaque(0x008888),
    opaque(0x0088FF),
    opaque(0x888800),
    opaque(0x88FF00),
    opaque(0x880088),
    opaque(0xFF0088),
    opaque(0xFF8888),
    opaque(0xFF88FF),
    opaque(0x8888FF),
    opaque(0x88FFFF),
    opaque(0x88FF88),
    opaque(0xFFFF88),
];

/// Color for a body id; 0 means "no body" and stays transparent.
pub fn body_color(body_id: u8) -> Rgba<u8> {
    if body_id == 0 {
        return TRANSPARENT;
    }
    BODY_PALETTE
        .get(usize::from(body_id) % BODY_PALETTE.len())
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}
