// Transient stroke state owned by the canvas event closures.
#[derive(Debug, Clone, Default)]
pub struct Brush {
    pub color: String,
    pub drawing: bool,
    pub last_x: f64,
    pub last_y: f64,
}
