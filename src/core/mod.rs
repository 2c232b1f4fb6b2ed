pub mod layout;
pub mod scale;
pub mod types;

pub use scale::{LinearScale, SeriesRange};
pub use types::{Boundary, Point, Viewport};
