pub mod composite;
pub mod export;
pub mod history;
pub mod input;
pub mod model;
pub mod property;
pub mod render;
pub mod settings;
pub mod settings_store;
pub mod surface;
pub mod widget;

pub use export::{bounding_box_of, BoundingBox, ExportError};
pub use input::{PointerButton, PointerEvent, PointerPhase, PointerSource};
pub use model::{Color, PenStyle, Point, Stroke};
pub use property::{PropertyChange, SubscriptionId};
pub use render::{DirtyRect, Repaint};
pub use settings::PadSettings;
pub use widget::SignPad;
