#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod segment;
pub mod state;
pub mod util;

pub use app::SketchApp;
pub use config::EditorConfig;
pub use document::{Annotation, Document};
pub use editor::{LineEditor, parse_length};
pub use error::{EditorError, EditorResult};
pub use input::{InputEvent, InputHandler};
pub use persistence::{DrawingSnapshot, PersistenceError};
pub use renderer::{DrawList, Primitive, Renderer, Surface};
pub use segment::{Endpoint, PointRef, Segment};
pub use state::EditorState;
