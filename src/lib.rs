//! suburban-viz: procedural scene animation, flow lines and chart geometry
//! for the Suburban Security operations dashboard.
//!
//! The crate is split the way a charting engine is: pure geometry in `core`
//! and `charts`, frame-driven animation in `scene` and `flow`, and
//! backend-agnostic draw commands in `render`. Hosts plug in through the
//! `FrameHost` trait in `host`.

pub mod charts;
pub mod config;
pub mod core;
pub mod error;
pub mod flow;
pub mod host;
pub mod render;
pub mod scene;
pub mod session;
pub mod telemetry;

pub use config::VizConfig;
pub use error::{VizError, VizResult};
pub use flow::{FlowLineAnimation, FlowLineConfig, FlowLineStyle};
pub use host::{FrameHost, HeadlessFrameHost};
pub use scene::{AnimationManager, SceneEngineConfig, SceneKind};
