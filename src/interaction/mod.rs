//! Scroll and zoom state driven by gestures, programmatic requests and a
//! host-supplied frame clock.

mod animation;
mod scroll;
mod zoom;

pub use animation::{AnimationSpec, Easing, FlingConfig, Timeline};
pub use scroll::{
    AbsoluteScroll, AutoScrollCondition, InitialScroll, RelativeScroll, Scroll, ScrollConfig,
    ScrollContext, ScrollController, ScrollEvent, ScrollListener, ScrollPhase, ScrollSnapshot,
};
pub use zoom::{Zoom, ZoomConfig, ZoomContext, ZoomController, ZoomSnapshot};
