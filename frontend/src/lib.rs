//! Browser binding for the timetable session drag controller
//!
//! ```js
//! import init, { initLogging, makeDraggable } from "./timetable_frontend.js";
//!
//! await init();
//! initLogging("debug");
//! const handle = makeDraggable(
//!     document.querySelector(".timetable"),
//!     { sessionSelector: ".session-block", cellSelector: ".time-slot" },
//!     (session, cell, extra) => moveSession(session, cell),
//! );
//! // after re-rendering the timetable:
//! handle.detach();
//! ```

mod dom_surface;
mod draggable;
mod logging;

pub use dom_surface::DomSurface;
pub use draggable::{make_draggable, DraggableHandle};
pub use logging::{init_logging, parse_level};
