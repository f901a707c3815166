//! Domain logic of the viewer: the plane mapping, the escape-time kernel,
//! the complexity heuristic, the camera state machine, and the per-frame
//! fidelity scheduler. Nothing in here touches a window system or a GPU.

pub mod complexity;
pub mod data;
pub mod escape;
pub mod mapping;
pub mod scheduling;
pub mod view;
