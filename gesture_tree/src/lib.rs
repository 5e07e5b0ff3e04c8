//! # gesture_tree
//!
//! A hand-gesture controlled particle tree.  Thousands of elements blend
//! between a dispersed cloud and an assembled cone as one shared progress
//! value chases the state picked by the latest confident gesture.
//!
//! ## Gesture → State mapping
//!
//! | Gesture | Confidence | Effect |
//! |---|---|---|
//! | Open palm | ≥ threshold | target `CHAOS`, progress → 0 |
//! | Closed fist | ≥ threshold | target `FORMED`, progress → 1 |
//! | Anything else, no hand, failed frame | any | no change |
//!
//! The hand's reference point drives the camera: orbit (horizontal travel
//! spins the view), absolute (hand position maps to a camera offset) or
//! combined.
//!
//! ## Pipeline (one frame)
//!
//! ```text
//! GestureAdapter::poll ─► StateMachine::observe ─► StateMachine::advance
//!          │                                              │
//!          └──► CameraController::update        Scene::update (every group)
//! ```
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard and mouse in the window.
//! * `leap` — **Hardware mode**: a LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Key | Hand |
//! |---|---|
//! | `O` | Open palm |
//! | `C` | Closed fist |
//! | `R` | Relaxed (unrecognised pose) |
//! | `N` | No hand |
//! | `F` | Fail the next frame |
//! | mouse | Reference point |
//! | `Q` / `Esc` | Quit |

pub mod adapter;
pub mod app;
pub mod camera;
pub mod choreography;
pub mod config;
pub mod error;
pub mod gesture;
pub mod scene;
pub mod visualizer;
