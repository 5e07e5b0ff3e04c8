//! Gesture samples, raw backend detections and the backends that produce
//! them (keyboard/mouse simulation, scripted playback, LeapMotion hardware).
//!
//! A backend only reports what it saw.  Turning a [`RawDetection`] into a
//! [`GestureSample`] is the [`Classifier`]'s job, so every backend shares the
//! same label mapping, landmark heuristic and reference-point rules.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glam::Vec2;

use crate::error::{FrameClassificationError, InitError};

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel / GestureSample
// ════════════════════════════════════════════════════════════════════════════

/// The closed set of gestures the choreography reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    /// Open palm: scatter the tree.
    Open,
    /// Closed fist: assemble the tree.
    Closed,
    /// Anything else, including no hand at all.
    None,
}

impl GestureLabel {
    /// Map a recogniser category name onto the closed label set.
    pub fn from_category(category: &str) -> Self {
        match category {
            "Open_Palm"   => GestureLabel::Open,
            "Closed_Fist" => GestureLabel::Closed,
            _             => GestureLabel::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::Open   => "OPEN",
            GestureLabel::Closed => "CLOSED",
            GestureLabel::None   => "NONE",
        }
    }
}

/// One classified source frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Monotonic source-frame timestamp.
    pub timestamp:  u64,
    pub label:      GestureLabel,
    /// In `[0, 1]`.
    pub confidence: f32,
    /// Normalised image coordinates in `[0, 1]²` of the reference landmark.
    pub reference:  Option<Vec2>,
    /// True when a hand was present in the frame.
    pub tracking:   bool,
}

impl GestureSample {
    /// A frame with no hand in it (or one that failed to classify).
    pub fn no_hand(timestamp: u64) -> Self {
        GestureSample {
            timestamp,
            label:      GestureLabel::None,
            confidence: 0.0,
            reference:  None,
            tracking:   false,
        }
    }

    /// The reference point, but only while a hand is tracked.
    pub fn pointer(&self) -> Option<Vec2> {
        if self.tracking { self.reference } else { None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Raw backend output
// ════════════════════════════════════════════════════════════════════════════

/// A recogniser's top category for one hand.
#[derive(Clone, Debug, PartialEq)]
pub struct RawGesture {
    pub category: String,
    pub score:    f32,
}

/// One detected hand: an optional recognised gesture plus normalised 2-D
/// landmarks (wrist first, fingertips at 4, 8, 12, 16, 20).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawHand {
    pub gesture:   Option<RawGesture>,
    pub landmarks: Vec<Vec2>,
}

/// Everything a backend saw in one frame.  No hands is a valid detection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawDetection {
    pub hands: Vec<RawHand>,
}

impl RawDetection {
    pub fn empty() -> Self { RawDetection::default() }

    pub fn single(hand: RawHand) -> Self {
        RawDetection { hands: vec![hand] }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

/// Landmark indices of the wrist and the five fingertips.
pub const WRIST: usize = 0;
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
/// Landmarks in a full hand skeleton.
pub const HAND_LANDMARKS: usize = 21;

/// Turns raw detections into [`GestureSample`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classifier {
    /// Landmark used as the continuous reference point.
    pub reference_landmark: usize,
    /// Mean fingertip-to-wrist distance above which an unlabelled hand is open.
    pub open_above:         f32,
    /// Mean fingertip-to-wrist distance below which an unlabelled hand is closed.
    pub closed_below:       f32,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier { reference_landmark: WRIST, open_above: 0.25, closed_below: 0.2 }
    }
}

impl Classifier {
    /// Classify the first hand of `detection`.
    ///
    /// A recognised gesture wins; without one the hand is judged by how far
    /// its fingertips spread from the wrist.  The band between the two
    /// thresholds classifies as `None`.
    pub fn classify(
        &self,
        timestamp: u64,
        detection: &RawDetection,
    ) -> Result<GestureSample, FrameClassificationError> {
        let Some(hand) = detection.hands.first() else {
            return Ok(GestureSample::no_hand(timestamp));
        };

        if hand.landmarks.iter().any(|p| !p.is_finite()) {
            return Err(FrameClassificationError::Backend("non-finite landmark".into()));
        }

        let (label, confidence) = match &hand.gesture {
            Some(g) => (GestureLabel::from_category(&g.category), g.score.clamp(0.0, 1.0)),
            None    => self.heuristic(&hand.landmarks)?,
        };

        let reference = if hand.landmarks.is_empty() {
            None
        } else {
            let p = hand.landmarks.get(self.reference_landmark).ok_or(
                FrameClassificationError::MalformedLandmarks {
                    expected: self.reference_landmark + 1,
                    got:      hand.landmarks.len(),
                },
            )?;
            Some(p.clamp(Vec2::ZERO, Vec2::ONE))
        };

        Ok(GestureSample { timestamp, label, confidence, reference, tracking: true })
    }

    fn heuristic(&self, landmarks: &[Vec2]) -> Result<(GestureLabel, f32), FrameClassificationError> {
        let spread = fingertip_spread(landmarks)?;
        Ok(if spread > self.open_above {
            (GestureLabel::Open, 1.0)
        } else if spread < self.closed_below {
            (GestureLabel::Closed, 1.0)
        } else {
            (GestureLabel::None, 0.0)
        })
    }
}

/// Mean 2-D distance from the five fingertips to the wrist.
pub fn fingertip_spread(landmarks: &[Vec2]) -> Result<f32, FrameClassificationError> {
    if landmarks.len() < HAND_LANDMARKS {
        return Err(FrameClassificationError::MalformedLandmarks {
            expected: HAND_LANDMARKS,
            got:      landmarks.len(),
        });
    }
    let wrist = landmarks[WRIST];
    let total: f32 = FINGERTIPS.iter().map(|&i| landmarks[i].distance(wrist)).sum();
    Ok(total / FINGERTIPS.len() as f32)
}

/// A full 21-point hand whose fingertips sit `spread` away from `wrist`,
/// fanned upward, with the joints of each finger evenly spaced.
pub fn synthetic_hand(wrist: Vec2, spread: f32) -> Vec<Vec2> {
    let mut pts = vec![wrist; HAND_LANDMARKS];
    for (f, &tip) in FINGERTIPS.iter().enumerate() {
        let angle = std::f32::consts::PI * (0.2 + 0.15 * f as f32);
        let dir   = Vec2::new(angle.cos(), -angle.sin());
        for j in 1..=4 {
            pts[tip + j - 4] = wrist + dir * spread * (j as f32 / 4.0);
        }
    }
    pts
}

// ════════════════════════════════════════════════════════════════════════════
// GestureBackend trait — unified interface for hw, sim and scripts
// ════════════════════════════════════════════════════════════════════════════

/// A source of frames plus the model that looks at them.
///
/// `initialize` runs off the frame thread and may block; the other methods
/// are called once per render frame and must not.
pub trait GestureBackend: Send + 'static {
    fn name(&self) -> &'static str;

    /// Acquire the camera and load the model.
    fn initialize(&mut self) -> Result<(), InitError>;

    /// Timestamp of the newest source frame, or `None` before the first.
    fn latest_frame(&mut self) -> Option<u64>;

    /// Run the model on the frame reported by [`latest_frame`](Self::latest_frame).
    fn classify_frame(&mut self, timestamp: u64) -> Result<RawDetection, FrameClassificationError>;

    /// Release the stream and the model.  Must be safe to call after a
    /// failed or partial `initialize`.
    fn close(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// SimBackend — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// What the simulated hand is doing this window frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimHand {
    Open,
    Closed,
    /// Hand visible but in no recognised pose.
    Relaxed,
    Absent,
    /// Make the next classification fail.
    Glitch,
}

/// One window frame of simulated input, sent by the visualizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimInput {
    pub hand:    SimHand,
    /// Mouse position in normalised window coordinates.
    pub pointer: Vec2,
}

/// Backend driven by [`SimInput`]s from the visualizer's window.
///
/// Every received input counts as a new source frame.  Recognised poses are
/// reported with a category and score like a real recogniser would.
pub struct SimBackend {
    rx:         Receiver<SimInput>,
    init_delay: Duration,
    frame:      u64,
    latest:     Option<SimInput>,
}

impl SimBackend {
    pub fn new(rx: Receiver<SimInput>, init_delay: Duration) -> Self {
        SimBackend { rx, init_delay, frame: 0, latest: None }
    }
}

impl GestureBackend for SimBackend {
    fn name(&self) -> &'static str { "simulation" }

    fn initialize(&mut self) -> Result<(), InitError> {
        thread::sleep(self.init_delay);
        Ok(())
    }

    fn latest_frame(&mut self) -> Option<u64> {
        for input in self.rx.try_iter() {
            self.frame += 1;
            self.latest = Some(input);
        }
        self.latest.map(|_| self.frame)
    }

    fn classify_frame(&mut self, _timestamp: u64) -> Result<RawDetection, FrameClassificationError> {
        let Some(input) = self.latest else {
            return Ok(RawDetection::empty());
        };
        let recognised = |category: &str, spread: f32| RawHand {
            gesture:   Some(RawGesture { category: category.into(), score: 0.92 }),
            landmarks: synthetic_hand(input.pointer, spread),
        };
        Ok(match input.hand {
            SimHand::Open    => RawDetection::single(recognised("Open_Palm", 0.3)),
            SimHand::Closed  => RawDetection::single(recognised("Closed_Fist", 0.1)),
            SimHand::Relaxed => RawDetection::single(recognised("None", 0.22)),
            SimHand::Absent  => RawDetection::empty(),
            SimHand::Glitch  => {
                return Err(FrameClassificationError::Backend("simulated glitch".into()));
            }
        })
    }

    fn close(&mut self) {
        self.latest = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedBackend — deterministic playback for tests and headless runs
// ════════════════════════════════════════════════════════════════════════════

/// One scripted source frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedFrame {
    pub timestamp: u64,
    pub detection: Result<RawDetection, FrameClassificationError>,
}

impl ScriptedFrame {
    /// A recognised gesture with its reference point repeated as every
    /// landmark.
    pub fn gesture(timestamp: u64, category: &str, score: f32, point: Vec2) -> Self {
        ScriptedFrame {
            timestamp,
            detection: Ok(RawDetection::single(RawHand {
                gesture:   Some(RawGesture { category: category.into(), score }),
                landmarks: vec![point; HAND_LANDMARKS],
            })),
        }
    }

    /// Landmarks only; the classifier falls back to the spread heuristic.
    pub fn landmarks(timestamp: u64, landmarks: Vec<Vec2>) -> Self {
        ScriptedFrame {
            timestamp,
            detection: Ok(RawDetection::single(RawHand { gesture: None, landmarks })),
        }
    }

    pub fn no_hand(timestamp: u64) -> Self {
        ScriptedFrame { timestamp, detection: Ok(RawDetection::empty()) }
    }

    pub fn failure(timestamp: u64) -> Self {
        ScriptedFrame {
            timestamp,
            detection: Err(FrameClassificationError::Backend("scripted failure".into())),
        }
    }
}

/// Plays back a fixed list of frames, one per `latest_frame` call.
///
/// After the script runs out the last frame stays current, so the adapter
/// sees no new timestamps.
pub struct ScriptedBackend {
    frames:      VecDeque<ScriptedFrame>,
    current:     Option<ScriptedFrame>,
    init_result: Result<(), InitError>,
    init_delay:  Duration,
    closed:      Arc<AtomicBool>,
}

impl ScriptedBackend {
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        ScriptedBackend {
            frames:      frames.into(),
            current:     None,
            init_result: Ok(()),
            init_delay:  Duration::ZERO,
            closed:      Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make `initialize` fail with `err`.
    pub fn failing(mut self, err: InitError) -> Self {
        self.init_result = Err(err);
        self
    }

    pub fn with_init_delay(mut self, delay: Duration) -> Self {
        self.init_delay = delay;
        self
    }

    /// Flag set by `close`, observable after the backend has been handed off.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    /// Alternate open palm and closed fist every `period` frames for
    /// `frames` frames, sweeping the hand left to right.
    pub fn cycle(frames: u64, period: u64) -> Self {
        let period = period.max(1);
        let script = (0..frames)
            .map(|i| {
                let category = if (i / period) % 2 == 0 { "Open_Palm" } else { "Closed_Fist" };
                let x = 0.5 + 0.3 * (i as f32 * 0.02).sin();
                ScriptedFrame::gesture(i + 1, category, 0.9, Vec2::new(x, 0.5))
            })
            .collect();
        ScriptedBackend::new(script)
    }
}

impl GestureBackend for ScriptedBackend {
    fn name(&self) -> &'static str { "scripted" }

    fn initialize(&mut self) -> Result<(), InitError> {
        if !self.init_delay.is_zero() {
            thread::sleep(self.init_delay);
        }
        self.init_result.clone()
    }

    fn latest_frame(&mut self) -> Option<u64> {
        if let Some(next) = self.frames.pop_front() {
            self.current = Some(next);
        }
        self.current.as_ref().map(|f| f.timestamp)
    }

    fn classify_frame(&mut self, _timestamp: u64) -> Result<RawDetection, FrameClassificationError> {
        match &self.current {
            Some(f) => f.detection.clone(),
            None    => Ok(RawDetection::empty()),
        }
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapBackend — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Palm snapshot forwarded from the polling thread.
#[cfg(feature = "leap")]
#[derive(Clone, Copy, Debug)]
struct LeapPalm {
    grab: f32,
    x:    f32,
    y:    f32,
}

/// Backend for a LeapMotion controller.
///
/// The LeapC connection lives on its own polling thread; each tracking
/// event is a source frame.  Grab strength stands in for the recogniser:
/// a loose hand reads as an open palm, a tight one as a fist.
#[cfg(feature = "leap")]
pub struct LeapBackend {
    rx:     Option<Receiver<Option<LeapPalm>>>,
    stop:   Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
    frame:  u64,
    latest: Option<Option<LeapPalm>>,
}

#[cfg(feature = "leap")]
impl LeapBackend {
    // Interaction box, millimetres above the device.
    const X_RANGE: (f32, f32) = (-200.0, 200.0);
    const Y_RANGE: (f32, f32) = (100.0, 400.0);

    pub fn new() -> Self {
        LeapBackend {
            rx:     None,
            stop:   Arc::new(AtomicBool::new(false)),
            worker: None,
            frame:  0,
            latest: None,
        }
    }

    fn to_hand(palm: LeapPalm) -> RawHand {
        let (category, score) = if palm.grab >= 0.8 {
            ("Closed_Fist", palm.grab)
        } else if palm.grab <= 0.2 {
            ("Open_Palm", 1.0 - palm.grab)
        } else {
            ("None", 0.5)
        };
        let nx = (palm.x - Self::X_RANGE.0) / (Self::X_RANGE.1 - Self::X_RANGE.0);
        let ny = 1.0 - (palm.y - Self::Y_RANGE.0) / (Self::Y_RANGE.1 - Self::Y_RANGE.0);
        RawHand {
            gesture:   Some(RawGesture { category: category.into(), score }),
            landmarks: vec![Vec2::new(nx, ny); HAND_LANDMARKS],
        }
    }
}

#[cfg(feature = "leap")]
impl Default for LeapBackend {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "leap")]
impl GestureBackend for LeapBackend {
    fn name(&self) -> &'static str { "leapmotion" }

    fn initialize(&mut self) -> Result<(), InitError> {
        use std::sync::mpsc;

        let (tx, rx)             = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let stop = Arc::clone(&self.stop);

        let worker = thread::spawn(move || {
            use leaprs::*;

            let mut connection = match Connection::create(ConnectionConfig::default()) {
                Ok(c)  => c,
                Err(e) => {
                    let _ = ready_tx.send(Err(InitError::CameraUnavailable(format!("{:?}", e))));
                    return;
                }
            };
            if let Err(e) = connection.open() {
                let _ = ready_tx.send(Err(InitError::CameraUnavailable(format!("{:?}", e))));
                return;
            }
            let _ = ready_tx.send(Ok(()));

            while !stop.load(Ordering::Relaxed) {
                let msg = match connection.poll(100) {
                    Ok(m)  => m,
                    Err(_) => continue,
                };
                if let Event::Tracking(frame) = msg.event() {
                    let palm = frame.hands().next().map(|h| {
                        let p = h.palm().position();
                        LeapPalm { grab: h.grab_strength, x: p.x, y: p.y }
                    });
                    if tx.send(palm).is_err() { return; }
                }
            }
        });

        self.worker = Some(worker);
        self.rx     = Some(rx);
        match ready_rx.recv() {
            Ok(result) => result,
            Err(_)     => Err(InitError::InitTaskLost),
        }
    }

    fn latest_frame(&mut self) -> Option<u64> {
        if let Some(rx) = &self.rx {
            for palm in rx.try_iter() {
                self.frame += 1;
                self.latest = Some(palm);
            }
        }
        self.latest.map(|_| self.frame)
    }

    fn classify_frame(&mut self, _timestamp: u64) -> Result<RawDetection, FrameClassificationError> {
        match self.latest {
            Some(Some(palm)) => Ok(RawDetection::single(Self::to_hand(palm))),
            Some(None)       => Ok(RawDetection::empty()),
            None => Err(FrameClassificationError::Backend("no tracking frame yet".into())),
        }
    }

    fn close(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.rx = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn hand(category: &str, score: f32, point: Vec2) -> RawDetection {
        RawDetection::single(RawHand {
            gesture:   Some(RawGesture { category: category.into(), score }),
            landmarks: vec![point; HAND_LANDMARKS],
        })
    }

    #[test]
    fn categories_map_onto_closed_set() {
        assert_eq!(GestureLabel::from_category("Open_Palm"), GestureLabel::Open);
        assert_eq!(GestureLabel::from_category("Closed_Fist"), GestureLabel::Closed);
        assert_eq!(GestureLabel::from_category("Thumb_Up"), GestureLabel::None);
        assert_eq!(GestureLabel::from_category(""), GestureLabel::None);
    }

    #[test]
    fn zero_hands_is_not_tracking() {
        let s = Classifier::default().classify(7, &RawDetection::empty()).unwrap();
        assert_eq!(s, GestureSample::no_hand(7));
        assert_eq!(s.pointer(), None);
    }

    #[test]
    fn recognised_gesture_wins() {
        let s = Classifier::default()
            .classify(1, &hand("Closed_Fist", 0.8, Vec2::new(0.3, 0.4)))
            .unwrap();
        assert_eq!(s.label, GestureLabel::Closed);
        assert_eq!(s.confidence, 0.8);
        assert_eq!(s.reference, Some(Vec2::new(0.3, 0.4)));
        assert!(s.tracking);
    }

    #[test]
    fn reference_point_clamped() {
        let s = Classifier::default()
            .classify(1, &hand("Open_Palm", 1.4, Vec2::new(-0.2, 1.3)))
            .unwrap();
        assert_eq!(s.reference, Some(Vec2::new(0.0, 1.0)));
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn heuristic_open_closed_and_band() {
        let c = Classifier::default();
        let wrist = Vec2::new(0.5, 0.8);
        let classify = |spread| {
            let det = RawDetection::single(RawHand { gesture: None, landmarks: synthetic_hand(wrist, spread) });
            c.classify(0, &det).unwrap()
        };
        assert_eq!(classify(0.30).label, GestureLabel::Open);
        assert_eq!(classify(0.10).label, GestureLabel::Closed);
        let mid = classify(0.22);
        assert_eq!(mid.label, GestureLabel::None);
        assert_eq!(mid.confidence, 0.0);
        assert!(mid.tracking);
    }

    #[test]
    fn synthetic_hand_spread_is_exact() {
        let pts = synthetic_hand(Vec2::new(0.4, 0.6), 0.3);
        assert!((fingertip_spread(&pts).unwrap() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn short_skeleton_is_malformed() {
        let det = RawDetection::single(RawHand { gesture: None, landmarks: vec![Vec2::ZERO; 5] });
        let err = Classifier::default().classify(0, &det).unwrap_err();
        assert_eq!(err, FrameClassificationError::MalformedLandmarks { expected: 21, got: 5 });
    }

    #[test]
    fn reference_index_out_of_range() {
        let c = Classifier { reference_landmark: 9, ..Default::default() };
        let det = RawDetection::single(RawHand {
            gesture:   Some(RawGesture { category: "Open_Palm".into(), score: 0.9 }),
            landmarks: vec![Vec2::ZERO; 3],
        });
        assert_eq!(
            c.classify(0, &det).unwrap_err(),
            FrameClassificationError::MalformedLandmarks { expected: 10, got: 3 }
        );
    }

    #[test]
    fn gesture_without_landmarks_has_no_reference() {
        let det = RawDetection::single(RawHand {
            gesture:   Some(RawGesture { category: "Open_Palm".into(), score: 0.9 }),
            landmarks: vec![],
        });
        let s = Classifier::default().classify(0, &det).unwrap();
        assert!(s.tracking);
        assert_eq!(s.reference, None);
    }

    #[test]
    fn sim_backend_counts_frames() {
        let (tx, rx) = mpsc::channel();
        let mut b = SimBackend::new(rx, Duration::ZERO);
        assert_eq!(b.latest_frame(), None);
        tx.send(SimInput { hand: SimHand::Open, pointer: Vec2::splat(0.5) }).unwrap();
        tx.send(SimInput { hand: SimHand::Closed, pointer: Vec2::splat(0.5) }).unwrap();
        assert_eq!(b.latest_frame(), Some(2));
        assert_eq!(b.latest_frame(), Some(2));

        let det = b.classify_frame(2).unwrap();
        let s = Classifier::default().classify(2, &det).unwrap();
        assert_eq!(s.label, GestureLabel::Closed);
        assert_eq!(s.reference, Some(Vec2::splat(0.5)));
    }

    #[test]
    fn sim_glitch_fails_classification() {
        let (tx, rx) = mpsc::channel();
        let mut b = SimBackend::new(rx, Duration::ZERO);
        tx.send(SimInput { hand: SimHand::Glitch, pointer: Vec2::ZERO }).unwrap();
        let ts = b.latest_frame().unwrap();
        assert!(b.classify_frame(ts).is_err());
    }

    #[test]
    fn scripted_holds_last_frame() {
        let mut b = ScriptedBackend::new(vec![ScriptedFrame::no_hand(1), ScriptedFrame::no_hand(2)]);
        assert_eq!(b.latest_frame(), Some(1));
        assert_eq!(b.latest_frame(), Some(2));
        assert_eq!(b.latest_frame(), Some(2));
    }

    #[test]
    fn scripted_cycle_alternates() {
        let mut b = ScriptedBackend::cycle(4, 2);
        let c = Classifier::default();
        let mut labels = Vec::new();
        for _ in 0..4 {
            let ts = b.latest_frame().unwrap();
            labels.push(c.classify(ts, &b.classify_frame(ts).unwrap()).unwrap().label);
        }
        assert_eq!(labels, vec![
            GestureLabel::Open, GestureLabel::Open, GestureLabel::Closed, GestureLabel::Closed,
        ]);
    }
}
