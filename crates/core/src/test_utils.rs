//! Test helpers

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::blocking::delay::DelayMs;

use crate::{
    frame::{Frame, FRAME_LEN, LATCH_PULSES},
    port::{BitPort, Line},
};

/// Number of clock pulses in a single rendered frame, latch pulses included.
pub const FRAME_PULSES: usize = FRAME_LEN * u8::BITS as usize + LATCH_PULSES;

/// Observable event of the simulated hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The port has been opened.
    Opened,
    /// A complete frame has been clocked out.
    Frame(Frame),
    /// A delay with the given duration in milliseconds.
    Delay(u32),
    /// The port has been closed.
    Closed,
}

/// Shared log of the simulated port and delay events.
#[derive(Clone, Debug, Default)]
pub struct Timeline(Rc<RefCell<Vec<Step>>>);

impl Timeline {
    /// Creates a new empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, step: Step) {
        self.0.borrow_mut().push(step);
    }

    /// Returns all recorded steps.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.0.borrow().clone()
    }

    /// Returns the recorded frames.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.0
            .borrow()
            .iter()
            .filter_map(|step| match step {
                Step::Frame(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    /// Returns the recorded delays.
    #[must_use]
    pub fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|step| match step {
                Step::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Forgets all recorded steps.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Simulated port which decodes the clocked bits back into frames.
///
/// Panics on protocol violations: writes to a closed port, double clock edges,
/// latch pulses with the data line high or a port closed in the middle of a frame.
#[derive(Debug)]
pub struct RecordingPort {
    timeline: Timeline,
    is_open: bool,
    data: bool,
    clock: bool,
    bits: Vec<bool>,
}

impl RecordingPort {
    /// Creates a new port writing into the given timeline.
    #[must_use]
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            is_open: false,
            data: false,
            clock: false,
            bits: Vec::with_capacity(FRAME_PULSES),
        }
    }

    /// Returns the number of bits of the frame being written.
    #[must_use]
    pub fn pending_bits(&self) -> usize {
        self.bits.len()
    }

    fn finish_frame(&mut self) {
        let (payload, latch) = self.bits.split_at(FRAME_LEN * u8::BITS as usize);
        assert!(
            latch.iter().all(|bit| !bit),
            "Latch pulses must keep the data line low"
        );

        let mut frame = [0_u8; FRAME_LEN];
        for (byte, bits) in frame.iter_mut().zip(payload.chunks_exact(8)) {
            *byte = bits
                .iter()
                .fold(0, |byte, &bit| (byte << 1) | u8::from(bit));
        }
        self.bits.clear();
        self.timeline.push(Step::Frame(frame));
    }
}

impl BitPort for RecordingPort {
    type Error = Infallible;

    fn open(&mut self) -> Result<(), Self::Error> {
        assert!(!self.is_open, "Port has been already opened");
        self.is_open = true;
        self.timeline.push(Step::Opened);
        Ok(())
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        assert!(self.is_open, "Write to the closed port");
        match line {
            Line::Data => self.data = true,
            Line::Clock => {
                assert!(!self.clock, "Clock line is already high");
                self.clock = true;
                self.bits.push(self.data);
                if self.bits.len() == FRAME_PULSES {
                    self.finish_frame();
                }
            }
        }
        Ok(())
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        assert!(self.is_open, "Write to the closed port");
        match line {
            Line::Data => self.data = false,
            Line::Clock => self.clock = false,
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        assert!(self.is_open, "Port is not opened");
        assert!(
            self.bits.is_empty(),
            "Port closed in the middle of the frame"
        );
        self.is_open = false;
        self.timeline.push(Step::Closed);
        Ok(())
    }
}

/// Delay provider which records the requested delays instead of sleeping.
#[derive(Clone, Debug)]
pub struct RecordingDelay(Timeline);

impl RecordingDelay {
    /// Creates a new delay writing into the given timeline.
    #[must_use]
    pub fn new(timeline: Timeline) -> Self {
        Self(timeline)
    }
}

impl DelayMs<u32> for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Step::Delay(ms));
    }
}

/// Creates a simulated port and delay sharing a single timeline.
#[must_use]
pub fn simulated_hardware() -> (Timeline, RecordingPort, RecordingDelay) {
    let timeline = Timeline::new();
    let port = RecordingPort::new(timeline.clone());
    let delay = RecordingDelay::new(timeline.clone());
    (timeline, port, delay)
}

/// Builds the expected frame from the pixel words.
#[must_use]
pub fn frame_from_words(words: [[u8; 4]; 8]) -> Frame {
    let mut frame = [0_u8; FRAME_LEN];
    for (i, word) in words.iter().enumerate() {
        let offset = 4 + i * 4;
        frame[offset..offset + 4].copy_from_slice(word);
    }
    frame
}
