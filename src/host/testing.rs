//! Scripted host for unit tests.

use anyhow::Result;
use std::collections::{HashMap, VecDeque};

use super::{AutomationHost, MatchOutcome, Screen, SwipeDirection, TemplateQuery, TextOutcome};
use crate::geometry::Rect;

/// Replays scripted recognition results and records every device call.
pub struct ScriptedHost {
    pub screen: Screen,
    /// Consumed front to back; an empty script answers `Miss`.
    pub match_script: VecDeque<MatchOutcome>,
    /// OCR answers by exact ROI; unknown ROIs answer `Miss`.
    pub texts: HashMap<Rect, TextOutcome>,
    /// Raises the stop flag once this many template lookups have run.
    pub stop_after_lookups: Option<usize>,
    pub stop_requested: bool,
    pub click_succeeds: bool,
    pub input_succeeds: bool,

    pub captures: usize,
    pub queries: Vec<TemplateQuery>,
    pub swipes: Vec<SwipeDirection>,
    pub clicks: Vec<(i32, i32)>,
    pub inputs: Vec<(String, Rect)>,
    pub ocr_rois: Vec<Rect>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            screen: Screen::blank(1280, 720),
            match_script: VecDeque::new(),
            texts: HashMap::new(),
            stop_after_lookups: None,
            stop_requested: false,
            click_succeeds: true,
            input_succeeds: true,
            captures: 0,
            queries: Vec::new(),
            swipes: Vec::new(),
            clicks: Vec::new(),
            inputs: Vec::new(),
            ocr_rois: Vec::new(),
        }
    }

    pub fn with_matches(mut self, outcomes: impl IntoIterator<Item = MatchOutcome>) -> Self {
        self.match_script.extend(outcomes);
        self
    }

    pub fn with_text(mut self, roi: [i32; 4], text: &str) -> Self {
        self.texts
            .insert(Rect::from_roi(roi), TextOutcome::Hit(text.to_string()));
        self
    }

    pub fn with_text_outcome(mut self, roi: [i32; 4], outcome: TextOutcome) -> Self {
        self.texts.insert(Rect::from_roi(roi), outcome);
        self
    }

    pub fn stop_after(mut self, lookups: usize) -> Self {
        self.stop_after_lookups = Some(lookups);
        self
    }

    pub fn lookups(&self) -> usize {
        self.queries.len()
    }

    pub fn swipes_toward(&self, direction: SwipeDirection) -> usize {
        self.swipes.iter().filter(|d| **d == direction).count()
    }
}

impl AutomationHost for ScriptedHost {
    fn capture_screen(&mut self) -> Result<Screen> {
        self.captures += 1;
        Ok(self.screen.clone())
    }

    fn match_template(&mut self, _screen: &Screen, query: &TemplateQuery) -> Result<MatchOutcome> {
        self.queries.push(query.clone());
        if self.stop_after_lookups == Some(self.queries.len()) {
            self.stop_requested = true;
        }
        Ok(self.match_script.pop_front().unwrap_or(MatchOutcome::Miss))
    }

    fn recognize_text(&mut self, _screen: &Screen, roi: Rect) -> Result<TextOutcome> {
        self.ocr_rois.push(roi);
        Ok(self.texts.get(&roi).cloned().unwrap_or(TextOutcome::Miss))
    }

    fn click(&mut self, x: i32, y: i32) -> Result<bool> {
        self.clicks.push((x, y));
        Ok(self.click_succeeds)
    }

    fn swipe(&mut self, direction: SwipeDirection) -> Result<bool> {
        self.swipes.push(direction);
        Ok(true)
    }

    fn input_text(&mut self, text: &str, target: Rect) -> Result<bool> {
        self.inputs.push((text.to_string(), target));
        Ok(self.input_succeeds)
    }

    fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}
