//! Bounded search for an entry template on a horizontally scrolling screen.
//!
//! The machine looks up the template in the current capture, then swipes right up to twice and
//! left up to twice, re-probing after each swipe:
//!
//! ```text
//! Searching(0, none) ─miss→ Searching(1, right) ─miss→ Searching(2, right)
//!        ─miss→ Searching(1, left) ─miss→ Searching(2, left) ─miss→ NotFound
//! ```
//!
//! Any hit ends in `Found`. After every miss the stop flag is checked before
//! the next swipe, so a stop request ends the search in `Aborted` without
//! further device input. At most 5 lookups and 4 swipes are issued.

use anyhow::{Context, Result};
use std::fmt;

use crate::geometry::Rect;
use crate::host::{
    AutomationHost, MatchOutcome, Screen, SearchTarget, SwipeDirection, TemplateQuery,
};

/// Swipes issued per direction before giving up on it.
pub const SWIPES_PER_DIRECTION: u32 = 2;

/// Upper bound on template lookups for one search.
pub const MAX_LOOKUPS: u32 = 1 + 2 * SWIPES_PER_DIRECTION;

/// Direction of the swipe that produced the current capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    None,
    Right,
    Left,
}

/// Entry search states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Look up the template in the current capture; `attempt` swipes have been made toward
    /// `heading`.
    Searching { attempt: u32, heading: Heading },
    Found(Rect),
    NotFound,
    Aborted,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchState::Searching { .. })
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchState::Searching {
                heading: Heading::None,
                ..
            } => write!(f, "Searching current screen"),
            SearchState::Searching {
                attempt,
                heading: Heading::Right,
            } => write!(f, "Searching after right swipe {}", attempt),
            SearchState::Searching {
                attempt,
                heading: Heading::Left,
            } => write!(f, "Searching after left swipe {}", attempt),
            SearchState::Found(rect) => write!(f, "Found at {}", rect),
            SearchState::NotFound => write!(f, "Not found"),
            SearchState::Aborted => write!(f, "Aborted"),
        }
    }
}

/// One run of the entry search against a host.
pub struct EntrySearch {
    state: SearchState,
    query: TemplateQuery,
    screen: Option<Screen>,
    lookups: u32,
}

impl EntrySearch {
    pub fn new(target: SearchTarget) -> Self {
        Self {
            state: SearchState::Searching {
                attempt: 0,
                heading: Heading::None,
            },
            query: TemplateQuery::new(target),
            screen: None,
            lookups: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of template lookups issued so far.
    pub fn lookups(&self) -> u32 {
        self.lookups
    }

    /// Advances the machine by one lookup.
    ///
    /// Returns `Ok(true)` while searching continues, `Ok(false)` once a
    /// terminal state is reached.
    pub fn step(&mut self, host: &mut dyn AutomationHost) -> Result<bool> {
        let SearchState::Searching { attempt, heading } = self.state else {
            return Ok(false);
        };

        if let Some(rect) = self.lookup(host)? {
            tracing::info!("Entry {} found at {}", self.query.target, rect);
            self.state = SearchState::Found(rect);
            return Ok(false);
        }

        if host.is_stop_requested() {
            tracing::info!("Stop requested, abandoning entry search");
            self.state = SearchState::Aborted;
            return Ok(false);
        }

        let next = match heading {
            Heading::None => Some((1, Heading::Right)),
            Heading::Right if attempt < SWIPES_PER_DIRECTION => Some((attempt + 1, Heading::Right)),
            Heading::Right => Some((1, Heading::Left)),
            Heading::Left if attempt < SWIPES_PER_DIRECTION => Some((attempt + 1, Heading::Left)),
            Heading::Left => None,
        };

        let Some((attempt, heading)) = next else {
            tracing::warn!(
                "Entry {} not found after {} lookups",
                self.query.target,
                self.lookups
            );
            self.state = SearchState::NotFound;
            return Ok(false);
        };

        let direction = match heading {
            Heading::Left => SwipeDirection::Left,
            _ => SwipeDirection::Right,
        };
        tracing::info!("Swiping {} ({}/{})", direction, attempt, SWIPES_PER_DIRECTION);
        if !host
            .swipe(direction)
            .with_context(|| format!("Failed to swipe {}", direction))?
        {
            tracing::warn!("Host reported the {} swipe as unsuccessful", direction);
        }
        self.screen = Some(host.capture_screen().context("Failed to recapture screen")?);

        self.state = SearchState::Searching { attempt, heading };
        Ok(true)
    }

    /// Runs to a terminal state and returns it.
    pub fn run(mut self, host: &mut dyn AutomationHost) -> Result<SearchState> {
        while self.step(host)? {}
        Ok(self.state)
    }

    fn lookup(&mut self, host: &mut dyn AutomationHost) -> Result<Option<Rect>> {
        let screen = match self.screen.take() {
            Some(screen) => screen,
            None => host.capture_screen().context("Failed to capture screen")?,
        };
        self.lookups += 1;

        let outcome = host
            .match_template(&screen, &self.query)
            .context("Template match failed")?;
        self.screen = Some(screen);

        match outcome {
            MatchOutcome::Hit(rect) => Ok(Some(rect)),
            MatchOutcome::HitWithoutBox => {
                tracing::warn!("Entry {} matched without a usable box", self.query.target);
                Ok(None)
            }
            MatchOutcome::Miss => {
                tracing::info!("Entry {} not on screen", self.query.target);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::ScriptedHost;

    fn target() -> SearchTarget {
        SearchTarget::single("entry/farm.png")
    }

    fn searching(attempt: u32, heading: Heading) -> SearchState {
        SearchState::Searching { attempt, heading }
    }

    #[test]
    fn test_never_matching_host_exhausts_both_directions() {
        let mut host = ScriptedHost::new();

        let state = EntrySearch::new(target()).run(&mut host).unwrap();

        assert_eq!(state, SearchState::NotFound);
        assert_eq!(host.lookups(), MAX_LOOKUPS as usize);
        assert_eq!(
            host.swipes,
            vec![
                SwipeDirection::Right,
                SwipeDirection::Right,
                SwipeDirection::Left,
                SwipeDirection::Left,
            ]
        );
    }

    #[test]
    fn test_stop_after_first_miss_aborts_without_swiping() {
        let mut host = ScriptedHost::new().stop_after(1);

        let state = EntrySearch::new(target()).run(&mut host).unwrap();

        assert_eq!(state, SearchState::Aborted);
        assert_eq!(host.lookups(), 1);
        assert!(host.swipes.is_empty());
    }

    #[test]
    fn test_stop_during_left_phase() {
        let mut host = ScriptedHost::new().stop_after(4);

        let state = EntrySearch::new(target()).run(&mut host).unwrap();

        assert_eq!(state, SearchState::Aborted);
        assert_eq!(host.lookups(), 4);
        assert_eq!(host.swipes_toward(SwipeDirection::Right), 2);
        assert_eq!(host.swipes_toward(SwipeDirection::Left), 1);
    }

    #[test]
    fn test_found_on_first_lookup() {
        let rect = Rect::new(100, 200, 50, 60);
        let mut host = ScriptedHost::new().with_matches([MatchOutcome::Hit(rect)]);

        let state = EntrySearch::new(target()).run(&mut host).unwrap();

        assert_eq!(state, SearchState::Found(rect));
        assert_eq!(host.lookups(), 1);
        assert!(host.swipes.is_empty());
    }

    #[test]
    fn test_found_after_first_left_swipe() {
        let rect = Rect::new(1, 2, 3, 4);
        let mut host = ScriptedHost::new().with_matches([
            MatchOutcome::Miss,
            MatchOutcome::Miss,
            MatchOutcome::HitWithoutBox,
            MatchOutcome::Hit(rect),
        ]);

        let state = EntrySearch::new(target()).run(&mut host).unwrap();

        assert_eq!(state, SearchState::Found(rect));
        assert_eq!(host.lookups(), 4);
        assert_eq!(
            host.swipes,
            vec![SwipeDirection::Right, SwipeDirection::Right, SwipeDirection::Left]
        );
    }

    #[test]
    fn test_each_swipe_is_followed_by_a_capture() {
        let mut host = ScriptedHost::new();

        EntrySearch::new(target()).run(&mut host).unwrap();

        // one initial capture plus one per swipe
        assert_eq!(host.captures, 1 + host.swipes.len());
    }

    #[test]
    fn test_step_walks_the_states() {
        let mut host = ScriptedHost::new();
        let mut search = EntrySearch::new(target());

        let mut seen = vec![search.state().clone()];
        while search.step(&mut host).unwrap() {
            seen.push(search.state().clone());
        }
        seen.push(search.state().clone());

        let expected = vec![
            searching(0, Heading::None),
            searching(1, Heading::Right),
            searching(2, Heading::Right),
            searching(1, Heading::Left),
            searching(2, Heading::Left),
            SearchState::NotFound,
        ];
        assert_eq!(seen, expected);
        assert_eq!(search.lookups(), MAX_LOOKUPS);
        assert!(search.state().is_terminal());

        // terminal states do not look up again
        assert!(!search.step(&mut host).unwrap());
        assert_eq!(host.lookups(), MAX_LOOKUPS as usize);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(searching(0, Heading::None).to_string(), "Searching current screen");
        assert_eq!(searching(2, Heading::Left).to_string(), "Searching after left swipe 2");
        assert_eq!(SearchState::Aborted.to_string(), "Aborted");
    }
}
