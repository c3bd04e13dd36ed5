//! Quiz progression as a pure state machine.
//!
//! A [`Session`] is owned by whoever drives the quiz. Every interaction is an
//! [`Event`] and [`Session::apply`] returns the next state; nothing is shared
//! between sessions.

use tracing::{debug, warn};

use crate::tutor::catalog::{Catalog, Exercise};
use crate::tutor::display::render;
use crate::tutor::notation::normalize;
use crate::tutor::oracle::{Oracle, Verdict};

pub const CORRECT: &str = "Correct!";
pub const CORRECT_LAST: &str = "Correct! Great job!";
pub const INCORRECT: &str = "Incorrect. Try again!";
pub const INVALID: &str = "Invalid input. Please enter a valid mathematical expression.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    InTopic {
        topic: String,
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(String),
    Submit(String),
    Advance,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    screen: Screen,
    verdict: Option<Verdict>,
    feedback: String,
    last_input: Option<String>,
    rendered: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Learner-facing message for the last submission. Empty before one.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Raw text of the last submission.
    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    /// The last answer as shown back to the learner. Set only when correct.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn current_exercise<'c>(&self, catalog: &'c Catalog) -> Option<&'c Exercise> {
        match &self.screen {
            Screen::Menu => None,
            Screen::InTopic { topic, index } => catalog.exercise(topic, *index),
        }
    }

    /// Whether [`Event::Advance`] would move to another exercise.
    pub fn can_advance(&self, catalog: &Catalog) -> bool {
        match &self.screen {
            Screen::InTopic { topic, index } => {
                self.verdict == Some(Verdict::Correct)
                    && catalog.topic(topic).is_some_and(|t| index + 1 < t.len())
            }
            Screen::Menu => false,
        }
    }

    pub fn apply(self, event: Event, catalog: &Catalog, oracle: &Oracle) -> Session {
        match event {
            Event::Select(topic) => self.select(topic, catalog),
            Event::Submit(answer) => self.submit(&answer, catalog, oracle),
            Event::Advance => self.advance(catalog),
            Event::Back => self.back(),
        }
    }

    fn select(self, topic: String, catalog: &Catalog) -> Session {
        if let Screen::InTopic { topic: current, .. } = &self.screen {
            warn!(requested = %topic, current = %current, "select ignored inside a topic");
            return self;
        }
        if catalog.topic(&topic).is_none() {
            warn!(topic = %topic, "select ignored for unknown topic");
            return self;
        }
        debug!(topic = %topic, "entered topic");
        Session {
            screen: Screen::InTopic { topic, index: 0 },
            ..Session::default()
        }
    }

    fn submit(self, answer: &str, catalog: &Catalog, oracle: &Oracle) -> Session {
        if answer.trim().is_empty() {
            return self;
        }
        let Screen::InTopic { topic, index } = &self.screen else {
            warn!("submit ignored outside a topic");
            return self;
        };
        let Some(exercise) = catalog.exercise(topic, *index) else {
            warn!(topic = %topic, index, "submit ignored for missing exercise");
            return self;
        };

        let points = exercise.sample_points.as_deref().unwrap_or(&[]);
        let verification = oracle.verify_with_points(&normalize(answer), &exercise.integrand, points);
        let is_last = catalog.topic(topic).is_some_and(|t| index + 1 == t.len());

        let (feedback, rendered) = match verification.verdict {
            Verdict::Correct => {
                let message = if is_last { CORRECT_LAST } else { CORRECT };
                (message, verification.candidate.as_ref().map(render))
            }
            Verdict::Incorrect => (INCORRECT, None),
            Verdict::InvalidInput => (INVALID, None),
        };
        Session {
            verdict: Some(verification.verdict),
            feedback: feedback.to_string(),
            last_input: Some(answer.to_string()),
            rendered,
            ..self
        }
    }

    fn advance(self, catalog: &Catalog) -> Session {
        if !self.can_advance(catalog) {
            debug!(screen = ?self.screen, verdict = ?self.verdict, "advance ignored");
            return self;
        }
        match self.screen {
            Screen::InTopic { topic, index } => Session {
                screen: Screen::InTopic {
                    topic,
                    index: index + 1,
                },
                ..Session::default()
            },
            Screen::Menu => Session::default(),
        }
    }

    fn back(self) -> Session {
        if self.screen == Screen::Menu {
            return self;
        }
        Session::default()
    }
}
