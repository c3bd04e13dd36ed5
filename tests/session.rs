use calctutor::tutor::session::{CORRECT, CORRECT_LAST, INCORRECT, INVALID};
use calctutor::{Catalog, Event, Oracle, Screen, Session, Verdict};

struct Quiz {
    catalog: Catalog,
    oracle: Oracle,
}

impl Quiz {
    fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
            oracle: Oracle::default(),
        }
    }

    fn step(&self, session: Session, event: Event) -> Session {
        session.apply(event, &self.catalog, &self.oracle)
    }

    fn run(&self, events: Vec<Event>) -> Session {
        events
            .into_iter()
            .fold(Session::new(), |session, event| self.step(session, event))
    }
}

fn select(topic: &str) -> Event {
    Event::Select(topic.to_string())
}

fn submit(answer: &str) -> Event {
    Event::Submit(answer.to_string())
}

fn at(topic: &str, index: usize) -> Screen {
    Screen::InTopic {
        topic: topic.to_string(),
        index,
    }
}

#[test]
fn starts_on_menu() {
    let session = Session::new();
    assert_eq!(session.screen(), &Screen::Menu);
    assert_eq!(session.verdict(), None);
    assert_eq!(session.feedback(), "");
}

#[test]
fn select_enters_topic_at_first_exercise() {
    let session = Quiz::new().run(vec![select("u_sub")]);
    assert_eq!(session.screen(), &at("u_sub", 0));
}

#[test]
fn correct_answer_then_advance_moves_on() {
    let quiz = Quiz::new();
    let session = quiz.run(vec![select("u_sub"), submit("-cos(2x)/2")]);
    assert_eq!(session.verdict(), Some(Verdict::Correct));
    assert_eq!(session.feedback(), CORRECT);
    assert_eq!(session.last_input(), Some("-cos(2x)/2"));
    assert_eq!(session.rendered(), Some("-cos(2*x)/2"));
    assert!(session.can_advance(&quiz.catalog));

    let session = quiz.step(session, Event::Advance);
    assert_eq!(session.screen(), &at("u_sub", 1));
    assert_eq!(session.verdict(), None);
    assert_eq!(session.feedback(), "");
    assert_eq!(session.last_input(), None);
}

#[test]
fn advance_without_correct_verdict_is_a_no_op() {
    let quiz = Quiz::new();
    let fresh = quiz.run(vec![select("u_sub")]);
    assert_eq!(quiz.step(fresh.clone(), Event::Advance), fresh);

    let wrong = quiz.step(fresh, submit("cos(2x)"));
    assert_eq!(wrong.verdict(), Some(Verdict::Incorrect));
    assert_eq!(wrong.feedback(), INCORRECT);
    assert!(!wrong.can_advance(&quiz.catalog));
    assert_eq!(quiz.step(wrong.clone(), Event::Advance), wrong);
}

#[test]
fn invalid_input_keeps_position() {
    let session = Quiz::new().run(vec![select("ibp"), submit("x+")]);
    assert_eq!(session.screen(), &at("ibp", 0));
    assert_eq!(session.verdict(), Some(Verdict::InvalidInput));
    assert_eq!(session.feedback(), INVALID);
    assert_eq!(session.rendered(), None);
}

#[test]
fn retry_after_incorrect_can_succeed() {
    let session = Quiz::new().run(vec![select("ibp"), submit("x^3"), submit("x^3ln(x)/3-x^3/9")]);
    assert_eq!(session.verdict(), Some(Verdict::Correct));
    assert_eq!(session.last_input(), Some("x^3ln(x)/3-x^3/9"));
}

#[test]
fn last_exercise_congratulates_and_stops() {
    let quiz = Quiz::new();
    let session = quiz.run(vec![
        select("u_sub"),
        submit("-cos(2x)/2"),
        Event::Advance,
        submit("2^(x^2)/(2ln2)"),
        Event::Advance,
        submit("2/3*(x-1)^(3/2)+4*sqrt(x-1)"),
    ]);
    assert_eq!(session.screen(), &at("u_sub", 2));
    assert_eq!(session.feedback(), CORRECT_LAST);
    assert!(!session.can_advance(&quiz.catalog));
    assert_eq!(quiz.step(session.clone(), Event::Advance), session);
}

#[test]
fn back_returns_to_menu_and_reentry_restarts() {
    let quiz = Quiz::new();
    let session = quiz.run(vec![
        select("u_sub"),
        submit("-cos(2x)/2"),
        Event::Advance,
        Event::Back,
    ]);
    assert_eq!(session, Session::new());

    let session = quiz.step(session, select("u_sub"));
    assert_eq!(session.screen(), &at("u_sub", 0));
}

#[test]
fn sessions_are_independent() {
    let quiz = Quiz::new();
    let a = quiz.run(vec![select("trig")]);
    let b = quiz.run(vec![select("ibp"), submit("x^3ln(x)/3-x^3/9")]);
    assert_eq!(a.screen(), &at("trig", 0));
    assert_eq!(a.verdict(), None);
    assert_eq!(b.verdict(), Some(Verdict::Correct));
}

#[test]
fn current_exercise_follows_cursor() {
    let quiz = Quiz::new();
    let session = quiz.run(vec![select("trig")]);
    let exercise = session.current_exercise(&quiz.catalog).expect("exercise");
    assert_eq!(exercise.integrand, "(cot(x))**4");
    assert!(Session::new().current_exercise(&quiz.catalog).is_none());
}
