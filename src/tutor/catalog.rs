//! Exercise content grouped into topics.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::parser::parse_expr;

/// One integral to solve. `integrand` is the function under the integral
/// sign, not an antiderivative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Problem statement in LaTeX.
    pub problem: String,
    pub integrand: String,
    /// Overrides the checker's sample points, for integrands with a
    /// singularity among the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_points: Option<Vec<i64>>,
}

impl Exercise {
    pub fn new(problem: impl Into<String>, integrand: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            integrand: integrand.into(),
            sample_points: None,
        }
    }

    pub fn with_sample_points(mut self, points: Vec<i64>) -> Self {
        self.sample_points = Some(points);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub exercises: Vec<Exercise>,
}

impl Topic {
    pub fn exercise(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Ordered topics. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        let catalog = Self { topics };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The shipped content: substitution, integration by parts and
    /// trigonometric integrals.
    pub fn builtin() -> Self {
        let topics = vec![
            Topic {
                id: "u_sub".to_string(),
                title: "U-Substitution".to_string(),
                exercises: vec![
                    Exercise::new(r"\int \sin(2x) \,dx", "sin(2*x)"),
                    Exercise::new(r"\int 2^{x^2}x \,dx", "x*2^(x^2)"),
                    // Pole at x = 1.
                    Exercise::new(r"\int \frac{x+1}{\sqrt{x-1}} \,dx", "(x+1)/sqrt(x-1)")
                        .with_sample_points(vec![2, 3, 4, 5, 6]),
                ],
            },
            Topic {
                id: "ibp".to_string(),
                title: "Integration by Parts".to_string(),
                exercises: vec![
                    Exercise::new(r"\int x^2\ln x \,dx", "x^2*ln(x)"),
                    Exercise::new(r"\int x \tan^{-1}x \,dx", "x*atan(x)"),
                    Exercise::new(r"\int x^2 \sin(2x) \,dx", "x^2*sin(2*x)"),
                ],
            },
            Topic {
                id: "trig".to_string(),
                title: "Trigonometric Integrals".to_string(),
                exercises: vec![
                    Exercise::new(r"\int \cot^4x \,dx", "(cot(x))**4"),
                    Exercise::new(r"\int \tan^3x \,dx", "(tan(x))**3"),
                    Exercise::new(r"\int \sin^5x \cos^4x \,dx", "(sin(x))**5*(cos(x))**4"),
                ],
            },
        ];
        Self { topics }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(contents)
            .map_err(|e| TutorError::Config(format!("parse catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TutorError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn exercise(&self, topic: &str, index: usize) -> Option<&Exercise> {
        self.topic(topic).and_then(|t| t.exercise(index))
    }

    pub fn validate(&self) -> Result<()> {
        if self.topics.is_empty() {
            return Err(TutorError::Config("catalog has no topics".to_string()));
        }
        let mut seen = HashSet::new();
        for topic in &self.topics {
            if topic.id.trim().is_empty() {
                return Err(TutorError::Config("topic id must be non-empty".to_string()));
            }
            if !seen.insert(topic.id.as_str()) {
                return Err(TutorError::Config(format!("duplicate topic id `{}`", topic.id)));
            }
            if topic.is_empty() {
                return Err(TutorError::Config(format!(
                    "topic `{}` has no exercises",
                    topic.id
                )));
            }
            for (i, exercise) in topic.exercises.iter().enumerate() {
                if exercise.sample_points.as_ref().is_some_and(Vec::is_empty) {
                    return Err(TutorError::Config(format!(
                        "topic `{}` exercise {i}: sample_points must be non-empty",
                        topic.id
                    )));
                }
                parse_expr(&exercise.integrand).map_err(|e| {
                    TutorError::Config(format!("topic `{}` exercise {i}: {e}", topic.id))
                })?;
            }
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().expect("builtin catalog");
        let ids: Vec<_> = catalog.topics().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["u_sub", "ibp", "trig"]);
        assert!(catalog.topics().iter().all(|t| t.len() == 3));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.exercise("ibp", 1).map(|e| e.integrand.as_str()),
            Some("x*atan(x)")
        );
        assert!(catalog.topic("limits").is_none());
        assert!(catalog.exercise("trig", 3).is_none());
    }

    #[test]
    fn reads_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[topics]]
            id = "poly"
            title = "Polynomials"

            [[topics.exercises]]
            problem = '\int 3x^2 \,dx'
            integrand = "3*x^2"

            [[topics.exercises]]
            problem = '\int \frac{1}{x} \,dx'
            integrand = "1/x"
            sample_points = [1, 2]
            "#,
        )
        .expect("catalog");
        let topic = catalog.topic("poly").expect("topic");
        assert_eq!(topic.len(), 2);
        assert_eq!(topic.exercises[1].sample_points, Some(vec![1, 2]));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let topic = Topic {
            id: "a".to_string(),
            title: "A".to_string(),
            exercises: vec![Exercise::new("p", "x")],
        };
        let err = Catalog::new(vec![topic.clone(), topic]).expect_err("duplicate");
        assert!(matches!(err, TutorError::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_empty_topic_and_bad_integrand() {
        let empty = Topic {
            id: "a".to_string(),
            title: "A".to_string(),
            exercises: vec![],
        };
        assert!(Catalog::new(vec![empty]).is_err());

        let broken = Topic {
            id: "b".to_string(),
            title: "B".to_string(),
            exercises: vec![Exercise::new("p", "x+")],
        };
        assert!(Catalog::new(vec![broken]).is_err());
    }

    #[test]
    fn rejects_empty_sample_set() {
        let topic = Topic {
            id: "a".to_string(),
            title: "A".to_string(),
            exercises: vec![Exercise::new("p", "x").with_sample_points(vec![])],
        };
        assert!(Catalog::new(vec![topic]).is_err());
    }
}
