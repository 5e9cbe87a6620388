/// [crate::properties] contains the content tree: [Textbook] → [Chapter] → [ProblemSet] →
/// [Problem], the parsed [ProblemNumber], and the curve-sketch [Visualization] configuration a
/// problem may carry.
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{error::ContentError, nodekey::parse_id};

/// A single solved exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Unique within the owning [ProblemSet].
    pub id: u32,
    /// Dotted `"chapter.set.problem"` id path, e.g. `"14.1.3"`. Display only; see
    /// [ProblemNumber].
    pub number: String,
    pub content: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub solution: String,
    /// When the solution was added or last updated.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub has_visualization: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
}

impl Problem {
    /// Parse [Problem::number] into its three id components.
    pub fn parsed_number(&self) -> Result<ProblemNumber, ContentError> {
        self.number.parse()
    }

    pub fn has_hint(&self) -> bool {
        !self.hint.is_empty()
    }

    pub fn has_solution(&self) -> bool {
        !self.solution.is_empty()
    }

    /// The visualization, if the problem both flags and configures one.
    pub fn sketch(&self) -> Option<&Visualization> {
        self.visualization.as_ref().filter(|_| self.has_visualization)
    }

    pub fn label(&self) -> String {
        format!("Problem {}", self.number)
    }
}

/// A section within a chapter, e.g. "14.1 Vector-Valued Functions".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSet {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn first_problem(&self) -> Option<&Problem> {
        self.problems.first()
    }

    pub fn last_problem(&self) -> Option<&Problem> {
        self.problems.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub problem_sets: Vec<ProblemSet>,
}

impl Chapter {
    pub fn problem_count(&self) -> usize {
        self.problem_sets.iter().map(|ps| ps.problems.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Textbook {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Textbook {
    pub fn problem_count(&self) -> usize {
        self.chapters.iter().map(Chapter::problem_count).sum()
    }

    pub fn problem_set_count(&self) -> usize {
        self.chapters.iter().map(|c| c.problem_sets.len()).sum()
    }
}

/// The parsed form of [Problem::number]: the ids (not positions) of the owning chapter and
/// problem set, and of the problem itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProblemNumber {
    pub chapter: u32,
    pub set: u32,
    pub problem: u32,
}

impl ProblemNumber {
    pub fn new(chapter: u32, set: u32, problem: u32) -> Self {
        ProblemNumber {
            chapter,
            set,
            problem,
        }
    }
}

impl FromStr for ProblemNumber {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| ContentError::MalformedNumber {
            number: s.to_string(),
            reason,
        };
        let parts = s.split('.').collect::<Vec<&str>>();
        if parts.len() != 3 {
            return Err(malformed(format!(
                "expected 3 dot-separated components, found {}",
                parts.len()
            )));
        }
        let mut ids = [0u32; 3];
        for (slot, part) in ids.iter_mut().zip(parts.iter()) {
            *slot = parse_id(part)
                .ok_or_else(|| malformed(format!("component '{part}' is not a canonical id")))?;
        }
        Ok(ProblemNumber::new(ids[0], ids[1], ids[2]))
    }
}

impl Display for ProblemNumber {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.chapter, self.set, self.problem)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub r: f64,
    /// Radians.
    pub theta: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dashed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_points: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One plotted curve. Exactly which of the point sources is used is up to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<CartesianPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polar_points: Vec<PolarPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polar_equation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<CurveOptions>,
}

/// Curve sketch configuration attached to a [Problem]. Opaque to navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visualization {
    pub width: u32,
    pub height: u32,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub show_grid: bool,
    pub show_axes: bool,
    pub show_labels: bool,
    pub background_color: String,
    pub curves: Vec<CurveConfig>,
}

impl Default for Visualization {
    fn default() -> Self {
        Visualization {
            width: 400,
            height: 400,
            x_range: [-10.0, 10.0],
            y_range: [-10.0, 10.0],
            show_grid: true,
            show_axes: true,
            show_labels: true,
            background_color: "transparent".to_string(),
            curves: Vec::new(),
        }
    }
}
