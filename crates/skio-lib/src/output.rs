use std::fmt::Write;

use serde::Serialize;

use crate::course::NodeId;
use crate::routing::CoursePlan;

/// Number of junction entries per line of the plain-text report.
const JUNCTIONS_PER_LINE: usize = 11;

/// Presentation style for turning a [`CourseSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseRenderMode {
    /// Total distance followed by the visited junctions.
    PlainText,
    /// One line per leg between consecutive waypoints.
    Legs,
}

/// Summary of one leg between consecutive waypoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegSummary {
    pub index: usize,
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
    pub hops: usize,
}

/// Structured representation of a planned course that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseSummary {
    pub total_distance: f64,
    pub junctions: Vec<String>,
    pub legs: Vec<LegSummary>,
}

impl CourseSummary {
    pub fn from_plan(plan: &CoursePlan) -> Self {
        let legs = plan
            .legs
            .iter()
            .enumerate()
            .map(|(index, leg)| LegSummary {
                index: index + 1,
                from: leg.from.clone(),
                to: leg.to.clone(),
                distance: leg.distance,
                hops: leg.nodes.len().saturating_sub(1),
            })
            .collect();

        Self {
            total_distance: plan.total_distance,
            junctions: plan.junctions.clone(),
            legs,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: CourseRenderMode) -> String {
        match mode {
            CourseRenderMode::PlainText => self.render_plain(),
            CourseRenderMode::Legs => self.render_legs(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Total Distance:\t{}",
            format_distance(self.total_distance)
        );
        let _ = writeln!(buffer, "\nJunctions Visited:");

        for (position, junction) in self.junctions.iter().enumerate() {
            let separator = if (position + 1) % JUNCTIONS_PER_LINE == 0 {
                '\n'
            } else {
                '\t'
            };
            let _ = write!(buffer, "-> {{ ID: {junction} }}{separator}");
        }
        if !buffer.ends_with('\n') {
            buffer.push('\n');
        }

        buffer
    }

    fn render_legs(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Course: {} legs, total distance {}",
            self.legs.len(),
            format_distance(self.total_distance)
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "{:>3}: {} -> {} ({} via {} hops)",
                leg.index,
                leg.from,
                leg.to,
                format_distance(leg.distance),
                leg.hops
            );
        }
        buffer
    }
}

/// Format a distance, always keeping at least one decimal place.
pub fn format_distance(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{distance:.1}")
    } else {
        format!("{distance}")
    }
}
